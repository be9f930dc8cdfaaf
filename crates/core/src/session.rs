//! Session - owns the world and runs the per-frame simulation step.
//!
//! The session lives on the controlling thread. Input producers get a
//! [`MoveSender`] and a [`RunFlag`] clone; everything else stays here.

use std::time::Duration;

use tracing::{debug, info, trace};

use crate::channel::{MoveChannel, MoveSender};
use crate::clock::SessionClock;
use crate::config::{ConfigError, SessionConfig};
use crate::rng::SimpleRng;
use crate::run_flag::RunFlag;
use crate::snapshot::{ParticipantSnapshot, RenderSink, WorldSnapshot};
use crate::spawner::ItemSpawner;
use crate::termination;
use crate::types::{MoveIntent, TerminationState};
use crate::world::{MoveOutcome, World};

/// What one [`Session::step`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub elapsed: Duration,
    /// Intents that moved a participant.
    pub accepted: u32,
    /// Intents dropped by bounds, obstacle or blocking checks.
    pub rejected: u32,
    /// Intents drained after the session was decided.
    pub discarded: u32,
    pub collected: u32,
    pub spawned: bool,
    pub expired: usize,
    /// This step performed the running to decided transition.
    pub decided: bool,
}

pub struct Session<C: SessionClock> {
    config: SessionConfig,
    world: World,
    spawner: ItemSpawner,
    rng: SimpleRng,
    channel: MoveChannel,
    run_flag: RunFlag,
    clock: C,
    termination: TerminationState,
    elapsed: Duration,
    last_spawn: Duration,
    /// Drain buffer reused across frames.
    pending: Vec<MoveIntent>,
}

impl<C: SessionClock> Session<C> {
    /// Validate the configuration and lay out a fresh arena.
    pub fn new(config: SessionConfig, clock: C) -> Result<Self, ConfigError> {
        let mut rng = SimpleRng::new(config.seed);
        let world = World::generate(&config, &mut rng)?;
        Ok(Self::assemble(config, world, rng, clock))
    }

    /// Start a session on a prepared arena.
    ///
    /// The configuration's grid size is taken from the world; its obstacle count
    /// is ignored.
    pub fn with_world(
        mut config: SessionConfig,
        world: World,
        clock: C,
    ) -> Result<Self, ConfigError> {
        config.grid_size = world.grid_size();
        config.obstacle_count = world.obstacles().len();
        config.validate()?;
        let rng = SimpleRng::new(config.seed);
        Ok(Self::assemble(config, world, rng, clock))
    }

    fn assemble(config: SessionConfig, world: World, rng: SimpleRng, clock: C) -> Self {
        info!(
            grid_size = config.grid_size,
            duration_secs = config.duration.as_secs_f32(),
            item_cap = config.item_cap,
            obstacles = world.obstacles().len(),
            participants_block = config.participants_block,
            seed = config.seed,
            "session created"
        );
        let spawner = ItemSpawner::new(config.item_cap);
        Self {
            config,
            world,
            spawner,
            rng,
            channel: MoveChannel::new(),
            run_flag: RunFlag::new(),
            clock,
            termination: TerminationState::Running,
            elapsed: Duration::ZERO,
            last_spawn: Duration::ZERO,
            pending: Vec::with_capacity(16),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn termination(&self) -> TerminationState {
        self.termination
    }

    /// Handle for an input producer.
    pub fn move_sender(&self) -> MoveSender {
        self.channel.sender()
    }

    pub fn run_flag(&self) -> RunFlag {
        self.run_flag.clone()
    }

    /// Clock reading at the last step.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Countdown at the last step, saturating at zero.
    pub fn remaining(&self) -> Duration {
        self.config.duration.saturating_sub(self.elapsed)
    }

    /// End the session early (quit). Producers observe this and exit.
    pub fn stop(&self) -> bool {
        let stopped = self.run_flag.stop();
        if stopped {
            info!(elapsed_secs = self.elapsed.as_secs_f32(), "session stopped");
        }
        stopped
    }

    /// Advance the simulation by one frame.
    pub fn step(&mut self) -> StepReport {
        let elapsed = self.clock.elapsed();
        self.elapsed = elapsed;
        let mut report = StepReport {
            elapsed,
            ..StepReport::default()
        };

        if self.termination.is_running() && self.remaining().is_zero() {
            let scores = self.world.scores();
            self.termination = termination::decide(scores);
            self.run_flag.stop();
            report.decided = true;
            if let Some(outcome) = self.termination.outcome() {
                info!(
                    result = termination::headline(outcome),
                    p1 = scores[0],
                    p2 = scores[1],
                    "session decided"
                );
            }
        }

        self.pending.clear();
        let drained = self.channel.drain_into(&mut self.pending);

        if self.termination.is_running() {
            for intent in self.pending.drain(..) {
                match self.world.apply_move(intent, self.config.participants_block) {
                    MoveOutcome::Moved { collected } => {
                        report.accepted += 1;
                        if collected {
                            report.collected += 1;
                            debug!(
                                participant = intent.participant.tag(),
                                score = self.world.participant(intent.participant).score(),
                                "item collected"
                            );
                        }
                    }
                    MoveOutcome::Rejected(reason) => {
                        report.rejected += 1;
                        trace!(
                            participant = intent.participant.tag(),
                            direction = intent.direction.as_str(),
                            ?reason,
                            "move rejected"
                        );
                    }
                }
            }
            self.world.sweep_collected();

            if elapsed.saturating_sub(self.last_spawn) >= self.config.spawn_interval
                && self
                    .spawner
                    .try_spawn(&mut self.world, &mut self.rng, elapsed)
            {
                self.last_spawn = elapsed;
                report.spawned = true;
                debug!(
                    active = self.world.active_item_count(),
                    elapsed_secs = elapsed.as_secs_f32(),
                    "item spawned"
                );
            }

            if let Some(max_age) = self.config.item_expiry {
                report.expired = self.world.prune_expired(elapsed, max_age);
                if report.expired > 0 {
                    debug!(expired = report.expired, "items expired");
                }
            }
        } else {
            report.discarded = drained as u32;
        }

        report
    }

    /// Write the current state into a reusable snapshot.
    pub fn snapshot_into(&self, out: &mut WorldSnapshot) {
        out.grid_size = self.world.grid_size();
        for (slot, p) in out.participants.iter_mut().zip(self.world.participants()) {
            *slot = ParticipantSnapshot {
                id: p.id(),
                pos: p.pos(),
                score: p.score(),
            };
        }
        out.items.clear();
        out.items.extend(self.world.active_items().map(|item| item.pos));
        out.obstacles.clear();
        out.obstacles
            .extend(self.world.obstacles().iter().map(|o| o.pos));
        out.elapsed = self.elapsed;
        out.remaining = self.remaining();
        out.termination = self.termination;
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let mut s = WorldSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Step once and hand the resulting snapshot to `sink`.
    pub fn frame<S: RenderSink>(
        &mut self,
        sink: &mut S,
        snapshot: &mut WorldSnapshot,
    ) -> Result<StepReport, S::Error> {
        let report = self.step();
        self.snapshot_into(snapshot);
        sink.present(snapshot)?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::types::{Direction, GridCoord, Outcome, ParticipantId};

    fn session_with(world: World, config: SessionConfig) -> (Session<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let session = Session::with_world(config, world, clock.clone()).unwrap();
        (session, clock)
    }

    fn open_world() -> World {
        World::with_layout(12, [GridCoord::new(5, 5), GridCoord::new(10, 10)], &[]).unwrap()
    }

    #[test]
    fn new_session_is_running() {
        let session = Session::new(SessionConfig::classic(), ManualClock::new()).unwrap();
        assert!(session.termination().is_running());
        assert!(session.run_flag().is_running());
        assert_eq!(session.world().obstacles().len(), 7);
    }

    #[test]
    fn new_session_refuses_bad_config() {
        let config = SessionConfig {
            grid_size: 2,
            ..SessionConfig::classic()
        };
        assert!(Session::new(config, ManualClock::new()).is_err());
    }

    #[test]
    fn new_session_refuses_oversized_grid() {
        for grid_size in [32_768, 32_769, 20_000] {
            let config = SessionConfig {
                grid_size,
                obstacle_count: 0,
                ..SessionConfig::classic()
            };
            assert!(matches!(
                Session::new(config, ManualClock::new()),
                Err(ConfigError::GridTooLarge { .. })
            ));
        }
    }

    #[test]
    fn step_applies_queued_moves_in_order() {
        let (mut session, _clock) = session_with(open_world(), SessionConfig::classic());
        let tx = session.move_sender();
        tx.enqueue(MoveIntent::new(ParticipantId::One, Direction::Up));
        tx.enqueue(MoveIntent::new(ParticipantId::One, Direction::Right));
        tx.enqueue(MoveIntent::new(ParticipantId::Two, Direction::Down));

        let report = session.step();
        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected, 1);
        assert_eq!(
            session.world().participant(ParticipantId::One).pos(),
            GridCoord::new(4, 6)
        );
    }

    #[test]
    fn first_spawn_waits_one_interval() {
        let (mut session, clock) = session_with(open_world(), SessionConfig::classic());
        clock.set(Duration::from_millis(1999));
        assert!(!session.step().spawned);
        clock.set(Duration::from_secs(2));
        assert!(session.step().spawned);
        assert_eq!(session.world().active_item_count(), 1);
        clock.set(Duration::from_millis(3000));
        assert!(!session.step().spawned);
    }

    #[test]
    fn decision_stops_run_flag_and_discards_moves() {
        let (mut session, clock) = session_with(open_world(), SessionConfig::classic());
        let flag = session.run_flag();
        clock.set(Duration::from_secs(60));
        let tx = session.move_sender();
        tx.enqueue(MoveIntent::new(ParticipantId::One, Direction::Up));

        let report = session.step();
        assert!(report.decided);
        assert_eq!(report.discarded, 1);
        assert!(!flag.is_running());
        assert_eq!(session.termination().outcome(), Some(Outcome::Tie));
        assert_eq!(
            session.world().participant(ParticipantId::One).pos(),
            GridCoord::new(5, 5)
        );
    }

    #[test]
    fn expiry_only_with_configured_age() {
        let mut world = open_world();
        world.place_item(GridCoord::new(2, 2), Duration::ZERO);
        let config = SessionConfig {
            item_cap: 1,
            ..SessionConfig::timed()
        };
        let (mut session, clock) = session_with(world, config);
        clock.set(Duration::from_secs(15));
        assert_eq!(session.step().expired, 0);
        clock.set(Duration::from_millis(15_001));
        assert_eq!(session.step().expired, 1);
    }

    #[test]
    fn snapshot_reflects_world() {
        let mut world = open_world();
        world.place_item(GridCoord::new(3, 3), Duration::ZERO);
        let (mut session, clock) = session_with(world, SessionConfig::classic());
        clock.set(Duration::from_millis(500));
        session.step();

        let snap = session.snapshot();
        assert_eq!(snap.grid_size, 12);
        assert_eq!(snap.items, vec![GridCoord::new(3, 3)]);
        assert_eq!(snap.participant(ParticipantId::One).pos, GridCoord::new(5, 5));
        assert_eq!(snap.remaining, Duration::from_millis(59_500));
        assert!(snap.is_running());
    }

    struct Collect(Vec<WorldSnapshot>);

    impl RenderSink for Collect {
        type Error = std::convert::Infallible;

        fn present(&mut self, snapshot: &WorldSnapshot) -> Result<(), Self::Error> {
            self.0.push(snapshot.clone());
            Ok(())
        }
    }

    #[test]
    fn frame_presents_post_step_snapshot() {
        let (mut session, clock) = session_with(open_world(), SessionConfig::classic());
        session
            .move_sender()
            .enqueue(MoveIntent::new(ParticipantId::Two, Direction::Up));
        clock.set(Duration::from_secs(1));

        let mut sink = Collect(Vec::new());
        let mut snap = WorldSnapshot::default();
        let report = session.frame(&mut sink, &mut snap).unwrap();
        assert_eq!(report.accepted, 1);
        assert_eq!(sink.0.len(), 1);
        assert_eq!(
            sink.0[0].participant(ParticipantId::Two).pos,
            GridCoord::new(9, 10)
        );
    }
}
