//! World state - participants, obstacles and items on the arena grid.
//!
//! The world is owned by the session on the controlling thread. Nothing in
//! here is shared across threads; input producers only ever see the move
//! channel.

use std::time::Duration;

use arrayvec::ArrayVec;

use crate::config::{ConfigError, SessionConfig};
use crate::rng::SimpleRng;
use crate::types::{GridCoord, MoveIntent, ParticipantId, MAX_OBSTACLES, PARTICIPANT_COUNT};

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    id: ParticipantId,
    pos: GridCoord,
    score: u32,
}

impl Participant {
    pub fn new(id: ParticipantId, pos: GridCoord) -> Self {
        Self { id, pos, score: 0 }
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn pos(&self) -> GridCoord {
        self.pos
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

/// Static, collision-blocking cell ("crate").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Obstacle {
    pub pos: GridCoord,
}

/// Score-granting collectible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub pos: GridCoord,
    pub collected: bool,
    /// Session-relative spawn time.
    pub spawned_at: Duration,
}

impl Item {
    pub fn age(&self, now: Duration) -> Duration {
        now.saturating_sub(self.spawned_at)
    }
}

/// Why a move intent was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Candidate cell is on the boundary ring or outside the grid.
    OutOfBounds,
    Obstacle,
    /// Candidate cell holds the other participant (blocking sessions only).
    Occupied,
}

/// Result of resolving one intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { collected: bool },
    Rejected(Rejection),
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

#[derive(Debug, Clone)]
pub struct World {
    grid_size: u16,
    participants: [Participant; PARTICIPANT_COUNT],
    obstacles: ArrayVec<Obstacle, MAX_OBSTACLES>,
    items: Vec<Item>,
}

impl World {
    /// Default start cells: top-left and bottom-right interior corners.
    pub fn start_cells(grid_size: u16) -> [GridCoord; PARTICIPANT_COUNT] {
        let far = grid_size as i16 - 2;
        [GridCoord::new(1, 1), GridCoord::new(far, far)]
    }

    /// Lay out a fresh arena for a validated configuration.
    ///
    /// Obstacles are drawn without replacement from the interior cells that are
    /// not start cells, so placement always terminates.
    pub fn generate(config: &SessionConfig, rng: &mut SimpleRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let n = config.grid_size;
        let starts = Self::start_cells(n);

        let mut free: Vec<GridCoord> = (1..=n as i16 - 2)
            .flat_map(|row| (1..=n as i16 - 2).map(move |col| GridCoord::new(row, col)))
            .filter(|cell| !starts.contains(cell))
            .collect();
        rng.shuffle(&mut free);
        free.truncate(config.obstacle_count);

        Self::with_layout(n, starts, &free)
    }

    /// Build an arena with explicit start cells and obstacle positions.
    pub fn with_layout(
        grid_size: u16,
        starts: [GridCoord; PARTICIPANT_COUNT],
        obstacles: &[GridCoord],
    ) -> Result<Self, ConfigError> {
        if grid_size < crate::types::MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                size: grid_size,
                min: crate::types::MIN_GRID_SIZE,
            });
        }
        if grid_size > crate::types::MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                size: grid_size,
                max: crate::types::MAX_GRID_SIZE,
            });
        }
        if obstacles.len() > MAX_OBSTACLES {
            return Err(ConfigError::TooManyObstacles {
                count: obstacles.len(),
                capacity: MAX_OBSTACLES,
            });
        }
        if starts[0] == starts[1] {
            return Err(ConfigError::InvalidLayout {
                reason: "participants share a start cell",
            });
        }
        if starts.iter().any(|s| !s.is_interior(grid_size)) {
            return Err(ConfigError::InvalidLayout {
                reason: "start cell outside the interior",
            });
        }

        let mut placed: ArrayVec<Obstacle, MAX_OBSTACLES> = ArrayVec::new();
        for &pos in obstacles {
            if !pos.is_interior(grid_size) {
                return Err(ConfigError::InvalidLayout {
                    reason: "obstacle outside the interior",
                });
            }
            if starts.contains(&pos) {
                return Err(ConfigError::InvalidLayout {
                    reason: "obstacle on a start cell",
                });
            }
            if placed.iter().any(|o| o.pos == pos) {
                return Err(ConfigError::InvalidLayout {
                    reason: "two obstacles share a cell",
                });
            }
            placed.push(Obstacle { pos });
        }

        Ok(Self {
            grid_size,
            participants: [
                Participant::new(ParticipantId::One, starts[0]),
                Participant::new(ParticipantId::Two, starts[1]),
            ],
            obstacles: placed,
            items: Vec::new(),
        })
    }

    pub fn grid_size(&self) -> u16 {
        self.grid_size
    }

    pub fn participant(&self, id: ParticipantId) -> &Participant {
        &self.participants[id.index()]
    }

    pub fn participants(&self) -> &[Participant; PARTICIPANT_COUNT] {
        &self.participants
    }

    pub fn scores(&self) -> [u32; PARTICIPANT_COUNT] {
        [self.participants[0].score, self.participants[1].score]
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Uncollected items.
    pub fn active_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| !item.collected)
    }

    pub fn active_item_count(&self) -> usize {
        self.active_items().count()
    }

    pub fn is_obstacle(&self, pos: GridCoord) -> bool {
        self.obstacles.iter().any(|o| o.pos == pos)
    }

    pub fn has_active_item(&self, pos: GridCoord) -> bool {
        self.active_items().any(|item| item.pos == pos)
    }

    /// A cell an item may be spawned on.
    pub fn is_free_for_item(&self, pos: GridCoord) -> bool {
        pos.is_interior(self.grid_size) && !self.is_obstacle(pos) && !self.has_active_item(pos)
    }

    /// Add an uncollected item. Returns `false` (and does nothing) if the cell is not free.
    pub fn place_item(&mut self, pos: GridCoord, now: Duration) -> bool {
        if !self.is_free_for_item(pos) {
            return false;
        }
        self.items.push(Item {
            pos,
            collected: false,
            spawned_at: now,
        });
        true
    }

    /// Resolve one intent against the current state.
    ///
    /// Rejections leave the world untouched. An accepted move collects at most
    /// one item, since uncollected items never share a cell.
    pub fn apply_move(&mut self, intent: MoveIntent, participants_block: bool) -> MoveOutcome {
        let idx = intent.participant.index();
        let candidate = self.participants[idx].pos.step(intent.direction);

        if !candidate.is_interior(self.grid_size) {
            return MoveOutcome::Rejected(Rejection::OutOfBounds);
        }
        if self.is_obstacle(candidate) {
            return MoveOutcome::Rejected(Rejection::Obstacle);
        }
        if participants_block && self.participant(intent.participant.other()).pos == candidate {
            return MoveOutcome::Rejected(Rejection::Occupied);
        }

        self.participants[idx].pos = candidate;

        let mut collected = false;
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| !item.collected && item.pos == candidate)
        {
            item.collected = true;
            self.participants[idx].score += 1;
            collected = true;
        }
        MoveOutcome::Moved { collected }
    }

    /// Drop collected items from storage. Returns how many were removed.
    pub fn sweep_collected(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.collected);
        before - self.items.len()
    }

    /// Remove uncollected items strictly older than `max_age`. Returns how many expired.
    pub fn prune_expired(&mut self, now: Duration, max_age: Duration) -> usize {
        let before = self.items.len();
        self.items
            .retain(|item| item.collected || item.age(now) <= max_age);
        before - self.items.len()
    }
}
