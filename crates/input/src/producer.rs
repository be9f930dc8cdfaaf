//! Input producers - one polling thread per participant.
//!
//! A producer reads only the key source and the run flag and writes only to
//! the move channel. It never sees the world.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::core::{MoveSender, ProducerTiming, RunFlag};
use crate::keys::KeySource;
use crate::types::{MoveIntent, ParticipantId};

pub struct InputProducer<K: ?Sized> {
    participant: ParticipantId,
    keys: Arc<K>,
    sender: MoveSender,
    run_flag: RunFlag,
    timing: ProducerTiming,
}

impl<K: KeySource + ?Sized + 'static> InputProducer<K> {
    pub fn new(
        participant: ParticipantId,
        keys: Arc<K>,
        sender: MoveSender,
        run_flag: RunFlag,
        timing: ProducerTiming,
    ) -> Self {
        Self {
            participant,
            keys,
            sender,
            run_flag,
            timing,
        }
    }

    pub fn participant(&self) -> ParticipantId {
        self.participant
    }

    /// One polling tick: enqueue at most one intent for the highest-priority held direction.
    pub fn poll_once(&self) -> Option<MoveIntent> {
        let direction = self.keys.pressed(self.participant).highest_priority()?;
        let intent = MoveIntent::new(self.participant, direction);
        self.sender.enqueue(intent);
        Some(intent)
    }

    /// Poll until the run flag drops.
    pub fn run(self) {
        debug!(participant = self.participant.tag(), "input producer started");
        let mut produced = 0u64;
        while self.run_flag.is_running() {
            match self.poll_once() {
                Some(_) => {
                    produced += 1;
                    thread::sleep(self.timing.cooldown);
                }
                None => thread::sleep(self.timing.idle),
            }
        }
        debug!(
            participant = self.participant.tag(),
            produced, "input producer stopped"
        );
    }

    /// Run on a dedicated, named thread (`input-p1`, `input-p2`).
    pub fn spawn(self) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name(format!("input-{}", self.participant.tag()))
            .spawn(move || self.run())
    }
}

/// The producer threads of one session.
pub struct ProducerSet {
    handles: Vec<(ParticipantId, JoinHandle<()>)>,
}

impl ProducerSet {
    /// Start one producer per participant.
    ///
    /// If a thread cannot be spawned, the run flag is stopped and any thread
    /// already started is joined before the error is returned.
    pub fn spawn_all<K: KeySource + ?Sized + 'static>(
        keys: Arc<K>,
        sender: &MoveSender,
        run_flag: &RunFlag,
        timing: ProducerTiming,
    ) -> io::Result<Self> {
        let mut set = Self {
            handles: Vec::with_capacity(ParticipantId::ALL.len()),
        };
        for id in ParticipantId::ALL {
            let producer =
                InputProducer::new(id, keys.clone(), sender.clone(), run_flag.clone(), timing);
            match producer.spawn() {
                Ok(handle) => set.handles.push((id, handle)),
                Err(err) => {
                    run_flag.stop();
                    set.join();
                    return Err(err);
                }
            }
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for every producer to exit. Call after the run flag is stopped.
    ///
    /// Returns the number of producers that panicked.
    pub fn join(self) -> usize {
        let mut panicked = 0;
        for (id, handle) in self.handles {
            if handle.join().is_err() {
                warn!(participant = id.tag(), "input producer panicked");
                panicked += 1;
            }
        }
        panicked
    }
}
