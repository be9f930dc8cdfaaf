//! Pressed-key state shared with the input producers.
//!
//! Terminals report presses (and, with keyboard enhancement, releases) as
//! discrete events. [`HeldKeys`] turns that stream into a "currently held"
//! set: the controlling thread records events, producers query the set.
//! Terminals without release events are handled by a short timeout that is
//! refreshed by auto-repeat.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::KeyBindings;
use crate::types::{Direction, DirectionSet, ParticipantId, PARTICIPANT_COUNT};

/// Instantaneous pressed-direction query for one participant.
pub trait KeySource: Send + Sync {
    fn pressed(&self, participant: ParticipantId) -> DirectionSet;
}

// Shorter than the producer cooldown so a single tap yields a single move,
// longer than typical auto-repeat spacing so a held key stays held.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 90;

type PressTable = [[Option<Instant>; 4]; PARTICIPANT_COUNT];

#[derive(Debug)]
pub struct HeldKeys {
    last_press: Mutex<PressTable>,
    release_timeout: Duration,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self {
            last_press: Mutex::new([[None; 4]; PARTICIPANT_COUNT]),
            release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    pub fn with_release_timeout(mut self, timeout: Duration) -> Self {
        self.release_timeout = timeout;
        self
    }

    pub fn release_timeout(&self) -> Duration {
        self.release_timeout
    }

    fn table(&self) -> std::sync::MutexGuard<'_, PressTable> {
        // A panicking writer cannot leave the table half-written; keep using it.
        self.last_press
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn press(&self, id: ParticipantId, dir: Direction, at: Instant) {
        self.table()[id.index()][slot(dir)] = Some(at);
    }

    pub fn release(&self, id: ParticipantId, dir: Direction) {
        self.table()[id.index()][slot(dir)] = None;
    }

    pub fn release_all(&self) {
        *self.table() = [[None; 4]; PARTICIPANT_COUNT];
    }

    /// Directions whose last press is within the release timeout of `now`.
    pub fn pressed_at(&self, id: ParticipantId, now: Instant) -> DirectionSet {
        let table = self.table();
        Direction::PRIORITY
            .into_iter()
            .filter(|&dir| {
                table[id.index()][slot(dir)]
                    .is_some_and(|at| now.saturating_duration_since(at) <= self.release_timeout)
            })
            .collect()
    }

    /// Record a terminal key event. Returns `true` if the key is bound to a participant.
    pub fn handle_key_event(&self, bindings: &KeyBindings, key: KeyEvent) -> bool {
        self.handle_key_event_at(bindings, key, Instant::now())
    }

    pub fn handle_key_event_at(&self, bindings: &KeyBindings, key: KeyEvent, at: Instant) -> bool {
        let Some((id, dir)) = bindings.lookup(key.code) else {
            return false;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(id, dir, at),
            KeyEventKind::Release => self.release(id, dir),
        }
        true
    }
}

impl Default for HeldKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySource for HeldKeys {
    fn pressed(&self, participant: ParticipantId) -> DirectionSet {
        self.pressed_at(participant, Instant::now())
    }
}

fn slot(dir: Direction) -> usize {
    match dir {
        Direction::Up => 0,
        Direction::Down => 1,
        Direction::Left => 2,
        Direction::Right => 3,
    }
}
