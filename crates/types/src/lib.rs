//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! from the simulation core, the input producers and the terminal renderer.
//!
//! # Grid
//!
//! The arena is an `N x N` grid indexed by `(row, col)` from the top-left corner.
//! The outermost ring (row or col equal to `0` or `N - 1`) is impassable
//! boundary; participants, obstacles and items only ever live in the interior
//! `[1, N - 2] x [1, N - 2]`.
//!
//! # Timing Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Controlling loop cadence (~60 FPS) |
//! | `DEFAULT_SESSION_SECS` | 60 | Countdown length |
//! | `DEFAULT_MOVE_COOLDOWN_MS` | 100 | Producer sleep after emitting an intent |
//! | `DEFAULT_IDLE_POLL_MS` | 10 | Producer sleep when nothing is pressed |
//!
//! # Examples
//!
//! ```
//! use grid_duel_types::{Direction, DirectionSet, GridCoord};
//!
//! let mut pressed = DirectionSet::empty();
//! pressed.insert(Direction::Right);
//! pressed.insert(Direction::Down);
//!
//! // Down outranks Right.
//! assert_eq!(pressed.highest_priority(), Some(Direction::Down));
//!
//! let next = GridCoord::new(5, 5).step(Direction::Down);
//! assert_eq!(next, GridCoord::new(6, 5));
//! ```

/// Smallest grid that still has two distinct interior start cells.
pub const MIN_GRID_SIZE: u16 = 4;

/// Largest accepted grid; keeps every coordinate well inside `i16`.
pub const MAX_GRID_SIZE: u16 = 255;

/// Upper bound for obstacles in a single session (storage is fixed-capacity).
pub const MAX_OBSTACLES: usize = 32;

/// Number of placement samples the item spawner draws before giving up for a tick.
pub const SPAWN_RETRY_BUDGET: u32 = 10;

/// Controlling loop cadence in milliseconds (16ms ≈ 60 FPS).
pub const FRAME_MS: u64 = 16;

/// Default countdown length in seconds.
pub const DEFAULT_SESSION_SECS: u64 = 60;

/// Producer sleep after emitting an intent.
pub const DEFAULT_MOVE_COOLDOWN_MS: u64 = 100;

/// Producer sleep when no direction key is held.
pub const DEFAULT_IDLE_POLL_MS: u64 = 10;

/// Default roll number the arena size is derived from.
pub const DEFAULT_ROLL: u32 = 0o615;

/// Number of participants in every session.
pub const PARTICIPANT_COUNT: usize = 2;


/// A cell on the arena grid.
///
/// Signed so that applying a direction to an edge cell yields an
/// out-of-range coordinate instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    pub row: i16,
    pub col: i16,
}

impl GridCoord {
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell one step in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dr, dc) = dir.delta();
        Self {
            row: self.row + dr as i16,
            col: self.col + dc as i16,
        }
    }

    /// True when the cell lies in `[1, n - 2]` on both axes.
    pub fn is_interior(self, n: u16) -> bool {
        let max = n as i16 - 2;
        (1..=max).contains(&self.row) && (1..=max).contains(&self.col)
    }

    /// True when the cell is on the outer ring of an `n x n` grid.
    pub fn is_boundary(self, n: u16) -> bool {
        let last = n as i16 - 1;
        let in_grid = (0..=last).contains(&self.row) && (0..=last).contains(&self.col);
        in_grid && !self.is_interior(n)
    }
}

/// Unit move directions.
///
/// Rows grow downwards, so `Up` is a negative row delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Resolution order when several keys are held at once.
    pub const PRIORITY: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(d_row, d_col)` offset with exactly one non-zero axis.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Direction::Up => 1 << 0,
            Direction::Down => 1 << 1,
            Direction::Left => 1 << 2,
            Direction::Right => 1 << 3,
        }
    }
}

/// The set of direction keys currently held by one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    pub fn remove(&mut self, dir: Direction) {
        self.0 &= !dir.bit();
    }

    pub fn contains(&self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// The single direction that wins when several are held (Up > Down > Left > Right).
    pub fn highest_priority(&self) -> Option<Direction> {
        Direction::PRIORITY
            .into_iter()
            .find(|&dir| self.contains(dir))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = DirectionSet::empty();
        for dir in iter {
            set.insert(dir);
        }
        set
    }
}

/// One of the two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParticipantId {
    One,
    Two,
}

impl ParticipantId {
    pub const ALL: [ParticipantId; PARTICIPANT_COUNT] = [ParticipantId::One, ParticipantId::Two];

    /// Stable index into per-participant arrays.
    pub fn index(self) -> usize {
        match self {
            ParticipantId::One => 0,
            ParticipantId::Two => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            ParticipantId::One => ParticipantId::Two,
            ParticipantId::Two => ParticipantId::One,
        }
    }

    /// Short tag used in thread names and the HUD ("p1", "p2").
    pub fn tag(self) -> &'static str {
        match self {
            ParticipantId::One => "p1",
            ParticipantId::Two => "p2",
        }
    }

    /// Display label ("Player 1", "Player 2").
    pub fn label(self) -> &'static str {
        match self {
            ParticipantId::One => "Player 1",
            ParticipantId::Two => "Player 2",
        }
    }
}

/// A requested, not yet validated, unit move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveIntent {
    pub participant: ParticipantId,
    pub direction: Direction,
}

impl MoveIntent {
    pub fn new(participant: ParticipantId, direction: Direction) -> Self {
        Self {
            participant,
            direction,
        }
    }
}

/// Final result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Winner(ParticipantId),
    Tie,
}

/// Session lifecycle as seen by the renderer.
///
/// Moves from `Running` to `Decided` exactly once, when the countdown first
/// reaches zero, and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TerminationState {
    #[default]
    Running,
    Decided {
        outcome: Outcome,
        /// Final scores indexed by [`ParticipantId::index`].
        scores: [u32; PARTICIPANT_COUNT],
    },
}

impl TerminationState {
    pub fn is_running(&self) -> bool {
        matches!(self, TerminationState::Running)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            TerminationState::Running => None,
            TerminationState::Decided { outcome, .. } => Some(*outcome),
        }
    }
}
