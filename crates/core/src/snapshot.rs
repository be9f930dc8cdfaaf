//! Immutable per-frame view handed to the renderer.

use std::time::Duration;

use arrayvec::ArrayVec;

use crate::types::{GridCoord, ParticipantId, TerminationState, MAX_OBSTACLES, PARTICIPANT_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticipantSnapshot {
    pub id: ParticipantId,
    pub pos: GridCoord,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorldSnapshot {
    pub grid_size: u16,
    pub participants: [ParticipantSnapshot; PARTICIPANT_COUNT],
    /// Coordinates of uncollected items.
    pub items: Vec<GridCoord>,
    pub obstacles: ArrayVec<GridCoord, MAX_OBSTACLES>,
    pub elapsed: Duration,
    pub remaining: Duration,
    pub termination: TerminationState,
}

impl WorldSnapshot {
    pub fn clear(&mut self) {
        self.grid_size = 0;
        for (p, id) in self.participants.iter_mut().zip(ParticipantId::ALL) {
            *p = ParticipantSnapshot {
                id,
                pos: GridCoord::new(0, 0),
                score: 0,
            };
        }
        self.items.clear();
        self.obstacles.clear();
        self.elapsed = Duration::ZERO;
        self.remaining = Duration::ZERO;
        self.termination = TerminationState::Running;
    }

    pub fn participant(&self, id: ParticipantId) -> &ParticipantSnapshot {
        &self.participants[id.index()]
    }

    pub fn is_running(&self) -> bool {
        self.termination.is_running()
    }

    /// Remaining time truncated to whole seconds, as shown on the HUD.
    pub fn remaining_secs(&self) -> u64 {
        self.remaining.as_secs()
    }
}

impl Default for WorldSnapshot {
    fn default() -> Self {
        let blank = |id| ParticipantSnapshot {
            id,
            pos: GridCoord::new(0, 0),
            score: 0,
        };
        Self {
            grid_size: 0,
            participants: [blank(ParticipantId::One), blank(ParticipantId::Two)],
            items: Vec::new(),
            obstacles: ArrayVec::new(),
            elapsed: Duration::ZERO,
            remaining: Duration::ZERO,
            termination: TerminationState::Running,
        }
    }
}

/// Something that displays one snapshot per frame.
pub trait RenderSink {
    type Error;

    fn present(&mut self, snapshot: &WorldSnapshot) -> Result<(), Self::Error>;
}
