//! Move channel - the only path from input threads into the simulation.
//!
//! Many producers hold a cloned [`MoveSender`]; the session owns the single
//! [`MoveChannel`] and drains it once per frame.

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

use crate::types::MoveIntent;

/// Producer handle. Cheap to clone, never blocks.
#[derive(Debug, Clone)]
pub struct MoveSender {
    tx: Sender<MoveIntent>,
}

impl MoveSender {
    /// Queue an intent.
    ///
    /// The consumer lives as long as the session, which outlives every producer,
    /// so a closed channel can only mean teardown; the intent is dropped then.
    pub fn enqueue(&self, intent: MoveIntent) {
        let _ = self.tx.send(intent);
    }
}

/// Consumer side of the move queue.
#[derive(Debug)]
pub struct MoveChannel {
    tx: Sender<MoveIntent>,
    rx: Receiver<MoveIntent>,
}

impl MoveChannel {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> MoveSender {
        MoveSender {
            tx: self.tx.clone(),
        }
    }

    /// Move every intent queued at call time into `out`, in FIFO order.
    ///
    /// Intents enqueued while draining stay queued for the next drain. Returns
    /// the number of intents appended.
    pub fn drain_into(&self, out: &mut Vec<MoveIntent>) -> usize {
        let pending = self.rx.len();
        out.reserve(pending);
        let mut taken = 0;
        while taken < pending {
            match self.rx.try_recv() {
                Ok(intent) => {
                    out.push(intent);
                    taken += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        taken
    }

    pub fn drain_all(&self) -> Vec<MoveIntent> {
        let mut out = Vec::new();
        self.drain_into(&mut out);
        out
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl Default for MoveChannel {
    fn default() -> Self {
        Self::new()
    }
}
