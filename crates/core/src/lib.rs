//! Core simulation module - world state, move channel and the per-frame step
//!
//! This crate contains every rule of the duel and the concurrency contract
//! between input threads and the simulation. It has no dependency on the
//! terminal, so it runs the same under a real frame loop, in tests and in
//! benches.
//!
//! # Ownership
//!
//! - [`Session`] owns the [`World`] and is the only thing that mutates it.
//!   It lives on the controlling thread.
//! - Input threads hold a [`MoveSender`] (enqueue only) and a [`RunFlag`]
//!   (read only). Nothing else crosses a thread boundary.
//!
//! # Module Structure
//!
//! - [`channel`]: unbounded multi-producer move queue, drained once per frame
//! - [`clock`]: session clocks (monotonic for play, manual for tests)
//! - [`config`]: session configuration, presets, validation and loading
//! - [`rng`]: seeded LCG for reproducible layouts
//! - [`run_flag`]: one-shot atomic "still running" broadcast
//! - [`session`]: the simulation step
//! - [`snapshot`]: immutable per-frame view plus the [`RenderSink`] seam
//! - [`spawner`]: item placement policy
//! - [`termination`]: scores to result
//! - [`world`]: participants, obstacles, items and move resolution
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use grid_duel_core::{ManualClock, Session, SessionConfig};
//! use grid_duel_types::{Direction, MoveIntent, ParticipantId};
//!
//! let clock = ManualClock::new();
//! let mut session = Session::new(SessionConfig::classic(), clock.clone()).unwrap();
//!
//! // An input thread would do this through its own sender clone.
//! session
//!     .move_sender()
//!     .enqueue(MoveIntent::new(ParticipantId::One, Direction::Right));
//!
//! clock.advance(Duration::from_millis(16));
//! let report = session.step();
//! assert_eq!(report.accepted + report.rejected, 1);
//! ```

pub mod channel;
pub mod clock;
pub mod config;
pub mod rng;
pub mod run_flag;
pub mod session;
pub mod snapshot;
pub mod spawner;
pub mod termination;
pub mod world;

pub use grid_duel_types as types;

// Re-export commonly used types for convenience
pub use channel::{MoveChannel, MoveSender};
pub use clock::{ManualClock, MonotonicClock, SessionClock};
pub use config::{ConfigError, ConfigFile, ProducerTiming, SessionConfig};
pub use rng::{grid_size_from_roll, SimpleRng};
pub use run_flag::RunFlag;
pub use session::{Session, StepReport};
pub use snapshot::{ParticipantSnapshot, RenderSink, WorldSnapshot};
pub use spawner::ItemSpawner;
pub use world::{Item, MoveOutcome, Obstacle, Participant, Rejection, World};
