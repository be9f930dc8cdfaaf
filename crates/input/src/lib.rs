//! Input module (producer-facing).
//!
//! Maps terminal key events onto participant directions, keeps the shared
//! "currently held" key table, and runs one producer thread per participant
//! that turns held keys into move intents.

pub mod keys;
pub mod map;
pub mod producer;

pub use grid_duel_core as core;
pub use grid_duel_types as types;

pub use keys::{HeldKeys, KeySource};
pub use map::{key_label, should_quit, KeyBindings};
pub use producer::{InputProducer, ProducerSet};
