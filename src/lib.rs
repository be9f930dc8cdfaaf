//! Grid duel (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `grid_duel::{core,input,term,types}` and hosts the binaries.

pub use grid_duel_core as core;
pub use grid_duel_input as input;
pub use grid_duel_term as term;
pub use grid_duel_types as types;
