//! Terminal renderer for the duel.
//!
//! Snapshots are drawn into a plain framebuffer (2 columns per grid cell)
//! and flushed to the terminal as a diff against the previous frame. No
//! widget toolkit is involved.
//!
//! - [`fb`]: framebuffer and cell styles
//! - [`arena_view`]: pure snapshot to framebuffer mapping
//! - [`renderer`]: crossterm output, raw mode and keyboard enhancement
//! - [`sink`]: [`TerminalSink`], the `RenderSink` the binary hands to the session

pub mod arena_view;
pub mod fb;
pub mod renderer;
pub mod sink;

pub use grid_duel_core as core;
pub use grid_duel_types as types;

pub use arena_view::{ArenaView, Layout, Viewport, CELL_W};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use sink::TerminalSink;
