//! TerminalSink: the `RenderSink` used by the interactive binary.

use anyhow::Result;

use crate::arena_view::{ArenaView, Viewport};
use crate::core::snapshot::{RenderSink, WorldSnapshot};
use crate::fb::FrameBuffer;
use crate::renderer::TerminalRenderer;

/// Fallback when the terminal size cannot be queried.
const FALLBACK_SIZE: (u16, u16) = (80, 24);

pub struct TerminalSink {
    renderer: TerminalRenderer,
    view: ArenaView,
    fb: FrameBuffer,
}

impl TerminalSink {
    pub fn new(view: ArenaView) -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view,
            fb: FrameBuffer::new(0, 0),
        }
    }

    /// Switch the terminal into raw/alternate-screen mode.
    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()
    }

    /// Restore the terminal. Safe to call after a failed `enter`.
    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }

    pub fn reports_key_releases(&self) -> bool {
        self.renderer.reports_key_releases()
    }

    /// Force a full redraw on the next frame (e.g. after a resize event).
    pub fn invalidate(&mut self) {
        self.renderer.invalidate();
    }
}

impl RenderSink for TerminalSink {
    type Error = anyhow::Error;

    fn present(&mut self, snapshot: &WorldSnapshot) -> Result<()> {
        let (w, h) = crossterm::terminal::size().unwrap_or(FALLBACK_SIZE);
        self.view
            .render_into(snapshot, Viewport::new(w, h), &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }
}
