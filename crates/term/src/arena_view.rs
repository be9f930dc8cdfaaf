//! ArenaView: maps a `WorldSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::snapshot::WorldSnapshot;
use crate::core::termination::headline;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{GridCoord, ParticipantId, TerminationState};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Terminal columns per grid cell; 2 roughly squares up typical glyphs.
pub const CELL_W: u16 = 2;

const FLOOR_BG: Rgb = Rgb::new(28, 32, 36);

fn wall() -> CellStyle {
    CellStyle::new(Rgb::new(120, 120, 130), Rgb::new(70, 70, 80))
}

fn floor() -> CellStyle {
    CellStyle::new(Rgb::new(60, 64, 70), FLOOR_BG)
}

fn obstacle() -> CellStyle {
    CellStyle::new(Rgb::new(205, 150, 80), Rgb::new(110, 70, 30))
}

fn item() -> CellStyle {
    CellStyle::new(Rgb::new(255, 215, 0), FLOOR_BG).bold()
}

fn player(id: ParticipantId) -> CellStyle {
    let bg = match id {
        ParticipantId::One => Rgb::new(40, 110, 220),
        ParticipantId::Two => Rgb::new(210, 50, 60),
    };
    CellStyle::new(Rgb::new(255, 255, 255), bg).bold()
}

fn shared() -> CellStyle {
    CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(140, 60, 170)).bold()
}

fn hud() -> CellStyle {
    CellStyle::default().bold()
}

fn banner() -> CellStyle {
    CellStyle::new(Rgb::new(255, 230, 80), Rgb::new(0, 0, 0)).bold()
}

/// Renders the arena, a HUD line above it and an optional footer below it.
#[derive(Debug, Clone, Default)]
pub struct ArenaView {
    footer: Option<String>,
}

/// Screen placement of the grid for a given snapshot and viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Top-left terminal cell of grid cell (0, 0).
    pub origin_x: u16,
    pub origin_y: u16,
    pub grid_w: u16,
    pub grid_h: u16,
}

impl Layout {
    /// Terminal position of the left column of a grid cell.
    pub fn cell_pos(&self, pos: GridCoord) -> (u16, u16) {
        (
            self.origin_x + pos.col as u16 * CELL_W,
            self.origin_y + pos.row as u16,
        )
    }
}

impl ArenaView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn layout(&self, snap: &WorldSnapshot, viewport: Viewport) -> Layout {
        let n = snap.grid_size;
        let grid_w = n * CELL_W;
        let grid_h = n;
        // HUD line + grid + footer line.
        let total_h = grid_h + 2;
        Layout {
            origin_x: viewport.width.saturating_sub(grid_w) / 2,
            origin_y: viewport.height.saturating_sub(total_h) / 2 + 1,
            grid_w,
            grid_h,
        }
    }

    pub fn render(&self, snap: &WorldSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &WorldSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let layout = self.layout(snap, viewport);
        self.draw_grid(fb, snap, &layout);

        for &pos in &snap.obstacles {
            draw_cell(fb, &layout, pos, "▒▒", obstacle());
        }
        for &pos in &snap.items {
            draw_cell(fb, &layout, pos, "◆ ", item());
        }

        match snap.termination {
            TerminationState::Running => {
                self.draw_participants(fb, snap, &layout);
                self.draw_hud(fb, snap, &layout);
            }
            TerminationState::Decided { outcome, scores } => {
                let lines = [
                    headline(outcome).to_string(),
                    format!("P1: {} | P2: {}", scores[0], scores[1]),
                ];
                let mid = layout.origin_y + layout.grid_h / 2;
                for (i, line) in lines.iter().enumerate() {
                    let y = (mid + i as u16).saturating_sub(1);
                    fb.fill_rect(layout.origin_x, y, layout.grid_w, 1, banner().cell(' '));
                    fb.put_str_centered(layout.origin_x, layout.grid_w, y, line, banner());
                }
            }
        }

        if let Some(footer) = &self.footer {
            let y = layout.origin_y + layout.grid_h;
            fb.put_str_centered(0, fb.width(), y, footer, CellStyle::default());
        }
    }

    fn draw_grid(&self, fb: &mut FrameBuffer, snap: &WorldSnapshot, layout: &Layout) {
        let n = snap.grid_size;
        for row in 0..n as i16 {
            for col in 0..n as i16 {
                let pos = GridCoord::new(row, col);
                if pos.is_boundary(n) {
                    draw_cell(fb, layout, pos, "██", wall());
                } else {
                    draw_cell(fb, layout, pos, " ·", floor());
                }
            }
        }
    }

    fn draw_participants(&self, fb: &mut FrameBuffer, snap: &WorldSnapshot, layout: &Layout) {
        let [one, two] = &snap.participants;
        if one.pos == two.pos {
            draw_cell(fb, layout, one.pos, "12", shared());
            return;
        }
        for p in &snap.participants {
            let label = match p.id {
                ParticipantId::One => "P1",
                ParticipantId::Two => "P2",
            };
            draw_cell(fb, layout, p.pos, label, player(p.id));
        }
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, snap: &WorldSnapshot, layout: &Layout) {
        let y = layout.origin_y.saturating_sub(1);
        let time = format!("Time: {}", snap.remaining_secs());
        let scores = format!(
            "P1: {} | P2: {}",
            snap.participant(ParticipantId::One).score,
            snap.participant(ParticipantId::Two).score
        );
        fb.put_str(layout.origin_x, y, &time, hud());
        let right = (layout.origin_x + layout.grid_w).saturating_sub(scores.chars().count() as u16);
        fb.put_str(right.max(layout.origin_x + time.len() as u16 + 1), y, &scores, hud());
    }
}

fn draw_cell(fb: &mut FrameBuffer, layout: &Layout, pos: GridCoord, glyph: &str, style: CellStyle) {
    let (x, y) = layout.cell_pos(pos);
    fb.put_str(x, y, glyph, style);
}
