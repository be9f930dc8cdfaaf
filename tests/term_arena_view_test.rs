use std::time::Duration;

use grid_duel::core::{ManualClock, Session, SessionConfig, World, WorldSnapshot};
use grid_duel::term::{ArenaView, FrameBuffer, Viewport};
use grid_duel::types::{GridCoord, Outcome, ParticipantId, TerminationState};

fn snapshot() -> WorldSnapshot {
    let mut world = World::with_layout(
        12,
        [GridCoord::new(1, 1), GridCoord::new(10, 10)],
        &[GridCoord::new(4, 4)],
    )
    .unwrap();
    world.place_item(GridCoord::new(6, 7), Duration::ZERO);
    Session::with_world(SessionConfig::classic(), world, ManualClock::new())
        .unwrap()
        .snapshot()
}

fn all_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

// 12 cells * 2 columns, HUD + 12 rows + footer.
const FIT: Viewport = Viewport {
    width: 24,
    height: 14,
};

#[test]
fn arena_draws_walls_obstacles_items_and_participants() {
    let fb = ArenaView::new().render(&snapshot(), FIT);

    // Grid origin is one row below the HUD.
    assert_eq!(fb.get(0, 1).unwrap().ch, '█');
    assert_eq!(fb.get(23, 12).unwrap().ch, '█');

    // P1 at (1,1), two columns per cell.
    assert_eq!(fb.get(2, 2).unwrap().ch, 'P');
    assert_eq!(fb.get(3, 2).unwrap().ch, '1');
    assert_eq!(fb.get(20, 11).unwrap().ch, 'P');
    assert_eq!(fb.get(21, 11).unwrap().ch, '2');

    assert_eq!(fb.get(8, 5).unwrap().ch, '▒');
    assert_eq!(fb.get(9, 5).unwrap().ch, '▒');
    assert_eq!(fb.get(14, 7).unwrap().ch, '◆');
}

#[test]
fn hud_shows_time_and_scores() {
    let fb = ArenaView::new().render(&snapshot(), FIT);
    let hud = fb.row_text(0);
    assert!(hud.starts_with("Time: 60"), "{hud:?}");
    assert!(hud.contains("P1: 0 | P2: 0"), "{hud:?}");
}

#[test]
fn shared_cell_is_drawn_once() {
    let mut snap = snapshot();
    snap.participants[1].pos = snap.participants[0].pos;
    let fb = ArenaView::new().render(&snap, FIT);

    assert_eq!(fb.get(2, 2).unwrap().ch, '1');
    assert_eq!(fb.get(3, 2).unwrap().ch, '2');
    // The old P2 cell is plain floor again.
    assert_eq!(fb.get(20, 11).unwrap().ch, ' ');
}

#[test]
fn decided_session_shows_banner_and_hides_participants() {
    let mut snap = snapshot();
    snap.termination = TerminationState::Decided {
        outcome: Outcome::Winner(ParticipantId::Two),
        scores: [1, 3],
    };
    snap.remaining = Duration::ZERO;
    let fb = ArenaView::new().render(&snap, Viewport::new(40, 20));
    let text = all_text(&fb);

    assert!(text.contains("Player 2 Wins!"));
    assert!(text.contains("P1: 1 | P2: 3"));
    assert!(!text.contains("Time:"));

    // Origin is (8, 4); P1's start cell (1,1) shows floor.
    assert_eq!(fb.get(10, 5).unwrap().ch, ' ');
    assert_eq!(fb.get(11, 5).unwrap().ch, '·');
}

#[test]
fn tie_banner() {
    let mut snap = snapshot();
    snap.termination = TerminationState::Decided {
        outcome: Outcome::Tie,
        scores: [2, 2],
    };
    let fb = ArenaView::new().render(&snap, Viewport::new(40, 20));
    assert!(all_text(&fb).contains("It's a Tie!"));
}

#[test]
fn footer_sits_below_the_grid() {
    let fb = ArenaView::new()
        .with_footer("q quit")
        .render(&snapshot(), FIT);
    assert!(fb.row_text(13).contains("q quit"));
}

#[test]
fn arena_is_centered_on_large_viewports() {
    let view = ArenaView::new();
    let snap = snapshot();
    let layout = view.layout(&snap, Viewport::new(44, 24));
    // (44 - 24) / 2 = 10; (24 - 14) / 2 + 1 = 6.
    assert_eq!((layout.origin_x, layout.origin_y), (10, 6));

    let fb = view.render(&snap, Viewport::new(44, 24));
    assert_eq!(fb.get(10, 6).unwrap().ch, '█');
    assert_eq!(fb.get(9, 6).unwrap().ch, ' ');
}

#[test]
fn render_into_reuses_and_resizes_the_buffer() {
    let view = ArenaView::new();
    let snap = snapshot();
    let mut fb = FrameBuffer::new(1, 1);
    view.render_into(&snap, FIT, &mut fb);
    assert_eq!((fb.width(), fb.height()), (24, 14));
    assert_eq!(fb.get(2, 2).unwrap().ch, 'P');
}
