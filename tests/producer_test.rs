use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use grid_duel::core::{MoveChannel, ProducerTiming, RunFlag};
use grid_duel::input::{HeldKeys, KeyBindings, KeySource, ProducerSet};
use grid_duel::types::{Direction, DirectionSet, ParticipantId};

fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
}

fn timing() -> ProducerTiming {
    ProducerTiming {
        cooldown: Duration::from_millis(5),
        idle: Duration::from_millis(1),
    }
}

#[test]
fn held_keys_route_to_the_bound_participant() {
    let bindings = KeyBindings::default();
    let held = HeldKeys::new();
    let t0 = Instant::now();

    assert!(held.handle_key_event_at(&bindings, key(KeyCode::Char('d'), KeyEventKind::Press), t0));
    assert!(held.handle_key_event_at(&bindings, key(KeyCode::Up, KeyEventKind::Press), t0));
    assert!(!held.handle_key_event_at(&bindings, key(KeyCode::Char('x'), KeyEventKind::Press), t0));

    let p1: DirectionSet = [Direction::Right].into_iter().collect();
    let p2: DirectionSet = [Direction::Up].into_iter().collect();
    assert_eq!(held.pressed_at(ParticipantId::One, t0), p1);
    assert_eq!(held.pressed_at(ParticipantId::Two, t0), p2);
}

#[test]
fn held_keys_lapse_after_the_release_timeout() {
    let held = HeldKeys::new().with_release_timeout(Duration::from_millis(90));
    let t0 = Instant::now();
    held.press(ParticipantId::One, Direction::Left, t0);

    assert!(held
        .pressed_at(ParticipantId::One, t0 + Duration::from_millis(90))
        .contains(Direction::Left));
    assert!(held
        .pressed_at(ParticipantId::One, t0 + Duration::from_millis(91))
        .is_empty());
}

#[test]
fn release_event_clears_the_key() {
    let bindings = KeyBindings::default();
    let held = HeldKeys::new();
    let t0 = Instant::now();
    held.handle_key_event_at(&bindings, key(KeyCode::Down, KeyEventKind::Press), t0);
    held.handle_key_event_at(&bindings, key(KeyCode::Down, KeyEventKind::Release), t0);
    assert!(held.pressed_at(ParticipantId::Two, t0).is_empty());
}

#[test]
fn producers_turn_held_keys_into_intents_until_stopped() {
    let held = Arc::new(HeldKeys::new().with_release_timeout(Duration::from_secs(60)));
    held.press(ParticipantId::One, Direction::Down, Instant::now());
    held.press(ParticipantId::One, Direction::Right, Instant::now());

    let channel = MoveChannel::new();
    let flag = RunFlag::new();
    let producers = ProducerSet::spawn_all(held.clone(), &channel.sender(), &flag, timing()).unwrap();
    assert_eq!(producers.len(), 2);

    thread::sleep(Duration::from_millis(40));
    assert!(flag.stop());
    assert_eq!(producers.join(), 0);

    let intents = channel.drain_all();
    assert!(!intents.is_empty());
    // Only one direction per tick, chosen by priority; participant two holds nothing.
    assert!(intents
        .iter()
        .all(|i| i.participant == ParticipantId::One && i.direction == Direction::Down));

    // Nothing arrives after the join.
    thread::sleep(Duration::from_millis(10));
    assert!(channel.is_empty());
}

#[test]
fn producers_stop_promptly_when_idle() {
    let held: Arc<dyn KeySource> = Arc::new(HeldKeys::new());
    let channel = MoveChannel::new();
    let flag = RunFlag::new();
    let producers = ProducerSet::spawn_all(held, &channel.sender(), &flag, timing()).unwrap();

    let started = Instant::now();
    flag.stop();
    producers.join();
    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(channel.is_empty());
}
