//! Terminal grid duel runner (default binary).
//!
//! Input producers run on their own threads and feed the move channel; this
//! thread reads terminal events, steps the session once per frame and draws.
//!
//! Environment:
//! - `GRID_DUEL_LOG=<path>`: write tracing output to a file (`RUST_LOG` filters it)
//! - `GRID_DUEL_VARIANT`, `GRID_DUEL_CONFIG` and the other `GRID_DUEL_*`
//!   overrides are read by `SessionConfig::load`

use std::fs::File;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use grid_duel::core::{MonotonicClock, Session, SessionConfig, WorldSnapshot};
use grid_duel::input::{should_quit, HeldKeys, KeyBindings, ProducerSet};
use grid_duel::term::{ArenaView, TerminalSink};
use grid_duel::types::FRAME_MS;

/// Held-key timeout when the terminal reports releases; only a safety net for lost events.
const RELEASE_REPORTED_TIMEOUT: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    init_logging()?;

    let config = SessionConfig::load().context("load session config")?;
    info!(
        grid_size = config.grid_size,
        duration_secs = config.duration.as_secs(),
        item_cap = config.item_cap,
        obstacles = config.obstacle_count,
        seed = config.seed,
        "session configured"
    );

    let session = Session::new(config, MonotonicClock::start()).context("create session")?;

    let view = ArenaView::new().with_footer("P1: W/A/S/D   P2: arrows   Q: quit");
    let mut sink = TerminalSink::new(view);
    if let Err(err) = sink.enter() {
        let _ = sink.exit();
        return Err(err);
    }

    let result = run(session, &mut sink);

    // Always try to restore terminal state.
    let _ = sink.exit();
    result
}

fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("GRID_DUEL_LOG") else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("create log file {}", path.to_string_lossy()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .try_init();
    Ok(())
}

fn run(mut session: Session<MonotonicClock>, sink: &mut TerminalSink) -> Result<()> {
    let bindings = KeyBindings::default();
    let mut held = HeldKeys::new();
    if sink.reports_key_releases() {
        held = held.with_release_timeout(RELEASE_REPORTED_TIMEOUT);
    }
    let held = Arc::new(held);

    let producers = ProducerSet::spawn_all(
        held.clone(),
        &session.move_sender(),
        &session.run_flag(),
        session.config().producer,
    )
    .context("spawn input producers")?;

    let result = frame_loop(&mut session, sink, &held, &bindings);

    session.stop();
    held.release_all();
    let panicked = producers.join();
    if panicked > 0 {
        warn!(panicked, "input producers panicked");
    }
    info!(
        elapsed_secs = session.elapsed().as_secs_f32(),
        "session closed"
    );
    result
}

fn frame_loop(
    session: &mut Session<MonotonicClock>,
    sink: &mut TerminalSink,
    held: &HeldKeys,
    bindings: &KeyBindings,
) -> Result<()> {
    let frame = Duration::from_millis(FRAME_MS);
    let mut snapshot = WorldSnapshot::default();
    let mut next_frame = Instant::now();

    loop {
        // Input with timeout until the next frame.
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    held.handle_key_event(bindings, key);
                }
                Event::Resize(_, _) => sink.invalidate(),
                Event::FocusLost => held.release_all(),
                _ => {}
            }
            continue;
        }

        let report = session.frame(sink, &mut snapshot)?;
        if report.decided {
            held.release_all();
        }
        next_frame += frame;
        // Do not try to catch up after a stall.
        let now = Instant::now();
        if next_frame < now {
            next_frame = now;
        }
    }
}
