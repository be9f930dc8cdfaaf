//! Key binding probe.
//!
//! Prints the participant and direction each key press maps to, and whether
//! the terminal reports key releases. Useful for checking a terminal before a
//! session. Quit with Q, Esc or Ctrl-C.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags},
    execute, terminal,
};

use grid_duel::input::{key_label, should_quit, KeyBindings};
use grid_duel::types::ParticipantId;

fn main() -> Result<()> {
    terminal::enable_raw_mode().context("enable raw mode")?;
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    let mut stdout = io::stdout();
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let result = run(&mut stdout, enhanced);

    if enhanced {
        let _ = execute!(stdout, PopKeyboardEnhancementFlags);
    }
    let _ = terminal::disable_raw_mode();
    result
}

fn run(out: &mut impl Write, enhanced: bool) -> Result<()> {
    let bindings = KeyBindings::default();

    // Raw mode: lines need an explicit carriage return.
    write!(out, "key releases reported: {enhanced}\r\n")?;
    for id in ParticipantId::ALL {
        let keys: Vec<String> = bindings
            .keys_for(id)
            .iter()
            .map(|(dir, code)| format!("{}={}", dir.as_str(), key_label(*code)))
            .collect();
        write!(out, "{}: {}\r\n", id.label(), keys.join(" "))?;
    }
    write!(out, "press keys (q to quit)\r\n")?;
    out.flush()?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if should_quit(key) {
            return Ok(());
        }
        let kind = match key.kind {
            KeyEventKind::Press => "press",
            KeyEventKind::Repeat => "repeat",
            KeyEventKind::Release => "release",
        };
        match bindings.lookup(key.code) {
            Some((id, dir)) => write!(
                out,
                "{kind:<7} {:<6} -> {} {}\r\n",
                key_label(key.code),
                id.label(),
                dir.as_str()
            )?,
            None => write!(out, "{kind:<7} {:<6} -> unbound\r\n", key_label(key.code))?,
        }
        out.flush()?;
    }
}
