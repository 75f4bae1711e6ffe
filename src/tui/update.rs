//! Session transitions: (Session, Msg) → Vec<Command>.
//!
//! This is the core logic of the program. Fully testable without a
//! terminal or a clock: time only advances when a test feeds `Tick` or
//! `Frame` messages. Each stage defines which messages it reacts to;
//! anything else is a no-op that schedules nothing.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::ease::in_out_circ;

use super::state::{ANIMATION_FRAMES, Command, KeyAction, Msg, Session, Stage};

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Classify a key event.
pub fn map_key(key: KeyEvent) -> KeyAction {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Enter => KeyAction::Submit,
        _ => KeyAction::Input(key),
    }
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Commands to run once at startup: the entry countdown and cursor blink.
pub fn init() -> Vec<Command> {
    vec![Command::ScheduleTick, Command::ScheduleBlink]
}

/// Apply one message to the session.
///
/// Returns the follow-up commands. Once the session is quitting every
/// message is ignored.
pub fn update(session: &mut Session, msg: &Msg) -> Vec<Command> {
    if session.quitting {
        return Vec::new();
    }

    if matches!(msg, Msg::Key(key) if map_key(*key) == KeyAction::Quit) {
        return quit(session, "quit key");
    }

    match session.stage() {
        Stage::Entry => update_entry(session, msg),
        Stage::Loading | Stage::Success => update_entered(session, msg),
        Stage::Quitting => Vec::new(),
    }
}

// ============================================================================
// PER-STAGE HANDLERS
// ============================================================================

/// Entry: edit the password, submit it, or time out.
fn update_entry(session: &mut Session, msg: &Msg) -> Vec<Command> {
    match msg {
        Msg::Key(key) => match map_key(*key) {
            KeyAction::Submit => {
                session.entered = true;
                info!("password submitted");
                vec![Command::ScheduleFrame]
            }
            KeyAction::Input(key) => {
                session.password.handle_key(key);
                Vec::new()
            }
            KeyAction::Quit => quit(session, "quit key"),
        },
        Msg::Tick => countdown(session, "entry timed out"),
        Msg::Blink => {
            session.password.blink();
            vec![Command::ScheduleBlink]
        }
        Msg::Frame => Vec::new(),
    }
}

/// Loading and Success: animate, then count down to exit.
///
/// A wrong password ends the run on the first message after submit,
/// whatever that message is.
fn update_entered(session: &mut Session, msg: &Msg) -> Vec<Command> {
    if !session.password_matches() {
        return quit(session, "password rejected");
    }

    match msg {
        Msg::Frame if !session.loaded => advance_frame(session),
        Msg::Tick if session.loaded => countdown(session, "exit countdown finished"),
        // Stray ticks from the entry chain, frames after load, keys, blinks
        _ => Vec::new(),
    }
}

/// One animation step.
fn advance_frame(session: &mut Session) -> Vec<Command> {
    session.frames += 1;
    let progress = in_out_circ(f64::from(session.frames) / f64::from(ANIMATION_FRAMES));

    if progress >= 1.0 {
        session.progress = 1.0;
        session.loaded = true;
        session.ticks = session.exit_countdown();
        info!(frames = session.frames, "loading complete");
        return vec![Command::ScheduleTick];
    }

    // Monotone by construction: frames only grow and the curve is non-decreasing
    session.progress = progress;
    vec![Command::ScheduleFrame]
}

/// One countdown step: quit when the counter reaches zero.
///
/// Decrements before checking, so a countdown of N quits on the N-th
/// tick. The original program checked first and needed N + 1 ticks; the
/// change is deliberate so that "quits in N seconds" holds.
fn countdown(session: &mut Session, reason: &'static str) -> Vec<Command> {
    session.ticks = session.ticks.saturating_sub(1);
    debug!(ticks = session.ticks, "tick");

    if session.ticks == 0 {
        return quit(session, reason);
    }
    vec![Command::ScheduleTick]
}

fn quit(session: &mut Session, reason: &'static str) -> Vec<Command> {
    session.quitting = true;
    info!(reason, "quitting");
    vec![Command::Quit]
}

// ============================================================================
// TESTS
// ============================================================================
