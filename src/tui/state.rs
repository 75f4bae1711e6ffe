//! TUI state algebra: session record, events, commands.
//!
//! These types define the whole state space of a run. The transition
//! function (`update`) and the rendering layer (`view`) both program
//! against them. Nothing here performs I/O.
//!
//! Design principle: the session stores flags, and the current screen
//! is derived from them via [`Session::stage`]. That keeps the flags the
//! single source of truth while still giving callers a sum type to
//! match on.

use std::time::Duration;

use crossterm::event::KeyEvent;

use crate::config::Config;

use super::input::PasswordInput;

// ============================================================================
// TIMING
// ============================================================================

/// Interval between countdown ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Interval between animation frames (60 per second).
pub const FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Interval between cursor blinks.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(530);

/// Frames needed for the animation to run from 0 to 1.
pub const ANIMATION_FRAMES: u32 = 100;

// ============================================================================
// EVENTS
// ============================================================================

/// Everything the event loop can deliver to `update`.
///
/// Two producers feed a single mpsc channel:
/// - A key reader thread sends `Key`
/// - The timer thread sends `Tick`, `Frame` and `Blink` once each
///   scheduled delay elapses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A terminal key event.
    Key(KeyEvent),
    /// One second elapsed.
    Tick,
    /// One animation frame elapsed.
    Frame,
    /// Cursor blink interval elapsed.
    Blink,
}

/// Semantic reading of a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Esc or Ctrl+C: leave immediately.
    Quit,
    /// Enter: submit the password form.
    Submit,
    /// Anything else: editing input for the password field.
    Input(KeyEvent),
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Follow-up work requested by a transition.
///
/// Follows the Elm/TEA pattern: `update` describes WHAT should happen,
/// the effects layer decides HOW (timer thread, loop exit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Deliver one `Msg::Tick` after [`TICK_INTERVAL`].
    ScheduleTick,
    /// Deliver one `Msg::Frame` after [`FRAME_INTERVAL`].
    ScheduleFrame,
    /// Deliver one `Msg::Blink` after [`BLINK_INTERVAL`].
    ScheduleBlink,
    /// Stop accepting events and exit.
    Quit,
}

impl Command {
    /// The event and delay a scheduling command stands for.
    ///
    /// None for `Quit`.
    pub fn schedule(self) -> Option<(Duration, Msg)> {
        match self {
            Command::ScheduleTick => Some((TICK_INTERVAL, Msg::Tick)),
            Command::ScheduleFrame => Some((FRAME_INTERVAL, Msg::Frame)),
            Command::ScheduleBlink => Some((BLINK_INTERVAL, Msg::Blink)),
            Command::Quit => None,
        }
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// Which screen the session is on, derived from its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Waiting for the password.
    Entry,
    /// Password submitted, animation running.
    Loading,
    /// Animation complete, counting down to exit.
    Success,
    /// Terminal. Reachable from every other stage.
    Quitting,
}

/// Top-level TUI model: all mutable state for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Masked password field.
    pub password: PasswordInput,
    /// Set once when the form is submitted.
    pub entered: bool,
    /// Seconds left in the current countdown.
    pub ticks: u32,
    /// Animation frames elapsed.
    pub frames: u32,
    /// Eased animation position in [0, 1].
    pub progress: f64,
    /// Set once when `progress` reaches 1.
    pub loaded: bool,
    /// Set once when the run is over.
    pub quitting: bool,

    secret: String,
    exit_countdown: u32,
}

impl Session {
    /// Fresh session at the entry screen.
    pub fn new(config: &Config) -> Self {
        Self {
            password: PasswordInput::new(),
            entered: false,
            ticks: config.entry_timeout_secs,
            frames: 0,
            progress: 0.0,
            loaded: false,
            quitting: false,
            secret: config.secret.clone(),
            exit_countdown: config.exit_countdown_secs,
        }
    }

    pub fn stage(&self) -> Stage {
        if self.quitting {
            Stage::Quitting
        } else if !self.entered {
            Stage::Entry
        } else if !self.loaded {
            Stage::Loading
        } else {
            Stage::Success
        }
    }

    /// Does the typed password match the configured secret?
    pub fn password_matches(&self) -> bool {
        self.password.value() == self.secret
    }

    /// Countdown length used once loading completes.
    pub fn exit_countdown(&self) -> u32 {
        self.exit_countdown
    }
}

// ============================================================================
// TESTS
// ============================================================================
