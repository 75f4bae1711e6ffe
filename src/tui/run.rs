//! TUI effects boundary: event loop, terminal lifecycle, command execution.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//! Kept minimal; all intelligence lives in the pure layers.
//!
//! Architecture: two producer threads feed a single mpsc channel.
//! - Key reader thread: forwards crossterm key presses
//! - Timer thread: delivers scheduled ticks, frames and blinks
//! The event loop consumes from the channel one message at a time.

use std::io;
use std::sync::mpsc;
use std::thread;

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, warn};

use crate::config::Config;

use super::state::{Command, Msg, Session};
use super::timer::Timer;
use super::update::{init, update};
use super::view::render;

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    if let Err(e) = io::stdout().execute(EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }
    let backend = CrosstermBackend::new(io::stdout());
    Terminal::new(backend)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards key presses.
fn spawn_key_reader(tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        loop {
            match event::read() {
                // Release/repeat events would double every keystroke on some platforms
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(Msg::Key(key)).is_err() {
                        break; // receiver dropped, TUI is shutting down
                    }
                }
                Ok(_) => {} // ignore mouse, resize, etc.
                Err(e) => {
                    warn!(error = %e, "key reader stopped");
                    break;
                }
            }
        }
    });
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Execute commands from a transition.
///
/// Returns true when the loop should stop.
fn execute(commands: Vec<Command>, timer: &Timer) -> bool {
    let mut stop = false;
    for command in commands {
        match command.schedule() {
            Some((delay, msg)) => timer.schedule(delay, msg),
            None => stop = true,
        }
    }
    stop
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run one password session in the terminal.
///
/// Sets up the terminal, starts the key reader and timer threads, and
/// processes events until the session quits. The terminal is restored
/// before returning, on both the success and the error path.
pub fn run(config: &Config) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = event_loop(&mut terminal, config);
    let restored = restore_terminal();
    result.and(restored)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &Config,
) -> io::Result<()> {
    let mut session = Session::new(config);

    let (tx, rx) = mpsc::channel::<Msg>();
    let timer = Timer::spawn(tx.clone());
    spawn_key_reader(tx);

    let mut stop = execute(init(), &timer);

    loop {
        // Render after every transition, including the final one
        terminal.draw(|frame| render(&session, frame))?;

        if stop || session.quitting {
            break;
        }

        // Block on next event from any producer
        let msg = match rx.recv() {
            Ok(msg) => msg,
            Err(_) => break, // all senders dropped
        };

        let commands = update(&mut session, &msg);
        debug!(?msg, ?commands, stage = ?session.stage(), "update");
        stop = execute(commands, &timer);
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn quit_command_stops_the_loop() {
        let (tx, _rx) = mpsc::channel::<Msg>();
        let timer = Timer::spawn(tx);
        assert!(execute(vec![Command::Quit], &timer));
    }

    #[test]
    fn no_commands_keep_running() {
        let (tx, _rx) = mpsc::channel::<Msg>();
        let timer = Timer::spawn(tx);
        assert!(!execute(Vec::new(), &timer));
    }

    #[test]
    fn schedule_commands_reach_the_timer() {
        let (tx, rx) = mpsc::channel::<Msg>();
        let timer = Timer::spawn(tx);

        assert!(!execute(vec![Command::ScheduleFrame], &timer));
        let msg = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(msg, Msg::Frame);
    }
}
