//! Pure rendering: map Session state to ratatui widget trees.
//!
//! Each stage has a dedicated line builder. The main `render()`
//! dispatches on [`Session::stage`]. Builders are pure (state in, lines
//! out); the only effect is Frame::render_widget() which writes to the
//! terminal buffer.

use ratatui::Frame;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::state::{Session, Stage};
use super::theme;

/// Cells in the progress bar.
pub const PROGRESS_BAR_WIDTH: usize = 100;

/// Glyph for a filled bar cell.
pub const PROGRESS_FULL_CHAR: char = '█';

/// Glyph for an empty bar cell.
pub const PROGRESS_EMPTY_CHAR: char = '░';

/// Shown once the session is over, on screen and after the terminal is restored.
pub const FAREWELL: &str = "See you later!";

const PROMPT_TEXT: &str = "Enter the password to sign in:";
const VERIFYING_TEXT: &str = "Password verification...";
const DOT: &str = " • ";

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current stage to the terminal frame.
pub fn render(session: &Session, frame: &mut Frame) {
    let paragraph = Paragraph::new(lines(session)).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, frame.area());
}

/// Screen contents for the current stage.
pub fn lines(session: &Session) -> Vec<Line<'static>> {
    match session.stage() {
        Stage::Quitting => farewell_lines(),
        Stage::Entry => entry_lines(session),
        Stage::Loading | Stage::Success => entered_lines(session),
    }
}

// ============================================================================
// STAGES
// ============================================================================

fn farewell_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(FAREWELL, theme::STYLE_FAREWELL),
        ]),
    ]
}

fn entry_lines(session: &Session) -> Vec<Line<'static>> {
    vec![
        Line::from(PROMPT_TEXT),
        Line::from(""),
        session.password.render(),
        Line::from(""),
        Line::from(vec![
            Span::raw("Program quits in "),
            Span::styled(session.ticks.to_string(), theme::STYLE_TICKS),
            Span::raw(" seconds"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("enter: submit", theme::STYLE_SUBTLE),
            Span::styled(DOT, theme::STYLE_DOT),
            Span::styled("ctrl+c, esc: quit", theme::STYLE_SUBTLE),
        ]),
    ]
}

fn entered_lines(session: &Session) -> Vec<Line<'static>> {
    let label = if session.loaded {
        Line::from(vec![
            Span::raw("Successful. Exiting in "),
            Span::styled(session.ticks.to_string(), theme::STYLE_TICKS),
            Span::raw(" seconds..."),
        ])
    } else {
        Line::from(VERIFYING_TEXT)
    };

    vec![label, progress_line(session.progress)]
}

// ============================================================================
// PROGRESS BAR
// ============================================================================

/// Split a fraction into (filled cells, empty cells, whole percent).
///
/// Rounds half away from zero. Input is clamped to [0, 1].
fn progress_cells(percent: f64) -> (usize, usize, u32) {
    let percent = percent.clamp(0.0, 1.0);
    let filled = (PROGRESS_BAR_WIDTH as f64 * percent).round() as usize;
    let whole = (percent * 100.0).round() as u32;
    (filled, PROGRESS_BAR_WIDTH - filled, whole)
}

/// Plain-text progress bar: filled cells, empty cells, space, percent.
///
/// `progress_bar(0.0)` is 100 empty cells then `" 0"`;
/// `progress_bar(1.0)` is 100 full cells then `" 100"`.
pub fn progress_bar(percent: f64) -> String {
    let (filled, empty, whole) = progress_cells(percent);
    let mut bar = String::with_capacity((filled + empty) * 3 + 4);
    bar.extend(std::iter::repeat_n(PROGRESS_FULL_CHAR, filled));
    bar.extend(std::iter::repeat_n(PROGRESS_EMPTY_CHAR, empty));
    bar.push(' ');
    bar.push_str(&whole.to_string());
    bar
}

/// Styled progress bar followed by a percent sign.
///
/// Splits the text of [`progress_bar`] into its full, empty and percent runs.
fn progress_line(percent: f64) -> Line<'static> {
    let bar = progress_bar(percent);
    let empty_end = bar.find(' ').unwrap_or(bar.len());
    let full_end = bar[..empty_end].find(PROGRESS_EMPTY_CHAR).unwrap_or(empty_end);

    Line::from(vec![
        Span::styled(bar[..full_end].to_string(), theme::STYLE_PROGRESS_FULL),
        Span::styled(bar[full_end..empty_end].to_string(), theme::STYLE_PROGRESS_EMPTY),
        Span::raw(format!("{}%", &bar[empty_end..])),
    ])
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::tui::state::{ANIMATION_FRAMES, Msg};
    use crate::tui::update::update;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn make_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(110, 12);
        Terminal::new(backend).unwrap()
    }

    fn screen_text(session: &Session) -> String {
        let mut terminal = make_terminal();
        terminal.draw(|frame| render(session, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    fn key(c: char) -> Msg {
        Msg::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn entered(password: &str) -> Session {
        let mut session = Session::new(&Config::default());
        for c in password.chars() {
            update(&mut session, &key(c));
        }
        update(
            &mut session,
            &Msg::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
        );
        session
    }

    // -- Progress bar --

    #[test]
    fn empty_bar() {
        let expected = format!("{} 0", "░".repeat(100));
        assert_eq!(progress_bar(0.0), expected);
    }

    #[test]
    fn full_bar() {
        let expected = format!("{} 100", "█".repeat(100));
        assert_eq!(progress_bar(1.0), expected);
    }

    #[test]
    fn bar_is_pure() {
        assert_eq!(progress_bar(0.37), progress_bar(0.37));
    }

    #[test]
    fn bar_always_has_full_width() {
        for step in 0..=40u32 {
            let bar = progress_bar(f64::from(step) / 40.0);
            let cells = bar
                .chars()
                .filter(|c| *c == PROGRESS_FULL_CHAR || *c == PROGRESS_EMPTY_CHAR)
                .count();
            assert_eq!(cells, PROGRESS_BAR_WIDTH);
        }
    }

    #[test]
    fn bar_rounds_half_away_from_zero() {
        let (filled, empty, whole) = progress_cells(0.125);
        assert_eq!(filled, 13);
        assert_eq!(empty, 87);
        assert_eq!(whole, 13);
        assert!(progress_bar(0.125).ends_with(" 13"));
    }

    #[test]
    fn screen_line_is_the_bar_with_a_percent_sign() {
        for p in [0.0, 0.004, 0.125, 0.5, 0.995, 1.0] {
            let line = progress_line(p);
            let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
            assert_eq!(text, format!("{}%", progress_bar(p)));
        }
    }

    #[test]
    fn screen_line_styles_full_and_empty_runs() {
        let line = progress_line(0.25);
        assert_eq!(line.spans[0].content, "█".repeat(25));
        assert_eq!(line.spans[0].style, theme::STYLE_PROGRESS_FULL);
        assert_eq!(line.spans[1].content, "░".repeat(75));
        assert_eq!(line.spans[1].style, theme::STYLE_PROGRESS_EMPTY);
        assert_eq!(line.spans[2].content, " 25%");
    }

    #[test]
    fn bar_clamps_out_of_range() {
        assert_eq!(progress_bar(-0.5), progress_bar(0.0));
        assert_eq!(progress_bar(2.0), progress_bar(1.0));
    }

    // -- Screens --

    #[test]
    fn entry_screen_shows_prompt_countdown_and_help() {
        let session = Session::new(&Config::default());
        let content = screen_text(&session);
        assert!(content.contains(PROMPT_TEXT));
        assert!(content.contains("Program quits in 100 seconds"));
        assert!(content.contains("ctrl+c, esc: quit"));
        assert!(content.contains(">>password"), "placeholder should show");
    }

    #[test]
    fn entry_screen_masks_typed_password() {
        let mut session = Session::new(&Config::default());
        for c in "hunter".chars() {
            update(&mut session, &key(c));
        }
        let content = screen_text(&session);
        assert!(content.contains(">>••••••"));
        assert!(!content.contains("hunter"));
    }

    #[test]
    fn loading_screen_shows_verification_and_bar() {
        let session = entered("password");
        let content = screen_text(&session);
        assert!(content.contains(VERIFYING_TEXT));
        assert!(content.contains(" 0%"));
    }

    #[test]
    fn success_screen_shows_exit_countdown() {
        let mut session = entered("password");
        for _ in 0..ANIMATION_FRAMES {
            update(&mut session, &Msg::Frame);
        }
        let content = screen_text(&session);
        assert!(content.contains("Successful. Exiting in 3 seconds..."));
        assert!(content.contains(" 100%"));
        assert!(content.contains(&"█".repeat(100)));
    }

    #[test]
    fn quitting_screen_shows_farewell_only() {
        let mut session = Session::new(&Config::default());
        update(
            &mut session,
            &Msg::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
        );
        let content = screen_text(&session);
        assert!(content.contains(FAREWELL));
        assert!(!content.contains(PROMPT_TEXT));
    }

    #[test]
    fn wrong_password_ends_on_farewell_without_feedback() {
        let mut session = entered("nope");
        update(&mut session, &Msg::Frame);
        let content = screen_text(&session);
        assert!(content.contains(FAREWELL));
        assert!(!content.to_lowercase().contains("wrong"));
        assert!(!content.to_lowercase().contains("invalid"));
    }

    #[test]
    fn rendering_does_not_mutate_session() {
        let session = entered("password");
        let before = session.clone();
        let _ = screen_text(&session);
        assert_eq!(session, before);
    }
}
