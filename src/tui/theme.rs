//! TUI color semantics and style constants.
//!
//! Pure data, built at compile time and never mutated. The rendering
//! layer looks styles up here by role instead of constructing them.
//!
//! Color semantics:
//! - Aquamarine: countdown numbers
//! - Pink: the password cursor
//! - Gray: de-emphasized help text, placeholder, empty bar cells
//! - Green: filled bar cells

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// TEXT ROLES
// ============================================================================

/// Remaining seconds in a countdown (xterm 79).
pub const STYLE_TICKS: Style = Style::new().fg(Color::Indexed(79));

/// Help line, placeholder (xterm 241).
pub const STYLE_SUBTLE: Style = Style::new().fg(Color::Indexed(241));

/// Separator dot between help entries (xterm 236).
pub const STYLE_DOT: Style = Style::new().fg(Color::Indexed(236));

/// Farewell message.
pub const STYLE_FAREWELL: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// WIDGET ROLES
// ============================================================================

/// Password cursor cell (xterm 205).
pub const STYLE_CURSOR: Style = Style::new()
    .fg(Color::Indexed(205))
    .add_modifier(Modifier::REVERSED);

/// Filled progress bar cell.
pub const STYLE_PROGRESS_FULL: Style = Style::new().fg(Color::Rgb(0x00, 0xff, 0x00));

/// Empty progress bar cell.
pub const STYLE_PROGRESS_EMPTY: Style = STYLE_SUBTLE;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_roles_have_expected_colors() {
        assert_eq!(STYLE_TICKS.fg, Some(Color::Indexed(79)));
        assert_eq!(STYLE_SUBTLE.fg, Some(Color::Indexed(241)));
        assert_eq!(STYLE_DOT.fg, Some(Color::Indexed(236)));
    }

    #[test]
    fn cursor_style_is_reversed() {
        assert!(STYLE_CURSOR.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn bar_cells_are_distinguishable() {
        assert_ne!(STYLE_PROGRESS_FULL, STYLE_PROGRESS_EMPTY);
        assert_eq!(STYLE_PROGRESS_FULL.fg, Some(Color::Rgb(0, 255, 0)));
    }
}
