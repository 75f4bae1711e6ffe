//! Masked single-line text input.
//!
//! Owns its buffer and cursor; the state machine only forwards key
//! events and reads back the value. Rendering never shows the typed
//! characters, only one echo glyph per character.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use super::theme;

/// Glyph drawn in place of each typed character.
pub const ECHO_CHAR: char = '•';

/// Prompt drawn before the input.
pub const PROMPT: &str = ">>";

/// Hint shown while the buffer is empty.
pub const PLACEHOLDER: &str = "password";

/// Visible cells, cursor included. Longer input scrolls; length is unbounded.
pub const WIDTH: usize = 32;

/// Password field with an editing cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordInput {
    buffer: Vec<char>,
    /// Char index in `0..=buffer.len()`.
    cursor: usize,
    cursor_visible: bool,
}

impl Default for PasswordInput {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordInput {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            cursor: 0,
            cursor_visible: true,
        }
    }

    /// Plain text currently entered.
    pub fn value(&self) -> String {
        self.buffer.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// One echo glyph per buffered character.
    pub fn masked(&self) -> String {
        std::iter::repeat_n(ECHO_CHAR, self.buffer.len()).collect()
    }

    /// Toggle cursor visibility.
    pub fn blink(&mut self) {
        self.cursor_visible = !self.cursor_visible;
    }

    /// Apply an editing key. Unknown keys are ignored.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // AltGr arrives as CONTROL|ALT on Windows and must still type
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
            && !key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.buffer.len(),
            KeyCode::Char('u') if ctrl => {
                self.buffer.drain(..self.cursor);
                self.cursor = 0;
            }
            KeyCode::Char('k') if ctrl => self.buffer.truncate(self.cursor),
            KeyCode::Char(_) if ctrl => return,
            KeyCode::Char(c) => {
                if c.is_control() {
                    return;
                }
                self.buffer.insert(self.cursor, c);
                self.cursor += 1;
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.buffer.remove(self.cursor);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.buffer.len() {
                    self.buffer.remove(self.cursor);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.buffer.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.buffer.len(),
            _ => return,
        }

        // Editing keeps the cursor on screen
        self.cursor_visible = true;
    }

    /// Styled rendering: prompt, masked text or placeholder, cursor.
    ///
    /// At most [`WIDTH`] cells are drawn; the window follows the cursor.
    pub fn render(&self) -> Line<'static> {
        let mut spans = vec![Span::raw(PROMPT)];

        if self.buffer.is_empty() {
            let mut chars = PLACEHOLDER.chars();
            let first = chars.next().map(String::from).unwrap_or_default();
            spans.push(Span::styled(first, self.cursor_style(theme::STYLE_SUBTLE)));
            spans.push(Span::styled(chars.as_str().to_string(), theme::STYLE_SUBTLE));
            return Line::from(spans);
        }

        let cells: Vec<char> = self.masked().chars().collect();
        let cursor = self.cursor();
        let start = (cursor + 1).saturating_sub(WIDTH);
        let end = (start + WIDTH).min(cells.len());

        spans.push(Span::raw(cells[start..cursor].iter().collect::<String>()));

        if cursor < cells.len() {
            spans.push(Span::styled(
                ECHO_CHAR.to_string(),
                self.cursor_style(Style::new()),
            ));
            spans.push(Span::raw(cells[cursor + 1..end].iter().collect::<String>()));
        } else {
            spans.push(Span::styled(" ", self.cursor_style(Style::new())));
        }

        Line::from(spans)
    }

    fn cursor_style(&self, base: Style) -> Style {
        if self.cursor_visible {
            theme::STYLE_CURSOR
        } else {
            base
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
