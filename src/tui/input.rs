//! Single-line text input used by every form field and the chat box.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Height of a bordered input field.
pub const FIELD_HEIGHT: u16 = 3;

/// Editable text with a character-based cursor.
#[derive(Debug, Default, Clone)]
pub struct TextInput {
    text: String,
    /// In characters, not bytes.
    cursor: usize,
}

impl TextInput {
    pub fn with_value(value: &str) -> Self {
        Self {
            text: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let end = self.byte_offset(self.cursor);
            let start = self.byte_offset(self.cursor - 1);
            self.text.drain(start..end);
            self.cursor -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let start = self.byte_offset(self.cursor);
            let end = self.byte_offset(self.cursor + 1);
            self.text.drain(start..end);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Return the trimmed text and clear the field.
    /// Returns None (and keeps the text) if it is blank.
    pub fn take(&mut self) -> Option<String> {
        let text = self.text.trim().to_string();
        if text.is_empty() {
            return None;
        }
        self.clear();
        Some(text)
    }

    /// Apply an editing key. Returns false if the key is not an editing key,
    /// so the caller can handle it.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char(_) if ctrl => return false,
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render a bordered field titled `label`, placing the terminal cursor in it
/// when focused.
pub fn render_field(
    area: Rect,
    frame: &mut Frame,
    state: &TextInput,
    label: &str,
    placeholder: &str,
    focused: bool,
) {
    let (border_style, border_type) = if focused {
        (Style::default().fg(Color::Yellow), BorderType::Double)
    } else {
        (Style::default().fg(Color::DarkGray), BorderType::Plain)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .title(Span::styled(
            format!(" {} ", label),
            Style::default().fg(Color::Gray),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let line_area = Rect::new(inner.x, inner.y, inner.width, 1);
    render_line(line_area, frame, state, placeholder, focused);
}

/// Render the input text on a single row without a border.
pub fn render_line(
    area: Rect,
    frame: &mut Frame,
    state: &TextInput,
    placeholder: &str,
    focused: bool,
) {
    let w = area.width as usize;
    let display = display_text(&state.text, state.cursor, w);

    let line = if state.text.is_empty() {
        let truncated: String = format!(" {}", placeholder).chars().take(w).collect();
        Line::from(Span::styled(truncated, Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(Span::styled(
            format!(" {}", display.visible),
            Style::default().fg(Color::White),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);

    if focused {
        let cursor_x = area.x + 1 + display.cursor_offset as u16;
        frame.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(1)), area.y));
    }
}

/// Slice of the text that fits the field, and the cursor column in it.
struct DisplayText {
    visible: String,
    cursor_offset: usize,
}

/// Horizontal scrolling that keeps the cursor visible. One column on the
/// left is reserved for padding.
fn display_text(input: &str, cursor: usize, width: usize) -> DisplayText {
    let avail = width.saturating_sub(1);
    if avail == 0 {
        return DisplayText {
            visible: String::new(),
            cursor_offset: 0,
        };
    }

    let chars: Vec<char> = input.chars().collect();
    if chars.len() < avail {
        return DisplayText {
            visible: input.to_string(),
            cursor_offset: cursor,
        };
    }

    let scroll_start = if cursor < avail {
        0
    } else {
        cursor - avail + 1
    };
    let end = (scroll_start + avail).min(chars.len());
    DisplayText {
        visible: chars[scroll_start..end].iter().collect(),
        cursor_offset: cursor - scroll_start,
    }
}
