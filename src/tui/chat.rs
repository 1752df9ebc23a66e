//! In-meeting chat side panel.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::input::{self, TextInput};
use crate::models::{mock_chat_messages, ChatMessage};

pub struct ChatPanel {
    pub messages: Vec<ChatMessage>,
    pub input: TextInput,
}

impl Default for ChatPanel {
    fn default() -> Self {
        Self {
            messages: mock_chat_messages(),
            input: TextInput::default(),
        }
    }
}

impl ChatPanel {
    /// Append the typed text as a message from the local user. Blank input is
    /// ignored. Returns true if a message was sent.
    pub fn send(&mut self, now: DateTime<Local>) -> bool {
        match self.input.take() {
            Some(text) => {
                tracing::debug!("Chat message sent ({} chars)", text.chars().count());
                self.messages.push(ChatMessage::local(&text, now));
                true
            }
            None => false,
        }
    }
}

/// Render the panel: message history on top, the input box at the bottom.
pub fn render(area: Rect, frame: &mut Frame, panel: &ChatPanel, input_focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if input_focused {
            BorderType::Double
        } else {
            BorderType::Plain
        })
        .border_style(if input_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        })
        .title(Span::styled(
            " Chat ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 3 || inner.width < 4 {
        return;
    }

    let [history_area, sep_area, input_area] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let lines = build_message_lines(&panel.messages, history_area.width as usize);
    // Keep the newest messages in view.
    let skip = lines.len().saturating_sub(history_area.height as usize);
    frame.render_widget(
        Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>()),
        history_area,
    );

    let sep: String = "\u{2500}".repeat(sep_area.width as usize);
    frame.render_widget(
        Paragraph::new(Span::styled(sep, Style::default().fg(Color::DarkGray))),
        sep_area,
    );

    input::render_line(
        input_area,
        frame,
        &panel.input,
        "Type a message... (i to focus)",
        input_focused,
    );
}

fn build_message_lines(messages: &[ChatMessage], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for msg in messages {
        let sender_style = if msg.is_local() {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::raw(" "),
            Span::styled(msg.sender.clone(), sender_style),
            Span::styled(
                format!("  {}", msg.timestamp),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        for wrapped in wrap_text(&msg.message, width.saturating_sub(2)) {
            lines.push(Line::from(Span::styled(
                format!(" {}", wrapped),
                Style::default().fg(Color::Gray),
            )));
        }
    }
    lines
}

/// Greedy word wrap on whitespace. Words longer than the width are split.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![];
    }
    let mut result = Vec::new();
    for line in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;
        for word in line.split_whitespace() {
            let word_len = UnicodeWidthStr::width(word);
            if current_len > 0 && current_len + 1 + word_len <= max_width {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
                continue;
            }
            if current_len > 0 {
                result.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            let mut chunks = chars.chunks(max_width).peekable();
            current_len = 0;
            while let Some(chunk) = chunks.next() {
                if chunks.peek().is_some() {
                    result.push(chunk.iter().collect());
                } else {
                    current = chunk.iter().collect();
                    current_len = UnicodeWidthStr::width(current.as_str());
                }
            }
        }
        if current_len > 0 {
            result.push(current);
        }
    }
    result
}
