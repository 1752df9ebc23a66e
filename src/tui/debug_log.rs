//! Debug log pane (Ctrl+D): scrollable view of captured tracing output.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use tracing::Level;

use super::log_capture::LogBuffer;

/// Scrollback kept by the pane, larger than what the buffer holds between
/// two frames.
const SCROLLBACK: usize = 1000;

pub struct DebugLogState {
    buffer: LogBuffer,
    lines: Vec<String>,
    /// Lines lost to buffer overflow or scrollback trimming.
    dropped: usize,
    pub visible: bool,
    /// Lines scrolled up from the bottom (0 = follow newest).
    scroll_offset: usize,
}

impl DebugLogState {
    pub fn new(buffer: LogBuffer) -> Self {
        Self {
            buffer,
            lines: Vec::new(),
            dropped: 0,
            visible: false,
            scroll_offset: 0,
        }
    }

    /// Pull new lines from the buffer. Called once per frame.
    pub fn refresh(&mut self) {
        let drained = self.buffer.drain();
        self.dropped += drained.dropped;
        self.lines.extend(drained.lines);

        if self.lines.len() > SCROLLBACK {
            let excess = self.lines.len() - SCROLLBACK;
            self.lines.drain(..excess);
            self.dropped += excess;
        }
        self.scroll_offset = self.scroll_offset.min(self.lines.len().saturating_sub(1));
    }

    /// Show or hide the pane. Opening jumps to the newest line.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        if self.visible {
            self.scroll_offset = 0;
        }
    }

    pub fn scroll_up(&mut self, n: usize) {
        let max_offset = self.lines.len().saturating_sub(1);
        self.scroll_offset = self.scroll_offset.saturating_add(n).min(max_offset);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }
}

/// Level of a fmt-layer line, from the first level word it contains.
fn line_level(line: &str) -> Option<Level> {
    line.split_whitespace()
        .take(3)
        .map(|word| word.trim_end_matches(':'))
        .filter(|word| word.chars().all(|c| c.is_ascii_alphabetic()))
        .find_map(|word| word.parse::<Level>().ok())
}

fn level_color(level: Option<Level>) -> Color {
    match level {
        Some(Level::ERROR) => Color::Red,
        Some(Level::WARN) => Color::Yellow,
        Some(Level::INFO) => Color::Green,
        Some(Level::DEBUG) | Some(Level::TRACE) => Color::DarkGray,
        None => Color::White,
    }
}

pub fn render(area: Rect, buf: &mut Buffer, state: &DebugLogState) {
    let mut title = vec![Span::styled(
        " Debug Log ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if state.scroll_offset > 0 {
        title.push(Span::styled(
            format!("(-{}) ", state.scroll_offset),
            Style::default().fg(Color::Yellow),
        ));
    }
    if state.dropped > 0 {
        title.push(Span::styled(
            format!("({} dropped) ", state.dropped),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Line::from(title));
    let inner = block.inner(area);
    block.render(area, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let end = state.lines.len().saturating_sub(state.scroll_offset);
    let start = end.saturating_sub(inner.height as usize);
    let lines: Vec<Line> = state.lines[start..end]
        .iter()
        .map(|line| {
            Line::from(Span::styled(
                line.clone(),
                Style::default().fg(level_color(line_level(line))),
            ))
        })
        .collect();
    Paragraph::new(lines).render(inner, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: usize) -> DebugLogState {
        let buffer = LogBuffer::new();
        for i in 0..n {
            buffer.push(format!("line {}", i));
        }
        let mut state = DebugLogState::new(buffer);
        state.refresh();
        state
    }

    #[test]
    fn test_refresh_accumulates() {
        let buffer = LogBuffer::new();
        let mut state = DebugLogState::new(buffer.clone());
        buffer.push("a".to_string());
        state.refresh();
        buffer.push("b".to_string());
        state.refresh();
        assert_eq!(state.lines, vec!["a", "b"]);
        assert_eq!(state.dropped, 0);
    }

    #[test]
    fn test_scrollback_trims_oldest() {
        let buffer = LogBuffer::new();
        let mut state = DebugLogState::new(buffer.clone());
        for round in 0..3 {
            for i in 0..400 {
                buffer.push(format!("{}-{}", round, i));
            }
            state.refresh();
        }
        assert_eq!(state.lines.len(), SCROLLBACK);
        assert_eq!(state.dropped, 200);
        assert_eq!(state.lines[0], "0-200");
    }

    #[test]
    fn test_scroll_clamps() {
        let mut state = filled(5);
        state.scroll_up(100);
        assert_eq!(state.scroll_offset, 4);
        state.scroll_down(3);
        assert_eq!(state.scroll_offset, 1);
        state.scroll_down(10);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_toggle_resets_scroll() {
        let mut state = filled(20);
        state.toggle();
        state.scroll_up(5);
        state.toggle();
        state.toggle();
        assert!(state.visible);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_line_level() {
        assert_eq!(
            line_level("2024-03-01T10:00:00Z  INFO meet_tui: Navigating to /"),
            Some(Level::INFO)
        );
        assert_eq!(line_level(" WARN meet_tui: slow"), Some(Level::WARN));
        assert_eq!(line_level("ERROR: boom"), Some(Level::ERROR));
        assert_eq!(line_level("plain text"), None);
    }

    #[test]
    fn test_render_shows_newest() {
        let state = filled(30);
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        render(area, &mut buf, &state);
        let row = |y: u16| -> String { (0..40).map(|x| buf[(x, y)].symbol().to_string()).collect() };
        assert!(row(4).contains("line 29"));
        assert!(row(1).contains("line 26"));
    }
}
