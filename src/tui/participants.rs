//! Participants side panel.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::tiles::badges;
use crate::models::Participant;

pub fn render(area: Rect, buf: &mut Buffer, roster: &[Participant]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" Participants ({}) ", roster.len()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    block.render(area, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let lines: Vec<Line> = roster.iter().map(participant_line).collect();
    Paragraph::new(lines).render(inner, buf);
}

fn participant_line(p: &Participant) -> Line<'static> {
    let video = if p.has_video {
        Span::styled(" cam ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" --- ", Style::default().fg(Color::DarkGray))
    };
    let mut spans = vec![
        Span::styled(
            format!(" {:<3}", p.initials()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        video,
        Span::styled(p.name.clone(), Style::default().fg(Color::White)),
    ];
    spans.extend(badges(p));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{mock_roster, roster_with_session};
    use crate::session::SessionState;

    fn text(buf: &Buffer) -> String {
        (0..buf.area.height)
            .flat_map(|y| (0..buf.area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_lists_everyone_with_count() {
        let roster = mock_roster();
        let area = Rect::new(0, 0, 50, 10);
        let mut buf = Buffer::empty(area);
        render(area, &mut buf, &roster);
        let t = text(&buf);
        assert!(t.contains("Participants (6)"));
        for p in &roster {
            assert!(t.contains(&p.name), "missing {}", p.name);
        }
    }

    #[test]
    fn test_local_entry_follows_session() {
        let mut session = SessionState::default();
        session.toggle_microphone();
        session.toggle_hand_raise();
        let roster = roster_with_session(&mock_roster(), &session);

        let line = participant_line(&roster[0]);
        let rendered: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(rendered.contains("You (Host) [hand] [muted]"));
    }
}
