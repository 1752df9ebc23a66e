//! Video tiles. There is no media, so a tile with video shows the
//! participant's initials on a colored background and a tile without video
//! shows a placeholder.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::controls;
use crate::models::Participant;
use crate::session::SessionState;

const TILE_COLORS: [Color; 5] = [
    Color::Blue,
    Color::Magenta,
    Color::Green,
    Color::Cyan,
    Color::Yellow,
];

/// Stable color per participant id.
fn tile_color(id: &str) -> Color {
    let sum: usize = id.bytes().map(usize::from).sum();
    TILE_COLORS[sum % TILE_COLORS.len()]
}

/// Status suffixes shown next to a name: host, muted, hand raised.
pub fn badges(p: &Participant) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if p.is_host {
        spans.push(Span::styled(" (Host)", Style::default().fg(Color::Cyan)));
    }
    if p.is_hand_raised {
        spans.push(Span::styled(
            " [hand]",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if p.is_muted {
        spans.push(Span::styled(" [muted]", Style::default().fg(Color::Red)));
    }
    spans
}

/// Render one participant tile.
pub fn render_tile(area: Rect, buf: &mut Buffer, p: &Participant, show_name: bool, speaking: bool) {
    let border_style = if speaking {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);
    let inner = block.inner(area);
    block.render(area, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let (face_area, label_area) = if show_name && inner.height > 1 {
        let [face, label] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);
        (face, Some(label))
    } else {
        (inner, None)
    };

    if p.has_video {
        let bg = tile_color(&p.id);
        buf.set_style(face_area, Style::default().bg(bg));
        let initials = Line::from(Span::styled(
            p.initials(),
            Style::default()
                .fg(Color::White)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .centered();
        Paragraph::new(initials).render(middle_row(face_area), buf);
    } else {
        let placeholder = Line::from(vec![
            Span::styled(
                p.initials(),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  camera off", Style::default().fg(Color::DarkGray)),
        ])
        .centered();
        Paragraph::new(placeholder).render(middle_row(face_area), buf);
    }

    if let Some(label_area) = label_area {
        let mut spans = vec![Span::styled(
            format!(" {}", p.name),
            Style::default().fg(Color::White),
        )];
        spans.extend(badges(p));
        Paragraph::new(Line::from(spans)).render(label_area, buf);
    }
}

/// Camera preview with microphone and camera buttons, shown before joining.
pub fn render_preview(area: Rect, buf: &mut Buffer, display_name: &str, session: &SessionState) {
    let [tile_area, bar_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).areas(area);

    let me = Participant {
        id: "preview".to_string(),
        name: display_name.to_string(),
        is_host: false,
        is_muted: session.microphone_muted,
        has_video: session.camera_enabled,
        is_hand_raised: false,
    };
    render_tile(tile_area, buf, &me, true, false);
    controls::render_bar(bar_area, buf, "Preview", &controls::preview_controls(session));
}

fn middle_row(area: Rect) -> Rect {
    Rect::new(area.x, area.y + area.height / 2, area.width, 1.min(area.height))
}
