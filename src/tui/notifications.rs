//! Notification feed and toasts shown on the dashboard.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{Notification, NotificationKind};

/// Number of notifications kept in the feed.
const FEED_CAPACITY: usize = 10;

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

const TOAST_WIDTH: u16 = 44;

struct Toast {
    notification: Notification,
    shown_at: Instant,
}

/// Newest-first list of recent notifications plus the toasts still visible.
#[derive(Default)]
pub struct NotificationFeed {
    items: VecDeque<Notification>,
    toasts: Vec<Toast>,
}

impl NotificationFeed {
    /// Record a notification and pop a toast for it.
    pub fn push(&mut self, notification: Notification, now: Instant) {
        self.items.push_front(notification.clone());
        self.items.truncate(FEED_CAPACITY);
        self.toasts.push(Toast {
            notification,
            shown_at: now,
        });
    }

    /// Drop toasts older than `TOAST_DURATION`.
    pub fn expire_toasts(&mut self, now: Instant) {
        self.toasts
            .retain(|t| now.saturating_duration_since(t.shown_at) < TOAST_DURATION);
    }

    pub fn items(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub fn toast_count(&self) -> usize {
        self.toasts.len()
    }
}

fn kind_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::UserJoined => Color::Green,
        NotificationKind::UserLeft => Color::Gray,
        NotificationKind::HandRaised => Color::Yellow,
        NotificationKind::MuteChanged => Color::Cyan,
        NotificationKind::RecordingStarted => Color::Red,
    }
}

/// One feed row: "10:42 + Alice Johnson joined the meeting".
pub fn feed_line(n: &Notification) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{} ", n.timestamp.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{:<3} ", n.kind.icon()),
            Style::default().fg(kind_color(n.kind)),
        ),
        Span::styled(n.message.clone(), Style::default().fg(Color::Gray)),
    ])
}

/// Stack the visible toasts in the top-right corner, newest at the top.
pub fn render_toasts(frame: &mut Frame, feed: &NotificationFeed) {
    let area = frame.area();
    let width = TOAST_WIDTH.min(area.width);
    if width < 6 {
        return;
    }

    for (i, toast) in feed.toasts.iter().rev().enumerate() {
        let y = area.y + 1 + (i as u16) * 3;
        if y + 3 > area.y + area.height {
            break;
        }
        let rect = Rect::new(area.x + area.width - width, y, width, 3);
        let n = &toast.notification;

        frame.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(kind_color(n.kind)));
        let line = Line::from(vec![
            Span::styled(
                format!("{} ", n.kind.icon()),
                Style::default()
                    .fg(kind_color(n.kind))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(n.message.clone(), Style::default().fg(Color::White)),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), rect);
    }
}
