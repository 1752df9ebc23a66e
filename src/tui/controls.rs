//! Meeting control bar: maps the session flags to button labels and styles.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::session::{SessionState, ViewMode};

/// Visual weight of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Highlighted: the feature is on or the panel is open.
    Active,
    Secondary,
    /// Alert styling: something the user may not expect is off.
    Destructive,
}

impl Variant {
    fn style(&self) -> Style {
        match self {
            Variant::Active => Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Variant::Secondary => Style::default().fg(Color::White).bg(Color::DarkGray),
            Variant::Destructive => Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// One button in the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub key: &'static str,
    pub label: &'static str,
    pub variant: Variant,
}

fn pick<T>(on: bool, yes: T, no: T) -> T {
    if on {
        yes
    } else {
        no
    }
}

/// The always-visible row: media, panels, layout, hand, speaker, leave.
pub fn primary_controls(s: &SessionState) -> Vec<Control> {
    vec![
        Control {
            key: "m",
            label: pick(s.microphone_muted, "Unmute", "Mute"),
            variant: pick(s.microphone_muted, Variant::Destructive, Variant::Secondary),
        },
        Control {
            key: "v",
            label: pick(s.camera_enabled, "Stop Video", "Start Video"),
            variant: pick(s.camera_enabled, Variant::Secondary, Variant::Destructive),
        },
        Control {
            key: "s",
            label: pick(s.screen_sharing, "Stop Share", "Share Screen"),
            variant: pick(s.screen_sharing, Variant::Active, Variant::Secondary),
        },
        Control {
            key: "p",
            label: "Participants",
            variant: pick(s.participants_panel_open, Variant::Active, Variant::Secondary),
        },
        Control {
            key: "c",
            label: "Chat",
            variant: pick(s.chat_panel_open, Variant::Active, Variant::Secondary),
        },
        Control {
            key: "g",
            label: pick(s.view_mode == ViewMode::Gallery, "Speaker", "Gallery"),
            variant: pick(s.view_mode == ViewMode::Gallery, Variant::Active, Variant::Secondary),
        },
        Control {
            key: "h",
            label: pick(s.hand_raised, "Lower Hand", "Raise Hand"),
            variant: pick(s.hand_raised, Variant::Active, Variant::Secondary),
        },
        Control {
            key: "a",
            label: pick(s.speaker_muted, "Speaker Off", "Speaker On"),
            variant: pick(s.speaker_muted, Variant::Destructive, Variant::Secondary),
        },
        Control {
            key: ".",
            label: "More",
            variant: Variant::Secondary,
        },
        Control {
            key: "x",
            label: "Leave Meeting",
            variant: Variant::Destructive,
        },
    ]
}

/// Microphone and camera only, for the pre-join previews.
pub fn preview_controls(s: &SessionState) -> Vec<Control> {
    primary_controls(s).into_iter().take(2).collect()
}

/// The row revealed by "More".
pub fn advanced_controls(s: &SessionState) -> Vec<Control> {
    vec![Control {
        key: "r",
        label: pick(s.recording, "Stop Recording", "Record"),
        variant: pick(s.recording, Variant::Destructive, Variant::Secondary),
    }]
}

/// Render a row of controls inside a bordered bar.
pub fn render_bar(area: Rect, buf: &mut Buffer, title: &str, controls: &[Control]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(Color::Gray),
        ));

    let inner = block.inner(area);
    block.render(area, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let mut spans = Vec::with_capacity(controls.len() * 3);
    for (i, control) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("{}:", control.key),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::styled(
            format!(" {} ", control.label),
            control.variant.style(),
        ));
    }

    Paragraph::new(Line::from(spans)).render(inner, buf);
}
