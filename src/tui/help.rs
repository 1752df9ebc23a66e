//! Help popup overlay: keyboard shortcuts grouped by screen.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::Screen;

/// Popup dimensions.
const POPUP_WIDTH: u16 = 88;
const POPUP_HEIGHT: u16 = 34;

const KEY_WIDTH: usize = 12;

/// A shortcut entry: key binding and its description.
struct Shortcut {
    key: &'static str,
    desc: &'static str,
}

/// A category of shortcuts with a title.
struct Category {
    title: &'static str,
    shortcuts: &'static [Shortcut],
}

const fn sc(key: &'static str, desc: &'static str) -> Shortcut {
    Shortcut { key, desc }
}

const GLOBAL: Category = Category {
    title: "GLOBAL",
    shortcuts: &[
        sc("?", "Show this help"),
        sc("Ctrl+D", "Toggle debug log"),
        sc("PgUp/PgDn", "Scroll debug log"),
        sc("Ctrl+C", "Quit"),
    ],
};

const DASHBOARD: Category = Category {
    title: "DASHBOARD",
    shortcuts: &[
        sc("i / Tab", "Type a meeting ID"),
        sc("Enter", "Join typed ID / open selected"),
        sc("Up/Down", "Select recent meeting"),
        sc("n", "New meeting"),
        sc("s", "Schedule a meeting"),
        sc("j", "Join screen"),
        sc("r", "Personal meeting room"),
        sc(",", "Settings"),
        sc("q", "Quit"),
    ],
};

const FORMS: Category = Category {
    title: "JOIN / SCHEDULE / SETTINGS",
    shortcuts: &[
        sc("Tab", "Next field"),
        sc("Shift+Tab", "Previous field"),
        sc("Left/Right", "Change choice or volume"),
        sc("Space", "Flip a switch"),
        sc("Enter", "Join / schedule"),
        sc("Ctrl+S", "Schedule / save settings"),
        sc("Ctrl+U", "Clear text field"),
        sc("Esc", "Cancel"),
    ],
};

const MEETING: Category = Category {
    title: "MEETING",
    shortcuts: &[
        sc("m", "Mute / unmute"),
        sc("v", "Start / stop video"),
        sc("s", "Share screen"),
        sc("p", "Participants panel"),
        sc("c", "Chat panel"),
        sc("g", "Gallery / speaker view"),
        sc("h", "Raise / lower hand"),
        sc("a", "Speaker on / off"),
        sc(".", "More controls"),
        sc("r", "Record (in More)"),
        sc("i / Tab", "Type in chat"),
        sc("x", "Leave meeting"),
    ],
};

const WAITING: Category = Category {
    title: "WAITING ROOM",
    shortcuts: &[
        sc("m / v", "Microphone / camera"),
        sc("Enter", "Join once admitted"),
        sc("Esc", "Leave"),
    ],
};

/// Title of the category that applies to `screen`.
fn current_category(screen: &Screen) -> &'static str {
    match screen {
        Screen::Dashboard(_) => DASHBOARD.title,
        Screen::Meeting(_) => MEETING.title,
        Screen::WaitingRoom(_) => WAITING.title,
        Screen::Join(_) | Screen::Schedule(_) | Screen::Settings(_) => FORMS.title,
    }
}

/// Render the help popup overlay centered on screen, highlighting the
/// shortcuts of the current screen.
pub fn render_help_popup(frame: &mut Frame, screen: &Screen) {
    let area = frame.area();

    let popup_w = POPUP_WIDTH.min(area.width.saturating_sub(2));
    let popup_h = POPUP_HEIGHT.min(area.height.saturating_sub(2));
    let popup_area = centered_rect(popup_w, popup_h, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(
                " HELP ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("({}) ", screen.title()),
                Style::default().fg(Color::Gray),
            ),
        ]))
        .title_bottom(Line::from(Span::styled(
            " Press any key to close ",
            Style::default().fg(Color::Gray),
        )));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let [left_col, right_col] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(inner);

    let current = current_category(screen);
    let left_lines = build_column_lines(&[&GLOBAL, &DASHBOARD, &WAITING], current);
    frame.render_widget(Paragraph::new(left_lines), inset(left_col, 1, 1));

    let right_lines = build_column_lines(&[&MEETING, &FORMS], current);
    frame.render_widget(Paragraph::new(right_lines), inset(right_col, 1, 1));
}

fn build_column_lines(categories: &[&Category], current: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (cat_idx, cat) in categories.iter().enumerate() {
        if cat_idx > 0 {
            lines.push(Line::from(""));
        }

        let title_color = if cat.title == current {
            Color::Yellow
        } else {
            Color::White
        };
        lines.push(Line::from(Span::styled(
            cat.title,
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            "\u{2500}".repeat(38),
            Style::default().fg(Color::DarkGray),
        )));

        for shortcut in cat.shortcuts {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<width$}", shortcut.key, width = KEY_WIDTH),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(shortcut.desc, Style::default().fg(Color::Gray)),
            ]));
        }
    }

    lines
}

/// Return a centered sub-rect of the given size within `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Inset a rect by the given horizontal and vertical margins.
fn inset(area: Rect, h: u16, v: u16) -> Rect {
    Rect::new(
        area.x + h,
        area.y + v,
        area.width.saturating_sub(h * 2),
        area.height.saturating_sub(v * 2),
    )
}
