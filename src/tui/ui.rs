//! UI rendering for the TUI

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
    Frame,
};

use super::app::{App, Screen};
use super::dashboard;
use super::debug_log;
use super::help;
use super::join;
use super::meeting_room;
use super::schedule;
use super::settings;
use super::waiting_room;
use crate::models::initials;

const PRODUCT_NAME: &str = " Meet";

/// Rounded card with a bold title, used by every screen.
pub fn card(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Layout: header (1 line) + main content + status bar (1 line)
    let [header_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(header_area, frame.buffer_mut(), app);

    let (content_area, log_area) = if app.debug_log.visible {
        let [content, log] =
            Layout::vertical([Constraint::Percentage(70), Constraint::Percentage(30)])
                .areas(main_area);
        (content, Some(log))
    } else {
        (main_area, None)
    };

    match &app.screen {
        Screen::Dashboard(s) => dashboard::render(content_area, frame, s),
        Screen::Join(s) => join::render(content_area, frame, s),
        Screen::WaitingRoom(s) => waiting_room::render(content_area, frame, s),
        Screen::Meeting(s) => meeting_room::render(content_area, frame, s),
        Screen::Schedule(s) => schedule::render(content_area, frame, s),
        Screen::Settings(s) => settings::render(content_area, frame, s),
    }

    if let Some(log_area) = log_area {
        debug_log::render(log_area, frame.buffer_mut(), &app.debug_log);
    }

    render_status(status_area, frame.buffer_mut(), app);

    // Render help popup overlay (on top of everything else)
    if app.show_help {
        help::render_help_popup(frame, &app.screen);
    }
}

/// Render the header bar
fn render_header(area: Rect, buf: &mut Buffer, app: &App) {
    let title = Span::styled(
        PRODUCT_NAME,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );
    let page = Span::styled(
        format!("  {}", app.screen.title()),
        Style::default().fg(Color::Gray),
    );

    let help_indicator = Span::styled(" [?] Help ", Style::default().fg(Color::Gray));
    let avatar = Span::styled(
        format!(" {} ", initials(&app.display_name)),
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    );
    let user_name = Span::styled(
        format!(" {} ", app.display_name),
        Style::default().fg(Color::Cyan),
    );

    // Right-align help, avatar and name.
    let left_width = title.width() + page.width();
    let right_width = help_indicator.width() + avatar.width() + user_name.width();
    let padding_width = (area.width as usize).saturating_sub(left_width + right_width);
    let padding = Span::raw(" ".repeat(padding_width));

    let header_line = Line::from(vec![title, page, padding, help_indicator, avatar, user_name]);

    Paragraph::new(header_line)
        .style(Style::default().bg(Color::DarkGray))
        .render(area, buf);
}

/// Render the status bar
fn render_status(area: Rect, buf: &mut Buffer, app: &App) {
    // If there's a status message, show it prominently.
    if let Some(ref msg) = app.status_message {
        let style = if app.status_is_error {
            Style::default().fg(Color::Red).bg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Green).bg(Color::DarkGray)
        };
        let line = Line::from(Span::styled(format!(" {} ", msg), style));
        Paragraph::new(line)
            .style(Style::default().bg(Color::DarkGray))
            .render(area, buf);
        return;
    }

    let sep_style = Style::default().fg(Color::Gray);
    let mut spans = vec![Span::styled(
        format!(" {} ", app.screen.hints()),
        Style::default().fg(Color::White),
    )];
    if app.debug_log.visible {
        spans.push(Span::styled("| ", sep_style));
        spans.push(Span::styled(
            "PgUp/PgDn: scroll log ",
            Style::default().fg(Color::Cyan),
        ));
    }
    spans.push(Span::styled("| ", sep_style));
    spans.push(Span::styled("C-d: log", Style::default().fg(Color::Gray)));

    Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::DarkGray))
        .render(area, buf);
}
