//! Terminal user interface using Ratatui.
//!
//! One screen is mounted at a time. Screens turn key presses into
//! [`Transition`]s and the [`app::App`] applies them.

mod app;
mod chat;
mod controls;
mod dashboard;
mod debug_log;
mod help;
mod input;
mod join;
mod log_capture;
mod meeting_room;
mod notifications;
mod participants;
mod route;
mod schedule;
mod settings;
mod tiles;
mod ui;
mod waiting_room;

pub use app::{run, MeetingEntry, Transition};
pub use log_capture::LogBuffer;
pub use route::Route;
