//! Data models for meetings and the people in them

mod chat;
mod meeting;
mod notification;
mod participant;
mod schedule;
mod settings;

pub use chat::*;
pub use meeting::*;
pub use notification::*;
pub use participant::*;
pub use schedule::*;
pub use settings::*;
