pub mod app;
mod chat;
mod components;
mod email_list;
mod status_bar;
pub mod theme;
mod widgets;

pub use app::{chat_scroll_limit, render};
