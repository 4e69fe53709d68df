//! User-triggered commands and the dispatcher that applies them
//!
//! Key bindings and the `:` command line both end up here, so every
//! user-visible transition goes through one place.

use super::App;

/// Everything a user can ask the app to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the list with a fresh batch of summaries
    FetchEmails,
    /// Start a conversation about the card at `index`
    SelectEmail { index: usize },
    /// Send the chat input as a question about the selected email
    SendMessage,
    /// Use this model for subsequent requests
    SetModel(String),
}

impl App {
    /// Apply one command. The next loop iteration renders the result.
    pub async fn dispatch(&mut self, command: Command) {
        tracing::debug!("Dispatching {:?}", command);
        match command {
            Command::FetchEmails => self.fetch_emails().await,
            Command::SelectEmail { index } => self.select_email(index),
            Command::SendMessage => self.send_message().await,
            Command::SetModel(model) => self.set_model(model),
        }
        self.dirty = true;
    }
}
