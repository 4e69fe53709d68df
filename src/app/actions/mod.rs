//! Action handlers for user input
//!
//! This module is split into focused submodules:
//! - `list`: Fetching summaries and selecting a card
//! - `conversation`: Chat about the selected email and model choice
//! - `navigation`: Movement, scrolling and focus
//! - `input`: Text input handling
//! - `command`: Command mode operations

mod command;
mod conversation;
mod input;
mod list;
mod navigation;

use crate::input::Action;

use super::App;
use super::dispatch::Command;

impl App {
    pub(crate) async fn handle_action(&mut self, action: Action) {
        match action {
            // Navigation
            Action::Up => self.move_up(),
            Action::Down => self.move_down(),
            Action::Top => self.move_to_top(),
            Action::Bottom => self.move_to_bottom(),
            Action::PageUp => self.move_page(-1),
            Action::PageDown => self.move_page(1),

            // List and chat
            Action::Open => {
                let index = self.state.list.cursor;
                if self.state.list.selected_email().is_some() {
                    self.dispatch(Command::SelectEmail { index }).await;
                }
            }
            Action::Send => self.dispatch(Command::SendMessage).await,
            Action::Fetch => self.dispatch(Command::FetchEmails).await,
            Action::FocusChat => self.focus_chat(),
            Action::Back => self.go_back(),
            Action::Quit => {} // Handled in event loop

            // Models
            Action::NextModel | Action::PrevModel => {
                if let Some(model) = self.cycle_model(action == Action::NextModel) {
                    self.dispatch(Command::SetModel(model)).await;
                }
            }

            // Command mode
            Action::Command => self.enter_command_mode(),
            Action::ExecuteCommand => self.execute_command().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::state::Focus;
    use crate::app::test_support::app;
    use crate::backend::{BackendCommand, EmailId, EmailSummary};
    use crate::input::Action;

    #[tokio::test]
    async fn test_open_on_empty_list_does_nothing() {
        let (mut app, _backend) = app();
        app.handle_action(Action::Open).await;
        assert!(app.state.chat.is_none());
        assert_eq!(app.state.focus, Focus::List);
    }

    #[tokio::test]
    async fn test_open_selects_card_under_cursor() {
        let (mut app, _backend) = app();
        app.state.list.show_emails(vec![
            EmailSummary {
                id: EmailId::Text("a".to_string()),
                subject: Some("First".to_string()),
                from: None,
                summary: None,
            },
            EmailSummary {
                id: EmailId::Text("b".to_string()),
                subject: None,
                from: None,
                summary: None,
            },
        ]);

        app.handle_action(Action::Down).await;
        app.handle_action(Action::Open).await;

        assert_eq!(app.state.list.active, Some(1));
        assert_eq!(app.state.chat.as_ref().unwrap().title, "Chat: No Subject");
        assert_eq!(
            app.session.selected().map(|s| s.id.clone()),
            Some(EmailId::Text("b".to_string()))
        );
    }

    #[tokio::test]
    async fn test_model_keys_cycle_configured_models() {
        let (mut app, mut backend) = app();
        app.handle_action(Action::NextModel).await;
        assert_eq!(app.state.model, "llama-3.3-70b");
        app.handle_action(Action::PrevModel).await;
        app.handle_action(Action::PrevModel).await;
        assert_eq!(app.state.model, "qwen-3-32b");

        app.handle_action(Action::Fetch).await;
        match backend.next_command() {
            Some(BackendCommand::FetchEmails { model, .. }) => assert_eq!(model, "qwen-3-32b"),
            other => panic!("expected fetch, got {:?}", other),
        }
    }
}
