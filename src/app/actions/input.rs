//! Text input handling (chars, backspace)

use crate::app::state::{Focus, ModalState};

use super::super::App;

impl App {
    pub(crate) fn handle_char(&mut self, c: char) {
        // Handle command input
        if let ModalState::Command { input, result } = &mut self.state.modal {
            // Typing after a result starts a new command
            *result = None;
            input.push(c);
            return;
        }

        if self.state.focus == Focus::Chat
            && let Some(chat) = self.state.chat.as_mut()
        {
            chat.input.push(c);
        }
    }

    pub(crate) fn handle_backspace(&mut self) {
        if let ModalState::Command { input, .. } = &mut self.state.modal {
            // Backspace on an empty prompt closes it, like vim
            if input.pop().is_none() {
                self.exit_command_mode();
            }
            return;
        }

        if self.state.focus == Focus::Chat
            && let Some(chat) = self.state.chat.as_mut()
        {
            chat.input.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::state::{ChatPanel, Focus, ModalState};
    use crate::app::test_support::app;
    use crate::backend::EmailId;

    #[test]
    fn test_typing_goes_to_chat_input() {
        let (mut app, _backend) = app();
        // No panel yet: ignored
        app.handle_char('x');

        app.state.chat = Some(ChatPanel::new(EmailId::from(1), "Hi"));
        app.state.focus = Focus::Chat;
        for c in "hey".chars() {
            app.handle_char(c);
        }
        app.handle_backspace();
        assert_eq!(app.state.chat.as_ref().unwrap().input, "he");
    }

    #[test]
    fn test_backspace_on_empty_command_closes_it() {
        let (mut app, _backend) = app();
        app.state.modal = ModalState::Command {
            input: String::new(),
            result: None,
        };
        app.handle_char('f');
        assert_eq!(app.state.modal.command_input(), Some("f"));

        app.handle_backspace();
        assert!(app.state.modal.is_command());
        app.handle_backspace();
        assert!(!app.state.modal.is_command());
    }
}
