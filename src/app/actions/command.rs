//! Command mode operations (enter, execute, exit)

use crate::app::dispatch::Command;
use crate::app::state::ModalState;
use crate::command::{CommandResult, ParsedCommand, available_commands, parse_command};

use super::super::App;

impl App {
    pub(crate) fn enter_command_mode(&mut self) {
        self.state.modal = ModalState::Command {
            input: String::new(),
            result: None,
        };
    }

    pub(crate) async fn execute_command(&mut self) {
        let input = self
            .state
            .modal
            .command_input()
            .unwrap_or_default()
            .trim()
            .to_string();

        if input.is_empty() {
            self.exit_command_mode();
            return;
        }

        match parse_command(&input) {
            Some(ParsedCommand::Fetch) => {
                self.exit_command_mode();
                self.dispatch(Command::FetchEmails).await;
            }
            Some(ParsedCommand::Model(model)) => {
                self.exit_command_mode();
                self.dispatch(Command::SetModel(model)).await;
            }
            Some(ParsedCommand::Models) => {
                let result = CommandResult::ShowModels {
                    current: self.session.model().to_string(),
                    models: self.models.clone(),
                };
                self.show_command_result(result);
            }
            Some(ParsedCommand::Help) => {
                self.show_command_result(CommandResult::ShowHelp(available_commands()));
            }
            Some(ParsedCommand::Keys) => {
                let keybindings = self.bindings.all_bindings();
                self.show_command_result(CommandResult::ShowKeys(keybindings));
            }
            Some(ParsedCommand::Quit) => {
                self.exit_command_mode();
                self.should_quit = true;
            }
            None => {
                self.show_command_result(CommandResult::Error(format!(
                    "Unknown command: {}. Type :help for available commands.",
                    input
                )));
            }
        }
    }

    /// Keep the prompt open with `result` below an empty input line
    fn show_command_result(&mut self, result: CommandResult) {
        self.state.modal = ModalState::Command {
            input: String::new(),
            result: Some(result),
        };
    }

    pub(crate) fn exit_command_mode(&mut self) {
        self.state.modal = ModalState::None;
    }
}

#[cfg(test)]
mod tests {
    use crate::app::state::ModalState;
    use crate::app::test_support::app;
    use crate::backend::BackendCommand;
    use crate::command::CommandResult;

    fn type_command(app: &mut crate::app::App, text: &str) {
        app.enter_command_mode();
        for c in text.chars() {
            app.handle_char(c);
        }
    }

    #[tokio::test]
    async fn test_fetch_command_dispatches_fetch() {
        let (mut app, mut backend) = app();
        type_command(&mut app, "fetch");
        app.execute_command().await;

        assert!(matches!(app.state.modal, ModalState::None));
        assert!(matches!(
            backend.next_command(),
            Some(BackendCommand::FetchEmails { .. })
        ));
    }

    #[tokio::test]
    async fn test_model_command_sets_model() {
        let (mut app, _backend) = app();
        type_command(&mut app, "model qwen-3-32b");
        app.execute_command().await;
        assert_eq!(app.state.model, "qwen-3-32b");
        assert_eq!(app.session.model(), "qwen-3-32b");
    }

    #[tokio::test]
    async fn test_unknown_command_reports_error() {
        let (mut app, _backend) = app();
        type_command(&mut app, "frobnicate");
        app.execute_command().await;

        match app.state.modal.command_result() {
            Some(CommandResult::Error(msg)) => assert!(msg.starts_with("Unknown command: frobnicate")),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_quit_command_sets_flag() {
        let (mut app, _backend) = app();
        type_command(&mut app, "q");
        app.execute_command().await;
        assert!(app.should_quit);
    }
}
