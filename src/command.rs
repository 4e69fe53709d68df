//! Command types and parsing for vim-style command mode

use crate::input::KeybindingEntry;

/// Result of command execution
#[derive(Debug, Clone)]
pub enum CommandResult {
    Error(String),
    ShowHelp(Vec<CommandHelp>),
    ShowKeys(Vec<KeybindingEntry>),
    ShowModels { current: String, models: Vec<String> },
}

/// Help information for a command
#[derive(Debug, Clone)]
pub struct CommandHelp {
    pub name: &'static str,
    pub description: &'static str,
}

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Fetch,
    /// Switch to a model, taken verbatim
    Model(String),
    Models,
    Help,
    Keys,
    Quit,
}

/// Parse a command string into a ParsedCommand
pub fn parse_command(input: &str) -> Option<ParsedCommand> {
    let trimmed = input.trim();
    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (trimmed, ""),
    };

    match (name, arg) {
        ("fetch" | "f" | "refresh", "") => Some(ParsedCommand::Fetch),
        ("model" | "m", "") => Some(ParsedCommand::Models),
        ("model" | "m", model) => Some(ParsedCommand::Model(model.to_string())),
        ("models", "") => Some(ParsedCommand::Models),
        ("help" | "h" | "?", "") => Some(ParsedCommand::Help),
        ("keys" | "keybindings" | "bindings", "") => Some(ParsedCommand::Keys),
        ("q" | "quit", "") => Some(ParsedCommand::Quit),
        _ => None,
    }
}

/// Get all available commands for help display
pub fn available_commands() -> Vec<CommandHelp> {
    vec![
        CommandHelp {
            name: "fetch",
            description: "Fetch and summarize the latest emails",
        },
        CommandHelp {
            name: "help",
            description: "Show this help message",
        },
        CommandHelp {
            name: "keys",
            description: "Show all keybindings",
        },
        CommandHelp {
            name: "model <name>",
            description: "Use a model for summaries and chat",
        },
        CommandHelp {
            name: "models",
            description: "List the configured models",
        },
        CommandHelp {
            name: "quit",
            description: "Exit the application",
        },
    ]
}
