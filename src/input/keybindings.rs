use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::config::KeybindingMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Top,
    Bottom,
    PageUp,
    PageDown,

    // Actions
    Open,
    Back,
    Quit,
    Fetch,
    NextModel,
    PrevModel,
    FocusChat,

    // Command mode
    Command,
    ExecuteCommand,

    // Chat
    Send,
}

pub struct KeyBindings {
    bindings: HashMap<KeyEvent, Action>,
}

/// A displayable keybinding entry
#[derive(Debug, Clone)]
pub struct KeybindingEntry {
    pub key: String,
    pub description: String,
    pub category: &'static str,
}

impl KeyBindings {
    pub fn new(mode: &KeybindingMode) -> Self {
        let bindings = match mode {
            KeybindingMode::Vim => Self::vim_bindings(),
            KeybindingMode::Arrows => Self::arrow_bindings(),
        };
        Self { bindings }
    }

    pub fn get(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings.get(event).copied()
    }

    /// Get all keybindings as displayable entries grouped by category
    pub fn all_bindings(&self) -> Vec<KeybindingEntry> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .map(|(event, action)| KeybindingEntry {
                key: format_key_event(event),
                description: action_description(action).to_string(),
                category: action_category(action),
            })
            .collect();

        entries.sort_by(|a, b| {
            category_order(a.category)
                .cmp(&category_order(b.category))
                .then_with(|| a.description.cmp(&b.description))
                .then_with(|| a.key.cmp(&b.key))
        });
        entries
    }

    fn vim_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = HashMap::new();

        // Navigation
        map.insert(key('j'), Action::Down);
        map.insert(key('k'), Action::Up);
        map.insert(key_code(KeyCode::Down), Action::Down);
        map.insert(key_code(KeyCode::Up), Action::Up);
        map.insert(key('g'), Action::Top);
        map.insert(shift_key('G'), Action::Bottom);
        map.insert(ctrl_key('d'), Action::PageDown);
        map.insert(ctrl_key('u'), Action::PageUp);

        // Actions
        map.insert(key_code(KeyCode::Enter), Action::Open);
        map.insert(key('q'), Action::Quit);
        map.insert(ctrl_key('c'), Action::Quit);
        map.insert(key_code(KeyCode::Esc), Action::Back);
        map.insert(key('f'), Action::Fetch);
        map.insert(ctrl_key('r'), Action::Fetch);
        map.insert(key('m'), Action::NextModel);
        map.insert(shift_key('M'), Action::PrevModel);
        map.insert(key('i'), Action::FocusChat);
        map.insert(key_code(KeyCode::Tab), Action::FocusChat);
        map.insert(key(':'), Action::Command);

        map
    }

    fn arrow_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = HashMap::new();

        // Navigation
        map.insert(key_code(KeyCode::Down), Action::Down);
        map.insert(key_code(KeyCode::Up), Action::Up);
        map.insert(key_code(KeyCode::Home), Action::Top);
        map.insert(key_code(KeyCode::End), Action::Bottom);
        map.insert(key_code(KeyCode::PageDown), Action::PageDown);
        map.insert(key_code(KeyCode::PageUp), Action::PageUp);

        // Actions
        map.insert(key_code(KeyCode::Enter), Action::Open);
        map.insert(ctrl_key('q'), Action::Quit);
        map.insert(ctrl_key('c'), Action::Quit);
        map.insert(key_code(KeyCode::Esc), Action::Back);
        map.insert(key_code(KeyCode::F(5)), Action::Fetch);
        map.insert(ctrl_key('r'), Action::Fetch);
        map.insert(ctrl_key('n'), Action::NextModel);
        map.insert(ctrl_key('p'), Action::PrevModel);
        map.insert(key_code(KeyCode::Tab), Action::FocusChat);
        map.insert(key(':'), Action::Command);

        map
    }
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn shift_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT)
}

fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Format a key event for display
fn format_key_event(event: &KeyEvent) -> String {
    let key = match event.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        other => format!("{:?}", other),
    };

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        format!("Ctrl+{}", key)
    } else {
        key
    }
}

fn action_description(action: &Action) -> &'static str {
    match action {
        Action::Up => "Move up / scroll chat up",
        Action::Down => "Move down / scroll chat down",
        Action::Top => "Go to first email",
        Action::Bottom => "Go to last email",
        Action::PageUp => "Page up",
        Action::PageDown => "Page down",
        Action::Open => "Chat about email",
        Action::Back => "Go back / close",
        Action::Quit => "Quit",
        Action::Fetch => "Fetch and summarize emails",
        Action::NextModel => "Next model",
        Action::PrevModel => "Previous model",
        Action::FocusChat => "Switch focus to chat",
        Action::Command => "Enter command mode",
        Action::ExecuteCommand => "Execute command",
        Action::Send => "Send message",
    }
}

fn action_category(action: &Action) -> &'static str {
    match action {
        Action::Up
        | Action::Down
        | Action::Top
        | Action::Bottom
        | Action::PageUp
        | Action::PageDown => "Navigation",

        Action::Open
        | Action::Back
        | Action::Quit
        | Action::Fetch
        | Action::FocusChat => "Actions",

        Action::NextModel | Action::PrevModel => "Models",

        Action::Command | Action::ExecuteCommand => "Commands",

        Action::Send => "Chat",
    }
}

fn category_order(category: &str) -> u8 {
    match category {
        "Navigation" => 0,
        "Actions" => 1,
        "Models" => 2,
        "Chat" => 3,
        "Commands" => 4,
        _ => 99,
    }
}
