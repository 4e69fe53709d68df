use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::keybindings::{Action, KeyBindings};
use crate::app::state::{AppState, Focus};

pub enum InputResult {
    Continue,
    Quit,
    Action(Action),
    Char(char),
    Backspace,
}

pub fn handle_input(event: Event, state: &AppState, bindings: &KeyBindings) -> InputResult {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            handle_key(key_event, state, bindings)
        }
        _ => InputResult::Continue,
    }
}

fn handle_key(key: KeyEvent, state: &AppState, bindings: &KeyBindings) -> InputResult {
    // Command line takes every key while open
    if state.modal.is_command() {
        return handle_command_input(key, state);
    }

    // Typing into the chat input
    if is_chat_input_mode(state) {
        return handle_chat_input(key, bindings);
    }

    // Check for mapped action
    if let Some(action) = bindings.get(&key) {
        if action == Action::Quit {
            return InputResult::Quit;
        }
        return InputResult::Action(action);
    }

    InputResult::Continue
}

fn is_chat_input_mode(state: &AppState) -> bool {
    state.focus == Focus::Chat && state.chat.is_some()
}

fn handle_chat_input(key: KeyEvent, bindings: &KeyBindings) -> InputResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Control chords keep their global meaning (quit, fetch, model cycling)
    if ctrl && let Some(action) = bindings.get(&key) {
        return match action {
            Action::Quit => InputResult::Quit,
            Action::Fetch | Action::NextModel | Action::PrevModel => InputResult::Action(action),
            _ => InputResult::Continue,
        };
    }

    match key.code {
        KeyCode::Enter => InputResult::Action(Action::Send),
        KeyCode::Esc | KeyCode::Tab => InputResult::Action(Action::Back),
        KeyCode::Up => InputResult::Action(Action::Up),
        KeyCode::Down => InputResult::Action(Action::Down),
        KeyCode::PageUp => InputResult::Action(Action::PageUp),
        KeyCode::PageDown => InputResult::Action(Action::PageDown),
        KeyCode::Backspace => InputResult::Backspace,
        KeyCode::Char(c) if !ctrl => InputResult::Char(c),
        _ => InputResult::Continue,
    }
}

fn handle_command_input(key: KeyEvent, state: &AppState) -> InputResult {
    // A result is on screen: any key dismisses it
    if state.modal.command_result().is_some() && state.modal.command_input() == Some("") {
        return match key.code {
            KeyCode::Char(c) => InputResult::Char(c),
            _ => InputResult::Action(Action::Back),
        };
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputResult::Action(Action::Back)
        }
        KeyCode::Char(c) => InputResult::Char(c),
        KeyCode::Backspace => InputResult::Backspace,
        KeyCode::Enter => InputResult::Action(Action::ExecuteCommand),
        KeyCode::Esc => InputResult::Action(Action::Back),
        _ => InputResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{ChatPanel, ModalState};
    use crate::backend::EmailId;
    use crate::config::KeybindingMode;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn chat_state() -> AppState {
        AppState {
            focus: Focus::Chat,
            chat: Some(ChatPanel::new(EmailId::from(1), "Hi")),
            ..Default::default()
        }
    }

    #[test]
    fn test_quit_action() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let state = AppState::default();

        let result = handle_key(press(KeyCode::Char('q')), &state, &bindings);

        assert!(matches!(result, InputResult::Quit));
    }

    #[test]
    fn test_chat_focus_types_letters() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let state = chat_state();

        // 'q' is text while typing, not quit
        let result = handle_key(press(KeyCode::Char('q')), &state, &bindings);
        assert!(matches!(result, InputResult::Char('q')));

        let result = handle_key(press(KeyCode::Enter), &state, &bindings);
        assert!(matches!(result, InputResult::Action(Action::Send)));

        let result = handle_key(press(KeyCode::Esc), &state, &bindings);
        assert!(matches!(result, InputResult::Action(Action::Back)));
    }

    #[test]
    fn test_ctrl_c_quits_from_chat() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let state = chat_state();

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(
            handle_key(key, &state, &bindings),
            InputResult::Quit
        ));
    }

    #[test]
    fn test_chat_focus_without_panel_uses_bindings() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let state = AppState {
            focus: Focus::Chat,
            ..Default::default()
        };

        let result = handle_key(press(KeyCode::Char('f')), &state, &bindings);
        assert!(matches!(result, InputResult::Action(Action::Fetch)));
    }

    #[test]
    fn test_command_mode_input() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let state = AppState {
            modal: ModalState::Command {
                input: "fet".to_string(),
                result: None,
            },
            ..Default::default()
        };

        assert!(matches!(
            handle_key(press(KeyCode::Char('q')), &state, &bindings),
            InputResult::Char('q')
        ));
        assert!(matches!(
            handle_key(press(KeyCode::Enter), &state, &bindings),
            InputResult::Action(Action::ExecuteCommand)
        ));
        assert!(matches!(
            handle_key(press(KeyCode::Backspace), &state, &bindings),
            InputResult::Backspace
        ));
    }
}
