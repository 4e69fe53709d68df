//! Root layout: status bar, email list | chat split, hint/error bar, command line

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::chat::{render_chat, scroll_limit};
use super::components::centered_rect_constrained;
use super::email_list::render_email_list;
use super::status_bar::{StatusInfo, status_bar};
use super::theme::{Theme, borders};
use super::widgets::{error_bar, help_bar};
use crate::app::state::{AppState, Focus};
use crate::command::{CommandHelp, CommandResult};
use crate::input::KeybindingEntry;

/// Status bar, email list, chat and bottom bar areas
fn panel_areas(area: Rect, split_ratio: u16) -> [Rect; 4] {
    let [status_area, main_area, bottom_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(area);

    let ratio = split_ratio.clamp(1, 99);
    let [list_area, chat_area] = Layout::horizontal([
        Constraint::Percentage(ratio),
        Constraint::Percentage(100 - ratio),
    ])
    .areas(main_area);

    [status_area, list_area, chat_area, bottom_area]
}

/// How far the chat can scroll back on the current terminal
pub fn chat_scroll_limit(state: &AppState) -> usize {
    let Some(chat) = state.chat.as_ref() else {
        return 0;
    };
    let [_, _, chat_area, _] = panel_areas(state.viewport, state.split_ratio);
    scroll_limit(chat, chat_area)
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let [status_area, list_area, chat_area, bottom_area] =
        panel_areas(frame.area(), state.split_ratio);
    let main_area = list_area.union(chat_area);

    status_bar(
        frame,
        status_area,
        &StatusInfo {
            model: &state.model,
            backend_url: &state.backend_url,
            loading: state.is_loading(),
            email_count: state.list.emails.len(),
            status_message: &state.status.message,
            has_error: state.status.has_unacknowledged_error,
        },
    );

    render_email_list(frame, list_area, &state.list, state.focus);
    render_chat(frame, chat_area, state.chat.as_ref(), state.focus);

    if state.modal.is_command() {
        render_command_bar(frame, bottom_area, state);
        if let Some(result) = state.modal.command_result() {
            render_result_popup(frame, main_area, result);
        }
    } else if let Some(ref error) = state.status.error {
        error_bar(frame, bottom_area, error);
    } else {
        help_bar(frame, bottom_area, &hints(state));
    }
}

fn hints(state: &AppState) -> Vec<(&'static str, &'static str)> {
    if state.focus == Focus::Chat && state.chat.is_some() {
        vec![
            ("Enter", "send"),
            ("Esc", "back to list"),
            ("↑↓", "scroll"),
            ("Ctrl+r", "fetch"),
            ("Ctrl+c", "quit"),
        ]
    } else {
        vec![
            ("Enter", "chat"),
            ("j/k", "move"),
            ("f", "fetch"),
            ("m", "model"),
            ("Tab", "focus chat"),
            (":", "command"),
            ("q", "quit"),
        ]
    }
}

fn render_command_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let input = state.modal.command_input().unwrap_or("");

    // Errors show inline; lists get a popup
    let line = match state.modal.command_result() {
        Some(CommandResult::Error(msg)) if input.is_empty() => {
            Line::from(Span::styled(format!(" {} ", msg), Theme::error_bar()))
        }
        _ => Line::from(vec![
            Span::styled(" :", Theme::input_highlight()),
            Span::styled(format!("{}│", input), Theme::status_bar()),
        ]),
    };
    frame.render_widget(Paragraph::new(line).style(Theme::status_bar()), area);
}

fn render_result_popup(frame: &mut Frame, area: Rect, result: &CommandResult) {
    let (title, lines) = match result {
        CommandResult::ShowHelp(commands) => (" Commands ", command_lines(commands)),
        CommandResult::ShowKeys(keys) => (" Keys ", key_lines(keys)),
        CommandResult::ShowModels { current, models } => (" Models ", model_lines(current, models)),
        CommandResult::Error(_) => return,
    };

    let height = (lines.len() as u16).saturating_add(2);
    let popup = centered_rect_constrained(area, 36, 60, 5, height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(title)
        .title_bottom(" any key to close ")
        .borders(Borders::ALL)
        .border_type(borders::focused())
        .border_style(Theme::border_focused());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    frame.render_widget(Paragraph::new(lines), inner);
}

fn command_lines(commands: &[CommandHelp]) -> Vec<Line<'static>> {
    commands
        .iter()
        .map(|cmd| {
            Line::from(vec![
                Span::styled(format!("  :{:<14}", cmd.name), Theme::text_accent()),
                Span::styled(cmd.description, Theme::text()),
            ])
        })
        .collect()
}

fn key_lines(keys: &[KeybindingEntry]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current_category: Option<&str> = None;

    for entry in keys {
        if current_category != Some(entry.category) {
            if current_category.is_some() {
                lines.push(Line::default());
            }
            lines.push(Line::from(Span::styled(
                format!("── {} ", entry.category),
                Theme::text_secondary().add_modifier(Modifier::BOLD),
            )));
            current_category = Some(entry.category);
        }
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<10}", entry.key), Theme::text_accent()),
            Span::styled(entry.description.clone(), Theme::text()),
        ]));
    }
    lines
}

fn model_lines(current: &str, models: &[String]) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = models
        .iter()
        .map(|model| {
            if model == current {
                Line::from(Span::styled(format!("● {}", model), Theme::text_accent()))
            } else {
                Line::from(Span::styled(format!("  {}", model), Theme::text()))
            }
        })
        .collect();

    if !models.iter().any(|m| m == current) {
        lines.push(Line::from(Span::styled(
            format!("● {} (custom)", current),
            Theme::text_accent(),
        )));
    }
    lines
}
