//! Chat panel: conversation about the selected email

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::status_bar::spinner_char;
use super::theme::{Theme, borders, symbols};
use super::widgets::{sanitize_text, truncate_string, wrap_text};
use crate::app::state::{BubbleKind, BubbleMark, ChatBubble, ChatPanel, Focus};

const INPUT_PLACEHOLDER: &str = "Ask a question...";

pub fn render_chat(frame: &mut Frame, area: Rect, chat: Option<&ChatPanel>, focus: Focus) {
    let Some(chat) = chat else {
        render_placeholder(frame, area);
        return;
    };
    let focused = focus == Focus::Chat;

    let [window_area, input_area] = chat_areas(area);

    let block = Block::default()
        .title(format!(
            " {} ",
            truncate_string(&sanitize_text(&chat.title), area.width.saturating_sub(4) as usize)
        ))
        .title_style(Theme::text_bold())
        .borders(Borders::ALL)
        .border_type(borders::panel())
        .border_style(Theme::border());
    let inner = block.inner(window_area);
    frame.render_widget(block, window_area);

    let lines = transcript_lines(chat, inner.width as usize);

    // Pinned to the newest line unless scrolled back
    let visible = inner.height as usize;
    let max_start = lines.len().saturating_sub(visible);
    let start = max_start.saturating_sub(chat.scroll_back);
    let shown: Vec<Line> = lines.into_iter().skip(start).take(visible).collect();
    frame.render_widget(Paragraph::new(shown), inner);

    render_input(frame, input_area, chat, focused);
}

/// Transcript window and input box
fn chat_areas(area: Rect) -> [Rect; 2] {
    Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).areas(area)
}

/// Every transcript line at `width`, oldest first
fn transcript_lines(chat: &ChatPanel, width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = chat
        .bubbles
        .iter()
        .flat_map(|bubble| bubble_lines(bubble, width))
        .collect();
    if chat.loading {
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", spinner_char()), Theme::text_accent()),
            Span::styled("Thinking...", Theme::text_muted()),
        ]));
    }
    lines
}

/// Lines hidden above the window when pinned to the bottom; `scroll_back`
/// past this shows nothing new
pub fn scroll_limit(chat: &ChatPanel, area: Rect) -> usize {
    let [window_area, _] = chat_areas(area);
    let inner = Block::default().borders(Borders::ALL).inner(window_area);
    transcript_lines(chat, inner.width as usize)
        .len()
        .saturating_sub(inner.height as usize)
}

fn render_placeholder(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Chat ")
        .borders(Borders::ALL)
        .border_type(borders::panel())
        .border_style(Theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new("Select an email to start a conversation.").style(Theme::text_muted()),
        inner,
    );
}

/// Header line (speaker, time, marker) followed by the wrapped text
fn bubble_lines(bubble: &ChatBubble, width: usize) -> Vec<Line<'static>> {
    let (speaker, speaker_style) = match bubble.kind {
        BubbleKind::User => ("You", Theme::bubble_user()),
        BubbleKind::Assistant => ("Assistant", Theme::bubble_assistant()),
        BubbleKind::Error => ("Error", Theme::bubble_error()),
    };

    let mut header = vec![
        Span::styled(speaker, speaker_style),
        Span::styled(
            format!(" {}", bubble.sent_at.format("%H:%M")),
            Theme::bubble_timestamp(),
        ),
    ];
    match bubble.mark {
        Some(BubbleMark::Failed) => {
            header.push(Span::styled(
                format!(" {} not sent", symbols::FAILED),
                Theme::bubble_error(),
            ));
        }
        Some(BubbleMark::Superseded) => {
            header.push(Span::styled(
                format!(" {} superseded", symbols::SUPERSEDED),
                Theme::text_muted(),
            ));
        }
        None => {}
    }

    let body_style = match (bubble.kind, bubble.mark) {
        (BubbleKind::Error, _) => Theme::text_error(),
        (_, Some(_)) => Theme::bubble_abandoned(),
        _ => Theme::text(),
    };
    let text = match bubble.kind {
        BubbleKind::Error => format!("Error: {}", bubble.text),
        _ => bubble.text.clone(),
    };

    let mut lines = vec![Line::from(header)];
    lines.extend(
        wrap_text(&sanitize_text(&text), width.saturating_sub(2))
            .into_iter()
            .map(|l| Line::from(Span::styled(format!("  {}", l), body_style))),
    );
    lines.push(Line::default());
    lines
}

fn render_input(frame: &mut Frame, area: Rect, chat: &ChatPanel, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if focused {
            borders::focused()
        } else {
            borders::panel()
        })
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let prompt_style = if focused {
        Theme::input_highlight()
    } else {
        Theme::text_muted()
    };
    // Keep the end of long input visible
    let room = (inner.width as usize).saturating_sub(symbols::PROMPT.width() + 1);
    let line = if chat.input.is_empty() {
        Line::from(vec![
            Span::styled(symbols::PROMPT, prompt_style),
            Span::styled(INPUT_PLACEHOLDER, Theme::text_muted()),
        ])
    } else {
        Line::from(vec![
            Span::styled(symbols::PROMPT, prompt_style),
            Span::styled(tail_to_width(&chat.input, room), Theme::text()),
        ])
    };
    frame.render_widget(Paragraph::new(line), inner);

    if focused {
        let typed = tail_to_width(&chat.input, room).width();
        let x = inner.x + (symbols::PROMPT.width() + typed) as u16;
        frame.set_cursor_position((x.min(inner.right().saturating_sub(1)), inner.y));
    }
}

/// The longest suffix of `s` that fits in `width` columns
fn tail_to_width(s: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut used = 0;
    let mut start = s.len();
    for (i, c) in s.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = i;
    }
    s[start..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::EmailId;
    use ratatui::{Terminal, backend::TestBackend};

    fn render_to_text(chat: Option<&ChatPanel>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| render_chat(f, f.area(), chat, Focus::Chat))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_no_selection_shows_placeholder() {
        let text = render_to_text(None, 50, 10);
        assert!(text.contains("Select an email"));
    }

    #[test]
    fn test_new_panel_has_title_and_empty_window() {
        let chat = ChatPanel::new(EmailId::from(1), "Hi");
        let text = render_to_text(Some(&chat), 50, 12);
        assert!(text.contains("Chat: Hi"));
        assert!(text.contains(INPUT_PLACEHOLDER));
        assert!(!text.contains("You"));
    }

    #[test]
    fn test_bubbles_and_failure_marker() {
        let mut chat = ChatPanel::new(EmailId::from(1), "Hi");
        let index = chat.push(ChatBubble::new(BubbleKind::User, "What is it?"));
        chat.mark(index, BubbleMark::Failed);
        chat.push(ChatBubble::new(BubbleKind::Error, "Server error: 500"));

        let text = render_to_text(Some(&chat), 60, 16);
        assert!(text.contains("What is it?"));
        assert!(text.contains("not sent"));
        assert!(text.contains("Error: Server error: 500"));
    }

    #[test]
    fn test_loading_indicator() {
        let mut chat = ChatPanel::new(EmailId::from(1), "Hi");
        chat.push(ChatBubble::new(BubbleKind::User, "hello"));
        chat.loading = true;

        let text = render_to_text(Some(&chat), 50, 12);
        assert!(text.contains("Thinking..."));
    }

    #[test]
    fn test_scroll_limit_counts_wrapped_lines() {
        let mut chat = ChatPanel::new(EmailId::from(1), "Hi");
        for i in 0..10 {
            chat.push(ChatBubble::new(BubbleKind::User, format!("question {}", i)));
        }
        // 10 bubbles of 3 lines in a 5-line window
        assert_eq!(scroll_limit(&chat, Rect::new(0, 0, 60, 10)), 25);

        let mut short = ChatPanel::new(EmailId::from(1), "Hi");
        short.push(ChatBubble::new(BubbleKind::User, "hello"));
        assert_eq!(scroll_limit(&short, Rect::new(0, 0, 60, 10)), 0);

        // Narrower window wraps the same text onto more lines
        let mut long = ChatPanel::new(EmailId::from(1), "Hi");
        long.push(ChatBubble::new(BubbleKind::Assistant, "one two three four five six"));
        let wide = scroll_limit(&long, Rect::new(0, 0, 60, 6));
        let narrow = scroll_limit(&long, Rect::new(0, 0, 12, 6));
        assert!(narrow > wide);
    }

    #[test]
    fn test_tail_to_width() {
        assert_eq!(tail_to_width("hello world", 5), "world");
        assert_eq!(tail_to_width("hi", 5), "hi");
        assert_eq!(tail_to_width("", 5), "");
    }
}
