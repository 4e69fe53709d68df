//! Status bar: request indicator, model, status message and backend

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use super::theme::{Theme, symbols};
use super::widgets::truncate_string;
use crate::constants::SPINNER_FRAME_MS;

/// Status bar info for rendering
pub struct StatusInfo<'a> {
    pub model: &'a str,
    pub backend_url: &'a str,
    pub loading: bool,
    pub email_count: usize,
    pub status_message: &'a str,
    /// Whether there's an unacknowledged error (show indicator)
    pub has_error: bool,
}

pub fn status_bar(frame: &mut Frame, area: Rect, info: &StatusInfo) {
    let style = Theme::status_bar();
    let width = area.width as usize;

    let (indicator, indicator_style) = if info.loading {
        (format!(" {} ", spinner_char()), Theme::status_busy())
    } else {
        (format!(" {} ", symbols::IDLE), Theme::status_idle())
    };
    let error_indicator = if info.has_error { "! " } else { "" };
    let model = format!("{} ", info.model);
    let count = format!("│ {} emails ", info.email_count);

    let left_width =
        indicator.width() + error_indicator.width() + model.width() + count.width();

    // The backend URL always shows; the status message takes what is left
    let backend = format!(" {} ", info.backend_url);
    let room = width.saturating_sub(left_width + backend.width() + 2);
    let status = if info.status_message.is_empty() || room < 4 {
        String::new()
    } else {
        format!("{} │", truncate_string(info.status_message, room.saturating_sub(2)))
    };

    let padding_width = width.saturating_sub(left_width + status.width() + backend.width());

    let mut spans = vec![Span::styled(indicator, indicator_style)];
    if info.has_error {
        spans.push(Span::styled(error_indicator, Theme::status_error()));
    }
    spans.extend([
        Span::styled(model, Theme::status_model()),
        Span::styled(count, style),
        Span::styled(" ".repeat(padding_width), style),
        Span::styled(status, Theme::status_info()),
        Span::styled(backend, Theme::status_info()),
    ]);

    frame.render_widget(Paragraph::new(Line::from(spans)).style(style), area);
}

/// Get an animated spinner character for loading states
pub fn spinner_char() -> char {
    const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();

    SPINNER[(millis / SPINNER_FRAME_MS) as usize % SPINNER.len()]
}
