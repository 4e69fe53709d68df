//! Email list panel: one card per summary, or the loading / error state

use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use unicode_width::UnicodeWidthStr;

use super::status_bar::spinner_char;
use super::theme::{Theme, borders, symbols, with_selection_bg};
use super::widgets::{sanitize_text, truncate_string, wrap_text};
use crate::app::state::{EmailListState, Focus};
use crate::backend::EmailSummary;
use crate::constants::{CARD_SUMMARY_LINES, SCROLL_TARGET_FRACTION};

pub fn render_email_list(frame: &mut Frame, area: Rect, list: &EmailListState, focus: Focus) {
    let focused = focus == Focus::List;
    let title = if list.emails.is_empty() {
        " Emails ".to_string()
    } else {
        format!(" Emails ({}) ", list.emails.len())
    };
    let block = Block::default()
        .title(title)
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

    if list.loading {
        let line = Line::from(vec![
            Span::styled(format!("{} ", spinner_char()), Theme::text_accent()),
            Span::styled("Fetching and summarizing emails...", Theme::text_muted()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
        return;
    }

    if let Some(ref error) = list.error {
        let line = Line::from(vec![
            Span::styled("Error: ", Theme::text_error().add_modifier(Modifier::BOLD)),
            Span::styled(sanitize_text(error), Theme::text_error()),
        ]);
        frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: false }), inner);
        return;
    }

    if list.emails.is_empty() {
        let hint = if list.fetched {
            "No emails returned."
        } else {
            "Press f to fetch and summarize your latest emails."
        };
        frame.render_widget(
            Paragraph::new(hint)
                .style(Theme::text_muted())
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }

    let width = inner.width as usize;
    let cards: Vec<Vec<Line>> = list
        .emails
        .iter()
        .enumerate()
        .map(|(i, email)| card_lines(email, width, i == list.cursor, list.active == Some(i)))
        .collect();

    let first = first_visible_card(&cards, list.cursor, inner.height as usize);
    let lines: Vec<Line> = cards.into_iter().skip(first).flatten().collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Lines of one card: subject, sender, summary, then a blank separator
fn card_lines(email: &EmailSummary, width: usize, selected: bool, active: bool) -> Vec<Line<'static>> {
    // Two columns are taken by the active marker and a space
    let text_width = width.saturating_sub(2).max(1);
    let (marker, marker_style) = if active {
        (symbols::ACTIVE, Theme::card_active_marker())
    } else {
        (symbols::INACTIVE, Theme::text())
    };
    let row = |text: String, style| {
        let pad = text_width.saturating_sub(text.width());
        Line::from(vec![
            Span::styled(marker, with_selection_bg(marker_style, selected)),
            Span::styled(" ", with_selection_bg(Theme::text(), selected)),
            Span::styled(format!("{}{}", text, " ".repeat(pad)), with_selection_bg(style, selected)),
        ])
    };

    let subject = truncate_string(&sanitize_text(email.display_subject()), text_width);
    let from = truncate_string(
        &format!("From: {}", sanitize_text(email.display_from())),
        text_width,
    );

    let mut lines = vec![
        row(subject, Theme::text_bold()),
        row(from, Theme::text_secondary()),
    ];

    let mut summary = wrap_text(&sanitize_text(email.display_summary()), text_width);
    if summary.len() > CARD_SUMMARY_LINES {
        summary.truncate(CARD_SUMMARY_LINES);
        if let Some(last) = summary.last_mut() {
            *last = truncate_string(&format!("{}...", last), text_width);
        }
    }
    lines.extend(summary.into_iter().map(|l| row(l, Theme::text_muted())));
    lines.push(Line::default());
    lines
}

/// Index of the first card to draw so the cursor card sits near the top
/// quarter of the panel
fn first_visible_card(cards: &[Vec<Line>], cursor: usize, visible_lines: usize) -> usize {
    let total: usize = cards.iter().map(Vec::len).sum();
    if total <= visible_lines {
        return 0;
    }

    let target = visible_lines / SCROLL_TARGET_FRACTION;
    let mut first = cursor.min(cards.len().saturating_sub(1));
    let mut above = 0;
    while first > 0 && above + cards[first - 1].len() <= target {
        above += cards[first - 1].len();
        first -= 1;
    }

    // Don't leave empty space below the last card
    while first > 0 {
        let remaining: usize = cards[first - 1..].iter().map(Vec::len).sum();
        if remaining > visible_lines {
            break;
        }
        first -= 1;
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::EmailId;
    use ratatui::{Terminal, backend::TestBackend};

    fn render_to_text(list: &EmailListState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| render_email_list(f, f.area(), list, Focus::List))
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

    fn email(id: i64, subject: Option<&str>) -> EmailSummary {
        EmailSummary {
            id: EmailId::from(id),
            subject: subject.map(str::to_string),
            from: Some("a@b.com".to_string()),
            summary: Some("Short summary".to_string()),
        }
    }

    #[test]
    fn test_one_card_per_email_with_placeholder_title() {
        let mut list = EmailListState::default();
        list.show_emails(vec![
            email(1, Some("Hi")),
            email(2, None),
            email(3, Some("Invoice")),
        ]);

        let text = render_to_text(&list, 60, 30);
        assert_eq!(text.matches("From: a@b.com").count(), 3);
        assert!(text.contains("Hi"));
        assert!(text.contains("No Subject"));
        assert!(text.contains("Invoice"));
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let mut list = EmailListState::default();
        list.show_emails(vec![EmailSummary {
            id: EmailId::Text("x".to_string()),
            subject: None,
            from: None,
            summary: None,
        }]);

        let text = render_to_text(&list, 60, 12);
        assert!(text.contains("From: Unknown Sender"));
        assert!(text.contains("No summary available."));
    }

    #[test]
    fn test_error_replaces_cards() {
        let mut list = EmailListState::default();
        list.show_error("no mail configured");

        let text = render_to_text(&list, 60, 10);
        assert!(text.contains("Error: no mail configured"));
        assert!(!text.contains("From:"));
    }

    #[test]
    fn test_cursor_card_stays_visible() {
        let mut list = EmailListState::default();
        list.show_emails((1..=20).map(|i| email(i, Some(&format!("Subject {}", i)))).collect());
        list.move_to_bottom();

        let text = render_to_text(&list, 60, 15);
        assert!(text.contains("Subject 20"));
        assert!(!text.contains("Subject 1 "));
    }

    #[test]
    fn test_first_visible_card_targets_top_quarter() {
        let card = || vec![Line::default(); 4];
        let cards: Vec<Vec<Line>> = (0..10).map(|_| card()).collect();

        assert_eq!(first_visible_card(&cards, 0, 20), 0);
        // Target is 5 lines above: one whole card fits
        assert_eq!(first_visible_card(&cards, 5, 20), 4);
        // Near the end the panel stays full
        assert_eq!(first_visible_card(&cards, 9, 20), 5);
    }
}
