//! Application state types
//!
//! Everything the UI draws lives here. The render thread receives clones of
//! `AppState`.

use chrono::{DateTime, Local};
use ratatui::layout::Rect;

use crate::backend::{EmailId, EmailSummary};
use crate::command::CommandResult;
use crate::constants::ERROR_TTL_SECS;

/// Which panel receives navigation keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    List,
    Chat,
}

/// Modal overlay state - only one can be active at a time
#[derive(Debug, Clone, Default)]
pub enum ModalState {
    #[default]
    None,
    Command {
        input: String,
        result: Option<CommandResult>,
    },
}

impl ModalState {
    pub fn is_command(&self) -> bool {
        matches!(self, Self::Command { .. })
    }

    /// Get command input if in command mode
    pub fn command_input(&self) -> Option<&str> {
        match self {
            Self::Command { input, .. } => Some(input),
            _ => None,
        }
    }

    /// Get command result if in command mode
    pub fn command_result(&self) -> Option<&CommandResult> {
        match self {
            Self::Command { result, .. } => result.as_ref(),
            _ => None,
        }
    }
}

/// The email list panel: one card per summary
#[derive(Debug, Clone, Default)]
pub struct EmailListState {
    pub emails: Vec<EmailSummary>,
    /// Card under the cursor
    pub cursor: usize,
    /// Card whose conversation is open (at most one)
    pub active: Option<usize>,
    pub loading: bool,
    /// Replaces the cards when the last fetch failed
    pub error: Option<String>,
    /// Whether any fetch has completed yet (distinguishes "no emails" from "not fetched")
    pub fetched: bool,
}

impl EmailListState {
    /// Drop the current cards and show the loading indicator
    pub fn begin_fetch(&mut self) {
        self.emails.clear();
        self.cursor = 0;
        self.active = None;
        self.error = None;
        self.loading = true;
    }

    pub fn show_emails(&mut self, emails: Vec<EmailSummary>) {
        self.emails = emails;
        self.cursor = 0;
        self.active = None;
        self.error = None;
        self.loading = false;
        self.fetched = true;
    }

    pub fn show_error(&mut self, message: impl ToString) {
        self.emails.clear();
        self.cursor = 0;
        self.active = None;
        self.error = Some(message.to_string());
        self.loading = false;
        self.fetched = true;
    }

    /// Mark exactly one card active, clearing any previous marker
    pub fn set_active(&mut self, index: usize) {
        if index < self.emails.len() {
            self.active = Some(index);
            self.cursor = index;
        }
    }

    pub fn selected_email(&self) -> Option<&EmailSummary> {
        self.emails.get(self.cursor)
    }

    pub fn move_by(&mut self, delta: isize) {
        if self.emails.is_empty() {
            return;
        }
        let max = self.emails.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }

    pub fn move_to_top(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_bottom(&mut self) {
        self.cursor = self.emails.len().saturating_sub(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleKind {
    User,
    Assistant,
    /// A failed exchange, shown in place of an answer
    Error,
}

/// Marker on a user bubble whose exchange did not complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleMark {
    Failed,
    /// A newer message was sent before this one was answered
    Superseded,
}

#[derive(Debug, Clone)]
pub struct ChatBubble {
    pub kind: BubbleKind,
    pub text: String,
    pub sent_at: DateTime<Local>,
    pub mark: Option<BubbleMark>,
}

impl ChatBubble {
    pub fn new(kind: BubbleKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            sent_at: Local::now(),
            mark: None,
        }
    }
}

/// The chat panel for the selected email.
///
/// Rebuilt from scratch on every selection, so nothing typed or shown for a
/// previous email carries over.
#[derive(Debug, Clone)]
pub struct ChatPanel {
    pub email_id: EmailId,
    pub title: String,
    pub bubbles: Vec<ChatBubble>,
    pub input: String,
    pub loading: bool,
    /// Lines scrolled back from the newest message (0 = pinned to bottom)
    pub scroll_back: usize,
}

impl ChatPanel {
    pub fn new(email_id: EmailId, subject: &str) -> Self {
        Self {
            email_id,
            title: format!("Chat: {}", subject),
            bubbles: Vec::new(),
            input: String::new(),
            loading: false,
            scroll_back: 0,
        }
    }

    /// Append a bubble and jump to the bottom. Returns its index.
    pub fn push(&mut self, bubble: ChatBubble) -> usize {
        self.bubbles.push(bubble);
        self.scroll_back = 0;
        self.bubbles.len() - 1
    }

    pub fn mark(&mut self, index: usize, mark: BubbleMark) {
        if let Some(bubble) = self.bubbles.get_mut(index) {
            bubble.mark = Some(mark);
        }
    }

    /// Scroll back in time, stopping once the oldest line is in view
    pub fn scroll_up(&mut self, lines: usize, limit: usize) {
        self.scroll_back = self.scroll_back.saturating_add(lines).min(limit);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }
}

/// Error and status message state
#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub error: Option<String>,
    pub error_time: Option<std::time::Instant>,
    pub message: String,
    /// Persists after error bar expires - shown as indicator in status bar
    pub has_unacknowledged_error: bool,
}

impl StatusState {
    pub fn set_error(&mut self, error: impl ToString) {
        self.error = Some(error.to_string());
        self.error_time = Some(std::time::Instant::now());
        self.has_unacknowledged_error = true;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        self.error_time = None;
    }

    /// Acknowledge the error indicator (clear the persistent flag)
    pub fn acknowledge_error(&mut self) {
        self.has_unacknowledged_error = false;
    }

    /// Clear error if TTL expired. Returns true if error was cleared.
    pub fn clear_error_if_expired(&mut self) -> bool {
        if let Some(time) = self.error_time
            && time.elapsed().as_secs() >= ERROR_TTL_SECS
        {
            self.clear_error();
            true
        } else {
            false
        }
    }

    pub fn set_message(&mut self, msg: impl ToString) {
        self.message = msg.to_string();
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub focus: Focus,
    pub list: EmailListState,
    /// None until the first email is selected
    pub chat: Option<ChatPanel>,
    /// Model that the next request will use
    pub model: String,
    pub backend_url: String,
    pub status: StatusState,
    pub modal: ModalState,
    /// Email list width in percent
    pub split_ratio: u16,
    /// Terminal size, tracked from resize events
    pub viewport: Rect,
}

impl AppState {
    /// Whether any request indicator is visible
    pub fn is_loading(&self) -> bool {
        self.list.loading || self.chat.as_ref().is_some_and(|c| c.loading)
    }

    // Delegate methods to StatusState
    pub fn set_error(&mut self, error: impl ToString) {
        self.status.set_error(error);
    }

    pub fn clear_error_if_expired(&mut self) -> bool {
        self.status.clear_error_if_expired()
    }

    pub fn acknowledge_error(&mut self) {
        self.status.acknowledge_error();
    }

    pub fn set_status(&mut self, msg: impl ToString) {
        self.status.set_message(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(id: i64) -> EmailSummary {
        EmailSummary {
            id: EmailId::from(id),
            subject: None,
            from: None,
            summary: None,
        }
    }

    #[test]
    fn test_begin_fetch_clears_previous_cards() {
        let mut list = EmailListState::default();
        list.show_emails(vec![email(1), email(2)]);
        list.set_active(1);

        list.begin_fetch();
        assert!(list.emails.is_empty());
        assert!(list.active.is_none());
        assert!(list.loading);
    }

    #[test]
    fn test_only_one_card_is_active() {
        let mut list = EmailListState::default();
        list.show_emails(vec![email(1), email(2), email(3)]);

        list.set_active(0);
        list.set_active(2);
        list.set_active(2);
        assert_eq!(list.active, Some(2));

        // Out of range selection is ignored
        list.set_active(9);
        assert_eq!(list.active, Some(2));
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut list = EmailListState::default();
        list.move_by(1);
        assert_eq!(list.cursor, 0);

        list.show_emails(vec![email(1), email(2), email(3)]);
        list.move_by(10);
        assert_eq!(list.cursor, 2);
        list.move_by(-10);
        assert_eq!(list.cursor, 0);
    }

    #[test]
    fn test_show_error_replaces_cards() {
        let mut list = EmailListState::default();
        list.begin_fetch();
        list.show_error("HTTP error! status: 500");

        assert!(!list.loading);
        assert!(list.emails.is_empty());
        assert_eq!(list.error.as_deref(), Some("HTTP error! status: 500"));
    }

    #[test]
    fn test_new_bubble_pins_chat_to_bottom() {
        let mut chat = ChatPanel::new(EmailId::from(1), "Hi");
        assert_eq!(chat.title, "Chat: Hi");

        chat.scroll_up(5, 10);
        assert_eq!(chat.scroll_back, 5);
        chat.scroll_up(50, 10);
        assert_eq!(chat.scroll_back, 10);
        chat.scroll_down(3);
        assert_eq!(chat.scroll_back, 7);

        let index = chat.push(ChatBubble::new(BubbleKind::User, "hello"));
        assert_eq!(index, 0);
        assert_eq!(chat.scroll_back, 0);

        chat.mark(index, BubbleMark::Failed);
        assert_eq!(chat.bubbles[0].mark, Some(BubbleMark::Failed));
    }

    #[test]
    fn test_error_expiry() {
        let mut status = StatusState::default();
        status.set_error("boom");
        assert!(!status.clear_error_if_expired());
        assert!(status.has_unacknowledged_error);

        status.error_time =
            Some(std::time::Instant::now() - std::time::Duration::from_secs(ERROR_TTL_SECS + 1));
        assert!(status.clear_error_if_expired());
        assert!(status.error.is_none());
        assert!(status.has_unacknowledged_error);
    }
}
