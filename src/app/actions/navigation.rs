//! Navigation actions (movement, scrolling, focus)

use crate::app::state::Focus;
use crate::ui::chat_scroll_limit;

use super::super::App;

const PAGE_SIZE: usize = 10;

impl App {
    /// Whether movement keys scroll the chat rather than the list
    fn chat_has_focus(&self) -> bool {
        self.state.focus == Focus::Chat && self.state.chat.is_some()
    }

    pub(crate) fn move_up(&mut self) {
        self.move_by(-1);
    }

    pub(crate) fn move_down(&mut self) {
        self.move_by(1);
    }

    pub(crate) fn move_page(&mut self, pages: isize) {
        self.move_by(pages * PAGE_SIZE as isize);
    }

    fn move_by(&mut self, delta: isize) {
        if self.chat_has_focus() {
            let limit = chat_scroll_limit(&self.state);
            if let Some(chat) = self.state.chat.as_mut() {
                // Up scrolls back in time
                if delta < 0 {
                    chat.scroll_up(delta.unsigned_abs(), limit);
                } else {
                    chat.scroll_down(delta.unsigned_abs());
                }
            }
            return;
        }
        self.state.list.move_by(delta);
    }

    pub(crate) fn move_to_top(&mut self) {
        self.state.list.move_to_top();
    }

    pub(crate) fn move_to_bottom(&mut self) {
        self.state.list.move_to_bottom();
    }

    pub(crate) fn focus_chat(&mut self) {
        if self.state.chat.is_some() {
            self.state.focus = Focus::Chat;
        } else {
            self.state.set_status("Select an email to start a conversation");
        }
    }

    pub(crate) fn go_back(&mut self) {
        if self.state.modal.is_command() {
            self.exit_command_mode();
        } else if self.state.focus == Focus::Chat {
            self.state.focus = Focus::List;
        }
    }
}
