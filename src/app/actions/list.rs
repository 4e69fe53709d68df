//! Email list: fetching summaries and selecting a card

use crate::backend::{BackendCommand, BackendError, EmailSummary};

use super::super::App;

impl App {
    /// Clear the list and request a fresh batch of summaries
    pub(crate) async fn fetch_emails(&mut self) {
        let generation = self.requests.next_list();
        let model = self.session.model().to_string();

        // The previous cards are gone before the request leaves
        self.state.list.begin_fetch();
        self.state.set_status(format!("Fetching emails with {}...", model));

        if !self
            .send_backend(BackendCommand::FetchEmails { generation, model })
            .await
        {
            self.state.list.show_error("backend worker stopped");
        }
    }

    /// Apply a completed fetch if it is still the latest one
    pub(crate) fn apply_fetched_emails(
        &mut self,
        generation: u64,
        result: Result<Vec<EmailSummary>, BackendError>,
    ) {
        if generation != self.requests.list {
            tracing::debug!(
                "Dropping stale email fetch {} (latest is {})",
                generation,
                self.requests.list
            );
            return;
        }

        match result {
            Ok(emails) => {
                tracing::info!("Fetched {} email summaries", emails.len());
                self.state.set_status(format!("{} emails", emails.len()));
                self.state.list.show_emails(emails);
                // Point the active marker back at the open conversation, if its card came back
                if let Some(selected) = self.session.selected()
                    && let Some(index) =
                        self.state.list.emails.iter().position(|e| e.id == selected.id)
                {
                    self.state.list.set_active(index);
                }
            }
            Err(e) => {
                tracing::warn!("Email fetch failed: {}", e);
                self.state.set_status("Fetch failed");
                self.state.list.show_error(e);
            }
        }
    }

    /// Open a conversation about the card at `index`
    pub(crate) fn select_email(&mut self, index: usize) {
        let Some(email) = self.state.list.emails.get(index) else {
            return;
        };
        let id = email.id.clone();
        let subject = email.display_subject().to_string();

        self.state.list.set_active(index);
        self.init_conversation(id, subject);
    }
}
