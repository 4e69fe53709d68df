//! Conversation about the selected email: sending questions, applying answers,
//! and choosing the model

use crate::app::PendingExchange;
use crate::app::state::{BubbleKind, BubbleMark, ChatBubble, ChatPanel, Focus};
use crate::backend::{BackendCommand, BackendError, EmailId};

use super::super::App;

impl App {
    /// Start over with a fresh chat panel for `id`.
    ///
    /// Drops the previous panel (bubbles, input text, loading indicator) and
    /// invalidates any question still in flight.
    pub(crate) fn init_conversation(&mut self, id: EmailId, subject: String) {
        tracing::info!("Starting conversation about email {}", id);

        if self.pending_chat.take().is_some() {
            // Bumping the generation makes the in-flight answer stale
            self.requests.next_chat();
        }
        self.session.select(id.clone(), subject.as_str());
        self.state.chat = Some(ChatPanel::new(id, &subject));
        self.state.focus = Focus::Chat;
    }

    /// Send the chat input as a question about the selected email
    pub(crate) async fn send_message(&mut self) {
        let Some(chat) = self.state.chat.as_mut() else {
            return;
        };
        let Some(request) = self.session.chat_request(&chat.input) else {
            return;
        };
        if let Some(selected) = self.session.selected() {
            tracing::debug!(
                "Asking about \"{}\" with {} prior turns",
                selected.subject,
                self.session.transcript().len()
            );
        }

        // A question still waiting for its answer loses it
        if let Some(previous) = self.pending_chat.take() {
            tracing::debug!("Chat request {} superseded", previous.generation);
            chat.mark(previous.bubble, BubbleMark::Superseded);
        }

        chat.input.clear();
        let bubble = chat.push(ChatBubble::new(BubbleKind::User, request.question.clone()));
        chat.loading = true;

        let generation = self.requests.next_chat();
        self.pending_chat = Some(PendingExchange {
            generation,
            email_id: request.email_id.clone(),
            question: request.question.clone(),
            bubble,
        });

        if !self
            .send_backend(BackendCommand::Chat {
                generation,
                request,
            })
            .await
        {
            self.apply_chat_answer(
                generation,
                Err(BackendError::Backend {
                    message: "backend worker stopped".to_string(),
                }),
            );
        }
    }

    /// Apply a chat completion if it answers the latest question
    pub(crate) fn apply_chat_answer(&mut self, generation: u64, result: Result<String, BackendError>) {
        let Some(pending) = self.pending_chat.take_if(|p| p.generation == generation) else {
            tracing::debug!("Dropping stale chat answer {}", generation);
            return;
        };
        let Some(chat) = self
            .state
            .chat
            .as_mut()
            .filter(|c| c.email_id == pending.email_id)
        else {
            return;
        };
        chat.loading = false;

        match result {
            Ok(answer) => {
                chat.push(ChatBubble::new(BubbleKind::Assistant, answer.clone()));
                self.session
                    .record_exchange(&pending.email_id, pending.question, answer);
            }
            Err(e) => {
                tracing::warn!("Chat request {} failed: {}", generation, e);
                chat.mark(pending.bubble, BubbleMark::Failed);
                chat.push(ChatBubble::new(BubbleKind::Error, e.to_string()));
            }
        }
    }

    /// Use `model` for every request from now on. Any non-blank name is accepted.
    pub(crate) fn set_model(&mut self, model: String) {
        if model.trim().is_empty() {
            self.state.set_error("Model name cannot be empty");
            return;
        }

        tracing::info!("Model set to {}", model);
        self.session.set_model(model.as_str());
        self.state.set_status(format!("Model: {}", model));
        self.state.model = model;
    }

    /// The model after (or before) the current one in the configured list.
    /// A model not in the list restarts at the first entry.
    pub(crate) fn cycle_model(&self, forward: bool) -> Option<String> {
        let len = self.models.len();
        if len == 0 {
            return None;
        }
        let next = match self.models.iter().position(|m| m == self.session.model()) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.models.get(next).cloned()
    }
}
