//! Conversation session: which email is selected, what has been said about
//! it, and which model answers.
//!
//! The transcript only ever holds completed exchanges. Fields are private so
//! the transcript can only be cleared by a selection and only grows through
//! `record_exchange`.

use crate::backend::{ChatRequest, ConversationTurn, EmailId};

/// The email a conversation is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedEmail {
    pub id: EmailId,
    pub subject: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    selected: Option<SelectedEmail>,
    transcript: Vec<ConversationTurn>,
    model: String,
}

impl Session {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            selected: None,
            transcript: Vec::new(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Any non-empty value is accepted; the backend decides what it supports.
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    pub fn selected(&self) -> Option<&SelectedEmail> {
        self.selected.as_ref()
    }

    pub fn transcript(&self) -> &[ConversationTurn] {
        &self.transcript
    }

    /// Start a fresh conversation. Re-selecting the current email also
    /// starts over.
    pub fn select(&mut self, id: EmailId, subject: impl Into<String>) {
        self.transcript.clear();
        self.selected = Some(SelectedEmail {
            id,
            subject: subject.into(),
        });
    }

    /// Build the request for a new question.
    ///
    /// Returns None when the question is blank or no email is selected. The
    /// history is the transcript as it stands, so it never includes the
    /// question being asked.
    pub fn chat_request(&self, question: &str) -> Option<ChatRequest> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }
        let selected = self.selected.as_ref()?;

        Some(ChatRequest {
            email_id: selected.id.clone(),
            question: question.to_string(),
            history: self.transcript.clone(),
            model: self.model.clone(),
        })
    }

    /// Append a completed exchange (user turn, then assistant turn).
    ///
    /// Ignored when `email_id` is no longer the selected email, so a late
    /// answer cannot leak into another email's conversation.
    pub fn record_exchange(&mut self, email_id: &EmailId, question: String, answer: String) -> bool {
        match self.selected {
            Some(ref selected) if selected.id == *email_id => {
                self.transcript.push(ConversationTurn::user(question));
                self.transcript.push(ConversationTurn::assistant(answer));
                true
            }
            _ => false,
        }
    }
}
