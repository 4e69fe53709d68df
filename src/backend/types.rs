//! Wire types exchanged with the summarization backend

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{NO_SUBJECT, NO_SUMMARY, UNKNOWN_SENDER};

/// Opaque email identifier assigned by the backend.
///
/// The backend may use JSON strings or numbers; whichever arrives is sent
/// back unchanged on chat requests. Numbers keep their JSON form, so floats
/// and values past `i64::MAX` round-trip too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmailId {
    Number(serde_json::Number),
    Text(String),
}

impl From<i64> for EmailId {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl fmt::Display for EmailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One summarized email as returned by `/api/summarize-emails`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSummary {
    pub id: EmailId,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl EmailSummary {
    pub fn display_subject(&self) -> &str {
        non_empty(&self.subject).unwrap_or(NO_SUBJECT)
    }

    pub fn display_from(&self) -> &str {
        non_empty(&self.from).unwrap_or(UNKNOWN_SENDER)
    }

    pub fn display_summary(&self) -> &str {
        non_empty(&self.summary).unwrap_or(NO_SUMMARY)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One completed turn of a conversation about an email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST /api/summarize-emails`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarizeRequest {
    pub model: String,
}

/// Body of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub email_id: EmailId,
    pub question: String,
    /// Completed turns before `question`, oldest first
    pub history: Vec<ConversationTurn>,
    pub model: String,
}
