//! Summarization backend access
//!
//! The backend does all the real work (reading mail, summarizing, answering
//! questions). This module provides:
//! - Wire types for the two JSON endpoints
//! - An HTTP client behind the `Backend` trait
//! - An actor that runs requests concurrently with the UI and reports results

mod actor;
mod client;
mod error;
mod types;

pub use actor::{BackendCommand, BackendEvent, BackendHandle, spawn_backend_actor};
pub use client::HttpBackend;
#[cfg(test)]
pub use client::{parse_answer, parse_summaries};
#[cfg(test)]
pub use types::Role;
pub use error::BackendError;
#[cfg(test)]
pub use error::Endpoint;
pub use types::{ChatRequest, ConversationTurn, EmailId, EmailSummary};
