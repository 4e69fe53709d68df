//! HTTP client for the summarization backend

use std::future::Future;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::error::{BackendError, Endpoint};
use super::types::{ChatRequest, EmailSummary, SummarizeRequest};
use crate::config::BackendConfig;
use crate::constants::{CHAT_PATH, SUMMARIZE_PATH};

/// Operations the backend offers - allows mocking in tests
#[cfg_attr(test, mockall::automock)]
pub trait Backend: Send + Sync {
    /// Fetch the latest emails, summarized with `model`
    fn summarize_emails(
        &self,
        model: String,
    ) -> impl Future<Output = Result<Vec<EmailSummary>, BackendError>> + Send;

    /// Ask a question about one email; returns the assistant's answer
    fn chat(&self, request: ChatRequest)
    -> impl Future<Output = Result<String, BackendError>> + Send;
}

/// Backend reached over HTTP/JSON
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a JSON body and return the status code and raw response text
    async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<(u16, String), BackendError> {
        let url = self.endpoint(path);
        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        tracing::debug!("POST {} -> {} ({} bytes)", url, status, text.len());
        Ok((status, text))
    }
}

impl Backend for HttpBackend {
    async fn summarize_emails(&self, model: String) -> Result<Vec<EmailSummary>, BackendError> {
        let (status, body) = self
            .post(SUMMARIZE_PATH, &SummarizeRequest { model })
            .await?;
        parse_summaries(status, &body)
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, BackendError> {
        let (status, body) = self.post(CHAT_PATH, &request).await?;
        parse_answer(status, &body)
    }
}

/// Interpret a `/api/summarize-emails` response.
///
/// An `error` field fails the request whatever the HTTP status was.
pub fn parse_summaries(status: u16, body: &str) -> Result<Vec<EmailSummary>, BackendError> {
    let value = check_response(Endpoint::Summarize, status, body)?;
    serde_json::from_value(value).map_err(|e| BackendError::InvalidResponse(e.to_string()))
}

/// Interpret a `/api/chat` response.
pub fn parse_answer(status: u16, body: &str) -> Result<String, BackendError> {
    let value = check_response(Endpoint::Chat, status, body)?;
    match value.get("answer") {
        Some(Value::String(answer)) => Ok(answer.clone()),
        Some(Value::Null) | None => Err(BackendError::InvalidResponse(
            "response has no answer".to_string(),
        )),
        Some(other) => Ok(other.to_string()),
    }
}

/// Shared status and `error` field checks; returns the parsed body.
fn check_response(endpoint: Endpoint, status: u16, body: &str) -> Result<Value, BackendError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| error_message(&v));
        return Err(BackendError::Http {
            endpoint,
            status,
            message,
        });
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

    if let Some(message) = error_message(&value) {
        return Err(BackendError::Backend { message });
    }

    Ok(value)
}

/// The `error` field of a JSON object, if it is set to something truthy
fn error_message(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
