use thiserror::Error;

/// Ways a backend request can fail.
///
/// Each failure is shown inline in the panel that issued the request; none
/// of them is retried.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request could not be sent or no response arrived
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response arrived with a non-success status
    #[error("{}{}", status_line(.endpoint, .status), detail(.message))]
    Http {
        endpoint: Endpoint,
        status: u16,
        /// `error` field of the response body, when it had one
        message: Option<String>,
    },

    /// The response succeeded but its payload reports a failure
    #[error("{message}")]
    Backend { message: String },

    /// The response body was not the JSON we expect
    #[error("invalid response from backend: {0}")]
    InvalidResponse(String),
}

/// The backend call a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Summarize,
    Chat,
}

fn status_line(endpoint: &Endpoint, status: &u16) -> String {
    match endpoint {
        Endpoint::Summarize => format!("HTTP error! status: {}", status),
        Endpoint::Chat => format!("Server error: {}", status),
    }
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(" ({})", m),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let plain = BackendError::Http {
            endpoint: Endpoint::Summarize,
            status: 502,
            message: None,
        };
        assert_eq!(plain.to_string(), "HTTP error! status: 502");

        let detailed = BackendError::Http {
            endpoint: Endpoint::Chat,
            status: 404,
            message: Some("Could not retrieve email".to_string()),
        };
        assert_eq!(
            detailed.to_string(),
            "Server error: 404 (Could not retrieve email)"
        );
    }

    #[test]
    fn test_backend_error_display_is_message() {
        let err = BackendError::Backend {
            message: "no mail configured".to_string(),
        };
        assert_eq!(err.to_string(), "no mail configured");
    }
}
