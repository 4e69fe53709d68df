//! Application-wide constants for tuning and configuration
//!
//! Centralizes magic numbers and fixed strings so they are discoverable.

// === Backend ===

/// Backend base URL used when the config file does not set one.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Model requested when nothing else is configured (the backend's own default).
pub const DEFAULT_MODEL: &str = "llama3.1-8b";

/// Models offered by the model selector out of the box.
pub const DEFAULT_MODELS: &[&str] = &["llama3.1-8b", "llama-3.3-70b", "qwen-3-32b"];

/// Endpoint that fetches and summarizes the latest emails.
pub const SUMMARIZE_PATH: &str = "/api/summarize-emails";

/// Endpoint for follow-up questions about one email.
pub const CHAT_PATH: &str = "/api/chat";

/// Capacity of the command channel into the backend actor.
pub const BACKEND_COMMAND_CAPACITY: usize = 16;

/// Capacity of the event channel out of the backend actor.
pub const BACKEND_EVENT_CAPACITY: usize = 32;

// === Placeholders for missing summary fields ===

pub const NO_SUBJECT: &str = "No Subject";
pub const UNKNOWN_SENDER: &str = "Unknown Sender";
pub const NO_SUMMARY: &str = "No summary available.";

// === Event loop ===

/// Input poll timeout while a request is in flight (keeps the spinner moving).
pub const POLL_BUSY_MS: u64 = 50;

/// Input poll timeout when idle.
pub const POLL_IDLE_MS: u64 = 150;

/// Error message display duration in seconds before auto-dismiss.
pub const ERROR_TTL_SECS: u64 = 5;

// === UI Constants ===

/// Minimum split ratio percentage between the email list and the chat panel.
pub const SPLIT_RATIO_MIN: u16 = 30;

/// Maximum split ratio percentage between the email list and the chat panel.
pub const SPLIT_RATIO_MAX: u16 = 70;

/// Target scroll position as fraction of visible area (1/N from top).
/// A value of 4 means the selected card targets 1/4 from the top.
pub const SCROLL_TARGET_FRACTION: usize = 4;

/// Maximum number of summary lines shown on one email card.
pub const CARD_SUMMARY_LINES: usize = 3;

/// Spinner animation frame duration in milliseconds.
pub const SPINNER_FRAME_MS: u128 = 80;
