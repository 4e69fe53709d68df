//! Centralized theming for the mailchat TUI
//!
//! Single source of truth for every color and style the UI uses.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;
use std::sync::RwLock;

use crate::config::ThemeVariant;

/// Global theme variant storage
static THEME_VARIANT: RwLock<ThemeVariant> = RwLock::new(ThemeVariant::Dark);

/// Initialize the theme variant (call once at startup)
pub fn init_theme(variant: ThemeVariant) {
    if let Ok(mut guard) = THEME_VARIANT.write() {
        *guard = variant;
    }
}

/// Get the current theme variant
pub fn current_theme() -> ThemeVariant {
    THEME_VARIANT.read().map(|g| *g).unwrap_or_default()
}

/// Border type helpers for different UI contexts
pub mod borders {
    use super::*;

    /// Popups and the focused panel
    pub fn focused() -> BorderType {
        match current_theme() {
            ThemeVariant::Dark => BorderType::Rounded,
            ThemeVariant::HighContrast => BorderType::Thick,
        }
    }

    pub fn panel() -> BorderType {
        BorderType::Plain
    }
}

/// Color palette - colors that vary by theme
pub mod colors {
    use super::*;

    pub fn bg_selection() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(69, 71, 90),
            ThemeVariant::HighContrast => Color::Blue,
        }
    }

    pub fn bg_status() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(24, 24, 37),
            ThemeVariant::HighContrast => Color::Black,
        }
    }

    pub fn bg_error() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(243, 139, 168),
            ThemeVariant::HighContrast => Color::Red,
        }
    }

    pub fn fg_primary() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(205, 214, 244),
            ThemeVariant::HighContrast => Color::White,
        }
    }

    pub fn fg_on_error() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(30, 30, 46),
            ThemeVariant::HighContrast => Color::White,
        }
    }

    pub fn fg_secondary() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(186, 194, 222),
            ThemeVariant::HighContrast => Color::White,
        }
    }

    pub fn fg_muted() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(108, 112, 134),
            ThemeVariant::HighContrast => Color::Gray,
        }
    }

    pub fn fg_accent() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(137, 180, 250),
            ThemeVariant::HighContrast => Color::Cyan,
        }
    }

    pub fn fg_warning() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(249, 226, 175),
            ThemeVariant::HighContrast => Color::Yellow,
        }
    }

    pub fn fg_success() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(166, 227, 161),
            ThemeVariant::HighContrast => Color::Green,
        }
    }

    pub fn fg_error() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(243, 139, 168),
            ThemeVariant::HighContrast => Color::LightRed,
        }
    }

    pub fn border() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(49, 50, 68),
            ThemeVariant::HighContrast => Color::Gray,
        }
    }

    pub fn border_focused() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(180, 190, 254),
            ThemeVariant::HighContrast => Color::Yellow,
        }
    }

    pub fn bg_help() -> Color {
        bg_status()
    }

    pub fn bg_main() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Reset,
            ThemeVariant::HighContrast => Color::Black,
        }
    }
}

/// UI symbols - centralized for consistency
pub mod symbols {
    /// Marker on the card whose conversation is open
    pub const ACTIVE: &str = "▌";
    pub const INACTIVE: &str = " ";

    pub const IDLE: &str = "●";
    pub const FAILED: &str = "✗";
    pub const SUPERSEDED: &str = "↷";
    pub const PROMPT: &str = "› ";
}

/// Pre-composed styles for common UI elements
pub struct Theme;

impl Theme {
    // === Text ===

    pub fn text() -> Style {
        Style::default()
            .fg(colors::fg_primary())
            .bg(colors::bg_main())
    }

    pub fn text_bold() -> Style {
        Self::text().add_modifier(Modifier::BOLD)
    }

    pub fn text_secondary() -> Style {
        Style::default()
            .fg(colors::fg_secondary())
            .bg(colors::bg_main())
    }

    pub fn text_muted() -> Style {
        Style::default()
            .fg(colors::fg_muted())
            .bg(colors::bg_main())
    }

    pub fn text_accent() -> Style {
        Style::default()
            .fg(colors::fg_accent())
            .bg(colors::bg_main())
    }

    pub fn text_error() -> Style {
        Style::default()
            .fg(colors::fg_error())
            .bg(colors::bg_main())
    }

    // === Status Bar ===

    pub fn status_bar() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_primary())
    }

    pub fn status_info() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_secondary())
    }

    pub fn status_idle() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_success())
    }

    pub fn status_busy() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_warning())
    }

    pub fn status_error() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_error())
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_model() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_bar() -> Style {
        Style::default()
            .bg(colors::bg_error())
            .fg(colors::fg_on_error())
    }

    // === Help Bar ===

    pub fn help_key() -> Style {
        Style::default()
            .bg(colors::bg_help())
            .fg(colors::fg_warning())
    }

    pub fn help_desc() -> Style {
        Style::default()
            .bg(colors::bg_help())
            .fg(colors::fg_muted())
    }

    // === Borders ===

    pub fn border() -> Style {
        Style::default().fg(colors::border())
    }

    pub fn border_focused() -> Style {
        Style::default().fg(colors::border_focused())
    }

    // === Cards and bubbles ===

    pub fn card_active_marker() -> Style {
        Style::default().fg(colors::fg_accent())
    }

    pub fn bubble_user() -> Style {
        Style::default()
            .fg(colors::fg_accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn bubble_assistant() -> Style {
        Style::default()
            .fg(colors::fg_success())
            .add_modifier(Modifier::BOLD)
    }

    pub fn bubble_error() -> Style {
        Style::default()
            .fg(colors::fg_error())
            .add_modifier(Modifier::BOLD)
    }

    pub fn bubble_timestamp() -> Style {
        Style::default().fg(colors::fg_muted())
    }

    /// Text of a user message that never got an answer
    pub fn bubble_abandoned() -> Style {
        Style::default()
            .fg(colors::fg_muted())
            .add_modifier(Modifier::CROSSED_OUT)
    }

    pub fn input_highlight() -> Style {
        Style::default()
            .fg(colors::fg_warning())
            .add_modifier(Modifier::BOLD)
    }
}

/// Merge a style with selection or main background so the highlight covers
/// the entire row.
pub fn with_selection_bg(style: Style, selected: bool) -> Style {
    if selected {
        style.bg(colors::bg_selection())
    } else {
        style.bg(colors::bg_main())
    }
}
