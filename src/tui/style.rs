//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

/// Color palette.
pub struct Theme;

impl Theme {
    // Background colors
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;
    pub const FOCUSED_BG: Color = Color::DarkGray;

    // Foreground colors
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;

    // Accents
    pub const HEADING: Color = Color::Yellow;
    pub const BUTTON: Color = Color::Cyan;
    pub const STATUS: Color = Color::Yellow;

    // Tab colors
    pub const TAB_ACTIVE: Color = Color::Cyan;
    pub const TAB_INACTIVE: Color = Color::DarkGray;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header style.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Focused sidebar entry.
    pub fn focused() -> Style {
        Style::default()
            .bg(Theme::FOCUSED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Section heading (`<h2>`-level).
    pub fn heading() -> Style {
        Style::default()
            .fg(Theme::HEADING)
            .add_modifier(Modifier::BOLD)
    }

    /// Enabled pager control.
    pub fn button() -> Style {
        Style::default()
            .fg(Theme::BUTTON)
            .add_modifier(Modifier::BOLD)
    }

    /// Disabled pager control.
    pub fn button_disabled() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Active tab style.
    pub fn tab_active() -> Style {
        Style::default()
            .fg(Theme::TAB_ACTIVE)
            .add_modifier(Modifier::BOLD)
    }

    /// Inactive tab style.
    pub fn tab_inactive() -> Style {
        Style::default().fg(Theme::TAB_INACTIVE)
    }

    /// Dimmed text style.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Filter input style.
    pub fn filter_input() -> Style {
        Style::default()
            .fg(Theme::FG)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Transient status message.
    pub fn status() -> Style {
        Style::default().fg(Theme::STATUS)
    }

    /// Help text style.
    pub fn help() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Help key style (highlighted keys in help line).
    pub fn help_key() -> Style {
        Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
    }
}
