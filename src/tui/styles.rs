//! Color palette and preset styles.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::RiskTier;

/// Clinical color palette.
pub struct MedicalTheme;

impl MedicalTheme {
    /// Teal accent
    pub const PRIMARY: Color = Color::Rgb(13, 148, 136); // #0D9488
    pub const PRIMARY_LIGHT: Color = Color::Rgb(45, 212, 191); // #2DD4BF
    pub const PRIMARY_DARK: Color = Color::Rgb(15, 118, 110); // #0F766E

    /// Slate used for borders and the baseline series
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    /// Blue used for the patient series
    pub const INFO: Color = Color::Rgb(59, 130, 246); // #3B82F6
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E

    pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0F172A
    pub const BG_CARD: Color = Color::Rgb(51, 65, 85); // #334155

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    /// Style for titles
    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for subtitles and popup titles
    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for normal text
    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    /// Style for secondary text
    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Style for muted text
    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    /// Style for errors
    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    /// Style for the patient series
    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    /// Active submit button
    #[must_use]
    pub fn button() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Disabled submit button
    #[must_use]
    pub fn button_disabled() -> Style {
        Style::default().fg(Self::TEXT_MUTED).bg(Self::BG_CARD)
    }

    /// Style for the focused field
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the input cursor
    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    /// Style for borders
    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    /// Style for focused borders
    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Style for the header bar
    #[must_use]
    pub fn header() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY_DARK)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key hints
    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key descriptions
    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Badge and ring color for a risk tier.
    #[must_use]
    pub fn risk_color(tier: RiskTier) -> Color {
        let (r, g, b) = tier.color();
        Color::Rgb(r, g, b)
    }

    /// Style for the risk gauge
    #[must_use]
    pub fn risk(tier: RiskTier) -> Style {
        Style::default()
            .fg(Self::risk_color(tier))
            .add_modifier(Modifier::BOLD)
    }

    /// Inverted badge style.
    #[must_use]
    pub fn badge(tier: RiskTier) -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::risk_color(tier))
            .add_modifier(Modifier::BOLD)
    }
}

/// Title shown in the header bar.
pub const APP_TITLE: &str = "CardioPulse AI";
