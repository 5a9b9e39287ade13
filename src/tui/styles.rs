//! Clinical color palette and preset styles.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::RiskIndication;

/// Theme for the screening UI.
pub struct ScreenerTheme;

impl ScreenerTheme {
    /// Deep cyan, primary accent.
    pub const PRIMARY: Color = Color::Rgb(8, 145, 178); // #0891B2

    /// Lighter cyan for focus highlights.
    pub const PRIMARY_LIGHT: Color = Color::Rgb(34, 211, 238); // #22D3EE

    /// Emerald, reassuring results.
    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981

    /// Amber, warnings.
    pub const WARNING: Color = Color::Rgb(245, 158, 11); // #F59E0B

    /// Rose, errors and malaria indication.
    pub const DANGER: Color = Color::Rgb(225, 29, 72); // #E11D48

    /// Light slate for borders.
    pub const BORDER: Color = Color::Rgb(148, 163, 184); // #94A3B8

    /// Primary text.
    pub const TEXT: Color = Color::Rgb(248, 250, 252); // #F8FAFC

    /// Secondary text.
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8

    /// Muted text.
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    #[must_use]
    pub fn title() -> Style {
        Style::default().fg(Self::TEXT).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    /// Style for the focused form field.
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Style for a risk indication headline.
    #[must_use]
    pub fn indication(indication: RiskIndication) -> Style {
        match indication {
            RiskIndication::NoMalaria => Self::success(),
            RiskIndication::Malaria => Self::danger(),
            RiskIndication::Unknown => Self::text_muted(),
        }
    }
}
