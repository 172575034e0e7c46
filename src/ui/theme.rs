//! Color themes for the UI.

use crate::app::Theme;
use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Background color.
    pub bg: Color,
    /// Primary text color.
    pub text: Color,
    /// Heading text color (title, axis titles).
    pub heading: Color,
    /// Label text color.
    pub label: Color,
    /// Value text color (tick labels).
    pub value: Color,
    /// Border color.
    pub border: Color,
    /// Axis line color.
    pub axis: Color,
    /// Outline drawn around the hovered mark.
    pub outline: Color,
    /// Tooltip background.
    pub tooltip_bg: Color,
    /// Switch button foreground.
    pub button_fg: Color,
    /// Switch button background.
    pub button_bg: Color,
    /// Status bar foreground color.
    pub status_fg: Color,
    /// Status bar background color.
    pub status_bg: Color,
    /// Error color, used for failed dataset switches.
    pub error: Color,
}

impl ThemeColors {
    /// Create color palette from theme.
    pub fn from_theme(theme: &Theme) -> Self {
        match theme {
            Theme::GruvboxDark => Self {
                bg: Color::Rgb(40, 40, 40),
                text: Color::Rgb(235, 219, 178),
                heading: Color::Rgb(251, 184, 108),
                label: Color::Rgb(184, 187, 38),
                value: Color::Rgb(142, 192, 124),
                border: Color::Rgb(102, 92, 84),
                axis: Color::Rgb(168, 153, 132),
                outline: Color::Rgb(251, 241, 199),
                tooltip_bg: Color::Rgb(50, 48, 47),
                button_fg: Color::Rgb(251, 241, 199),
                button_bg: Color::Rgb(204, 36, 29),
                status_fg: Color::Rgb(235, 219, 178),
                status_bg: Color::Rgb(60, 56, 54),
                error: Color::Rgb(251, 73, 52),
            },
            Theme::GruvboxLight => Self {
                bg: Color::Rgb(251, 245, 234),
                text: Color::Rgb(60, 56, 54),
                heading: Color::Rgb(175, 58, 3),
                label: Color::Rgb(121, 116, 14),
                value: Color::Rgb(102, 123, 3),
                border: Color::Rgb(213, 196, 161),
                axis: Color::Rgb(124, 111, 100),
                outline: Color::Rgb(40, 40, 40),
                tooltip_bg: Color::Rgb(242, 229, 188),
                button_fg: Color::Rgb(251, 245, 234),
                button_bg: Color::Rgb(157, 0, 6),
                status_fg: Color::Rgb(60, 56, 54),
                status_bg: Color::Rgb(235, 219, 178),
                error: Color::Rgb(157, 0, 6),
            },
        }
    }
}
