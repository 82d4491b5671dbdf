// SPDX-License-Identifier: MPL-2.0
//! Light/dark theme handling.
//!
//! The mode drives two unrelated things: the Iced [`Theme`] used by every
//! widget, and the color of the particle background.

use crate::ui::design_tokens::{opacity, palette};
use iced::{Color, Theme};
use serde::{Deserialize, Serialize};

/// Color palette for a theme.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    // Surface colors
    pub surface_primary: Color,
    pub surface_secondary: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,

    // Brand colors
    pub brand_primary: Color,
    pub brand_secondary: Color,

    // Semantic colors
    pub error: Color,
    pub warning: Color,
    pub success: Color,
    pub info: Color,

    /// Track color of empty meters and bars.
    pub track: Color,
}

impl ColorScheme {
    #[must_use]
    pub fn light() -> Self {
        Self {
            surface_primary: Color {
                a: opacity::SURFACE,
                ..palette::WHITE
            },
            surface_secondary: palette::GRAY_100,

            text_primary: palette::GRAY_900,
            text_secondary: palette::GRAY_700,

            brand_primary: palette::PRIMARY_500,
            brand_secondary: palette::PRIMARY_600,

            error: palette::ERROR_500,
            warning: palette::WARNING_500,
            success: palette::SUCCESS_500,
            info: palette::INFO_500,

            track: palette::GRAY_200,
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            surface_primary: Color {
                a: opacity::SURFACE,
                ..palette::GRAY_800
            },
            surface_secondary: palette::GRAY_900,

            text_primary: palette::WHITE,
            text_secondary: palette::GRAY_200,

            brand_primary: palette::PRIMARY_400,
            brand_secondary: palette::PRIMARY_500,

            error: palette::ERROR_500,
            warning: palette::WARNING_500,
            success: palette::SUCCESS_500,
            info: palette::INFO_500,

            track: palette::GRAY_700,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Reads the OS preference, defaulting to light when it cannot be determined.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Dark) => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    #[must_use]
    pub fn iced_theme(self) -> Theme {
        match self {
            ThemeMode::Light => Theme::Light,
            ThemeMode::Dark => Theme::Dark,
        }
    }

    /// Particle and link color drawn over this theme's background.
    #[must_use]
    pub fn particle_color(self) -> Color {
        match self {
            ThemeMode::Light => palette::BLACK,
            ThemeMode::Dark => palette::WHITE,
        }
    }

    /// Glyph of the header button, showing the mode a click switches to.
    #[must_use]
    pub fn toggle_icon(self) -> &'static str {
        match self {
            ThemeMode::Light => "☾",
            ThemeMode::Dark => "☀",
        }
    }

    /// i18n key of the mode name.
    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            ThemeMode::Light => "theme-light",
            ThemeMode::Dark => "theme-dark",
        }
    }
}

/// Color scheme matching an Iced theme, for style closures that only receive `&Theme`.
#[must_use]
pub fn scheme_for(theme: &Theme) -> ColorScheme {
    if theme.extended_palette().is_dark {
        ColorScheme::dark()
    } else {
        ColorScheme::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_theme_has_light_surface() {
        let scheme = ColorScheme::light();
        assert!(scheme.surface_primary.r > 0.9);
    }

    #[test]
    fn dark_theme_has_dark_surface() {
        let scheme = ColorScheme::dark();
        assert!(scheme.surface_primary.r < 0.2);
    }

    #[test]
    fn toggling_twice_returns_to_start() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            assert_ne!(mode.toggled(), mode);
            assert_eq!(mode.toggled().toggled(), mode);
        }
    }

    #[test]
    fn particle_color_contrasts_with_background() {
        assert_eq!(ThemeMode::Light.particle_color(), Color::BLACK);
        assert_eq!(ThemeMode::Dark.particle_color(), Color::WHITE);
    }

    #[test]
    fn toggle_icon_matches_mode() {
        assert_eq!(ThemeMode::Light.toggle_icon(), "☾");
        assert_eq!(ThemeMode::Dark.toggle_icon(), "☀");
    }

    #[test]
    fn iced_theme_follows_mode() {
        assert_eq!(ThemeMode::Light.iced_theme(), Theme::Light);
        assert_eq!(ThemeMode::Dark.iced_theme(), Theme::Dark);
        assert!(scheme_for(&Theme::Dark).text_primary.r > 0.9);
    }

    #[test]
    fn detect_does_not_panic() {
        let _ = ThemeMode::detect();
    }
}
