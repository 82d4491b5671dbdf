// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow};
use crate::ui::theming::scheme_for;
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Window background behind the particle canvas.
pub fn backdrop(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(
            theme.extended_palette().background.base.color,
        )),
        ..Default::default()
    }
}

/// Card surface drawn over the particle background.
///
/// Derived from the active Iced `Theme` background with a slight opacity so
/// the animation stays faintly visible behind it.
pub fn panel(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    let base = palette.background.base.color;

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            base.r,
            base.g,
            base.b,
            opacity::SURFACE,
        ))),
        text_color: Some(palette.background.base.text),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        shadow: shadow::SM,
        ..Default::default()
    }
}

/// Dashed-looking drop area of the upload card; brand colored while a file hovers.
pub fn drop_zone(highlighted: bool) -> impl Fn(&Theme) -> container::Style {
    move |theme: &Theme| {
        let scheme = scheme_for(theme);
        let (border_color, alpha) = if highlighted {
            (scheme.brand_primary, opacity::OVERLAY_SUBTLE)
        } else {
            (palette::GRAY_400, opacity::TRANSPARENT)
        };

        container::Style {
            background: Some(Background::Color(Color {
                a: alpha,
                ..scheme.brand_primary
            })),
            border: Border {
                color: border_color,
                width: border::WIDTH_MD,
                radius: radius::LG.into(),
            },
            ..Default::default()
        }
    }
}

/// Solid fill of a meter, bar or chart column.
pub fn fill(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(color)),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Empty part of a meter or bar.
pub fn track(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(scheme_for(theme).track)),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Card of one class in the class grid, outlined in the class color.
pub fn class_card(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |theme: &Theme| {
        let scheme = scheme_for(theme);
        container::Style {
            background: Some(Background::Color(scheme.surface_secondary)),
            text_color: Some(scheme.text_primary),
            border: Border {
                color,
                width: border::WIDTH_MD,
                radius: radius::MD.into(),
            },
            ..Default::default()
        }
    }
}
