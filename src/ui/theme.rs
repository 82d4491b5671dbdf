// SPDX-License-Identifier: MPL-2.0
//! Shared color helpers.

use crate::ui::design_tokens::palette;
use iced::Color;

/// Parses a CSS-style `#rrggbb` or `#rgb` color.
#[must_use]
pub fn parse_hex_color(raw: &str) -> Option<Color> {
    let hex = raw.trim().strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        6 => Some(Color::from_rgb8(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let digit = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
            Some(Color::from_rgb8(digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}

/// Color of a class as sent by the server, or the brand color when unusable.
#[must_use]
pub fn class_color(raw: &str) -> Color {
    parse_hex_color(raw).unwrap_or(palette::PRIMARY_500)
}

/// Standard color for muted/secondary text.
pub fn muted_text_color() -> Color {
    palette::GRAY_400
}
