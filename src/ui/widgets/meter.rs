// SPDX-License-Identifier: MPL-2.0
//! Horizontal fill meter used for confidences, probabilities and read progress.

use crate::ui::styles;
use iced::widget::{Container, Row, Text};
use iced::{Color, Element, Length};

/// Resolution of the fill, in portions.
const RESOLUTION: u16 = 1000;

/// Splits the meter width into filled and empty portions.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn portions(fraction: f32) -> (u16, u16) {
    let filled = (fraction.clamp(0.0, 1.0) * f32::from(RESOLUTION)).round() as u16;
    (filled, RESOLUTION - filled)
}

/// A bar of `height` pixels filled to `fraction` of its width.
pub fn view<'a, Message: 'a>(fraction: f32, color: Color, height: f32) -> Element<'a, Message> {
    let (filled, empty) = portions(fraction);

    // Zero portions would still claim space, so they are skipped.
    let mut bar = Row::new().width(Length::Fill).height(Length::Fixed(height));
    if filled > 0 {
        bar = bar.push(
            Container::new(Text::new(""))
                .width(Length::FillPortion(filled))
                .height(Length::Fill)
                .style(styles::container::fill(color)),
        );
    }
    if empty > 0 {
        bar = bar.push(
            Container::new(Text::new(""))
                .width(Length::FillPortion(empty))
                .height(Length::Fill)
                .style(styles::container::track),
        );
    }
    bar.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portions_always_sum_to_resolution() {
        for fraction in [0.0, 0.001, 0.25, 0.8735, 1.0] {
            let (filled, empty) = portions(fraction);
            assert_eq!(filled + empty, RESOLUTION);
        }
    }

    #[test]
    fn out_of_range_fractions_are_clamped() {
        assert_eq!(portions(-0.5), (0, RESOLUTION));
        assert_eq!(portions(3.0), (RESOLUTION, 0));
    }

    #[test]
    fn half_fills_half() {
        assert_eq!(portions(0.5), (500, 500));
    }
}
