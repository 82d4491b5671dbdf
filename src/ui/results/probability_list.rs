// SPDX-License-Identifier: MPL-2.0
//! Ranked textual list of every class probability.

use super::{fraction, meter, Message};
use crate::classifier::ClassProbability;
use crate::ui::design_tokens::{radius, sizing, spacing, typography};
use crate::ui::theme::class_color;
use iced::widget::{container, Column, Container, Row, Text};
use iced::{alignment, Background, Border, Color, Element, Length, Theme};

#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityRow<'a> {
    /// 1-based position in the server's order.
    pub rank: usize,
    pub class_name: &'a str,
    pub fraction: f32,
    /// Probability with one decimal, e.g. `42.1%`.
    pub label: String,
    pub color: Color,
}

/// Builds one row per entry, keeping the input order.
#[must_use]
pub fn rows(probabilities: &[ClassProbability]) -> Vec<ProbabilityRow<'_>> {
    probabilities
        .iter()
        .enumerate()
        .map(|(index, p)| ProbabilityRow {
            rank: index + 1,
            class_name: &p.class_name,
            fraction: fraction(p.probability),
            label: format!("{}%", one_decimal(p.probability)),
            color: class_color(&p.color),
        })
        .collect()
}

/// Formats `value` with one decimal, rounding exact halves away from zero.
///
/// `{:.1}` rounds on the exact binary value but breaks ties to even. A tie at
/// one decimal needs `10 * value` to end in `.5` exactly, which for a binary
/// float only happens when `4 * value` is an odd integer (12.25, 0.75, ...).
#[must_use]
pub fn one_decimal(value: f64) -> String {
    let magnitude = value.abs();
    let quarters = magnitude * 4.0;
    let tie = quarters.fract() == 0.0 && quarters % 2.0 == 1.0;
    let text = if tie {
        format!("{:.1}", (magnitude * 10.0 + 0.5).floor() / 10.0)
    } else {
        format!("{magnitude:.1}")
    };
    if value.is_sign_negative() && text.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        format!("-{text}")
    } else {
        text
    }
}

pub fn view<'a>(rows: Vec<ProbabilityRow<'a>>) -> Element<'a, Message> {
    rows.into_iter()
        .fold(Column::new().spacing(spacing::XS), |column, row| {
            let color = row.color;
            let badge = Container::new(Text::new(row.rank.to_string()).size(typography::BODY_SM))
                .width(Length::Fixed(sizing::ICON_LG))
                .align_x(alignment::Horizontal::Center)
                .padding(spacing::XXS)
                .style(move |_theme: &Theme| container::Style {
                    background: Some(Background::Color(Color { a: 0.125, ..color })),
                    text_color: Some(color),
                    border: Border {
                        radius: radius::MD.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                });

            column.push(
                Row::new()
                    .spacing(spacing::SM)
                    .align_y(alignment::Vertical::Center)
                    .push(badge)
                    .push(
                        Column::new()
                            .spacing(spacing::XXS)
                            .width(Length::Fill)
                            .push(Text::new(row.class_name).size(typography::BODY))
                            .push(meter(row.fraction, color, sizing::BAR_HEIGHT)),
                    )
                    .push(Text::new(row.label).size(typography::BODY).color(color)),
            )
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probability(class_name: &str, probability: f64) -> ClassProbability {
        ClassProbability {
            class_name: class_name.to_string(),
            probability,
            color: "#3b82f6".to_string(),
        }
    }

    #[test]
    fn rows_keep_input_order_and_rank_from_one() {
        let input = vec![
            probability("Dog", 10.0),
            probability("Cat", 70.0),
            probability("Ship", 20.0),
        ];
        let rows = rows(&input);

        let names: Vec<&str> = rows.iter().map(|r| r.class_name).collect();
        assert_eq!(names, vec!["Dog", "Cat", "Ship"]);
        let ranks: Vec<usize> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn labels_are_rounded_to_one_decimal() {
        let input = vec![
            probability("Cat", 42.0),
            probability("Dog", 33.333_333),
            probability("Frog", 0.04),
        ];
        let labels: Vec<String> = rows(&input).into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["42.0%", "33.3%", "0.0%"]);
    }

    #[test]
    fn exact_halves_round_up() {
        let input = vec![
            probability("Cat", 12.25),
            probability("Dog", 0.75),
            probability("Frog", 0.25),
            probability("Ship", 87.35),
            probability("Truck", 99.95),
        ];
        let labels: Vec<String> = rows(&input).into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["12.3%", "0.8%", "0.3%", "87.3%", "100.0%"]);
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert!(rows(&[]).is_empty());
    }
}
