// SPDX-License-Identifier: MPL-2.0
//! Top prediction card and the ranked runner-ups below it.

use super::{meter, percent_label, Message};
use crate::classifier::Prediction;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::theme::{class_color, muted_text_color};
use iced::widget::{Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length};

/// Emoji shown before any analysis.
pub const PLACEHOLDER_EMOJI: &str = "🤖";

/// What the top prediction card shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TopPanel<'a> {
    Placeholder,
    Prediction(&'a Prediction),
}

impl TopPanel<'_> {
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, TopPanel::Placeholder)
    }

    #[must_use]
    pub fn emoji(&self) -> &str {
        match self {
            TopPanel::Placeholder => PLACEHOLDER_EMOJI,
            TopPanel::Prediction(p) => &p.emoji,
        }
    }

    /// Confidence exactly as the service sent it, e.g. `87.35%`.
    #[must_use]
    pub fn confidence_label(&self) -> String {
        match self {
            TopPanel::Placeholder => "0%".to_string(),
            TopPanel::Prediction(p) => percent_label(p.confidence),
        }
    }

    /// Filled share of the confidence meter.
    #[must_use]
    pub fn meter_fraction(&self) -> f32 {
        match self {
            TopPanel::Placeholder => 0.0,
            TopPanel::Prediction(p) => super::fraction(p.confidence),
        }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            TopPanel::Placeholder => muted_text_color(),
            TopPanel::Prediction(p) => class_color(&p.color),
        }
    }

    /// Title and description, translated for the placeholder.
    #[must_use]
    pub fn texts(&self, i18n: &I18n) -> (String, String) {
        match self {
            TopPanel::Placeholder => (
                i18n.tr("results-placeholder-title"),
                i18n.tr("results-placeholder-description"),
            ),
            TopPanel::Prediction(p) => (p.class_name.clone(), p.description.clone()),
        }
    }
}

pub fn view<'a>(panel: TopPanel<'a>, i18n: &'a I18n) -> Element<'a, Message> {
    let (title, description) = panel.texts(i18n);
    let color = panel.color();

    let heading = Row::new()
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Center)
        .push(Text::new(panel.emoji().to_string()).size(typography::DISPLAY))
        .push(
            Column::new()
                .spacing(spacing::XXS)
                .push(Text::new(title).size(typography::TITLE_MD))
                .push(
                    Text::new(description)
                        .size(typography::BODY_SM)
                        .color(muted_text_color()),
                ),
        );

    let confidence = Row::new()
        .align_y(alignment::Vertical::Center)
        .push(
            Container::new(Text::new(i18n.tr("results-confidence")).size(typography::BODY))
                .width(Length::Fill),
        )
        .push(
            Text::new(panel.confidence_label())
                .size(typography::TITLE_SM)
                .color(color),
        );

    Column::new()
        .spacing(spacing::SM)
        .push(heading)
        .push(confidence)
        .push(meter(panel.meter_fraction(), color, sizing::METER_HEIGHT))
        .into()
}

/// One runner-up prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryRow<'a> {
    pub emoji: &'a str,
    pub class_name: &'a str,
    pub fraction: f32,
    pub label: String,
    pub color: Color,
}

impl<'a> SecondaryRow<'a> {
    #[must_use]
    pub fn from_prediction(prediction: &'a Prediction) -> Self {
        Self {
            emoji: &prediction.emoji,
            class_name: &prediction.class_name,
            fraction: super::fraction(prediction.confidence),
            label: percent_label(prediction.confidence),
            color: class_color(&prediction.color),
        }
    }
}

pub fn view_secondary<'a>(rows: Vec<SecondaryRow<'a>>) -> Element<'a, Message> {
    let column = rows.into_iter().fold(
        Column::new().spacing(spacing::XS),
        |column, row| {
            column.push(
                Row::new()
                    .spacing(spacing::SM)
                    .align_y(alignment::Vertical::Center)
                    .push(Text::new(row.emoji).size(typography::TITLE_SM))
                    .push(
                        Column::new()
                            .spacing(spacing::XXS)
                            .width(Length::Fill)
                            .push(Text::new(row.class_name).size(typography::BODY))
                            .push(meter(row.fraction, row.color, sizing::BAR_HEIGHT)),
                    )
                    .push(Text::new(row.label).size(typography::BODY).color(row.color)),
            )
        },
    );
    column.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(confidence: f64) -> Prediction {
        Prediction {
            class_name: "Cat".to_string(),
            emoji: "🐱".to_string(),
            confidence,
            color: "#ec4899".to_string(),
            description: "Domestic cat".to_string(),
        }
    }

    #[test]
    fn placeholder_shows_zero_confidence() {
        let panel = TopPanel::Placeholder;
        assert_eq!(panel.emoji(), PLACEHOLDER_EMOJI);
        assert_eq!(panel.confidence_label(), "0%");
        assert_eq!(panel.meter_fraction(), 0.0);
    }

    #[test]
    fn prediction_confidence_is_shown_unrounded() {
        let p = prediction(87.35);
        let panel = TopPanel::Prediction(&p);
        assert_eq!(panel.confidence_label(), "87.35%");
        assert!((panel.meter_fraction() - 0.8735).abs() < 1e-6);
        assert_eq!(panel.color(), Color::from_rgb8(0xec, 0x48, 0x99));
    }

    #[test]
    fn whole_confidence_has_no_decimals() {
        let p = prediction(90.0);
        assert_eq!(TopPanel::Prediction(&p).confidence_label(), "90%");
    }

    #[test]
    fn placeholder_texts_are_translated() {
        let i18n = I18n::default();
        let (title, description) = TopPanel::Placeholder.texts(&i18n);
        assert!(!title.starts_with("MISSING"));
        assert!(!description.starts_with("MISSING"));
    }

    #[test]
    fn secondary_row_copies_prediction() {
        let p = prediction(12.5);
        let row = SecondaryRow::from_prediction(&p);
        assert_eq!(row.class_name, "Cat");
        assert_eq!(row.label, "12.5%");
        assert!((row.fraction - 0.125).abs() < 1e-6);
    }
}
