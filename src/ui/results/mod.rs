// SPDX-License-Identifier: MPL-2.0
//! Rendering of classification results.
//!
//! A [`ClassificationResult`] is shown in three forms at once:
//!
//! - [`top_prediction`] - the best class with its confidence meter, followed by
//!   the other ranked predictions
//! - [`chart`] - a bar chart of every class probability
//! - [`probability_list`] - the same probabilities as a ranked list
//!
//! Chart and list are alternative views of `all_probabilities`; only one is
//! visible at a time. Both arrays are rendered exactly as received.

pub mod chart;
pub mod probability_list;
pub mod top_prediction;

use crate::classifier::ClassificationResult;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use crate::ui::widgets;
use chart::BarChart;
use iced::widget::{button, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length};
use probability_list::ProbabilityRow;
use top_prediction::{SecondaryRow, TopPanel};

/// Converts a percentage to a `0..=1` share.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn fraction(percent: f64) -> f32 {
    (percent / 100.0).clamp(0.0, 1.0) as f32
}

/// Formats a percentage without rounding (`87.35%`, `90%`).
pub(crate) fn percent_label(percent: f64) -> String {
    format!("{percent}%")
}

pub(crate) fn meter<'a>(fraction: f32, color: Color, height: f32) -> Element<'a, Message> {
    widgets::meter::view(fraction, color, height)
}

#[derive(Debug, Clone)]
pub enum Message {
    ToggleView,
}

/// Which view of `all_probabilities` is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultView {
    #[default]
    Chart,
    List,
}

impl ResultView {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ResultView::Chart => ResultView::List,
            ResultView::List => ResultView::Chart,
        }
    }
}

/// The result currently on screen, if any.
#[derive(Debug, Default)]
pub struct ResultsState {
    result: Option<ClassificationResult>,
    chart: BarChart,
    view: ResultView,
}

impl ResultsState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever is shown with `result`.
    pub fn display(&mut self, result: ClassificationResult) {
        self.chart.set_data(&result.all_probabilities);
        self.result = Some(result);
    }

    /// Back to the placeholder state.
    pub fn clear(&mut self) {
        self.result = None;
        self.chart.clear();
    }

    #[must_use]
    pub fn result(&self) -> Option<&ClassificationResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn top_panel(&self) -> TopPanel<'_> {
        self.result
            .as_ref()
            .and_then(ClassificationResult::top)
            .map_or(TopPanel::Placeholder, TopPanel::Prediction)
    }

    #[must_use]
    pub fn secondary(&self) -> Vec<SecondaryRow<'_>> {
        self.result
            .as_ref()
            .map(|r| r.others().iter().map(SecondaryRow::from_prediction).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn probability_rows(&self) -> Vec<ProbabilityRow<'_>> {
        self.result
            .as_ref()
            .map(|r| probability_list::rows(&r.all_probabilities))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn chart(&self) -> &BarChart {
        &self.chart
    }

    #[must_use]
    pub fn view_mode(&self) -> ResultView {
        self.view
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::ToggleView => self.view = self.view.toggled(),
        }
    }
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a ResultsState,
}

/// Renders the top prediction card and the distribution panel.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let ViewContext { i18n, state } = ctx;

    let mut top_card = Column::new()
        .spacing(spacing::MD)
        .push(top_prediction::view(state.top_panel(), i18n));
    let secondary = state.secondary();
    if !secondary.is_empty() {
        top_card = top_card
            .push(Text::new(i18n.tr("results-other-predictions")).size(typography::TITLE_SM))
            .push(top_prediction::view_secondary(secondary));
    }

    let (heading_key, toggle_key) = match state.view_mode() {
        ResultView::Chart => ("results-chart-title", "results-show-list"),
        ResultView::List => ("results-list-title", "results-show-chart"),
    };
    let header = Row::new()
        .align_y(alignment::Vertical::Center)
        .push(
            Container::new(Text::new(i18n.tr(heading_key)).size(typography::TITLE_SM))
                .width(Length::Fill),
        )
        .push(
            button(Text::new(i18n.tr(toggle_key)).size(typography::BODY_SM))
                .on_press(Message::ToggleView)
                .style(styles::button::secondary),
        );

    let body: Element<'_, Message> = match state.view_mode() {
        ResultView::Chart => chart::view(state.chart()),
        ResultView::List => {
            let rows = state.probability_rows();
            if rows.is_empty() {
                Text::new(i18n.tr("results-list-empty"))
                    .size(typography::BODY_SM)
                    .into()
            } else {
                probability_list::view(rows)
            }
        }
    };

    Column::new()
        .spacing(spacing::LG)
        .push(
            Container::new(top_card)
                .width(Length::Fill)
                .padding(spacing::LG)
                .style(styles::container::panel),
        )
        .push(
            Container::new(Column::new().spacing(spacing::MD).push(header).push(body))
                .width(Length::Fill)
                .padding(spacing::LG)
                .style(styles::container::panel),
        )
        .into()
}
