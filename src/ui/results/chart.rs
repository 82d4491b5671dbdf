// SPDX-License-Identifier: MPL-2.0
//! Vertical bar chart of the class probabilities.
//!
//! Bars and grid lines are drawn on a canvas with a fixed 0-100 % scale.
//! Axis labels are regular text widgets, and each bar carries a tooltip with
//! its exact value.

use super::Message;
use crate::classifier::ClassProbability;
use crate::ui::design_tokens::{opacity, radius, sizing, spacing, typography};
use crate::ui::theme::{class_color, muted_text_color};
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::widget::{container, tooltip, Column, Container, Row, Stack, Text};
use iced::{
    alignment, mouse, Background, Border, Color, Element, Length, Point, Rectangle, Renderer,
    Size, Theme,
};

/// Upper bound of the y axis (percent).
pub const Y_MAX: f64 = 100.0;

/// Grid lines, in percent.
const GRID_STEPS: [f64; 5] = [0.0, 25.0, 50.0, 75.0, 100.0];

/// Share of each slot left empty between bars.
const BAR_GAP: f32 = 0.25;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    /// Probability exactly as received.
    pub value: f64,
    pub color: Color,
}

/// Chart data, rebuilt whenever a result is displayed.
pub struct BarChart {
    bars: Vec<Bar>,
    cache: Cache,
}

impl std::fmt::Debug for BarChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarChart").field("bars", &self.bars).finish()
    }
}

impl Default for BarChart {
    fn default() -> Self {
        Self {
            bars: Vec::new(),
            cache: Cache::default(),
        }
    }
}

impl BarChart {
    /// Replaces the data set, keeping the input order.
    pub fn set_data(&mut self, probabilities: &[ClassProbability]) {
        self.bars = probabilities
            .iter()
            .map(|p| Bar {
                label: p.class_name.clone(),
                value: p.probability,
                color: class_color(&p.color),
            })
            .collect();
        self.cache.clear();
    }

    pub fn clear(&mut self) {
        self.bars.clear();
        self.cache.clear();
    }

    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Height of a bar as a share of the plot, clamped to the axis.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn bar_height_fraction(value: f64) -> f32 {
    (value / Y_MAX).clamp(0.0, 1.0) as f32
}

impl<Message> canvas::Program<Message> for BarChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let grid_color = Color {
            a: opacity::OVERLAY_SUBTLE,
            ..theme.palette().text
        };

        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let height = frame.height();
                let width = frame.width();

                for step in GRID_STEPS {
                    let y = height * (1.0 - bar_height_fraction(step));
                    frame.stroke(
                        &Path::line(Point::new(0.0, y), Point::new(width, y)),
                        Stroke::default().with_width(1.0).with_color(grid_color),
                    );
                }

                if self.bars.is_empty() {
                    return;
                }

                #[allow(clippy::cast_precision_loss)]
                let slot = width / self.bars.len() as f32;
                let bar_width = slot * (1.0 - BAR_GAP);

                for (index, bar) in self.bars.iter().enumerate() {
                    let bar_height = height * bar_height_fraction(bar.value);
                    if bar_height <= 0.0 {
                        continue;
                    }
                    #[allow(clippy::cast_precision_loss)]
                    let x = slot * index as f32 + (slot - bar_width) / 2.0;
                    frame.fill_rectangle(
                        Point::new(x, height - bar_height),
                        Size::new(bar_width, bar_height),
                        Color { a: 0.8, ..bar.color },
                    );
                }
            });

        vec![geometry]
    }
}

pub fn view(chart: &BarChart) -> Element<'_, Message> {
    let y_axis = GRID_STEPS
        .iter()
        .rev()
        .fold(Column::new().height(Length::Fill), |column, step| {
            let align = if *step == GRID_STEPS[GRID_STEPS.len() - 1] {
                alignment::Vertical::Top
            } else if *step == GRID_STEPS[0] {
                alignment::Vertical::Bottom
            } else {
                alignment::Vertical::Center
            };
            column.push(
                Container::new(
                    Text::new(format!("{step}%"))
                        .size(typography::CAPTION)
                        .color(muted_text_color()),
                )
                .height(Length::Fill)
                .align_y(align),
            )
        });

    // Transparent hover targets carrying the exact values.
    let hover_targets = chart.bars().iter().fold(Row::new(), |row, bar| {
        let target = Container::new(Text::new(""))
            .width(Length::Fill)
            .height(Length::Fill);
        let tip = Container::new(
            Text::new(format!("{}: {}%", bar.label, bar.value)).size(typography::CAPTION),
        )
        .padding(spacing::XS)
        .style(tooltip_style);
        row.push(
            Container::new(tooltip(target, tip, tooltip::Position::Top))
                .width(Length::FillPortion(1)),
        )
    });

    let plot = Stack::new()
        .push(
            Canvas::new(chart)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .push(hover_targets.width(Length::Fill).height(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fixed(sizing::CHART_HEIGHT));

    let x_labels = chart.bars().iter().fold(Row::new(), |row, bar| {
        row.push(
            Container::new(
                Text::new(bar.label.as_str())
                    .size(typography::CAPTION)
                    .color(muted_text_color()),
            )
            .width(Length::FillPortion(1))
            .align_x(alignment::Horizontal::Center),
        )
    });

    Column::new()
        .spacing(spacing::XXS)
        .push(
            Row::new()
                .spacing(spacing::XS)
                .push(
                    Container::new(y_axis)
                        .width(Length::Fixed(sizing::ICON_XL))
                        .height(Length::Fixed(sizing::CHART_HEIGHT)),
                )
                .push(plot),
        )
        .push(
            Row::new()
                .spacing(spacing::XS)
                .push(Container::new(Text::new("")).width(Length::Fixed(sizing::ICON_XL)))
                .push(
                    x_labels
                        .width(Length::Fill)
                        .height(Length::Fixed(sizing::CHART_LABEL_HEIGHT)),
                ),
        )
        .into()
}

fn tooltip_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.strong.color)),
        text_color: Some(palette.background.strong.text),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
