// SPDX-License-Identifier: MPL-2.0
//! Grid of the classes the model knows about.

use crate::classifier::{ClassCatalog, ClassInfo};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theme::{class_color, muted_text_color};
use iced::widget::{Column, Container, Row, Text};
use iced::{alignment, Element, Length};

/// Cards per row.
pub const COLUMNS: usize = 5;

fn card<'a, Message: 'a>(class: &'a ClassInfo) -> Element<'a, Message> {
    let content = Column::new()
        .spacing(spacing::XXS)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new(class.emoji.as_str()).size(typography::TITLE_LG))
        .push(Text::new(class.name.as_str()).size(typography::BODY))
        .push(
            Text::new(class.description.as_str())
                .size(typography::CAPTION)
                .color(muted_text_color()),
        );

    Container::new(content)
        .width(Length::Fixed(sizing::CLASS_CARD_WIDTH))
        .padding(spacing::SM)
        .align_x(alignment::Horizontal::Center)
        .style(styles::container::class_card(class_color(&class.color)))
        .into()
}

/// One card per catalog class, in catalog order.
pub fn view<'a, Message: 'a>(catalog: &'a ClassCatalog, i18n: &'a I18n) -> Element<'a, Message> {
    let title = Text::new(i18n.tr("classes-title")).size(typography::TITLE_MD);

    if catalog.is_empty() {
        return Column::new()
            .spacing(spacing::SM)
            .push(title)
            .push(
                Text::new(i18n.tr("classes-empty"))
                    .size(typography::BODY_SM)
                    .color(muted_text_color()),
            )
            .into();
    }

    let classes: Vec<&ClassInfo> = catalog.iter().collect();
    let rows = classes.chunks(COLUMNS).fold(
        Column::new().spacing(spacing::SM),
        |column, chunk| {
            let row = chunk
                .iter()
                .fold(Row::new().spacing(spacing::SM), |row, &class| {
                    row.push(card::<Message>(class))
                });
            column.push(row)
        },
    );

    Column::new()
        .spacing(spacing::SM)
        .push(title)
        .push(rows)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    enum TestMessage {}

    fn catalog(size: usize) -> ClassCatalog {
        ClassCatalog::new(
            (0..size)
                .map(|i| ClassInfo {
                    key: format!("class-{i}"),
                    name: format!("Class {i}"),
                    emoji: "🐾".to_string(),
                    description: String::new(),
                    color: "#f97316".to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn grid_renders_for_full_and_empty_catalogs() {
        let i18n = I18n::default();
        let full = catalog(10);
        let _element: Element<'_, TestMessage> = view(&full, &i18n);
        let empty = ClassCatalog::default();
        let _element: Element<'_, TestMessage> = view(&empty, &i18n);
    }
}
