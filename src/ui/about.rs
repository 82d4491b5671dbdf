// SPDX-License-Identifier: MPL-2.0
//! Info screen describing the application, the model and the keyboard shortcuts.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{radius, spacing, typography};
use crate::ui::navbar::ModelStatus;
use crate::ui::styles;
use crate::ui::theme::muted_text_color;
use iced::{
    alignment::{Horizontal, Vertical},
    widget::{button, container, rule, scrollable, text, Column, Container, Row, Text},
    Border, Element, Length, Theme,
};

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Contextual data needed to render the info screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub server_url: &'a str,
    pub model_status: &'a ModelStatus,
    pub class_count: usize,
}

/// Messages emitted by the info screen.
#[derive(Debug, Clone)]
pub enum Message {
    Back,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    Back,
}

#[must_use]
pub fn update(message: &Message) -> Event {
    match message {
        Message::Back => Event::Back,
    }
}

/// Render the info screen.
#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let back_button = button(text(format!("← {}", ctx.i18n.tr("about-back-button"))).size(typography::BODY))
        .on_press(Message::Back)
        .style(styles::button::secondary);

    let title = Text::new(ctx.i18n.tr("about-title")).size(typography::TITLE_LG);

    let content = Column::new()
        .width(Length::Fill)
        .max_width(720.0)
        .spacing(spacing::LG)
        .align_x(Horizontal::Left)
        .padding(spacing::MD)
        .push(back_button)
        .push(title)
        .push(build_app_section(&ctx))
        .push(build_model_section(&ctx))
        .push(build_shortcuts_section(&ctx))
        .push(build_license_section(&ctx));

    Container::new(scrollable(content))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .into()
}

fn build_app_section<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let content = Column::new()
        .spacing(spacing::XS)
        .push(
            Row::new()
                .spacing(spacing::SM)
                .align_y(Vertical::Center)
                .push(Text::new(ctx.i18n.tr("window-title")).size(typography::TITLE_MD))
                .push(Text::new(format!("v{APP_VERSION}")).size(typography::BODY)),
        )
        .push(Text::new(ctx.i18n.tr("about-app-description")).size(typography::BODY));

    build_section(ctx.i18n.tr("about-section-app"), content.into())
}

fn build_model_section<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let content = Column::new()
        .spacing(spacing::XS)
        .push(build_item(
            ctx.i18n.tr("about-model-architecture"),
            ctx.i18n.tr("about-model-architecture-value"),
        ))
        .push(build_item(
            ctx.i18n.tr("about-model-dataset"),
            ctx.i18n.tr("about-model-dataset-value"),
        ))
        .push(build_item(
            ctx.i18n.tr("model-status-label"),
            ctx.i18n.tr(ctx.model_status.i18n_key()),
        ))
        .push(build_item(
            ctx.i18n.tr("about-model-classes"),
            ctx.class_count.to_string(),
        ))
        .push(build_item(
            ctx.i18n.tr("about-server"),
            ctx.server_url.to_string(),
        ));

    build_section(ctx.i18n.tr("about-section-model"), content.into())
}

fn build_shortcuts_section<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let content = Column::new()
        .spacing(spacing::XS)
        .push(build_item(
            "Ctrl+O".to_string(),
            ctx.i18n.tr("about-shortcut-open"),
        ))
        .push(build_item(
            "Esc".to_string(),
            ctx.i18n.tr("about-shortcut-clear"),
        ));

    build_section(ctx.i18n.tr("about-section-shortcuts"), content.into())
}

fn build_license_section<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    build_section(
        ctx.i18n.tr("about-section-license"),
        Text::new(ctx.i18n.tr("about-license-text"))
            .size(typography::BODY)
            .into(),
    )
}

fn build_item<'a>(label: String, value: String) -> Element<'a, Message> {
    Row::new()
        .spacing(spacing::SM)
        .push(
            Text::new(format!("{label}:"))
                .size(typography::BODY)
                .color(muted_text_color()),
        )
        .push(Text::new(value).size(typography::BODY))
        .into()
}

fn build_section(title: String, content: Element<'_, Message>) -> Element<'_, Message> {
    let inner = Column::new()
        .spacing(spacing::SM)
        .push(Text::new(title).size(typography::TITLE_SM))
        .push(rule::horizontal(1))
        .push(content);

    Container::new(inner)
        .padding(spacing::MD)
        .width(Length::Fill)
        .style(|theme: &Theme| container::Style {
            background: Some(theme.extended_palette().background.weak.color.into()),
            border: Border {
                radius: radius::MD.into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn about_view_renders() {
        let i18n = I18n::default();
        let status = ModelStatus::Default;
        let _element = view(ViewContext {
            i18n: &i18n,
            server_url: "http://127.0.0.1:5000",
            model_status: &status,
            class_count: 10,
        });
    }

    #[test]
    fn back_emits_event() {
        assert!(matches!(update(&Message::Back), Event::Back));
    }

    #[test]
    fn app_version_is_valid() {
        assert!(!APP_VERSION.is_empty());
    }
}
