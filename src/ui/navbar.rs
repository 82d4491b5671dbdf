// SPDX-License-Identifier: MPL-2.0
//! Header bar with the application title, model status and global actions.
//!
//! The theme toggle and the info button live here. Both are forwarded to the
//! application as [`Event`]s.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theme::muted_text_color;
use crate::ui::theming::ThemeMode;
use iced::{
    alignment::Vertical,
    widget::{button, tooltip, Container, Row, Text},
    Element, Length,
};

/// State of the model as reported by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModelStatus {
    /// Model info not fetched yet.
    #[default]
    Checking,
    /// The service reports a trained model.
    Trained,
    /// No model info, or no trained model loaded.
    Default,
}

impl ModelStatus {
    #[must_use]
    pub fn from_model_loaded(model_loaded: bool) -> Self {
        if model_loaded {
            ModelStatus::Trained
        } else {
            ModelStatus::Default
        }
    }

    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ModelStatus::Checking => "model-status-checking",
            ModelStatus::Trained => "model-status-trained",
            ModelStatus::Default => "model-status-default",
        }
    }
}

/// Contextual data needed to render the navbar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub theme_mode: ThemeMode,
    pub model_status: &'a ModelStatus,
}

/// Messages emitted by the navbar.
#[derive(Debug, Clone)]
pub enum Message {
    ToggleTheme,
    OpenAbout,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ToggleTheme,
    OpenAbout,
}

#[must_use]
pub fn update(message: &Message) -> Event {
    match message {
        Message::ToggleTheme => Event::ToggleTheme,
        Message::OpenAbout => Event::OpenAbout,
    }
}

/// Render the navigation bar.
#[allow(clippy::needless_pass_by_value)]
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let brand = Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(
            Text::new("◉")
                .size(typography::TITLE_MD)
                .color(palette::PRIMARY_500),
        )
        .push(Text::new(ctx.i18n.tr("window-title")).size(typography::TITLE_MD));

    let status = Row::new()
        .spacing(spacing::XXS)
        .align_y(Vertical::Center)
        .push(
            Text::new(ctx.i18n.tr("model-status-label"))
                .size(typography::BODY_SM)
                .color(muted_text_color()),
        )
        .push(Text::new(ctx.i18n.tr(ctx.model_status.i18n_key())).size(typography::BODY_SM));

    let theme_button = tooltip(
        button(Text::new(ctx.theme_mode.toggle_icon()).size(sizing::ICON_MD))
            .on_press(Message::ToggleTheme)
            .padding(spacing::XS)
            .style(styles::button::icon),
        Text::new(ctx.i18n.tr("navbar-toggle-theme")).size(typography::CAPTION),
        tooltip::Position::Bottom,
    );

    let info_button = button(Text::new(ctx.i18n.tr("navbar-info-button")))
        .on_press(Message::OpenAbout)
        .style(styles::button::secondary);

    let bar = Row::new()
        .spacing(spacing::MD)
        .align_y(Vertical::Center)
        .push(Container::new(brand).width(Length::Fill))
        .push(status)
        .push(theme_button)
        .push(info_button);

    Container::new(bar)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::NAVBAR_HEIGHT))
        .padding([spacing::XS, spacing::LG])
        .align_y(Vertical::Center)
        .style(styles::container::panel)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_map_to_events() {
        assert_eq!(update(&Message::ToggleTheme), Event::ToggleTheme);
        assert_eq!(update(&Message::OpenAbout), Event::OpenAbout);
    }

    #[test]
    fn model_status_follows_model_loaded() {
        assert_eq!(ModelStatus::from_model_loaded(true), ModelStatus::Trained);
        assert_eq!(ModelStatus::from_model_loaded(false), ModelStatus::Default);
        assert_eq!(ModelStatus::default().i18n_key(), "model-status-checking");
    }

    #[test]
    fn navbar_view_renders() {
        let i18n = I18n::default();
        let status = ModelStatus::Trained;
        let _element = view(ViewContext {
            i18n: &i18n,
            theme_mode: ThemeMode::Dark,
            model_status: &status,
        });
    }
}
