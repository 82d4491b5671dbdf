// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The particle background fills the window; the header and the current
//! screen are drawn over it, and toasts float above everything.

use super::{Message, Screen};
use crate::classifier::ClassCatalog;
use crate::i18n::fluent::I18n;
use crate::ui::about::{self, ViewContext as AboutViewContext};
use crate::ui::class_grid;
use crate::ui::design_tokens::{sizing, spacing};
use crate::ui::navbar::{self, ModelStatus, ViewContext as NavbarViewContext};
use crate::ui::notifications::{self, Toast};
use crate::ui::particles::ParticleField;
use crate::ui::results::{self, ResultsState};
use crate::ui::styles;
use crate::ui::theming::ThemeMode;
use crate::ui::upload_card;
use iced::widget::{canvas::Canvas, scrollable, Column, Container, Row, Stack};
use iced::{Element, Length};
use std::time::Instant;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    pub theme_mode: ThemeMode,
    pub particles: &'a ParticleField,
    pub notifications: &'a notifications::Manager,
    pub upload: &'a upload_card::State,
    pub results: &'a ResultsState,
    pub catalog: &'a ClassCatalog,
    pub model_status: &'a ModelStatus,
    pub server_url: &'a str,
    pub analyzing: bool,
    pub spinner_rotation: f32,
    pub has_samples: bool,
    pub now: Instant,
}

/// Renders the current application view based on the active screen.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let navbar_view = navbar::view(NavbarViewContext {
        i18n: ctx.i18n,
        theme_mode: ctx.theme_mode,
        model_status: ctx.model_status,
    })
    .map(Message::Navbar);

    let current_view: Element<'_, Message> = match ctx.screen {
        Screen::Classifier => view_classifier(&ctx),
        Screen::About => about::view(AboutViewContext {
            i18n: ctx.i18n,
            server_url: ctx.server_url,
            model_status: ctx.model_status,
            class_count: ctx.catalog.len(),
        })
        .map(Message::About),
    };

    let content = Column::new()
        .push(navbar_view)
        .push(
            Container::new(current_view)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill);

    let background: Element<'_, Message> = Canvas::new(ctx.particles)
        .width(Length::Fill)
        .height(Length::Fill)
        .into();

    let toasts = Toast::view_overlay(ctx.notifications, ctx.i18n, ctx.now).map(Message::Notification);

    Stack::new()
        .push(
            Container::new(background)
                .width(Length::Fill)
                .height(Length::Fill)
                .style(styles::container::backdrop),
        )
        .push(content)
        .push(toasts)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_classifier<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let upload = upload_card::view(upload_card::ViewContext {
        i18n: ctx.i18n,
        state: ctx.upload,
        analyzing: ctx.analyzing,
        spinner_rotation: ctx.spinner_rotation,
        has_samples: ctx.has_samples,
    })
    .map(Message::Upload);

    let results_view = results::view(results::ViewContext {
        i18n: ctx.i18n,
        state: ctx.results,
    })
    .map(Message::Results);

    let main_row = Row::new()
        .spacing(spacing::LG)
        .push(Container::new(upload).width(Length::Fixed(sizing::SIDE_COLUMN_WIDTH)))
        .push(Container::new(results_view).width(Length::Fill));

    let classes = Container::new(class_grid::view::<Message>(ctx.catalog, ctx.i18n))
        .width(Length::Fill)
        .padding(spacing::LG)
        .style(styles::container::panel);

    scrollable(
        Column::new()
            .spacing(spacing::LG)
            .padding(spacing::LG)
            .push(main_row)
            .push(classes),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
