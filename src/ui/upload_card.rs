// SPDX-License-Identifier: MPL-2.0
//! Upload card: drop zone, preview, read progress and the analysis controls.
//!
//! The card owns the image currently held for analysis. Reads are tagged
//! with a generation number so that a newer selection always wins over a
//! read that is still in flight.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theme::muted_text_color;
use crate::ui::widgets::{meter, AnimatedSpinner};
use crate::upload::UploadedImage;
use iced::widget::image::{Handle, Image};
use iced::widget::{button, mouse_area, Column, Container, Row, Text};
use iced::{alignment, ContentFit, Element, Length};

#[derive(Debug, Clone)]
pub enum Message {
    Browse,
    Analyze,
    Clear,
    UseSample,
}

/// Held image plus the transient state of the card.
#[derive(Debug, Default)]
pub struct State {
    image: Option<UploadedImage>,
    preview: Option<Handle>,
    generation: u64,
    progress: Option<f32>,
    hovering: bool,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new read and returns its generation.
    ///
    /// Any read started before is now stale.
    pub fn begin_read(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.progress = Some(0.0);
        self.generation
    }

    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn set_progress(&mut self, generation: u64, progress: f32) {
        if self.is_current(generation) {
            self.progress = Some(progress.clamp(0.0, 1.0));
        }
    }

    /// Replaces the held image. Ignored for stale generations.
    pub fn finish_read(&mut self, generation: u64, image: UploadedImage) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.preview = Some(Handle::from_bytes(image.bytes().to_vec()));
        self.image = Some(image);
        self.progress = None;
        true
    }

    /// Ends a failed read, keeping the previously held image.
    pub fn abort_read(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.progress = None;
        true
    }

    /// Drops the held image and cancels any read in flight.
    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.image = None;
        self.preview = None;
        self.progress = None;
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    #[must_use]
    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    #[must_use]
    pub fn progress(&self) -> Option<f32> {
        self.progress
    }

    #[must_use]
    pub fn is_reading(&self) -> bool {
        self.progress.is_some()
    }

    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
    pub analyzing: bool,
    /// Spinner angle in radians.
    pub spinner_rotation: f32,
    pub has_samples: bool,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let ViewContext {
        i18n,
        state,
        analyzing,
        spinner_rotation,
        has_samples,
    } = ctx;

    let zone_content: Element<'_, Message> = match &state.preview {
        Some(handle) => {
            let name = state.image.as_ref().map_or("", UploadedImage::file_name);
            Column::new()
                .spacing(spacing::XS)
                .align_x(alignment::Horizontal::Center)
                .push(
                    Image::new(handle.clone())
                        .content_fit(ContentFit::Contain)
                        .height(Length::Fixed(sizing::PREVIEW_MAX_HEIGHT)),
                )
                .push(
                    Text::new(name)
                        .size(typography::CAPTION)
                        .color(muted_text_color()),
                )
                .into()
        }
        None => {
            let hint_key = if state.hovering {
                "upload-drop-release"
            } else {
                "upload-drop-hint"
            };
            Column::new()
                .spacing(spacing::XS)
                .align_x(alignment::Horizontal::Center)
                .push(Text::new("🖼").size(typography::DISPLAY))
                .push(Text::new(i18n.tr(hint_key)).size(typography::BODY_LG))
                .push(
                    Text::new(i18n.tr("upload-constraints"))
                        .size(typography::CAPTION)
                        .color(muted_text_color()),
                )
                .into()
        }
    };

    let drop_zone = mouse_area(
        Container::new(zone_content)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::DROP_ZONE_HEIGHT))
            .padding(spacing::MD)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(styles::container::drop_zone(state.hovering)),
    )
    .on_press(Message::Browse);

    let mut content = Column::new()
        .spacing(spacing::MD)
        .push(Text::new(i18n.tr("upload-title")).size(typography::TITLE_MD))
        .push(drop_zone);

    if let Some(progress) = state.progress {
        content = content.push(
            Column::new()
                .spacing(spacing::XXS)
                .push(
                    Text::new(i18n.tr("upload-reading"))
                        .size(typography::CAPTION)
                        .color(muted_text_color()),
                )
                .push(meter::view::<Message>(
                    progress,
                    palette::PRIMARY_500,
                    sizing::PROGRESS_HEIGHT,
                )),
        );
    }

    let analyze_label: Element<'_, Message> = if analyzing {
        Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center)
            .push(
                AnimatedSpinner::new(palette::WHITE, spinner_rotation, sizing::ICON_SM)
                    .into_element::<Message>(),
            )
            .push(Text::new(i18n.tr("upload-analyzing")))
            .into()
    } else {
        Text::new(i18n.tr("upload-analyze")).into()
    };
    let analyze = button(
        Container::new(analyze_label)
            .height(Length::Fixed(sizing::BUTTON_HEIGHT))
            .align_y(alignment::Vertical::Center),
    )
    .on_press_maybe((!analyzing && !state.is_reading()).then_some(Message::Analyze))
    .style(styles::button::primary);

    let clear = button(
        Container::new(Text::new(i18n.tr("upload-clear")))
            .height(Length::Fixed(sizing::BUTTON_HEIGHT))
            .align_y(alignment::Vertical::Center),
    )
    .on_press_maybe((state.has_image() && !analyzing).then_some(Message::Clear))
    .style(styles::button::secondary);

    let mut actions = Row::new().spacing(spacing::SM).push(analyze).push(clear);
    if has_samples {
        actions = actions.push(
            button(
                Container::new(Text::new(i18n.tr("upload-use-sample")))
                    .height(Length::Fixed(sizing::BUTTON_HEIGHT))
                    .align_y(alignment::Vertical::Center),
            )
            .on_press_maybe((!analyzing).then_some(Message::UseSample))
            .style(styles::button::secondary),
        );
    }

    Container::new(content.push(actions))
        .width(Length::Fill)
        .padding(spacing::LG)
        .style(styles::container::panel)
        .into()
}
