// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Handlers receive an [`UpdateContext`] of borrowed sub-states and return the
//! follow-up [`Task`]. All state changes happen here, on the update loop.

use super::{persistence, Analysis, Message, Screen};
use crate::classifier::{
    fallback, ApiClient, ApiError, ClassCatalog, ClassificationResult, ModelInfo, TestPrediction,
};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::ui::about::{self, Event as AboutEvent};
use crate::ui::navbar::{self, Event as NavbarEvent, ModelStatus};
use crate::ui::notifications::{self, Notification};
use crate::ui::particles::ParticleField;
use crate::ui::results::ResultsState;
use crate::ui::theming::ThemeMode;
use crate::ui::upload_card;
use crate::upload::{self, ReadEvent, UploadError, UploadedImage, IMAGE_EXTENSIONS};
use iced::Task;
use rand::seq::SliceRandom;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Duration of one particle animation step at 60 fps.
const PARTICLE_FRAME: Duration = Duration::from_micros(16_667);

/// Upper bound of particle steps per tick, after a stall.
const MAX_PARTICLE_FRAMES: f32 = 4.0;

/// Context for update operations containing mutable references to app state.
pub struct UpdateContext<'a> {
    pub i18n: &'a I18n,
    pub screen: &'a mut Screen,
    pub theme_mode: &'a mut ThemeMode,
    pub particles: &'a mut ParticleField,
    pub notifications: &'a mut notifications::Manager,
    pub upload: &'a mut upload_card::State,
    pub results: &'a mut ResultsState,
    pub analysis: &'a mut Analysis,
    pub analysis_generation: &'a mut u64,
    pub catalog: &'a mut ClassCatalog,
    pub model_status: &'a mut ModelStatus,
    pub client: Option<&'a ApiClient>,
    pub config_dir: Option<&'a PathBuf>,
    pub sample_urls: &'a [String],
    pub last_tick: &'a mut Option<Instant>,
}

// =============================================================================
// Navigation
// =============================================================================

pub fn handle_navbar_message(ctx: &mut UpdateContext<'_>, message: &navbar::Message) -> Task<Message> {
    match navbar::update(message) {
        NavbarEvent::ToggleTheme => toggle_theme(ctx),
        NavbarEvent::OpenAbout => {
            *ctx.screen = Screen::About;
            Task::none()
        }
    }
}

pub fn handle_about_message(ctx: &mut UpdateContext<'_>, message: &about::Message) -> Task<Message> {
    match about::update(message) {
        AboutEvent::Back => {
            *ctx.screen = Screen::Classifier;
            Task::none()
        }
    }
}

// =============================================================================
// Theme
// =============================================================================

/// Switches light/dark, recolors the particles, persists the choice and
/// tells the user.
pub fn toggle_theme(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let theme_mode = ctx.theme_mode.toggled();
    *ctx.theme_mode = theme_mode;
    ctx.particles.set_color(theme_mode.particle_color());

    if let Err(err) = persistence::persist_theme(theme_mode, ctx.config_dir.cloned()) {
        tracing::warn!(error = %err, "failed to save theme preference");
    }

    let theme_name = ctx.i18n.tr(theme_mode.label_key());
    ctx.notifications.push(
        Notification::info("notification-theme-switched").with_arg("theme", theme_name),
    );
    Task::none()
}

// =============================================================================
// Upload
// =============================================================================

pub fn handle_upload_message(
    ctx: &mut UpdateContext<'_>,
    message: &upload_card::Message,
) -> Task<Message> {
    match message {
        upload_card::Message::Browse => open_file_dialog(),
        upload_card::Message::Analyze => analyze(ctx),
        upload_card::Message::Clear => clear(ctx),
        upload_card::Message::UseSample => load_sample(ctx),
    }
}

pub fn open_file_dialog() -> Task<Message> {
    Task::perform(
        async {
            rfd::AsyncFileDialog::new()
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file()
                .await
                .map(|handle| handle.path().to_path_buf())
        },
        Message::FileDialogClosed,
    )
}

/// Where a candidate file came from; drops get their own rejection message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOrigin {
    Picker,
    Drop,
}

/// Validates `path` and starts reading it.
///
/// A rejected file leaves the held image, its preview and the results as
/// they were.
pub fn open_path(ctx: &mut UpdateContext<'_>, path: PathBuf, origin: FileOrigin) -> Task<Message> {
    ctx.upload.set_hovering(false);

    let file = match upload::inspect(&path) {
        Ok(file) => file,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "file rejected");
            ctx.notifications.push(rejection_notification(&err, origin));
            return Task::none();
        }
    };

    tracing::info!(file = %file.file_name, size = file.size, "reading image");
    let generation = ctx.upload.begin_read();
    Task::stream(upload::read_with_progress(file))
        .map(move |event| Message::FileRead { generation, event })
}

fn rejection_notification(err: &UploadError, origin: FileOrigin) -> Notification {
    match (err, origin) {
        (UploadError::NotAnImage, FileOrigin::Drop) => {
            Notification::error("notification-drop-not-image")
        }
        (UploadError::TooLarge { size }, _) => Notification::error(err.i18n_key())
            .with_arg("size", format_mib(*size)),
        (UploadError::Io(reason), _) => {
            Notification::error(err.i18n_key()).with_arg("reason", reason.clone())
        }
        _ => Notification::error(err.i18n_key()),
    }
}

#[allow(clippy::cast_precision_loss)]
fn format_mib(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / (1024.0 * 1024.0))
}

pub fn handle_file_read(
    ctx: &mut UpdateContext<'_>,
    generation: u64,
    event: ReadEvent,
) -> Task<Message> {
    match event {
        ReadEvent::Progress(progress) => ctx.upload.set_progress(generation, progress),
        ReadEvent::Finished(Ok(image)) => {
            let file_name = image.file_name().to_string();
            if ctx.upload.finish_read(generation, image) {
                tracing::info!(file = %file_name, "image ready");
                ctx.notifications.push(
                    Notification::success("notification-upload-success")
                        .with_arg("file", file_name),
                );
            } else {
                tracing::debug!(generation, "discarding stale read");
            }
        }
        ReadEvent::Finished(Err(err)) => {
            if ctx.upload.abort_read(generation) {
                tracing::warn!(error = %err, "image read failed");
                ctx.notifications
                    .push(rejection_notification(&err, FileOrigin::Picker));
            }
        }
    }
    Task::none()
}

/// Downloads one of the configured sample images.
pub fn load_sample(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(client) = ctx.client.cloned() else {
        ctx.notifications
            .push(Notification::error("notification-sample-failed").with_arg("reason", "offline"));
        return Task::none();
    };
    let Some(url) = ctx.sample_urls.choose(&mut rand::thread_rng()).cloned() else {
        return Task::none();
    };

    let generation = ctx.upload.begin_read();
    Task::perform(
        async move {
            let bytes = client.fetch_sample(&url).await?;
            Ok::<_, Error>(UploadedImage::from_bytes(upload::SAMPLE_FILE_NAME, bytes)?)
        },
        move |result| Message::SampleLoaded { generation, result },
    )
}

pub fn handle_sample_loaded(
    ctx: &mut UpdateContext<'_>,
    generation: u64,
    result: crate::error::Result<UploadedImage>,
) -> Task<Message> {
    match result {
        Ok(image) => {
            if ctx.upload.finish_read(generation, image) {
                ctx.notifications
                    .push(Notification::success("notification-sample-loaded"));
            }
        }
        Err(err) => {
            if ctx.upload.abort_read(generation) {
                tracing::warn!(error = %err, "sample image download failed");
                ctx.notifications.push(
                    Notification::error("notification-sample-failed")
                        .with_arg("reason", err.to_string()),
                );
            }
        }
    }
    Task::none()
}

// =============================================================================
// Analysis
// =============================================================================

/// Sends the held image to the classifier.
pub fn analyze(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    if ctx.analysis.is_busy() {
        return Task::none();
    }
    let Some(image) = ctx.upload.image().cloned() else {
        ctx.notifications
            .push(Notification::warning("notification-no-image"));
        return Task::none();
    };
    let Some(client) = ctx.client.cloned() else {
        return fail_analysis(
            ctx,
            &ApiError::Transport("no HTTP client available".to_string()),
        );
    };

    let generation = next_analysis_generation(ctx.analysis_generation);
    tracing::info!(file = %image.file_name(), generation, "starting analysis");
    *ctx.analysis = Analysis::Classifying {
        started: Instant::now(),
        generation,
    };
    Task::perform(
        async move { client.classify(&image).await },
        move |result| Message::ClassificationCompleted { generation, result },
    )
}

fn next_analysis_generation(counter: &mut u64) -> u64 {
    *counter = counter.wrapping_add(1);
    *counter
}

pub fn handle_classification_completed(
    ctx: &mut UpdateContext<'_>,
    generation: u64,
    result: Result<ClassificationResult, ApiError>,
) -> Task<Message> {
    let current = matches!(
        *ctx.analysis,
        Analysis::Classifying { generation: active, .. } if active == generation
    );
    if !current {
        tracing::debug!(generation, "ignoring stale classification result");
        return Task::none();
    }

    match result {
        Ok(result) => {
            *ctx.analysis = Analysis::Idle;
            if let Some(warning) = result.consistency_warning() {
                tracing::warn!(%warning, "inconsistent classification response");
            }
            if let Some(top) = result.top() {
                tracing::info!(class = %top.class_name, confidence = top.confidence, "analysis complete");
            }
            ctx.results.display(result);
            ctx.notifications
                .push(Notification::success("notification-analysis-complete"));
            Task::none()
        }
        Err(err) => fail_analysis(ctx, &err),
    }
}

/// Reports a failed classification and switches to the test prediction.
fn fail_analysis(ctx: &mut UpdateContext<'_>, err: &ApiError) -> Task<Message> {
    tracing::error!(error = %err, "analysis failed");
    ctx.notifications.push(
        Notification::error("notification-analysis-failed").with_arg("reason", err.to_string()),
    );
    use_test_prediction(ctx)
}

/// Requests a synthetic prediction to keep the result views populated.
pub fn use_test_prediction(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(client) = ctx.client.cloned() else {
        *ctx.analysis = Analysis::Idle;
        return Task::none();
    };
    let generation = match ctx.analysis.generation() {
        Some(generation) => generation,
        None => next_analysis_generation(ctx.analysis_generation),
    };
    *ctx.analysis = Analysis::FallingBack {
        started: ctx.analysis.started().unwrap_or_else(Instant::now),
        generation,
    };
    Task::perform(
        async move { client.test_prediction().await },
        move |result| Message::TestPredictionLoaded { generation, result },
    )
}

pub fn handle_test_prediction(
    ctx: &mut UpdateContext<'_>,
    generation: u64,
    result: Result<TestPrediction, ApiError>,
) -> Task<Message> {
    let current = matches!(
        *ctx.analysis,
        Analysis::FallingBack { generation: active, .. } if active == generation
    );
    if !current {
        tracing::debug!(generation, "ignoring stale test prediction");
        return Task::none();
    }
    *ctx.analysis = Analysis::Idle;

    match result {
        Ok(prediction) => {
            let result = fallback::synthesize(&prediction, ctx.catalog, &mut rand::thread_rng());
            tracing::info!(class = %prediction.class_name, "showing test prediction");
            ctx.results.display(result);
            ctx.notifications
                .push(Notification::warning("notification-test-prediction"));
        }
        Err(err) => {
            tracing::error!(error = %err, "test prediction failed");
        }
    }
    Task::none()
}

/// Drops the held image and resets every result view.
pub fn clear(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    ctx.upload.clear();
    ctx.results.clear();
    *ctx.analysis = Analysis::Idle;
    ctx.notifications
        .push(Notification::info("notification-image-cleared"));
    Task::none()
}

/// Escape only clears when there is something to clear.
pub fn handle_escape(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    if ctx.upload.has_image() || ctx.upload.is_reading() || ctx.results.result().is_some() {
        clear(ctx)
    } else {
        Task::none()
    }
}

// =============================================================================
// Startup requests
// =============================================================================

pub fn load_model_info(client: Option<&ApiClient>) -> Task<Message> {
    let Some(client) = client.cloned() else {
        return Task::none();
    };
    Task::perform(
        async move { client.model_info().await },
        Message::ModelInfoLoaded,
    )
}

pub fn check_server(client: Option<&ApiClient>) -> Task<Message> {
    let Some(client) = client.cloned() else {
        return Task::done(Message::ServerChecked(Err(ApiError::Transport(
            "no HTTP client available".to_string(),
        ))));
    };
    Task::perform(async move { client.ping().await }, Message::ServerChecked)
}

pub fn handle_model_info(
    ctx: &mut UpdateContext<'_>,
    result: Result<ModelInfo, ApiError>,
) -> Task<Message> {
    match result {
        Ok(info) => {
            tracing::info!(
                classes = info.classes.len(),
                model_loaded = info.model_loaded,
                "model info loaded"
            );
            *ctx.model_status = ModelStatus::from_model_loaded(info.model_loaded);
            *ctx.catalog = info.classes;
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load model info");
            *ctx.model_status = ModelStatus::Default;
        }
    }
    Task::none()
}

pub fn handle_server_checked(ctx: &mut UpdateContext<'_>, result: &Result<(), ApiError>) -> Task<Message> {
    if let Err(err) = result {
        tracing::warn!(error = %err, "inference service unreachable");
        ctx.notifications
            .push(Notification::warning("notification-server-issue"));
    }
    Task::none()
}

// =============================================================================
// Animation
// =============================================================================

/// Advances toasts and particles to `now`.
pub fn handle_tick(ctx: &mut UpdateContext<'_>, now: Instant) -> Task<Message> {
    ctx.notifications.tick_at(now);

    let frames = ctx.last_tick.map_or(1.0, |last| particle_frames(now.saturating_duration_since(last)));
    *ctx.last_tick = Some(now);
    if !ctx.particles.is_empty() {
        ctx.particles.step(frames);
    }
    Task::none()
}

/// Number of 60 fps particle steps covered by `elapsed`.
#[must_use]
pub fn particle_frames(elapsed: Duration) -> f32 {
    (elapsed.as_secs_f32() / PARTICLE_FRAME.as_secs_f32()).min(MAX_PARTICLE_FRAMES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_frames_follow_elapsed_time() {
        assert!((particle_frames(PARTICLE_FRAME) - 1.0).abs() < 1e-3);
        assert!((particle_frames(PARTICLE_FRAME * 2) - 2.0).abs() < 1e-3);
        assert_eq!(particle_frames(Duration::from_secs(3)), MAX_PARTICLE_FRAMES);
        assert_eq!(particle_frames(Duration::ZERO), 0.0);
    }

    #[test]
    fn dropped_non_image_gets_drop_message() {
        let notification = rejection_notification(&UploadError::NotAnImage, FileOrigin::Drop);
        assert_eq!(notification.message_key(), "notification-drop-not-image");
        let notification = rejection_notification(&UploadError::NotAnImage, FileOrigin::Picker);
        assert_eq!(notification.message_key(), "error-upload-not-image");
    }

    #[test]
    fn too_large_message_carries_size() {
        let notification = rejection_notification(
            &UploadError::TooLarge {
                size: 20 * 1024 * 1024,
            },
            FileOrigin::Picker,
        );
        assert_eq!(notification.message_key(), "error-upload-too-large");
        assert_eq!(
            notification.message_args(),
            &[("size".to_string(), "20.0".to_string())]
        );
    }
}
