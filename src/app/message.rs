// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::classifier::{ApiError, ClassificationResult, ModelInfo, TestPrediction};
use crate::ui::about;
use crate::ui::navbar;
use crate::ui::notifications;
use crate::ui::results;
use crate::ui::upload_card;
use crate::upload::{ReadEvent, UploadedImage};
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Navbar(navbar::Message),
    About(about::Message),
    Upload(upload_card::Message),
    Results(results::Message),
    Notification(notifications::NotificationMessage),
    /// Result from the open file dialog.
    FileDialogClosed(Option<PathBuf>),
    /// A file is being dragged over the window.
    FileHovered,
    /// The dragged file left the window.
    FilesHoveredLeft,
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// Ctrl/Cmd+O.
    OpenShortcut,
    EscapePressed,
    /// Progress or completion of a file read started for `generation`.
    FileRead {
        generation: u64,
        event: ReadEvent,
    },
    /// Download of a sample image started for `generation`.
    SampleLoaded {
        generation: u64,
        result: crate::error::Result<UploadedImage>,
    },
    /// Response to the analysis started for `generation`.
    ClassificationCompleted {
        generation: u64,
        result: Result<ClassificationResult, ApiError>,
    },
    /// Test prediction requested by the fallback of analysis `generation`.
    TestPredictionLoaded {
        generation: u64,
        result: Result<TestPrediction, ApiError>,
    },
    ModelInfoLoaded(Result<ModelInfo, ApiError>),
    ServerChecked(Result<(), ApiError>),
    /// Animation frame for particles, spinner and toasts.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional inference service URL, overriding the config file.
    pub server_url: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `CIFAR_LENS_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Optional image path to preload on startup.
    pub file_path: Option<String>,
}
