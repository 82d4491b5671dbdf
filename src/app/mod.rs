// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration of the classifier client.
//!
//! The `App` struct owns every piece of shared state (held image, theme,
//! class catalog, results, notifications) and sequences the upload, the
//! inference requests and the result rendering in response to messages.

pub mod config;
mod message;
pub mod paths;
mod persistence;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::classifier::{ApiClient, ClassCatalog};
use crate::i18n::fluent::I18n;
use crate::ui::navbar::ModelStatus;
use crate::ui::notifications::{self, Notification};
use crate::ui::particles::ParticleField;
use crate::ui::results::ResultsState;
use crate::ui::theming::ThemeMode;
use crate::ui::upload_card;
use crate::ui::widgets::animated_spinner::spin_angle;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

/// Progress of the current analysis.
///
/// Every analysis gets a new generation; responses tagged with any other
/// generation are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Analysis {
    #[default]
    Idle,
    /// Waiting for `/api/upload`.
    Classifying { started: Instant, generation: u64 },
    /// Classification failed; waiting for `/api/test-prediction`.
    FallingBack { started: Instant, generation: u64 },
}

impl Analysis {
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !matches!(self, Analysis::Idle)
    }

    #[must_use]
    pub fn started(&self) -> Option<Instant> {
        match self {
            Analysis::Idle => None,
            Analysis::Classifying { started, .. } | Analysis::FallingBack { started, .. } => {
                Some(*started)
            }
        }
    }

    #[must_use]
    pub fn generation(&self) -> Option<u64> {
        match self {
            Analysis::Idle => None,
            Analysis::Classifying { generation, .. }
            | Analysis::FallingBack { generation, .. } => Some(*generation),
        }
    }
}

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    theme_mode: ThemeMode,
    particles: ParticleField,
    notifications: notifications::Manager,
    upload: upload_card::State,
    results: ResultsState,
    analysis: Analysis,
    analysis_generation: u64,
    catalog: ClassCatalog,
    model_status: ModelStatus,
    client: Option<ApiClient>,
    server_url: String,
    sample_urls: Vec<String>,
    /// Config directory given on the command line, if any.
    config_dir: Option<PathBuf>,
    last_tick: Option<Instant>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("theme_mode", &self.theme_mode)
            .field("has_image", &self.upload.has_image())
            .field("analysis", &self.analysis)
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 820;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1200;
pub const MIN_WINDOW_HEIGHT: u32 = 600;
pub const MIN_WINDOW_WIDTH: u32 = 800;

/// Builds the window settings.
#[allow(clippy::cast_precision_loss)]
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires `Fn` for the boot closure while flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state and kicks off the startup requests.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config_dir = flags.config_dir.map(PathBuf::from);
        let (config, config_warning) = config::load_with_override(config_dir.clone());
        let i18n = I18n::new(flags.lang, &config);

        let theme_mode = config
            .general
            .theme_mode
            .unwrap_or_else(ThemeMode::detect);
        let server_url = flags
            .server_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| config.server_url().to_string());

        let client = match ApiClient::new(server_url.as_str(), config.request_timeout()) {
            Ok(client) => Some(client),
            Err(err) => {
                tracing::error!(error = %err, "failed to build HTTP client");
                None
            }
        };
        tracing::info!(server = %server_url, theme = ?theme_mode, "starting client");

        let particles = ParticleField::new(
            config.particle_count(),
            theme_mode.particle_color(),
            &mut rand::thread_rng(),
        );

        let mut app = App {
            i18n,
            screen: Screen::default(),
            theme_mode,
            particles,
            notifications: notifications::Manager::new(),
            upload: upload_card::State::new(),
            results: ResultsState::new(),
            analysis: Analysis::Idle,
            analysis_generation: 0,
            catalog: ClassCatalog::default(),
            model_status: ModelStatus::default(),
            client,
            server_url,
            sample_urls: config.sample_image_urls(),
            config_dir,
            last_tick: None,
        };

        if let Some(key) = config_warning {
            app.notifications.push(Notification::warning(key));
        }

        let mut tasks = vec![
            update::load_model_info(app.client.as_ref()),
            update::check_server(app.client.as_ref()),
        ];
        if let Some(path) = flags.file_path {
            let mut ctx = app.update_context();
            tasks.push(update::open_path(
                &mut ctx,
                PathBuf::from(path),
                update::FileOrigin::Picker,
            ));
        }

        (app, Task::batch(tasks))
    }

    fn update_context(&mut self) -> update::UpdateContext<'_> {
        update::UpdateContext {
            i18n: &self.i18n,
            screen: &mut self.screen,
            theme_mode: &mut self.theme_mode,
            particles: &mut self.particles,
            notifications: &mut self.notifications,
            upload: &mut self.upload,
            results: &mut self.results,
            analysis: &mut self.analysis,
            analysis_generation: &mut self.analysis_generation,
            catalog: &mut self.catalog,
            model_status: &mut self.model_status,
            client: self.client.as_ref(),
            config_dir: self.config_dir.as_ref(),
            sample_urls: &self.sample_urls,
            last_tick: &mut self.last_tick,
        }
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.upload.image() {
            Some(image) => format!("{} - {app_name}", image.file_name()),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.iced_theme()
    }

    /// Whether anything on screen needs animation frames.
    fn is_animating(&self) -> bool {
        !self.particles.is_empty()
            || self.notifications.has_notifications()
            || self.analysis.is_busy()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(self.screen),
            subscription::create_tick_subscription(self.is_animating()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = self.update_context();

        match message {
            Message::Navbar(message) => update::handle_navbar_message(&mut ctx, &message),
            Message::About(message) => update::handle_about_message(&mut ctx, &message),
            Message::Upload(message) => update::handle_upload_message(&mut ctx, &message),
            Message::Results(message) => {
                ctx.results.handle_message(&message);
                Task::none()
            }
            Message::Notification(message) => {
                ctx.notifications.handle_message(&message);
                Task::none()
            }
            Message::FileDialogClosed(Some(path)) => {
                update::open_path(&mut ctx, path, update::FileOrigin::Picker)
            }
            Message::FileDialogClosed(None) => Task::none(),
            Message::FileHovered => {
                ctx.upload.set_hovering(true);
                Task::none()
            }
            Message::FilesHoveredLeft => {
                ctx.upload.set_hovering(false);
                Task::none()
            }
            Message::FileDropped(path) => update::open_path(&mut ctx, path, update::FileOrigin::Drop),
            Message::OpenShortcut => update::open_file_dialog(),
            Message::EscapePressed => update::handle_escape(&mut ctx),
            Message::FileRead { generation, event } => {
                update::handle_file_read(&mut ctx, generation, event)
            }
            Message::SampleLoaded { generation, result } => {
                update::handle_sample_loaded(&mut ctx, generation, result)
            }
            Message::ClassificationCompleted { generation, result } => {
                update::handle_classification_completed(&mut ctx, generation, result)
            }
            Message::TestPredictionLoaded { generation, result } => {
                update::handle_test_prediction(&mut ctx, generation, result)
            }
            Message::ModelInfoLoaded(result) => update::handle_model_info(&mut ctx, result),
            Message::ServerChecked(result) => update::handle_server_checked(&mut ctx, &result),
            Message::Tick(now) => update::handle_tick(&mut ctx, now),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let now = self.last_tick.unwrap_or_else(Instant::now);
        let spinner_rotation = self
            .analysis
            .started()
            .map_or(0.0, |started| spin_angle(now.saturating_duration_since(started)));

        view::view(view::ViewContext {
            i18n: &self.i18n,
            screen: self.screen,
            theme_mode: self.theme_mode,
            particles: &self.particles,
            notifications: &self.notifications,
            upload: &self.upload,
            results: &self.results,
            catalog: &self.catalog,
            model_status: &self.model_status,
            server_url: &self.server_url,
            analyzing: self.analysis.is_busy(),
            spinner_rotation,
            has_samples: !self.sample_urls.is_empty(),
            now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{
        ApiError, ClassInfo, ClassProbability, ClassificationResult, ModelInfo, Prediction,
        TestPrediction,
    };
    use crate::ui::results::top_prediction::TopPanel;
    use crate::ui::{navbar, results};
    use crate::upload::{ReadEvent, UploadedImage, MAX_UPLOAD_BYTES};
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn test_app() -> (App, TempDir) {
        let dir = tempdir().expect("temp dir");
        let config_path = dir.path().join("settings.toml");
        fs::write(
            &config_path,
            "[general]\ntheme_mode = \"light\"\n\n[appearance]\nparticles = false\n",
        )
        .expect("write config");
        let (app, _task) = App::new(Flags {
            lang: Some("en-US".to_string()),
            config_dir: Some(dir.path().to_string_lossy().into_owned()),
            ..Flags::default()
        });
        (app, dir)
    }

    fn hold_image(app: &mut App, name: &str) {
        let generation = app.upload.begin_read();
        let _ = app.update(Message::FileRead {
            generation,
            event: ReadEvent::Finished(Ok(UploadedImage::new(
                name,
                "image/png",
                b"\x89PNG\r\n\x1a\n".to_vec(),
            ))),
        });
    }

    fn catalog_info() -> ModelInfo {
        let class = |key: &str, color: &str| ClassInfo {
            key: key.to_string(),
            name: key.to_string(),
            emoji: String::new(),
            description: String::new(),
            color: color.to_string(),
        };
        ModelInfo {
            model_loaded: true,
            classes: ClassCatalog::new(vec![
                class("Airplane", "#f97316"),
                class("Cat", "#ec4899"),
                class("Dog", "#3b82f6"),
            ]),
            status: None,
        }
    }

    fn real_result() -> ClassificationResult {
        let prediction = |class: &str, confidence: f64| Prediction {
            class_name: class.to_string(),
            emoji: "🐱".to_string(),
            confidence,
            color: "#ec4899".to_string(),
            description: String::new(),
        };
        let probability = |class: &str, probability: f64| ClassProbability {
            class_name: class.to_string(),
            probability,
            color: "#ec4899".to_string(),
        };
        ClassificationResult {
            top_predictions: vec![prediction("Cat", 91.2), prediction("Dog", 6.3)],
            all_probabilities: vec![
                probability("Cat", 91.2),
                probability("Dog", 6.3),
                probability("Airplane", 2.5),
            ],
        }
    }

    fn classified(app: &App, result: Result<ClassificationResult, ApiError>) -> Message {
        Message::ClassificationCompleted {
            generation: app.analysis.generation().expect("analysis in flight"),
            result,
        }
    }

    fn test_prediction_loaded(app: &App, result: Result<TestPrediction, ApiError>) -> Message {
        Message::TestPredictionLoaded {
            generation: app.analysis.generation().expect("fallback in flight"),
            result,
        }
    }

    fn has_toast(app: &App, key: &str) -> bool {
        app.notifications.iter().any(|n| n.message_key() == key)
    }

    #[test]
    fn new_starts_on_classifier_screen_with_placeholder() {
        let (app, _dir) = test_app();
        assert_eq!(app.screen, Screen::Classifier);
        assert_eq!(app.theme_mode, ThemeMode::Light);
        assert!(app.results.top_panel().is_placeholder());
        assert!(!app.upload.has_image());
        assert!(app.particles.is_empty());
    }

    #[test]
    fn toggling_theme_twice_restores_and_persists() {
        let (mut app, dir) = test_app();
        let original = app.theme_mode;

        let _ = app.update(Message::Navbar(navbar::Message::ToggleTheme));
        assert_eq!(app.theme_mode, original.toggled());
        assert_eq!(app.particles.color(), original.toggled().particle_color());

        let _ = app.update(Message::Navbar(navbar::Message::ToggleTheme));
        assert_eq!(app.theme_mode, original);
        assert_eq!(app.particles.color(), original.particle_color());

        let (cfg, _) = config::load_with_override(Some(dir.path().to_path_buf()));
        assert_eq!(cfg.general.theme_mode, Some(original));
        assert!(has_toast(&app, "notification-theme-switched"));
    }

    #[test]
    fn analyze_without_image_only_warns() {
        let (mut app, _dir) = test_app();
        let _ = app.update(Message::Upload(upload_card::Message::Analyze));
        assert_eq!(app.analysis, Analysis::Idle);
        assert!(has_toast(&app, "notification-no-image"));
    }

    #[test]
    fn successful_classification_populates_every_view() {
        let (mut app, _dir) = test_app();
        hold_image(&mut app, "cat.png");
        let _ = app.update(Message::Upload(upload_card::Message::Analyze));
        assert!(matches!(app.analysis, Analysis::Classifying { .. }));

        let _ = app.update(classified(&app, Ok(real_result())));
        assert_eq!(app.analysis, Analysis::Idle);
        match app.results.top_panel() {
            TopPanel::Prediction(p) => assert_eq!(p.class_name, "Cat"),
            TopPanel::Placeholder => panic!("expected a prediction"),
        }
        assert_eq!(app.results.secondary().len(), 1);
        assert_eq!(app.results.chart().bars().len(), 3);
        assert!(has_toast(&app, "notification-analysis-complete"));
    }

    #[test]
    fn network_failure_falls_back_to_test_prediction() {
        let (mut app, _dir) = test_app();
        let _ = app.update(Message::ModelInfoLoaded(Ok(catalog_info())));
        hold_image(&mut app, "cat.png");
        let _ = app.update(Message::Upload(upload_card::Message::Analyze));

        let _ = app.update(classified(&app, Err(ApiError::Transport(
            "connection refused".to_string(),
        ))));
        assert!(matches!(app.analysis, Analysis::FallingBack { .. }));
        assert!(has_toast(&app, "notification-analysis-failed"));

        let _ = app.update(test_prediction_loaded(&app, Ok(TestPrediction {
            class_name: "Dog".to_string(),
            emoji: "🐶".to_string(),
            confidence: 77.0,
        })));
        assert_eq!(app.analysis, Analysis::Idle);
        match app.results.top_panel() {
            TopPanel::Prediction(p) => {
                assert_eq!(p.class_name, "Dog");
                assert_eq!(p.color, crate::classifier::fallback::FALLBACK_COLOR);
            }
            TopPanel::Placeholder => panic!("expected the test prediction"),
        }
        assert_eq!(app.results.chart().bars().len(), 3);
        assert_eq!(app.results.probability_rows().len(), 3);
        assert!(has_toast(&app, "notification-test-prediction"));
    }

    #[test]
    fn failed_test_prediction_keeps_ui_interactive() {
        let (mut app, _dir) = test_app();
        hold_image(&mut app, "cat.png");
        let _ = app.update(Message::Upload(upload_card::Message::Analyze));
        let _ = app.update(classified(&app, Err(ApiError::Status(500))));
        let _ = app.update(test_prediction_loaded(&app, Err(ApiError::Transport(
            "down".to_string(),
        ))));

        assert_eq!(app.analysis, Analysis::Idle);
        assert!(app.results.top_panel().is_placeholder());
        assert!(app.upload.has_image());
    }

    #[test]
    fn clear_after_analysis_resets_results() {
        let (mut app, _dir) = test_app();
        hold_image(&mut app, "cat.png");
        let _ = app.update(Message::Upload(upload_card::Message::Analyze));
        let _ = app.update(classified(&app, Ok(real_result())));

        let _ = app.update(Message::Upload(upload_card::Message::Clear));
        let panel = app.results.top_panel();
        assert!(panel.is_placeholder());
        assert_eq!(panel.meter_fraction(), 0.0);
        assert!(app.results.chart().is_empty());
        assert!(app.results.probability_rows().is_empty());
        assert!(!app.upload.has_image());
        assert!(has_toast(&app, "notification-image-cleared"));
    }

    #[test]
    fn escape_with_nothing_loaded_does_nothing() {
        let (mut app, _dir) = test_app();
        let before = app.notifications.len();
        let _ = app.update(Message::EscapePressed);
        assert_eq!(app.notifications.len(), before);
    }

    #[test]
    fn late_result_after_clear_is_ignored() {
        let (mut app, _dir) = test_app();
        hold_image(&mut app, "cat.png");
        let _ = app.update(Message::Upload(upload_card::Message::Analyze));
        let late = classified(&app, Ok(real_result()));
        let _ = app.update(Message::EscapePressed);
        let _ = app.update(late);
        assert!(app.results.top_panel().is_placeholder());
    }

    fn result_for(class: &str) -> ClassificationResult {
        let mut result = real_result();
        result.top_predictions[0].class_name = class.to_string();
        result.all_probabilities[0].class_name = class.to_string();
        result
    }

    #[test]
    fn cleared_analysis_does_not_answer_for_the_next_one() {
        let (mut app, _dir) = test_app();
        hold_image(&mut app, "a.png");
        let _ = app.update(Message::Upload(upload_card::Message::Analyze));
        let for_a = classified(&app, Ok(result_for("Airplane")));
        let _ = app.update(Message::EscapePressed);

        hold_image(&mut app, "b.png");
        let _ = app.update(Message::Upload(upload_card::Message::Analyze));
        let for_b = classified(&app, Ok(result_for("Ship")));

        let _ = app.update(for_a);
        assert!(app.results.top_panel().is_placeholder());
        assert!(matches!(app.analysis, Analysis::Classifying { .. }));

        let _ = app.update(for_b);
        assert_eq!(app.analysis, Analysis::Idle);
        match app.results.top_panel() {
            TopPanel::Prediction(p) => assert_eq!(p.class_name, "Ship"),
            TopPanel::Placeholder => panic!("expected the result for b.png"),
        }
    }

    #[test]
    fn stale_test_prediction_is_ignored() {
        let (mut app, _dir) = test_app();
        hold_image(&mut app, "a.png");
        let _ = app.update(Message::Upload(upload_card::Message::Analyze));
        let _ = app.update(classified(&app, Err(ApiError::Status(500))));
        let stale = test_prediction_loaded(
            &app,
            Ok(TestPrediction {
                class_name: "Frog".to_string(),
                emoji: String::new(),
                confidence: 50.0,
            }),
        );
        let _ = app.update(Message::EscapePressed);

        hold_image(&mut app, "b.png");
        let _ = app.update(Message::Upload(upload_card::Message::Analyze));
        let _ = app.update(stale);
        assert!(app.results.top_panel().is_placeholder());
        assert!(matches!(app.analysis, Analysis::Classifying { .. }));
    }

    #[test]
    fn failed_sample_download_keeps_held_image() {
        let (mut app, _dir) = test_app();
        hold_image(&mut app, "keep.png");
        let generation = app.upload.begin_read();

        let _ = app.update(Message::SampleLoaded {
            generation,
            result: Err(ApiError::Status(404).into()),
        });
        assert_eq!(
            app.upload.image().map(UploadedImage::file_name),
            Some("keep.png")
        );
        assert!(!app.upload.is_reading());
        let toast = app
            .notifications
            .iter()
            .find(|n| n.message_key() == "notification-sample-failed")
            .expect("failure toast");
        assert!(toast.message_args()[0].1.contains("404"));
    }

    #[test]
    fn oversized_file_leaves_state_unchanged() {
        let (mut app, dir) = test_app();
        hold_image(&mut app, "keep.png");
        let _ = app.update(Message::Upload(upload_card::Message::Analyze));
        let _ = app.update(classified(&app, Ok(real_result())));

        let path = dir.path().join("huge.png");
        let file = fs::File::create(&path).expect("create file");
        file.set_len(MAX_UPLOAD_BYTES + 1).expect("grow file");

        let _ = app.update(Message::FileDropped(path));
        assert_eq!(
            app.upload.image().map(UploadedImage::file_name),
            Some("keep.png")
        );
        assert!(!app.upload.is_reading());
        assert!(!app.results.top_panel().is_placeholder());
        assert!(has_toast(&app, "error-upload-too-large"));
    }

    #[test]
    fn dropped_non_image_is_rejected() {
        let (mut app, dir) = test_app();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello").expect("write file");

        let _ = app.update(Message::FileHovered);
        assert!(app.upload.is_hovering());
        let _ = app.update(Message::FileDropped(path));
        assert!(!app.upload.is_hovering());
        assert!(!app.upload.has_image());
        assert!(has_toast(&app, "notification-drop-not-image"));
    }

    #[test]
    fn model_info_sets_catalog_and_status() {
        let (mut app, _dir) = test_app();
        let _ = app.update(Message::ModelInfoLoaded(Ok(catalog_info())));
        assert_eq!(app.catalog.len(), 3);
        assert_eq!(app.model_status, ModelStatus::Trained);

        let _ = app.update(Message::ModelInfoLoaded(Err(ApiError::Status(503))));
        assert_eq!(app.model_status, ModelStatus::Default);
    }

    #[test]
    fn unreachable_server_warns() {
        let (mut app, _dir) = test_app();
        let _ = app.update(Message::ServerChecked(Err(ApiError::Transport(
            "refused".to_string(),
        ))));
        assert!(has_toast(&app, "notification-server-issue"));
    }

    #[test]
    fn info_screen_round_trip() {
        let (mut app, _dir) = test_app();
        let _ = app.update(Message::Navbar(navbar::Message::OpenAbout));
        assert_eq!(app.screen, Screen::About);
        let _ = app.update(Message::About(crate::ui::about::Message::Back));
        assert_eq!(app.screen, Screen::Classifier);
    }

    #[test]
    fn results_toggle_is_forwarded() {
        let (mut app, _dir) = test_app();
        let _ = app.update(Message::Results(results::Message::ToggleView));
        assert_eq!(app.results.view_mode(), results::ResultView::List);
    }

    #[test]
    fn title_includes_held_file_name() {
        let (mut app, _dir) = test_app();
        assert_eq!(app.title(), app.i18n.tr("window-title"));
        hold_image(&mut app, "cat.png");
        assert!(app.title().starts_with("cat.png - "));
    }
}
