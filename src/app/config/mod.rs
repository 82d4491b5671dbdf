// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[server]` - Inference service URL, request timeout and sample images
//! - `[appearance]` - Particle background
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass a directory to `load_with_override()`/`save_with_override()`
//! 3. Set `CIFAR_LENS_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use cifar_lens::app::config;
//!
//! let (mut config, _warning) = config::load();
//! config.server.base_url = Some("http://10.0.0.5:5000".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// i18n key of the warning shown when the config file cannot be read.
pub const CONFIG_LOAD_WARNING_KEY: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Theme chosen by the user. `None` until the first toggle.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: Option<ThemeMode>,
}

/// Inference service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Base URL of the service, without the `/api/...` path.
    #[serde(default = "default_base_url", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Timeout applied to every request (seconds).
    #[serde(
        default = "default_request_timeout_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_timeout_secs: Option<u64>,

    /// Images offered by the "use sample" button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_image_urls: Option<Vec<String>>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            sample_image_urls: None,
        }
    }
}

/// Visual settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppearanceConfig {
    /// Whether the animated particle background is drawn.
    #[serde(default = "default_particles", skip_serializing_if = "Option::is_none")]
    pub particles: Option<bool>,

    /// Number of particles in the background.
    #[serde(
        default = "default_particle_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub particle_count: Option<usize>,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            particles: default_particles(),
            particle_count: default_particle_count(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub appearance: AppearanceConfig,
}

impl Config {
    /// Base URL of the inference service, falling back to the default.
    #[must_use]
    pub fn server_url(&self) -> &str {
        self.server
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_SERVER_URL)
    }

    /// Request timeout, clamped to the supported range.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .server
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
            .clamp(MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    /// Sample image URLs, falling back to the built-in list when unset or empty.
    #[must_use]
    pub fn sample_image_urls(&self) -> Vec<String> {
        match &self.server.sample_image_urls {
            Some(urls) if !urls.is_empty() => urls.clone(),
            _ => DEFAULT_SAMPLE_IMAGE_URLS
                .iter()
                .map(|url| (*url).to_string())
                .collect(),
        }
    }

    /// Number of background particles, zero when the background is disabled.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        if self.appearance.particles == Some(false) {
            return 0;
        }
        self.appearance
            .particle_count
            .unwrap_or(DEFAULT_PARTICLE_COUNT)
            .min(MAX_PARTICLE_COUNT)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_base_url() -> Option<String> {
    Some(DEFAULT_SERVER_URL.to_string())
}

fn default_request_timeout_secs() -> Option<u64> {
    Some(DEFAULT_REQUEST_TIMEOUT_SECS)
}

fn default_particles() -> Option<bool> {
    Some(true)
}

fn default_particle_count() -> Option<usize> {
    Some(DEFAULT_PARTICLE_COUNT)
}

fn deserialize_theme_mode<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<ThemeMode>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(Some(ThemeMode::Light)),
        "dark" => Ok(Some(ThemeMode::Dark)),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "failed to load config");
                    return (Config::default(), Some(CONFIG_LOAD_WARNING_KEY.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
                theme_mode: Some(ThemeMode::Dark),
            },
            server: ServerConfig {
                base_url: Some("http://10.0.0.5:8080".to_string()),
                request_timeout_secs: Some(12),
                sample_image_urls: Some(vec!["http://example.test/cat.jpg".to_string()]),
            },
            appearance: AppearanceConfig {
                particles: Some(false),
                particle_count: Some(20),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(message)) => assert!(message.contains("expected")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_reports_warning_for_corrupt_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[general\ntheme_mode = ")
            .expect("failed to write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some(CONFIG_LOAD_WARNING_KEY));
    }

    #[test]
    fn missing_file_loads_defaults_without_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn theme_mode_is_case_insensitive() {
        let config: Config =
            toml::from_str("[general]\ntheme_mode = \"DARK\"\n").expect("valid config");
        assert_eq!(config.general.theme_mode, Some(ThemeMode::Dark));
    }

    #[test]
    fn unknown_theme_mode_is_rejected() {
        let result = toml::from_str::<Config>("[general]\ntheme_mode = \"sepia\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.general.theme_mode, None);
        assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
        assert_eq!(
            config.request_timeout(),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert_eq!(config.sample_image_urls().len(), DEFAULT_SAMPLE_IMAGE_URLS.len());
        assert_eq!(config.particle_count(), DEFAULT_PARTICLE_COUNT);
    }

    #[test]
    fn request_timeout_is_clamped() {
        let mut config = Config::default();
        config.server.request_timeout_secs = Some(0);
        assert_eq!(
            config.request_timeout(),
            Duration::from_secs(MIN_REQUEST_TIMEOUT_SECS)
        );
        config.server.request_timeout_secs = Some(10_000);
        assert_eq!(
            config.request_timeout(),
            Duration::from_secs(MAX_REQUEST_TIMEOUT_SECS)
        );
    }

    #[test]
    fn blank_server_url_falls_back_to_default() {
        let mut config = Config::default();
        config.server.base_url = Some("   ".to_string());
        assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
    }

    #[test]
    fn empty_sample_list_falls_back_to_defaults() {
        let mut config = Config::default();
        config.server.sample_image_urls = Some(Vec::new());
        assert_eq!(config.sample_image_urls()[0], DEFAULT_SAMPLE_IMAGE_URLS[0]);
    }

    #[test]
    fn disabled_particles_yield_zero_count() {
        let mut config = Config::default();
        config.appearance.particles = Some(false);
        assert_eq!(config.particle_count(), 0);

        config.appearance.particles = Some(true);
        config.appearance.particle_count = Some(MAX_PARTICLE_COUNT * 10);
        assert_eq!(config.particle_count(), MAX_PARTICLE_COUNT);
    }

    #[test]
    fn partial_file_keeps_section_defaults() {
        let config: Config =
            toml::from_str("[general]\nlanguage = \"fr\"\n").expect("valid config");
        assert_eq!(config.general.language.as_deref(), Some("fr"));
        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.appearance, AppearanceConfig::default());
    }
}
