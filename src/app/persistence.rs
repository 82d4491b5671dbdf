// SPDX-License-Identifier: MPL-2.0
//! Persistence of user preferences.
//!
//! Only the theme is written back by the application. The rest of the config
//! file is reloaded and saved untouched so hand-edited values survive.

use super::config;
use crate::error::Result;
use crate::ui::theming::ThemeMode;
use std::path::PathBuf;

/// Stores the theme preference in the config file of `config_dir`
/// (or the default config directory).
pub fn persist_theme(theme_mode: ThemeMode, config_dir: Option<PathBuf>) -> Result<()> {
    let (mut cfg, _warning) = config::load_with_override(config_dir.clone());
    cfg.general.theme_mode = Some(theme_mode);
    config::save_with_override(&cfg, config_dir)?;
    tracing::debug!(?theme_mode, "theme preference saved");
    Ok(())
}
