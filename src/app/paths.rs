// SPDX-License-Identifier: MPL-2.0
//! Location of the configuration directory.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - `--config-dir` on the command line, or a test directory
//! 2. **Environment variable** - `CIFAR_LENS_CONFIG_DIR`
//! 3. **Platform default** - via `dirs` crate, with the application name appended

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "CifarLens";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "CIFAR_LENS_CONFIG_DIR";

/// Returns the application config directory path.
///
/// Platform defaults:
/// - Linux: `~/.config/CifarLens/`
/// - macOS: `~/Library/Application Support/CifarLens/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\CifarLens\`
///
/// Returns `None` if no directory can be determined.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory path with an optional override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}
