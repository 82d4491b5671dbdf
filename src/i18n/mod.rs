// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Translations are Fluent `.ftl` files embedded in the binary.
//!
//! # Features
//!
//! - Locale resolution from CLI, config, then system settings
//! - Fallback to `en-US` when nothing matches
//! - Message arguments for dynamic text (file names, error reasons)

pub mod fluent;
