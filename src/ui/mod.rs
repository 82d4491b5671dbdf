// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each one
//! exposes its own `Message`, a `view` taking a `ViewContext`, and, where it
//! keeps state, a small state struct mutated only by the application.
//!
//! # Screens and cards
//!
//! - [`navbar`] - Header with model status, theme toggle and info button
//! - [`upload_card`] - Drop zone, preview, read progress and analysis controls
//! - [`results`] - Top prediction, ranked predictions, bar chart and probability list
//! - [`class_grid`] - Cards for the classes known to the model
//! - [`about`] - Info screen
//!
//! # Shared infrastructure
//!
//! - [`particles`] - Animated particle background
//! - [`notifications`] - Toast notification system for user feedback
//! - [`widgets`] - Custom widgets (spinner, meter)
//! - [`styles`] - Centralized button and container styles
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theme`] - Color helpers
//! - [`theming`] - Light/Dark theme mode

pub mod about;
pub mod class_grid;
pub mod design_tokens;
pub mod navbar;
pub mod notifications;
pub mod particles;
pub mod results;
pub mod styles;
pub mod theme;
pub mod theming;
pub mod upload_card;
pub mod widgets;
