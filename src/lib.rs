// SPDX-License-Identifier: MPL-2.0
//! `cifar_lens` is a desktop client for a CIFAR-10 image classification service,
//! built with the Iced GUI framework.
//!
//! It uploads an image to the inference endpoint and renders the returned class
//! probabilities as a top prediction, a ranked list and a bar chart. Preferences
//! are persisted in a TOML file and the interface is localized with Fluent.

#![doc(html_root_url = "https://docs.rs/cifar_lens/0.1.0")]

pub mod app;
pub mod classifier;
pub mod error;
pub mod i18n;
pub mod ui;
pub mod upload;
