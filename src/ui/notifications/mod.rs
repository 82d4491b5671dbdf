// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Toasts inform the user about uploads, analysis results and failures
//! without blocking interaction.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` struct with severity levels and phases
//! - [`manager`] - `Manager` holding the toasts on screen
//! - [`toast`] - Toast widget component for rendering notifications
//!
//! # Lifecycle
//!
//! A toast appears after a 10 ms entry delay, stays visible for 5 s, then
//! fades for 300 ms before being removed. The dismiss button removes it at
//! once. Every severity follows the same timeline.
//!
//! ```ignore
//! let mut manager = Manager::new();
//! manager.push(Notification::success("notification-upload-success"));
//! let overlay = Toast::view_overlay(&manager, &i18n, Instant::now()).map(Message::Notification);
//! ```

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Phase, Severity};
pub use toast::Toast;
