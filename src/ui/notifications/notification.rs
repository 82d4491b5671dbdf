// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.

use crate::app::config::{TOAST_DETACH_DELAY_MS, TOAST_ENTER_DELAY_MS, TOAST_LIFETIME_MS};
use crate::ui::design_tokens::palette;
use iced::Color;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity level selects the glyph and accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    Success,
    #[default]
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Returns the accent color for this severity level.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Info => "ℹ",
            Severity::Warning => "⚠",
            Severity::Error => "!",
        }
    }
}

/// Lifecycle stage of a toast, derived from its age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Created but not shown yet.
    Entering,
    Visible,
    /// Fading out; carries the fade progress (0.0 - 1.0).
    Hiding(f32),
    /// Ready to be removed.
    Expired,
}

impl Phase {
    /// Opacity applied when rendering a toast in this phase.
    #[must_use]
    pub fn opacity(self) -> f32 {
        match self {
            Phase::Entering | Phase::Expired => 0.0,
            Phase::Visible => 1.0,
            Phase::Hiding(progress) => 1.0 - progress,
        }
    }
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    /// i18n key resolved at render time.
    message_key: String,
    message_args: Vec<(String, String)>,
    created_at: Instant,
}

impl Notification {
    /// Creates a new notification with the given severity and message key.
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self::created_at(severity, message_key, Instant::now())
    }

    fn created_at(severity: Severity, message_key: impl Into<String>, created_at: Instant) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
            created_at,
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn info(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Adds an argument for message interpolation.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    #[must_use]
    pub fn created(&self) -> Instant {
        self.created_at
    }

    /// Returns the lifecycle phase at `now`.
    #[must_use]
    pub fn phase_at(&self, now: Instant) -> Phase {
        let age = now.saturating_duration_since(self.created_at);
        let enter = Duration::from_millis(TOAST_ENTER_DELAY_MS);
        let lifetime = Duration::from_millis(TOAST_LIFETIME_MS);
        let detach = Duration::from_millis(TOAST_DETACH_DELAY_MS);

        if age < enter {
            Phase::Entering
        } else if age < lifetime {
            Phase::Visible
        } else if age < lifetime + detach {
            let progress = (age - lifetime).as_secs_f32() / detach.as_secs_f32();
            Phase::Hiding(progress.clamp(0.0, 1.0))
        } else {
            Phase::Expired
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> (Notification, Instant) {
        let start = Instant::now();
        let notification = Notification::created_at(Severity::Info, "test", start);
        (notification, start + Duration::from_millis(ms))
    }

    #[test]
    fn notification_ids_are_unique() {
        let n1 = Notification::success("test");
        let n2 = Notification::success("test");
        assert_ne!(n1.id(), n2.id());
    }

    #[test]
    fn severity_colors_and_glyphs_are_distinct() {
        let all = [
            Severity::Success,
            Severity::Info,
            Severity::Warning,
            Severity::Error,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.color(), b.color());
                assert_ne!(a.glyph(), b.glyph());
            }
        }
    }

    #[test]
    fn phases_follow_the_toast_timeline() {
        let (n, now) = at(0);
        assert_eq!(n.phase_at(now), Phase::Entering);

        let (n, now) = at(TOAST_ENTER_DELAY_MS);
        assert_eq!(n.phase_at(now), Phase::Visible);

        let (n, now) = at(TOAST_LIFETIME_MS - 1);
        assert_eq!(n.phase_at(now), Phase::Visible);

        let (n, now) = at(TOAST_LIFETIME_MS + TOAST_DETACH_DELAY_MS / 2);
        match n.phase_at(now) {
            Phase::Hiding(progress) => assert!((progress - 0.5).abs() < 0.01),
            other => panic!("expected Hiding, got {other:?}"),
        }

        let (n, now) = at(TOAST_LIFETIME_MS + TOAST_DETACH_DELAY_MS);
        assert_eq!(n.phase_at(now), Phase::Expired);
    }

    #[test]
    fn opacity_fades_while_hiding() {
        assert_eq!(Phase::Entering.opacity(), 0.0);
        assert_eq!(Phase::Visible.opacity(), 1.0);
        assert!((Phase::Hiding(0.25).opacity() - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn notification_builder_pattern_works() {
        let notification = Notification::error("analysis-failed").with_arg("reason", "timeout");

        assert_eq!(notification.severity(), Severity::Error);
        assert_eq!(notification.message_key(), "analysis-failed");
        assert_eq!(
            notification.message_args(),
            &[("reason".to_string(), "timeout".to_string())]
        );
    }

    #[test]
    fn notification_constructors_set_correct_severity() {
        assert_eq!(Notification::success("").severity(), Severity::Success);
        assert_eq!(Notification::info("").severity(), Severity::Info);
        assert_eq!(Notification::warning("").severity(), Severity::Warning);
        assert_eq!(Notification::error("").severity(), Severity::Error);
    }
}
