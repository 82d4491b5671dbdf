// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Window file-drag events drive the upload card highlight, and two keyboard
//! shortcuts are recognized: Ctrl/Cmd+O opens the file picker and Escape
//! clears the current image.

use super::{Message, Screen};
use iced::keyboard::{self, key::Named, Key};
use iced::{event, time, window, Event, Subscription};
use std::time::Duration;

/// Interval between animation frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

fn map_event(event: Event, status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
        Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. })
            if status == event::Status::Ignored =>
        {
            match key.as_ref() {
                Key::Character("o") if modifiers.command() => Some(Message::OpenShortcut),
                Key::Named(Named::Escape) => Some(Message::EscapePressed),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Routes native events on the classifier screen only.
///
/// The info screen ignores drops and shortcuts.
pub fn create_event_subscription(screen: Screen) -> Subscription<Message> {
    match screen {
        Screen::Classifier => event::listen_with(map_event),
        Screen::About => Subscription::none(),
    }
}

/// Creates the animation tick, active while anything on screen moves.
pub fn create_tick_subscription(animating: bool) -> Subscription<Message> {
    if animating {
        time::every(FRAME_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
