// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.
//!
//! # Categories
//!
//! - **Server**: inference service location and request timeout
//! - **Samples**: images offered by the "use sample" button
//! - **Particles**: background animation density and link distance
//! - **Notifications**: toast timings

// ==========================================================================
// Server Defaults
// ==========================================================================

/// Default base URL of the inference service.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Default HTTP request timeout (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Minimum HTTP request timeout (in seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum HTTP request timeout (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

// ==========================================================================
// Sample Images
// ==========================================================================

/// Images picked at random by the "use sample" button.
pub const DEFAULT_SAMPLE_IMAGE_URLS: [&str; 4] = [
    "https://images.unsplash.com/photo-1541963463532-d68292c34b19?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1514888286974-6d03bde4ba42?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1513360371669-4adf3dd7dff8?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1518791841217-8f162f1e1131?w=400&h=400&fit=crop",
];

// ==========================================================================
// Particle Background
// ==========================================================================

/// Number of particles in the background field.
pub const DEFAULT_PARTICLE_COUNT: usize = 100;

/// Maximum number of particles accepted from the config file.
pub const MAX_PARTICLE_COUNT: usize = 400;

/// Particles closer than this distance (in logical pixels) are linked.
pub const PARTICLE_LINK_DISTANCE: f32 = 150.0;

/// Opacity of link lines at zero distance.
pub const PARTICLE_LINK_OPACITY: f32 = 0.4;

/// Particle speed in logical pixels per animation frame.
pub const PARTICLE_SPEED: f32 = 2.0;

// ==========================================================================
// Notifications
// ==========================================================================

/// Delay before a new toast becomes visible (in milliseconds).
pub const TOAST_ENTER_DELAY_MS: u64 = 10;

/// How long a toast stays visible (in milliseconds).
pub const TOAST_LIFETIME_MS: u64 = 5_000;

/// Delay between hiding a toast and removing it (in milliseconds).
pub const TOAST_DETACH_DELAY_MS: u64 = 300;
