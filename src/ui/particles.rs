// SPDX-License-Identifier: MPL-2.0
//! Animated particle background.
//!
//! Particles drift at constant speed inside a virtual field and wrap around
//! its edges. The field is scaled to the canvas bounds when drawn, and any
//! two particles closer than the link distance are joined by a line whose
//! opacity fades with distance. Only the dots follow the theme; links keep
//! the brand color.

use crate::app::config::{PARTICLE_LINK_DISTANCE, PARTICLE_LINK_OPACITY, PARTICLE_SPEED};
use crate::ui::design_tokens::palette;
use iced::widget::canvas::{self, Cache, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Point, Rectangle, Renderer, Size, Theme, Vector};
use rand::Rng;
use std::f32::consts::TAU;

/// Virtual area the particles move in.
pub const FIELD: Size = Size {
    width: 1280.0,
    height: 800.0,
};

const MIN_RADIUS: f32 = 1.0;
const MAX_RADIUS: f32 = 3.0;
const DOT_OPACITY: f32 = 0.5;
const LINK_WIDTH: f32 = 1.0;
const LINK_COLOR: Color = palette::PRIMARY_500;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Vector,
    pub radius: f32,
}

impl Particle {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let angle = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(0.2..=1.0) * PARTICLE_SPEED;
        Self {
            position: Point::new(
                rng.gen_range(0.0..FIELD.width),
                rng.gen_range(0.0..FIELD.height),
            ),
            velocity: Vector::new(angle.cos() * speed, angle.sin() * speed),
            radius: rng.gen_range(MIN_RADIUS..=MAX_RADIUS),
        }
    }
}

/// The particle background and its render cache.
pub struct ParticleField {
    particles: Vec<Particle>,
    color: Color,
    cache: Cache,
}

impl std::fmt::Debug for ParticleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleField")
            .field("particles", &self.particles.len())
            .field("color", &self.color)
            .finish()
    }
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(count: usize, color: Color, rng: &mut R) -> Self {
        Self {
            particles: (0..count).map(|_| Particle::random(rng)).collect(),
            color,
            cache: Cache::default(),
        }
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Changes the dot color and forces a redraw.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.cache.clear();
    }

    /// Advances every particle by `frames` animation frames, wrapping at the field edges.
    pub fn step(&mut self, frames: f32) {
        for particle in &mut self.particles {
            let moved = particle.position + particle.velocity * frames;
            particle.position = Point::new(
                moved.x.rem_euclid(FIELD.width),
                moved.y.rem_euclid(FIELD.height),
            );
        }
        self.cache.clear();
    }
}

/// Opacity of the link between two points `distance` apart, if they are linked.
#[must_use]
pub fn link_opacity(distance: f32) -> Option<f32> {
    (distance < PARTICLE_LINK_DISTANCE)
        .then(|| PARTICLE_LINK_OPACITY * (1.0 - distance / PARTICLE_LINK_DISTANCE))
}

/// Color of the link between two points `distance` apart, if they are linked.
#[must_use]
pub fn link_color(distance: f32) -> Option<Color> {
    link_opacity(distance).map(|alpha| Color {
        a: alpha,
        ..LINK_COLOR
    })
}

impl<Message> canvas::Program<Message> for ParticleField {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let scale_x = bounds.width / FIELD.width;
                let scale_y = bounds.height / FIELD.height;
                let points: Vec<Point> = self
                    .particles
                    .iter()
                    .map(|p| Point::new(p.position.x * scale_x, p.position.y * scale_y))
                    .collect();

                for (i, a) in points.iter().enumerate() {
                    for b in &points[i + 1..] {
                        if let Some(color) = link_color(a.distance(*b)) {
                            frame.stroke(
                                &Path::line(*a, *b),
                                Stroke::default().with_width(LINK_WIDTH).with_color(color),
                            );
                        }
                    }
                }

                let dot_color = Color {
                    a: DOT_OPACITY,
                    ..self.color
                };
                for (point, particle) in points.iter().zip(&self.particles) {
                    frame.fill(&Path::circle(*point, particle.radius), dot_color);
                }
            });

        vec![geometry]
    }
}
