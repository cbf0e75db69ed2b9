//! Celebration confetti: burst descriptions and a small ballistic simulation.
//!
//! Motion is integrated in 60 Hz ticks so that bursts look the same at any
//! frame rate.

use crate::constants::CONFETTI_COLORS;
use crate::host::Viewport;
use crate::props::Rgba;
use glam::Vec2;
use rand::Rng;

const TICK_SEC: f32 = 1.0 / 60.0;
const START_VELOCITY: f32 = 45.0;
const DECAY: f32 = 0.9;
const GRAVITY: f32 = 3.0;
const TICK_BUDGET: u32 = 200;

/// One burst request. Angles in degrees, 90 = straight up; origin in viewport fractions.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiBurst {
    pub particle_count: u32,
    pub angle: f32,
    pub spread: f32,
    pub origin: Vec2,
    pub colors: Vec<Rgba>,
}

impl ConfettiBurst {
    pub fn new(particle_count: u32, spread: f32, origin: Vec2) -> Self {
        Self {
            particle_count,
            angle: 90.0,
            spread,
            origin,
            colors: palette(),
        }
    }

    pub fn angled(self, angle: f32) -> Self {
        Self { angle, ..self }
    }
}

pub fn palette() -> Vec<Rgba> {
    CONFETTI_COLORS
        .iter()
        .map(|rgb| Rgba::from_rgb8(*rgb, 1.0))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfettiPiece {
    pub pos: Vec2,
    pub color: Rgba,
    pub tilt: f32,
    pub wobble: f32,
    heading: f32,
    velocity: f32,
    wobble_speed: f32,
    tilt_speed: f32,
    ticks: u32,
}

impl ConfettiPiece {
    pub fn opacity(&self) -> f32 {
        1.0 - self.ticks as f32 / TICK_BUDGET as f32
    }

    fn step(&mut self) {
        self.pos.x += self.heading.cos() * self.velocity;
        self.pos.y += self.heading.sin() * self.velocity + GRAVITY;
        self.velocity *= DECAY;
        self.wobble += self.wobble_speed;
        self.tilt += self.tilt_speed;
        self.ticks += 1;
    }
}

/// Live confetti pieces in viewport pixel space.
#[derive(Debug, Default)]
pub struct ConfettiField {
    pieces: Vec<ConfettiPiece>,
    carry: f32,
}

impl ConfettiField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit<R: Rng>(&mut self, burst: &ConfettiBurst, viewport: Viewport, rng: &mut R) {
        if viewport.is_degenerate() {
            return;
        }
        let origin = burst.origin * viewport.size();
        let colors = if burst.colors.is_empty() {
            palette()
        } else {
            burst.colors.clone()
        };
        for i in 0..burst.particle_count {
            let deg = burst.angle + burst.spread * (rng.gen::<f32>() - 0.5);
            // Screen y grows downwards, so "up" is a negative sine.
            let heading = -deg.to_radians();
            self.pieces.push(ConfettiPiece {
                pos: origin,
                color: colors[i as usize % colors.len()],
                tilt: rng.gen_range(0.0..std::f32::consts::TAU),
                wobble: rng.gen::<f32>() * 10.0,
                heading,
                velocity: START_VELOCITY * 0.5 + rng.gen::<f32>() * START_VELOCITY,
                wobble_speed: 0.05 + rng.gen::<f32>() * 0.05,
                tilt_speed: rng.gen_range(-0.2..0.2),
                ticks: 0,
            });
        }
    }

    /// Advance by `dt` seconds and drop pieces that have faded out.
    pub fn step(&mut self, dt: f32) {
        self.carry += dt.max(0.0);
        while self.carry >= TICK_SEC {
            self.carry -= TICK_SEC;
            for p in &mut self.pieces {
                p.step();
            }
            self.pieces.retain(|p| p.ticks < TICK_BUDGET);
        }
    }

    pub fn pieces(&self) -> &[ConfettiPiece] {
        &self.pieces
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
        self.carry = 0.0;
    }
}
