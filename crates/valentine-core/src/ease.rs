//! Easing curves used by timelines, tweens and snap animations.
//!
//! Every curve maps `0 -> 0` and `1 -> 1`; overshooting curves (back, elastic)
//! may leave `[0, 1]` in between.

use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Ease {
    #[default]
    Linear,
    Power1In,
    Power1Out,
    Power1InOut,
    Power2In,
    Power2Out,
    Power2InOut,
    Power4Out,
    SineInOut,
    /// Overshoots past the target by roughly `overshoot * 10%` before settling.
    BackOut(f32),
    BounceOut,
    ElasticOut { amplitude: f32, period: f32 },
}

impl Ease {
    pub const BACK_OUT: Ease = Ease::BackOut(1.7);

    pub fn apply(self, t: f32) -> f32 {
        if !t.is_finite() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Ease::Linear => t,
            Ease::Power1In => pow_in(t, 2),
            Ease::Power1Out => pow_out(t, 2),
            Ease::Power1InOut => pow_in_out(t, 2),
            Ease::Power2In => pow_in(t, 3),
            Ease::Power2Out => pow_out(t, 3),
            Ease::Power2InOut => pow_in_out(t, 3),
            Ease::Power4Out => pow_out(t, 5),
            Ease::SineInOut => -((PI * t).cos() - 1.0) * 0.5,
            Ease::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u * u * u + s * u * u
            }
            Ease::BounceOut => bounce_out(t),
            Ease::ElasticOut { amplitude, period } => {
                let a = amplitude.max(1.0);
                let p = if period > 0.0 { period } else { 0.3 };
                let s = p / TAU * (1.0 / a).asin();
                a * (2.0_f32).powf(-10.0 * t) * ((t - s) * TAU / p).sin() + 1.0
            }
        }
    }
}

#[inline]
fn pow_in(t: f32, n: i32) -> f32 {
    t.powi(n)
}

#[inline]
fn pow_out(t: f32, n: i32) -> f32 {
    1.0 - (1.0 - t).powi(n)
}

#[inline]
fn pow_in_out(t: f32, n: i32) -> f32 {
    if t < 0.5 {
        (2.0 * t).powi(n) * 0.5
    } else {
        1.0 - (2.0 * (1.0 - t)).powi(n) * 0.5
    }
}

fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let u = t - 1.5 / D1;
        N1 * u * u + 0.75
    } else if t < 2.5 / D1 {
        let u = t - 2.25 / D1;
        N1 * u * u + 0.9375
    } else {
        let u = t - 2.625 / D1;
        N1 * u * u + 0.984375
    }
}

/// Plain linear interpolation.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Position of `x` inside `[a, b]`, clamped to `[0, 1]`. Works for descending ranges.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, x: f32) -> f32 {
    let span = b - a;
    if span.abs() < f32::EPSILON {
        return if (b >= a && x >= b) || (b < a && x <= b) {
            1.0
        } else {
            0.0
        };
    }
    ((x - a) / span).clamp(0.0, 1.0)
}
