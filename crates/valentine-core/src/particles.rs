//! Index-derived decorative particles and the heart's settled pulse.
//!
//! Everything that must look the same on every load derives from the
//! particle index. Only the celebration confetti uses real entropy.

use crate::constants::{HEARTBEAT_REPEAT_DELAY_SEC, HEART_SETTLE_EPSILON, HEART_TRAIL_STEP};
use crate::ease::Ease;
use crate::host::{NodeId, ParticleShape, ParticleStyle, SceneHost};
use crate::path::CubicPath;
use crate::props::{Property, PropertySet, Rgba};
use crate::timeline::Timeline;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generator seeded from a base seed and an index, so each particle gets its own stable stream.
pub fn index_rng(seed: u64, index: usize) -> StdRng {
    let mix = seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(mix)
}

/// Elements synthesized by a scene at mount and removed at teardown.
#[derive(Debug, Default)]
pub struct ParticleSystem {
    nodes: Vec<NodeId>,
}

impl ParticleSystem {
    /// Spawn `count` particles under `parent`; `style(i)` describes particle `i`.
    /// Particles the host refuses to create are skipped.
    pub fn spawn(
        host: &mut dyn SceneHost,
        parent: NodeId,
        count: usize,
        mut style: impl FnMut(usize) -> ParticleStyle,
    ) -> Self {
        let mut nodes = Vec::with_capacity(count);
        for i in 0..count {
            if let Some(n) = host.spawn_particle(parent, &style(i)) {
                nodes.push(n);
            }
        }
        Self { nodes }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn teardown(&mut self, host: &mut dyn SceneHost) {
        for n in self.nodes.drain(..) {
            host.remove(n);
        }
    }
}

/// Style of heart trail particle `i`: small SVG circles in violet hues.
pub fn trail_style(i: usize) -> ParticleStyle {
    let radius = 1.2 + (i % 3) as f32 * 0.8;
    let hue = 270.0 + ((i * 5) % 40) as f32;
    let light = 60.0 + ((i * 3) % 25) as f32;
    ParticleStyle {
        shape: ParticleShape::Circle { radius },
        color: Rgba::from_hsl(hue, 100.0, light),
    }
}

/// Position and opacity of trail particle `i` at heart progress `p`.
pub fn trail_state(path: &CubicPath, i: usize, p: f32) -> PropertySet {
    let offset = i as f32 * HEART_TRAIL_STEP;
    let along = (p - offset).max(0.0);
    let pt = path.point_at_length(along * path.total_length());
    let spread = 4.0 + i as f32 * 0.7;
    let phase = i as f32 * 2.3 + p * 25.0;
    let opacity = if p >= HEART_SETTLE_EPSILON {
        0.0
    } else if p > offset + 0.01 {
        (0.75 - i as f32 * 0.035).max(0.0)
    } else {
        0.0
    };
    PropertySet::new()
        .with(Property::X, pt.x + phase.sin() * spread)
        .with(Property::Y, pt.y + (phase * 0.7).cos() * spread)
        .with(Property::Opacity, opacity)
}

/// Style of intro burst particle `i`: glowing dots clustered around the title.
pub fn burst_style(i: usize) -> ParticleStyle {
    let size = 2.0 + (i % 6) as f32;
    let hue = 260.0 + ((i * 7) % 50) as f32;
    let light = 50.0 + ((i * 3) % 30) as f32;
    ParticleStyle {
        shape: ParticleShape::Dot {
            size,
            left_pct: 20.0 + ((i * 13) % 60) as f32,
            top_pct: 35.0 + ((i * 7) % 30) as f32,
        },
        color: Rgba::from_hsl(hue, 100.0, light),
    }
}

/// Outward burst target of intro particle `i`, reproducible for a given seed.
pub fn burst_target(seed: u64, i: usize) -> PropertySet {
    let mut rng = index_rng(seed, i);
    PropertySet::new()
        .with(Property::Opacity, rng.gen_range(0.5_f32..=1.0))
        .with(Property::X, rng.gen_range(-250.0_f32..=250.0))
        .with(Property::Y, rng.gen_range(-180.0_f32..=180.0))
        .with(Property::Scale, rng.gen_range(1.0_f32..=3.0))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub x_pct: f32,
    pub y_pct: f32,
    pub size: f32,
    pub delay_sec: f32,
    pub duration_sec: f32,
}

/// Twinkling background stars, identical on every render.
pub fn starfield(count: usize) -> Vec<Star> {
    (0..count)
        .map(|i| Star {
            x_pct: ((i * 73 + 17) % 100) as f32,
            y_pct: ((i * 41 + 29) % 100) as f32,
            size: 1.0 + (i % 3) as f32,
            delay_sec: ((i as f32 * 0.7) % 5.0 * 10.0).round() / 10.0,
            duration_sec: 2.0 + (i % 3) as f32,
        })
        .collect()
}

/// Looping double-thump scale pulse played once the heart is complete.
#[derive(Debug)]
pub struct Heartbeat {
    beat: Timeline,
    cycle: f32,
    started_at: Option<f64>,
}

const BEAT_NODE: NodeId = NodeId(0);

impl Default for Heartbeat {
    fn default() -> Self {
        Self::new()
    }
}

impl Heartbeat {
    pub fn new() -> Self {
        let scale = |s: f32| PropertySet::new().with(Property::Scale, s);
        let mut beat = Timeline::new();
        beat.set(BEAT_NODE, scale(1.0))
            .to(BEAT_NODE, scale(1.1), 0.0, 0.12, Ease::Power2Out)
            .to(BEAT_NODE, scale(1.0), 0.12, 0.12, Ease::Power2In)
            .to(BEAT_NODE, scale(1.06), 0.30, 0.10, Ease::Power2Out)
            .to(
                BEAT_NODE,
                scale(1.0),
                0.40,
                0.40,
                Ease::ElasticOut {
                    amplitude: 1.0,
                    period: 0.4,
                },
            );
        let cycle = beat.duration() + HEARTBEAT_REPEAT_DELAY_SEC;
        Self {
            beat,
            cycle,
            started_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    /// Restart from the first beat.
    pub fn start(&mut self, now: f64) {
        self.started_at = Some(now);
    }

    pub fn stop(&mut self) {
        self.started_at = None;
    }

    pub fn cycle(&self) -> f32 {
        self.cycle
    }

    /// Scale at wall-clock `now`; 1.0 while stopped.
    pub fn scale_at(&self, now: f64) -> f32 {
        let Some(start) = self.started_at else {
            return 1.0;
        };
        let t = ((now - start).max(0.0) as f32) % self.cycle;
        self.beat
            .sample_at_time(t)
            .get(&(BEAT_NODE, Property::Scale))
            .and_then(|v| v.scalar())
            .unwrap_or(1.0)
    }
}
