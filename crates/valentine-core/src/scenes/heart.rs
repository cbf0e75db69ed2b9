//! A heart outline drawn by scroll, trailed by sparks, beating once complete.

use super::{ids, require};
use crate::constants::{
    HEART_DRAW_END, HEART_FILL_ALPHA, HEART_PARTICLE_COUNT, HEART_SETTLE_EPSILON,
    PIN_LENGTH_VIEWPORTS, SCRUB_TAU_TEXT_SEC,
};
use crate::ease::Ease;
use crate::error::SceneResult;
use crate::host::{NodeId, SceneHost, Viewport};
use crate::particles::{trail_state, trail_style, Heartbeat, ParticleSystem};
use crate::path::CubicPath;
use crate::props::{Property, PropertySet, Rgba};
use crate::sequencer::Scene;
use crate::snap::SnapPolicy;
use crate::timeline::Timeline;

const HEART_FILL: Rgba = Rgba::new(168.0 / 255.0, 85.0 / 255.0, 247.0 / 255.0, 0.0);

#[derive(Clone, Copy, Debug)]
struct Nodes {
    svg: NodeId,
    path: NodeId,
    glow: NodeId,
}

#[derive(Debug)]
pub struct HeartScene {
    outline: CubicPath,
    nodes: Option<Nodes>,
    particles: ParticleSystem,
    heartbeat: Heartbeat,
    last_now: f64,
}

impl Default for HeartScene {
    fn default() -> Self {
        Self::new()
    }
}

impl HeartScene {
    pub fn new() -> Self {
        Self {
            outline: CubicPath::heart(),
            nodes: None,
            particles: ParticleSystem::default(),
            heartbeat: Heartbeat::new(),
            last_now: 0.0,
        }
    }

    pub fn is_beating(&self) -> bool {
        self.heartbeat.is_active()
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn outline(&self) -> &CubicPath {
        &self.outline
    }
}

impl Scene for HeartScene {
    fn name(&self) -> &'static str {
        "heart"
    }

    fn mount(&mut self, host: &mut dyn SceneHost) -> SceneResult<()> {
        let name = self.name();
        require(host, name, ids::HEART_SECTION)?;
        let nodes = Nodes {
            svg: require(host, name, ids::HEART_SVG)?,
            path: require(host, name, ids::HEART_PATH)?,
            glow: require(host, name, ids::HEART_GLOW_PATH)?,
        };
        self.particles =
            ParticleSystem::spawn(host, nodes.svg, HEART_PARTICLE_COUNT, trail_style);
        self.nodes = Some(nodes);
        Ok(())
    }

    fn timeline(&self, _viewport: Viewport) -> Timeline {
        let mut tl = Timeline::new();
        let Some(n) = self.nodes else {
            return tl;
        };
        let len = self.outline.total_length();
        let dashed = PropertySet::new()
            .with(Property::DashArray, len)
            .with(Property::DashOffset, len);
        let drawn = PropertySet::new().with(Property::DashOffset, 0.0);
        tl.set(n.path, dashed.clone().with(Property::Fill, HEART_FILL))
            .set(n.glow, dashed)
            .to(n.path, drawn.clone(), 0.0, HEART_DRAW_END, Ease::Linear)
            .to(n.glow, drawn, 0.0, HEART_DRAW_END, Ease::Linear)
            .to(
                n.path,
                PropertySet::new().with(Property::Fill, HEART_FILL.with_alpha(HEART_FILL_ALPHA)),
                HEART_DRAW_END,
                1.0 - HEART_DRAW_END,
                Ease::Power1In,
            );
        tl
    }

    fn pin_length(&self, viewport: Viewport) -> f32 {
        viewport.height * PIN_LENGTH_VIEWPORTS
    }

    fn scrub_tau(&self) -> f32 {
        SCRUB_TAU_TEXT_SEC
    }

    fn snap(&self) -> Option<SnapPolicy> {
        Some(SnapPolicy::default())
    }

    fn on_progress(&mut self, progress: f32, host: &mut dyn SceneHost) {
        let Some(n) = self.nodes else {
            return;
        };
        for (i, node) in self.particles.nodes().iter().enumerate() {
            host.apply(*node, &trail_state(&self.outline, i, progress));
        }
        if progress >= HEART_SETTLE_EPSILON {
            if !self.heartbeat.is_active() {
                self.heartbeat.start(self.last_now);
                log::debug!("[scene] heart complete, beating");
            }
        } else if self.heartbeat.is_active() {
            self.heartbeat.stop();
            host.apply(n.svg, &PropertySet::new().with(Property::Scale, 1.0));
        }
    }

    fn tick(&mut self, now: f64, host: &mut dyn SceneHost) {
        self.last_now = now;
        if let (Some(n), true) = (self.nodes, self.heartbeat.is_active()) {
            let scale = self.heartbeat.scale_at(now);
            host.apply(n.svg, &PropertySet::new().with(Property::Scale, scale));
        }
    }

    fn teardown(&mut self, host: &mut dyn SceneHost) {
        self.heartbeat.stop();
        self.particles.teardown(host);
        self.nodes = None;
    }
}
