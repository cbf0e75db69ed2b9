//! Opening section: the first title blurs away, a flash, and the question
//! assembles character by character while a particle burst goes off.

use super::{ids, require};
use crate::constants::{
    INTRO_BURST_SEED, INTRO_PARTICLE_COUNT, PIN_LENGTH_VIEWPORTS, SCRUB_TAU_TEXT_SEC,
};
use crate::ease::Ease;
use crate::error::SceneResult;
use crate::host::{NodeId, SceneHost, Viewport};
use crate::particles::{burst_style, burst_target, ParticleSystem};
use crate::props::{Property, PropertySet};
use crate::sequencer::Scene;
use crate::snap::SnapPolicy;
use crate::timeline::{Stagger, Timeline};

#[derive(Clone, Copy, Debug)]
struct Nodes {
    title: NodeId,
    reveal: NodeId,
    reveal_text: NodeId,
    glow: NodeId,
    flash: NodeId,
    particle_layer: NodeId,
    scroll_hint: Option<NodeId>,
}

#[derive(Debug)]
pub struct IntroScene {
    seed: u64,
    nodes: Option<Nodes>,
    chars: Vec<NodeId>,
    particles: ParticleSystem,
}

impl Default for IntroScene {
    fn default() -> Self {
        Self::new(INTRO_BURST_SEED)
    }
}

impl IntroScene {
    /// `seed` fixes the burst pattern.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            nodes: None,
            chars: Vec::new(),
            particles: ParticleSystem::default(),
        }
    }

    pub fn chars(&self) -> &[NodeId] {
        &self.chars
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }
}

impl Scene for IntroScene {
    fn name(&self) -> &'static str {
        "intro"
    }

    fn mount(&mut self, host: &mut dyn SceneHost) -> SceneResult<()> {
        let name = self.name();
        require(host, name, ids::INTRO_SECTION)?;
        let nodes = Nodes {
            title: require(host, name, ids::INTRO_TITLE)?,
            reveal: require(host, name, ids::INTRO_REVEAL)?,
            reveal_text: require(host, name, ids::INTRO_REVEAL_TEXT)?,
            glow: require(host, name, ids::INTRO_GLOW)?,
            flash: require(host, name, ids::INTRO_FLASH)?,
            particle_layer: require(host, name, ids::INTRO_PARTICLES)?,
            scroll_hint: host.resolve(ids::INTRO_SCROLL_HINT),
        };
        self.chars = host.split_chars(nodes.reveal_text);
        self.particles =
            ParticleSystem::spawn(host, nodes.particle_layer, INTRO_PARTICLE_COUNT, burst_style);
        self.nodes = Some(nodes);
        log::debug!(
            "[scene] intro: {} chars, {} particles",
            self.chars.len(),
            self.particles.len()
        );
        Ok(())
    }

    fn timeline(&self, _viewport: Viewport) -> Timeline {
        let mut tl = Timeline::new();
        let Some(n) = self.nodes else {
            return tl;
        };
        let particles = self.particles.nodes();

        for c in &self.chars {
            tl.set(
                *c,
                PropertySet::new()
                    .with(Property::Opacity, 0.0)
                    .with(Property::Y, 60.0)
                    .with(Property::RotateX, -90.0)
                    .with(Property::Scale, 0.3),
            );
        }
        for p in particles {
            tl.set(*p, PropertySet::new().with(Property::Opacity, 0.0));
        }
        tl.set(n.reveal, PropertySet::new().with(Property::Visible, 0.0));

        if let Some(hint) = n.scroll_hint {
            tl.to(
                hint,
                PropertySet::new()
                    .with(Property::AutoAlpha, 0.0)
                    .with(Property::Y, 20.0),
                0.0,
                0.3,
                Ease::Power1Out,
            );
        }
        tl.from_to(
            n.glow,
            PropertySet::new()
                .with(Property::Opacity, 0.15)
                .with(Property::Scale, 0.8),
            PropertySet::new()
                .with(Property::Opacity, 0.8)
                .with(Property::Scale, 1.4),
            0.0,
            2.0,
            Ease::Power1InOut,
        )
        .to(
            n.title,
            PropertySet::new()
                .with(Property::Blur, 30.0)
                .with(Property::Opacity, 0.0)
                .with(Property::Scale, 0.6),
            0.0,
            1.0,
            Ease::Power2In,
        )
        .from_to(
            n.flash,
            PropertySet::new()
                .with(Property::AutoAlpha, 0.0)
                .with(Property::Scale, 0.2),
            PropertySet::new()
                .with(Property::AutoAlpha, 0.9)
                .with(Property::Scale, 1.0),
            0.8,
            0.3,
            Ease::Power4Out,
        )
        .to(
            n.flash,
            PropertySet::new()
                .with(Property::AutoAlpha, 0.0)
                .with(Property::Scale, 2.5),
            1.1,
            0.4,
            Ease::Power2Out,
        )
        .set_at(n.reveal, PropertySet::new().with(Property::Visible, 1.0), 1.0)
        .stagger_to(
            &self.chars,
            1.0,
            1.5,
            Ease::BACK_OUT,
            Stagger::Start(0.04),
            |_| {
                PropertySet::new()
                    .with(Property::Opacity, 1.0)
                    .with(Property::Y, 0.0)
                    .with(Property::RotateX, 0.0)
                    .with(Property::Scale, 1.0)
            },
        )
        .stagger_to(
            particles,
            1.3,
            1.0,
            Ease::Power2Out,
            Stagger::Center(0.015),
            |i| burst_target(self.seed, i),
        )
        .stagger_to(
            particles,
            2.5,
            0.4,
            Ease::Power1Out,
            Stagger::Start(0.008),
            |_| {
                PropertySet::new()
                    .with(Property::Opacity, 0.0)
                    .with(Property::Scale, 0.0)
            },
        )
        .to(
            n.glow,
            PropertySet::new()
                .with(Property::Opacity, 0.35)
                .with(Property::Scale, 1.0),
            2.5,
            0.5,
            Ease::Power1InOut,
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

    fn teardown(&mut self, host: &mut dyn SceneHost) {
        self.particles.teardown(host);
        if let Some(n) = self.nodes.take() {
            host.restore_text(n.reveal_text);
        }
        self.chars.clear();
    }
}
