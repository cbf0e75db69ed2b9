//! The closing question: an accept button that keeps growing and a decline
//! button that won't be caught.

use super::{ids, require};
use crate::animator::Animator;
use crate::celebration::{Celebration, CelebrationNodes, CelebrationParams};
use crate::constants::ACCEPT_GLOW_PERIOD_SEC;
use crate::ease::Ease;
use crate::error::SceneResult;
use crate::evasive::{EvasiveParams, EvasiveTarget, Proximity, TriggerResponse};
use crate::host::{NodeId, SceneHost};
use crate::props::{Property, PropertySet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Glow strength of the accept button `t` seconds into its pulse: sine in-out
/// from 0 to 1 and back, one leg per `period`.
pub fn glow_pulse(t: f64, period: f32) -> f32 {
    if period.is_nan() || period <= 0.0 {
        return 0.0;
    }
    let legs = (t.max(0.0) / period as f64) as f32;
    let leg = legs.floor();
    let k = Ease::SineInOut.apply(legs - leg);
    if leg as u64 % 2 == 0 {
        k
    } else {
        1.0 - k
    }
}

#[derive(Debug)]
pub struct PromptScene {
    accept: NodeId,
    evasive: EvasiveTarget,
    celebration: Celebration,
    animator: Animator,
    pulse_started: Option<f64>,
}

impl PromptScene {
    /// Resolve the prompt's elements. The accept button is required; the
    /// decline button, question and message degrade to no-ops when absent.
    /// `rng` seeds both relocation and confetti placement.
    pub fn mount(
        host: &mut dyn SceneHost,
        evasive: EvasiveParams,
        celebration: CelebrationParams,
        mut rng: StdRng,
    ) -> SceneResult<Self> {
        require(host, "prompt", ids::PROMPT_SECTION)?;
        let accept = require(host, "prompt", ids::PROMPT_ACCEPT)?;
        let decline = host.resolve(ids::PROMPT_DECLINE);
        if decline.is_none() {
            log::warn!("[scene] prompt: no decline button, evasion disabled");
        }
        let nodes = CelebrationNodes {
            question: host.resolve(ids::PROMPT_QUESTION),
            decline,
            message: host.resolve(ids::PROMPT_MESSAGE),
        };

        let celebration = Celebration::new(
            nodes,
            celebration,
            StdRng::seed_from_u64(rng.gen()),
        );
        let evasive = EvasiveTarget::new(
            evasive,
            decline,
            Some(accept),
            celebration.watch(),
            StdRng::seed_from_u64(rng.gen()),
        );
        let mut animator = Animator::new();
        celebration.prepare(&mut animator, host);

        Ok(Self {
            accept,
            evasive,
            celebration,
            animator,
            pulse_started: None,
        })
    }

    pub fn evasive(&self) -> &EvasiveTarget {
        &self.evasive
    }

    pub fn celebration(&self) -> &Celebration {
        &self.celebration
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn on_proximity(
        &mut self,
        trigger: Proximity,
        now: f64,
        host: &mut dyn SceneHost,
    ) -> TriggerResponse {
        self.evasive
            .on_proximity(trigger, now, host, &mut self.animator)
    }

    /// The accept button was clicked. Returns `true` the first time only.
    pub fn on_accept(&mut self, now: f64, host: &mut dyn SceneHost) -> bool {
        let accepted = self.celebration.accept(now, host, &mut self.animator);
        if accepted {
            self.pulse_started = None;
        }
        accepted
    }

    pub fn tick(&mut self, now: f64, host: &mut dyn SceneHost) {
        if !self.celebration.is_accepted() {
            let start = *self.pulse_started.get_or_insert(now);
            let glow = glow_pulse(now - start, ACCEPT_GLOW_PERIOD_SEC);
            host.apply(self.accept, &PropertySet::new().with(Property::Glow, glow));
        }
        self.celebration.tick(now, host);
        self.animator.tick(now, host);
    }

    pub fn teardown(&mut self) {
        self.celebration.teardown();
        self.animator.clear();
    }
}
