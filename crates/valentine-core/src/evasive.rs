//! The decline button that runs away from the pointer.
//!
//! `Idle -> Escaped -> (Escaped | Accepted)`. The first proximity trigger
//! lifts the button out of the page flow at its current on-screen position;
//! every trigger then moves it to a random spot inside the viewport, swaps
//! its label for a more insistent one and makes the accept button bigger.
//! Once the acceptance flag is raised nothing here mutates anything again.

use crate::animator::{Animator, TweenSpec};
use crate::celebration::AcceptanceWatch;
use crate::constants::{
    ACCEPT_GROWTH_STEP, ACCEPT_GROW_SEC, DECLINE_LABELS, ESCAPE_MOVE_SEC, ESCAPE_PADDING_PX,
    HAPTIC_PULSE_MS, MAX_ACCEPT_SCALE,
};
use crate::ease::Ease;
use crate::host::{NodeId, SceneHost, Viewport};
use crate::props::{Property, PropertySet};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct EvasiveParams {
    pub labels: Vec<String>,
    pub padding: f32,
    pub move_duration: f32,
    pub growth_step: f32,
    pub max_growth: f32,
    pub haptic_ms: u32,
}

impl Default for EvasiveParams {
    fn default() -> Self {
        Self {
            labels: DECLINE_LABELS.iter().map(|s| s.to_string()).collect(),
            padding: ESCAPE_PADDING_PX,
            move_duration: ESCAPE_MOVE_SEC,
            growth_step: ACCEPT_GROWTH_STEP,
            max_growth: MAX_ACCEPT_SCALE,
            haptic_ms: HAPTIC_PULSE_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Escaped,
    Accepted,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvasiveState {
    pub has_escaped: bool,
    pub attempt_count: u32,
    pub label_index: usize,
    pub growth_factor: f32,
}

impl Default for EvasiveState {
    fn default() -> Self {
        Self {
            has_escaped: false,
            attempt_count: 0,
            label_index: 0,
            growth_factor: 1.0,
        }
    }
}

/// Input that means "the user is about to hit the decline button".
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Proximity {
    PointerEnter,
    /// Pointer position in viewport space; triggers when it crosses into the button.
    PointerMove(Vec2),
    TouchStart,
}

impl Proximity {
    /// Whether a pointer of this `pointerType` drives the hover triggers.
    /// Touch approaches arrive as `TouchStart` instead.
    pub fn tracks_hover(pointer_type: &str) -> bool {
        pointer_type != "touch"
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TriggerResponse {
    /// The trigger moved the state machine.
    pub escaped: bool,
    /// The host should suppress the event's default action.
    pub prevent_default: bool,
}

/// Random top-left corner keeping a `size` box `padding` away from every viewport edge.
///
/// When the viewport is too small the range collapses onto `padding`.
pub fn random_position<R: Rng>(rng: &mut R, viewport: Viewport, size: Vec2, padding: f32) -> Vec2 {
    let max_x = (viewport.width - size.x - padding).max(padding);
    let max_y = (viewport.height - size.y - padding).max(padding);
    Vec2::new(
        padding + rng.gen::<f32>() * (max_x - padding),
        padding + rng.gen::<f32>() * (max_y - padding),
    )
}

#[derive(Debug)]
pub struct EvasiveTarget {
    params: EvasiveParams,
    state: EvasiveState,
    decline: Option<NodeId>,
    accept: Option<NodeId>,
    accepted: AcceptanceWatch,
    rng: StdRng,
    pointer_inside: bool,
    position: Option<Vec2>,
}

impl EvasiveTarget {
    pub fn new(
        params: EvasiveParams,
        decline: Option<NodeId>,
        accept: Option<NodeId>,
        accepted: AcceptanceWatch,
        rng: StdRng,
    ) -> Self {
        Self {
            params,
            state: EvasiveState::default(),
            decline,
            accept,
            accepted,
            rng,
            pointer_inside: false,
            position: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.accepted.is_accepted() {
            Phase::Accepted
        } else if self.state.has_escaped {
            Phase::Escaped
        } else {
            Phase::Idle
        }
    }

    pub fn state(&self) -> EvasiveState {
        self.state
    }

    pub fn label(&self) -> &str {
        self.params
            .labels
            .get(self.state.label_index)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Fixed-position target chosen by the latest relocation.
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn decline_node(&self) -> Option<NodeId> {
        self.decline
    }

    pub fn on_proximity(
        &mut self,
        trigger: Proximity,
        now: f64,
        host: &mut dyn SceneHost,
        anim: &mut Animator,
    ) -> TriggerResponse {
        let prevent_default = matches!(trigger, Proximity::TouchStart);
        if self.accepted.is_accepted() {
            return TriggerResponse {
                escaped: false,
                prevent_default,
            };
        }
        match trigger {
            Proximity::PointerMove(p) => {
                let inside = self
                    .decline
                    .and_then(|n| host.rect(n))
                    .is_some_and(|r| r.contains(p));
                let entered = inside && !self.pointer_inside;
                self.pointer_inside = inside;
                if !entered {
                    return TriggerResponse::default();
                }
            }
            // Enter and the move that follows it are one approach, not two.
            Proximity::PointerEnter => self.pointer_inside = true,
            Proximity::TouchStart => {}
        }

        self.escape(now, host, anim);
        TriggerResponse {
            escaped: true,
            prevent_default,
        }
    }

    fn escape(&mut self, now: f64, host: &mut dyn SceneHost, anim: &mut Animator) {
        if !host.vibrate(self.params.haptic_ms) {
            log::trace!("[evasive] no haptics");
        }

        // Geometry must be read while the button is still in flow.
        let rect = self.decline.and_then(|n| host.rect(n));
        if !self.state.has_escaped {
            self.state.has_escaped = true;
            if let (Some(node), Some(r)) = (self.decline, rect) {
                host.pin_fixed(node, r.origin);
                let at = PropertySet::new()
                    .with(Property::Left, r.origin.x)
                    .with(Property::Top, r.origin.y);
                anim.set(node, &at, host);
                self.position = Some(r.origin);
            }
        }

        self.state.attempt_count = self.state.attempt_count.saturating_add(1);
        let last = self.params.labels.len().saturating_sub(1);
        self.state.label_index = (self.state.attempt_count as usize).min(last);
        if let Some(node) = self.decline {
            if let Some(text) = self.params.labels.get(self.state.label_index) {
                host.set_text(node, text);
            }
        }

        let viewport = host.viewport();
        match (self.decline, rect) {
            (Some(node), Some(r)) if !viewport.is_degenerate() => {
                let target = random_position(&mut self.rng, viewport, r.size, self.params.padding);
                let to = PropertySet::new()
                    .with(Property::Left, target.x)
                    .with(Property::Top, target.y);
                anim.animate(
                    node,
                    &to,
                    TweenSpec::new(self.params.move_duration, Ease::BounceOut),
                    now,
                );
                self.position = Some(target);
            }
            _ => log::debug!("[evasive] relocation skipped"),
        }

        let grown = (self.state.growth_factor + self.params.growth_step).min(self.params.max_growth);
        self.state.growth_factor = grown.max(self.state.growth_factor);
        if let Some(accept) = self.accept {
            let to = PropertySet::new().with(Property::Scale, self.state.growth_factor);
            anim.animate(accept, &to, TweenSpec::new(ACCEPT_GROW_SEC, Ease::BACK_OUT), now);
        }

        log::debug!(
            "[evasive] attempt {} label {:?} growth {:.2}",
            self.state.attempt_count,
            self.label(),
            self.state.growth_factor
        );
    }
}
