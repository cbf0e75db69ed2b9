//! Acceptance: the one-way switch from asking to celebrating.

use crate::animator::{Animator, TweenSpec};
use crate::confetti::ConfettiBurst;
use crate::constants::{
    BURST_DRIZZLE_INTERVAL_SEC, BURST_DRIZZLE_WINDOW_SEC, BURST_SECONDARY_LEFT_SEC,
    BURST_SECONDARY_RIGHT_SEC, MESSAGE_REVEAL_DELAY_SEC,
};
use crate::ease::Ease;
use crate::host::{NodeId, SceneHost};
use crate::props::{Property, PropertySet};
use crate::timers::TimerQueue;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;
use std::cell::Cell;
use std::rc::Rc;

/// Write-once acceptance flag. Only its owner can raise it.
#[derive(Debug, Default)]
pub struct AcceptanceFlag {
    raised: Rc<Cell<bool>>,
}

impl AcceptanceFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` only for the call that actually raised the flag.
    pub fn raise(&self) -> bool {
        !self.raised.replace(true)
    }

    pub fn is_raised(&self) -> bool {
        self.raised.get()
    }

    pub fn watch(&self) -> AcceptanceWatch {
        AcceptanceWatch {
            raised: self.raised.clone(),
        }
    }
}

/// Read-only view of an [`AcceptanceFlag`].
#[derive(Clone, Debug)]
pub struct AcceptanceWatch {
    raised: Rc<Cell<bool>>,
}

impl AcceptanceWatch {
    pub fn is_accepted(&self) -> bool {
        self.raised.get()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CelebrationParams {
    pub primary: ConfettiBurst,
    pub left: (f64, ConfettiBurst),
    pub right: (f64, ConfettiBurst),
    pub drizzle_interval: f64,
    pub drizzle_window: f64,
    pub drizzle_count: u32,
    pub drizzle_spread: f32,
    pub message_delay: f32,
}

impl Default for CelebrationParams {
    fn default() -> Self {
        Self {
            primary: ConfettiBurst::new(150, 120.0, Vec2::new(0.5, 0.6)),
            left: (
                BURST_SECONDARY_LEFT_SEC,
                ConfettiBurst::new(80, 80.0, Vec2::new(0.15, 0.5)).angled(60.0),
            ),
            right: (
                BURST_SECONDARY_RIGHT_SEC,
                ConfettiBurst::new(80, 80.0, Vec2::new(0.85, 0.5)).angled(120.0),
            ),
            drizzle_interval: BURST_DRIZZLE_INTERVAL_SEC,
            drizzle_window: BURST_DRIZZLE_WINDOW_SEC,
            drizzle_count: 15,
            drizzle_spread: 60.0,
            message_delay: MESSAGE_REVEAL_DELAY_SEC,
        }
    }
}

/// Elements the celebration animates. Any of them may be absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CelebrationNodes {
    pub question: Option<NodeId>,
    pub decline: Option<NodeId>,
    pub message: Option<NodeId>,
}

#[derive(Clone, Debug, PartialEq)]
enum Task {
    Burst(ConfettiBurst),
    Drizzle,
}

#[derive(Debug)]
pub struct Celebration {
    flag: AcceptanceFlag,
    params: CelebrationParams,
    nodes: CelebrationNodes,
    timers: TimerQueue<Task>,
    rng: StdRng,
}

impl Celebration {
    pub fn new(nodes: CelebrationNodes, params: CelebrationParams, rng: StdRng) -> Self {
        Self {
            flag: AcceptanceFlag::new(),
            params,
            nodes,
            timers: TimerQueue::new(),
            rng,
        }
    }

    pub fn watch(&self) -> AcceptanceWatch {
        self.flag.watch()
    }

    pub fn is_accepted(&self) -> bool {
        self.flag.is_raised()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Hide the message until acceptance.
    pub fn prepare(&self, anim: &mut Animator, host: &mut dyn SceneHost) {
        if let Some(message) = self.nodes.message {
            let hidden = PropertySet::new()
                .with(Property::AutoAlpha, 0.0)
                .with(Property::Y, 40.0)
                .with(Property::Scale, 0.9);
            anim.set(message, &hidden, host);
        }
    }

    /// Run the celebration. Only the first call does anything; it returns
    /// whether this call was that one.
    pub fn accept(&mut self, now: f64, host: &mut dyn SceneHost, anim: &mut Animator) -> bool {
        if !self.flag.raise() {
            return false;
        }
        log::info!("[celebrate] accepted");

        host.confetti(&self.params.primary);
        let (left_at, left) = self.params.left.clone();
        let (right_at, right) = self.params.right.clone();
        self.timers.once(now, left_at, Task::Burst(left));
        self.timers.once(now, right_at, Task::Burst(right));
        self.timers.every(
            now,
            self.params.drizzle_interval,
            self.params.drizzle_window,
            Task::Drizzle,
        );

        if let Some(question) = self.nodes.question {
            let out = PropertySet::new()
                .with(Property::Opacity, 0.0)
                .with(Property::Scale, 0.85)
                .with(Property::Blur, 12.0);
            anim.animate(question, &out, TweenSpec::new(0.6, Ease::Power2In), now);
        }
        if let Some(decline) = self.nodes.decline {
            let out = PropertySet::new()
                .with(Property::Opacity, 0.0)
                .with(Property::Scale, 0.0);
            anim.animate(decline, &out, TweenSpec::new(0.3, Ease::Power1Out), now);
        }
        if let Some(message) = self.nodes.message {
            let shown = PropertySet::new()
                .with(Property::AutoAlpha, 1.0)
                .with(Property::Y, 0.0)
                .with(Property::Scale, 1.0);
            let spec = TweenSpec::new(1.0, Ease::BackOut(1.4)).delayed(self.params.message_delay);
            anim.animate(message, &shown, spec, now);
        }
        true
    }

    /// Fire due bursts. Stops on its own once the drizzle window has passed.
    pub fn tick(&mut self, now: f64, host: &mut dyn SceneHost) {
        if self.timers.is_empty() {
            return;
        }
        for task in self.timers.advance(now) {
            match task {
                Task::Burst(burst) => host.confetti(&burst),
                Task::Drizzle => {
                    let origin = Vec2::new(self.rng.gen::<f32>(), self.rng.gen::<f32>() * 0.4);
                    let burst = ConfettiBurst::new(
                        self.params.drizzle_count,
                        self.params.drizzle_spread,
                        origin,
                    );
                    host.confetti(&burst);
                }
            }
        }
        if self.timers.is_empty() {
            log::debug!("[celebrate] bursts finished");
        }
    }

    /// Drop pending bursts. The acceptance flag stays raised.
    pub fn teardown(&mut self) {
        self.timers.clear();
    }
}
