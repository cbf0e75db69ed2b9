//! Progress-to-state mapping.
//!
//! A [`Timeline`] is a declarative list of tweens laid out on a local time
//! axis. [`Timeline::sample`] turns a normalized progress value into the
//! complete property state of every element the timeline touches. Sampling
//! is pure: the result depends on `progress` only, never on the order or
//! direction in which earlier samples were taken.

use crate::ease::Ease;
use crate::host::NodeId;
use crate::props::{Property, PropertySet, Value};
use std::collections::BTreeMap;

/// Property state keyed by element and property, ordered for deterministic application.
pub type SceneState = BTreeMap<(NodeId, Property), Value>;

#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub node: NodeId,
    pub start: f32,
    pub end: f32,
    pub from: PropertySet,
    pub to: PropertySet,
    pub ease: Ease,
}

impl Tween {
    /// Local eased progress at timeline time `t`, `None` before the tween starts.
    fn local(&self, t: f32) -> Option<f32> {
        if t < self.start {
            return None;
        }
        let span = self.end - self.start;
        if span <= 0.0 {
            return Some(1.0);
        }
        Some(self.ease.apply(((t - self.start) / span).clamp(0.0, 1.0)))
    }
}

/// Offsets a batch of tweens against each other.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stagger {
    /// `each` seconds between consecutive elements, first element first.
    Start(f32),
    /// `each` seconds per step of distance from the middle element.
    Center(f32),
}

impl Stagger {
    pub fn offset(self, index: usize, count: usize) -> f32 {
        match self {
            Stagger::Start(each) => each * index as f32,
            Stagger::Center(each) => {
                let center = count.saturating_sub(1) as f32 * 0.5;
                each * (index as f32 - center).abs()
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    initial: SceneState,
    tweens: Vec<Tween>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial value, in force until a tween overrides it.
    pub fn set(&mut self, node: NodeId, props: PropertySet) -> &mut Self {
        for (p, v) in props.iter() {
            self.initial.insert((node, p), v);
        }
        self
    }

    /// Instantaneous change at `at`.
    pub fn set_at(&mut self, node: NodeId, props: PropertySet, at: f32) -> &mut Self {
        self.to(node, props, at, 0.0, Ease::Linear)
    }

    /// Tween from whatever the timeline holds at `at` to `to`.
    pub fn to(
        &mut self,
        node: NodeId,
        to: PropertySet,
        at: f32,
        duration: f32,
        ease: Ease,
    ) -> &mut Self {
        let from = to
            .iter()
            .map(|(p, _)| {
                let v = self.value_at(node, p, at).unwrap_or_else(|| p.neutral());
                (p, v)
            })
            .collect();
        self.push(Tween {
            node,
            start: at,
            end: at + duration.max(0.0),
            from,
            to,
            ease,
        })
    }

    pub fn from_to(
        &mut self,
        node: NodeId,
        from: PropertySet,
        to: PropertySet,
        at: f32,
        duration: f32,
        ease: Ease,
    ) -> &mut Self {
        let mut resolved = PropertySet::new();
        for (p, _) in to.iter() {
            let v = from
                .get(p)
                .or_else(|| self.value_at(node, p, at))
                .unwrap_or_else(|| p.neutral());
            resolved.insert(p, v);
        }
        self.push(Tween {
            node,
            start: at,
            end: at + duration.max(0.0),
            from: resolved,
            to,
            ease,
        })
    }

    /// One `to` tween per node, offset by `stagger`; `props(i)` yields node `i`'s target.
    pub fn stagger_to(
        &mut self,
        nodes: &[NodeId],
        at: f32,
        duration: f32,
        ease: Ease,
        stagger: Stagger,
        mut props: impl FnMut(usize) -> PropertySet,
    ) -> &mut Self {
        let n = nodes.len();
        for (i, node) in nodes.iter().enumerate() {
            self.to(*node, props(i), at + stagger.offset(i, n), duration, ease);
        }
        self
    }

    fn push(&mut self, tween: Tween) -> &mut Self {
        // Stable by start time: tweens starting together keep insertion order.
        let pos = self.tweens.partition_point(|t| t.start <= tween.start);
        self.tweens.insert(pos, tween);
        self
    }

    /// End of the last tween, in timeline seconds.
    pub fn duration(&self) -> f32 {
        self.tweens.iter().map(|t| t.end).fold(0.0, f32::max)
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty() && self.initial.is_empty()
    }

    /// State at normalized progress. Out-of-range and NaN progress clamp.
    pub fn sample(&self, progress: f32) -> SceneState {
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        self.sample_at_time(p * self.duration())
    }

    /// State at timeline time `t`.
    pub fn sample_at_time(&self, t: f32) -> SceneState {
        let mut state = self.initial.clone();
        // Fully unapplied values for keys only tweens touch.
        for tween in &self.tweens {
            for (p, v) in tween.from.iter() {
                state.entry((tween.node, p)).or_insert(v);
            }
        }
        for tween in &self.tweens {
            let Some(k) = tween.local(t) else {
                break;
            };
            for (p, to) in tween.to.iter() {
                let from = tween.from.get(p).unwrap_or(to);
                state.insert((tween.node, p), from.lerp(to, k));
            }
        }
        state
    }

    fn value_at(&self, node: NodeId, prop: Property, t: f32) -> Option<Value> {
        let mut value = self.initial.get(&(node, prop)).copied();
        for tween in self.tweens.iter().filter(|tw| tw.node == node) {
            let Some(to) = tween.to.get(prop) else {
                continue;
            };
            let from = tween.from.get(prop).unwrap_or(to);
            match tween.local(t) {
                Some(k) => value = Some(from.lerp(to, k)),
                None => {
                    value.get_or_insert(from);
                }
            }
        }
        value
    }
}

/// Regroup a sampled state into one property set per element, in node order.
pub fn group_by_node(state: &SceneState) -> Vec<(NodeId, PropertySet)> {
    let mut out: Vec<(NodeId, PropertySet)> = Vec::new();
    for ((node, prop), value) in state {
        match out.last_mut() {
            Some((last, set)) if last == node => set.insert(*prop, *value),
            _ => out.push((*node, PropertySet::new().with(*prop, *value))),
        }
    }
    out
}
