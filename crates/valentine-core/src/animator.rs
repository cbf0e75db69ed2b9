//! Wall-clock property tweens with last-writer-wins per (element, property).

use crate::ease::Ease;
use crate::host::{NodeId, SceneHost};
use crate::props::{Property, PropertySet, Value};
use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Track {
    from: Value,
    to: Value,
    start: f64,
    duration: f64,
    ease: Ease,
}

impl Track {
    fn value_at(&self, now: f64) -> Value {
        if now < self.start {
            return self.from;
        }
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = ((now - self.start) / self.duration).clamp(0.0, 1.0) as f32;
        self.from.lerp(self.to, self.ease.apply(t))
    }

    fn is_done(&self, now: f64) -> bool {
        now >= self.start + self.duration
    }
}

/// Options for [`Animator::animate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    pub duration: f32,
    pub delay: f32,
    pub ease: Ease,
}

impl TweenSpec {
    pub fn new(duration: f32, ease: Ease) -> Self {
        Self {
            duration,
            delay: 0.0,
            ease,
        }
    }

    pub fn delayed(self, delay: f32) -> Self {
        Self { delay, ..self }
    }
}

#[derive(Debug, Default)]
pub struct Animator {
    tracks: FnvHashMap<(NodeId, Property), Track>,
    values: FnvHashMap<(NodeId, Property), Value>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply immediately, cancelling any running tween on the same properties.
    pub fn set(&mut self, node: NodeId, props: &PropertySet, host: &mut dyn SceneHost) {
        for (p, v) in props.iter() {
            self.tracks.remove(&(node, p));
            self.values.insert((node, p), v);
        }
        host.apply(node, props);
    }

    /// Tween each property from its current value. An existing tween on the
    /// same property is replaced, starting from wherever it had got to.
    pub fn animate(&mut self, node: NodeId, to: &PropertySet, spec: TweenSpec, now: f64) {
        for (p, target) in to.iter() {
            let key = (node, p);
            let from = self.current(key, now);
            self.tracks.insert(
                key,
                Track {
                    from,
                    to: target,
                    start: now + spec.delay.max(0.0) as f64,
                    duration: spec.duration.max(0.0) as f64,
                    ease: spec.ease,
                },
            );
        }
    }

    fn current(&self, key: (NodeId, Property), now: f64) -> Value {
        match self.tracks.get(&key) {
            Some(track) => track.value_at(now),
            None => self
                .values
                .get(&key)
                .copied()
                .unwrap_or_else(|| key.1.neutral()),
        }
    }

    /// Last value written for a property, if any.
    pub fn value(&self, node: NodeId, prop: Property) -> Option<Value> {
        self.values.get(&(node, prop)).copied()
    }

    /// Target of the running tween on a property, if any.
    pub fn target(&self, node: NodeId, prop: Property) -> Option<Value> {
        self.tracks.get(&(node, prop)).map(|t| t.to)
    }

    pub fn is_animating(&self, node: NodeId, prop: Property) -> bool {
        self.tracks.contains_key(&(node, prop))
    }

    pub fn active_tracks(&self) -> usize {
        self.tracks.len()
    }

    /// Advance every started tween, apply its value, and drop finished ones.
    pub fn tick(&mut self, now: f64, host: &mut dyn SceneHost) {
        if self.tracks.is_empty() {
            return;
        }
        let mut per_node: Vec<(NodeId, PropertySet)> = Vec::new();
        let mut done = Vec::new();
        for (key, track) in &self.tracks {
            if now < track.start {
                continue;
            }
            let v = track.value_at(now);
            self.values.insert(*key, v);
            match per_node.iter_mut().find(|(n, _)| *n == key.0) {
                Some((_, set)) => set.insert(key.1, v),
                None => per_node.push((key.0, PropertySet::new().with(key.1, v))),
            }
            if track.is_done(now) {
                done.push(*key);
            }
        }
        for key in done {
            self.tracks.remove(&key);
        }
        per_node.sort_by_key(|(n, _)| *n);
        for (node, props) in &per_node {
            host.apply(*node, props);
        }
    }

    pub fn cancel_node(&mut self, node: NodeId) {
        self.tracks.retain(|(n, _), _| *n != node);
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}
