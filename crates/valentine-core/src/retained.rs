//! In-memory [`SceneHost`]: a flat element table that records everything
//! scenes do to it. Used headless and by the tests.

use crate::confetti::ConfettiBurst;
use crate::host::{NodeId, ParticleStyle, Rect, SceneHost, Viewport};
use crate::props::{Property, PropertySet, Value};
use glam::Vec2;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RetainedNode {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub parent: Option<NodeId>,
    pub rect: Option<Rect>,
    pub props: BTreeMap<Property, Value>,
    pub text: String,
    pub pinned: Option<Vec2>,
    /// Created by the scene (particle or split character) rather than by the page.
    pub transient: bool,
    pub style: Option<ParticleStyle>,
}

#[derive(Debug)]
pub struct RetainedScene {
    nodes: BTreeMap<NodeId, RetainedNode>,
    next_id: u32,
    viewport: Viewport,
    haptics: bool,
    pub vibrations: Vec<u32>,
    pub bursts: Vec<ConfettiBurst>,
    pub applies: usize,
}

impl RetainedScene {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            nodes: BTreeMap::new(),
            next_id: 1,
            viewport,
            haptics: false,
            vibrations: Vec::new(),
            bursts: Vec::new(),
            applies: 0,
        }
    }

    pub fn with_haptics(mut self, haptics: bool) -> Self {
        self.haptics = haptics;
        self
    }

    fn insert(&mut self, node: RetainedNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    /// Add a page element with an id.
    pub fn add(&mut self, id: &str, parent: Option<NodeId>, rect: Option<Rect>) -> NodeId {
        self.insert(RetainedNode {
            id: Some(id.to_string()),
            parent,
            rect,
            ..RetainedNode::default()
        })
    }

    /// Add a page element identified by class only.
    pub fn add_classed(&mut self, class: &str, parent: Option<NodeId>, rect: Option<Rect>) -> NodeId {
        self.insert(RetainedNode {
            classes: vec![class.to_string()],
            parent,
            rect,
            ..RetainedNode::default()
        })
    }

    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.text = text.to_string();
        }
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.rect = Some(rect);
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn node(&self, node: NodeId) -> Option<&RetainedNode> {
        self.nodes.get(&node)
    }

    pub fn value(&self, node: NodeId, prop: Property) -> Option<Value> {
        self.nodes.get(&node).and_then(|n| n.props.get(&prop)).copied()
    }

    pub fn scalar(&self, node: NodeId, prop: Property) -> Option<f32> {
        self.value(node, prop).and_then(Value::scalar)
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).map(|n| n.text.as_str())
    }

    pub fn children(&self, parent: NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.parent == Some(parent))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Live scene-created elements.
    pub fn transient_count(&self) -> usize {
        self.nodes.values().filter(|n| n.transient).count()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn is_within(&self, node: NodeId, scope: NodeId) -> bool {
        let mut cur = self.nodes.get(&node).and_then(|n| n.parent);
        while let Some(p) = cur {
            if p == scope {
                return true;
            }
            cur = self.nodes.get(&p).and_then(|n| n.parent);
        }
        false
    }

    fn remove_subtree(&mut self, node: NodeId) {
        for child in self.children(node) {
            self.remove_subtree(child);
        }
        self.nodes.remove(&node);
    }
}

impl SceneHost for RetainedScene {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resolve(&mut self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.id.as_deref() == Some(id))
            .map(|(k, _)| *k)
    }

    fn query_class(&mut self, scope: Option<NodeId>, class: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.classes.iter().any(|c| c == class))
            .map(|(k, _)| *k)
            .filter(|k| scope.map_or(true, |s| self.is_within(*k, s)))
            .collect()
    }

    fn rect(&self, node: NodeId) -> Option<Rect> {
        let n = self.nodes.get(&node)?;
        let mut rect = n.rect?;
        if n.pinned.is_some() {
            let left = n.props.get(&Property::Left).and_then(|v| v.scalar());
            let top = n.props.get(&Property::Top).and_then(|v| v.scalar());
            rect.origin = Vec2::new(
                left.unwrap_or(rect.origin.x),
                top.unwrap_or(rect.origin.y),
            );
        }
        Some(rect)
    }

    fn apply(&mut self, node: NodeId, props: &PropertySet) {
        let Some(n) = self.nodes.get_mut(&node) else {
            return;
        };
        for (p, v) in props.iter() {
            n.props.insert(p, v);
        }
        self.applies += 1;
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.set_text_content(node, text);
    }

    fn pin_fixed(&mut self, node: NodeId, at: Vec2) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.pinned = Some(at);
            n.props.insert(Property::Left, Value::Scalar(at.x));
            n.props.insert(Property::Top, Value::Scalar(at.y));
        }
    }

    fn split_chars(&mut self, node: NodeId) -> Vec<NodeId> {
        let Some(text) = self.nodes.get(&node).map(|n| n.text.clone()) else {
            return Vec::new();
        };
        text.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                self.insert(RetainedNode {
                    parent: Some(node),
                    text: c.to_string(),
                    transient: true,
                    ..RetainedNode::default()
                })
            })
            .collect()
    }

    fn restore_text(&mut self, node: NodeId) {
        let split: Vec<NodeId> = self
            .children(node)
            .into_iter()
            .filter(|c| self.nodes.get(c).is_some_and(|n| n.transient))
            .collect();
        for c in split {
            self.remove_subtree(c);
        }
    }

    fn spawn_particle(&mut self, parent: NodeId, style: &ParticleStyle) -> Option<NodeId> {
        if !self.nodes.contains_key(&parent) {
            return None;
        }
        Some(self.insert(RetainedNode {
            parent: Some(parent),
            transient: true,
            style: Some(*style),
            ..RetainedNode::default()
        }))
    }

    fn remove(&mut self, node: NodeId) {
        self.remove_subtree(node);
    }

    fn vibrate(&mut self, millis: u32) -> bool {
        if self.haptics {
            self.vibrations.push(millis);
        }
        self.haptics
    }

    fn confetti(&mut self, burst: &ConfettiBurst) {
        self.bursts.push(burst.clone());
    }
}
