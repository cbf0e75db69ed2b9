//! Capability interface between scene logic and the rendering environment.
//!
//! The web frontend implements [`SceneHost`] over DOM elements; tests and
//! headless runs use [`crate::retained::RetainedScene`].

use crate::confetti::ConfettiBurst;
use crate::props::{PropertySet, Rgba};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

/// Opaque handle to an element owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

/// Axis-aligned rectangle in viewport (CSS pixel) space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn left(&self) -> f32 {
        self.origin.x
    }

    pub fn top(&self) -> f32 {
        self.origin.y
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.y
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Shape of a synthesized particle element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleShape {
    /// SVG circle in the parent's user units.
    Circle { radius: f32 },
    /// Glowing absolutely positioned dot, size in pixels, position in percent of the parent.
    Dot { size: f32, left_pct: f32, top_pct: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleStyle {
    pub shape: ParticleShape,
    pub color: Rgba,
}

/// Everything scene logic may ask of the rendering environment.
///
/// Lookups return `None` when the element is absent; mutations on unknown
/// nodes are ignored.
pub trait SceneHost {
    fn viewport(&self) -> Viewport;

    /// Look up an element by id.
    fn resolve(&mut self, id: &str) -> Option<NodeId>;

    /// All elements carrying `class`, optionally restricted to descendants of `scope`.
    fn query_class(&mut self, scope: Option<NodeId>, class: &str) -> Vec<NodeId>;

    /// Current bounding rectangle, read from live layout.
    fn rect(&self, node: NodeId) -> Option<Rect>;

    fn apply(&mut self, node: NodeId, props: &PropertySet);

    fn set_text(&mut self, node: NodeId, text: &str);

    /// Take the element out of normal flow and anchor it at fixed viewport coordinates.
    fn pin_fixed(&mut self, node: NodeId, at: Vec2);

    /// Split a text element into one element per visible character.
    fn split_chars(&mut self, node: NodeId) -> Vec<NodeId>;

    /// Undo [`SceneHost::split_chars`].
    fn restore_text(&mut self, node: NodeId);

    fn spawn_particle(&mut self, parent: NodeId, style: &ParticleStyle) -> Option<NodeId>;

    fn remove(&mut self, node: NodeId);

    /// Haptic pulse. Returns `false` when the device has no vibration support.
    fn vibrate(&mut self, _millis: u32) -> bool {
        false
    }

    fn confetti(&mut self, _burst: &ConfettiBurst) {}
}

/// Host handle shared between scenes and progress listeners.
pub type SharedHost = Rc<RefCell<dyn SceneHost>>;
