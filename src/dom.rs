use crate::constants::{ACCEPT_GLOW_MAX_PX, ACCEPT_GLOW_MIN_PX, ESCAPED_Z_INDEX, SVG_NS};
use fnv::FnvHashMap;
use glam::Vec2;
use valentine_core::confetti::ConfettiBurst;
use valentine_core::ease::lerp;
use valentine_core::host::{NodeId, ParticleShape, ParticleStyle, Rect, SceneHost, Viewport};
use valentine_core::props::{Property, PropertySet, Value};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

pub fn scroll_y() -> f32 {
    web::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0) as f32
}

/// Inline style of an HTML or SVG element.
pub fn style_of(el: &web::Element) -> Option<web::CssStyleDeclaration> {
    if let Some(h) = el.dyn_ref::<web::HtmlElement>() {
        return Some(h.style());
    }
    el.dyn_ref::<web::SvgElement>().map(|s| s.style())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeKind {
    Element,
    /// SVG circle positioned by its centre attributes.
    Circle,
}

#[derive(Clone, Copy, Debug)]
struct Transform {
    x: f32,
    y: f32,
    scale: f32,
    rotate_x: Option<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotate_x: None,
        }
    }
}

impl Transform {
    fn to_css(self) -> String {
        match self.rotate_x {
            Some(r) => format!(
                "translate({:.2}px, {:.2}px) perspective(500px) rotateX({:.2}deg) scale({:.4})",
                self.x, self.y, r, self.scale
            ),
            None => format!(
                "translate({:.2}px, {:.2}px) scale({:.4})",
                self.x, self.y, self.scale
            ),
        }
    }
}

struct Entry {
    el: web::Element,
    kind: NodeKind,
    transform: Transform,
    original_text: Option<String>,
    split: Vec<NodeId>,
}

/// [`SceneHost`] over the live document. Node ids index a registry of
/// elements the scenes have looked up or created.
pub struct DomHost {
    document: web::Document,
    entries: Vec<Option<Entry>>,
    ids: FnvHashMap<String, NodeId>,
    bursts: Vec<ConfettiBurst>,
}

impl DomHost {
    pub fn new(document: web::Document) -> Self {
        Self {
            document,
            entries: Vec::new(),
            ids: FnvHashMap::default(),
            bursts: Vec::new(),
        }
    }

    pub fn document(&self) -> &web::Document {
        &self.document
    }

    pub fn element(&self, node: NodeId) -> Option<&web::Element> {
        self.entry(node).map(|e| &e.el)
    }

    /// Confetti bursts requested since the last call.
    pub fn take_bursts(&mut self) -> Vec<ConfettiBurst> {
        std::mem::take(&mut self.bursts)
    }

    fn entry(&self, node: NodeId) -> Option<&Entry> {
        self.entries.get(node.0 as usize).and_then(|e| e.as_ref())
    }

    fn entry_mut(&mut self, node: NodeId) -> Option<&mut Entry> {
        self.entries.get_mut(node.0 as usize).and_then(|e| e.as_mut())
    }

    fn register(&mut self, el: web::Element, kind: NodeKind) -> NodeId {
        let known = self
            .entries
            .iter()
            .position(|e| e.as_ref().is_some_and(|e| e.el == el));
        if let Some(i) = known {
            return NodeId(i as u32);
        }
        let id = NodeId(self.entries.len() as u32);
        self.entries.push(Some(Entry {
            el,
            kind,
            transform: Transform::default(),
            original_text: None,
            split: Vec::new(),
        }));
        id
    }

    fn forget(&mut self, node: NodeId) -> Option<Entry> {
        self.ids.retain(|_, n| *n != node);
        self.entries.get_mut(node.0 as usize).and_then(|e| e.take())
    }

    fn create_span(&self, class: &str, text: &str) -> Option<web::Element> {
        let span = self.document.create_element("span").ok()?;
        span.set_class_name(class);
        span.set_text_content(Some(text));
        if let Some(style) = style_of(&span) {
            _ = style.set_property("display", "inline-block");
        }
        Some(span)
    }
}

fn px(v: f32) -> String {
    format!("{v:.2}px")
}

fn glow_shadow(g: f32) -> String {
    let g = g.clamp(0.0, 1.0);
    format!(
        "0 0 {:.1}px rgba(168,85,247,{:.3}), 0 4px 20px rgba(0,0,0,0.3)",
        lerp(ACCEPT_GLOW_MIN_PX, ACCEPT_GLOW_MAX_PX, g),
        0.3 + 0.4 * g
    )
}

impl SceneHost for DomHost {
    fn viewport(&self) -> Viewport {
        let Some(w) = web::window() else {
            return Viewport::default();
        };
        let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        Viewport::new(dim(w.inner_width()), dim(w.inner_height()))
    }

    fn resolve(&mut self, id: &str) -> Option<NodeId> {
        if let Some(n) = self.ids.get(id) {
            return Some(*n);
        }
        let el = self.document.get_element_by_id(id)?;
        let node = self.register(el, NodeKind::Element);
        self.ids.insert(id.to_string(), node);
        Some(node)
    }

    fn query_class(&mut self, scope: Option<NodeId>, class: &str) -> Vec<NodeId> {
        let selector = format!(".{class}");
        let list = match scope.and_then(|s| self.element(s).cloned()) {
            Some(root) => root.query_selector_all(&selector),
            None => self.document.query_selector_all(&selector),
        };
        let Ok(list) = list else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|n| n.dyn_into::<web::Element>().ok())
            .map(|el| self.register(el, NodeKind::Element))
            .collect()
    }

    fn rect(&self, node: NodeId) -> Option<Rect> {
        let r = self.entry(node)?.el.get_bounding_client_rect();
        Some(Rect::new(
            r.left() as f32,
            r.top() as f32,
            r.width() as f32,
            r.height() as f32,
        ))
    }

    fn apply(&mut self, node: NodeId, props: &PropertySet) {
        let Some(entry) = self.entry_mut(node) else {
            return;
        };
        let el = entry.el.clone();
        let Some(style) = style_of(&el) else {
            return;
        };
        let mut transformed = false;
        for (prop, value) in props.iter() {
            match (prop, value) {
                (Property::X, Value::Scalar(v)) if entry.kind == NodeKind::Circle => {
                    _ = el.set_attribute("cx", &format!("{v:.2}"));
                }
                (Property::Y, Value::Scalar(v)) if entry.kind == NodeKind::Circle => {
                    _ = el.set_attribute("cy", &format!("{v:.2}"));
                }
                (Property::Opacity, Value::Scalar(v)) if entry.kind == NodeKind::Circle => {
                    _ = el.set_attribute("opacity", &format!("{v:.3}"));
                }
                (Property::Opacity, Value::Scalar(v)) => {
                    _ = style.set_property("opacity", &format!("{v:.3}"));
                }
                (Property::AutoAlpha, Value::Scalar(v)) => {
                    _ = style.set_property("opacity", &format!("{v:.3}"));
                    let vis = if v <= 0.0 { "hidden" } else { "visible" };
                    _ = style.set_property("visibility", vis);
                }
                (Property::Visible, Value::Scalar(v)) => {
                    let vis = if v >= 0.5 { "visible" } else { "hidden" };
                    _ = style.set_property("visibility", vis);
                }
                (Property::X, Value::Scalar(v)) => {
                    entry.transform.x = v;
                    transformed = true;
                }
                (Property::Y, Value::Scalar(v)) => {
                    entry.transform.y = v;
                    transformed = true;
                }
                (Property::Scale, Value::Scalar(v)) => {
                    entry.transform.scale = v;
                    transformed = true;
                }
                (Property::RotateX, Value::Scalar(v)) => {
                    entry.transform.rotate_x = Some(v);
                    transformed = true;
                }
                (Property::Left, Value::Scalar(v)) => {
                    _ = style.set_property("left", &px(v));
                }
                (Property::Top, Value::Scalar(v)) => {
                    _ = style.set_property("top", &px(v));
                }
                (Property::Blur, Value::Scalar(v)) => {
                    _ = style.set_property("filter", &format!("blur({})", px(v)));
                }
                (Property::DashOffset, Value::Scalar(v)) => {
                    _ = style.set_property("stroke-dashoffset", &format!("{v:.2}"));
                }
                (Property::DashArray, Value::Scalar(v)) => {
                    _ = style.set_property("stroke-dasharray", &format!("{v:.2}"));
                }
                (Property::Fill, Value::Color(c)) => {
                    _ = style.set_property("fill", &c.to_css());
                }
                (Property::BorderColor, Value::Color(c)) => {
                    _ = style.set_property("border-color", &c.to_css());
                }
                (Property::Glow, Value::Scalar(v)) => {
                    _ = style.set_property("box-shadow", &glow_shadow(v));
                }
                (p, v) => log::debug!("[dom] ignoring {p:?} = {v:?}"),
            }
        }
        if transformed {
            _ = style.set_property("transform", &entry.transform.to_css());
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(e) = self.entry(node) {
            e.el.set_text_content(Some(text));
        }
    }

    fn pin_fixed(&mut self, node: NodeId, at: Vec2) {
        let Some(style) = self.entry(node).and_then(|e| style_of(&e.el)) else {
            return;
        };
        _ = style.set_property("position", "fixed");
        _ = style.set_property("left", &px(at.x));
        _ = style.set_property("top", &px(at.y));
        _ = style.set_property("margin", "0");
        _ = style.set_property("z-index", ESCAPED_Z_INDEX);
    }

    fn split_chars(&mut self, node: NodeId) -> Vec<NodeId> {
        let Some(el) = self.element(node).cloned() else {
            return Vec::new();
        };
        let text = el.text_content().unwrap_or_default();
        el.set_text_content(None);

        let mut chars = Vec::new();
        for (i, word) in text.split_whitespace().enumerate() {
            if i > 0 {
                let space = self.document.create_text_node(" ");
                _ = el.append_child(&space);
            }
            let Some(word_el) = self.create_span("word", "") else {
                continue;
            };
            if let Some(style) = style_of(&word_el) {
                _ = style.set_property("white-space", "nowrap");
            }
            for c in word.chars() {
                let Some(char_el) = self.create_span("char", &c.to_string()) else {
                    continue;
                };
                _ = word_el.append_child(&char_el);
                chars.push(self.register(char_el, NodeKind::Element));
            }
            _ = el.append_child(&word_el);
        }
        if let Some(e) = self.entry_mut(node) {
            e.original_text = Some(text);
            e.split = chars.clone();
        }
        chars
    }

    fn restore_text(&mut self, node: NodeId) {
        let Some((text, split)) = self
            .entry_mut(node)
            .map(|e| (e.original_text.take(), std::mem::take(&mut e.split)))
        else {
            return;
        };
        for c in split {
            self.forget(c);
        }
        if let (Some(text), Some(el)) = (text, self.element(node)) {
            el.set_text_content(Some(&text));
        }
    }

    fn spawn_particle(&mut self, parent: NodeId, style: &ParticleStyle) -> Option<NodeId> {
        let parent_el = self.element(parent)?.clone();
        let color = style.color.to_css();
        let (el, kind) = match style.shape {
            ParticleShape::Circle { radius } => {
                let el = self.document.create_element_ns(Some(SVG_NS), "circle").ok()?;
                _ = el.set_attribute("r", &format!("{radius:.2}"));
                _ = el.set_attribute("fill", &color);
                _ = el.set_attribute("opacity", "0");
                (el, NodeKind::Circle)
            }
            ParticleShape::Dot {
                size,
                left_pct,
                top_pct,
            } => {
                let el = self.document.create_element("div").ok()?;
                let s = style_of(&el)?;
                for (k, v) in [
                    ("position", "absolute".to_string()),
                    ("border-radius", "50%".to_string()),
                    ("width", px(size)),
                    ("height", px(size)),
                    ("background", color.clone()),
                    ("box-shadow", format!("0 0 {} {color}", px(size * 3.0))),
                    ("left", format!("{left_pct}%")),
                    ("top", format!("{top_pct}%")),
                    ("opacity", "0".to_string()),
                    ("pointer-events", "none".to_string()),
                ] {
                    _ = s.set_property(k, &v);
                }
                (el, NodeKind::Element)
            }
        };
        parent_el.append_child(&el).ok()?;
        Some(self.register(el, kind))
    }

    fn remove(&mut self, node: NodeId) {
        if let Some(entry) = self.forget(node) {
            entry.el.remove();
        }
    }

    fn vibrate(&mut self, millis: u32) -> bool {
        web::window()
            .map(|w| w.navigator().vibrate_with_duration(millis))
            .unwrap_or(false)
    }

    fn confetti(&mut self, burst: &ConfettiBurst) {
        self.bursts.push(burst.clone());
    }
}
