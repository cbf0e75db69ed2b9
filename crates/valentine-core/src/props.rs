use crate::ease::lerp;
use smallvec::SmallVec;

/// Visual properties a scene can drive on an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    Opacity,
    /// Opacity that also toggles visibility off at zero.
    AutoAlpha,
    Visible,
    Scale,
    X,
    Y,
    /// Fixed-position coordinates (viewport space).
    Left,
    Top,
    RotateX,
    Blur,
    DashOffset,
    DashArray,
    Fill,
    BorderColor,
    Glow,
}

impl Property {
    /// Value assumed for an element no timeline or tween has touched yet.
    pub fn neutral(self) -> Value {
        match self {
            Property::Opacity | Property::AutoAlpha | Property::Visible | Property::Scale => {
                Value::Scalar(1.0)
            }
            Property::Fill | Property::BorderColor => Value::Color(Rgba::default()),
            _ => Value::Scalar(0.0),
        }
    }
}

/// Straight (non-premultiplied) RGBA, channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgb8(rgb: [u8; 3], a: f32) -> Self {
        Self {
            r: rgb[0] as f32 / 255.0,
            g: rgb[1] as f32 / 255.0,
            b: rgb[2] as f32 / 255.0,
            a,
        }
    }

    /// Build from HSL with hue in degrees and saturation/lightness in percent.
    pub fn from_hsl(hue: f32, sat_pct: f32, light_pct: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 360.0;
        let s = (sat_pct / 100.0).clamp(0.0, 1.0);
        let l = (light_pct / 100.0).clamp(0.0, 1.0);
        if s == 0.0 {
            return Self::new(l, l, l, 1.0);
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self::new(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
            1.0,
        )
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        Rgba {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
            a: lerp(self.a, other.a, t),
        }
    }

    /// CSS `rgba(...)` string with 8-bit channels.
    pub fn to_css(self) -> String {
        format!(
            "rgba({},{},{},{:.3})",
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            self.a.clamp(0.0, 1.0)
        )
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Scalar(f32),
    Color(Rgba),
}

impl Value {
    pub fn scalar(self) -> Option<f32> {
        match self {
            Value::Scalar(v) => Some(v),
            Value::Color(_) => None,
        }
    }

    pub fn color(self) -> Option<Rgba> {
        match self {
            Value::Color(c) => Some(c),
            Value::Scalar(_) => None,
        }
    }

    /// Interpolate towards `to`. Mismatched kinds jump at the midpoint.
    pub fn lerp(self, to: Value, t: f32) -> Value {
        match (self, to) {
            (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(lerp(a, b, t)),
            (Value::Color(a), Value::Color(b)) => Value::Color(a.lerp(b, t)),
            (from, to) => {
                if t < 0.5 {
                    from
                } else {
                    to
                }
            }
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Scalar(v)
    }
}

impl From<Rgba> for Value {
    fn from(c: Rgba) -> Self {
        Value::Color(c)
    }
}

/// Small ordered set of property values; later writes of the same property win.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertySet {
    entries: SmallVec<[(Property, Value); 4]>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, prop: Property, value: impl Into<Value>) -> Self {
        self.insert(prop, value);
        self
    }

    pub fn insert(&mut self, prop: Property, value: impl Into<Value>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == prop) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((prop, value)),
        }
    }

    pub fn get(&self, prop: Property) -> Option<Value> {
        self.entries
            .iter()
            .find(|(p, _)| *p == prop)
            .map(|(_, v)| *v)
    }

    pub fn scalar(&self, prop: Property) -> Option<f32> {
        self.get(prop).and_then(Value::scalar)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, Value)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Property, Value)> for PropertySet {
    fn from_iter<I: IntoIterator<Item = (Property, Value)>>(iter: I) -> Self {
        let mut set = PropertySet::new();
        for (p, v) in iter {
            set.insert(p, v);
        }
        set
    }
}
