//! Closed cubic Bézier outline with arc-length lookup.

use glam::Vec2;

const SAMPLES_PER_SEGMENT: usize = 48;

/// Heart outline in a 300x280 view box, starting at the top notch and
/// running counter-clockwise: left lobe, tip, right lobe.
pub const HEART_START: [f32; 2] = [150.0, 50.0];
pub const HEART_SEGMENTS: [[[f32; 2]; 3]; 6] = [
    [[150.0, 50.0], [130.0, 15.0], [90.0, 15.0]],
    [[42.0, 15.0], [10.0, 55.0], [10.0, 95.0]],
    [[10.0, 168.0], [150.0, 262.0], [150.0, 262.0]],
    [[150.0, 262.0], [290.0, 168.0], [290.0, 95.0]],
    [[290.0, 55.0], [258.0, 15.0], [210.0, 15.0]],
    [[170.0, 15.0], [150.0, 50.0], [150.0, 50.0]],
];

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cubic {
    p0: Vec2,
    p1: Vec2,
    p2: Vec2,
    p3: Vec2,
}

impl Cubic {
    fn eval(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        self.p0 * (u * u * u)
            + self.p1 * (3.0 * u * u * t)
            + self.p2 * (3.0 * u * t * t)
            + self.p3 * (t * t * t)
    }
}

#[derive(Clone, Debug)]
pub struct CubicPath {
    segments: Vec<Cubic>,
    // (cumulative length, segment index, segment t)
    table: Vec<(f32, usize, f32)>,
}

impl CubicPath {
    pub fn new(start: Vec2, segments: &[[[f32; 2]; 3]]) -> Self {
        let mut cubics = Vec::with_capacity(segments.len());
        let mut cursor = start;
        for [c1, c2, end] in segments {
            let end = Vec2::from(*end);
            cubics.push(Cubic {
                p0: cursor,
                p1: Vec2::from(*c1),
                p2: Vec2::from(*c2),
                p3: end,
            });
            cursor = end;
        }

        let mut table = Vec::with_capacity(cubics.len() * SAMPLES_PER_SEGMENT + 1);
        table.push((0.0, 0, 0.0));
        let mut total = 0.0;
        for (si, c) in cubics.iter().enumerate() {
            let mut prev = c.p0;
            for k in 1..=SAMPLES_PER_SEGMENT {
                let t = k as f32 / SAMPLES_PER_SEGMENT as f32;
                let p = c.eval(t);
                total += p.distance(prev);
                table.push((total, si, t));
                prev = p;
            }
        }
        Self {
            segments: cubics,
            table,
        }
    }

    pub fn heart() -> Self {
        Self::new(Vec2::from(HEART_START), &HEART_SEGMENTS)
    }

    pub fn total_length(&self) -> f32 {
        self.table.last().map(|e| e.0).unwrap_or(0.0)
    }

    /// Point at arc length `len` from the start; clamps to the path ends.
    pub fn point_at_length(&self, len: f32) -> Vec2 {
        let Some(first) = self.segments.first() else {
            return Vec2::ZERO;
        };
        if !(len > 0.0) {
            return first.p0;
        }
        let idx = self.table.partition_point(|e| e.0 < len);
        if idx >= self.table.len() {
            return self.segments.last().map(|c| c.p3).unwrap_or(first.p0);
        }
        let (l1, s1, t1) = self.table[idx];
        let (l0, s0, t0) = self.table[idx - 1];
        // Entry 0 is the path start; the first sample of each segment follows its predecessor.
        let t0 = if s0 != s1 { 0.0 } else { t0 };
        let span = (l1 - l0).max(f32::EPSILON);
        let k = ((len - l0) / span).clamp(0.0, 1.0);
        self.segments[s1].eval(t0 + (t1 - t0) * k)
    }

    /// Point at fraction `f` of the total length.
    pub fn point_at_fraction(&self, f: f32) -> Vec2 {
        self.point_at_length(f.clamp(0.0, 1.0) * self.total_length())
    }
}
