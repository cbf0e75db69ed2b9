//! Post-gesture smoothing of a pinned section's progress.

use crate::constants::{SNAP_DEFAULT_DISTANCE, SNAP_MAX_SEC, SNAP_MIN_SEC};
use crate::ease::{lerp, Ease};

/// Settle progress onto 0 or 1 once the user lets go.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapPolicy {
    /// Snap only when progress is at most this far from a boundary.
    pub distance: f32,
    pub min_duration: f32,
    pub max_duration: f32,
    pub ease: Ease,
}

impl Default for SnapPolicy {
    fn default() -> Self {
        Self {
            distance: SNAP_DEFAULT_DISTANCE,
            min_duration: SNAP_MIN_SEC,
            max_duration: SNAP_MAX_SEC,
            ease: Ease::Power2InOut,
        }
    }
}

impl SnapPolicy {
    /// Boundary to settle on from `progress`, or `None` if nothing to do.
    pub fn target(&self, progress: f32) -> Option<f32> {
        let nearer = if progress < 0.5 { 0.0 } else { 1.0 };
        let gap = (progress - nearer).abs();
        (gap > 1e-4 && gap <= self.distance).then_some(nearer)
    }

    /// Snap duration grows with distance travelled, bounded by `[min, max]`.
    pub fn duration_for(&self, gap: f32) -> f32 {
        let full = (gap.abs() / 0.5).clamp(0.0, 1.0);
        lerp(self.min_duration, self.max_duration, full)
    }
}

/// An in-flight snap from one progress value to a boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapMotion {
    pub from: f32,
    pub to: f32,
    pub start: f64,
    pub duration: f32,
    pub ease: Ease,
}

impl SnapMotion {
    pub fn begin(policy: &SnapPolicy, from: f32, now: f64) -> Option<Self> {
        let to = policy.target(from)?;
        Some(Self {
            from,
            to,
            start: now,
            duration: policy.duration_for(to - from),
            ease: policy.ease,
        })
    }

    pub fn progress_at(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = ((now - self.start) as f32 / self.duration).clamp(0.0, 1.0);
        lerp(self.from, self.to, self.ease.apply(t))
    }

    pub fn is_done(&self, now: f64) -> bool {
        (now - self.start) as f32 >= self.duration
    }
}
