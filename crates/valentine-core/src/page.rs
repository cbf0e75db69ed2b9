//! Scroll tracking for pinned sections.
//!
//! The document scroll offset is turned into one raw progress value per
//! section. Each [`ScrollTrack`] smooths it (scrub), settles it after a
//! gesture (snap), and publishes the result on its [`ProgressSignal`].

use crate::signal::ProgressSignal;
use crate::snap::{SnapMotion, SnapPolicy};

/// Scroll range over which a section is pinned, in document pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SectionSpan {
    pub start: f32,
    pub length: f32,
}

impl SectionSpan {
    pub fn new(start: f32, length: f32) -> Self {
        Self { start, length }
    }

    pub fn progress_at(&self, scroll_y: f32) -> f32 {
        if self.length <= 0.0 {
            return if scroll_y >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll_y - self.start) / self.length).clamp(0.0, 1.0)
    }

    pub fn scroll_for(&self, progress: f32) -> f32 {
        self.start + progress.clamp(0.0, 1.0) * self.length.max(0.0)
    }

    pub fn contains(&self, scroll_y: f32) -> bool {
        scroll_y >= self.start && scroll_y <= self.start + self.length
    }
}

#[derive(Debug)]
pub struct ScrollTrack {
    pub name: &'static str,
    span: SectionSpan,
    raw: f32,
    applied: f32,
    scrub_tau: f32,
    snap: Option<SnapPolicy>,
    snapping: Option<SnapMotion>,
    last_tick: Option<f64>,
    last_emitted: Option<f32>,
    signal: ProgressSignal,
}

impl ScrollTrack {
    /// `scrub_tau` is the smoothing time constant in seconds; zero applies scroll directly.
    pub fn new(name: &'static str, scrub_tau: f32, snap: Option<SnapPolicy>) -> Self {
        Self {
            name,
            span: SectionSpan::default(),
            raw: 0.0,
            applied: 0.0,
            scrub_tau: scrub_tau.max(0.0),
            snap,
            snapping: None,
            last_tick: None,
            last_emitted: None,
            signal: ProgressSignal::new(),
        }
    }

    pub fn signal(&self) -> &ProgressSignal {
        &self.signal
    }

    pub fn span(&self) -> SectionSpan {
        self.span
    }

    pub fn set_span(&mut self, span: SectionSpan) {
        self.span = span;
    }

    pub fn raw_progress(&self) -> f32 {
        self.raw
    }

    pub fn applied_progress(&self) -> f32 {
        self.applied
    }

    pub fn is_snapping(&self) -> bool {
        self.snapping.is_some()
    }

    /// Record the document scroll offset. Does not by itself cancel a snap:
    /// the snap drives the scroll offset too.
    pub fn on_scroll(&mut self, scroll_y: f32) {
        self.raw = self.span.progress_at(scroll_y);
    }

    /// Wheel, touch or key input from the user: any running snap stops now.
    pub fn on_user_input(&mut self) {
        if self.snapping.take().is_some() {
            log::debug!("[page] {} snap cancelled by user input", self.name);
        }
    }

    /// Gesture ended. Starts a snap when the policy asks for one.
    pub fn on_release(&mut self, now: f64) {
        let Some(policy) = self.snap else {
            return;
        };
        if self.raw <= 0.0 || self.raw >= 1.0 {
            return;
        }
        self.snapping = SnapMotion::begin(&policy, self.raw, now);
    }

    /// Advance scrub and snap. Returns the document scroll offset the host
    /// should scroll to while a snap is running.
    pub fn tick(&mut self, now: f64) -> Option<f32> {
        let dt = self
            .last_tick
            .map(|t| (now - t).max(0.0) as f32)
            .unwrap_or(0.0);
        self.last_tick = Some(now);

        let mut scroll_to = None;
        if let Some(snap) = self.snapping {
            self.raw = snap.progress_at(now);
            scroll_to = Some(self.span.scroll_for(self.raw));
            if snap.is_done(now) {
                self.snapping = None;
            }
        }

        if self.scrub_tau <= 0.0 || self.last_emitted.is_none() {
            self.applied = self.raw;
        } else {
            let alpha = 1.0 - (-dt / self.scrub_tau).exp();
            self.applied += (self.raw - self.applied) * alpha;
            if (self.raw - self.applied).abs() < 1e-4 {
                self.applied = self.raw;
            }
        }

        if self.last_emitted != Some(self.applied) {
            self.last_emitted = Some(self.applied);
            self.signal.emit(self.applied);
        }
        scroll_to
    }
}

/// All pinned sections of the page, in document order.
#[derive(Debug, Default)]
pub struct PageLayout {
    tracks: Vec<ScrollTrack>,
}

impl PageLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, track: ScrollTrack) -> &ProgressSignal {
        self.tracks.push(track);
        let last = self.tracks.len() - 1;
        self.tracks[last].signal()
    }

    pub fn track(&self, name: &str) -> Option<&ScrollTrack> {
        self.tracks.iter().find(|t| t.name == name)
    }

    pub fn track_mut(&mut self, name: &str) -> Option<&mut ScrollTrack> {
        self.tracks.iter_mut().find(|t| t.name == name)
    }

    pub fn tracks(&self) -> &[ScrollTrack] {
        &self.tracks
    }

    pub fn on_scroll(&mut self, scroll_y: f32) {
        for t in &mut self.tracks {
            t.on_scroll(scroll_y);
        }
    }

    pub fn on_user_input(&mut self) {
        for t in &mut self.tracks {
            t.on_user_input();
        }
    }

    /// Only the section currently pinned at `scroll_y` may snap.
    pub fn on_release(&mut self, scroll_y: f32, now: f64) {
        for t in &mut self.tracks {
            if t.span().contains(scroll_y) {
                t.on_release(now);
            }
        }
    }

    pub fn tick(&mut self, now: f64) -> Option<f32> {
        let mut scroll_to = None;
        for t in &mut self.tracks {
            if let Some(y) = t.tick(now) {
                scroll_to.get_or_insert(y);
            }
        }
        scroll_to
    }
}
