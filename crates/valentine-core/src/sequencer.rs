//! Binds a scene's timeline to a progress signal for the scene's lifetime.

use crate::error::SceneResult;
use crate::host::{SceneHost, SharedHost, Viewport};
use crate::signal::{ListenerId, ProgressSignal};
use crate::snap::SnapPolicy;
use crate::timeline::{group_by_node, Timeline};
use std::cell::RefCell;
use std::rc::Rc;

/// A scroll-driven section of the page.
pub trait Scene {
    fn name(&self) -> &'static str;

    /// Resolve elements and synthesize particles. Must fail before creating
    /// anything if a required element is missing.
    fn mount(&mut self, host: &mut dyn SceneHost) -> SceneResult<()>;

    /// Choreography for the current layout.
    fn timeline(&self, viewport: Viewport) -> Timeline;

    /// Scroll distance the section stays pinned for.
    fn pin_length(&self, viewport: Viewport) -> f32;

    fn scrub_tau(&self) -> f32 {
        0.0
    }

    fn snap(&self) -> Option<SnapPolicy> {
        None
    }

    /// Per-progress work the timeline can't express.
    fn on_progress(&mut self, _progress: f32, _host: &mut dyn SceneHost) {}

    /// Wall-clock animation, called once per frame.
    fn tick(&mut self, _now: f64, _host: &mut dyn SceneHost) {}

    /// Re-measure layout.
    fn resize(&mut self, _host: &mut dyn SceneHost) {}

    /// Remove everything `mount` created and restore split text.
    fn teardown(&mut self, host: &mut dyn SceneHost);
}

struct Runtime {
    scene: Box<dyn Scene>,
    timeline: Timeline,
    progress: f32,
}

impl Runtime {
    fn apply(&mut self, progress: f32, host: &mut dyn SceneHost) {
        self.progress = progress;
        for (node, props) in group_by_node(&self.timeline.sample(progress)) {
            host.apply(node, &props);
        }
        self.scene.on_progress(progress, host);
    }
}

/// Handle to a mounted scene. Dropping it tears the scene down.
pub struct SceneHandle {
    name: &'static str,
    runtime: Rc<RefCell<Runtime>>,
    host: SharedHost,
    signal: ProgressSignal,
    listener: Option<ListenerId>,
}

pub struct Sequencer;

impl Sequencer {
    /// Mount `scene`, apply the signal's current progress and follow every
    /// later emission until the handle is torn down.
    pub fn mount(
        mut scene: Box<dyn Scene>,
        signal: &ProgressSignal,
        host: SharedHost,
    ) -> SceneResult<SceneHandle> {
        let name = scene.name();
        let timeline = {
            let mut h = host.borrow_mut();
            scene.mount(&mut *h)?;
            scene.timeline(h.viewport())
        };
        let runtime = Rc::new(RefCell::new(Runtime {
            scene,
            timeline,
            progress: 0.0,
        }));
        runtime
            .borrow_mut()
            .apply(signal.value(), &mut *host.borrow_mut());

        let (rt, h) = (runtime.clone(), host.clone());
        let listener = signal.subscribe(move |p| {
            let Ok(mut rt) = rt.try_borrow_mut() else {
                log::warn!("[sequencer] {name}: progress dropped, scene busy");
                return;
            };
            let Ok(mut h) = h.try_borrow_mut() else {
                log::warn!("[sequencer] {name}: progress dropped, host busy");
                return;
            };
            rt.apply(p, &mut *h);
        });
        log::info!("[sequencer] mounted {name}");

        Ok(SceneHandle {
            name,
            runtime,
            host,
            signal: signal.clone(),
            listener: Some(listener),
        })
    }
}

impl SceneHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    /// Last applied progress.
    pub fn progress(&self) -> f32 {
        self.runtime.borrow().progress
    }

    pub fn pin_length(&self) -> f32 {
        let viewport = self.host.borrow().viewport();
        self.runtime.borrow().scene.pin_length(viewport)
    }

    pub fn scrub_tau(&self) -> f32 {
        self.runtime.borrow().scene.scrub_tau()
    }

    pub fn snap(&self) -> Option<SnapPolicy> {
        self.runtime.borrow().scene.snap()
    }

    pub fn tick(&self, now: f64) {
        if !self.is_mounted() {
            return;
        }
        let mut rt = self.runtime.borrow_mut();
        rt.scene.tick(now, &mut *self.host.borrow_mut());
    }

    /// Re-measure, rebuild the timeline from the new layout and re-apply the
    /// current progress.
    pub fn resize(&self) {
        if !self.is_mounted() {
            return;
        }
        let mut rt = self.runtime.borrow_mut();
        let mut host = self.host.borrow_mut();
        rt.scene.resize(&mut *host);
        let timeline = rt.scene.timeline(host.viewport());
        rt.timeline = timeline;
        let p = rt.progress;
        rt.apply(p, &mut *host);
    }

    /// Unsubscribe and remove everything the scene created. Idempotent.
    pub fn teardown(&mut self) {
        let Some(id) = self.listener.take() else {
            return;
        };
        self.signal.unsubscribe(id);
        let mut rt = self.runtime.borrow_mut();
        rt.scene.teardown(&mut *self.host.borrow_mut());
        log::info!("[sequencer] unmounted {}", self.name);
    }
}

impl Drop for SceneHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for SceneHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneHandle")
            .field("name", &self.name)
            .field("mounted", &self.is_mounted())
            .finish()
    }
}
