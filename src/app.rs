use crate::dom::{self, DomHost};
use crate::render::ConfettiCanvas;
use instant::Instant;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;
use valentine_core::celebration::CelebrationParams;
use valentine_core::confetti::ConfettiField;
use valentine_core::evasive::{EvasiveParams, Proximity, TriggerResponse};
use valentine_core::host::{SceneHost, SharedHost};
use valentine_core::page::{PageLayout, ScrollTrack, SectionSpan};
use valentine_core::scenes::{ids, GalleryScene, HeartScene, IntroScene, PromptScene};
use valentine_core::sequencer::{Scene, SceneHandle, Sequencer};
use web_sys as web;

struct Section {
    id: &'static str,
    handle: SceneHandle,
}

/// Everything the page runs: pinned scenes, their scroll tracks, the prompt
/// and the confetti overlay.
pub struct App {
    host: Rc<RefCell<DomHost>>,
    layout: PageLayout,
    sections: Vec<Section>,
    prompt: Option<PromptScene>,
    confetti: ConfettiField,
    canvas: Option<ConfettiCanvas>,
    rng: StdRng,
    clock: Instant,
    release_at: Option<f64>,
}

impl App {
    pub fn new(document: web::Document, canvas: Option<ConfettiCanvas>) -> Self {
        let host = Rc::new(RefCell::new(DomHost::new(document)));
        let mut app = Self {
            host,
            layout: PageLayout::new(),
            sections: Vec::new(),
            prompt: None,
            confetti: ConfettiField::new(),
            canvas,
            rng: StdRng::from_entropy(),
            clock: Instant::now(),
            release_at: None,
        };
        app.mount_section(ids::INTRO_SECTION, Box::new(IntroScene::default()));
        app.mount_section(ids::HEART_SECTION, Box::new(HeartScene::new()));
        app.mount_section(ids::GALLERY_SECTION, Box::new(GalleryScene::new()));
        app.mount_prompt();
        app.relayout();
        app.layout.on_scroll(dom::scroll_y());
        app
    }

    fn mount_section(&mut self, id: &'static str, scene: Box<dyn Scene>) {
        let track = ScrollTrack::new(scene.name(), scene.scrub_tau(), scene.snap());
        let shared: SharedHost = self.host.clone();
        match Sequencer::mount(scene, track.signal(), shared) {
            Ok(handle) => {
                self.layout.push(track);
                self.sections.push(Section { id, handle });
            }
            Err(e) => log::error!("[scene] {e}; section left static"),
        }
    }

    fn mount_prompt(&mut self) {
        let seed = StdRng::seed_from_u64(self.rng.gen());
        let mut host = self.host.borrow_mut();
        match PromptScene::mount(
            &mut *host,
            EvasiveParams::default(),
            CelebrationParams::default(),
            seed,
        ) {
            Ok(p) => self.prompt = Some(p),
            Err(e) => log::error!("[scene] {e}; prompt left static"),
        }
    }

    pub fn now(&self) -> f64 {
        self.clock.elapsed().as_secs_f64()
    }

    /// Size each section's pin spacer and derive its scroll span. Spans are
    /// measured after all spacers are sized, since each shifts the next.
    fn relayout(&mut self) {
        let viewport = self.host.borrow().viewport();
        let mut pinned = Vec::with_capacity(self.sections.len());
        for s in &self.sections {
            let Some(section) = self.section_element(s.id) else {
                continue;
            };
            let Some(spacer) = section.parent_element() else {
                continue;
            };
            let length = s.handle.pin_length();
            if let Some(style) = dom::style_of(&section) {
                _ = style.set_property("position", "sticky");
                _ = style.set_property("top", "0");
            }
            if let Some(style) = dom::style_of(&spacer) {
                let h = format!("{:.0}px", viewport.height + length);
                _ = style.set_property("height", &h);
            }
            pinned.push((s.handle.name(), spacer, length));
        }
        let scroll = dom::scroll_y();
        for (name, spacer, length) in pinned {
            let start = spacer.get_bounding_client_rect().top() as f32 + scroll;
            if let Some(track) = self.layout.track_mut(name) {
                track.set_span(SectionSpan::new(start, length));
            }
            log::debug!("[page] {name} pinned at {start:.0} for {length:.0}px");
        }
    }

    fn section_element(&self, id: &str) -> Option<web::Element> {
        self.host.borrow().document().get_element_by_id(id)
    }

    pub fn on_scroll(&mut self) {
        self.layout.on_scroll(dom::scroll_y());
    }

    pub fn on_user_input(&mut self) {
        self.release_at = None;
        self.layout.on_user_input();
    }

    /// Gesture ended, now or after `delay` seconds of quiet.
    pub fn on_release(&mut self, delay: f64) {
        self.release_at = Some(self.now() + delay);
    }

    pub fn on_resize(&mut self) {
        for s in &self.sections {
            s.handle.resize();
        }
        self.relayout();
        if let Some(c) = &self.canvas {
            c.resize();
        }
        self.layout.on_scroll(dom::scroll_y());
    }

    pub fn on_proximity(&mut self, trigger: Proximity) -> TriggerResponse {
        let now = self.now();
        let Some(prompt) = self.prompt.as_mut() else {
            return TriggerResponse::default();
        };
        prompt.on_proximity(trigger, now, &mut *self.host.borrow_mut())
    }

    pub fn on_accept(&mut self) {
        let now = self.now();
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.on_accept(now, &mut *self.host.borrow_mut());
        }
    }

    pub fn frame(&mut self, dt_sec: f32) {
        let now = self.now();
        if self.release_at.is_some_and(|t| now >= t) {
            self.release_at = None;
            self.layout.on_release(dom::scroll_y(), now);
        }
        // Emits progress, which re-borrows the host: no host borrow held here.
        if let Some(y) = self.layout.tick(now) {
            if let Some(w) = web::window() {
                w.scroll_to_with_x_and_y(0.0, y as f64);
            }
        }
        for s in &self.sections {
            s.handle.tick(now);
        }

        let (bursts, viewport) = {
            let mut host = self.host.borrow_mut();
            if let Some(prompt) = self.prompt.as_mut() {
                prompt.tick(now, &mut *host);
            }
            (host.take_bursts(), host.viewport())
        };
        for burst in &bursts {
            self.confetti.emit(burst, viewport, &mut self.rng);
        }
        self.confetti.step(dt_sec);
        if let Some(c) = &self.canvas {
            c.draw(&self.confetti);
        }
    }
}
