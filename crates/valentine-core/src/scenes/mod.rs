//! The page's four sections, top to bottom.

pub mod gallery;
pub mod heart;
pub mod intro;
pub mod question;

pub use gallery::GalleryScene;
pub use heart::HeartScene;
pub use intro::IntroScene;
pub use question::PromptScene;

use crate::error::{SceneError, SceneResult};
use crate::host::{NodeId, SceneHost};

/// Element ids the page markup must provide.
pub mod ids {
    pub const INTRO_SECTION: &str = "intro";
    pub const INTRO_TITLE: &str = "intro-title";
    pub const INTRO_REVEAL: &str = "intro-reveal";
    pub const INTRO_REVEAL_TEXT: &str = "intro-reveal-text";
    pub const INTRO_GLOW: &str = "intro-glow";
    pub const INTRO_FLASH: &str = "intro-flash";
    pub const INTRO_PARTICLES: &str = "intro-particles";
    pub const INTRO_SCROLL_HINT: &str = "intro-scroll-hint";
    pub const STARFIELD: &str = "starfield";

    pub const HEART_SECTION: &str = "heart";
    pub const HEART_SVG: &str = "heart-svg";
    pub const HEART_PATH: &str = "heart-path";
    pub const HEART_GLOW_PATH: &str = "heart-glow-path";

    pub const GALLERY_SECTION: &str = "gallery";
    pub const GALLERY_TRACK: &str = "gallery-track";
    pub const GALLERY_CARD_CLASS: &str = "photo-card";
    pub const GALLERY_FRAME_CLASS: &str = "photo-frame";
    pub const GALLERY_CAPTION_CLASS: &str = "photo-caption";
    pub const GALLERY_ORB_CLASS: &str = "deco-orb";

    pub const PROMPT_SECTION: &str = "prompt";
    pub const PROMPT_QUESTION: &str = "prompt-question";
    pub const PROMPT_ACCEPT: &str = "prompt-accept";
    pub const PROMPT_DECLINE: &str = "prompt-decline";
    pub const PROMPT_MESSAGE: &str = "prompt-message";
}

fn require(host: &mut dyn SceneHost, scene: &'static str, id: &str) -> SceneResult<NodeId> {
    host.resolve(id).ok_or_else(|| SceneError::missing(scene, id))
}
