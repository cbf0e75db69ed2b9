//! Scene logic for the scroll-driven valentine page.
//!
//! Everything here is platform-neutral: scenes talk to the page through the
//! [`SceneHost`] trait, time arrives as plain seconds, and randomness comes
//! from injected generators. The WASM front-end supplies a DOM host and a
//! frame loop; [`RetainedScene`] stands in for it headless.

pub mod animator;
pub mod celebration;
pub mod confetti;
pub mod constants;
pub mod ease;
pub mod error;
pub mod evasive;
pub mod gallery;
pub mod host;
pub mod page;
pub mod particles;
pub mod path;
pub mod props;
pub mod retained;
pub mod scenes;
pub mod sequencer;
pub mod signal;
pub mod snap;
pub mod timeline;
pub mod timers;

pub use animator::{Animator, TweenSpec};
pub use celebration::{AcceptanceFlag, AcceptanceWatch, Celebration, CelebrationNodes, CelebrationParams};
pub use confetti::{ConfettiBurst, ConfettiField};
pub use ease::Ease;
pub use error::{SceneError, SceneResult};
pub use evasive::{EvasiveParams, EvasiveState, EvasiveTarget, Phase, Proximity, TriggerResponse};
pub use gallery::{GalleryTrack, Photo, PHOTOS};
pub use host::{NodeId, Rect, SceneHost, SharedHost, Viewport};
pub use page::{PageLayout, ScrollTrack, SectionSpan};
pub use props::{Property, PropertySet, Rgba, Value};
pub use retained::RetainedScene;
pub use sequencer::{Scene, SceneHandle, Sequencer};
pub use signal::ProgressSignal;
pub use snap::SnapPolicy;
pub use timeline::{Stagger, Timeline};
pub use timers::TimerQueue;
