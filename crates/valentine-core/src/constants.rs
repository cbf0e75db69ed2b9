// Shared tuning constants used by the scenes and the web frontend.

// Scroll choreography
pub const PIN_LENGTH_VIEWPORTS: f32 = 1.5; // pinned scroll distance of text/heart scenes
pub const SCRUB_TAU_TEXT_SEC: f32 = 1.5;
pub const SCRUB_TAU_GALLERY_SEC: f32 = 1.0;
pub const SNAP_MIN_SEC: f32 = 0.3;
pub const SNAP_MAX_SEC: f32 = 0.8;
pub const SNAP_DEFAULT_DISTANCE: f32 = 0.5; // 0.5 == always settle on the nearer boundary

// Heart scene
pub const HEART_PARTICLE_COUNT: usize = 20;
pub const HEART_TRAIL_STEP: f32 = 0.008;
pub const HEART_SETTLE_EPSILON: f32 = 0.99;
pub const HEART_DRAW_END: f32 = 0.9; // stroke drawn over [0, 0.9] of the timeline
pub const HEART_FILL_ALPHA: f32 = 0.06;
pub const HEARTBEAT_REPEAT_DELAY_SEC: f32 = 0.5;

// Intro scene
pub const INTRO_PARTICLE_COUNT: usize = 60;
pub const INTRO_BURST_SEED: u64 = 0x5EED_0214;
pub const STAR_COUNT: usize = 100;

// Prompt scene
pub const ESCAPE_PADDING_PX: f32 = 24.0;
pub const ESCAPE_MOVE_SEC: f32 = 0.4;
pub const ACCEPT_GROWTH_STEP: f32 = 0.1;
pub const MAX_ACCEPT_SCALE: f32 = 2.5; // growth clamp
pub const ACCEPT_GROW_SEC: f32 = 0.3;
pub const ACCEPT_GLOW_PERIOD_SEC: f32 = 1.5;
pub const HAPTIC_PULSE_MS: u32 = 50;

pub const DECLINE_LABELS: &[&str] = &[
    "No",
    "¿Segura?",
    "Piénsalo bien...",
    "¿De verdad?",
    "Imposible",
    "Jajaja no",
    "Nope",
    "Intenta otra vez",
    "No puedes",
    "Dale que sí",
];

// Celebration timings (seconds)
pub const BURST_SECONDARY_LEFT_SEC: f64 = 0.4;
pub const BURST_SECONDARY_RIGHT_SEC: f64 = 0.7;
pub const BURST_DRIZZLE_INTERVAL_SEC: f64 = 0.25;
pub const BURST_DRIZZLE_WINDOW_SEC: f64 = 3.0;
pub const MESSAGE_REVEAL_DELAY_SEC: f32 = 0.7;

// Celebration palette (purple/fuchsia + white)
pub const CONFETTI_COLORS: [[u8; 3]; 7] = [
    [0xa8, 0x55, 0xf7],
    [0xc0, 0x84, 0xfc],
    [0xe9, 0xd5, 0xff],
    [0x7c, 0x3a, 0xed],
    [0xf0, 0xab, 0xfc],
    [0xd9, 0x46, 0xef],
    [0xff, 0xff, 0xff],
];

// Gallery entrance thresholds, as fractions of the viewport width
pub const CARD_ENTER_START: f32 = 0.95;
pub const CARD_ENTER_END: f32 = 0.60;
pub const FRAME_GLOW_START: f32 = 0.85;
pub const FRAME_GLOW_END: f32 = 0.35;
pub const CAPTION_START: f32 = 0.75;
pub const CAPTION_END: f32 = 0.50;
pub const ORB_PARALLAX_BASE: f32 = 0.15;
pub const ORB_PARALLAX_STEP: f32 = 0.08;
