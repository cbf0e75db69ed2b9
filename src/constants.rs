// Front-end tuning constants for the browser host.

// Overlay canvas for the confetti
pub const CONFETTI_CANVAS_ID: &str = "confetti-canvas";

// Clamp for a single frame's delta (seconds); tab switches produce huge gaps
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Wheel input has no end event; treat this much silence as a release (seconds)
pub const WHEEL_RELEASE_SEC: f64 = 0.15;

// Confetti piece size in CSS pixels
pub const CONFETTI_PIECE_W: f64 = 8.0;
pub const CONFETTI_PIECE_H: f64 = 5.0;

// Accept button glow, interpolated by the pulse strength
pub const ACCEPT_GLOW_MIN_PX: f32 = 20.0;
pub const ACCEPT_GLOW_MAX_PX: f32 = 50.0;

// Stacking order of the escaped decline button
pub const ESCAPED_Z_INDEX: &str = "50";

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
