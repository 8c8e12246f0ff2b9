/// Effect tuning constants.
///
/// Speeds are in surface units per second and accelerations in units per
/// second squared. The pixel figures started life as per-frame values at
/// 60 fps and were multiplied out so motion no longer depends on frame rate.
// Reference frame rate used to convert per-frame tuning into per-second units
pub const REFERENCE_FPS: f32 = 60.0;

// Loop
pub const MAX_FRAME_DT_MS: f32 = 100.0; // clamp after tab switches / long stalls

// Confetti (canvas, pixel space)
pub const CONFETTI_CAPACITY: usize = 900;
pub const CONFETTI_GRAVITY: f32 = 1080.0; // 18 px/frame per second
pub const CONFETTI_AIR_DAMPING_PER_SEC: f32 = 0.941_7; // 0.999 per frame
pub const CONFETTI_EXIT_MARGIN: f32 = 60.0;
pub const CONFETTI_TTL_MS: (f32, f32) = (12_000.0, 16_000.0);
pub const CONFETTI_SPIN_MAX: f32 = 7.5; // rad/s, symmetric
pub const RECT_WIDTH: (f32, f32) = (4.0, 10.0);
pub const RECT_HEIGHT: (f32, f32) = (2.0, 6.0);
pub const RECT_DRAW_HEIGHT_FACTOR: f32 = 0.7;
pub const STREAMER_WIDTH: (f32, f32) = (6.0, 16.0);
pub const STREAMER_HEIGHT: (f32, f32) = (14.0, 36.0);

pub const CONFETTI_COLORS: &[&str] = &[
    "#fff", "#fde68a", "#fca5a5", "#93c5fd", "#86efac", "#f0abfc", "#fecaca",
];

// Floating emoji (DOM, pixel space)
pub const EMOJI_CAPACITY: usize = 240;
pub const EMOJI_TTL_MS: (f32, f32) = (900.0, 1500.0);
pub const EMOJI_WIND_MAX: f32 = 60.0;
pub const EMOJI_SCALE: (f32, f32) = (0.9, 1.3);
pub const EMOJI_WOBBLE_AMP: (f32, f32) = (2.0, 6.0);
pub const EMOJI_WOBBLE_RATE: f32 = 1000.0 / 220.0; // rad/s
pub const EMOJI_FONT_PX: &[f32] = &[16.0, 18.0, 22.0, 26.0, 30.0];
pub const EMOJI_JITTER: (f32, f32) = (22.0, 10.0);
pub const EMOJI_GLYPHS: &[&str] = &["💖", "💘", "💝", "💞", "💗", "🩷", "💕", "💓"];

// Heart bursts (DOM, pixel space)
pub const HEART_CAPACITY: usize = 160;
pub const HEART_TTL_MS: (f32, f32) = (1_100.0, 1_700.0);
pub const HEART_TILT_DEG: f32 = 12.0;
pub const HEART_JITTER: (f32, f32) = (18.0, 9.0);
pub const HEART_SIZE_PX: f32 = 18.0;
pub const HEART_DAMPING_PER_SEC: f32 = 0.6;

pub const HEART_COLORS: &[&str] = &["#ff9ec5", "#ffb3d1", "#ffc6dc", "#ffd7e7", "#ffa5c9"];

// Ambient backdrop (SVG, percent space)
pub const AMBIENT_EXTENT: f32 = 100.0;
pub const AMBIENT_CAPACITY: usize = 64;
pub const AMBIENT_HEARTS: usize = 18;
pub const AMBIENT_SPARKLES: usize = 16;
pub const AMBIENT_OPACITY: f32 = 0.18;
pub const AMBIENT_ACCENT_OPACITY: f32 = 0.22;
pub const AMBIENT_HEART_SCALE: (f32, f32) = (0.9, 1.6);
pub const AMBIENT_SPARKLE_SCALE: (f32, f32) = (0.7, 1.3);
pub const AMBIENT_SPEED: (f32, f32) = (4.0, 9.0); // percent per second, downward
pub const AMBIENT_SWAY_AMP: (f32, f32) = (1.2, 3.2);
pub const AMBIENT_SWAY_RATE: f32 = 1.0; // rad/s
pub const AMBIENT_TWINKLE_RATE: f32 = 1000.0 / 600.0; // rad/s
pub const AMBIENT_WRAP_TOP: f32 = -12.0;
pub const AMBIENT_WRAP_BOTTOM: f32 = 112.0;
pub const AMBIENT_X_RANGE: (f32, f32) = (6.0, 94.0);

// Floating glyph hearts (DOM, percent space)
pub const FLOATING_CAPACITY: usize = 96;
pub const FLOATING_COUNT: usize = 34;
pub const FLOATING_SPEED: (f32, f32) = (124.0 / 15.0, 124.0 / 9.0); // full band in 9..15 s, upward
pub const FLOATING_FONT_PX: [f32; 3] = [34.0, 26.0, 18.0]; // large, medium, small
pub const FLOATING_OPACITY: f32 = 0.85;
pub const FLOATING_SWAY_AMP: (f32, f32) = (1.0, 3.0);
pub const FLOATING_SWAY_RATE: f32 = 1.4; // rad/s
pub const FLOATING_WRAP_TOP: f32 = -12.0;
pub const FLOATING_WRAP_BOTTOM: f32 = 112.0;
pub const FLOATING_GLYPHS: &[&str] = &["💖", "💗", "💞", "🩷"];

// Fade envelope: share of the lifetime spent fading in and out
pub const FADE_EDGE: f32 = 0.2;
