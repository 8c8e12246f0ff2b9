//! Named effect sequences built from spawn requests.
//!
//! Cone angles use screen coordinates: 0° points right, 90° points down,
//! -90° points up. Confetti speeds are given per frame at 60 fps.

use crate::config::{AmbientConfig, FloatingHeartsConfig};
use crate::constants::{
    AMBIENT_SPEED, AMBIENT_X_RANGE, EMOJI_JITTER, FLOATING_SPEED, HEART_JITTER,
};
use crate::template::{HeartSize, Origin, SpawnRequest, Template};
use crate::timeline::Show;
use glam::Vec2;
use smallvec::{smallvec, SmallVec};

pub const DEFAULT_BURST_COUNT: usize = 240;
pub const DEFAULT_DRIZZLE_MS: f64 = 1200.0;
/// Longest drizzle a single trigger can ask for.
pub const MAX_DRIZZLE_MS: f64 = 60_000.0;
/// Name the celebratory opening is scheduled under.
pub const LAUNCH: &str = "launch";

const FIREWORK_SPOKES: usize = 8;
const FIREWORK_PER_SPOKE: usize = 30;
const CANNON_EVERY_MS: f64 = 90.0;
const CANNON_UNTIL_MS: f64 = 1500.0;
const MID_BURST_AT_MS: f64 = 500.0;
const LAUNCH_DRIZZLE_EVERY_MS: f64 = 140.0;
const LAUNCH_DRIZZLE_UNTIL_MS: f64 = 8000.0;
const LAUNCH_STOP_MS: f64 = 12_000.0;
const DRIZZLE_EVERY_MS: f64 = 130.0;
const DRIZZLE_TOP_Y: f32 = -20.0;

fn alternate(i: usize) -> Template {
    if i % 2 == 0 {
        Template::Streamer
    } else {
        Template::Rect
    }
}

fn drizzle_piece(i: usize, count: usize) -> SpawnRequest {
    SpawnRequest::new(Origin::TopEdge { y: DRIZZLE_TOP_Y }, alternate(i))
        .cone(100.0, 40.0)
        .speed_per_frame(6.0, 9.0)
        .count(count)
}

/// Eight spokes of confetti radiating from `origin`, `per_spoke` pieces each.
pub fn firework_spokes(origin: Origin, per_spoke: usize) -> SmallVec<[SpawnRequest; 8]> {
    (0..FIREWORK_SPOKES)
        .map(|k| {
            SpawnRequest::new(origin, alternate(k))
                .cone(k as f32 * 45.0, 18.0)
                .speed_per_frame(7.0, 11.0)
                .count(per_spoke)
        })
        .collect()
}

/// Single firework ring at a screen point.
pub fn firework(at: Vec2) -> Show {
    let mut show = Show::new("firework");
    for req in firework_spokes(Origin::At(at), FIREWORK_PER_SPOKE) {
        show.push_spawn(0.0, req);
    }
    show
}

/// Celebratory opening: corner cannons, a mid-screen burst with firework
/// rings, a long drizzle from the top, then a hard stop. An origin hint
/// recentres the mid-screen burst and the first ring.
pub fn launch(origin_hint: Option<Vec2>) -> Show {
    let left = Origin::Fraction(Vec2::new(0.0, 1.0));
    let right = Origin::Fraction(Vec2::new(1.0, 1.0));
    let mut show = Show::new(LAUNCH).repeat(0.0, CANNON_EVERY_MS, CANNON_UNTIL_MS, |_| {
        smallvec![
            SpawnRequest::new(left, Template::Streamer)
                .cone(-60.0, 22.0)
                .speed_per_frame(9.0, 13.0)
                .count(30),
            SpawnRequest::new(left, Template::Rect)
                .cone(-65.0, 26.0)
                .speed_per_frame(10.0, 14.0)
                .count(30),
            SpawnRequest::new(right, Template::Streamer)
                .cone(-120.0, 22.0)
                .speed_per_frame(9.0, 13.0)
                .count(30),
            SpawnRequest::new(right, Template::Rect)
                .cone(-115.0, 26.0)
                .speed_per_frame(10.0, 14.0)
                .count(30),
        ]
    });

    let (mid, ring) = match origin_hint {
        Some(p) => (Origin::At(p), Origin::At(p)),
        None => (
            Origin::Fraction(Vec2::new(0.5, 0.25)),
            Origin::Fraction(Vec2::new(0.3, 0.35)),
        ),
    };
    show.push_spawn(
        MID_BURST_AT_MS,
        SpawnRequest::new(mid, Template::Rect)
            .cone(90.0, 90.0)
            .speed_per_frame(7.0, 12.0)
            .count(120),
    );
    for origin in [ring, Origin::Fraction(Vec2::new(0.7, 0.3))] {
        for req in firework_spokes(origin, FIREWORK_PER_SPOKE) {
            show.push_spawn(MID_BURST_AT_MS, req);
        }
    }

    show.repeat(
        0.0,
        LAUNCH_DRIZZLE_EVERY_MS,
        LAUNCH_DRIZZLE_UNTIL_MS,
        |i| smallvec![drizzle_piece(i, 14)],
    )
    .stop_at(LAUNCH_STOP_MS)
}

/// Firework ring at a screen point with `count` pieces spread over the spokes.
pub fn burst(at: Vec2, count: usize) -> Show {
    let base = count / FIREWORK_SPOKES;
    let extra = count % FIREWORK_SPOKES;
    let mut show = Show::new("burst");
    for (k, mut req) in firework_spokes(Origin::At(at), base).into_iter().enumerate() {
        req.count = base + usize::from(k < extra);
        if req.count > 0 {
            show.push_spawn(0.0, req);
        }
    }
    show
}

/// Light confetti falling from the top for `duration_ms`, capped at
/// [`MAX_DRIZZLE_MS`]. Non-finite durations give an empty show.
pub fn drizzle(duration_ms: f64) -> Show {
    let duration_ms = if duration_ms.is_finite() {
        duration_ms.clamp(0.0, MAX_DRIZZLE_MS)
    } else {
        0.0
    };
    Show::new("drizzle").repeat(0.0, DRIZZLE_EVERY_MS, duration_ms, |i| {
        smallvec![drizzle_piece(i, 10)]
    })
}

/// Compact party-popper cone of streamers and rects, fired upward.
pub fn popper(at: Vec2) -> Show {
    Show::new("popper")
        .spawn(
            0.0,
            SpawnRequest::new(Origin::At(at), Template::Streamer)
                .cone(-80.0, 26.0)
                .speed_per_frame(8.0, 12.0)
                .count(26),
        )
        .spawn(
            0.0,
            SpawnRequest::new(Origin::At(at), Template::Rect)
                .cone(-86.0, 32.0)
                .speed_per_frame(7.0, 11.0)
                .count(22),
        )
}

pub fn emoji_burst(origin: Origin, count: usize) -> Show {
    Show::new("emoji").spawn(
        0.0,
        SpawnRequest::new(origin, Template::Emoji)
            .cone(-90.0, 24.0)
            .speed(180.0, 320.0)
            .count(count)
            .jitter(EMOJI_JITTER.0, EMOJI_JITTER.1),
    )
}

pub fn heart_burst(origin: Origin, count: usize) -> Show {
    Show::new("hearts").spawn(
        0.0,
        SpawnRequest::new(origin, Template::Heart)
            .cone(-90.0, 50.0)
            .speed(40.0, 90.0)
            .count(count)
            .jitter(HEART_JITTER.0, HEART_JITTER.1),
    )
}

/// Backdrop floaters scattered over the whole percent-space surface,
/// including just above and below it so they do not enter in one wave.
pub fn ambient_field(config: &AmbientConfig) -> Show {
    let region = Origin::Region {
        x: (AMBIENT_X_RANGE.0 / 100.0, AMBIENT_X_RANGE.1 / 100.0),
        y: (-0.1, 1.1),
    };
    let floater = |template| {
        SpawnRequest::new(region, template)
            .cone(90.0, 0.0)
            .speed(AMBIENT_SPEED.0, AMBIENT_SPEED.1)
    };
    let mut show = Show::new("ambient");
    for _ in 0..config.hearts {
        show.push_spawn(0.0, floater(Template::AmbientHeart));
    }
    for _ in 0..config.sparkles {
        show.push_spawn(0.0, floater(Template::AmbientSparkle));
    }
    show
}

/// Glyph hearts rising through the whole viewport, sizes cycling large,
/// medium, small. Empty under reduced motion.
pub fn floating_hearts(config: &FloatingHeartsConfig) -> Show {
    let mut show = Show::new("floating-hearts");
    if config.reduced_motion {
        return show;
    }
    let region = Origin::Region {
        x: (0.0, 1.0),
        y: (-0.1, 1.1),
    };
    for i in 0..config.count {
        show.push_spawn(
            0.0,
            SpawnRequest::new(
                region,
                Template::FloatingHeart {
                    size: HeartSize::cycle(i),
                },
            )
            .cone(-90.0, 0.0)
            .speed(FLOATING_SPEED.0, FLOATING_SPEED.1),
        );
    }
    show
}
