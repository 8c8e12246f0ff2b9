mod common;

use common::*;
use fx_core::constants::*;
use fx_core::shows;
use fx_core::*;
use glam::Vec2;

const FRAME_MS: f64 = 16.0;

#[test]
fn engine_starts_idle_and_lazy() {
    let e = confetti_engine();
    assert_eq!(e.state(), LoopState::Idle);
    assert_eq!(e.health(), SurfaceHealth::Pending);
    assert_eq!(e.surface().ensure_calls, 0);
    assert_eq!(e.frames().requested_total(), 0);
}

#[test]
fn start_twice_keeps_one_loop() {
    let mut e = confetti_engine();
    assert!(e.start(None));
    let pending = e.pending_steps();
    assert!(!e.start(None));
    assert_eq!(e.pending_steps(), pending, "second start must not queue more steps");
    assert_eq!(e.frames().outstanding(), 1);
    assert_eq!(e.frames().requested_total(), 1);
}

#[test]
fn each_frame_requests_exactly_one_more() {
    let mut e = confetti_engine();
    e.burst(500.0, 300.0, Some(40));
    for i in 0..20 {
        assert!(fire_frame(&mut e, i as f64 * FRAME_MS));
        assert!(e.frames().outstanding() <= 1);
    }
}

#[test]
fn stop_then_start_restarts_cleanly() {
    let mut e = confetti_engine();
    e.start(None);
    let mut now = 0.0;
    for _ in 0..40 {
        fire_frame(&mut e, now);
        now += FRAME_MS;
    }
    assert!(e.active() > 0);

    e.stop();
    assert_eq!(e.state(), LoopState::Idle);
    assert_eq!(e.active(), 0);
    assert_eq!(e.pending_steps(), 0);
    assert_eq!(e.frames().outstanding(), 0);
    assert_eq!(e.frames().canceled_total(), 1);
    assert!(e.surface().clears >= 1);

    assert!(e.start(None));
    assert_eq!(e.frames().outstanding(), 1);
    assert!(fire_frame(&mut e, now));
    assert!(e.active() > 0, "first frame runs the steps due at zero");
    assert_eq!(e.frames().outstanding(), 1);
}

#[test]
fn stop_while_idle_is_harmless() {
    let mut e = confetti_engine();
    e.stop();
    e.stop();
    assert_eq!(e.state(), LoopState::Idle);
    assert_eq!(e.frames().canceled_total(), 0);
}

#[test]
fn burst_at_capacity_spawns_nothing() {
    let mut e = engine(EngineConfig::confetti().with_capacity(100));
    e.burst(500.0, 300.0, Some(100));
    fire_frame(&mut e, 0.0);
    assert_eq!(e.active(), 100);

    let req = SpawnRequest::new(Origin::At(Vec2::new(10.0, 10.0)), Template::Rect).count(10);
    assert_eq!(e.spawn(&req), 0);
    e.burst(500.0, 300.0, Some(80));
    fire_frame(&mut e, FRAME_MS);
    assert_eq!(e.active(), 100);
}

#[test]
fn burst_goes_idle_by_itself() {
    let mut e = confetti_engine();
    e.burst(500.0, 300.0, None);
    let end = run_until_idle(&mut e, 0.0, FRAME_MS, 20_000.0);
    assert!(!e.is_running(), "loop still running at {end}");
    assert_eq!(e.active(), 0);
    assert_eq!(e.frames().outstanding(), 0);
    // last frame blanks the surface
    assert_eq!(e.surface().last_drawn, 0);
}

#[test]
fn drizzle_finishes_within_duration_plus_lifetime() {
    let mut e = confetti_engine();
    assert!(e.drizzle(1200.0));
    assert_eq!(e.pending_steps(), 10);
    let end = run_until_idle(&mut e, 0.0, FRAME_MS, 1200.0 + 16_000.0 + 100.0);
    assert!(!e.is_running(), "still running at {end}");
    assert_eq!(e.active(), 0);
    assert_eq!(e.pending_steps(), 0);
}

#[test]
fn launch_hard_stops_at_twelve_seconds() {
    let mut e = confetti_engine();
    e.start(None);
    let mut peak = 0;
    let mut now = 0.0;
    while fire_frame(&mut e, now) {
        peak = peak.max(e.active());
        assert!(e.active() <= e.pool().capacity());
        if !e.is_running() {
            break;
        }
        now += FRAME_MS;
    }
    assert!(peak > e.pool().capacity() / 2, "peak {peak}");
    assert!(!e.is_running());
    assert_eq!(e.active(), 0);
    assert_eq!(e.pending_steps(), 0);
    assert!(e.clock_ms() >= 12_000.0 && e.clock_ms() < 12_000.0 + FRAME_MS);
}

#[test]
fn first_frame_after_waking_has_zero_dt() {
    let mut e = confetti_engine();
    let req = SpawnRequest::new(Origin::At(Vec2::new(500.0, 300.0)), Template::Rect)
        .cone(90.0, 0.0)
        .speed(100.0, 100.0);
    e.spawn(&req);
    fire_frame(&mut e, 5_000.0);
    assert_eq!(e.clock_ms(), 0.0);
    assert_eq!(e.pool().particles()[0].age_ms, 0.0);

    fire_frame(&mut e, 5_016.0);
    assert_eq!(e.clock_ms(), 16.0);
    assert_eq!(e.pool().particles()[0].age_ms, 16.0);
}

#[test]
fn long_stalls_are_clamped() {
    let mut e = confetti_engine();
    let req = SpawnRequest::new(Origin::At(Vec2::new(500.0, 300.0)), Template::Rect);
    e.spawn(&req);
    fire_frame(&mut e, 0.0);
    fire_frame(&mut e, 60_000.0);
    assert_eq!(e.clock_ms(), f64::from(MAX_FRAME_DT_MS));
    assert_eq!(e.pool().particles()[0].age_ms, MAX_FRAME_DT_MS);
}

#[test]
fn unavailable_surface_disables_the_engine() {
    let mut e = Engine::new(
        EngineConfig::confetti(),
        RecordingSurface::failing(SurfaceError::Unavailable("no 2d context".into())),
        ManualFrames::new(),
        1,
    );
    assert!(!e.start(None));
    assert_eq!(e.health(), SurfaceHealth::Disabled);
    assert_eq!(e.frames().requested_total(), 0);

    assert!(!e.burst(10.0, 10.0, None));
    e.resize(Viewport::new(800.0, 600.0, 2.0));
    assert_eq!(e.surface().ensure_calls, 1, "disabled engines stop retrying");
    assert_eq!(e.active(), 0);
}

#[test]
fn surface_not_ready_keeps_simulating_and_retries() {
    let mut e = Engine::new(
        EngineConfig::confetti(),
        RecordingSurface::failing(SurfaceError::NotReady("document loading")),
        ManualFrames::new(),
        1,
    );
    assert!(e.burst(500.0, 300.0, Some(16)));
    fire_frame(&mut e, 0.0);
    assert_eq!(e.health(), SurfaceHealth::Pending);
    assert_eq!(e.active(), 16);
    assert_eq!(e.surface().draws, 0);

    e.surface_mut().fail_with = None;
    fire_frame(&mut e, FRAME_MS);
    assert_eq!(e.health(), SurfaceHealth::Ready);
    assert_eq!(e.surface().draws, 1);
}

#[test]
fn resize_while_running_keeps_particles() {
    let mut e = confetti_engine();
    e.burst(500.0, 300.0, Some(24));
    fire_frame(&mut e, 0.0);
    let before: Vec<Vec2> = e.pool().iter().map(|p| p.pos).collect();

    e.resize(Viewport::new(400.0, 300.0, 2.0));
    assert_eq!(e.bounds(), Bounds::new(400.0, 300.0));
    let after: Vec<Vec2> = e.pool().iter().map(|p| p.pos).collect();
    assert_eq!(before, after);
    assert!(e.is_running());
    assert_eq!(e.frames().outstanding(), 1);
}

#[test]
fn stale_frame_after_stop_is_ignored() {
    let mut e = confetti_engine();
    e.burst(500.0, 300.0, Some(8));
    e.stop();
    let draws = e.surface().draws;
    e.on_frame(100.0);
    assert_eq!(e.surface().draws, draws);
    assert_eq!(e.frames().outstanding(), 0);
    assert!(!e.is_running());
}

#[test]
fn played_shows_run_on_the_engine_clock() {
    let mut e = confetti_engine();
    e.play(&shows::drizzle(400.0));
    assert_eq!(e.pending_steps(), 4);
    fire_frame(&mut e, 0.0);
    assert_eq!(e.pending_steps(), 3);
    let mut now = 0.0;
    while e.pending_steps() > 0 {
        now += FRAME_MS;
        fire_frame(&mut e, now);
    }
    // last step was due at 390ms
    assert!(e.clock_ms() >= 390.0 && e.clock_ms() < 390.0 + FRAME_MS);
}

#[test]
fn empty_show_does_not_wake_the_loop() {
    let mut e = confetti_engine();
    assert!(!e.play(&Show::new("nothing")));
    assert!(!e.drizzle(0.0));
    assert_eq!(e.frames().requested_total(), 0);
}

#[test]
fn ambient_floaters_never_drain() {
    let mut e = Engine::new(
        EngineConfig::ambient(),
        RecordingSurface::new(1280.0, 720.0),
        ManualFrames::new(),
        9,
    );
    assert_eq!(e.bounds(), Bounds::new(AMBIENT_EXTENT, AMBIENT_EXTENT));
    assert!(e.play(&shows::ambient_field(&AmbientConfig::default())));
    let mut now = 0.0;
    for _ in 0..2_000 {
        assert!(fire_frame(&mut e, now));
        now += 50.0;
    }
    assert_eq!(e.active(), AMBIENT_HEARTS + AMBIENT_SPARKLES);
    assert!(e.is_running());
    assert!(e
        .pool()
        .iter()
        .all(|p| p.pos.y >= AMBIENT_WRAP_TOP - 1.0 && p.pos.y <= AMBIENT_WRAP_BOTTOM));
}

#[test]
fn popper_and_firework_spawn_on_the_next_frame() {
    let mut e = confetti_engine();
    assert!(e.popper(500.0, 580.0));
    assert!(e.firework(300.0, 200.0));
    assert_eq!(e.active(), 0);
    assert_eq!(e.frames().outstanding(), 1);
    fire_frame(&mut e, 0.0);
    assert_eq!(e.active(), 48 + 240);
    assert_eq!(e.pending_steps(), 0);
}

#[test]
fn start_runs_even_while_another_effect_is_playing() {
    let mut e = confetti_engine();
    assert!(e.popper(500.0, 580.0));
    assert!(e.drizzle(1200.0));
    fire_frame(&mut e, 0.0);
    assert!(e.is_running());
    let before = e.pending_steps();

    assert!(e.start(None));
    let launch = shows::launch(None).len();
    assert_eq!(e.pending_steps(), before + launch);
    assert_eq!(e.frames().outstanding(), 1);
    assert_eq!(e.frames().requested_total(), 2);

    assert!(!e.start(None), "launch already queued");
    assert_eq!(e.pending_steps(), before + launch);
}

#[test]
fn start_is_allowed_again_once_the_launch_has_played_out() {
    let mut e = confetti_engine();
    assert!(e.start(None));
    let mut now = 0.0;
    while e.pending_steps() > 0 {
        fire_frame(&mut e, now);
        now += FRAME_MS;
    }
    assert!(e.start(None));
}

#[test]
fn non_finite_drizzle_is_refused() {
    let mut e = confetti_engine();
    assert!(!e.drizzle(f64::INFINITY));
    assert!(!e.drizzle(f64::NAN));
    assert_eq!(e.pending_steps(), 0);
    assert_eq!(e.frames().requested_total(), 0);
}

#[test]
fn huge_drizzle_is_capped() {
    let mut e = confetti_engine();
    assert!(e.drizzle(1.0e7));
    assert_eq!(e.pending_steps(), shows::drizzle(shows::MAX_DRIZZLE_MS).len());
}

#[test]
fn burst_far_above_capacity_fills_the_pool() {
    let mut e = confetti_engine();
    let capacity = e.pool().capacity();
    assert!(e.burst(500.0, 300.0, Some(u32::MAX as usize)));
    fire_frame(&mut e, 0.0);
    assert_eq!(e.active(), capacity);
    fire_frame(&mut e, FRAME_MS);
    assert!(e.active() <= capacity);
}

#[test]
fn surfaces_draw_in_the_configured_space() {
    let mut e = Engine::new(
        EngineConfig::floating(),
        RecordingSurface::new(1280.0, 720.0),
        ManualFrames::new(),
        4,
    );
    assert_eq!(e.bounds(), Bounds::new(AMBIENT_EXTENT, AMBIENT_EXTENT));
    e.resize(Viewport::new(640.0, 480.0, 1.0));
    assert_eq!(e.bounds(), Bounds::new(AMBIENT_EXTENT, AMBIENT_EXTENT));
    assert!(e.play(&shows::floating_hearts(&FloatingHeartsConfig::default())));
    fire_frame(&mut e, 0.0);
    assert_eq!(e.surface().last_space, Some(Space::Percent));

    let mut c = confetti_engine();
    c.burst(10.0, 10.0, Some(8));
    fire_frame(&mut c, 0.0);
    assert_eq!(c.surface().last_space, Some(Space::Pixels));
}

fn floating_engine() -> TestEngine {
    Engine::new(
        EngineConfig::floating(),
        RecordingSurface::new(1280.0, 720.0),
        ManualFrames::new(),
        21,
    )
}

#[test]
fn floating_hearts_keep_rising_forever() {
    let mut e = floating_engine();
    assert!(e.play(&shows::floating_hearts(&FloatingHeartsConfig::default())));
    let mut now = 0.0;
    for _ in 0..3_000 {
        assert!(fire_frame(&mut e, now));
        now += 50.0;
    }
    assert_eq!(e.active(), FLOATING_COUNT);
    assert!(e.is_running());
    assert!(e
        .pool()
        .iter()
        .all(|p| p.pos.y >= FLOATING_WRAP_TOP - 1.0 && p.pos.y <= FLOATING_WRAP_BOTTOM));
    assert!(e.pool().iter().all(|p| p.pos.x > -1.0 && p.pos.x < AMBIENT_EXTENT + 1.0));
}

#[test]
fn reduced_motion_leaves_floating_hearts_idle() {
    let mut e = floating_engine();
    let config = FloatingHeartsConfig {
        reduced_motion: true,
        ..FloatingHeartsConfig::default()
    };
    assert!(!e.play(&shows::floating_hearts(&config)));
    assert_eq!(e.frames().requested_total(), 0);
    assert_eq!(e.active(), 0);
}

#[test]
fn desync_on_resize_keeps_hearts_in_place() {
    let mut e = floating_engine();
    let config = FloatingHeartsConfig {
        count: 12,
        ..FloatingHeartsConfig::default()
    };
    e.play(&shows::floating_hearts(&config));
    fire_frame(&mut e, 0.0);
    let before: Vec<Vec2> = e.pool().iter().map(|p| p.pos).collect();
    e.resize(Viewport::new(375.0, 812.0, 3.0));
    e.desync();
    let after: Vec<Vec2> = e.pool().iter().map(|p| p.pos).collect();
    assert_eq!(before, after);
    assert_eq!(e.active(), 12);
}
