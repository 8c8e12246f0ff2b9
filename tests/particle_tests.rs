use fx_core::*;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn make(template: Template) -> Particle {
    let mut rng = StdRng::seed_from_u64(11);
    template.instantiate(1, Vec2::new(10.0, 20.0), Vec2::ZERO, &Palette::default(), &mut rng)
}

#[test]
fn fade_envelope_ramps_in_and_out() {
    assert_eq!(fade_in_out(0.0), 0.0);
    assert!((fade_in_out(0.1) - 0.5).abs() < 1e-6);
    assert_eq!(fade_in_out(0.2), 1.0);
    assert_eq!(fade_in_out(0.5), 1.0);
    assert!((fade_in_out(0.9) - 0.5).abs() < 1e-5);
    assert_eq!(fade_in_out(1.0), 0.0);
    assert_eq!(fade_in_out(1.5), 0.0);
}

#[test]
fn hearts_fade_to_nothing_at_the_end() {
    let mut p = make(Template::Heart);
    let ttl = p.ttl_ms.unwrap();
    assert_eq!(p.opacity(), 0.0);
    p.age_ms = ttl / 2.0;
    assert!((p.opacity() - 0.95).abs() < 1e-6);
    p.age_ms = ttl;
    assert_eq!(p.opacity(), 0.0);
    assert!(p.is_expired());
    assert_eq!(p.life_fraction(), 1.0);
}

#[test]
fn floaters_never_expire() {
    let mut p = make(Template::AmbientHeart);
    assert_eq!(p.ttl_ms, None);
    p.age_ms = 1.0e9;
    assert!(!p.is_expired());
    assert_eq!(p.life_fraction(), 0.0);
    assert!(matches!(p.exit, Exit::Wrap { .. }));
}

#[test]
fn sparkles_twinkle_within_their_base() {
    let mut p = make(Template::AmbientSparkle);
    let base = match p.fade {
        Fade::Twinkle { base, .. } => base,
        other => panic!("unexpected fade {other:?}"),
    };
    for step in 0..200 {
        p.age_ms = step as f32 * 37.0;
        let a = p.opacity();
        assert!(a >= base * 0.6 - 1e-6 && a <= base + 1e-6, "opacity {a}");
    }
}

#[test]
fn sway_moves_only_the_drawn_position() {
    let mut p = make(Template::Emoji);
    assert!(p.sway.amp > 0.0);
    for step in 0..50 {
        p.age_ms = step as f32 * 20.0;
        let drawn = p.render_pos();
        assert_eq!(drawn.y, p.pos.y);
        assert!((drawn.x - p.pos.x).abs() <= p.sway.amp + 1e-4);
    }
    assert_eq!(p.pos, Vec2::new(10.0, 20.0));
    assert_eq!(Sway::NONE.offset(1234.0), 0.0);
}

#[test]
fn confetti_falls_under_gravity_and_spins() {
    for template in [Template::Rect, Template::Streamer] {
        let p = make(template);
        assert!(p.visual.is_confetti());
        assert!(p.accel.y > 0.0);
        assert!(p.damping < 1.0);
        assert_eq!(p.exit, Exit::Prune);
        let ttl = p.ttl_ms.unwrap();
        assert!((12_000.0..=16_000.0).contains(&ttl));
    }
    assert!(!make(Template::Heart).visual.is_confetti());
}

#[test]
fn colors_come_from_the_palette() {
    let palette = Palette {
        confetti: &["#123456"],
        hearts: &["#abcdef"],
        glyphs: &["🎂"],
    };
    let mut rng = StdRng::seed_from_u64(5);
    let rect = Template::Rect.instantiate(0, Vec2::ZERO, Vec2::ZERO, &palette, &mut rng);
    let heart = Template::Heart.instantiate(1, Vec2::ZERO, Vec2::ZERO, &palette, &mut rng);
    let emoji = Template::Emoji.instantiate(2, Vec2::ZERO, Vec2::ZERO, &palette, &mut rng);
    assert_eq!(rect.color, "#123456");
    assert_eq!(heart.color, "#abcdef");
    assert!(matches!(emoji.visual, Visual::Glyph { glyph: "🎂", .. }));
}

#[test]
fn origins_resolve_against_bounds() {
    let mut rng = StdRng::seed_from_u64(2);
    let b = Bounds::new(200.0, 100.0);
    assert_eq!(Origin::Fraction(Vec2::new(0.5, 1.0)).resolve(b, &mut rng), Vec2::new(100.0, 100.0));
    for _ in 0..100 {
        let top = Origin::TopEdge { y: -20.0 }.resolve(b, &mut rng);
        assert_eq!(top.y, -20.0);
        assert!((0.0..=200.0).contains(&top.x));
        let r = Origin::Region {
            x: (0.25, 0.75),
            y: (0.5, 0.5),
        }
        .resolve(b, &mut rng);
        assert!((50.0..=150.0).contains(&r.x));
        assert_eq!(r.y, 50.0);
    }
}

#[test]
fn bounds_leave_the_top_open() {
    let b = Bounds::new(100.0, 100.0);
    assert!(!b.is_outside(Vec2::new(50.0, -1.0e6), 10.0));
    assert!(!b.is_outside(Vec2::new(-10.0, 110.0), 10.0));
    assert!(b.is_outside(Vec2::new(-10.5, 50.0), 10.0));
    assert!(b.is_outside(Vec2::new(110.5, 50.0), 10.0));
    assert!(b.is_outside(Vec2::new(50.0, 110.5), 10.0));
}

#[test]
fn viewport_backing_store_scales_with_dpr() {
    let vp = Viewport::new(800.0, 600.0, 2.0);
    assert_eq!(vp.backing_px(), (1600, 1200));
    assert_eq!(Viewport::new(0.0, -5.0, 0.0).backing_px(), (1, 1));
    assert_eq!(Bounds::for_space(Space::Percent, vp), Bounds::new(100.0, 100.0));
    assert_eq!(Bounds::for_space(Space::Pixels, vp), Bounds::new(800.0, 600.0));
}

#[test]
fn floating_hearts_are_steady_glyphs_that_wrap() {
    let palette = Palette {
        glyphs: constants::FLOATING_GLYPHS,
        ..Palette::default()
    };
    let mut rng = StdRng::seed_from_u64(3);
    let heart = Template::FloatingHeart {
        size: HeartSize::Large,
    };
    let mut p = heart.instantiate(1, Vec2::new(10.0, 20.0), Vec2::ZERO, &palette, &mut rng);
    match p.visual {
        Visual::Glyph { glyph, font_px } => {
            assert!(constants::FLOATING_GLYPHS.contains(&glyph));
            assert_eq!(font_px, 34.0);
        }
        other => panic!("unexpected visual {other:?}"),
    }
    assert_eq!(p.ttl_ms, None);
    p.age_ms = 1.0e9;
    assert_eq!(p.opacity(), constants::FLOATING_OPACITY);
    assert!(matches!(
        p.exit,
        Exit::Wrap {
            top,
            bottom,
            ..
        } if top == constants::FLOATING_WRAP_TOP && bottom == constants::FLOATING_WRAP_BOTTOM
    ));
}

#[test]
fn heart_sizes_cycle_and_shrink() {
    let sizes: Vec<HeartSize> = (0..4).map(HeartSize::cycle).collect();
    assert_eq!(
        sizes,
        [HeartSize::Large, HeartSize::Medium, HeartSize::Small, HeartSize::Large]
    );
    assert!(HeartSize::Large.font_px() > HeartSize::Medium.font_px());
    assert!(HeartSize::Medium.font_px() > HeartSize::Small.font_px());
}

#[test]
fn spaces_map_between_pixels_and_percent() {
    let vp = Viewport::new(800.0, 400.0, 2.0);
    let pos = Vec2::new(50.0, 25.0);
    assert_eq!(Space::Percent.to_css(pos, vp), Vec2::new(400.0, 100.0));
    assert_eq!(Space::Pixels.to_css(pos, vp), pos);
    assert_eq!(Space::Pixels.to_percent(Vec2::new(400.0, 100.0), vp), pos);
    assert_eq!(Space::Percent.to_percent(pos, vp), pos);
    // degenerate viewport does not divide by zero
    let empty = Viewport::new(0.0, 0.0, 1.0);
    assert!(Space::Pixels.to_percent(pos, empty).is_finite());
}
