use super::*;

fn halo() -> RainbowHalo {
    RainbowHalo::new(RainbowHaloParams::default()).unwrap()
}

fn swallow(h: u32) -> SwallowFlyby {
    let asset = Arc::new(SpriteAsset::solid_rgba(20, h, [10, 10, 10, 255]).unwrap());
    SwallowFlyby::new(asset, SwallowParams::default()).unwrap()
}

#[test]
fn halo_starts_inactive_and_draws_nothing() {
    let mut h = halo();
    let mut f = Frame::new(64, 48);
    assert!(!h.is_active());
    assert_eq!(h.render(&mut f, 100.0).unwrap(), DrawOutcome::Idle);
    assert_eq!(f, Frame::new(64, 48));
}

#[test]
fn halo_activate_while_active_is_noop() {
    let mut h = halo();
    assert_eq!(h.activate(1.0), Some(CueId::new("rainbow")));
    assert_eq!(h.activate(3.0), None);
    assert!(h.is_active());
    assert_eq!(h.started_at(), 1.0);
}

#[test]
fn halo_lifecycle_follows_duration() {
    let mut h = halo();
    let mut f = Frame::new(64, 48);
    h.activate(0.0);

    assert_eq!(h.render(&mut f, 4.9).unwrap(), DrawOutcome::Drawn);
    assert!(h.is_active());
    assert_ne!(f, Frame::new(64, 48));

    let mut last = Frame::new(64, 48);
    assert_eq!(h.render(&mut last, 5.1).unwrap(), DrawOutcome::Drawn);
    assert_ne!(last, Frame::new(64, 48));
    assert!(!h.is_active());

    let mut after = Frame::new(64, 48);
    assert_eq!(h.render(&mut after, 5.2).unwrap(), DrawOutcome::Idle);
    assert_eq!(after, Frame::new(64, 48));

    // reactivation restarts the clock
    assert!(h.activate(31.0).is_some());
    assert_eq!(h.started_at(), 31.0);
}

#[test]
fn halo_outer_ring_is_red_and_centered() {
    let mut h = halo();
    let mut f = Frame::new(64, 48);
    h.activate(0.0);
    h.render(&mut f, 0.0).unwrap();
    // outer ring radius is min(w, h)/2 = 24 around (32, 24)
    assert_eq!(f.pixel(32 + 24, 24), Some([255, 0, 0]));
    assert_eq!(f.pixel(32, 24), Some([0, 0, 0]));
    assert_eq!(h.ring_color(0), [255, 0, 0]);
    assert_ne!(h.ring_color(3), h.ring_color(0));
}

#[test]
fn halo_rings_shrink_to_the_smaller_side() {
    let mut h = halo();
    let mut f = Frame::new(30, 200);
    h.activate(0.0);
    h.render(&mut f, 0.0).unwrap();
    // radius 15 around (15, 100): nothing reaches the top or bottom rows
    assert_eq!(f.pixel(15, 0), Some([0, 0, 0]));
    assert_eq!(f.pixel(15, 199), Some([0, 0, 0]));
    assert_eq!(f.pixel(15, 100 - 15), Some([255, 0, 0]));
}

#[test]
fn halo_params_validation() {
    let bad = RainbowHaloParams {
        duration_secs: 0.0,
        ..RainbowHaloParams::default()
    };
    assert!(RainbowHalo::new(bad).is_err());
}

#[test]
fn swallow_activation_starts_off_screen_left() {
    let mut rng = fastrand::Rng::with_seed(42);
    for _ in 0..50 {
        let mut s = swallow(30);
        assert_eq!(s.activate(100, &mut rng), Some(CueId::new("swallow")));
        let (x, y) = s.position();
        assert_eq!(x, -100);
        assert!((0..=70).contains(&y));
    }
}

#[test]
fn swallow_activate_while_active_keeps_position() {
    let mut rng = fastrand::Rng::with_seed(3);
    let mut s = swallow(10);
    s.activate(100, &mut rng);
    s.advance(640);
    let before = s.position();
    assert_eq!(s.activate(100, &mut rng), None);
    assert_eq!(s.position(), before);
}

#[test]
fn swallow_deactivates_exactly_past_width() {
    let mut rng = fastrand::Rng::with_seed(9);
    let mut s = swallow(10);
    s.activate(48, &mut rng);
    // -100 + 10k > 60 first holds at k = 17 (x = 70); x = 60 is still active
    for _ in 0..16 {
        s.advance(60);
        assert!(s.is_active());
    }
    assert_eq!(s.position().0, 60);
    s.advance(60);
    assert_eq!(s.position().0, 70);
    assert!(!s.is_active());
    let x = s.position().0;
    s.advance(60);
    assert_eq!(s.position().0, x);
}

#[test]
fn swallow_render_skips_off_frame_and_idles_when_inactive() {
    let mut rng = fastrand::Rng::with_seed(5);
    let mut s = swallow(10);
    let mut f = Frame::new(64, 48);
    assert_eq!(s.render(&mut f), DrawOutcome::Idle);

    s.activate(48, &mut rng);
    assert_eq!(s.render(&mut f), DrawOutcome::Skipped);

    for _ in 0..12 {
        s.advance(64);
    }
    assert_eq!(s.position().0, 20);
    assert_eq!(s.render(&mut f), DrawOutcome::Drawn);
    let y = s.position().1;
    assert_eq!(f.pixel(20, y), Some([10, 10, 10]));
}
