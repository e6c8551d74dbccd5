use super::*;

#[test]
fn frame_clock_divides_by_fps() {
    let c = FrameClock::new(30.0);
    assert_eq!(c.now_secs(Tick(0)), 0.0);
    assert_eq!(c.now_secs(Tick(90)), 3.0);
    assert_eq!(FrameClock::new(0.0).fps(), 30.0);
}

#[test]
fn manual_clock_is_hand_driven() {
    let c = ManualClock::new(1.5);
    assert_eq!(c.now_secs(Tick(100)), 1.5);
    c.advance(2.0);
    assert_eq!(c.now_secs(Tick(0)), 3.5);
    c.set(0.25);
    assert_eq!(c.now_secs(Tick(0)), 0.25);
}

#[test]
fn system_clock_is_monotonic() {
    let c = SystemClock::new();
    let a = c.now_secs(Tick(0));
    let b = c.now_secs(Tick(0));
    assert!(a >= 0.0 && b >= a);
}
