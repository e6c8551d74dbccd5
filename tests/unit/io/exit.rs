use super::*;

#[test]
fn frame_budget_allows_exactly_n_ticks() {
    let mut b = FrameBudget::new(2);
    assert_eq!(b.poll(), LoopControl::Continue);
    assert_eq!(b.poll(), LoopControl::Continue);
    assert_eq!(b.poll(), LoopControl::Stop);
    assert_eq!(b.poll(), LoopControl::Stop);
}

#[test]
fn stop_flag_is_shared_between_clones() {
    let handle = StopFlag::new();
    let mut signal = handle.clone();
    assert_eq!(signal.poll(), LoopControl::Continue);
    handle.request_stop();
    assert_eq!(signal.poll(), LoopControl::Stop);
}

#[test]
fn never_continues() {
    let mut n = Never;
    for _ in 0..10 {
        assert_eq!(n.poll(), LoopControl::Continue);
    }
}
