use super::*;

#[test]
fn due_is_strictly_after_interval() {
    let t = IntervalTrigger::new(30.0, 0.0);
    assert!(!t.is_due(29.9));
    assert!(!t.is_due(30.0));
    assert!(t.is_due(30.1));
}

#[test]
fn mark_restarts_period() {
    let mut t = IntervalTrigger::new(45.0, 0.0);
    t.mark(46.0);
    assert_eq!(t.last_secs(), 46.0);
    assert!(!t.is_due(90.0));
    assert!(t.is_due(91.5));
    assert_eq!(t.interval_secs(), 45.0);
}
