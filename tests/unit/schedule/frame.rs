use super::*;

#[test]
fn requests_fire_once_in_order() {
    let mut s = ManualScheduler::new();
    let a = s.request_frame();
    let b = s.request_frame();
    assert!(s.is_pending(a));

    let tick = s.advance();
    assert_eq!(tick.frame, FrameIndex(0));
    assert_eq!(tick.due, vec![a, b]);
    assert!(!s.is_pending(a));

    let tick = s.advance();
    assert_eq!(tick.frame, FrameIndex(1));
    assert!(tick.is_idle());
}

#[test]
fn requests_made_during_a_frame_wait_for_the_next() {
    let mut s = ManualScheduler::new();
    s.request_frame();
    let tick = s.advance();
    assert_eq!(tick.due.len(), 1);

    let rearm = s.request_frame();
    assert_eq!(s.frame(), FrameIndex(1));
    assert_eq!(s.advance().due, vec![rearm]);
}

#[test]
fn cancel_removes_request() {
    let mut s = ManualScheduler::new();
    let a = s.request_frame();
    s.cancel_frame(a);
    s.cancel_frame(a);
    assert!(!s.is_pending(a));
    assert!(s.advance().is_idle());
}

#[test]
fn ids_are_not_reused() {
    let mut s = ManualScheduler::new();
    let a = s.request_frame();
    s.advance();
    let b = s.request_frame();
    assert_ne!(a, b);
}

#[test]
fn drop_pending_discards_without_firing() {
    let mut s = ManualScheduler::new();
    let a = s.request_frame();
    assert_eq!(s.drop_pending(), 1);
    assert!(!s.is_pending(a));
    assert!(s.advance().is_idle());
}
