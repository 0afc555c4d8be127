use super::*;
use crate::schedule::frame::ManualScheduler;
use std::cell::{Cell, RefCell};

/// Stack that returns a fixed list and records every query point.
struct FixedStack {
    layers: RefCell<Vec<Rgba8>>,
    queries: RefCell<Vec<Point>>,
}

impl FixedStack {
    fn new(layers: &[Rgba8]) -> Self {
        Self {
            layers: RefCell::new(layers.to_vec()),
            queries: RefCell::new(Vec::new()),
        }
    }

    fn set(&self, layers: &[Rgba8]) {
        *self.layers.borrow_mut() = layers.to_vec();
    }

    fn query_count(&self) -> usize {
        self.queries.borrow().len()
    }
}

impl BackgroundStack for FixedStack {
    fn backgrounds_at(&self, point: Point) -> Vec<Rgba8> {
        self.queries.borrow_mut().push(point);
        self.layers.borrow().clone()
    }
}

/// Stack split at a document y: dark above, light below.
struct SplitStack {
    split_y: f64,
    calls: Cell<usize>,
}

impl BackgroundStack for SplitStack {
    fn backgrounds_at(&self, point: Point) -> Vec<Rgba8> {
        self.calls.set(self.calls.get() + 1);
        if point.y < self.split_y {
            vec![Rgba8::TRANSPARENT, Rgba8::rgb(20, 20, 20)]
        } else {
            vec![Rgba8::rgb(240, 240, 240)]
        }
    }
}

fn viewport() -> Viewport {
    Viewport::new(1024, 768).unwrap()
}

fn dispatch(s: &mut ContrastSampler, sched: &mut ManualScheduler, stack: &dyn BackgroundStack) {
    for req in sched.advance().due {
        s.on_frame(req, stack);
    }
}

#[test]
fn mount_samples_synchronously() {
    let stack = FixedStack::new(&[Rgba8::rgb(250, 250, 250)]);
    let s = ContrastSampler::mount(SamplerConfig::default(), viewport(), 0.0, &stack).unwrap();
    assert_eq!(s.foreground(), Foreground::Black);
    assert_eq!(s.recomputes(), 1);
    assert_eq!(stack.queries.borrow()[0], Point::new(512.0, 60.0));
}

#[test]
fn first_opaque_layer_decides() {
    let stack = FixedStack::new(&[
        Rgba8::TRANSPARENT,
        Rgba8::TRANSPARENT,
        Rgba8::rgb(10, 10, 10),
        Rgba8::rgb(250, 250, 250),
    ]);
    let s = ContrastSampler::mount(SamplerConfig::default(), viewport(), 0.0, &stack).unwrap();
    assert_eq!(s.foreground(), Foreground::White);
}

#[test]
fn transparent_stack_retains_previous_value() {
    let stack = FixedStack::new(&[Rgba8::rgb(250, 250, 250)]);
    let mut s = ContrastSampler::mount(SamplerConfig::default(), viewport(), 0.0, &stack).unwrap();
    assert_eq!(s.foreground(), Foreground::Black);

    stack.set(&[Rgba8::TRANSPARENT, Rgba8::new(9, 9, 9, 0)]);
    let out = s.sample_now(&stack);
    assert_eq!(out.background, None);
    assert!(!out.changed);
    assert_eq!(s.foreground(), Foreground::Black);

    stack.set(&[]);
    s.sample_now(&stack);
    assert_eq!(s.foreground(), Foreground::Black);
}

#[test]
fn initial_value_is_configurable_and_kept_without_opaque_layers() {
    let stack = FixedStack::new(&[]);
    let cfg = SamplerConfig {
        initial: Foreground::Black,
        ..Default::default()
    };
    let s = ContrastSampler::mount(cfg, viewport(), 0.0, &stack).unwrap();
    assert_eq!(s.foreground(), Foreground::Black);
}

#[test]
fn scroll_burst_coalesces_into_one_recompute() {
    let stack = SplitStack {
        split_y: 1000.0,
        calls: Cell::new(0),
    };
    let mut sched = ManualScheduler::new();
    let mut s = ContrastSampler::mount(SamplerConfig::default(), viewport(), 0.0, &stack).unwrap();
    assert_eq!(s.foreground(), Foreground::White);
    assert_eq!(stack.calls.get(), 1);

    assert!(s.scrolled(100.0, &mut sched));
    for y in [300.0, 700.0, 2000.0] {
        assert!(!s.scrolled(y, &mut sched));
    }
    assert_eq!(sched.pending_len(), 1);
    // No work happens until the frame fires.
    assert_eq!(stack.calls.get(), 1);

    dispatch(&mut s, &mut sched, &stack);
    assert_eq!(stack.calls.get(), 2);
    assert_eq!(s.recomputes(), 2);
    // The frame used the latest offset (2000 + 60 is below the split).
    assert_eq!(s.foreground(), Foreground::Black);

    // Guard cleared: the next scroll arms a new frame.
    assert!(s.scrolled(10.0, &mut sched));
    dispatch(&mut s, &mut sched, &stack);
    assert_eq!(s.foreground(), Foreground::White);
    assert_eq!(stack.calls.get(), 3);
}

#[test]
fn idle_frames_do_not_recompute() {
    let stack = FixedStack::new(&[Rgba8::WHITE]);
    let mut sched = ManualScheduler::new();
    let mut s = ContrastSampler::mount(SamplerConfig::default(), viewport(), 0.0, &stack).unwrap();
    for _ in 0..5 {
        dispatch(&mut s, &mut sched, &stack);
    }
    assert_eq!(stack.query_count(), 1);
}

#[test]
fn dropped_frame_does_not_wedge_the_guard() {
    let stack = FixedStack::new(&[Rgba8::WHITE]);
    let mut sched = ManualScheduler::new();
    let mut s = ContrastSampler::mount(SamplerConfig::default(), viewport(), 0.0, &stack).unwrap();

    assert!(s.scrolled(50.0, &mut sched));
    let lost = s.pending_request().unwrap();
    assert_eq!(sched.drop_pending(), 1);

    assert!(s.scrolled(60.0, &mut sched));
    assert_ne!(s.pending_request(), Some(lost));
    // A late delivery of the lost request is ignored.
    assert!(s.on_frame(lost, &stack).is_none());

    dispatch(&mut s, &mut sched, &stack);
    assert_eq!(s.recomputes(), 2);
}

#[test]
fn unmount_cancels_and_ignores_late_frames() {
    let stack = FixedStack::new(&[Rgba8::WHITE]);
    let mut sched = ManualScheduler::new();
    let mut s = ContrastSampler::mount(SamplerConfig::default(), viewport(), 0.0, &stack).unwrap();
    s.scrolled(10.0, &mut sched);
    let in_flight = s.pending_request().unwrap();

    s.unmount(&mut sched);
    assert!(!s.is_mounted());
    assert_eq!(sched.pending_len(), 0);
    assert!(s.on_frame(in_flight, &stack).is_none());
    assert!(!s.scrolled(20.0, &mut sched));
    assert_eq!(s.scroll_y(), 10.0);
}

#[test]
fn sample_point_tracks_viewport_center() {
    let stack = FixedStack::new(&[]);
    let mut s = ContrastSampler::mount(SamplerConfig::default(), viewport(), 40.0, &stack).unwrap();
    assert_eq!(s.sample_point(), Point::new(512.0, 100.0));
    s.resized(Viewport::new(400, 300).unwrap());
    assert_eq!(s.sample_point(), Point::new(200.0, 100.0));
}

#[test]
fn non_finite_offset_is_rejected() {
    let stack = FixedStack::new(&[]);
    let cfg = SamplerConfig {
        offset_y: f64::NAN,
        ..Default::default()
    };
    assert!(ContrastSampler::mount(cfg, viewport(), 0.0, &stack).is_err());
}
