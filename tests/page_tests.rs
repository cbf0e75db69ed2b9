// Host-side tests for scroll tracking, scrub, snap, timers and the progress signal.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use valentine_core::ease::Ease;
use valentine_core::page::{PageLayout, ScrollTrack, SectionSpan};
use valentine_core::signal::{ListenerId, ProgressSignal};
use valentine_core::snap::{SnapMotion, SnapPolicy};
use valentine_core::timers::TimerQueue;

fn recorder(signal: &ProgressSignal) -> Rc<RefCell<Vec<f32>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    signal.subscribe(move |p| s.borrow_mut().push(p));
    seen
}

#[test]
fn span_maps_scroll_to_progress() {
    let span = SectionSpan::new(1000.0, 500.0);
    assert_eq!(span.progress_at(900.0), 0.0);
    assert_eq!(span.progress_at(1250.0), 0.5);
    assert_eq!(span.progress_at(2000.0), 1.0);
    assert_eq!(span.scroll_for(0.5), 1250.0);
    assert_eq!(span.scroll_for(3.0), 1500.0);
    assert!(span.contains(1000.0) && span.contains(1500.0));
    assert!(!span.contains(999.0));

    let empty = SectionSpan::new(100.0, 0.0);
    assert_eq!(empty.progress_at(99.0), 0.0);
    assert_eq!(empty.progress_at(100.0), 1.0);
}

#[test]
fn snap_policy_picks_the_nearer_boundary() {
    let policy = SnapPolicy::default();
    assert_eq!(policy.target(0.3), Some(0.0));
    assert_eq!(policy.target(0.7), Some(1.0));
    assert_eq!(policy.target(0.5), Some(1.0));
    assert_eq!(policy.target(0.0), None);
    assert_eq!(policy.target(1.0), None);

    let near = SnapPolicy {
        distance: 0.2,
        ..SnapPolicy::default()
    };
    assert_eq!(near.target(0.3), None);
    assert_eq!(near.target(0.85), Some(1.0));
}

#[test]
fn snap_duration_grows_with_distance() {
    let policy = SnapPolicy::default();
    assert!((policy.duration_for(0.0) - 0.3).abs() < 1e-6);
    assert!((policy.duration_for(0.25) - 0.55).abs() < 1e-6);
    assert!((policy.duration_for(-0.5) - 0.8).abs() < 1e-6);
    assert!((policy.duration_for(2.0) - 0.8).abs() < 1e-6);
}

#[test]
fn snap_motion_eases_onto_the_boundary() {
    let policy = SnapPolicy::default();
    let motion = SnapMotion::begin(&policy, 0.3, 0.0).expect("snaps");
    assert_eq!(motion.to, 0.0);
    assert_eq!(motion.ease, Ease::Power2InOut);
    assert!((motion.duration - 0.6).abs() < 1e-6);
    assert_eq!(motion.progress_at(0.0), 0.3);
    let mid = motion.progress_at(0.3);
    assert!(mid > 0.0 && mid < 0.3, "{mid}");
    assert!(!motion.is_done(0.3));
    assert_eq!(motion.progress_at(1.0), 0.0);
    assert!(motion.is_done(1.0));
}

#[test]
fn unsmoothed_track_follows_scroll_and_emits_on_change() {
    let mut track = ScrollTrack::new("heart", 0.0, None);
    track.set_span(SectionSpan::new(1000.0, 500.0));
    let seen = recorder(track.signal());

    track.on_scroll(1250.0);
    assert_eq!(track.tick(0.0), None);
    track.tick(0.016);
    track.on_scroll(1500.0);
    track.tick(0.032);
    assert_eq!(*seen.borrow(), vec![0.5, 1.0]);
    assert_eq!(track.applied_progress(), 1.0);
    assert_eq!(track.signal().value(), 1.0);
}

#[test]
fn scrub_lags_behind_and_catches_up() {
    let mut track = ScrollTrack::new("intro", 1.5, None);
    track.set_span(SectionSpan::new(0.0, 1000.0));
    track.tick(0.0);
    assert_eq!(track.applied_progress(), 0.0);

    track.on_scroll(1000.0);
    track.tick(0.1);
    let first = track.applied_progress();
    assert!(first > 0.0 && first < 0.1, "{first}");

    let mut last = first;
    let mut now = 0.1;
    for _ in 0..(60 * 30) {
        now += 1.0 / 60.0;
        track.tick(now);
        assert!(track.applied_progress() >= last);
        last = track.applied_progress();
    }
    assert_eq!(last, 1.0);
    assert_eq!(track.raw_progress(), 1.0);
}

#[test]
fn release_snaps_and_drives_the_scroll_offset() {
    let mut track = ScrollTrack::new("heart", 0.0, Some(SnapPolicy::default()));
    track.set_span(SectionSpan::new(0.0, 1000.0));
    track.on_scroll(300.0);
    track.tick(0.0);

    track.on_release(0.0);
    assert!(track.is_snapping());
    let y = track.tick(0.3).expect("snap drives scroll");
    assert!(y > 0.0 && y < 300.0, "{y}");

    // The scroll event the snap itself causes does not cancel it.
    track.on_scroll(y);
    assert!(track.is_snapping());

    assert_eq!(track.tick(1.0), Some(0.0));
    assert!(!track.is_snapping());
    assert_eq!(track.applied_progress(), 0.0);
    assert_eq!(track.tick(1.1), None);
}

#[test]
fn user_input_cancels_a_snap() {
    let mut track = ScrollTrack::new("intro", 0.0, Some(SnapPolicy::default()));
    track.set_span(SectionSpan::new(0.0, 1000.0));
    track.on_scroll(800.0);
    track.on_release(0.0);
    assert!(track.is_snapping());
    track.on_user_input();
    assert!(!track.is_snapping());
    assert_eq!(track.tick(0.2), None);
    assert_eq!(track.applied_progress(), 0.8);
}

#[test]
fn no_snap_at_boundaries_or_without_policy() {
    let mut track = ScrollTrack::new("intro", 0.0, Some(SnapPolicy::default()));
    track.set_span(SectionSpan::new(0.0, 1000.0));
    track.on_scroll(1200.0);
    track.on_release(0.0);
    assert!(!track.is_snapping());

    let mut gallery = ScrollTrack::new("gallery", 1.0, None);
    gallery.set_span(SectionSpan::new(0.0, 1000.0));
    gallery.on_scroll(400.0);
    gallery.on_release(0.0);
    assert!(!gallery.is_snapping());
}

#[test]
fn layout_releases_only_the_pinned_section() {
    let mut layout = PageLayout::new();
    layout.push(ScrollTrack::new("intro", 0.0, Some(SnapPolicy::default())));
    layout.push(ScrollTrack::new("heart", 0.0, Some(SnapPolicy::default())));
    if let Some(t) = layout.track_mut("intro") {
        t.set_span(SectionSpan::new(0.0, 1000.0));
    }
    if let Some(t) = layout.track_mut("heart") {
        t.set_span(SectionSpan::new(2000.0, 1000.0));
    }
    assert_eq!(layout.tracks().len(), 2);

    layout.on_scroll(300.0);
    let heart = layout.track("heart").map(|t| t.raw_progress());
    assert_eq!(heart, Some(0.0));
    layout.on_release(300.0, 0.0);
    assert!(layout.track("intro").is_some_and(|t| t.is_snapping()));
    assert!(layout.track("heart").is_some_and(|t| !t.is_snapping()));

    assert!(layout.tick(0.1).is_some());
    layout.on_user_input();
    assert_eq!(layout.tick(0.2), None);
    assert!(layout.track("missing").is_none());
}

#[test]
fn signal_clamps_and_remembers() {
    let signal = ProgressSignal::new();
    let seen = recorder(&signal);
    signal.emit(1.7);
    signal.emit(-2.0);
    signal.emit(f32::NAN);
    signal.emit(0.25);
    assert_eq!(*seen.borrow(), vec![1.0, 0.0, 0.0, 0.25]);
    assert_eq!(signal.value(), 0.25);
    assert_eq!(signal.clone().value(), 0.25);
}

#[test]
fn listener_removed_mid_emit_sees_that_emit_only() {
    let signal = ProgressSignal::new();
    let victim: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
    let calls = Rc::new(Cell::new(0));

    let (sig, v) = (signal.clone(), victim.clone());
    signal.subscribe(move |_| {
        if let Some(id) = v.take() {
            sig.unsubscribe(id);
        }
    });
    let c = calls.clone();
    victim.set(Some(signal.subscribe(move |_| c.set(c.get() + 1))));
    assert_eq!(signal.listener_count(), 2);

    signal.emit(0.1);
    assert_eq!(calls.get(), 1);
    assert_eq!(signal.listener_count(), 1);
    signal.emit(0.2);
    assert_eq!(calls.get(), 1);
}

#[test]
fn unsubscribe_twice_reports_false() {
    let signal = ProgressSignal::new();
    let id = signal.subscribe(|_| {});
    assert!(signal.unsubscribe(id));
    assert!(!signal.unsubscribe(id));
    assert_eq!(signal.listener_count(), 0);
}

#[test]
fn timers_fire_in_due_order() {
    let mut q = TimerQueue::new();
    q.once(0.0, 0.7, "right");
    q.once(0.0, 0.4, "left");
    let drizzle = q.every(0.0, 0.25, 1.0, "drizzle");
    assert_eq!(q.len(), 3);

    assert!(q.advance(0.1).is_empty());
    assert_eq!(q.advance(0.5), vec!["drizzle", "left", "drizzle"]);
    assert_eq!(q.advance(1.0), vec!["right", "drizzle", "drizzle"]);
    assert!(q.is_empty());
    assert!(!q.cancel(drizzle));
}

#[test]
fn cancelled_and_cleared_timers_never_fire() {
    let mut q = TimerQueue::new();
    let a = q.once(0.0, 1.0, 1);
    q.once(0.0, 2.0, 2);
    assert!(q.cancel(a));
    assert_eq!(q.advance(5.0), vec![2]);

    q.every(5.0, 0.5, 10.0, 3);
    q.clear();
    assert!(q.advance(20.0).is_empty());
}
