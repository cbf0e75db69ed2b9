// Host-side tests for acceptance and the celebration sequence.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use valentine_core::animator::Animator;
use valentine_core::celebration::{AcceptanceFlag, Celebration, CelebrationNodes, CelebrationParams};
use valentine_core::host::{NodeId, Viewport};
use valentine_core::props::Property;
use valentine_core::retained::RetainedScene;

struct Fixture {
    host: RetainedScene,
    anim: Animator,
    celebration: Celebration,
    question: NodeId,
    decline: NodeId,
    message: NodeId,
}

fn fixture() -> Fixture {
    let mut host = RetainedScene::new(Viewport::new(1024.0, 768.0));
    let question = host.add("question", None, None);
    let decline = host.add("decline", None, None);
    let message = host.add("message", None, None);
    let nodes = CelebrationNodes {
        question: Some(question),
        decline: Some(decline),
        message: Some(message),
    };
    let celebration = Celebration::new(nodes, CelebrationParams::default(), StdRng::seed_from_u64(5));
    let mut anim = Animator::new();
    celebration.prepare(&mut anim, &mut host);
    Fixture {
        host,
        anim,
        celebration,
        question,
        decline,
        message,
    }
}

#[test]
fn flag_raises_exactly_once() {
    let flag = AcceptanceFlag::new();
    let watch = flag.watch();
    assert!(!watch.is_accepted());
    assert!(flag.raise());
    assert!(!flag.raise());
    assert!(flag.is_raised());
    assert!(watch.clone().is_accepted());
}

#[test]
fn message_starts_hidden() {
    let f = fixture();
    assert_eq!(f.host.scalar(f.message, Property::AutoAlpha), Some(0.0));
    assert_eq!(f.host.scalar(f.message, Property::Y), Some(40.0));
    assert!(!f.celebration.is_accepted());
    assert_eq!(f.celebration.pending_timers(), 0);
}

#[test]
fn second_accept_is_a_no_op() {
    let mut f = fixture();
    assert!(f.celebration.accept(0.0, &mut f.host, &mut f.anim));
    let timers = f.celebration.pending_timers();
    let tracks = f.anim.active_tracks();

    assert!(!f.celebration.accept(0.1, &mut f.host, &mut f.anim));
    assert!(!f.celebration.accept(0.2, &mut f.host, &mut f.anim));
    assert_eq!(f.host.bursts.len(), 1);
    assert_eq!(f.celebration.pending_timers(), timers);
    assert_eq!(f.anim.active_tracks(), tracks);
    assert!(f.celebration.watch().is_accepted());
}

#[test]
fn bursts_follow_the_schedule() {
    let mut f = fixture();
    f.celebration.accept(0.0, &mut f.host, &mut f.anim);
    assert_eq!(f.host.bursts.len(), 1);
    let primary = &f.host.bursts[0];
    assert_eq!(primary.particle_count, 150);
    assert_eq!(primary.spread, 120.0);
    assert_eq!(primary.origin, Vec2::new(0.5, 0.6));

    f.celebration.tick(0.2, &mut f.host);
    assert_eq!(f.host.bursts.len(), 1);

    // Left side plus the first drizzle at +0.25.
    f.celebration.tick(0.4, &mut f.host);
    assert_eq!(f.host.bursts.len(), 3);
    let left = f.host.bursts.iter().find(|b| b.particle_count == 80);
    assert_eq!(left.map(|b| b.angle), Some(60.0));

    f.celebration.tick(0.7, &mut f.host);
    assert_eq!(f.host.bursts.len(), 5);
    let sides: Vec<f32> = f
        .host
        .bursts
        .iter()
        .filter(|b| b.particle_count == 80)
        .map(|b| b.origin.x)
        .collect();
    assert_eq!(sides, vec![0.15, 0.85]);

    f.celebration.tick(3.0, &mut f.host);
    assert_eq!(f.celebration.pending_timers(), 0);
    let drizzle: Vec<_> = f
        .host
        .bursts
        .iter()
        .filter(|b| b.particle_count == 15)
        .collect();
    assert_eq!(drizzle.len(), 12);
    for b in drizzle {
        assert!((0.0..1.0).contains(&b.origin.x));
        assert!((0.0..0.4).contains(&b.origin.y));
        assert_eq!(b.spread, 60.0);
    }

    f.celebration.tick(20.0, &mut f.host);
    assert_eq!(f.host.bursts.len(), 15);
}

#[test]
fn a_late_frame_catches_up_every_burst() {
    let mut f = fixture();
    f.celebration.accept(0.0, &mut f.host, &mut f.anim);
    f.celebration.tick(5.0, &mut f.host);
    assert_eq!(f.host.bursts.len(), 15);
    assert_eq!(f.celebration.pending_timers(), 0);
}

#[test]
fn question_and_decline_fade_then_message_appears() {
    let mut f = fixture();
    f.celebration.accept(0.0, &mut f.host, &mut f.anim);

    f.anim.tick(0.5, &mut f.host);
    // The message waits for its delay.
    assert_eq!(f.host.scalar(f.message, Property::AutoAlpha), Some(0.0));
    assert_eq!(f.host.scalar(f.decline, Property::Scale), Some(0.0));

    f.anim.tick(2.0, &mut f.host);
    assert_eq!(f.host.scalar(f.question, Property::Opacity), Some(0.0));
    assert_eq!(f.host.scalar(f.question, Property::Blur), Some(12.0));
    let alpha = f.host.scalar(f.message, Property::AutoAlpha).unwrap_or(0.0);
    assert!((alpha - 1.0).abs() < 1e-5);
    let y = f.host.scalar(f.message, Property::Y).unwrap_or(99.0);
    assert!(y.abs() < 1e-4);
    assert_eq!(f.anim.active_tracks(), 0);
}

#[test]
fn teardown_drops_pending_bursts_but_stays_accepted() {
    let mut f = fixture();
    f.celebration.accept(0.0, &mut f.host, &mut f.anim);
    f.celebration.teardown();
    assert_eq!(f.celebration.pending_timers(), 0);
    f.celebration.tick(4.0, &mut f.host);
    assert_eq!(f.host.bursts.len(), 1);
    assert!(f.celebration.is_accepted());
}

#[test]
fn absent_elements_do_not_block_the_celebration() {
    let mut host = RetainedScene::new(Viewport::new(390.0, 844.0));
    let mut anim = Animator::new();
    let mut celebration = Celebration::new(
        CelebrationNodes::default(),
        CelebrationParams::default(),
        StdRng::seed_from_u64(0),
    );
    celebration.prepare(&mut anim, &mut host);
    assert!(celebration.accept(0.0, &mut host, &mut anim));
    assert_eq!(anim.active_tracks(), 0);
    celebration.tick(3.0, &mut host);
    assert_eq!(host.bursts.len(), 15);
}
