// Host-side tests for the evasive decline button.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use valentine_core::animator::Animator;
use valentine_core::celebration::AcceptanceFlag;
use valentine_core::constants::{DECLINE_LABELS, HAPTIC_PULSE_MS};
use valentine_core::evasive::{random_position, EvasiveParams, EvasiveTarget, Phase, Proximity};
use valentine_core::host::{NodeId, Rect, SceneHost, Viewport};
use valentine_core::props::Property;
use valentine_core::retained::RetainedScene;

const BUTTON: Rect = Rect {
    origin: Vec2::new(100.0, 400.0),
    size: Vec2::new(120.0, 48.0),
};

struct Fixture {
    host: RetainedScene,
    anim: Animator,
    flag: AcceptanceFlag,
    target: EvasiveTarget,
    decline: NodeId,
    accept: NodeId,
}

fn fixture(viewport: Viewport, params: EvasiveParams) -> Fixture {
    let mut host = RetainedScene::new(viewport).with_haptics(true);
    let decline = host.add("decline", None, Some(BUTTON));
    host.set_text_content(decline, DECLINE_LABELS[0]);
    let accept = host.add("accept", None, Some(Rect::new(100.0, 300.0, 120.0, 48.0)));
    let flag = AcceptanceFlag::new();
    let target = EvasiveTarget::new(
        params,
        Some(decline),
        Some(accept),
        flag.watch(),
        StdRng::seed_from_u64(7),
    );
    Fixture {
        host,
        anim: Animator::new(),
        flag,
        target,
        decline,
        accept,
    }
}

fn phone() -> Fixture {
    fixture(Viewport::new(390.0, 844.0), EvasiveParams::default())
}

impl Fixture {
    fn trigger(&mut self, p: Proximity, now: f64) -> bool {
        self.target
            .on_proximity(p, now, &mut self.host, &mut self.anim)
            .escaped
    }

    fn settle(&mut self, now: f64) {
        self.anim.tick(now, &mut self.host);
    }
}

#[test]
fn starts_idle_with_the_first_label() {
    let f = phone();
    assert_eq!(f.target.phase(), Phase::Idle);
    assert_eq!(f.target.state().attempt_count, 0);
    assert_eq!(f.target.state().growth_factor, 1.0);
    assert_eq!(f.target.label(), DECLINE_LABELS[0]);
    assert!(f.target.position().is_none());
}

#[test]
fn five_touches_on_a_phone() {
    let mut f = phone();
    for i in 0..5 {
        let res = f
            .target
            .on_proximity(Proximity::TouchStart, i as f64, &mut f.host, &mut f.anim);
        assert!(res.escaped);
        assert!(res.prevent_default, "touch must not click through");
        f.settle(i as f64 + 0.9);

        let attempt = i + 1;
        assert_eq!(f.target.state().attempt_count, attempt);
        assert_eq!(f.host.text(f.decline), Some(DECLINE_LABELS[attempt as usize]));

        let left = f.host.scalar(f.decline, Property::Left).unwrap_or(-1.0);
        let top = f.host.scalar(f.decline, Property::Top).unwrap_or(-1.0);
        assert!((24.0..=246.0).contains(&left), "left {left} after touch {attempt}");
        assert!((24.0..=772.0).contains(&top), "top {top} after touch {attempt}");
    }

    assert_eq!(f.target.phase(), Phase::Escaped);
    assert_eq!(f.target.label(), "Jajaja no");
    assert!((f.target.state().growth_factor - 1.5).abs() < 1e-4);
    let scale = f.host.scalar(f.accept, Property::Scale).unwrap_or(0.0);
    assert!((scale - 1.5).abs() < 1e-4, "accept scale {scale}");
    assert_eq!(f.host.vibrations, vec![HAPTIC_PULSE_MS; 5]);
}

#[test]
fn first_escape_pins_the_button_where_it_was() {
    let mut f = phone();
    assert!(f.trigger(Proximity::PointerEnter, 0.0));
    let node = f.host.node(f.decline).cloned().unwrap_or_default();
    assert_eq!(node.pinned, Some(BUTTON.origin));
    // The relocation tween starts from the pinned spot, not from the corner.
    assert!(f.anim.is_animating(f.decline, Property::Left));
    f.settle(0.0);
    assert_eq!(f.host.scalar(f.decline, Property::Left), Some(100.0));
    assert_eq!(f.host.scalar(f.decline, Property::Top), Some(400.0));
}

#[test]
fn attempts_and_growth_never_decrease() {
    let params = EvasiveParams {
        max_growth: 1.25,
        ..EvasiveParams::default()
    };
    let mut f = fixture(Viewport::new(1280.0, 800.0), params);
    let mut last = f.target.state();
    for i in 0..30 {
        f.trigger(Proximity::TouchStart, i as f64 * 0.5);
        let s = f.target.state();
        assert!(s.attempt_count > last.attempt_count);
        assert!(s.label_index >= last.label_index);
        assert!(s.growth_factor >= last.growth_factor);
        assert!(s.growth_factor <= 1.25 + 1e-6);
        last = s;
    }
    assert_eq!(last.label_index, DECLINE_LABELS.len() - 1);
    assert_eq!(f.target.label(), "Dale que sí");
    assert!((last.growth_factor - 1.25).abs() < 1e-6);
}

#[test]
fn nothing_moves_after_acceptance() {
    let mut f = phone();
    f.trigger(Proximity::TouchStart, 0.0);
    f.settle(1.0);
    let before = f.target.state();
    let text = f.host.text(f.decline).map(str::to_owned);
    let left = f.host.scalar(f.decline, Property::Left);

    assert!(f.flag.raise());
    assert_eq!(f.target.phase(), Phase::Accepted);

    let res = f
        .target
        .on_proximity(Proximity::TouchStart, 2.0, &mut f.host, &mut f.anim);
    assert!(!res.escaped);
    assert!(res.prevent_default);
    let res = f
        .target
        .on_proximity(Proximity::PointerEnter, 2.0, &mut f.host, &mut f.anim);
    assert!(!res.escaped);
    assert!(!res.prevent_default);

    f.settle(3.0);
    assert_eq!(f.target.state(), before);
    assert_eq!(f.host.text(f.decline).map(str::to_owned), text);
    assert_eq!(f.host.scalar(f.decline, Property::Left), left);
    assert_eq!(f.host.vibrations.len(), 1);
}

#[test]
fn pointer_move_triggers_only_on_entering() {
    let mut f = phone();
    let outside = Proximity::PointerMove(Vec2::new(10.0, 10.0));
    let inside = Proximity::PointerMove(Vec2::new(150.0, 420.0));

    assert!(!f.trigger(outside, 0.0));
    assert!(f.trigger(inside, 0.1));
    assert!(!f.trigger(Proximity::PointerMove(Vec2::new(160.0, 425.0)), 0.2));
    assert!(!f.trigger(outside, 0.3));
    assert!(f.trigger(inside, 0.4));
    assert_eq!(f.target.state().attempt_count, 2);
}

#[test]
fn enter_followed_by_move_counts_once() {
    let mut f = phone();
    assert!(f.trigger(Proximity::PointerEnter, 0.0));
    assert!(!f.trigger(Proximity::PointerMove(Vec2::new(150.0, 420.0)), 0.0));
    assert_eq!(f.target.state().attempt_count, 1);
}

#[test]
fn missing_decline_button_still_grows_accept() {
    let mut host = RetainedScene::new(Viewport::new(390.0, 844.0));
    let accept = host.add("accept", None, Some(Rect::new(0.0, 0.0, 100.0, 40.0)));
    let flag = AcceptanceFlag::new();
    let mut target = EvasiveTarget::new(
        EvasiveParams::default(),
        None,
        Some(accept),
        flag.watch(),
        StdRng::seed_from_u64(1),
    );
    let mut anim = Animator::new();

    let moved = target.on_proximity(
        Proximity::PointerMove(Vec2::new(5.0, 5.0)),
        0.0,
        &mut host,
        &mut anim,
    );
    assert!(!moved.escaped);

    assert!(target.on_proximity(Proximity::TouchStart, 0.0, &mut host, &mut anim).escaped);
    assert_eq!(target.state().attempt_count, 1);
    assert!(target.position().is_none());
    anim.tick(1.0, &mut host);
    let scale = host.scalar(accept, Property::Scale).unwrap_or(0.0);
    assert!((scale - 1.1).abs() < 1e-4);
}

#[test]
fn degenerate_viewport_skips_relocation() {
    let mut f = fixture(Viewport::new(0.0, 0.0), EvasiveParams::default());
    assert!(f.trigger(Proximity::TouchStart, 0.0));
    assert_eq!(f.target.position(), Some(BUTTON.origin));
    assert!(!f.anim.is_animating(f.decline, Property::Left));
    assert_eq!(f.target.state().attempt_count, 1);
    assert_eq!(f.host.text(f.decline), Some(DECLINE_LABELS[1]));
}

#[test]
fn random_positions_stay_inside_the_padded_viewport() {
    let mut rng = StdRng::seed_from_u64(42);
    let viewport = Viewport::new(390.0, 844.0);
    let size = Vec2::new(120.0, 48.0);
    for _ in 0..500 {
        let p = random_position(&mut rng, viewport, size, 24.0);
        assert!(p.x >= 24.0 && p.x + size.x <= 390.0 - 24.0 + 1e-3, "{p:?}");
        assert!(p.y >= 24.0 && p.y + size.y <= 844.0 - 24.0 + 1e-3, "{p:?}");
    }
}

#[test]
fn random_position_collapses_onto_padding_when_too_small() {
    let mut rng = StdRng::seed_from_u64(3);
    let p = random_position(&mut rng, Viewport::new(100.0, 100.0), Vec2::new(120.0, 48.0), 24.0);
    assert_eq!(p.x, 24.0);
    assert!((24.0..=28.0).contains(&p.y), "{p:?}");
}

#[test]
fn same_seed_same_path() {
    let run = || {
        let mut f = phone();
        (0..4)
            .map(|i| {
                f.trigger(Proximity::TouchStart, i as f64);
                f.target.position()
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn no_haptics_is_not_an_error() {
    let mut host = RetainedScene::new(Viewport::new(800.0, 600.0));
    let decline = host.add("decline", None, Some(BUTTON));
    let flag = AcceptanceFlag::new();
    let mut target = EvasiveTarget::new(
        EvasiveParams::default(),
        Some(decline),
        None,
        flag.watch(),
        StdRng::seed_from_u64(9),
    );
    let mut anim = Animator::new();
    assert!(target.on_proximity(Proximity::TouchStart, 0.0, &mut host, &mut anim).escaped);
    assert!(host.vibrations.is_empty());
    assert!(host.rect(decline).is_some());
}

#[test]
fn mouse_and_pen_hover_touch_does_not() {
    assert!(Proximity::tracks_hover("mouse"));
    assert!(Proximity::tracks_hover("pen"));
    assert!(!Proximity::tracks_hover("touch"));
}
