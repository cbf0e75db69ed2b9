// Host-side tests for the gallery track geometry and photo list.

use valentine_core::gallery::{CardFill, GalleryTrack, PHOTOS};
use valentine_core::props::{Property, Rgba, Value};

#[test]
fn scroll_amount_is_the_overflow() {
    let track = GalleryTrack::new(4000.0, 1024.0);
    assert_eq!(track.scroll_amount(), 2976.0);
    assert_eq!(track.offset(0.0), 0.0);
    assert_eq!(track.offset(1.0), -2976.0);
    assert_eq!(track.offset(0.5), -1488.0);
    assert_eq!(track.offset(1.5), -2976.0);
    assert_eq!(track.offset(-1.0), 0.0);
}

#[test]
fn track_narrower_than_viewport_does_not_move() {
    let track = GalleryTrack::new(800.0, 1024.0);
    assert_eq!(track.scroll_amount(), 0.0);
    assert_eq!(track.offset(1.0), 0.0);
}

#[test]
fn resize_recomputes_the_distance() {
    let mut track = GalleryTrack::new(4000.0, 1024.0);
    track.resize(4000.0, 1440.0);
    assert_eq!(track.scroll_amount(), 2560.0);
    assert_eq!(track.viewport_width(), 1440.0);
    assert_eq!(track.offset(1.0), -2560.0);
}

#[test]
fn orbs_drift_slower_than_the_track() {
    let track = GalleryTrack::new(4000.0, 1000.0);
    assert!((track.orb_offset(0, 1.0) + 450.0).abs() < 1e-2);
    assert!((track.orb_offset(2, 1.0) + 930.0).abs() < 1e-2);
    assert!(track.orb_offset(3, 1.0).abs() < track.offset(1.0).abs());
}

fn scalar(set: &valentine_core::props::PropertySet, prop: Property) -> f32 {
    set.scalar(prop).unwrap_or(f32::NAN)
}

#[test]
fn card_entrance_follows_its_left_edge() {
    // One card whose left edge starts at the viewport's right edge.
    let track = GalleryTrack::new(2000.0, 1000.0).with_cards(0.0, vec![1000.0]);
    assert_eq!(track.card_count(), 1);
    assert_eq!(track.card_left(0, 0.0), Some(1000.0));
    assert!(track.card_entrance(1, 0.0).is_none());

    let hidden = track.card_entrance(0, 0.0).expect("card 0");
    assert_eq!(scalar(&hidden.card, Property::Opacity), 0.0);
    assert!((scalar(&hidden.card, Property::Scale) - 0.82).abs() < 1e-6);
    assert_eq!(scalar(&hidden.card, Property::Y), 50.0);
    assert_eq!(scalar(&hidden.caption, Property::Y), 15.0);
    assert_eq!(scalar(&hidden.frame, Property::Glow), 0.0);
    assert_eq!(
        hidden.frame.get(Property::BorderColor),
        Some(Value::Color(Rgba::new(1.0, 1.0, 1.0, 0.05)))
    );

    // Left edge at 95% of the viewport: just starting.
    let p = 0.05;
    let edge = track.card_entrance(0, p).expect("card 0");
    assert!(scalar(&edge.card, Property::Opacity) < 1e-4);

    // Left edge at 77.5%: halfway through the linear range, past it once eased.
    let mid = track.card_entrance(0, 0.225).expect("card 0");
    let k = scalar(&mid.card, Property::Opacity);
    assert!((k - 0.75).abs() < 1e-4, "eased opacity {k}");
    assert_eq!(scalar(&mid.caption, Property::Opacity), 0.0);

    // Left edge at 40%: card and frame done, caption done.
    let done = track.card_entrance(0, 0.6).expect("card 0");
    assert_eq!(scalar(&done.card, Property::Opacity), 1.0);
    assert!((scalar(&done.card, Property::Scale) - 1.0).abs() < 1e-6);
    assert_eq!(scalar(&done.card, Property::Y), 0.0);
    assert_eq!(scalar(&done.caption, Property::Opacity), 1.0);
    let g = scalar(&done.frame, Property::Glow);
    assert!((g - 0.99).abs() < 1e-4, "glow {g}");
}

#[test]
fn rest_left_shifts_every_card() {
    let track = GalleryTrack::new(3000.0, 1000.0).with_cards(120.0, vec![0.0, 900.0]);
    assert_eq!(track.card_left(0, 0.0), Some(120.0));
    assert_eq!(track.card_left(1, 1.0), Some(120.0 + 900.0 - 2000.0));
}

#[test]
fn photos_fall_back_to_gradients() {
    assert_eq!(PHOTOS.len(), 6);
    for (i, photo) in PHOTOS.iter().enumerate() {
        assert!(photo.src.ends_with(".jpg"));
        assert_eq!(photo.fill(true), CardFill::Image(photo.src));
        let CardFill::Gradient(a, b) = photo.fill(false) else {
            panic!("photo {i} has no fallback gradient");
        };
        assert_eq!(a.a, 1.0);
        assert_ne!(a, b);
        assert_eq!(photo.alt_text(i), format!("Foto {}", i + 1));
    }
}
