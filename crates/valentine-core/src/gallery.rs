//! Horizontal photo track driven by vertical scroll.

use crate::constants::{
    CAPTION_END, CAPTION_START, CARD_ENTER_END, CARD_ENTER_START, FRAME_GLOW_END,
    FRAME_GLOW_START, ORB_PARALLAX_BASE, ORB_PARALLAX_STEP,
};
use crate::ease::{inverse_lerp, lerp, Ease};
use crate::props::{Property, PropertySet, Rgba};

/// Fill shown for a gallery card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CardFill {
    Image(&'static str),
    /// Top-left to bottom-right gradient, used when the image fails to load.
    Gradient(Rgba, Rgba),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Photo {
    pub src: &'static str,
    pub caption: &'static str,
    pub fallback: ([u8; 3], [u8; 3]),
}

impl Photo {
    /// Accessible text for photo `index` (zero-based).
    pub fn alt_text(&self, index: usize) -> String {
        if self.caption.is_empty() {
            format!("Foto {}", index + 1)
        } else {
            self.caption.to_string()
        }
    }

    pub fn fill(&self, loaded: bool) -> CardFill {
        if loaded {
            CardFill::Image(self.src)
        } else {
            let (a, b) = self.fallback;
            CardFill::Gradient(Rgba::from_rgb8(a, 1.0), Rgba::from_rgb8(b, 1.0))
        }
    }
}

pub const PHOTOS: [Photo; 6] = [
    Photo {
        src: "/IMG_7711.jpg",
        caption: "",
        fallback: ([0x58, 0x1c, 0x87], [0xbe, 0x18, 0x5d]),
    },
    Photo {
        src: "/IMG_7979.jpg",
        caption: "",
        fallback: ([0x4c, 0x1d, 0x95], [0x7c, 0x3a, 0xed]),
    },
    Photo {
        src: "/IMG_8294.jpg",
        caption: "",
        fallback: ([0x70, 0x1a, 0x75], [0xa8, 0x55, 0xf7]),
    },
    Photo {
        src: "/IMG_8530.jpg",
        caption: "",
        fallback: ([0x3b, 0x07, 0x64], [0xc0, 0x26, 0xd3]),
    },
    Photo {
        src: "/IMG_8564.jpg",
        caption: "",
        fallback: ([0x4c, 0x1d, 0x95], [0x93, 0x33, 0xea]),
    },
    Photo {
        src: "/85AB0C4E-3325-463C-94E7-3B96950B6EF1.jpg",
        caption: "",
        fallback: ([0x58, 0x1c, 0x87], [0xd9, 0x46, 0xef]),
    },
];

/// Entrance state of one card and its parts.
#[derive(Clone, Debug, PartialEq)]
pub struct CardEntrance {
    pub card: PropertySet,
    pub frame: PropertySet,
    pub caption: PropertySet,
}

const FRAME_IDLE: Rgba = Rgba::new(1.0, 1.0, 1.0, 0.05);
const FRAME_LIT: Rgba = Rgba::new(192.0 / 255.0, 132.0 / 255.0, 252.0 / 255.0, 0.5);

/// Track geometry measured from layout. Card positions are relative to the
/// track's left edge; `rest_left` is where that edge sits with no offset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GalleryTrack {
    track_width: f32,
    viewport_width: f32,
    rest_left: f32,
    cards: Vec<f32>,
}

impl GalleryTrack {
    pub fn new(track_width: f32, viewport_width: f32) -> Self {
        Self {
            track_width,
            viewport_width,
            ..Self::default()
        }
    }

    pub fn with_cards(mut self, rest_left: f32, card_lefts: Vec<f32>) -> Self {
        self.rest_left = rest_left;
        self.cards = card_lefts;
        self
    }

    /// Re-measure after a layout change.
    pub fn resize(&mut self, track_width: f32, viewport_width: f32) {
        self.track_width = track_width;
        self.viewport_width = viewport_width;
    }

    pub fn set_cards(&mut self, rest_left: f32, card_lefts: Vec<f32>) {
        self.rest_left = rest_left;
        self.cards = card_lefts;
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// How far the track travels over the whole section. Never negative.
    pub fn scroll_amount(&self) -> f32 {
        (self.track_width - self.viewport_width).max(0.0)
    }

    /// Horizontal translation of the track at progress `p`.
    pub fn offset(&self, p: f32) -> f32 {
        -p.clamp(0.0, 1.0) * self.scroll_amount()
    }

    /// Background orb `i` moves slower than the track.
    pub fn orb_offset(&self, i: usize, p: f32) -> f32 {
        self.offset(p) * (ORB_PARALLAX_BASE + i as f32 * ORB_PARALLAX_STEP)
    }

    /// Left edge of card `i` in viewport space at progress `p`.
    pub fn card_left(&self, i: usize, p: f32) -> Option<f32> {
        self.cards
            .get(i)
            .map(|left| self.rest_left + left + self.offset(p))
    }

    /// Entrance of card `i` as its left edge crosses the thresholds.
    pub fn card_entrance(&self, i: usize, p: f32) -> Option<CardEntrance> {
        let x = self.card_left(i, p)?;
        let vw = self.viewport_width;
        let through = |start: f32, end: f32| {
            Ease::Power1Out.apply(inverse_lerp(start * vw, end * vw, x))
        };

        let k = through(CARD_ENTER_START, CARD_ENTER_END);
        let card = PropertySet::new()
            .with(Property::Opacity, k)
            .with(Property::Scale, lerp(0.82, 1.0, k))
            .with(Property::Y, lerp(50.0, 0.0, k));

        let g = through(FRAME_GLOW_START, FRAME_GLOW_END);
        let frame = PropertySet::new()
            .with(Property::BorderColor, FRAME_IDLE.lerp(FRAME_LIT, g))
            .with(Property::Glow, g);

        let c = through(CAPTION_START, CAPTION_END);
        let caption = PropertySet::new()
            .with(Property::Opacity, c)
            .with(Property::Y, lerp(15.0, 0.0, c));

        Some(CardEntrance {
            card,
            frame,
            caption,
        })
    }
}
