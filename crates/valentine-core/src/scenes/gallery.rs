//! Pinned photo gallery scrolled sideways by vertical scroll.

use super::{ids, require};
use crate::constants::SCRUB_TAU_GALLERY_SEC;
use crate::ease::Ease;
use crate::error::SceneResult;
use crate::gallery::GalleryTrack;
use crate::host::{NodeId, SceneHost, Viewport};
use crate::props::{Property, PropertySet};
use crate::sequencer::Scene;
use crate::timeline::Timeline;

#[derive(Clone, Debug)]
struct Card {
    node: NodeId,
    frame: Option<NodeId>,
    caption: Option<NodeId>,
}

#[derive(Debug, Default)]
pub struct GalleryScene {
    track_node: Option<NodeId>,
    cards: Vec<Card>,
    orbs: Vec<NodeId>,
    track: GalleryTrack,
}

impl GalleryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&self) -> &GalleryTrack {
        &self.track
    }

    /// Measure at rest: offsets and entrance transforms are cleared first so
    /// they don't skew the layout reading. The caller re-applies progress.
    fn measure(&mut self, host: &mut dyn SceneHost) {
        let Some(track) = self.track_node else {
            return;
        };
        host.apply(track, &PropertySet::new().with(Property::X, 0.0));
        let rest = PropertySet::new()
            .with(Property::Scale, 1.0)
            .with(Property::Y, 0.0);
        for card in &self.cards {
            host.apply(card.node, &rest);
        }

        let viewport = host.viewport();
        let track_rect = host.rect(track).unwrap_or_default();
        let lefts = self
            .cards
            .iter()
            .map(|c| {
                host.rect(c.node)
                    .map(|r| r.left() - track_rect.left())
                    .unwrap_or(0.0)
            })
            .collect();
        self.track.resize(track_rect.size.x, viewport.width);
        self.track.set_cards(track_rect.left(), lefts);
        log::debug!(
            "[gallery] track {:.0}px, viewport {:.0}px, scroll {:.0}px",
            track_rect.size.x,
            viewport.width,
            self.track.scroll_amount()
        );
    }
}

impl Scene for GalleryScene {
    fn name(&self) -> &'static str {
        "gallery"
    }

    fn mount(&mut self, host: &mut dyn SceneHost) -> SceneResult<()> {
        let name = self.name();
        let section = require(host, name, ids::GALLERY_SECTION)?;
        let track = require(host, name, ids::GALLERY_TRACK)?;
        self.cards = host
            .query_class(Some(track), ids::GALLERY_CARD_CLASS)
            .into_iter()
            .map(|node| Card {
                node,
                frame: host
                    .query_class(Some(node), ids::GALLERY_FRAME_CLASS)
                    .first()
                    .copied(),
                caption: host
                    .query_class(Some(node), ids::GALLERY_CAPTION_CLASS)
                    .first()
                    .copied(),
            })
            .collect();
        self.orbs = host.query_class(Some(section), ids::GALLERY_ORB_CLASS);
        self.track_node = Some(track);
        self.measure(host);
        Ok(())
    }

    fn timeline(&self, _viewport: Viewport) -> Timeline {
        let mut tl = Timeline::new();
        let Some(track) = self.track_node else {
            return tl;
        };
        let x = |v: f32| PropertySet::new().with(Property::X, v);
        tl.set(track, x(0.0))
            .to(track, x(self.track.offset(1.0)), 0.0, 1.0, Ease::Linear);
        for (i, orb) in self.orbs.iter().enumerate() {
            tl.set(*orb, x(0.0))
                .to(*orb, x(self.track.orb_offset(i, 1.0)), 0.0, 1.0, Ease::Linear);
        }
        tl
    }

    fn pin_length(&self, _viewport: Viewport) -> f32 {
        self.track.scroll_amount()
    }

    fn scrub_tau(&self) -> f32 {
        SCRUB_TAU_GALLERY_SEC
    }

    fn on_progress(&mut self, progress: f32, host: &mut dyn SceneHost) {
        for (i, card) in self.cards.iter().enumerate() {
            let Some(entrance) = self.track.card_entrance(i, progress) else {
                continue;
            };
            host.apply(card.node, &entrance.card);
            if let Some(frame) = card.frame {
                host.apply(frame, &entrance.frame);
            }
            if let Some(caption) = card.caption {
                host.apply(caption, &entrance.caption);
            }
        }
    }

    fn resize(&mut self, host: &mut dyn SceneHost) {
        self.measure(host);
    }

    fn teardown(&mut self, _host: &mut dyn SceneHost) {
        self.track_node = None;
        self.cards.clear();
        self.orbs.clear();
    }
}
