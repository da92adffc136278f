//! Per-frame input records and duplicate aggregation.
//!
//! The upstream detector emits one document per video frame:
//! `{"predictions": [{x, y, width, height, class, confidence}, ...]}`.
//! This module parses that contract and reduces each frame to at most one
//! [`Sighting`] per card identity, merging detections of the same physical
//! card that the model reported twice.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::cards::{Card, CARD_COUNT};
use crate::errors::EngineError;
use crate::events::{Event, EventLog};

/// A 2D location in frame coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// One raw detection: bounding box, class label, confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(rename = "class")]
    pub label: String,
    pub confidence: f32,
}

/// The per-frame document shape produced by the detector.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrameDocument {
    #[serde(default)]
    pub predictions: Vec<Observation>,
}

impl FromStr for FrameDocument {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(|e| EngineError::MalformedFrame(e.to_string()))
    }
}

/// An observation reduced to what the pipeline tracks: where a card
/// identity was seen and how confidently. The location is the bounding
/// box's top-left corner; every distance threshold downstream is
/// calibrated against that convention, not the centroid.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Sighting {
    pub location: Point,
    pub card: Card,
    pub confidence: f32,
}

impl Sighting {
    /// Pairwise merge of two detections of the same physical card.
    fn merge(self, other: Sighting) -> Sighting {
        Sighting {
            location: self.location.midpoint(other.location),
            card: self.card,
            confidence: (self.confidence + other.confidence) / 2.0,
        }
    }
}

/// One frame's evidence, at most one sighting per identity, indexed by
/// [`Card::index`].
pub type FrameMap = [Option<Sighting>; CARD_COUNT];

/// Reduces a frame's raw observations to at most one sighting per identity.
///
/// Same-identity detections within `thresh_same_card` of each other are
/// merged pairwise in list order, averaging location and confidence; the
/// merged list is rebuilt after every merge until no pair qualifies.
/// Duplicates that stay apart are an anomaly: all but the first candidate
/// are dropped and an [`Event::AmbiguousDuplicates`] is recorded.
///
/// Unknown class labels and out-of-range confidences reject the whole
/// frame; bad input is the producer's bug, not table evidence.
pub fn aggregate(
    observations: &[Observation],
    thresh_same_card: f32,
    events: &mut EventLog,
) -> Result<FrameMap, EngineError> {
    let mut candidates: [Vec<Sighting>; CARD_COUNT] = std::array::from_fn(|_| Vec::new());
    for obs in observations {
        if !(0.0..=1.0).contains(&obs.confidence) {
            return Err(EngineError::ConfidenceOutOfRange(obs.confidence));
        }
        let card: Card = obs.label.parse()?;
        candidates[card.index()].push(Sighting {
            location: Point::new(obs.x, obs.y),
            card,
            confidence: obs.confidence,
        });
    }

    let mut frame: FrameMap = [None; CARD_COUNT];
    for (index, mut sightings) in candidates.into_iter().enumerate() {
        if sightings.is_empty() {
            continue;
        }
        while let Some((i, j)) = first_mergeable_pair(&sightings, thresh_same_card) {
            let merged = sightings[i].merge(sightings[j]);
            // Rebuild rather than mutate in place: the merged sighting takes
            // slot i, slot j disappears.
            sightings = sightings
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != i && k != j)
                .map(|(_, s)| *s)
                .collect();
            sightings.insert(i.min(sightings.len()), merged);
        }
        if sightings.len() > 1 {
            events.record(Event::AmbiguousDuplicates {
                card: Card::from_index(index),
                dropped: sightings.len() - 1,
            });
        }
        frame[index] = Some(sightings[0]);
    }
    Ok(frame)
}

fn first_mergeable_pair(sightings: &[Sighting], threshold: f32) -> Option<(usize, usize)> {
    for i in 0..sightings.len() {
        for j in (i + 1)..sightings.len() {
            if sightings[i].location.distance(sightings[j].location) < threshold {
                return Some((i, j));
            }
        }
    }
    None
}
