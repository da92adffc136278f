//! Sliding-window evidence buffer over all 52 card identities.
//!
//! Every update appends one sample per identity (the frame's sighting or an
//! explicit [`SlotSample::Absent`]), evicting the oldest once a slot holds
//! `buffer_size` entries. A card only yields a location once it has stopped
//! moving and has been seen in enough recent frames; single-frame noise
//! never reaches the round model directly.

use std::collections::VecDeque;

use crate::cards::{Card, CARD_COUNT};
use crate::frame::{FrameMap, Point};

/// One window entry. Absence is a real sample, not a missing value:
/// "never seen lately" and "seen but jumping around" must stay
/// distinguishable.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotSample {
    Seen(Point),
    Absent,
}

/// Minimum non-absent samples for a slot to count as occupied at all.
const OCCUPIED_MIN_SAMPLES: usize = 2;

#[derive(Debug)]
pub struct StabilityBuffer {
    capacity: usize,
    min_stable_samples: usize,
    slots: [VecDeque<SlotSample>; CARD_COUNT],
}

impl StabilityBuffer {
    /// `capacity` is the window length; `min_stable_fraction` of it (rounded
    /// up, at least one) is how many sightings a stable reading requires.
    pub fn new(capacity: usize, min_stable_fraction: f32) -> Self {
        let min_stable_samples = ((capacity as f32 * min_stable_fraction).ceil() as usize).max(1);
        Self {
            capacity,
            min_stable_samples,
            slots: std::array::from_fn(|_| VecDeque::with_capacity(capacity)),
        }
    }

    /// Appends one frame of evidence to every slot, strict FIFO.
    pub fn push(&mut self, frame: &FrameMap) {
        for (slot, sighting) in self.slots.iter_mut().zip(frame.iter()) {
            if slot.len() >= self.capacity {
                slot.pop_front();
            }
            slot.push_back(match sighting {
                Some(s) => SlotSample::Seen(s.location),
                None => SlotSample::Absent,
            });
        }
    }

    /// The card's resting location, if it has one.
    ///
    /// Walks the window in temporal order keeping a running mean; any
    /// sighting further than `moving_threshold` from the mean so far means
    /// the card is still moving. Too few sightings means there is not
    /// enough evidence yet. Both cases are `None`; callers never need to
    /// tell them apart.
    pub fn stable_location(&self, card: Card, moving_threshold: f32) -> Option<Point> {
        let mut mean: Option<Point> = None;
        let mut count = 0usize;
        for sample in &self.slots[card.index()] {
            let loc = match sample {
                SlotSample::Seen(loc) => *loc,
                SlotSample::Absent => continue,
            };
            mean = Some(match mean {
                None => loc,
                Some(m) => {
                    if loc.distance(m) > moving_threshold {
                        return None;
                    }
                    // incremental mean over the sightings folded so far
                    let n = count as f32;
                    Point::new(
                        (m.x * n + loc.x) / (n + 1.0),
                        (m.y * n + loc.y) / (n + 1.0),
                    )
                }
            });
            count += 1;
        }
        if count >= self.min_stable_samples {
            mean
        } else {
            None
        }
    }

    /// Every identity that currently has a stable location, in identity
    /// index order.
    pub fn stable_locations(&self, moving_threshold: f32) -> Vec<(Card, Point)> {
        crate::cards::all_cards()
            .filter_map(|card| {
                self.stable_location(card, moving_threshold)
                    .map(|loc| (card, loc))
            })
            .collect()
    }

    /// True when nothing has been reliably seen recently: no identity has
    /// even [`OCCUPIED_MIN_SAMPLES`] sightings left in its window.
    pub fn is_table_empty(&self) -> bool {
        self.slots.iter().all(|slot| {
            slot.iter()
                .filter(|s| matches!(s, SlotSample::Seen(_)))
                .count()
                < OCCUPIED_MIN_SAMPLES
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Sighting;

    const EMPTY: FrameMap = [None; CARD_COUNT];

    fn frame_with(entries: &[(Card, Point)]) -> FrameMap {
        let mut frame = EMPTY;
        for &(card, location) in entries {
            frame[card.index()] = Some(Sighting {
                location,
                card,
                confidence: 0.9,
            });
        }
        frame
    }

    #[test]
    fn repeated_identical_sightings_become_stable_at_that_location() {
        let card: Card = "7S".parse().unwrap();
        let loc = Point::new(300.0, 420.0);
        let mut buffer = StabilityBuffer::new(10, 0.4);
        for _ in 0..10 {
            buffer.push(&frame_with(&[(card, loc)]));
        }
        assert_eq!(buffer.stable_location(card, 50.0), Some(loc));
    }

    #[test]
    fn a_jumping_card_is_not_stable() {
        let card: Card = "QH".parse().unwrap();
        let mut buffer = StabilityBuffer::new(10, 0.4);
        for i in 0..10 {
            let loc = Point::new(100.0 * i as f32, 50.0);
            buffer.push(&frame_with(&[(card, loc)]));
        }
        assert_eq!(buffer.stable_location(card, 50.0), None);
    }

    #[test]
    fn small_jitter_stays_stable() {
        let card: Card = "2C".parse().unwrap();
        let mut buffer = StabilityBuffer::new(8, 0.4);
        for i in 0..8 {
            let loc = Point::new(200.0 + (i % 2) as f32 * 3.0, 400.0);
            buffer.push(&frame_with(&[(card, loc)]));
        }
        assert!(buffer.stable_location(card, 50.0).is_some());
    }

    #[test]
    fn too_few_sightings_is_not_stable() {
        let card: Card = "9D".parse().unwrap();
        let loc = Point::new(10.0, 10.0);
        let mut buffer = StabilityBuffer::new(10, 0.4);
        // 3 sightings out of a window of 10 is below the 40% floor.
        for _ in 0..3 {
            buffer.push(&frame_with(&[(card, loc)]));
        }
        for _ in 0..7 {
            buffer.push(&EMPTY);
        }
        assert_eq!(buffer.stable_location(card, 50.0), None);
    }

    #[test]
    fn window_capacity_is_never_exceeded() {
        let card: Card = "AS".parse().unwrap();
        let mut buffer = StabilityBuffer::new(4, 0.4);
        for _ in 0..20 {
            buffer.push(&frame_with(&[(card, Point::new(1.0, 1.0))]));
        }
        assert_eq!(buffer.slots[card.index()].len(), 4);
    }

    #[test]
    fn empty_frames_eventually_empty_the_table() {
        let card: Card = "KC".parse().unwrap();
        let mut buffer = StabilityBuffer::new(6, 0.4);
        for _ in 0..6 {
            buffer.push(&frame_with(&[(card, Point::new(5.0, 5.0))]));
        }
        assert!(!buffer.is_table_empty());
        for _ in 0..6 {
            buffer.push(&EMPTY);
        }
        assert!(buffer.is_table_empty());
    }

    #[test]
    fn fresh_buffer_is_empty() {
        let buffer = StabilityBuffer::new(6, 0.4);
        assert!(buffer.is_table_empty());
    }
}
