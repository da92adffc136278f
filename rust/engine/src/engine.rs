//! Round orchestration: one `update` per frame, gated by the phase machine.
//!
//! Every update runs the same front half (aggregate the frame, push it
//! into the stability buffer) and then lets the current phase decide what
//! the stable evidence means. Facts only ever enter the round model here;
//! a frame that does not resolve cleanly leaves the model untouched until
//! a later one does.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::buffer::StabilityBuffer;
use crate::cards::Card;
use crate::cluster::{cluster_locations, Quadrant, Seat, SeatMap};
use crate::counting::CountingSystems;
use crate::errors::EngineError;
use crate::events::{Event, EventLog};
use crate::frame::{self, FrameDocument, Observation, Point};
use crate::player::{Dealer, Hand, Player};
use crate::tracker;

/// The phase of the round in progress.
///
/// Only three transitions exist: Shuffle→Deal when the first card is
/// reliably seen, Deal→Turn once the full deal is stable on the table,
/// and Turn→Shuffle when the table empties (round over or abandoned).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum Phase {
    Shuffle,
    Deal,
    Turn,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Shuffle => "Shuffle",
            Phase::Deal => "Deal",
            Phase::Turn => "Turn",
        };
        f.write_str(name)
    }
}

/// Constructor-time tuning. Distances are in pixels of the configured
/// frame; the defaults are calibrated for a 1920×1080 table camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Frame dimensions (width, height); quadrant midlines derive from it.
    pub frame_size: (u32, u32),
    pub num_players: usize,
    /// Stability window length in frames.
    pub buffer_size: usize,
    /// Two detections of one identity closer than this are one card.
    pub thresh_same_card: f32,
    /// A sighting farther than this from the window mean means movement.
    pub thresh_card_moving: f32,
    /// Stable locations closer than this to a pile's centroid join it.
    pub thresh_card_cluster: f32,
    /// Fraction of the window that must hold sightings before a location
    /// is trusted.
    pub min_stable_fraction: f32,
    pub num_decks: u8,
    pub minimum_bet: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_size: (1920, 1080),
            num_players: 2,
            buffer_size: 20,
            thresh_same_card: 250.0,
            thresh_card_moving: 50.0,
            thresh_card_cluster: 150.0,
            min_stable_fraction: 0.4,
            num_decks: 1,
            minimum_bet: 1,
        }
    }
}

impl EngineConfig {
    fn validate(&self) -> Result<(), EngineError> {
        if !(1..=2).contains(&self.num_players) {
            return Err(EngineError::UnsupportedPlayerCount(self.num_players));
        }
        if self.frame_size.0 == 0 || self.frame_size.1 == 0 {
            return Err(EngineError::InvalidConfig("frame_size must be non-zero".into()));
        }
        if self.buffer_size == 0 {
            return Err(EngineError::InvalidConfig("buffer_size must be at least 1".into()));
        }
        if !(self.min_stable_fraction > 0.0 && self.min_stable_fraction <= 1.0) {
            return Err(EngineError::InvalidConfig(
                "min_stable_fraction must be in (0, 1]".into(),
            ));
        }
        for (name, value) in [
            ("thresh_same_card", self.thresh_same_card),
            ("thresh_card_moving", self.thresh_card_moving),
            ("thresh_card_cluster", self.thresh_card_cluster),
        ] {
            if !(value > 0.0) {
                return Err(EngineError::InvalidConfig(format!(
                    "{name} must be positive"
                )));
            }
        }
        if self.num_decks == 0 {
            return Err(EngineError::InvalidConfig("num_decks must be at least 1".into()));
        }
        Ok(())
    }
}

/// The detection-to-game-state pipeline behind a single `update` call.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    buffer: StabilityBuffer,
    seats: SeatMap,
    players: Vec<Player>,
    dealer: Dealer,
    counts: CountingSystems,
    phase: Phase,
    events: EventLog,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let buffer = StabilityBuffer::new(config.buffer_size, config.min_stable_fraction);
        let players = (0..config.num_players)
            .map(|_| Player::new(config.minimum_bet))
            .collect();
        Ok(Self {
            buffer,
            seats: SeatMap::new(config.num_players),
            players,
            dealer: Dealer::new(),
            counts: CountingSystems::new(config.num_decks),
            phase: Phase::Shuffle,
            events: EventLog::new(),
            config,
        })
    }

    /// Digests one frame's detections. Returns the phase after the update.
    ///
    /// Rejecting a frame (unknown label, bad confidence) leaves all round
    /// state exactly as it was.
    pub fn update(&mut self, observations: &[Observation]) -> Result<Phase, EngineError> {
        let frame = frame::aggregate(observations, self.config.thresh_same_card, &mut self.events)?;
        self.buffer.push(&frame);

        match self.phase {
            Phase::Shuffle => {
                if !self.buffer.is_table_empty() {
                    self.set_phase(Phase::Deal);
                }
            }
            Phase::Deal => {
                let stable = self.buffer.stable_locations(self.config.thresh_card_moving);
                if stable.len() == 2 * self.players.len() + 1 {
                    self.place_deal(&stable);
                    self.set_phase(Phase::Turn);
                }
            }
            Phase::Turn => {
                if self.buffer.is_table_empty() {
                    self.reset_round();
                } else {
                    let stable = self.buffer.stable_locations(self.config.thresh_card_moving);
                    self.track_turn(&stable);
                }
            }
        }
        Ok(self.phase)
    }

    /// Convenience entry point for a raw detector JSON document.
    pub fn update_document(&mut self, json: &str) -> Result<Phase, EngineError> {
        let doc: FrameDocument = json.parse()?;
        self.update(&doc.predictions)
    }

    /// Initial placement: two-card piles become player hands, the single
    /// one-card pile becomes the dealer's. Piles that do not fit their
    /// seat's expectation are flagged and skipped.
    fn place_deal(&mut self, stable: &[(Card, Point)]) {
        let clusters = cluster_locations(stable, self.config.thresh_card_cluster);
        for cluster in &clusters {
            let seat = self
                .seats
                .seat_for(Quadrant::of(cluster.centroid(), self.config.frame_size));
            let cards = cluster.cards();
            match (seat, cards.len()) {
                (Seat::Player(i), 2) => {
                    self.players[i].add_hand(Hand::with_cards(cards.clone()));
                    self.count_cards(&cards);
                }
                (Seat::Dealer, 1) => {
                    self.dealer.seat_mut().add_hand(Hand::with_cards(cards.clone()));
                    self.count_cards(&cards);
                }
                _ => self.events.record(Event::UnexpectedDealCluster { seat, cards }),
            }
        }
    }

    /// Turn-phase bookkeeping: fold every resolved pile into its seat's
    /// hands and count whatever newly entered play.
    fn track_turn(&mut self, stable: &[(Card, Point)]) {
        let clusters = cluster_locations(stable, self.config.thresh_card_cluster);
        for cluster in &clusters {
            let seat = self
                .seats
                .seat_for(Quadrant::of(cluster.centroid(), self.config.frame_size));
            let cards = cluster.cards();
            let added = match seat {
                Seat::Player(i) => {
                    tracker::reconcile(seat, &mut self.players[i], &cards, true, &mut self.events)
                }
                Seat::Dealer => tracker::reconcile(
                    seat,
                    self.dealer.seat_mut(),
                    &cards,
                    false,
                    &mut self.events,
                ),
            };
            self.count_cards(&added);
        }
    }

    fn count_cards(&mut self, cards: &[Card]) {
        for &card in cards {
            self.counts.count_card(card);
        }
    }

    /// Clears every hand and returns to Shuffle. Counts persist: the shoe
    /// outlives the round.
    fn reset_round(&mut self) {
        for player in &mut self.players {
            player.reset_hands();
        }
        self.dealer.reset_hand();
        self.set_phase(Phase::Shuffle);
    }

    fn set_phase(&mut self, to: Phase) {
        if to != self.phase {
            self.events.record(Event::PhaseChanged {
                from: self.phase,
                to,
            });
            self.phase = to;
        }
    }

    /// Explicit new shoe: clears the counting state only.
    pub fn new_shoe(&mut self) {
        self.counts.reset();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Panics on an out-of-range seat index.
    pub fn player(&self, index: usize) -> &Player {
        assert!(
            index < self.players.len(),
            "player index {index} out of range for {} seat(s)",
            self.players.len()
        );
        &self.players[index]
    }

    pub fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    pub fn counts(&self) -> &CountingSystems {
        &self.counts
    }

    /// Diagnostic events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain()
    }
}
