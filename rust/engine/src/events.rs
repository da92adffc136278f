//! Diagnostic events emitted while digesting frames.
//!
//! Anomalies in the detection stream (unmergeable duplicates, piles of
//! impossible sizes, singletons with no matching hand) are never fatal; the
//! engine resolves them conservatively and records what happened here. Phase
//! changes travel the same channel since they are the round-level signal a
//! host cares about. Events queue up inside the engine and are handed over
//! via [`Engine::drain_events`](crate::engine::Engine::drain_events); each is
//! mirrored onto the `tracing` log as it is recorded.

use serde::Serialize;

use crate::cards::Card;
use crate::cluster::Seat;
use crate::engine::Phase;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Event {
    /// The round advanced (or reset) to a new phase.
    PhaseChanged { from: Phase, to: Phase },
    /// Duplicate detections of one identity stayed further apart than the
    /// same-card threshold; all but the first candidate were dropped.
    AmbiguousDuplicates { card: Card, dropped: usize },
    /// A deal-phase pile did not have the size its seat requires
    /// (two cards per player, one for the dealer).
    UnexpectedDealCluster { seat: Seat, cards: Vec<Card> },
    /// A lone card appeared at a seat without ever passing through a deal.
    /// It is inserted as a new hand, but flagged: under normal round flow
    /// singletons only arise from splits.
    OrphanSingleton { seat: Seat, card: Card },
}

/// Accumulates events between updates; the host drains at its own pace.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: Event) {
        match &event {
            Event::PhaseChanged { from, to } => {
                tracing::info!(?from, ?to, "phase change");
            }
            other => {
                tracing::warn!(event = ?other, "detection anomaly");
            }
        }
        self.events.push(event);
    }

    /// Events recorded since the last drain, oldest first.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn pending(&self) -> &[Event] {
        &self.events
    }
}
