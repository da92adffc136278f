//! Running counts over distinct card exposures, per shoe.
//!
//! Four systems are maintained side by side. Each card identity is counted
//! at most `num_decks` times per shoe, once per physical copy believed to
//! exist, so a card sitting on the table for hundreds of frames moves the
//! counts exactly once. Wong Halves is kept in half-points internally so
//! the running value is exact; accessors expose it as a float.

use serde::Serialize;

use crate::cards::{Card, CARD_COUNT};

/// The counting systems tracked per shoe.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum System {
    HiLo,
    OmegaII,
    WongHalves,
    ZenCount,
}

pub fn all_systems() -> [System; 4] {
    [
        System::HiLo,
        System::OmegaII,
        System::WongHalves,
        System::ZenCount,
    ]
}

#[derive(Debug, Clone)]
pub struct CountingSystems {
    num_decks: u8,
    seen: [u8; CARD_COUNT],
    hi_lo: i32,
    omega_ii: i32,
    zen_count: i32,
    // half-points: +1 here means +0.5 on the table
    wong_halves: i32,
}

impl CountingSystems {
    pub fn new(num_decks: u8) -> Self {
        Self {
            num_decks,
            seen: [0; CARD_COUNT],
            hi_lo: 0,
            omega_ii: 0,
            zen_count: 0,
            wong_halves: 0,
        }
    }

    pub fn num_decks(&self) -> u8 {
        self.num_decks
    }

    pub fn times_seen(&self, card: Card) -> u8 {
        self.seen[card.index()]
    }

    /// Counts one exposure of `card`. Returns false (and changes nothing)
    /// when every physical copy in the shoe has already been counted.
    pub fn count_card(&mut self, card: Card) -> bool {
        let slot = &mut self.seen[card.index()];
        if *slot >= self.num_decks {
            return false;
        }
        *slot += 1;

        let v = card.value();
        self.hi_lo += match v {
            2..=6 => 1,
            10 | 11 => -1,
            _ => 0,
        };
        self.omega_ii += match v {
            2 | 3 | 7 => 1,
            4..=6 => 2,
            9 => -1,
            10 => -2,
            _ => 0,
        };
        self.wong_halves += match v {
            2 | 7 => 1,
            3 | 4 | 6 => 2,
            5 => 3,
            9 => -1,
            10 | 11 => -2,
            _ => 0,
        };
        self.zen_count += match v {
            2 | 3 | 7 => 1,
            4..=6 => 2,
            10 => -2,
            11 => -1,
            _ => 0,
        };
        true
    }

    /// The running count; Wong Halves carries half-point resolution.
    pub fn running(&self, system: System) -> f64 {
        match system {
            System::HiLo => self.hi_lo as f64,
            System::OmegaII => self.omega_ii as f64,
            System::WongHalves => self.wong_halves as f64 / 2.0,
            System::ZenCount => self.zen_count as f64,
        }
    }

    /// Running count normalized by the caller's estimate of decks left in
    /// the shoe.
    pub fn true_count(&self, system: System, decks_remaining: f64) -> f64 {
        self.running(system) / decks_remaining
    }

    /// Simple bet scaling: never below the minimum bet, otherwise the true
    /// count.
    pub fn bet_multiplier(&self, system: System, decks_remaining: f64) -> f64 {
        self.true_count(system, decks_remaining).max(1.0)
    }

    /// New shoe: clears every counter and the occurrence map.
    pub fn reset(&mut self) {
        *self = Self::new(self.num_decks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::all_cards;

    fn card(label: &str) -> Card {
        label.parse().unwrap()
    }

    #[test]
    fn low_cards_raise_high_cards_lower_hi_lo() {
        let mut counts = CountingSystems::new(1);
        counts.count_card(card("2H"));
        counts.count_card(card("6D"));
        assert_eq!(counts.running(System::HiLo), 2.0);
        counts.count_card(card("KS"));
        counts.count_card(card("AC"));
        assert_eq!(counts.running(System::HiLo), 0.0);
    }

    #[test]
    fn wong_halves_keeps_half_point_resolution() {
        let mut counts = CountingSystems::new(1);
        counts.count_card(card("2H"));
        assert_eq!(counts.running(System::WongHalves), 0.5);
        counts.count_card(card("5C"));
        assert_eq!(counts.running(System::WongHalves), 2.0);
        counts.count_card(card("AD"));
        assert_eq!(counts.running(System::WongHalves), 1.0);
    }

    #[test]
    fn single_deck_never_double_counts_an_identity() {
        let mut counts = CountingSystems::new(1);
        assert!(counts.count_card(card("5H")));
        assert!(!counts.count_card(card("5H")));
        assert_eq!(counts.running(System::HiLo), 1.0);
        assert_eq!(counts.times_seen(card("5H")), 1);
    }

    #[test]
    fn multi_deck_counts_each_physical_copy() {
        let mut counts = CountingSystems::new(2);
        assert!(counts.count_card(card("5H")));
        assert!(counts.count_card(card("5H")));
        assert!(!counts.count_card(card("5H")));
        assert_eq!(counts.running(System::HiLo), 2.0);
    }

    #[test]
    fn all_systems_balance_over_a_full_deck() {
        let mut counts = CountingSystems::new(1);
        for c in all_cards() {
            assert!(counts.count_card(c));
        }
        for system in all_systems() {
            assert_eq!(counts.running(system), 0.0, "{system:?}");
        }
    }

    #[test]
    fn true_count_divides_by_decks_remaining() {
        let mut counts = CountingSystems::new(6);
        for label in ["2H", "3D", "4S", "5C"] {
            counts.count_card(card(label));
        }
        assert_eq!(counts.true_count(System::HiLo, 2.0), 2.0);
        assert_eq!(counts.bet_multiplier(System::HiLo, 2.0), 2.0);
        // a negative shoe still bets the table minimum
        counts.reset();
        counts.count_card(card("KH"));
        assert_eq!(counts.bet_multiplier(System::HiLo, 1.0), 1.0);
    }

    #[test]
    fn reset_clears_counters_and_occurrences() {
        let mut counts = CountingSystems::new(1);
        counts.count_card(card("5H"));
        counts.count_card(card("KD"));
        counts.reset();
        for system in all_systems() {
            assert_eq!(counts.running(system), 0.0);
        }
        assert_eq!(counts.times_seen(card("5H")), 0);
        assert!(counts.count_card(card("5H")));
    }
}
