use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

/// Represents the rank of a playing card from Two through Ace.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Blackjack value of the rank: face cards are 10, the Ace is 11
    /// (callers demote soft Aces to 1 during hand totaling).
    pub fn value(self) -> u8 {
        match self {
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
            r => r as u8,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

/// A single playing card identity: rank plus suit.
///
/// Identities are immutable and double as the key space of every
/// per-card structure in the pipeline via [`Card::index`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

/// Number of distinct card identities (the full key space).
pub const CARD_COUNT: usize = 52;

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Blackjack value of the card (face = 10, Ace = 11).
    pub fn value(self) -> u8 {
        self.rank.value()
    }

    /// Dense index in `0..CARD_COUNT`, stable across runs.
    /// Replaces string-keyed lookups everywhere a per-identity slot exists.
    pub fn index(self) -> usize {
        self.suit as usize * 13 + (self.rank as usize - 2)
    }

    /// Inverse of [`Card::index`].
    pub fn from_index(index: usize) -> Card {
        assert!(index < CARD_COUNT, "card index out of range: {index}");
        let suit = match index / 13 {
            0 => Suit::Clubs,
            1 => Suit::Diamonds,
            2 => Suit::Hearts,
            _ => Suit::Spades,
        };
        Card::new(rank_from_value((index % 13) as u8 + 2), suit)
    }
}

fn rank_from_value(v: u8) -> Rank {
    match v {
        2 => Rank::Two,
        3 => Rank::Three,
        4 => Rank::Four,
        5 => Rank::Five,
        6 => Rank::Six,
        7 => Rank::Seven,
        8 => Rank::Eight,
        9 => Rank::Nine,
        10 => Rank::Ten,
        11 => Rank::Jack,
        12 => Rank::Queen,
        13 => Rank::King,
        _ => Rank::Ace,
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

/// All 52 identities in [`Card::index`] order.
pub fn all_cards() -> impl Iterator<Item = Card> {
    all_suits()
        .into_iter()
        .flat_map(|suit| all_ranks().into_iter().map(move |rank| Card::new(rank, suit)))
}

impl FromStr for Card {
    type Err = EngineError;

    /// Parses a detector class label such as `"10H"`, `"AS"` or `"7C"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || EngineError::UnknownLabel(s.to_string());
        if s.len() < 2 || !s.is_ascii() {
            return Err(unknown());
        }
        let (rank_part, suit_part) = s.split_at(s.len() - 1);
        let rank = match rank_part {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(unknown()),
        };
        let suit = match suit_part {
            "C" => Suit::Clubs,
            "D" => Suit::Diamonds,
            "H" => Suit::Hearts,
            "S" => Suit::Spades,
            _ => return Err(unknown()),
        };
        Ok(Card::new(rank, suit))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };
        write!(f, "{c}")
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_detector_labels() {
        let ten: Card = "10H".parse().unwrap();
        assert_eq!(ten, Card::new(Rank::Ten, Suit::Hearts));
        let ace: Card = "AS".parse().unwrap();
        assert_eq!(ace, Card::new(Rank::Ace, Suit::Spades));
        let seven: Card = "7C".parse().unwrap();
        assert_eq!(seven, Card::new(Rank::Seven, Suit::Clubs));
    }

    #[test]
    fn rejects_unknown_labels() {
        assert!("".parse::<Card>().is_err());
        assert!("X".parse::<Card>().is_err());
        assert!("11H".parse::<Card>().is_err());
        assert!("10X".parse::<Card>().is_err());
    }

    #[test]
    fn face_cards_are_ten_ace_is_eleven() {
        assert_eq!(Card::new(Rank::King, Suit::Spades).value(), 10);
        assert_eq!(Card::new(Rank::Jack, Suit::Clubs).value(), 10);
        assert_eq!(Card::new(Rank::Ace, Suit::Hearts).value(), 11);
        assert_eq!(Card::new(Rank::Six, Suit::Diamonds).value(), 6);
    }

    #[test]
    fn index_round_trips_all_identities() {
        for (i, card) in all_cards().enumerate() {
            assert_eq!(card.index(), i);
            assert_eq!(Card::from_index(i), card);
        }
    }

    #[test]
    fn display_matches_detector_labels() {
        for card in all_cards() {
            let round: Card = card.to_string().parse().unwrap();
            assert_eq!(round, card);
        }
    }
}
