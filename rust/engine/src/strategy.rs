//! Textbook basic strategy: a pure lookup from hand + dealer up-card to
//! the action a strategy card would print.
//!
//! The resolver reports what the tables say and nothing else; whether a
//! double, split or surrender is actually permitted at the table is the
//! caller's problem. It is queried on demand by the host, never by the
//! engine's own update cycle.

use std::fmt;

use serde::Serialize;

use crate::cards::Card;
use crate::player::{Hand, Player};

/// Action codes used by the strategy tables, plus the two terminal hand
/// outcomes. `SoftBust` is unreachable when ace demotion is correct and
/// only exists to make that defect loud instead of silent.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum Action {
    Hit,
    Stand,
    DoubleOrHit,
    DoubleOrStand,
    SurrenderOrHit,
    SurrenderOrStand,
    Split,
    SplitOrHit,
    SplitOrDouble,
    Bust,
    Blackjack,
    SoftBust,
}

impl Action {
    /// Compact strategy-card notation.
    pub fn code(self) -> &'static str {
        match self {
            Action::Hit => "H",
            Action::Stand => "S",
            Action::DoubleOrHit => "DH",
            Action::DoubleOrStand => "DS",
            Action::SurrenderOrHit => "RH",
            Action::SurrenderOrStand => "RS",
            Action::Split => "P",
            Action::SplitOrHit => "PH",
            Action::SplitOrDouble => "PD",
            Action::Bust => "BUST",
            Action::Blackjack => "BJ",
            Action::SoftBust => "ERR",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Action::Hit => "Hit",
            Action::Stand => "Stand",
            Action::DoubleOrHit => "Double down if permitted, else Hit",
            Action::DoubleOrStand => "Double down if permitted, else Stand",
            Action::SurrenderOrHit => "Surrender if permitted, else Hit",
            Action::SurrenderOrStand => "Surrender if permitted, else Stand",
            Action::Split => "Split",
            Action::SplitOrHit => "Split if double down permitted, else Hit",
            Action::SplitOrDouble => "Split if double down permitted, else Double down",
            Action::Bust => "Bust",
            Action::Blackjack => "Blackjack",
            Action::SoftBust => "Error: soft hand over 21",
        };
        f.write_str(text)
    }
}

use Action::{
    DoubleOrHit as DH, DoubleOrStand as DS, Hit as H, Split as P, SplitOrDouble as PD,
    SplitOrHit as PH, Stand as S, SurrenderOrHit as RH, SurrenderOrStand as RS,
};

// Columns: dealer up-card 2..=10, then Ace.
// Rows: player totals 7-or-less through 17-or-more; clamped at both ends.
const HARD: [[Action; 10]; 11] = [
    [H, H, H, H, H, H, H, H, H, H],      // 7 or less
    [H, H, H, DH, DH, H, H, H, H, H],    // 8
    [DH, DH, DH, DH, DH, DH, H, H, H, H], // 9
    [DH, DH, DH, DH, DH, DH, DH, DH, H, H], // 10
    [DH, DH, DH, DH, DH, DH, DH, DH, DH, DH], // 11
    [H, H, S, S, S, H, H, H, H, H],      // 12
    [S, S, S, S, S, H, H, H, H, H],      // 13
    [S, S, S, S, S, H, H, H, H, H],      // 14
    [S, S, S, S, S, H, H, H, H, H],      // 15
    [S, S, S, S, S, H, H, H, RH, RH],    // 16
    [S, S, S, S, S, S, S, S, S, S],      // 17 or more
];

// Rows: soft totals 13 through 21; totals below 13 clamp to the 13 row.
const SOFT: [[Action; 10]; 9] = [
    [H, H, DH, DH, DH, H, H, H, H, H],   // 13
    [H, H, DH, DH, DH, H, H, H, H, H],   // 14
    [H, H, DH, DH, DH, H, H, H, H, H],   // 15
    [H, H, DH, DH, DH, H, H, H, H, H],   // 16
    [DH, DH, DH, DH, DH, H, H, H, H, H], // 17
    [S, DS, DS, DS, DS, S, S, H, H, S],  // 18
    [S, S, S, S, DS, S, S, S, S, S],     // 19
    [S, S, S, S, S, S, S, S, S, S],      // 20
    [S, S, S, S, S, S, S, S, S, S],      // 21
];

// Rows: paired rank value 2,2 through 10,10, then A,A.
const PAIRS: [[Action; 10]; 10] = [
    [PH, P, P, P, P, P, H, H, H, H],     // 2,2
    [PH, PH, P, P, P, P, PH, H, H, H],   // 3,3
    [H, H, PH, PD, PD, H, H, H, H, H],   // 4,4
    [DH, DH, DH, DH, DH, DH, DH, DH, H, H], // 5,5
    [P, P, P, P, P, PH, H, H, H, H],     // 6,6
    [P, P, P, P, P, P, PH, H, RS, H],    // 7,7
    [P, P, P, P, P, P, P, P, P, P],      // 8,8
    [P, P, P, P, P, S, P, P, S, S],      // 9,9
    [S, S, S, S, S, S, S, S, S, S],      // 10,10
    [P, P, P, P, P, P, P, P, P, P],      // A,A
];

/// Totals a hand, returning `(total, is_soft)`.
///
/// Each Ace counts as 11 unless that would bust; whenever the running total
/// exceeds 21 with an Ace still counted high, one such Ace is demoted to 1.
/// `is_soft` is true iff an Ace remains counted as 11 in the final total.
pub fn sum_cards(cards: &[Card]) -> (u8, bool) {
    let mut total: u8 = 0;
    let mut high_aces: u8 = 0;
    for card in cards {
        let v = card.value();
        if v == 11 && total + 11 > 21 {
            total += 1;
        } else {
            total += v;
            if v == 11 {
                high_aces += 1;
            }
        }
        while total > 21 && high_aces > 0 {
            total -= 10;
            high_aces -= 1;
        }
    }
    (total, high_aces > 0)
}

/// The textbook action for one hand against a dealer up-card.
pub fn hand_action(hand: &Hand, dealer_upcard: Card) -> Action {
    let cards = hand.cards();
    let (total, is_soft) = sum_cards(cards);

    if total > 21 {
        if is_soft {
            tracing::error!(?cards, total, "soft total over 21; ace demotion defect");
            return Action::SoftBust;
        }
        return Action::Bust;
    }
    if cards.len() < 2 {
        return Action::Hit;
    }
    if total == 21 && cards.len() == 2 {
        return Action::Blackjack;
    }

    let dealer_col = (dealer_upcard.value() - 2) as usize;
    if cards.len() == 2 && cards[0].value() == cards[1].value() {
        let row = (cards[0].value() - 2) as usize;
        return PAIRS[row][dealer_col];
    }
    if is_soft {
        let row = (total.max(13) - 13) as usize;
        return SOFT[row][dealer_col];
    }
    let row = (total.clamp(7, 17) - 7) as usize;
    HARD[row][dealer_col]
}

/// One action per hand, in hand order (splits yield several).
pub fn player_actions(player: &Player, dealer_upcard: Card) -> Vec<Action> {
    player
        .hands()
        .iter()
        .map(|hand| hand_action(hand, dealer_upcard))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(label: &str) -> Card {
        label.parse().unwrap()
    }

    fn hand(labels: &[&str]) -> Hand {
        Hand::with_cards(labels.iter().map(|l| card(l)).collect())
    }

    #[test]
    fn hard_twelve_hits_against_a_ten() {
        assert_eq!(hand_action(&hand(&["2H", "10D"]), card("KS")), Action::Hit);
    }

    #[test]
    fn soft_sixteen_hits_against_a_ten() {
        let h = hand(&["5C", "AH"]);
        let (total, soft) = sum_cards(h.cards());
        assert_eq!((total, soft), (16, true));
        assert_eq!(hand_action(&h, card("KS")), Action::Hit);
    }

    #[test]
    fn eights_split_against_a_five() {
        assert_eq!(hand_action(&hand(&["8C", "8D"]), card("5H")), Action::Split);
    }

    #[test]
    fn hard_twenty_five_is_a_bust_and_not_soft() {
        let h = hand(&["10H", "10S", "5C"]);
        let (total, soft) = sum_cards(h.cards());
        assert_eq!(total, 25);
        assert!(!soft);
        assert_eq!(hand_action(&h, card("KS")), Action::Bust);
    }

    #[test]
    fn two_card_twenty_one_is_blackjack() {
        assert_eq!(hand_action(&hand(&["AS", "KD"]), card("6H")), Action::Blackjack);
    }

    #[test]
    fn aces_demote_one_at_a_time() {
        // A + A = soft 12, A + A + 9 = hard 21
        assert_eq!(sum_cards(hand(&["AS", "AD"]).cards()), (12, true));
        assert_eq!(sum_cards(hand(&["AS", "AD", "9C"]).cards()), (21, false));
        // A + 5 = soft 16, A + 5 + 9 = hard 15
        assert_eq!(sum_cards(hand(&["AS", "5D"]).cards()), (16, true));
        assert_eq!(sum_cards(hand(&["AS", "5D", "9C"]).cards()), (15, false));
    }

    #[test]
    fn totals_after_demotion_never_exceed_twenty_one_while_soft() {
        // Exhaustive-ish sweep: any 3-card combination must never report a
        // soft total above 21.
        let labels = ["AS", "AD", "AH", "5C", "9C", "KD", "10H", "6S"];
        for a in labels {
            for b in labels {
                for c in labels {
                    let (total, soft) = sum_cards(hand(&[a, b, c]).cards());
                    if soft {
                        assert!(total <= 21, "{a} {b} {c} -> soft {total}");
                    }
                }
            }
        }
    }

    #[test]
    fn single_card_hand_always_hits() {
        assert_eq!(hand_action(&hand(&["8C"]), card("KS")), Action::Hit);
    }

    #[test]
    fn eleven_doubles_against_everything() {
        for up in ["2C", "7D", "10S", "AH"] {
            assert_eq!(
                hand_action(&hand(&["6H", "5S"]), card(up)),
                Action::DoubleOrHit,
                "vs {up}"
            );
        }
    }

    #[test]
    fn sixteen_surrenders_against_ten_and_ace() {
        assert_eq!(
            hand_action(&hand(&["9C", "7D"]), card("KS")),
            Action::SurrenderOrHit
        );
        assert_eq!(
            hand_action(&hand(&["9C", "7D"]), card("AS")),
            Action::SurrenderOrHit
        );
        assert_eq!(hand_action(&hand(&["9C", "7D"]), card("6S")), Action::Stand);
    }

    #[test]
    fn low_hard_totals_clamp_to_always_hit() {
        assert_eq!(hand_action(&hand(&["2C", "3D"]), card("2H")), Action::Hit);
    }

    #[test]
    fn soft_eighteen_row_matches_the_card() {
        assert_eq!(
            hand_action(&hand(&["AS", "7D"]), card("3C")),
            Action::DoubleOrStand
        );
        assert_eq!(hand_action(&hand(&["AS", "7D"]), card("9C")), Action::Hit);
        assert_eq!(hand_action(&hand(&["AS", "7D"]), card("AC")), Action::Stand);
    }

    #[test]
    fn split_hands_each_get_an_action() {
        let mut player = Player::new(5);
        player.add_hand(hand(&["8C", "3D"]));
        player.add_hand(hand(&["9D", "7C"]));
        let actions = player_actions(&player, card("KS"));
        assert_eq!(actions, vec![Action::DoubleOrHit, Action::SurrenderOrHit]);
    }

    #[test]
    fn action_text_matches_strategy_card_language() {
        assert_eq!(Action::Split.to_string(), "Split");
        assert_eq!(Action::Hit.code(), "H");
        assert_eq!(
            Action::SplitOrDouble.to_string(),
            "Split if double down permitted, else Double down"
        );
    }
}
