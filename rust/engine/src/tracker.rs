//! Reconciles a seat's newly observed pile against its existing hands.
//!
//! There is no authoritative "card was dealt" event anywhere in the input;
//! hits and splits have to be inferred from how a pile differs from what
//! the seat already holds. Reconciliation is incremental and conservative:
//! when a pile cannot be matched this cycle, nothing changes and a later,
//! cleaner frame gets another chance.

use crate::cards::Card;
use crate::cluster::Seat;
use crate::events::{Event, EventLog};
use crate::player::{Hand, Player};

/// Folds one pile into a seat's hands and returns the cards that entered
/// play this cycle (the engine feeds those to the counter).
///
/// `allow_split` is false for the dealer, who keeps a single hand.
pub fn reconcile(
    seat: Seat,
    player: &mut Player,
    pile: &[Card],
    allow_split: bool,
    events: &mut EventLog,
) -> Vec<Card> {
    match pile {
        [] => Vec::new(),
        [card] => reconcile_singleton(seat, player, *card, allow_split, events),
        cards => reconcile_pile(player, cards),
    }
}

fn reconcile_singleton(
    seat: Seat,
    player: &mut Player,
    card: Card,
    allow_split: bool,
    events: &mut EventLog,
) -> Vec<Card> {
    if let Some((hand_index, card_index)) = player.find_card(card) {
        // Already its own single-card hand: the split was picked up on an
        // earlier cycle.
        if player.hand(hand_index).len() == 1 {
            return Vec::new();
        }
        if allow_split {
            player.split_off_card(hand_index, card_index);
        }
        return Vec::new();
    }
    // A lone card with no history at this seat never passed through the
    // two-card deal; insert it anyway, but flagged.
    events.record(Event::OrphanSingleton { seat, card });
    if !allow_split && player.num_hands() > 0 {
        // the dealer keeps a single hand, so the stray joins it
        player.add_card_to_hand(0, card);
    } else {
        player.add_hand(Hand::with_cards(vec![card]));
    }
    vec![card]
}

fn reconcile_pile(player: &mut Player, pile: &[Card]) -> Vec<Card> {
    // The first pile card already held at this seat anchors the match; if
    // the first is absent, any other held card does.
    let Some((hand_index, _)) = pile.iter().find_map(|&c| player.find_card(c)) else {
        // No overlap with any hand yet: wait for a more complete match on a
        // later cycle rather than inventing a hand outside the deal.
        return Vec::new();
    };
    let additions: Vec<Card> = pile
        .iter()
        .copied()
        .filter(|&c| player.find_card(c).is_none())
        .collect();
    for &card in &additions {
        player.add_card_to_hand(hand_index, card);
    }
    additions
}
