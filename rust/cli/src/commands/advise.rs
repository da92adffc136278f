//! Advise command handler: basic-strategy lookup for one hand.

use std::io::Write;

use tablesight_engine::cards::Card;
use tablesight_engine::player::Hand;
use tablesight_engine::strategy::{hand_action, sum_cards};

use crate::error::CliError;

/// Resolves the textbook action for a hand against a dealer up-card and
/// prints the hand total alongside it.
pub fn handle_advise_command(hand: &str, dealer: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_hand(hand)?;
    let dealer_up: Card = dealer
        .trim()
        .parse()
        .map_err(|e| CliError::InvalidInput(format!("dealer card: {e}")))?;

    let hand = Hand::with_cards(cards);
    let (total, is_soft) = sum_cards(hand.cards());
    let action = hand_action(&hand, dealer_up);

    let labels: Vec<String> = hand.cards().iter().map(Card::to_string).collect();
    let softness = if is_soft { "soft" } else { "hard" };
    writeln!(out, "Hand: {} ({} {})", labels.join(" "), softness, total)?;
    writeln!(out, "Dealer: {}", dealer_up)?;
    writeln!(out, "Action: {} ({})", action.code(), action)?;
    Ok(())
}

fn parse_hand(hand: &str) -> Result<Vec<Card>, CliError> {
    let cards: Vec<Card> = hand
        .split(',')
        .map(|label| label.trim().parse())
        .collect::<Result<_, _>>()
        .map_err(|e| CliError::InvalidInput(format!("hand: {e}")))?;
    if cards.is_empty() {
        return Err(CliError::InvalidInput("hand must contain at least one card".into()));
    }
    Ok(cards)
}
