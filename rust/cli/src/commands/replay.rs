//! Replay command handler: drives the engine over a recorded frame stream.
//!
//! The input is one detector JSON document per line, exactly as the live
//! pipeline would hand them over. Frames that fail to parse are reported
//! and skipped, since a recording with a few corrupt lines is still worth
//! replaying; phase changes and anomalies stream to stdout as they happen.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};

use chrono::{SecondsFormat, Utc};
use tablesight_engine::cards::Card;
use tablesight_engine::counting::{all_systems, CountingSystems};
use tablesight_engine::engine::Engine;
use tablesight_engine::events::Event;
use tablesight_engine::player::Player;
use tablesight_engine::strategy::sum_cards;

use crate::config::load_config;
use crate::error::CliError;

pub fn handle_replay_command(
    input: &str,
    config: Option<&str>,
    decks_remaining: f64,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if !(decks_remaining > 0.0) {
        return Err(CliError::InvalidInput(
            "decks-remaining must be positive".into(),
        ));
    }
    let config = load_config(config)?;
    let mut engine = Engine::new(config).map_err(|e| CliError::Engine(e.to_string()))?;

    let file = File::open(input)?;
    let mut frames = 0usize;
    let mut skipped = 0usize;
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        frames += 1;
        if let Err(e) = engine.update_document(&line) {
            skipped += 1;
            writeln!(err, "frame {}: skipped: {}", number + 1, e)?;
            continue;
        }
        for event in engine.drain_events() {
            match event {
                Event::PhaseChanged { from, to } => {
                    writeln!(out, "frame {}: phase {} -> {}", number + 1, from, to)?;
                }
                anomaly => {
                    writeln!(out, "frame {}: anomaly: {:?}", number + 1, anomaly)?;
                }
            }
        }
    }

    let ts = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    writeln!(out)?;
    writeln!(
        out,
        "Replayed {} frame(s), {} skipped, at {}",
        frames, skipped, ts
    )?;
    writeln!(out, "Phase: {}", engine.phase())?;
    for (index, player) in engine.players().iter().enumerate() {
        writeln!(out, "Player {}: {}", index, describe_hands(player))?;
    }
    let dealer = match engine.dealer().hand() {
        Some(hand) => describe_cards(hand.cards()),
        None => "-".to_string(),
    };
    writeln!(out, "Dealer: {}", dealer)?;
    write_counts(out, engine.counts(), decks_remaining)?;
    Ok(())
}

fn describe_hands(player: &Player) -> String {
    if player.hands().is_empty() {
        return "-".to_string();
    }
    player
        .hands()
        .iter()
        .map(|hand| {
            let (total, is_soft) = sum_cards(hand.cards());
            let softness = if is_soft { "soft" } else { "hard" };
            format!("[{} ({} {})]", describe_cards(hand.cards()), softness, total)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_counts(
    out: &mut dyn Write,
    counts: &CountingSystems,
    decks_remaining: f64,
) -> Result<(), CliError> {
    writeln!(out, "Counts (decks remaining: {decks_remaining}):")?;
    for system in all_systems() {
        writeln!(
            out,
            "  {:?}: running {:+.1}, true {:+.2}, bet x{:.2}",
            system,
            counts.running(system),
            counts.true_count(system, decks_remaining),
            counts.bet_multiplier(system, decks_remaining),
        )?;
    }
    Ok(())
}
