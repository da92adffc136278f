//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tablesight",
    about = "Blackjack round tracking from recorded card detections"
)]
pub struct TablesightCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a JSONL recording of detector frames through the engine
    Replay {
        /// Path to a file with one detector frame document per line
        #[arg(long)]
        input: String,
        /// Optional TOML file overriding the default engine configuration
        #[arg(long)]
        config: Option<String>,
        /// Decks believed to remain in the shoe, for true-count reporting
        #[arg(long, default_value_t = 1.0)]
        decks_remaining: f64,
    },
    /// Look up the basic-strategy action for a hand against an up-card
    Advise {
        /// Comma-separated card labels, e.g. "8C,8D"
        #[arg(long)]
        hand: String,
        /// Dealer up-card label, e.g. "KS"
        #[arg(long)]
        dealer: String,
    },
    /// Show the effective engine configuration
    Cfg {
        /// Optional TOML file overriding the defaults
        #[arg(long)]
        config: Option<String>,
    },
}
