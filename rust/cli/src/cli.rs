//! Command-line surface of the `holdem` binary.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "No-limit Texas Hold'em engine: simulate tables, deal hands, analyse histories"
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved configuration and where each value came from
    Cfg,
    /// Deal one hand from a seeded deck and show every hole card and the board
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=10))]
        players: Option<u8>,
    },
    /// Play a session at one table of AI seats and record every hand as JSONL
    Sim {
        #[arg(long)]
        hands: u64,
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=10))]
        players: Option<u8>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        output: Option<String>,
        /// Policy per seat, repeated for each seat; cycles when fewer than the seats
        #[arg(long = "ai")]
        ai: Vec<String>,
        #[arg(long)]
        stack: Option<u32>,
    },
    /// Aggregate per-player statistics from JSONL hand records
    Stats {
        #[arg(long)]
        input: String,
    },
    /// Play two policies heads-up and compare results
    Eval {
        #[arg(long = "ai-a")]
        ai_a: String,
        #[arg(long = "ai-b")]
        ai_b: String,
        #[arg(long)]
        hands: u32,
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Commands {
    pub const NAMES: [&'static str; 5] = ["cfg", "deal", "sim", "stats", "eval"];
}
