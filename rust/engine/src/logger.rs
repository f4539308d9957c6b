use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::HandRank;
use crate::player::{ActionKind, Position};

/// Represents a betting street in Texas Hold'em poker.
/// Defines the four stages of a poker hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
}

impl Street {
    /// Community cards dealt when this street opens.
    pub fn cards_dealt(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }

    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };
        f.write_str(s)
    }
}

/// Records a single player action during a hand.
/// Associates the action with the player and the street when it occurred.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player_id: String,
    /// The betting street when this action occurred
    pub street: Street,
    pub action: ActionKind,
    /// Chips moved from the stack by this action
    pub amount: u32,
    /// Player's street total after the action
    pub to: u32,
    /// Raised the bet to match (bets, raises and raising all-ins)
    #[serde(default)]
    pub aggressive: bool,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Blind {
    Small,
    Big,
}

/// A forced blind post. `amount` is short of the blind when the stack was.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BlindRecord {
    pub player_id: String,
    pub blind: Blind,
    pub amount: u32,
}

/// Seat assignment at the start of the hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatRecord {
    pub seat: usize,
    pub player_id: String,
    pub position: Position,
    pub starting_stack: u32,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PotShare {
    pub player_id: String,
    pub amount: u32,
}

/// One settled pot: size, who could win it, who did.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PotRecord {
    pub amount: u32,
    pub eligible: Vec<String>,
    pub winners: Vec<PotShare>,
    /// Awarded to the single eligible player without evaluation
    #[serde(default)]
    pub uncontested: bool,
}

/// Hole cards and rank shown at showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RevealedHand {
    pub player_id: String,
    pub hole: [Card; 2],
    pub rank: HandRank,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// The player was asked again with the rejection reason attached
    Retry,
    /// The player was folded
    Fold,
}

/// A recoverable decision failure and how the engine resolved it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DecisionEvent {
    pub player_id: String,
    pub street: Street,
    /// `illegal_action`, `malformed_response`, `decision_timeout` or `collaborator_unavailable`
    pub error: String,
    pub detail: String,
    pub fallback: Fallback,
}

/// Complete record of a poker hand including all actions, board cards, and outcome.
/// Serialized to JSONL format for hand history storage and statistics.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN once logged)
    pub hand_id: String,
    /// Zero-based hand number within the table session
    pub hand_no: u64,
    /// RNG seed used for deck shuffling (enables deterministic replay)
    pub seed: Option<u64>,
    pub button: String,
    pub small_blind: u32,
    pub big_blind: u32,
    pub seats: Vec<SeatRecord>,
    pub blinds: Vec<BlindRecord>,
    /// Chronological list of all player decisions
    pub actions: Vec<ActionRecord>,
    /// Community cards on the board (up to 5 cards)
    pub board: Vec<Card>,
    pub pots: Vec<PotRecord>,
    /// Stack change per player; sums to zero
    pub net: BTreeMap<String, i64>,
    /// Revealed hands, present only when the hand reached showdown
    #[serde(default)]
    pub showdown: Option<Vec<RevealedHand>>,
    #[serde(default)]
    pub events: Vec<DecisionEvent>,
    /// Timestamp when the hand was logged (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl HandRecord {
    /// Players who received chips from any pot.
    pub fn winners(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for share in self.pots.iter().flat_map(|p| p.winners.iter()) {
            if !out.contains(&share.player_id.as_str()) {
                out.push(&share.player_id);
            }
        }
        out
    }

    pub fn net_sum(&self) -> i64 {
        self.net.values().sum()
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends hand records to a JSONL file, one record per line.
pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Logger that assigns ids but writes nowhere.
    pub fn detached(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    /// Assigns the next hand id, stamps the time if missing and appends the line.
    /// Returns the record as written.
    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<HandRecord> {
        let mut rec = record.clone();
        rec.hand_id = self.next_id();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(rec)
    }
}
