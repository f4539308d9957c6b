//! `holdem stats`: per-player statistics from JSONL hand records.
//!
//! Reads one file or every `*.jsonl` / `*.jsonl.zst` under a directory.
//! Lines that do not parse are counted and skipped; a final line without a
//! newline is treated as an interrupted write rather than corruption. Any
//! record whose net results do not sum to zero is reported and makes the
//! command fail after the summary has been printed.

use crate::error::CliError;
use crate::io_utils::{collect_history_files, read_text_auto};
use crate::ui;
use holdem_engine::logger::{HandRecord, Street};
use holdem_engine::player::ActionKind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy, Serialize)]
struct PositionStats {
    hands: u64,
    wins: u64,
    win_rate: f64,
}

#[derive(Debug, Default, Clone, Serialize)]
struct PlayerStats {
    hands: u64,
    net: i64,
    /// Share of hands with chips put in voluntarily preflop
    vpip: f64,
    /// Share of hands with a preflop bet or raise
    pfr: f64,
    /// (bets + raises) / calls; absent until the player has called
    af: Option<f64>,
    showdowns: u64,
    wins: u64,
    positions: BTreeMap<String, PositionStats>,
    #[serde(skip)]
    vpip_hands: u64,
    #[serde(skip)]
    pfr_hands: u64,
    #[serde(skip)]
    aggressive: u64,
    #[serde(skip)]
    calls: u64,
}

impl PlayerStats {
    fn finish(&mut self) {
        self.vpip = ratio(self.vpip_hands, self.hands);
        self.pfr = ratio(self.pfr_hands, self.hands);
        self.af = (self.calls > 0).then(|| round3(self.aggressive as f64 / self.calls as f64));
        for pos in self.positions.values_mut() {
            pos.win_rate = ratio(pos.wins, pos.hands);
        }
    }
}

#[derive(Debug, Default)]
struct StatsState {
    hands: u64,
    skipped: u64,
    corrupted: u64,
    violations: Vec<String>,
    players: BTreeMap<String, PlayerStats>,
}

impl StatsState {
    fn add(&mut self, rec: &HandRecord) {
        self.hands += 1;
        if rec.net_sum() != 0 {
            self.violations.push(rec.hand_id.clone());
        }
        for seat in &rec.seats {
            let id = seat.player_id.as_str();
            let net = rec.net.get(id).copied().unwrap_or(0);
            let won = net > 0;
            let preflop = rec
                .actions
                .iter()
                .filter(|a| a.player_id == id && a.street == Street::Preflop);
            let voluntary = preflop.clone().any(|a| {
                matches!(
                    a.action,
                    ActionKind::Call | ActionKind::Bet | ActionKind::Raise | ActionKind::AllIn
                ) && a.amount > 0
            });
            let raised = preflop.clone().any(|a| a.aggressive);

            let stats = self.players.entry(id.to_string()).or_default();
            stats.hands += 1;
            stats.net += net;
            stats.vpip_hands += u64::from(voluntary);
            stats.pfr_hands += u64::from(raised);
            stats.wins += u64::from(won);
            for a in rec.actions.iter().filter(|a| a.player_id == id) {
                if a.aggressive {
                    stats.aggressive += 1;
                } else if a.action == ActionKind::Call
                    || (a.action == ActionKind::AllIn && a.amount > 0)
                {
                    stats.calls += 1;
                }
            }
            if rec
                .showdown
                .as_ref()
                .is_some_and(|shown| shown.iter().any(|h| h.player_id == id))
            {
                stats.showdowns += 1;
            }
            let pos = stats.positions.entry(seat.position.to_string()).or_default();
            pos.hands += 1;
            pos.wins += u64::from(won);
        }
    }

    fn consume(&mut self, content: &str) {
        let has_trailing_nl = content.ends_with('\n');
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        for (i, line) in lines.iter().enumerate() {
            match serde_json::from_str::<HandRecord>(line) {
                Ok(rec) => self.add(&rec),
                Err(_) if i == lines.len() - 1 && !has_trailing_nl => self.skipped += 1,
                Err(_) => self.corrupted += 1,
            }
        }
    }
}

fn ratio(n: u64, d: u64) -> f64 {
    if d == 0 { 0.0 } else { round3(n as f64 / d as f64) }
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

pub fn handle_stats_command(
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let path = Path::new(input);
    let mut state = StatsState::default();

    if path.is_dir() {
        for file in collect_history_files(path) {
            match read_text_auto(&file) {
                Ok(content) => state.consume(&content),
                Err(e) => {
                    ui::display_warning(err, &format!("Failed to read {}: {}", file.display(), e))?;
                    state.corrupted += 1;
                }
            }
        }
    } else {
        match read_text_auto(path) {
            Ok(content) => state.consume(&content),
            Err(e) => {
                ui::write_error(err, &format!("Failed to read {}: {}", input, e))?;
                return Err(CliError::InvalidInput(format!(
                    "Failed to read {}: {}",
                    input, e
                )));
            }
        }
    }

    if state.corrupted > 0 {
        ui::display_warning(
            err,
            &format!("Skipped {} corrupted record(s)", state.corrupted),
        )?;
    }
    if state.skipped > 0 {
        ui::display_warning(
            err,
            &format!("Discarded {} incomplete final line(s)", state.skipped),
        )?;
    }
    if !path.is_dir() && state.hands == 0 && (state.corrupted > 0 || state.skipped > 0) {
        ui::write_error(err, "Invalid record")?;
        return Err(CliError::InvalidInput("Invalid record".to_string()));
    }
    for id in &state.violations {
        ui::write_error(err, &format!("Chip conservation violated at hand {}", id))?;
    }

    for stats in state.players.values_mut() {
        stats.finish();
    }
    let summary = serde_json::json!({
        "hands": state.hands,
        "corrupted": state.corrupted,
        "conservation_violations": state.violations,
        "players": state.players,
    });
    let json_output = serde_json::to_string_pretty(&summary)
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize stats: {}", e)))?;
    writeln!(out, "{}", json_output)?;

    if state.violations.is_empty() {
        Ok(())
    } else {
        Err(CliError::InvalidInput(
            "Statistics validation failed".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_empty_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().to_str().unwrap().to_string();
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_stats_command(&path, &mut out, &mut err).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["hands"], 0);
    }

    #[test]
    fn test_stats_nonexistent_file() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_stats_command("/nonexistent/path/to/file.jsonl", &mut out, &mut err);
        assert!(result.is_err());
    }

    #[test]
    fn test_stats_only_garbage_is_invalid() {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut temp, b"{invalid json}\n").unwrap();
        let path = temp.path().to_str().unwrap().to_string();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_stats_command(&path, &mut out, &mut err);
        assert!(result.is_err());
        assert!(String::from_utf8(err).unwrap().contains("corrupted"));
    }

    #[test]
    fn ratios_round_to_three_places() {
        assert_eq!(ratio(1, 3), 0.333);
        assert_eq!(ratio(0, 0), 0.0);
    }
}
