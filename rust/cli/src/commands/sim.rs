//! `holdem sim`: a session at one table of AI seats.
//!
//! Every finished hand is appended to the output file as one JSON line. The
//! run stops early when fewer than two seats have chips left.
//!
//! # Environment Variables
//!
//! - `HOLDEM_SIM_BREAK_AFTER`: stop after N hands and exit with code 130

use crate::config;
use super::timed_seating;
use crate::error::CliError;
use crate::ui;
use chrono::Utc;
use holdem_ai::{create_ai_with_seed, Seating};
use holdem_engine::engine::Engine;
use holdem_engine::logger::HandLogger;
use holdem_engine::player::Player;
use std::io::Write;
use tracing::info;

pub const ENV_BREAK_AFTER: &str = "HOLDEM_SIM_BREAK_AFTER";

/// Flags of `holdem sim`; unset values come from the resolved config.
#[derive(Debug, Clone, Default)]
pub struct SimArgs {
    pub hands: u64,
    pub players: Option<u8>,
    pub seed: Option<u64>,
    pub output: Option<String>,
    pub ai: Vec<String>,
    pub stack: Option<u32>,
}

pub fn handle_sim_command(
    args: SimArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if args.hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let mut cfg = config::load_with_sources()?.config;
    if let Some(p) = args.players {
        cfg.players = usize::from(p);
    }
    if let Some(s) = args.stack {
        cfg.starting_stack = s;
    }
    if !args.ai.is_empty() {
        cfg.policies = args.ai.clone();
    }
    config::validate(&cfg)?;

    let base_seed = args.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let players: Vec<Player> = (0..cfg.players)
        .map(|seat| Player::new(ui::seat_id(seat), cfg.starting_stack))
        .collect();
    let mut seating = Seating::new();
    let mut policy_names = Vec::with_capacity(cfg.players);
    for seat in 0..cfg.players {
        let name = &cfg.policies[seat % cfg.policies.len()];
        let policy = create_ai_with_seed(name, base_seed.wrapping_add(seat as u64))
            .map_err(CliError::InvalidInput)?;
        policy_names.push(policy.name().to_string());
        seating.seat(ui::seat_id(seat), policy);
    }
    let mut seating = timed_seating(seating, &cfg);
    let mut engine = Engine::new(cfg.table(), players, base_seed)?;
    let start_total = engine.total_chips();

    let mut logger = match &args.output {
        Some(path) => HandLogger::create(path).map_err(|e| {
            let _ = ui::write_error(err, &format!("Failed to open output file: {}", e));
            CliError::Io(e)
        })?,
        None => HandLogger::detached(&Utc::now().format("%Y%m%d").to_string()),
    };

    let break_after = std::env::var(ENV_BREAK_AFTER)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok());

    let total = args.hands;
    let mut completed = 0u64;
    let mut fallbacks = 0usize;
    while completed < total {
        if engine.seats_with_chips() < 2 {
            ui::display_warning(
                err,
                &format!("table broke after {} of {} hands", completed, total),
            )?;
            break;
        }
        let record = engine.play_hand(&mut seating)?;
        fallbacks += record.events.len();
        let written = logger.write(&record)?;
        info!(hand_id = %written.hand_id, winners = ?written.winners(), "hand recorded");
        completed += 1;

        if let Some(b) = break_after
            && completed == b
            && completed < total
        {
            writeln!(out, "Interrupted: saved {}/{}", completed, total)?;
            return Err(CliError::Interrupted(format!(
                "saved {}/{}",
                completed, total
            )));
        }
    }

    let end_total = engine.total_chips();
    let stacks: Vec<serde_json::Value> = engine
        .players()
        .iter()
        .enumerate()
        .map(|(seat, p)| {
            serde_json::json!({
                "id": p.id(),
                "policy": policy_names[seat],
                "stack": p.stack(),
                "net": i64::from(p.stack()) - i64::from(cfg.starting_stack),
                "seat": seat,
            })
        })
        .collect();
    let summary = serde_json::json!({
        "hands": completed,
        "seed": base_seed,
        "output": args.output,
        "players": stacks,
        "decision_fallbacks": fallbacks,
        "chips_conserved": start_total == end_total,
    });
    writeln!(
        out,
        "{}",
        serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?
    )?;
    if start_total != end_total {
        ui::write_error(
            err,
            &format!("chip total changed from {} to {}", start_total, end_total),
        )?;
        return Err(CliError::InvalidInput(
            "chip conservation violated".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(hands: u64, seed: u64) -> SimArgs {
        SimArgs {
            hands,
            seed: Some(seed),
            players: Some(3),
            ai: vec!["baseline".into(), "random".into()],
            ..SimArgs::default()
        }
    }

    #[test]
    fn zero_hands_is_rejected() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = handle_sim_command(args(0, 1), &mut out, &mut err);
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn summary_reports_conserved_chips() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_sim_command(args(15, 4), &mut out, &mut err).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["chips_conserved"], true);
        assert_eq!(v["seed"], 4);
        let net: i64 = v["players"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["net"].as_i64().unwrap())
            .sum();
        assert_eq!(net, 0);
        assert_eq!(v["players"][1]["policy"], "RandomAI");
    }

    #[test]
    fn unknown_policy_is_a_config_error() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut a = args(1, 1);
        a.ai = vec!["oracle".into()];
        let res = handle_sim_command(a, &mut out, &mut err);
        assert!(matches!(res, Err(CliError::Config(_))));
    }
}
