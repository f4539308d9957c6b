//! `holdem eval`: two policies heads-up, compared hand by hand.
//!
//! Every hand starts from fresh stacks on a deck seeded with
//! `seed + hand`, and the button alternates so neither policy keeps the
//! positional edge.

use super::timed_seating;
use crate::config;
use crate::error::CliError;
use crate::ui;
use holdem_ai::{create_ai_with_seed, Seating};
use holdem_engine::engine::Engine;
use holdem_engine::logger::{ActionRecord, HandRecord};
use holdem_engine::player::{ActionKind, Player};
use std::io::Write;

const SEAT_A: &str = "a";
const SEAT_B: &str = "b";

#[derive(Debug, Clone, Default)]
struct EvalStats {
    hands_played: u32,
    wins: u32,
    losses: u32,
    ties: u32,
    total_chips_won: i64,
    total_pot_size: u64,
    folds: u32,
    checks: u32,
    calls: u32,
    bets: u32,
    raises: u32,
    all_ins: u32,
}

impl EvalStats {
    fn update_from_actions(&mut self, actions: &[ActionRecord], player_id: &str) {
        for action in actions.iter().filter(|a| a.player_id == player_id) {
            match action.action {
                ActionKind::Fold => self.folds += 1,
                ActionKind::Check => self.checks += 1,
                ActionKind::Call => self.calls += 1,
                ActionKind::Bet => self.bets += 1,
                ActionKind::Raise => self.raises += 1,
                ActionKind::AllIn => self.all_ins += 1,
            }
        }
    }

    fn update_result(&mut self, chip_delta: i64, pot: u32) {
        self.hands_played += 1;
        match chip_delta.signum() {
            1 => self.wins += 1,
            -1 => self.losses += 1,
            _ => self.ties += 1,
        }
        self.total_chips_won += chip_delta;
        self.total_pot_size += u64::from(pot);
    }

    fn pct(&self, count: u32) -> f64 {
        if self.hands_played == 0 {
            0.0
        } else {
            f64::from(count) / f64::from(self.hands_played) * 100.0
        }
    }

    fn avg_chip_delta(&self) -> f64 {
        if self.hands_played == 0 {
            0.0
        } else {
            self.total_chips_won as f64 / f64::from(self.hands_played)
        }
    }

    fn avg_pot_size(&self) -> f64 {
        if self.hands_played == 0 {
            0.0
        } else {
            self.total_pot_size as f64 / f64::from(self.hands_played)
        }
    }

    fn action_percentage(&self, count: u32) -> f64 {
        let total_actions =
            self.folds + self.checks + self.calls + self.bets + self.raises + self.all_ins;
        if total_actions == 0 {
            0.0
        } else {
            f64::from(count) / f64::from(total_actions) * 100.0
        }
    }
}

fn pot_size(record: &HandRecord) -> u32 {
    record.pots.iter().map(|p| p.amount).sum()
}

pub fn handle_eval_command(
    ai_a: &str,
    ai_b: &str,
    hands: u32,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let cfg = config::load_with_sources()?.config;
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut seating = Seating::new();
    seating.seat(
        SEAT_A,
        create_ai_with_seed(ai_a, base_seed).map_err(CliError::InvalidInput)?,
    );
    seating.seat(
        SEAT_B,
        create_ai_with_seed(ai_b, base_seed.wrapping_add(1)).map_err(CliError::InvalidInput)?,
    );

    let mut seating = timed_seating(seating, &cfg);

    let mut stats_a = EvalStats::default();
    let mut stats_b = EvalStats::default();
    let mut fallbacks = 0usize;

    for hand_num in 0..hands {
        let players = vec![
            Player::new(SEAT_A, cfg.starting_stack),
            Player::new(SEAT_B, cfg.starting_stack),
        ];
        let mut engine = Engine::new(
            cfg.table(),
            players,
            base_seed.wrapping_add(u64::from(hand_num)),
        )?;
        engine.set_button((hand_num % 2) as usize)?;
        let record = engine.play_hand(&mut seating)?;
        fallbacks += record.events.len();

        let delta_a = record.net.get(SEAT_A).copied().unwrap_or(0);
        let pot = pot_size(&record);
        stats_a.update_from_actions(&record.actions, SEAT_A);
        stats_b.update_from_actions(&record.actions, SEAT_B);
        stats_a.update_result(delta_a, pot);
        stats_b.update_result(-delta_a, pot);
    }

    if fallbacks > 0 {
        ui::display_warning(
            err,
            &format!("{} decision(s) replaced by the engine fallback", fallbacks),
        )?;
    }
    print_eval_results(out, ai_a, ai_b, &stats_a, &stats_b, hands, base_seed)?;
    Ok(())
}

fn print_side(out: &mut dyn Write, label: &str, name: &str, s: &EvalStats) -> std::io::Result<()> {
    writeln!(out, "{} ({}):", label, name)?;
    writeln!(out, "  Wins: {} ({:.1}%)", s.wins, s.pct(s.wins))?;
    writeln!(out, "  Losses: {} ({:.1}%)", s.losses, s.pct(s.losses))?;
    writeln!(out, "  Ties: {} ({:.1}%)", s.ties, s.pct(s.ties))?;
    writeln!(out, "  Net chips: {}", s.total_chips_won)?;
    writeln!(out, "  Avg chip delta: {:.1}", s.avg_chip_delta())?;
    writeln!(out, "  Avg pot: {:.1}", s.avg_pot_size())?;
    writeln!(
        out,
        "  Actions: Fold {:.1}% | Check {:.1}% | Call {:.1}% | Bet {:.1}% | Raise {:.1}% | All-in {:.1}%",
        s.action_percentage(s.folds),
        s.action_percentage(s.checks),
        s.action_percentage(s.calls),
        s.action_percentage(s.bets),
        s.action_percentage(s.raises),
        s.action_percentage(s.all_ins),
    )
}

fn print_eval_results(
    out: &mut dyn Write,
    ai_a_name: &str,
    ai_b_name: &str,
    stats_a: &EvalStats,
    stats_b: &EvalStats,
    hands: u32,
    seed: u64,
) -> std::io::Result<()> {
    writeln!(out, "AI Comparison Results")?;
    writeln!(out, "Hands played: {}", hands)?;
    writeln!(out, "Seed: {}", seed)?;
    writeln!(out)?;
    print_side(out, "AI-A", ai_a_name, stats_a)?;
    writeln!(out)?;
    print_side(out, "AI-B", ai_b_name, stats_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_basic_execution() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_eval_command("baseline", "aggressive", 10, Some(12345), &mut out, &mut err)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Hands played: 10"));
        assert!(text.contains("AI-A (baseline)"));
        assert!(text.contains("AI-B (aggressive)"));
    }

    #[test]
    fn test_eval_is_deterministic_with_seed() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        let mut err = Vec::new();
        handle_eval_command("random", "baseline", 8, Some(3), &mut a, &mut err).unwrap();
        handle_eval_command("random", "baseline", 8, Some(3), &mut b, &mut err).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_eval_unknown_ai() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = handle_eval_command("psychic", "baseline", 1, Some(1), &mut out, &mut err);
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn results_are_zero_sum() {
        let mut a = EvalStats::default();
        let mut b = EvalStats::default();
        a.update_result(40, 80);
        b.update_result(-40, 80);
        a.update_result(0, 40);
        b.update_result(0, 40);
        assert_eq!(a.total_chips_won + b.total_chips_won, 0);
        assert_eq!((a.wins, a.ties, b.losses), (1, 1, 1));
        assert_eq!(a.avg_pot_size(), 60.0);
    }
}
