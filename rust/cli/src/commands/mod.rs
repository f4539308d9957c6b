//! Command handlers, one module per subcommand.
//!
//! Each module exposes `handle_<name>_command(..) -> Result<(), CliError>`
//! taking its output streams as `&mut dyn Write` so tests can capture them.

mod cfg;
mod deal;
mod eval;
mod sim;
mod stats;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use sim::{handle_sim_command, SimArgs};
pub use stats::handle_stats_command;

use crate::config::Config;
use holdem_ai::Seating;
use holdem_engine::decision::TimedDecisionMaker;

/// Puts the seated policies behind the configured decision deadline, so a
/// policy that never answers is folded instead of stalling the table.
fn timed_seating(seating: Seating, cfg: &Config) -> TimedDecisionMaker<Seating> {
    TimedDecisionMaker::new(seating, cfg.table().decision_timeout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_ai::AIOpponent;
    use holdem_engine::decision::DecisionRequest;
    use holdem_engine::engine::Engine;
    use holdem_engine::player::{Player, PlayerAction};
    use std::time::{Duration, Instant};

    struct Stalled;

    impl AIOpponent for Stalled {
        fn get_action(&mut self, _request: &DecisionRequest) -> PlayerAction {
            std::thread::sleep(Duration::from_secs(3));
            PlayerAction::Fold
        }

        fn name(&self) -> &str {
            "Stalled"
        }
    }

    #[test]
    fn stalled_policy_is_folded_at_the_deadline() {
        let cfg = Config {
            decision_timeout_ms: 50,
            ..Config::default()
        };
        let mut seating = Seating::new();
        seating.seat("p0", Box::new(Stalled));
        seating.seat("p1", Box::new(Stalled));
        let mut timed = timed_seating(seating, &cfg);
        let players = vec![Player::new("p0", 1000), Player::new("p1", 1000)];
        let mut engine = Engine::new(cfg.table(), players, 9).unwrap();

        let started = Instant::now();
        let record = engine.play_hand(&mut timed).unwrap();
        assert!(started.elapsed() < Duration::from_secs(1), "{:?}", started.elapsed());
        assert_eq!(record.events.len(), 1);
        assert_eq!(record.events[0].error, "decision_timeout");
        assert_eq!(record.net_sum(), 0);
        assert_eq!(engine.total_chips(), 2000);
    }
}
