//! `holdem cfg`: the resolved configuration with the source of every value.
//!
//! ```json
//! {
//!   "starting_stack": { "value": 1000, "source": "default" },
//!   "seed": { "value": 7, "source": "env" },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(e.into());
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "starting_stack": { "value": config.starting_stack, "source": sources.starting_stack },
        "small_blind": { "value": config.small_blind, "source": sources.small_blind },
        "big_blind": { "value": config.big_blind, "source": sources.big_blind },
        "players": { "value": config.players, "source": sources.players },
        "seed": { "value": config.seed, "source": sources.seed },
        "decision_timeout_ms": {
            "value": config.decision_timeout_ms,
            "source": sources.decision_timeout_ms,
        },
        "policies": { "value": config.policies, "source": sources.policies },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
