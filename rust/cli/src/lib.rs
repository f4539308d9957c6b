//! # holdem CLI Library
//!
//! Command-line driver for the Hold'em engine. [`run`] parses arguments,
//! dispatches to a subcommand and returns the process exit code, writing
//! results to `out` and diagnostics to `err`.
//!
//! ```
//! use std::io;
//! let args = vec!["holdem", "deal", "--seed", "42"];
//! let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `cfg`: Display resolved configuration with value sources
//! - `deal`: Deal a single hand for inspection
//! - `sim`: Play a session of AI seats and write JSONL hand records
//! - `stats`: Aggregate per-player statistics from JSONL hand records
//! - `eval`: Compare two AI policies heads-up
//!
//! Exit codes: `0` success, `2` error, `130` interrupted.

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod io_utils;
pub mod logging;
mod macros;
pub mod ui;

use cli::{Commands, HoldemCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_eval_command, handle_sim_command,
    handle_stats_command, SimArgs,
};

pub use error::CliError;

/// Parses `args` (including the program name) and runs the subcommand.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    write_or_exit!(out, "{}", e);
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Usage: holdem <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in Commands::NAMES {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: holdem --help");
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Deal { seed, players } => handle_deal_command(seed, players, out, err),
        Commands::Sim {
            hands,
            players,
            seed,
            output,
            ai,
            stack,
        } => handle_sim_command(
            SimArgs {
                hands,
                players,
                seed,
                output,
                ai,
                stack,
            },
            out,
            err,
        ),
        Commands::Stats { input } => handle_stats_command(&input, out, err),
        Commands::Eval {
            ai_a,
            ai_b,
            hands,
            seed,
        } => handle_eval_command(&ai_a, &ai_b, hands, seed, out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            e.exit_code()
        }
    }
}
