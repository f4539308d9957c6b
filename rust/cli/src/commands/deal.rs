//! `holdem deal`: one seeded deal shown face up.
//!
//! Cards leave the deck the way the engine deals them: one card at a time
//! clockwise from the first seat, twice, then five community cards.

use crate::config;
use crate::error::CliError;
use crate::ui;
use holdem_engine::cards::format_cards;
use holdem_engine::deck::Deck;
use holdem_engine::hand::evaluate;
use std::io::Write;

pub fn handle_deal_command(
    seed: Option<u64>,
    players: Option<u8>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load_with_sources()?.config;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let seats = players.map(usize::from).unwrap_or(cfg.players);

    let mut deck = Deck::new_shuffled(seed);
    let first = deck.deal(seats)?;
    let second = deck.deal(seats)?;
    let board = deck.deal(5)?;

    writeln!(out, "Seed: {}", seed)?;
    for (seat, (a, b)) in first.iter().zip(&second).enumerate() {
        let rank = evaluate([*a, *b], &board);
        writeln!(
            out,
            "{}: {} ({})",
            ui::seat_id(seat),
            format_cards(&[*a, *b]),
            rank.category
        )?;
    }
    writeln!(out, "Board: {}", format_cards(&board))?;
    if deck.remaining() + 2 * seats + 5 != 52 {
        ui::display_warning(err, "deck accounting mismatch")?;
    }
    Ok(())
}
