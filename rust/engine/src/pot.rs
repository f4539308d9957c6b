use std::collections::HashMap;

use tracing::debug;

use crate::errors::GameError;
use crate::hand::HandRank;

/// A main or side pot: chips and the seats that can win them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pot {
    pub amount: u32,
    /// Ascending seat indexes
    pub eligible: Vec<usize>,
}

/// Result of settling one pot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotAward {
    pub amount: u32,
    pub eligible: Vec<usize>,
    /// (seat, chips) in award order
    pub shares: Vec<(usize, u32)>,
    pub uncontested: bool,
}

/// Running per-seat contributions for one hand.
#[derive(Debug, Clone, Default)]
pub struct PotManager {
    contributions: Vec<u32>,
    folded: Vec<bool>,
}

impl PotManager {
    pub fn new(seats: usize) -> Self {
        Self {
            contributions: vec![0; seats],
            folded: vec![false; seats],
        }
    }

    pub fn add(&mut self, seat: usize, chips: u32) {
        if let Some(c) = self.contributions.get_mut(seat) {
            *c += chips;
        }
    }

    /// Folded seats keep their chips in the pots but can win none of them.
    pub fn mark_folded(&mut self, seat: usize) {
        if let Some(f) = self.folded.get_mut(seat) {
            *f = true;
        }
    }

    pub fn contribution(&self, seat: usize) -> u32 {
        self.contributions.get(seat).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.contributions.iter().sum()
    }

    pub fn seats(&self) -> usize {
        self.contributions.len()
    }

    /// Splits the contributions into tiered pots.
    ///
    /// Tier levels are the distinct contributions of seats that have not
    /// folded. Each pot takes from every seat, folded or not, what it put in
    /// between the previous level and this one, and is eligible to the
    /// non-folded seats that reached the level. Chips above the top level
    /// (only possible from folded seats) join the last pot. Empty pots are
    /// dropped, so the first entry is the main pot.
    pub fn pots(&self) -> Vec<Pot> {
        let mut levels: Vec<u32> = self
            .contributions
            .iter()
            .zip(&self.folded)
            .filter(|(_, &folded)| !folded)
            .map(|(&c, _)| c)
            .filter(|&c| c > 0)
            .collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots: Vec<Pot> = Vec::with_capacity(levels.len());
        let mut prev = 0u32;
        for &level in &levels {
            let amount: u32 = self
                .contributions
                .iter()
                .map(|&c| c.min(level) - c.min(prev))
                .sum();
            let eligible: Vec<usize> = (0..self.contributions.len())
                .filter(|&s| !self.folded[s] && self.contributions[s] >= level)
                .collect();
            if amount > 0 {
                pots.push(Pot { amount, eligible });
            }
            prev = level;
        }

        let overflow: u32 = self
            .contributions
            .iter()
            .map(|&c| c.saturating_sub(prev))
            .sum();
        if overflow > 0 {
            match pots.last_mut() {
                Some(last) => last.amount += overflow,
                None => pots.push(Pot {
                    amount: overflow,
                    eligible: Vec::new(),
                }),
            }
        }
        pots
    }

    /// Awards every pot independently.
    ///
    /// A pot with a single eligible seat goes to it without evaluation. Otherwise
    /// the best `HandRank` among eligible seats wins; ties split evenly and the
    /// odd chips go one at a time to tied winners in clockwise order starting
    /// left of the button.
    pub fn settle(
        &self,
        ranks: &HashMap<usize, HandRank>,
        button: usize,
    ) -> Result<Vec<PotAward>, GameError> {
        let n = self.contributions.len();
        let mut awards = Vec::new();
        for pot in self.pots() {
            if let [only] = pot.eligible[..] {
                debug!(seat = only, amount = pot.amount, "pot awarded uncontested");
                awards.push(PotAward {
                    amount: pot.amount,
                    shares: vec![(only, pot.amount)],
                    eligible: pot.eligible,
                    uncontested: true,
                });
                continue;
            }
            if pot.eligible.is_empty() {
                return Err(GameError::InvariantViolation(format!(
                    "pot of {} has no eligible player",
                    pot.amount
                )));
            }

            let mut best: Option<HandRank> = None;
            for seat in &pot.eligible {
                let rank = ranks.get(seat).ok_or_else(|| {
                    GameError::InvariantViolation(format!("no hand rank for seat {}", seat))
                })?;
                if best.is_none_or(|b| *rank > b) {
                    best = Some(*rank);
                }
            }
            let mut winners: Vec<usize> = pot
                .eligible
                .iter()
                .copied()
                .filter(|s| ranks.get(s).copied() == best)
                .collect();
            winners.sort_by_key(|&s| (s + n - button - 1) % n);

            let count = winners.len() as u32;
            let share = pot.amount / count;
            let odd = (pot.amount % count) as usize;
            let shares = winners
                .iter()
                .enumerate()
                .map(|(i, &s)| (s, share + u32::from(i < odd)))
                .collect();
            awards.push(PotAward {
                amount: pot.amount,
                eligible: pot.eligible,
                shares,
                uncontested: false,
            });
        }
        Ok(awards)
    }
}
