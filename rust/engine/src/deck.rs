use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// One hand's deck: 52 unique cards in a seeded uniform order, dealt from the front.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Deck {
    /// Builds a full deck and shuffles it once. The same seed always yields the same order.
    pub fn new_shuffled(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut cards = full_deck();
        cards.shuffle(&mut rng);
        Self { cards, position: 0 }
    }

    /// Unshuffled deck in suit-major order; useful for fixtures.
    pub fn ordered() -> Self {
        Self {
            cards: full_deck(),
            position: 0,
        }
    }

    /// Deck whose first cards are `top` in order, followed by the rest of the deck
    /// in canonical order. Used to script exact deals in tests.
    pub fn stacked(top: &[Card]) -> Result<Self, GameError> {
        let mut cards = Vec::with_capacity(52);
        for &c in top {
            if cards.contains(&c) {
                return Err(GameError::InvariantViolation(format!(
                    "duplicate card {} in stacked deck",
                    c
                )));
            }
            cards.push(c);
        }
        cards.extend(full_deck().into_iter().filter(|c| !top.contains(c)));
        Ok(Self { cards, position: 0 })
    }

    pub fn deal_card(&mut self) -> Result<Card, GameError> {
        let c = self
            .cards
            .get(self.position)
            .copied()
            .ok_or(GameError::DeckExhausted {
                requested: 1,
                remaining: 0,
            })?;
        self.position += 1;
        Ok(c)
    }

    /// Removes `n` cards from the front. Nothing is dealt when fewer than `n` remain.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(GameError::DeckExhausted {
                requested: n,
                remaining,
            });
        }
        let dealt = self.cards[self.position..self.position + n].to_vec();
        self.position += n;
        Ok(dealt)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    /// Cards not yet dealt, front first.
    pub fn undealt(&self) -> &[Card] {
        &self.cards[self.position..]
    }
}
