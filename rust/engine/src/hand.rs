use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::HighCard => "high card",
            Category::OnePair => "one pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
        };
        f.write_str(name)
    }
}

/// Strength of the best five-card hand available to a player.
///
/// Ordering compares `category` first and then `kickers` element-wise, so the
/// derived `Ord` is the total order used at showdown. Equal values are a tie.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandRank {
    pub category: Category,
    // primary ranks first, then kickers, high -> low; unused slots are 0
    pub kickers: [u8; 5],
}

/// Ranks the best hand out of two hole cards and up to five community cards.
///
/// With five or more cards every five-card subset is scored and the maximum
/// kept. With fewer (a preflop estimate, say) the available cards are scored
/// as they are; straights and flushes need five cards and cannot appear.
pub fn evaluate(hole: [Card; 2], community: &[Card]) -> HandRank {
    let mut cards = Vec::with_capacity(2 + community.len());
    cards.extend_from_slice(&hole);
    cards.extend_from_slice(community);
    evaluate_cards(&cards)
}

pub fn evaluate_cards(cards: &[Card]) -> HandRank {
    let n = cards.len();
    if n <= 5 {
        return classify(cards);
    }
    let mut best: Option<HandRank> = None;
    let mut combo = [cards[0]; 5];
    for mask in 0u32..(1 << n) {
        if mask.count_ones() != 5 {
            continue;
        }
        let mut k = 0;
        for (i, &c) in cards.iter().enumerate() {
            if mask & (1 << i) != 0 {
                combo[k] = c;
                k += 1;
            }
        }
        let rank = classify(&combo);
        if best.is_none_or(|b| rank > b) {
            best = Some(rank);
        }
    }
    best.unwrap_or_else(|| classify(cards))
}

pub fn evaluate_five(cards: &[Card; 5]) -> HandRank {
    classify(cards)
}

fn classify(cards: &[Card]) -> HandRank {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut suit_counts = [0u8; 4];
    let mut rank_mask: u16 = 0;
    for &c in cards {
        let r = c.rank as u8;
        rank_counts[r as usize] += 1;
        suit_counts[suit_index(c.suit)] += 1;
        rank_mask |= 1 << r;
    }

    let five = cards.len() == 5;
    let is_flush = five && suit_counts.iter().any(|&n| n == 5);
    let straight_high = if five && rank_mask.count_ones() == 5 {
        straight_high_from_mask(rank_mask)
    } else {
        None
    };

    if let Some(high) = straight_high {
        let category = if is_flush {
            Category::StraightFlush
        } else {
            Category::Straight
        };
        return HandRank {
            category,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    // (count, rank) groups, largest group first, then higher rank
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let mut kickers = [0u8; 5];
    for (slot, &(_, r)) in kickers.iter_mut().zip(groups.iter()) {
        *slot = r;
    }

    let shape: Vec<u8> = groups.iter().map(|&(count, _)| count).collect();
    let category = match shape.as_slice() {
        [4, ..] => Category::FourOfAKind,
        [3, 2, ..] => Category::FullHouse,
        _ if is_flush => Category::Flush,
        [3, ..] => Category::ThreeOfAKind,
        [2, 2, ..] => Category::TwoPair,
        [2, ..] => Category::OnePair,
        _ => Category::HighCard,
    };
    HandRank { category, kickers }
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    // Ace also plays low
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    for high in (5..=14u8).rev() {
        let window = 0b11111u16 << (high - 4);
        if (m & window) == window {
            return Some(high);
        }
    }
    None
}
