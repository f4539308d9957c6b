//! Baseline AI implementation for poker gameplay.
//!
//! A deterministic rule-based opponent used for testing and benchmarking:
//! hand strength on a 0-10 scale plus pot odds decide the action.

use crate::{bet_or_raise_to, check_or_call, check_or_fold, AIOpponent};
use holdem_engine::cards::Card;
use holdem_engine::decision::DecisionRequest;
use holdem_engine::hand::{evaluate, evaluate_cards, Category};
use holdem_engine::player::{ActionKind, PlayerAction};

/// Simple baseline AI implementation for testing and comparison.
///
/// # Strategy
///
/// **Preflop:**
/// - Strong hands (high pairs 77+, AK, AQ): Raise or call
/// - Medium hands (suited connectors, Ax, small pairs): Call if cheap
/// - Weak hands: Fold to raises, check if free
///
/// **Postflop:**
/// - Strong hands (Two Pair+): Bet or call
/// - Medium hands (One Pair): Check or call small bets
/// - Weak hands: Calculate pot odds, fold if unfavorable
#[derive(Debug, Clone, Default)]
pub struct BaselineAI;

impl BaselineAI {
    pub fn new() -> Self {
        Self
    }

    fn decide_action(request: &DecisionRequest, hand_strength: u8) -> PlayerAction {
        if request.to_call == 0 {
            return Self::decide_no_bet_action(request, hand_strength);
        }

        let pot_odds = calculate_pot_odds(request.pot, request.to_call);

        // Cannot cover the call: all-in or fold
        if request.to_call >= request.stack {
            return if hand_strength >= 7 && request.can(ActionKind::AllIn) {
                PlayerAction::AllIn
            } else {
                PlayerAction::Fold
            };
        }

        match hand_strength {
            9..=10 => {
                let target = request.current_bet + (request.pot / 2).max(request.min_raise);
                bet_or_raise_to(request, target)
            }
            7..=8 => check_or_call(request),
            5..=6 => {
                if pot_odds >= 0.3 || request.to_call <= request.pot / 4 {
                    check_or_call(request)
                } else {
                    PlayerAction::Fold
                }
            }
            3..=4 => {
                if pot_odds >= 0.4 || request.to_call <= request.pot / 6 {
                    check_or_call(request)
                } else {
                    PlayerAction::Fold
                }
            }
            _ => check_or_fold(request),
        }
    }

    fn decide_no_bet_action(request: &DecisionRequest, hand_strength: u8) -> PlayerAction {
        let base = request.current_bet;
        match hand_strength {
            9..=10 => bet_or_raise_to(request, base + (request.pot * 2 / 3).max(request.min_raise)),
            7..=8 => bet_or_raise_to(request, base + (request.pot / 2).max(request.min_raise)),
            _ => PlayerAction::Check,
        }
    }
}

/// Preflop hand strength on a scale of 0-10.
///
/// - 9-10: Premium hands (AA, KK, QQ, JJ, AKs)
/// - 7-8: Strong hands (TT-99, AK, AQ, KQs)
/// - 5-6: Medium hands (88-77, AJ, suited connectors)
/// - 3-4: Marginal hands (66-22, Ax, suited cards)
/// - 0-2: Weak hands (offsuit low cards)
pub fn preflop_strength(hole_cards: [Card; 2]) -> u8 {
    let r1 = hole_cards[0].rank as u8;
    let r2 = hole_cards[1].rank as u8;
    let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
    let suited = hole_cards[0].suit == hole_cards[1].suit;
    let pick = |s: u8, o: u8| if suited { s } else { o };

    if r1 == r2 {
        return match high {
            13..=14 => 10,
            11..=12 => 9,
            10 => 8,
            9 => 7,
            8 => 6,
            7 => 5,
            _ => 4,
        };
    }

    match (high, low) {
        (14, 13) => pick(10, 8),
        (14, 12) => pick(8, 7),
        (14, 11) => pick(7, 6),
        (14, 10) => pick(6, 5),
        (14, _) => pick(5, 4),
        (13, 12) => pick(7, 6),
        (13, 11) => pick(6, 5),
        (13, 10) => pick(5, 4),
        (12, 11) => pick(6, 5),
        (12, 10) => pick(5, 4),
        _ => {
            if suited && high - low <= 2 {
                if high >= 9 { 5 } else { 4 }
            } else if high >= 11 && low >= 9 {
                4
            } else {
                2
            }
        }
    }
}

/// Postflop strength on the same 0-10 scale, from the best hand made with the board.
/// `None` before the flop.
pub fn postflop_strength(hole_cards: [Card; 2], board: &[Card]) -> Option<u8> {
    if board.len() < 3 {
        return None;
    }
    let rank = evaluate(hole_cards, board);
    let base: u8 = match rank.category {
        Category::HighCard => 1,
        Category::OnePair => 3,
        Category::TwoPair => 5,
        Category::ThreeOfAKind => 6,
        Category::Straight => 7,
        Category::Flush => 8,
        Category::FullHouse => 9,
        Category::FourOfAKind | Category::StraightFlush => 10,
    };
    // a pair or better that doesn't use a hole card is shared with everyone
    let board_only = board.len() >= 5 && evaluate_cards(board) == rank;
    let kicker_boost = u8::from(rank.kickers[0] >= 12);
    let strength = (base + kicker_boost).min(10);
    Some(if board_only { strength.min(2) } else { strength })
}

/// Strength for the current street.
pub fn hand_strength(request: &DecisionRequest) -> u8 {
    postflop_strength(request.hole_cards, &request.community)
        .unwrap_or_else(|| preflop_strength(request.hole_cards))
}

/// Pot odds as a ratio `pot / (pot + call)`.
pub fn calculate_pot_odds(pot_size: u32, call_amount: u32) -> f32 {
    if call_amount == 0 {
        return 1.0;
    }
    pot_size as f32 / (pot_size + call_amount) as f32
}

impl AIOpponent for BaselineAI {
    fn get_action(&mut self, request: &DecisionRequest) -> PlayerAction {
        Self::decide_action(request, hand_strength(request))
    }

    fn name(&self) -> &str {
        "BaselineAI"
    }
}
