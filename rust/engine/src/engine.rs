use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::betting::BettingRound;
use crate::cards::Card;
use crate::deck::Deck;
use crate::decision::{DecisionMaker, DecisionRequest};
use crate::errors::GameError;
use crate::game::{GameState, Phase};
use crate::hand::{evaluate, HandRank};
use crate::logger::{
    ActionRecord, Blind, BlindRecord, DecisionEvent, Fallback, HandRecord, PotRecord, PotShare,
    RevealedHand, SeatRecord, Street,
};
use crate::player::{Player, PlayerAction, PlayerStatus, Position};
use crate::pot::PotManager;

pub const MIN_SEATS: usize = 2;
pub const MAX_SEATS: usize = 10;

/// Stakes and decision deadline for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    pub decision_timeout_ms: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 10,
            big_blind: 20,
            decision_timeout_ms: 30_000,
        }
    }
}

impl TableConfig {
    pub fn new(small_blind: u32, big_blind: u32) -> Self {
        Self {
            small_blind,
            big_blind,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.small_blind == 0 {
            return Err(GameError::InvalidConfig(
                "small blind must be positive".to_string(),
            ));
        }
        if self.big_blind < self.small_blind {
            return Err(GameError::InvalidConfig(format!(
                "big blind {} is smaller than small blind {}",
                self.big_blind, self.small_blind
            )));
        }
        if self.decision_timeout_ms == 0 {
            return Err(GameError::InvalidConfig(
                "decision timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn decision_timeout(&self) -> Duration {
        Duration::from_millis(self.decision_timeout_ms)
    }
}

/// Hand orchestrator for one table.
///
/// Owns the seated players and their stacks across hands, plus the button.
/// Each call to [`Engine::play_hand`] builds a fresh deck, pot manager and
/// [`GameState`], runs blinds, dealing, four betting streets and settlement,
/// and returns the [`HandRecord`]. Seats without chips sit hands out.
///
/// # Examples
///
/// ```
/// use holdem_engine::decision::{DecisionRequest, DecisionResponse};
/// use holdem_engine::engine::{Engine, TableConfig};
/// use holdem_engine::errors::GameError;
/// use holdem_engine::player::{ActionKind, Player, PlayerAction};
///
/// let players = vec![Player::new("alice", 1000), Player::new("bob", 1000)];
/// let mut engine = Engine::new(TableConfig::new(5, 10), players, 42).unwrap();
///
/// // check when possible, otherwise call
/// let mut passive = |req: &DecisionRequest| -> Result<DecisionResponse, GameError> {
///     let action = if req.can(ActionKind::Check) { PlayerAction::Check } else { PlayerAction::Call };
///     Ok(action.into())
/// };
/// let record = engine.play_hand(&mut passive).unwrap();
///
/// assert_eq!(record.board.len(), 5);
/// assert_eq!(record.net_sum(), 0);
/// assert_eq!(engine.total_chips(), 2000);
/// ```
#[derive(Debug)]
pub struct Engine {
    config: TableConfig,
    players: Vec<Player>,
    button: usize,
    base_seed: u64,
    hands_played: u64,
}

impl Engine {
    pub fn new(config: TableConfig, players: Vec<Player>, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        if !(MIN_SEATS..=MAX_SEATS).contains(&players.len()) {
            return Err(GameError::InvalidConfig(format!(
                "a table seats {} to {} players, got {}",
                MIN_SEATS,
                MAX_SEATS,
                players.len()
            )));
        }
        let mut ids = HashSet::new();
        for p in &players {
            if !ids.insert(p.id()) {
                return Err(GameError::InvalidConfig(format!(
                    "duplicate player id {:?}",
                    p.id()
                )));
            }
        }
        Ok(Self {
            config,
            players,
            button: 0,
            base_seed: seed,
            hands_played: 0,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }
    pub fn button(&self) -> usize {
        self.button
    }
    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }

    /// Places the button before the next hand.
    pub fn set_button(&mut self, seat: usize) -> Result<(), GameError> {
        if seat >= self.players.len() {
            return Err(GameError::InvalidConfig(format!(
                "button seat {} out of range",
                seat
            )));
        }
        self.button = seat;
        Ok(())
    }

    pub fn total_chips(&self) -> u64 {
        self.players.iter().map(|p| u64::from(p.stack())).sum()
    }

    pub fn seats_with_chips(&self) -> usize {
        self.players.iter().filter(|p| p.stack() > 0).count()
    }

    /// Shuffle seed of hand number `hand_no`.
    pub fn hand_seed(&self, hand_no: u64) -> u64 {
        self.base_seed.wrapping_add(hand_no)
    }

    /// Plays the next hand with a deck shuffled from the session seed.
    ///
    /// The engine calls `decider` inline and can only flag an answer that
    /// arrives after `decision_timeout_ms` once it is back. A collaborator that
    /// may hang has to be wrapped in
    /// [`TimedDecisionMaker`](crate::decision::TimedDecisionMaker), which stops
    /// waiting at the deadline and lets the engine fold the seat.
    pub fn play_hand(
        &mut self,
        decider: &mut dyn DecisionMaker,
    ) -> Result<HandRecord, GameError> {
        let seed = self.hand_seed(self.hands_played);
        self.play_hand_with_deck(Deck::new_shuffled(seed), Some(seed), decider)
    }

    /// Plays the next hand from a prepared deck.
    ///
    /// On a fatal error every stack is put back to its value at hand start,
    /// the button stays where it was and the error is returned.
    pub fn play_hand_with_deck(
        &mut self,
        deck: Deck,
        seed: Option<u64>,
        decider: &mut dyn DecisionMaker,
    ) -> Result<HandRecord, GameError> {
        let seated = self.seats_with_chips();
        if seated < MIN_SEATS {
            return Err(GameError::NotEnoughPlayers { seated });
        }
        let snapshot: Vec<u32> = self.players.iter().map(|p| p.stack()).collect();
        let button = self.next_with_chips(self.button, true);

        let run = HandRun {
            config: &self.config,
            players: &mut self.players,
            deck,
            pots: PotManager::new(snapshot.len()),
            state: GameState::new(button),
            positions: vec![None; snapshot.len()],
            starting: snapshot.clone(),
            start_total: snapshot.iter().map(|&s| u64::from(s)).sum(),
            blinds: Vec::new(),
            actions: Vec::new(),
            events: Vec::new(),
        };
        debug!(hand_no = self.hands_played, ?seed, button, "hand started");
        match run.play(decider) {
            Ok(mut record) => {
                record.hand_no = self.hands_played;
                record.seed = seed;
                self.hands_played += 1;
                self.button = self.next_with_chips(button, false);
                Ok(record)
            }
            Err(e) => {
                error!(hand_no = self.hands_played, error = %e, "hand aborted; stacks rolled back");
                for (p, &stack) in self.players.iter_mut().zip(&snapshot) {
                    p.restore(stack);
                }
                Err(e)
            }
        }
    }

    /// Plays until `max_hands` are done or fewer than two seats have chips.
    pub fn play_session(
        &mut self,
        decider: &mut dyn DecisionMaker,
        max_hands: usize,
    ) -> Result<Vec<HandRecord>, GameError> {
        let mut records = Vec::new();
        while records.len() < max_hands && self.seats_with_chips() >= MIN_SEATS {
            records.push(self.play_hand(decider)?);
        }
        Ok(records)
    }

    /// First seat with chips clockwise from `from`, counting `from` itself when
    /// `inclusive`. Falls back to `from` when nobody qualifies.
    fn next_with_chips(&self, from: usize, inclusive: bool) -> usize {
        let n = self.players.len();
        let start = if inclusive { 0 } else { 1 };
        (start..start + n)
            .map(|i| (from + i) % n)
            .find(|&s| self.players[s].stack() > 0)
            .unwrap_or(from)
    }
}

/// State of one hand in progress.
struct HandRun<'a> {
    config: &'a TableConfig,
    players: &'a mut Vec<Player>,
    deck: Deck,
    pots: PotManager,
    state: GameState,
    positions: Vec<Option<Position>>,
    starting: Vec<u32>,
    start_total: u64,
    blinds: Vec<BlindRecord>,
    actions: Vec<ActionRecord>,
    events: Vec<DecisionEvent>,
}

impl HandRun<'_> {
    fn play(mut self, decider: &mut dyn DecisionMaker) -> Result<HandRecord, GameError> {
        let n = self.players.len();
        let button = self.state.button;
        for p in self.players.iter_mut() {
            p.reset_for_hand();
        }
        // dealt-in seats, clockwise starting at the button
        let dealt: Vec<usize> = (0..n)
            .map(|i| (button + i) % n)
            .filter(|&s| self.players[s].status() == PlayerStatus::Active)
            .collect();
        for s in 0..n {
            if !dealt.contains(&s) {
                self.pots.mark_folded(s);
            }
        }
        for (offset, &s) in dealt.iter().enumerate() {
            self.positions[s] = Some(Position::from_offset(offset, dealt.len()));
        }

        let (sb, bb) = if dealt.len() == 2 {
            (dealt[0], dealt[1])
        } else {
            (dealt[1], dealt[2])
        };
        self.post_blind(sb, Blind::Small, self.config.small_blind)?;
        self.post_blind(bb, Blind::Big, self.config.big_blind)?;

        let mut holes: Vec<Vec<Card>> = vec![Vec::with_capacity(2); n];
        for _ in 0..2 {
            for &s in dealt[1..].iter().chain(&dealt[..1]) {
                holes[s].push(self.deck.deal_card()?);
            }
        }
        for &s in &dealt {
            self.players[s].set_hole_cards([holes[s][0], holes[s][1]]);
        }
        self.check_cards()?;

        let big_blind = self.config.big_blind;
        let mut street = Street::Preflop;
        loop {
            let (current_bet, first) = if street == Street::Preflop {
                let first = if dealt.len() == 2 { sb } else { (bb + 1) % n };
                (big_blind, first)
            } else {
                for p in self.players.iter_mut() {
                    p.reset_street();
                }
                let cards = self.deck.deal(street.cards_dealt())?;
                self.state.board.extend(cards);
                self.check_cards()?;
                (0, (button + 1) % n)
            };
            self.state.enter_street(street, current_bet, big_blind);
            debug!(%street, board = self.state.board.len(), "street opened");
            self.run_round(street, first, decider)?;

            if self.contenders().len() <= 1 {
                break;
            }
            match street.next() {
                Some(next) => street = next,
                None => break,
            }
        }
        self.settle(&dealt)
    }

    fn post_blind(&mut self, seat: usize, blind: Blind, amount: u32) -> Result<(), GameError> {
        let player = &mut self.players[seat];
        let chips = amount.min(player.stack());
        player.commit(chips)?;
        self.pots.add(seat, chips);
        self.blinds.push(BlindRecord {
            player_id: player.id().to_string(),
            blind,
            amount: chips,
        });
        self.check_chips()
    }

    fn run_round(
        &mut self,
        street: Street,
        first: usize,
        decider: &mut dyn DecisionMaker,
    ) -> Result<(), GameError> {
        let mut round = BettingRound::new(
            street,
            &self.players[..],
            first,
            self.state.current_bet,
            self.state.min_raise,
        );
        while let Some(seat) = round.next_to_act() {
            self.state.to_act = Some(seat);
            let action = self.request_action(&round, seat, decider)?;
            let applied = round.apply(&mut self.players[..], seat, action, &mut self.pots)?;
            self.state.current_bet = round.current_bet();
            self.state.min_raise = round.min_raise();
            self.actions.push(ActionRecord {
                player_id: self.players[seat].id().to_string(),
                street,
                action: applied.action.kind(),
                amount: applied.action.chips(),
                to: applied.to,
                aggressive: applied.aggressive,
            });
            self.check_chips()?;
            if self.contenders().len() <= 1 {
                break;
            }
        }
        self.state.to_act = None;
        Ok(())
    }

    /// Asks for a decision and applies the fallback policy: an illegal or
    /// malformed answer gets one retry, a second one folds; a timeout or an
    /// unavailable collaborator folds at once. Answers arriving after the
    /// decision deadline count as timeouts.
    fn request_action(
        &mut self,
        round: &BettingRound,
        seat: usize,
        decider: &mut dyn DecisionMaker,
    ) -> Result<PlayerAction, GameError> {
        let player = &self.players[seat];
        let id = player.id().to_string();
        let ctx = round.context(player);
        let hole_cards = player.hole_cards().ok_or_else(|| {
            GameError::InvariantViolation(format!("{} has no hole cards", id))
        })?;
        let position = self.positions[seat].ok_or_else(|| {
            GameError::InvariantViolation(format!("{} was not dealt in", id))
        })?;
        let mut request = DecisionRequest {
            player_id: id.clone(),
            seat,
            position,
            street: round.street(),
            hole_cards,
            community: self.state.board.clone(),
            pot: self.pots.total(),
            current_bet: ctx.current_bet,
            to_call: ctx.to_call(),
            min_raise: ctx.min_raise,
            stack: ctx.stack,
            committed: ctx.committed,
            legal_actions: round.legal_actions(seat, player),
            retry_reason: None,
        };
        let deadline = self.config.decision_timeout();

        for attempt in 0..2 {
            let started = Instant::now();
            let outcome = decider.decide(&request).and_then(|resp| {
                let waited = started.elapsed();
                if waited > deadline {
                    return Err(GameError::DecisionTimeout {
                        player: id.clone(),
                        waited_ms: waited.as_millis() as u64,
                    });
                }
                let action = resp.to_action()?;
                round.validate(seat, &self.players[seat], action)?;
                Ok(action)
            });
            let err = match outcome {
                Ok(action) => return Ok(action),
                Err(e) if !e.is_recoverable() => return Err(e),
                Err(e) => e,
            };
            let retry = attempt == 0
                && matches!(
                    err,
                    GameError::IllegalAction { .. } | GameError::MalformedResponse(_)
                );
            let fallback = if retry { Fallback::Retry } else { Fallback::Fold };
            warn!(
                player = %id,
                street = %round.street(),
                error = %err,
                ?fallback,
                "decision rejected"
            );
            self.events.push(DecisionEvent {
                player_id: id.clone(),
                street: round.street(),
                error: err.kind().to_string(),
                detail: err.to_string(),
                fallback,
            });
            if !retry {
                break;
            }
            request.retry_reason = Some(err.to_string());
        }
        Ok(PlayerAction::Fold)
    }

    fn contenders(&self) -> Vec<usize> {
        (0..self.players.len())
            .filter(|&s| self.players[s].in_hand())
            .collect()
    }

    fn settle(mut self, dealt: &[usize]) -> Result<HandRecord, GameError> {
        let n = self.players.len();
        let button = self.state.button;
        let contenders = self.contenders();
        let showdown = contenders.len() >= 2;

        let mut ranks: HashMap<usize, HandRank> = HashMap::new();
        let mut revealed = Vec::new();
        if showdown {
            self.state.finish(Phase::Showdown);
            let mut order = contenders.clone();
            order.sort_by_key(|&s| (s + n - button - 1) % n);
            for s in order {
                let player = &self.players[s];
                let hole = player.hole_cards().ok_or_else(|| {
                    GameError::InvariantViolation(format!("{} has no hole cards", player.id()))
                })?;
                let rank = evaluate(hole, &self.state.board);
                ranks.insert(s, rank);
                revealed.push(RevealedHand {
                    player_id: player.id().to_string(),
                    hole,
                    rank,
                });
            }
        }

        let awards = self.pots.settle(&ranks, button)?;
        let mut pots = Vec::with_capacity(awards.len());
        for award in &awards {
            let mut winners = Vec::with_capacity(award.shares.len());
            for &(seat, chips) in &award.shares {
                self.players[seat].add_chips(chips);
                winners.push(PotShare {
                    player_id: self.players[seat].id().to_string(),
                    amount: chips,
                });
            }
            pots.push(PotRecord {
                amount: award.amount,
                eligible: award
                    .eligible
                    .iter()
                    .map(|&s| self.players[s].id().to_string())
                    .collect(),
                winners,
                uncontested: award.uncontested,
            });
        }

        let settled: u64 = self.players.iter().map(|p| u64::from(p.stack())).sum();
        if settled != self.start_total {
            return Err(self.violation(format!(
                "stacks total {} after settlement, expected {}",
                settled, self.start_total
            )));
        }
        self.state.finish(Phase::Settled);

        let net: BTreeMap<String, i64> = dealt
            .iter()
            .map(|&s| {
                let p = &self.players[s];
                (
                    p.id().to_string(),
                    i64::from(p.stack()) - i64::from(self.starting[s]),
                )
            })
            .collect();
        let seats = dealt
            .iter()
            .map(|&s| SeatRecord {
                seat: s,
                player_id: self.players[s].id().to_string(),
                position: self.positions[s].unwrap_or(Position::Middle),
                starting_stack: self.starting[s],
            })
            .collect();
        debug!(pots = pots.len(), showdown, "hand settled");

        Ok(HandRecord {
            hand_id: String::new(),
            hand_no: 0,
            seed: None,
            button: self.players[button].id().to_string(),
            small_blind: self.config.small_blind,
            big_blind: self.config.big_blind,
            seats,
            blinds: self.blinds,
            actions: self.actions,
            board: self.state.board,
            pots,
            net,
            showdown: showdown.then_some(revealed),
            events: self.events,
            ts: None,
        })
    }

    /// Stacks plus committed chips must equal the total at hand start.
    fn check_chips(&self) -> Result<(), GameError> {
        let held: u64 = self
            .players
            .iter()
            .map(|p| u64::from(p.stack()) + u64::from(p.hand_committed()))
            .sum();
        if held != self.start_total {
            return Err(self.violation(format!(
                "chips in play {} differ from {} at hand start",
                held, self.start_total
            )));
        }
        let committed: u64 = self.players.iter().map(|p| u64::from(p.hand_committed())).sum();
        if committed != u64::from(self.pots.total()) {
            return Err(self.violation(format!(
                "pot holds {} but players committed {}",
                self.pots.total(),
                committed
            )));
        }
        Ok(())
    }

    /// Hole cards, board and undealt deck must be 52 distinct cards.
    fn check_cards(&self) -> Result<(), GameError> {
        let mut seen: HashSet<Card> = HashSet::with_capacity(52);
        let holes = self
            .players
            .iter()
            .filter_map(|p| p.hole_cards())
            .flatten();
        let all = holes
            .chain(self.state.board.iter().copied())
            .chain(self.deck.undealt().iter().copied());
        let mut count = 0;
        for card in all {
            count += 1;
            if !seen.insert(card) {
                return Err(self.violation(format!("card {} appears twice", card)));
            }
        }
        if count != 52 {
            return Err(self.violation(format!("{} cards accounted for", count)));
        }
        Ok(())
    }

    fn violation(&self, detail: String) -> GameError {
        error!(phase = ?self.state.phase, %detail, "invariant violated");
        GameError::InvariantViolation(detail)
    }
}
