//! Contract between the engine and whoever chooses actions.
//!
//! The engine sends a [`DecisionRequest`] and blocks until a
//! [`DecisionResponse`] comes back. Responses are raw (a tag plus an optional
//! amount) and are parsed at this boundary, so scripted policies, remote
//! agents and text-producing models all plug in the same way.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cards::Card;
use crate::errors::GameError;
use crate::logger::Street;
use crate::player::{ActionKind, PlayerAction, Position};
pub use crate::rules::LegalAction;

/// Everything a player sees when asked to act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRequest {
    pub player_id: String,
    pub seat: usize,
    pub position: Position,
    pub street: Street,
    pub hole_cards: [Card; 2],
    pub community: Vec<Card>,
    /// All chips committed this hand, current street included
    pub pot: u32,
    pub current_bet: u32,
    pub to_call: u32,
    pub min_raise: u32,
    pub stack: u32,
    /// Player's street total so far
    pub committed: u32,
    pub legal_actions: Vec<LegalAction>,
    /// Why the previous answer was rejected, on the single retry
    #[serde(default)]
    pub retry_reason: Option<String>,
}

impl DecisionRequest {
    pub fn legal(&self, kind: ActionKind) -> Option<&LegalAction> {
        self.legal_actions.iter().find(|a| a.kind == kind)
    }

    pub fn can(&self, kind: ActionKind) -> bool {
        self.legal(kind).is_some()
    }
}

/// Raw answer from a collaborator: an action tag and, for bet/raise, a street total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub action: String,
    #[serde(default)]
    pub amount: Option<u32>,
}

impl DecisionResponse {
    pub fn new(action: impl Into<String>, amount: Option<u32>) -> Self {
        Self {
            action: action.into(),
            amount,
        }
    }

    /// Parses a response out of free text.
    ///
    /// Looks for a fenced ```json block first, then for any JSON object in the
    /// text (nested ones included) that carries an `"action"` key, then tries
    /// the whole text. The amount may be a number or a numeric string.
    pub fn from_text(text: &str) -> Result<Self, GameError> {
        if let Some(start) = text.find("```json") {
            let body = &text[start + 7..];
            if let Some(end) = body.find("```") {
                if let Ok(value) = serde_json::from_str::<Value>(body[..end].trim()) {
                    if let Some(resp) = Self::from_value(&value)? {
                        return Ok(resp);
                    }
                }
            }
        }
        for (open, _) in text.match_indices('{') {
            let mut objects = serde_json::Deserializer::from_str(&text[open..]).into_iter::<Value>();
            if let Some(Ok(value)) = objects.next() {
                if let Some(resp) = Self::from_value(&value)? {
                    return Ok(resp);
                }
            }
        }
        if let Ok(value) = serde_json::from_str::<Value>(text.trim()) {
            if let Some(resp) = Self::from_value(&value)? {
                return Ok(resp);
            }
        }
        Err(GameError::MalformedResponse(format!(
            "no action object found in {:?}",
            truncate(text, 80)
        )))
    }

    fn from_value(value: &Value) -> Result<Option<Self>, GameError> {
        let Some(obj) = value.as_object() else {
            return Ok(None);
        };
        let Some(action) = obj.get("action") else {
            return Ok(None);
        };
        let action = action
            .as_str()
            .ok_or_else(|| GameError::MalformedResponse("action must be a string".to_string()))?;
        let amount = match obj.get("amount") {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => match (n.as_u64(), n.as_f64()) {
                (Some(v), _) => Some(v),
                (None, Some(f)) if f >= 0.0 && f.fract() == 0.0 => Some(f as u64),
                _ => {
                    return Err(GameError::MalformedResponse(format!(
                        "amount {} is not a chip count",
                        n
                    )))
                }
            },
            Some(Value::String(s)) => Some(s.trim().parse::<u64>().map_err(|_| {
                GameError::MalformedResponse(format!("amount {:?} is not a number", s))
            })?),
            Some(other) => {
                return Err(GameError::MalformedResponse(format!(
                    "amount {} is not a number",
                    other
                )))
            }
        };
        let amount = amount
            .map(|a| {
                u32::try_from(a)
                    .map_err(|_| GameError::MalformedResponse(format!("amount {} too large", a)))
            })
            .transpose()?;
        Ok(Some(Self::new(action, amount)))
    }

    /// Converts the raw tag and amount into an action. Amounts are ignored for
    /// fold, check, call and all-in and required for bet and raise.
    pub fn to_action(&self) -> Result<PlayerAction, GameError> {
        let kind = ActionKind::parse(&self.action).ok_or_else(|| {
            GameError::MalformedResponse(format!("unknown action {:?}", self.action))
        })?;
        let amount = || {
            self.amount.ok_or_else(|| {
                GameError::MalformedResponse(format!("{} requires an amount", kind))
            })
        };
        Ok(match kind {
            ActionKind::Fold => PlayerAction::Fold,
            ActionKind::Check => PlayerAction::Check,
            ActionKind::Call => PlayerAction::Call,
            ActionKind::Bet => PlayerAction::Bet(amount()?),
            ActionKind::Raise => PlayerAction::Raise(amount()?),
            ActionKind::AllIn => PlayerAction::AllIn,
        })
    }
}

impl From<PlayerAction> for DecisionResponse {
    fn from(action: PlayerAction) -> Self {
        let amount = match action {
            PlayerAction::Bet(a) | PlayerAction::Raise(a) => Some(a),
            _ => None,
        };
        Self::new(action.kind().as_str(), amount)
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Anything that can answer a decision request.
///
/// Errors that [`GameError::is_recoverable`] accepts are resolved by the engine
/// with its retry/fold fallback; any other error aborts the hand.
pub trait DecisionMaker {
    fn decide(&mut self, request: &DecisionRequest) -> Result<DecisionResponse, GameError>;
}

impl<F> DecisionMaker for F
where
    F: FnMut(&DecisionRequest) -> Result<DecisionResponse, GameError>,
{
    fn decide(&mut self, request: &DecisionRequest) -> Result<DecisionResponse, GameError> {
        self(request)
    }
}

/// Runs a collaborator on a worker thread and stops waiting after `timeout`.
///
/// A worker that misses the deadline is abandoned; its late answer is dropped.
/// A worker that dies without answering reports the collaborator unavailable.
pub struct TimedDecisionMaker<D> {
    inner: Arc<Mutex<D>>,
    timeout: Duration,
}

impl<D> TimedDecisionMaker<D>
where
    D: DecisionMaker + Send + 'static,
{
    pub fn new(inner: D, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inner)),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<D> DecisionMaker for TimedDecisionMaker<D>
where
    D: DecisionMaker + Send + 'static,
{
    fn decide(&mut self, request: &DecisionRequest) -> Result<DecisionResponse, GameError> {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let req = request.clone();
        let player = request.player_id.clone();
        thread::Builder::new()
            .name(format!("decide-{}", player))
            .spawn(move || {
                let result = match inner.lock() {
                    Ok(mut d) => d.decide(&req),
                    Err(_) => Err(GameError::CollaboratorUnavailable {
                        player: req.player_id.clone(),
                        reason: "collaborator panicked earlier".to_string(),
                    }),
                };
                // receiver may have given up already
                let _ = tx.send(result);
            })
            .map_err(|e| GameError::CollaboratorUnavailable {
                player: player.clone(),
                reason: e.to_string(),
            })?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(GameError::DecisionTimeout {
                player,
                waited_ms: self.timeout.as_millis() as u64,
            }),
            Err(RecvTimeoutError::Disconnected) => Err(GameError::CollaboratorUnavailable {
                player,
                reason: "decision worker exited without answering".to_string(),
            }),
        }
    }
}
