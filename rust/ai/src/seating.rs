use std::collections::HashMap;

use crate::AIOpponent;
use holdem_engine::decision::{DecisionMaker, DecisionRequest, DecisionResponse};
use holdem_engine::errors::GameError;

/// Routes each decision request to the policy seated under the player's id.
#[derive(Default)]
pub struct Seating {
    policies: HashMap<String, Box<dyn AIOpponent>>,
}

impl Seating {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seats `policy` for `player_id`, replacing any previous one.
    pub fn seat(&mut self, player_id: impl Into<String>, policy: Box<dyn AIOpponent>) {
        self.policies.insert(player_id.into(), policy);
    }

    pub fn policy_name(&self, player_id: &str) -> Option<&str> {
        self.policies.get(player_id).map(|p| p.name())
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl DecisionMaker for Seating {
    fn decide(&mut self, request: &DecisionRequest) -> Result<DecisionResponse, GameError> {
        let policy = self.policies.get_mut(&request.player_id).ok_or_else(|| {
            GameError::CollaboratorUnavailable {
                player: request.player_id.clone(),
                reason: "no policy seated".to_string(),
            }
        })?;
        Ok(policy.get_action(request).into())
    }
}
