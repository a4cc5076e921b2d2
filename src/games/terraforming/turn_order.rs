//! Turn order bookkeeping.
//!
//! Non-free actions are registered here as they execute. The record feeds
//! action limits per turn and gives hosts a history of who did what in which
//! generation.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::actions::TmAction;
use super::types::ActionType;
use crate::core::{PlayerId, PlayerMap};

/// One registered action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// Human-readable label of the action.
    pub label: String,

    pub action_type: Option<ActionType>,

    /// Generation the action was taken in.
    pub generation: u32,

    /// Sequence number within the generation.
    pub sequence: u32,
}

/// Per-player action counts and action history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TmTurnOrder {
    generation: u32,
    sequence: u32,
    actions_this_turn: PlayerMap<u32>,
    actions_total: PlayerMap<u32>,
    history: Vector<ActionRecord>,
}

impl TmTurnOrder {
    /// Turn order for `player_count` players, starting in generation 1.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            generation: 1,
            sequence: 0,
            actions_this_turn: PlayerMap::with_default(player_count),
            actions_total: PlayerMap::with_default(player_count),
            history: Vector::new(),
        }
    }

    /// Record a non-free action taken by `player`.
    pub fn register_action_taken(&mut self, action: &TmAction, player: PlayerId) {
        self.actions_this_turn[player] += 1;
        self.actions_total[player] += 1;
        self.history.push_back(ActionRecord {
            player,
            label: action.label(),
            action_type: action.action_type,
            generation: self.generation,
            sequence: self.sequence,
        });
        self.sequence += 1;
    }

    #[must_use]
    pub fn actions_this_turn(&self, player: PlayerId) -> u32 {
        self.actions_this_turn[player]
    }

    #[must_use]
    pub fn actions_total(&self, player: PlayerId) -> u32 {
        self.actions_total[player]
    }

    /// Reset the per-turn count when `player` hands over.
    pub fn end_turn(&mut self, player: PlayerId) {
        self.actions_this_turn[player] = 0;
    }

    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Start the next generation.
    pub fn next_generation(&mut self) {
        self.generation += 1;
        self.sequence = 0;
        for player in self.actions_this_turn.player_ids().collect::<Vec<_>>() {
            self.actions_this_turn[player] = 0;
        }
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }
}
