//! Look at the top project cards and keep some.
//!
//! A top-card decision is a multi-stage action. Executing it draws `look`
//! cards into the player's choice zone and parks the action on the state as
//! the action in progress. Each following stage offers a keep (buy) and/or a
//! discard for the first undecided card:
//!
//! - keep is offered while the keep quota is not exhausted;
//! - discard is offered while enough cards remain to still reach the quota.
//!
//! When the quota is reached early, the remaining cards are discarded in
//! one go. The decision completes once the quota is met or every drawn card
//! has been decided. A decision with nothing to keep (an empty pile, or a
//! quota of 0) completes as soon as it is drawn and is never parked.

use serde::{Deserialize, Serialize};

use super::action::{ActionKind, TmAction};
use crate::core::PlayerId;
use crate::games::terraforming::state::TmGameState;
use crate::rules::ExtendedSequence;

/// Progress of a keep/discard decision.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopCardDecision {
    look: u32,
    keep: u32,
    buy: bool,
    stage: u32,
    kept: u32,
}

impl TopCardDecision {
    #[must_use]
    pub const fn new(look: u32, keep: u32, buy: bool) -> Self {
        Self { look, keep, buy, stage: 0, kept: 0 }
    }

    #[must_use]
    pub const fn look(&self) -> u32 {
        self.look
    }

    #[must_use]
    pub const fn keep(&self) -> u32 {
        self.keep
    }

    #[must_use]
    pub const fn stage(&self) -> u32 {
        self.stage
    }

    #[must_use]
    pub const fn kept(&self) -> u32 {
        self.kept
    }

    /// Draw the cards to decide on and reset progress.
    ///
    /// A short project pile lowers `look` (and `keep` with it) to the number
    /// of cards actually drawn.
    pub(crate) fn begin(&mut self, state: &mut TmGameState, player: PlayerId) {
        let mut drawn = 0;
        for _ in 0..self.look {
            match state.pick_project_card(0) {
                Some(card) => {
                    state.add_to_card_choice(player, card);
                    drawn += 1;
                }
                None => {
                    tracing::warn!(%player, look = self.look, drawn, "project pile exhausted during top-card decision");
                    break;
                }
            }
        }
        self.look = drawn;
        self.keep = self.keep.min(drawn);
        self.stage = 0;
        self.kept = 0;
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.kept == self.keep || self.stage == self.look
    }

    /// Keep and/or discard for the first card still in `player`'s choice
    /// zone.
    #[must_use]
    pub fn available_actions(&self, state: &TmGameState, player: PlayerId) -> Vec<TmAction> {
        let Some(&card) = state.card_choice(player).front() else {
            return Vec::new();
        };
        if self.is_complete() {
            return Vec::new();
        }

        let mut actions = Vec::with_capacity(2);
        if self.look == 1 || self.kept < self.keep {
            let cost = if self.buy { state.params().project_purchase_cost } else { 0 };
            actions.push(TmAction::buy_card(card, cost).with_player(player).free());
        }
        let undecided = self.look.saturating_sub(self.stage);
        let still_needed = self.keep.saturating_sub(self.kept);
        if self.look == 1 || undecided > still_needed {
            actions.push(TmAction::discard_card(card).with_player(player).free());
        }
        actions
    }

    /// Advance past a sub-action taken by `player`.
    ///
    /// A refused purchase discards the card instead of keeping it.
    /// Whatever is left in the zone when the decision completes is
    /// discarded.
    pub(crate) fn register(&mut self, state: &mut TmGameState, player: PlayerId, action: &TmAction) {
        self.stage += 1;
        if let ActionKind::BuyCard { card, .. } = action.kind {
            if state.card_choice(player).index_of(&card).is_none() {
                self.kept += 1;
            } else {
                tracing::debug!(%player, %card, "purchase refused, card discarded");
                TmAction::discard_card(card).with_player(player).free().execute(state);
            }
        }
        tracing::debug!(%player, stage = self.stage, kept = self.kept, "top-card decision advanced");

        if self.is_complete() {
            let rest: Vec<_> = state.card_choice(player).iter().copied().collect();
            for card in rest {
                TmAction::discard_card(card).with_player(player).free().execute(state);
            }
        }
    }
}

impl std::fmt::Display for TopCardDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = if self.buy { "buy" } else { "keep" };
        write!(f, "Look at {} cards, {} {}", self.look, verb, self.keep)
    }
}

impl ExtendedSequence for TmAction {
    type State = TmGameState;
    type Action = TmAction;

    fn compute_available_actions(&self, state: &TmGameState) -> Vec<TmAction> {
        match &self.kind {
            ActionKind::TopCardDecision(decision) => {
                decision.available_actions(state, self.acting_player(state))
            }
            _ => Vec::new(),
        }
    }

    fn current_player(&self, state: &TmGameState) -> PlayerId {
        self.acting_player(state)
    }

    fn register_action_taken(&mut self, state: &mut TmGameState, action: &TmAction) {
        let player = self.acting_player(state);
        if let ActionKind::TopCardDecision(decision) = &mut self.kind {
            decision.register(state, player, action);
        }
    }

    fn execution_complete(&self, _state: &TmGameState) -> bool {
        match &self.kind {
            ActionKind::TopCardDecision(decision) => decision.is_complete(),
            _ => self.played,
        }
    }
}
