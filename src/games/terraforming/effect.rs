//! Persisting effects.
//!
//! A persisting effect is a standing rule owned by a player. Every action
//! executed by any player is offered to every player's effects before the
//! action's own effect applies; an effect whose trigger matches runs its
//! result, a free-text action encoding, for its owner.
//!
//! ## Example
//!
//! ```
//! use tabletop_rules::games::terraforming::{EffectTrigger, PersistingEffect, Tag};
//!
//! // "When you play a space card, gain 2 megacredits."
//! let effect = PersistingEffect::new(EffectTrigger::PlayCard { tag: Tag::Space }, "inc-megacredits-2");
//! assert!(effect.self_only);
//! ```

use serde::{Deserialize, Serialize};

use super::actions::{ActionKind, TmAction};
use super::state::TmGameState;
use super::types::{Resource, Tag, Tile};
use crate::core::PlayerId;

/// What an effect reacts to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTrigger {
    /// A tile is placed. `tile: None` matches any tile; a non-empty
    /// `resources_gained` requires the placement to grant one of them.
    PlaceTile {
        on_mars: bool,
        tile: Option<Tile>,
        resources_gained: Vec<Resource>,
    },

    /// A card carrying `tag` is played.
    PlayCard { tag: Tag },

    /// An action with a nominal cost of at least `min_cost` is paid for.
    PayForAction { min_cost: i32 },
}

/// A triggered rule held by a player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersistingEffect {
    /// Only the owner's own actions trigger it.
    pub self_only: bool,

    /// Action encoding run when the effect fires.
    pub result: String,

    pub trigger: EffectTrigger,
}

impl PersistingEffect {
    /// A self-only effect.
    #[must_use]
    pub fn new(trigger: EffectTrigger, result: impl Into<String>) -> Self {
        Self {
            self_only: true,
            result: result.into(),
            trigger,
        }
    }

    /// Let actions of any player trigger the effect.
    #[must_use]
    pub fn for_any_player(mut self) -> Self {
        self.self_only = false;
        self
    }

    /// Whether `action`, about to be executed, triggers this effect for
    /// `owner`.
    #[must_use]
    pub fn can_execute(&self, state: &TmGameState, action: &TmAction, owner: PlayerId) -> bool {
        if self.self_only && action.acting_player(state) != owner {
            return false;
        }

        match (&self.trigger, &action.kind) {
            (
                EffectTrigger::PlaceTile { on_mars, tile, resources_gained },
                ActionKind::PlaceTile { tile: placed, on_mars: placed_on_mars, bonus, .. },
            ) => {
                (!on_mars || *placed_on_mars)
                    && (tile.is_none() || tile == placed)
                    && (resources_gained.is_empty()
                        || resources_gained.iter().any(|r| bonus.contains(r)))
            }

            (EffectTrigger::PlayCard { tag }, ActionKind::PlayCard { card }) => state
                .card(*card)
                .is_some_and(|c| c.tags.contains(tag)),

            (EffectTrigger::PayForAction { min_cost }, ActionKind::PayForAction { cost, .. }) => {
                cost >= min_cost
            }

            _ => false,
        }
    }

    /// Run the result for `owner` if `action` triggers this effect.
    ///
    /// Returns `true` if the result action ran and succeeded.
    pub fn execute(&self, state: &mut TmGameState, action: &TmAction, owner: PlayerId) -> bool {
        if !self.can_execute(state, action, owner) {
            return false;
        }

        let parsed = TmAction::parse(&self.result);
        let Some(mut result) = parsed.action else {
            tracing::warn!(result = %self.result, "persisting effect result is not an action");
            return false;
        };

        result.player = Some(owner);
        result.free = true;
        tracing::debug!(%owner, trigger = ?self.trigger, result = %parsed.label, "persisting effect fired");
        result.execute(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::terraforming::{MapTileType, TileDestination, TmGameParameters};

    fn greenery(player: u8, on_mars: bool) -> TmAction {
        TmAction::place_tile(Some(Tile::Greenery), TileDestination::Region(MapTileType::Ground), on_mars)
            .with_player(PlayerId::new(player))
    }

    #[test]
    fn test_self_only_ignores_opponents() {
        let state = TmGameState::new(TmGameParameters::default(), 2);
        let effect = PersistingEffect::new(
            EffectTrigger::PlaceTile { on_mars: false, tile: None, resources_gained: vec![] },
            "inc-plant-1",
        );

        assert!(effect.can_execute(&state, &greenery(0, true), PlayerId::new(0)));
        assert!(!effect.can_execute(&state, &greenery(1, true), PlayerId::new(0)));
        assert!(effect
            .clone()
            .for_any_player()
            .can_execute(&state, &greenery(1, true), PlayerId::new(0)));
    }

    #[test]
    fn test_place_tile_filters() {
        let state = TmGameState::new(TmGameParameters::default(), 1);
        let p0 = PlayerId::new(0);
        let ocean_on_mars = PersistingEffect::new(
            EffectTrigger::PlaceTile { on_mars: true, tile: Some(Tile::Ocean), resources_gained: vec![] },
            "inc-megacredits-2",
        );

        assert!(!ocean_on_mars.can_execute(&state, &greenery(0, true), p0));

        let ocean = TmAction::place_tile(Some(Tile::Ocean), TileDestination::Region(MapTileType::Ocean), false)
            .with_player(p0);
        assert!(!ocean_on_mars.can_execute(&state, &ocean, p0));

        let ocean = TmAction::place_tile(Some(Tile::Ocean), TileDestination::Region(MapTileType::Ocean), true)
            .with_player(p0);
        assert!(ocean_on_mars.can_execute(&state, &ocean, p0));
    }

    #[test]
    fn test_execute_runs_result_for_owner() {
        let mut state = TmGameState::new(TmGameParameters::default(), 2);
        let effect = PersistingEffect::new(
            EffectTrigger::PlaceTile { on_mars: true, tile: None, resources_gained: vec![] },
            "inc-megacredits-2",
        )
        .for_any_player();

        assert!(effect.execute(&mut state, &greenery(1, true), PlayerId::new(0)));
        assert_eq!(state.resource(PlayerId::new(0), Resource::MegaCredits), 2);
        assert_eq!(state.resource(PlayerId::new(1), Resource::MegaCredits), 0);
    }

    #[test]
    fn test_unparseable_result_does_nothing() {
        let mut state = TmGameState::new(TmGameParameters::default(), 1);
        let effect = PersistingEffect::new(EffectTrigger::PayForAction { min_cost: 0 }, "gain a friend");
        let pay = TmAction::pay_for_action(TmAction::generic(), Resource::MegaCredits, 0)
            .with_player(PlayerId::new(0));

        assert!(effect.can_execute(&state, &pay, PlayerId::new(0)));
        assert!(!effect.execute(&mut state, &pay, PlayerId::new(0)));
    }
}
