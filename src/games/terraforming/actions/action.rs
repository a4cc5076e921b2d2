//! Executable colonization-game actions.
//!
//! An action is a set of common fields plus an [`ActionKind`] naming its
//! primary effect. All kinds share one execution pipeline:
//!
//! 1. Resolve the acting player (`None` means the current player).
//! 2. Register with the turn order, unless the action is free.
//! 3. Mark the action played.
//! 4. Offer the action to every player's persisting effects.
//! 5. Check the requirement gate and apply the primary effect.
//! 6. Convert the acting player's queued `Card` resource into drawn project
//!    cards.
//!
//! Steps 4 and 6 run even when step 5 refuses; a refusal does not roll
//! back the cross-cutting effects.

use serde::{Deserialize, Serialize};

use super::top_card::TopCardDecision;
use crate::core::{ComponentId, PlayerId};
use crate::games::terraforming::requirement::{ActionContext, Requirement};
use crate::games::terraforming::state::{TilePlacement, TmGameState};
use crate::games::terraforming::types::{
    ActionType, GlobalParameter, MapTileType, Resource, StandardProject, Tile,
};

/// Where a tile goes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileDestination {
    /// Any legal space of this region, chosen by the player.
    Region(MapTileType),

    /// A specific named location.
    Named(String),
}

impl std::fmt::Display for TileDestination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileDestination::Region(region) => write!(f, "{}", region),
            TileDestination::Named(name) => f.write_str(name),
        }
    }
}

/// The primary effect of an action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// No primary effect (pass, or a bare turn action).
    Generic,

    /// Signed change to the counter with this id. Refused if the change is
    /// zero or would leave the counter's bounds.
    ModifyCounter { counter: ComponentId, change: i32 },

    /// Change to a player's resource stock or production.
    ModifyResource {
        resource: Resource,
        amount: i32,
        production: bool,
    },

    /// Change to a global parameter.
    ModifyGlobalParameter { parameter: GlobalParameter, amount: i32 },

    /// Fixed change to a player's stock.
    ResourceTransaction { resource: Resource, amount: i32 },

    /// Put a tile on the board. `bonus` lists resources the space grants.
    PlaceTile {
        tile: Option<Tile>,
        destination: TileDestination,
        on_mars: bool,
        bonus: Vec<Resource>,
    },

    /// Pay `cost` of `cost_resource`, less discounts, then run `action`.
    PayForAction {
        action: Box<TmAction>,
        cost_resource: Resource,
        cost: i32,
        card: Option<ComponentId>,
    },

    /// Keep a card from the choice zone, paying `cost` megacredits.
    BuyCard { card: ComponentId, cost: i32 },

    /// Discard a card from the choice zone or the hand.
    DiscardCard { card: ComponentId },

    /// Play a card from hand.
    PlayCard { card: ComponentId },

    /// Look at the top cards and keep some of them.
    TopCardDecision(TopCardDecision),
}

/// An executable action.
///
/// `Clone` is a full deep copy, so a copy can be executed against a
/// snapshot without affecting the original.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TmAction {
    /// Acting player. `None` resolves to the current player on execution.
    pub player: Option<PlayerId>,

    /// Free actions do not count towards the turn order.
    pub free: bool,

    pub pass: bool,

    /// Must hold for the primary effect to apply.
    pub requirement: Option<Requirement>,

    pub action_type: Option<ActionType>,

    pub standard_project: Option<StandardProject>,

    /// Set once the action has been executed.
    pub played: bool,

    pub kind: ActionKind,
}

impl TmAction {
    /// A non-free action for the current player.
    #[must_use]
    pub fn new(kind: ActionKind) -> Self {
        Self {
            player: None,
            free: false,
            pass: false,
            requirement: None,
            action_type: None,
            standard_project: None,
            played: false,
            kind,
        }
    }

    #[must_use]
    pub fn generic() -> Self {
        Self::new(ActionKind::Generic)
    }

    #[must_use]
    pub fn pass() -> Self {
        Self {
            pass: true,
            ..Self::generic()
        }
    }

    #[must_use]
    pub fn modify_counter(counter: ComponentId, change: i32) -> Self {
        Self::new(ActionKind::ModifyCounter { counter, change })
    }

    #[must_use]
    pub fn modify_resource(resource: Resource, amount: i32, production: bool) -> Self {
        Self::new(ActionKind::ModifyResource { resource, amount, production })
    }

    #[must_use]
    pub fn modify_global_parameter(parameter: GlobalParameter, amount: i32) -> Self {
        Self::new(ActionKind::ModifyGlobalParameter { parameter, amount })
    }

    #[must_use]
    pub fn resource_transaction(resource: Resource, amount: i32) -> Self {
        Self::new(ActionKind::ResourceTransaction { resource, amount })
    }

    #[must_use]
    pub fn place_tile(tile: Option<Tile>, destination: TileDestination, on_mars: bool) -> Self {
        Self::new(ActionKind::PlaceTile {
            tile,
            destination,
            on_mars,
            bonus: Vec::new(),
        })
    }

    /// Wrap `action` behind a payment. The cost is stored as a positive
    /// amount whatever sign it is given in.
    #[must_use]
    pub fn pay_for_action(action: TmAction, cost_resource: Resource, cost: i32) -> Self {
        Self::new(ActionKind::PayForAction {
            action: Box::new(action),
            cost_resource,
            cost: cost.abs(),
            card: None,
        })
    }

    #[must_use]
    pub fn buy_card(card: ComponentId, cost: i32) -> Self {
        Self::new(ActionKind::BuyCard { card, cost })
    }

    #[must_use]
    pub fn discard_card(card: ComponentId) -> Self {
        Self::new(ActionKind::DiscardCard { card })
    }

    #[must_use]
    pub fn play_card(card: ComponentId) -> Self {
        Self::new(ActionKind::PlayCard { card }).with_action_type(ActionType::PlayCard)
    }

    /// Free multi-stage decision: look at `look` cards, keep `keep`, paying
    /// the project purchase cost for each kept card if `buy`.
    #[must_use]
    pub fn top_card_decision(look: u32, keep: u32, buy: bool) -> Self {
        Self::new(ActionKind::TopCardDecision(TopCardDecision::new(look, keep, buy))).free()
    }

    // === Builders ===

    #[must_use]
    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    /// Mark as a free action.
    #[must_use]
    pub fn free(mut self) -> Self {
        self.free = true;
        self
    }

    #[must_use]
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirement = Some(requirement);
        self
    }

    #[must_use]
    pub fn with_action_type(mut self, action_type: ActionType) -> Self {
        self.action_type = Some(action_type);
        self
    }

    #[must_use]
    pub fn with_standard_project(mut self, project: StandardProject) -> Self {
        self.action_type = Some(ActionType::StandardProject);
        self.standard_project = Some(project);
        self
    }

    /// Resources granted by the space a tile goes on.
    #[must_use]
    pub fn with_bonus(mut self, resources: impl IntoIterator<Item = Resource>) -> Self {
        if let ActionKind::PlaceTile { bonus, .. } = &mut self.kind {
            bonus.extend(resources);
        }
        self
    }

    /// Card a payment is made for, used for tag discounts.
    #[must_use]
    pub fn for_card(mut self, id: ComponentId) -> Self {
        if let ActionKind::PayForAction { card, .. } = &mut self.kind {
            *card = Some(id);
        }
        self
    }

    // === Execution ===

    /// The player this action acts for in `state`.
    #[must_use]
    pub fn acting_player(&self, state: &TmGameState) -> PlayerId {
        self.player.unwrap_or_else(|| state.current_player())
    }

    /// Execute against `state`. Returns whether the primary effect applied.
    pub fn execute(&mut self, state: &mut TmGameState) -> bool {
        let player = self.acting_player(state);
        if !self.free {
            state.turn_order_mut().register_action_taken(self, player);
        }
        self.played = true;

        self.trigger_persisting_effects(state);

        let gate = self
            .requirement
            .as_ref()
            .map_or(true, |r| r.test_condition(state, player));
        let success = if gate {
            self.apply(state, player)
        } else {
            tracing::debug!(action = %self, %player, "requirement not met");
            false
        };

        if !success {
            tracing::debug!(action = %self, %player, "action refused");
        }

        state.convert_card_resources(player);
        success
    }

    fn trigger_persisting_effects(&self, state: &mut TmGameState) {
        if !state.enter_effect_scan() {
            tracing::warn!(
                action = %self,
                limit = state.params().effect_depth_limit,
                "persisting effect nesting limit reached, scan skipped"
            );
            return;
        }

        for owner in state.player_ids().collect::<Vec<_>>() {
            let effects: Vec<_> = state.persisting_effects(owner).iter().cloned().collect();
            for effect in &effects {
                effect.execute(state, self, owner);
            }
        }

        state.exit_effect_scan();
    }

    fn apply(&mut self, state: &mut TmGameState, player: PlayerId) -> bool {
        if let ActionKind::TopCardDecision(decision) = &mut self.kind {
            decision.begin(state, player);
            self.player = Some(player);
            if decision.is_complete() {
                let drawn: Vec<_> = state.card_choice(player).iter().copied().collect();
                tracing::debug!(%player, drawn = drawn.len(), "top-card decision complete on draw");
                for card in drawn {
                    state.remove_from_card_choice(player, card);
                    state.discard(card);
                }
                return true;
            }
            state.set_action_in_progress(self.clone());
            return true;
        }

        match &self.kind {
            ActionKind::Generic | ActionKind::TopCardDecision(_) => true,

            ActionKind::ModifyCounter { counter, change } => {
                let Some(c) = state.counter_mut(*counter) else {
                    tracing::warn!(counter = %counter, "modify counter on unknown component");
                    return false;
                };
                if *change == 0 || !c.can_apply(*change) {
                    return false;
                }
                c.increment(*change);
                true
            }

            ActionKind::ModifyResource { resource, amount, production } => {
                state.modify_resource(player, *resource, *amount, *production)
            }

            ActionKind::ModifyGlobalParameter { parameter, amount } => {
                raise_global_parameter(state, *parameter, *amount)
            }

            ActionKind::ResourceTransaction { resource, amount } => {
                state.modify_resource(player, *resource, *amount, false)
            }

            ActionKind::PlaceTile { tile, destination, on_mars, bonus } => {
                state.place_tile(TilePlacement {
                    player,
                    tile: *tile,
                    destination: destination.clone(),
                    on_mars: *on_mars,
                });
                if *on_mars {
                    match tile {
                        Some(Tile::Ocean) => {
                            raise_global_parameter(state, GlobalParameter::OceanTiles, 1);
                        }
                        Some(Tile::Greenery) => {
                            raise_global_parameter(state, GlobalParameter::Oxygen, 1);
                        }
                        _ => {}
                    }
                }
                for resource in bonus {
                    state.modify_resource(player, *resource, 1, false);
                }
                true
            }

            ActionKind::PayForAction { action, cost_resource, cost, card } => {
                let discount = {
                    let ctx = ActionContext {
                        action_type: self.action_type,
                        standard_project: self.standard_project,
                        card: card.and_then(|id| state.card(id)),
                    };
                    state.discount_for(player, &ctx)
                };
                let due = (cost - discount).max(0);
                if !state.modify_resource(player, *cost_resource, -due, false) {
                    return false;
                }

                let mut inner = (**action).clone();
                inner.player = Some(player);
                inner.free = true;
                if inner.execute(state) {
                    return true;
                }
                // Refund without marking the resource as increased.
                let payment = state.resource_id(player, *cost_resource, false);
                if let Some(counter) = state.counter_mut(payment) {
                    counter.increment(due);
                }
                tracing::debug!(%player, resource = %cost_resource, due, "paid action refused, payment refunded");
                false
            }

            ActionKind::BuyCard { card, cost } => {
                if state.card_choice(player).index_of(card).is_none() {
                    return false;
                }
                if *cost > 0 && !state.modify_resource(player, Resource::MegaCredits, -cost, false) {
                    return false;
                }
                state.remove_from_card_choice(player, *card);
                state.add_to_hand(player, *card);
                true
            }

            ActionKind::DiscardCard { card } => {
                let removed = state.remove_from_card_choice(player, *card)
                    || state.remove_from_hand(player, *card);
                if removed {
                    state.discard(*card);
                }
                removed
            }

            ActionKind::PlayCard { card } => play_card(state, player, *card),
        }
    }

    /// Short human-readable description.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.kind {
            ActionKind::Generic if self.pass => "Pass".to_string(),
            ActionKind::Generic => match (self.action_type, self.standard_project) {
                (_, Some(project)) => project.to_string(),
                (Some(action_type), None) => action_type.to_string(),
                (None, None) => "Pass".to_string(),
            },
            ActionKind::ModifyCounter { counter, change } => {
                format!("Modify counter {} by {}", counter, change)
            }
            ActionKind::ModifyResource { resource, amount, production: true } => {
                format!("{:+} {} production", amount, resource)
            }
            ActionKind::ModifyResource { resource, amount, production: false } => {
                format!("{:+} {}", amount, resource)
            }
            ActionKind::ModifyGlobalParameter { parameter, amount } => {
                format!("{:+} {}", amount, parameter)
            }
            ActionKind::ResourceTransaction { resource, amount } => {
                format!("{:+} {}", amount, resource)
            }
            ActionKind::PlaceTile { tile: Some(tile), destination, .. } => {
                format!("Place {} on {}", tile, destination)
            }
            ActionKind::PlaceTile { tile: None, destination, .. } => {
                format!("Place tile on {}", destination)
            }
            ActionKind::PayForAction { action, cost_resource, cost, .. } => {
                format!("Pay {} {} for {}", cost, cost_resource, action.label())
            }
            ActionKind::BuyCard { card, cost } => format!("Buy {} for {}", card, cost),
            ActionKind::DiscardCard { card } => format!("Discard {}", card),
            ActionKind::PlayCard { card } => format!("Play {}", card),
            ActionKind::TopCardDecision(decision) => decision.to_string(),
        }
    }

    /// Description naming counters and cards as `state` knows them.
    #[must_use]
    pub fn describe(&self, state: &TmGameState) -> String {
        match &self.kind {
            ActionKind::ModifyCounter { counter, change } => match state.counter(*counter) {
                Some(c) => format!("Modify counter {} by {}", c, change),
                None => self.label(),
            },
            ActionKind::BuyCard { card, cost } => match state.card(*card) {
                Some(c) => format!("Buy {} for {}", c.name, cost),
                None => self.label(),
            },
            ActionKind::DiscardCard { card } => match state.card(*card) {
                Some(c) => format!("Discard {}", c.name),
                None => self.label(),
            },
            ActionKind::PlayCard { card } => match state.card(*card) {
                Some(c) => format!("Play {}", c.name),
                None => self.label(),
            },
            _ => self.label(),
        }
    }
}

impl std::fmt::Display for TmAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Move a global parameter towards its bound. Refused only when it already
/// sits at the bound in the direction of change; otherwise the change is
/// clamped.
fn raise_global_parameter(state: &mut TmGameState, parameter: GlobalParameter, amount: i32) -> bool {
    let id = state.global_parameter_id(parameter);
    let Some(counter) = state.counter_mut(id) else {
        return false;
    };
    let blocked = (amount > 0 && counter.is_maximum()) || (amount < 0 && counter.is_minimum());
    if amount == 0 || blocked {
        return false;
    }
    counter.increment(amount);
    true
}

fn play_card(state: &mut TmGameState, player: PlayerId, id: ComponentId) -> bool {
    if state.hand(player).index_of(&id).is_none() {
        return false;
    }
    let Some(card) = state.card(id).cloned() else {
        return false;
    };
    if !card.meets_requirements(state, player) {
        tracing::debug!(card = %card.name, %player, "card requirements not met");
        return false;
    }

    let due = (card.cost - state.discount_for(player, &ActionContext::play_card(&card))).max(0);
    if !state.modify_resource(player, Resource::MegaCredits, -due, false) {
        return false;
    }
    state.register_played_card(player, id);

    for effect in &card.immediate_effects {
        let mut effect = effect.clone();
        effect.player = Some(player);
        effect.free = true;
        effect.execute(state);
    }
    tracing::debug!(card = %card.name, %player, paid = due, "card played");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::terraforming::{Card, Tag, TmGameParameters};

    fn state() -> TmGameState {
        TmGameState::new(TmGameParameters::default(), 2)
    }

    #[test]
    fn test_non_free_actions_register_with_turn_order() {
        let mut state = state();
        let p0 = PlayerId::new(0);

        TmAction::generic().execute(&mut state);
        TmAction::generic().free().execute(&mut state);

        assert_eq!(state.turn_order().actions_total(p0), 1);
    }

    #[test]
    fn test_execute_marks_played_even_when_refused() {
        let mut state = state();
        let mut spend = TmAction::resource_transaction(Resource::Heat, -1);

        assert!(!spend.execute(&mut state));
        assert!(spend.played);
    }

    #[test]
    fn test_player_resolves_to_current() {
        let mut state = state();
        state.set_current_player(PlayerId::new(1));

        TmAction::modify_resource(Resource::Plant, 2, true).execute(&mut state);

        assert_eq!(state.production(PlayerId::new(1), Resource::Plant), 2);
        assert_eq!(state.production(PlayerId::new(0), Resource::Plant), 0);
    }

    #[test]
    fn test_requirement_gate() {
        let mut state = state();
        let p0 = PlayerId::new(0);
        let mut gated = TmAction::modify_resource(Resource::Steel, 1, false)
            .with_requirement(Requirement::ResourceIncGen(Resource::Plant));

        assert!(!gated.execute(&mut state));
        state.modify_resource(p0, Resource::Plant, 1, false);
        assert!(gated.execute(&mut state));
        assert_eq!(state.resource(p0, Resource::Steel), 1);
    }

    #[test]
    fn test_global_parameter_stops_at_bound() {
        let mut state = state();
        state.set_global_parameter(GlobalParameter::Oxygen, 13);

        assert!(TmAction::modify_global_parameter(GlobalParameter::Oxygen, 2).execute(&mut state));
        assert_eq!(state.global_parameter(GlobalParameter::Oxygen), 14);
        assert!(!TmAction::modify_global_parameter(GlobalParameter::Oxygen, 1).execute(&mut state));
    }

    #[test]
    fn test_place_ocean_on_mars_raises_oceans_and_grants_bonus() {
        let mut state = state();
        let p0 = PlayerId::new(0);
        let mut place = TmAction::place_tile(Some(Tile::Ocean), TileDestination::Region(MapTileType::Ocean), true)
            .with_bonus([Resource::Plant, Resource::Plant]);

        assert!(place.execute(&mut state));
        assert_eq!(state.global_parameter(GlobalParameter::OceanTiles), 1);
        assert_eq!(state.resource(p0, Resource::Plant), 2);
        assert_eq!(state.tiles().len(), 1);
    }

    #[test]
    fn test_pay_for_action_applies_discount() {
        let mut state = state();
        let p0 = PlayerId::new(0);
        state.set_resource(p0, Resource::MegaCredits, 20);
        state.add_discount(p0, Requirement::standard_project(StandardProject::Aquifer), 4);

        let mut aquifer = TmAction::pay_for_action(
            TmAction::place_tile(Some(Tile::Ocean), TileDestination::Region(MapTileType::Ocean), true),
            Resource::MegaCredits,
            18,
        )
        .with_standard_project(StandardProject::Aquifer);

        assert!(aquifer.execute(&mut state));
        assert_eq!(state.resource(p0, Resource::MegaCredits), 6);
        assert_eq!(state.global_parameter(GlobalParameter::OceanTiles), 1);
    }

    #[test]
    fn test_pay_for_action_refused_when_unaffordable() {
        let mut state = state();
        let p0 = PlayerId::new(0);
        state.set_resource(p0, Resource::Energy, 1);

        let mut convert = TmAction::pay_for_action(
            TmAction::resource_transaction(Resource::Heat, 5),
            Resource::Energy,
            -2,
        );

        assert!(!convert.execute(&mut state));
        assert_eq!(state.resource(p0, Resource::Energy), 1);
        assert_eq!(state.resource(p0, Resource::Heat), 0);
    }

    #[test]
    fn test_play_card_registers_tags_and_pays_discounted_cost() {
        let mut state = state();
        let p0 = PlayerId::new(0);
        state.set_resource(p0, Resource::MegaCredits, 10);
        state.add_discount(p0, Requirement::tag(Tag::Space), 2);

        let mut card = Card::new(9, "Satellites");
        card.cost = 10;
        card.tags.push(Tag::Space);
        card.immediate_effects.push(TmAction::modify_resource(Resource::MegaCredits, 1, true).free());
        let id = state.add_card(card);
        state.add_to_hand(p0, id);

        assert!(TmAction::play_card(id).execute(&mut state));
        assert_eq!(state.resource(p0, Resource::MegaCredits), 2);
        assert_eq!(state.production(p0, Resource::MegaCredits), 1);
        assert_eq!(state.tag_count(p0, Tag::Space), 1);
        assert!(state.hand(p0).is_empty());
        assert_eq!(state.played_cards(p0).len(), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = TmAction::pay_for_action(TmAction::generic(), Resource::Heat, 8);
        let mut copy = original.clone();
        if let ActionKind::PayForAction { action, .. } = &mut copy.kind {
            action.played = true;
        }
        copy.player = Some(PlayerId::new(1));

        assert_ne!(original, copy);
        assert!(matches!(&original.kind, ActionKind::PayForAction { action, .. } if !action.played));
    }

    #[test]
    fn test_labels() {
        assert_eq!(TmAction::pass().label(), "Pass");
        assert_eq!(TmAction::modify_resource(Resource::MegaCredits, -5, false).label(), "-5 MegaCredits");
        assert_eq!(TmAction::modify_resource(Resource::Heat, 2, true).label(), "+2 Heat production");
        assert_eq!(
            TmAction::pay_for_action(TmAction::resource_transaction(Resource::Plant, 1), Resource::Energy, 1).label(),
            "Pay 1 Energy for +1 Plant"
        );
    }
}
