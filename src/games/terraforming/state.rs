//! Colonization game state.
//!
//! `TmGameState` is the single mutable context every action executes
//! against. It owns the counters (global parameters, per-player stock and
//! production), the card zones, the standing per-player modifiers compiled
//! from played cards, and the engine-side bookkeeping (turn order, action
//! in progress, RNG).
//!
//! ## Snapshots
//!
//! Collections are `im` persistent structures, so `snapshot()` is cheap and
//! yields a fully independent state for forward search. The snapshot's RNG
//! is forked from the source.
//!
//! ## Example
//!
//! ```
//! use tabletop_rules::core::PlayerId;
//! use tabletop_rules::games::terraforming::{Resource, TmAction, TmGameParameters, TmGameState};
//!
//! let mut state = TmGameState::new(TmGameParameters::default(), 2);
//! let mut gain = TmAction::modify_resource(Resource::Steel, 3, false);
//!
//! assert!(gain.execute(&mut state));
//! assert_eq!(state.resource(PlayerId::new(0), Resource::Steel), 3);
//! ```

use im::{HashMap as ImHashMap, HashSet as ImHashSet, Vector};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};

use super::actions::{TileDestination, TmAction};
use super::cards::Card;
use super::config::{ParameterBounds, TmGameParameters};
use super::effect::PersistingEffect;
use super::requirement::{merge_discount, ActionContext, DiscountMap, Requirement, ResourceMapping};
use super::turn_order::TmTurnOrder;
use super::types::{GlobalParameter, Resource, Tag, Tile};
use crate::core::{ComponentAllocator, ComponentId, Counter, GameRng, PlayerId, PlayerMap};
use crate::error::{Result, RulesError};
use crate::rules::ExtendedSequence;

type ResourceIds = [ComponentId; Resource::COUNT];

/// A tile recorded on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePlacement {
    pub player: PlayerId,
    pub tile: Option<Tile>,
    pub destination: TileDestination,
    pub on_mars: bool,
}

/// Full game state for the colonization game.
#[derive(Clone, Debug)]
pub struct TmGameState {
    params: TmGameParameters,
    player_count: usize,
    current_player: PlayerId,

    counters: ImHashMap<ComponentId, Counter>,
    global_parameters: FxHashMap<GlobalParameter, ComponentId>,
    stock: PlayerMap<ResourceIds>,
    production: PlayerMap<ResourceIds>,
    increased_this_generation: PlayerMap<ImHashSet<Resource>>,

    // Card zones
    hands: PlayerMap<Vector<ComponentId>>,
    card_choice: PlayerMap<Vector<ComponentId>>,
    played: PlayerMap<Vector<ComponentId>>,
    project_cards: Vector<ComponentId>,
    discard_pile: Vector<ComponentId>,
    cards: ImHashMap<ComponentId, Card>,

    // Standing modifiers from played cards
    tags: PlayerMap<FxHashMap<Tag, u32>>,
    persisting_effects: PlayerMap<Vector<PersistingEffect>>,
    discounts: PlayerMap<DiscountMap>,
    resource_mappings: PlayerMap<Vec<ResourceMapping>>,

    tiles: Vector<TilePlacement>,

    turn_order: TmTurnOrder,
    action_in_progress: Option<Box<TmAction>>,
    rng: GameRng,
    allocator: ComponentAllocator,
    effect_depth: u32,
}

impl TmGameState {
    /// Set up a game for `player_count` players.
    ///
    /// Global parameters start at their minimum. Every player gets a stock
    /// and a production counter per resource; stock starts at zero except
    /// megacredits, which start at `starting_megacredits`.
    #[must_use]
    pub fn new(params: TmGameParameters, player_count: usize) -> Self {
        let mut allocator = ComponentAllocator::default();
        let mut counters = ImHashMap::new();

        let mut global_parameters = FxHashMap::default();
        for parameter in GlobalParameter::iter() {
            let bounds = bounds_of(&params, parameter);
            let id = allocator.next();
            counters.insert(id, Counter::new(id, parameter.to_string(), bounds.min, bounds.min, bounds.max));
            global_parameters.insert(parameter, id);
        }

        let mut alloc_resources = |production: bool| {
            PlayerMap::new(player_count, |player| {
                let mut ids = [ComponentId::default(); Resource::COUNT];
                for resource in Resource::iter() {
                    let id = allocator.next();
                    let (name, start, min) = if production {
                        let min = match resource {
                            Resource::MegaCredits => params.min_megacredit_production,
                            _ => 0,
                        };
                        (format!("{} {} production", player, resource), 0, min)
                    } else {
                        let start = match resource {
                            Resource::MegaCredits => params.starting_megacredits,
                            _ => 0,
                        };
                        (format!("{} {}", player, resource), start, 0)
                    };
                    counters.insert(id, Counter::new(id, name, start, min, i32::MAX));
                    ids[resource_slot(resource)] = id;
                }
                ids
            })
        };
        let stock = alloc_resources(false);
        let production = alloc_resources(true);

        Self {
            rng: GameRng::new(params.seed),
            params,
            player_count,
            current_player: PlayerId::new(0),
            counters,
            global_parameters,
            stock,
            production,
            increased_this_generation: PlayerMap::new(player_count, |_| ImHashSet::new()),
            hands: PlayerMap::new(player_count, |_| Vector::new()),
            card_choice: PlayerMap::new(player_count, |_| Vector::new()),
            played: PlayerMap::new(player_count, |_| Vector::new()),
            project_cards: Vector::new(),
            discard_pile: Vector::new(),
            cards: ImHashMap::new(),
            tags: PlayerMap::with_default(player_count),
            persisting_effects: PlayerMap::new(player_count, |_| Vector::new()),
            discounts: PlayerMap::with_default(player_count),
            resource_mappings: PlayerMap::with_default(player_count),
            tiles: Vector::new(),
            turn_order: TmTurnOrder::new(player_count),
            action_in_progress: None,
            allocator,
            effect_depth: 0,
        }
    }

    #[must_use]
    pub fn params(&self) -> &TmGameParameters {
        &self.params
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count)
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn set_current_player(&mut self, player: PlayerId) {
        self.current_player = player;
    }

    // === Counters ===

    #[must_use]
    pub fn counter(&self, id: ComponentId) -> Option<&Counter> {
        self.counters.get(&id)
    }

    pub fn counter_mut(&mut self, id: ComponentId) -> Option<&mut Counter> {
        self.counters.get_mut(&id)
    }

    /// Counter lookup that fails for ids the state never allocated.
    pub fn try_counter(&self, id: ComponentId) -> Result<&Counter> {
        self.counters.get(&id).ok_or(RulesError::UnknownComponent(id))
    }

    /// Register an extra counter (for example one tracked by a card).
    /// Inverted bounds are swapped.
    pub fn add_counter(&mut self, name: impl Into<String>, value: i32, min: i32, max: i32) -> ComponentId {
        let id = self.allocator.next();
        self.counters.insert(id, Counter::new(id, name, value, min, max));
        id
    }

    #[must_use]
    pub fn global_parameter_id(&self, parameter: GlobalParameter) -> ComponentId {
        self.global_parameters[&parameter]
    }

    /// Current value of a global parameter.
    #[must_use]
    pub fn global_parameter(&self, parameter: GlobalParameter) -> i32 {
        self.counter(self.global_parameter_id(parameter))
            .map_or(0, Counter::value)
    }

    pub fn set_global_parameter(&mut self, parameter: GlobalParameter, value: i32) {
        let id = self.global_parameter_id(parameter);
        if let Some(counter) = self.counter_mut(id) {
            counter.set_value(value);
        }
    }

    /// Counter id of a player's stock or production of `resource`.
    #[must_use]
    pub fn resource_id(&self, player: PlayerId, resource: Resource, production: bool) -> ComponentId {
        let ids = if production { &self.production[player] } else { &self.stock[player] };
        ids[resource_slot(resource)]
    }

    #[must_use]
    pub fn resource(&self, player: PlayerId, resource: Resource) -> i32 {
        self.counter(self.resource_id(player, resource, false))
            .map_or(0, Counter::value)
    }

    #[must_use]
    pub fn production(&self, player: PlayerId, resource: Resource) -> i32 {
        self.counter(self.resource_id(player, resource, true))
            .map_or(0, Counter::value)
    }

    pub fn set_resource(&mut self, player: PlayerId, resource: Resource, value: i32) {
        let id = self.resource_id(player, resource, false);
        if let Some(counter) = self.counter_mut(id) {
            counter.set_value(value);
        }
    }

    /// Change a player's stock or production.
    ///
    /// Refuses (returns `false`, nothing changes) when the counter would
    /// leave its bounds, so stock never goes negative. Increases are
    /// remembered for the rest of the generation.
    pub fn modify_resource(&mut self, player: PlayerId, resource: Resource, amount: i32, production: bool) -> bool {
        let id = self.resource_id(player, resource, production);
        let Some(counter) = self.counters.get_mut(&id) else {
            return false;
        };
        if !counter.can_apply(amount) {
            return false;
        }
        counter.increment(amount);
        if amount > 0 {
            self.increased_this_generation[player].insert(resource);
        }
        true
    }

    #[must_use]
    pub fn resource_increased_this_generation(&self, player: PlayerId, resource: Resource) -> bool {
        self.increased_this_generation[player].contains(&resource)
    }

    /// Advance the generation and forget which resources rose in the last.
    pub fn next_generation(&mut self) {
        self.turn_order.next_generation();
        for player in PlayerId::all(self.player_count) {
            self.increased_this_generation[player].clear();
        }
    }

    // === Cards ===

    /// Add a card to the card table, returning its component id.
    pub fn add_card(&mut self, card: Card) -> ComponentId {
        let id = self.allocator.next();
        self.cards.insert(id, card);
        id
    }

    #[must_use]
    pub fn card(&self, id: ComponentId) -> Option<&Card> {
        self.cards.get(&id)
    }

    pub fn card_mut(&mut self, id: ComponentId) -> Option<&mut Card> {
        self.cards.get_mut(&id)
    }

    /// Add a card to the table and put it at the bottom of the project pile.
    pub fn push_project_card(&mut self, card: Card) -> ComponentId {
        let id = self.add_card(card);
        self.project_cards.push_back(id);
        id
    }

    #[must_use]
    pub fn project_cards(&self) -> &Vector<ComponentId> {
        &self.project_cards
    }

    /// Remove and return the `n`th card of the project pile.
    pub fn pick_project_card(&mut self, n: usize) -> Option<ComponentId> {
        (n < self.project_cards.len()).then(|| self.project_cards.remove(n))
    }

    pub fn shuffle_project_cards(&mut self) {
        let mut pile: Vec<ComponentId> = self.project_cards.iter().copied().collect();
        self.rng.shuffle(&mut pile);
        self.project_cards = pile.into_iter().collect();
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Vector<ComponentId> {
        &self.hands[player]
    }

    pub fn add_to_hand(&mut self, player: PlayerId, card: ComponentId) {
        self.hands[player].push_back(card);
    }

    /// Returns true if the card was found and removed.
    pub fn remove_from_hand(&mut self, player: PlayerId, card: ComponentId) -> bool {
        remove_item(&mut self.hands[player], card)
    }

    /// Cards drawn for a keep/discard decision.
    #[must_use]
    pub fn card_choice(&self, player: PlayerId) -> &Vector<ComponentId> {
        &self.card_choice[player]
    }

    pub fn add_to_card_choice(&mut self, player: PlayerId, card: ComponentId) {
        self.card_choice[player].push_back(card);
    }

    pub fn remove_from_card_choice(&mut self, player: PlayerId, card: ComponentId) -> bool {
        remove_item(&mut self.card_choice[player], card)
    }

    #[must_use]
    pub fn played_cards(&self, player: PlayerId) -> &Vector<ComponentId> {
        &self.played[player]
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Vector<ComponentId> {
        &self.discard_pile
    }

    pub fn discard(&mut self, card: ComponentId) {
        self.discard_pile.push_back(card);
    }

    /// Move a card from hand to the played area and register everything it
    /// grants its owner: tags, persisting effects, discounts and resource
    /// mappings.
    pub fn register_played_card(&mut self, player: PlayerId, id: ComponentId) -> bool {
        if !self.remove_from_hand(player, id) {
            return false;
        }
        self.played[player].push_back(id);

        let Some(card) = self.cards.get(&id).cloned() else {
            return true;
        };
        for tag in &card.tags {
            *self.tags[player].entry(*tag).or_insert(0) += 1;
        }
        for effect in card.persisting_effects {
            self.persisting_effects[player].push_back(effect);
        }
        for (requirement, amount) in card.discounts {
            merge_discount(&mut self.discounts[player], requirement, amount);
        }
        for mapping in card.resource_mappings {
            self.add_resource_mapping(player, mapping);
        }
        true
    }

    /// Project cards queued as the `Card` resource are drawn into hand and
    /// the counter is zeroed. Returns the number of cards drawn.
    pub fn convert_card_resources(&mut self, player: PlayerId) -> usize {
        let queued = self.resource(player, Resource::Card);
        if queued <= 0 {
            return 0;
        }

        let mut drawn = 0;
        for _ in 0..queued {
            match self.pick_project_card(0) {
                Some(card) => {
                    self.add_to_hand(player, card);
                    drawn += 1;
                }
                None => {
                    tracing::warn!(%player, queued, drawn, "project pile exhausted while drawing");
                    break;
                }
            }
        }
        self.set_resource(player, Resource::Card, 0);
        tracing::debug!(%player, drawn, "card resources converted");
        drawn
    }

    // === Standing modifiers ===

    #[must_use]
    pub fn tag_count(&self, player: PlayerId, tag: Tag) -> u32 {
        self.tags[player].get(&tag).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn persisting_effects(&self, player: PlayerId) -> &Vector<PersistingEffect> {
        &self.persisting_effects[player]
    }

    pub fn add_persisting_effect(&mut self, player: PlayerId, effect: PersistingEffect) {
        self.persisting_effects[player].push_back(effect);
    }

    #[must_use]
    pub fn discounts(&self, player: PlayerId) -> &DiscountMap {
        &self.discounts[player]
    }

    pub fn add_discount(&mut self, player: PlayerId, requirement: Requirement, amount: i32) {
        merge_discount(&mut self.discounts[player], requirement, amount);
    }

    /// Total discount `player` gets on the action described by `ctx`.
    #[must_use]
    pub fn discount_for(&self, player: PlayerId, ctx: &ActionContext<'_>) -> i32 {
        self.discounts[player]
            .iter()
            .filter(|(requirement, _)| requirement.applies_to(ctx))
            .map(|(_, amount)| *amount)
            .sum()
    }

    #[must_use]
    pub fn resource_mappings(&self, player: PlayerId) -> &[ResourceMapping] {
        &self.resource_mappings[player]
    }

    /// Add a mapping unless an identical one is already held.
    pub fn add_resource_mapping(&mut self, player: PlayerId, mapping: ResourceMapping) {
        let mappings = &mut self.resource_mappings[player];
        if !mappings.contains(&mapping) {
            mappings.push(mapping);
        }
    }

    // === Board ===

    pub fn place_tile(&mut self, placement: TilePlacement) {
        self.tiles.push_back(placement);
    }

    #[must_use]
    pub fn tiles(&self) -> &Vector<TilePlacement> {
        &self.tiles
    }

    // === Engine bookkeeping ===

    #[must_use]
    pub fn turn_order(&self) -> &TmTurnOrder {
        &self.turn_order
    }

    pub fn turn_order_mut(&mut self) -> &mut TmTurnOrder {
        &mut self.turn_order
    }

    #[must_use]
    pub fn action_in_progress(&self) -> Option<&TmAction> {
        self.action_in_progress.as_deref()
    }

    pub fn set_action_in_progress(&mut self, action: TmAction) {
        self.action_in_progress = Some(Box::new(action));
    }

    pub fn take_action_in_progress(&mut self) -> Option<TmAction> {
        self.action_in_progress.take().map(|action| *action)
    }

    /// Sub-actions offered by the action in progress.
    #[must_use]
    pub fn available_actions(&self) -> Vec<TmAction> {
        self.action_in_progress
            .as_ref()
            .map(|seq| seq.compute_available_actions(self))
            .unwrap_or_default()
    }

    /// Execute the `choice`th available sub-action of the action in progress
    /// and advance it. The action is dropped once complete.
    ///
    /// Returns `false` if nothing is in progress, `choice` is out of range,
    /// or the sub-action refused.
    pub fn step_action_in_progress(&mut self, choice: usize) -> bool {
        let Some(mut seq) = self.take_action_in_progress() else {
            return false;
        };

        let Some(mut chosen) = seq.compute_available_actions(self).into_iter().nth(choice) else {
            self.set_action_in_progress(seq);
            return false;
        };

        let success = chosen.execute(self);
        seq.register_action_taken(self, &chosen);

        if seq.execution_complete(self) {
            tracing::debug!(action = %seq, "action in progress complete");
        } else {
            self.set_action_in_progress(seq);
        }
        success
    }

    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// Enter a persisting-effect scan. Returns `false` when the nesting limit
    /// has been reached and the scan must be skipped.
    pub(crate) fn enter_effect_scan(&mut self) -> bool {
        if self.effect_depth >= self.params.effect_depth_limit {
            return false;
        }
        self.effect_depth += 1;
        true
    }

    pub(crate) fn exit_effect_scan(&mut self) {
        self.effect_depth = self.effect_depth.saturating_sub(1);
    }

    /// Independent copy for forward search.
    ///
    /// Takes `&mut self` because forking the RNG advances the fork counter.
    #[must_use]
    pub fn snapshot(&mut self) -> Self {
        let rng = self.rng.fork();
        Self { rng, ..self.clone() }
    }
}

fn bounds_of(params: &TmGameParameters, parameter: GlobalParameter) -> ParameterBounds {
    match parameter {
        GlobalParameter::Temperature => params.temperature,
        GlobalParameter::Oxygen => params.oxygen,
        GlobalParameter::OceanTiles => params.ocean_tiles,
    }
}

const fn resource_slot(resource: Resource) -> usize {
    resource as usize
}

fn remove_item(zone: &mut Vector<ComponentId>, card: ComponentId) -> bool {
    match zone.index_of(&card) {
        Some(pos) => {
            zone.remove(pos);
            true
        }
        None => false,
    }
}
