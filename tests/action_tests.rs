//! Action pipeline integration tests.
//!
//! These tests drive actions through `execute` against a full game state:
//! bounded counters, resource payments, persisting effects across players,
//! card play, and the card draw that follows every action.

use tabletop_rules::core::PlayerId;
use tabletop_rules::games::terraforming::{
    ActionType, Card, EffectTrigger, GlobalParameter, MapTileType, PersistingEffect, Requirement, Resource, Tag,
    TagCount, Tile, TileDestination, TmAction, TmGameParameters, TmGameState,
};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

fn two_players() -> TmGameState {
    TmGameState::new(TmGameParameters::default(), 2)
}

fn stock_pile(state: &mut TmGameState, cards: u32) {
    for n in 0..cards {
        state.push_project_card(Card::new(100 + n, format!("Project {n}")));
    }
}

// =============================================================================
// Counter Bound Tests
// =============================================================================

/// Test that a change past the maximum is refused and leaves the counter.
#[test]
fn test_modify_counter_at_max_refuses() {
    let mut state = two_players();
    let fighters = state.add_counter("Fighters", 5, 0, 5);

    let mut action = TmAction::modify_counter(fighters, 1);
    assert!(!action.execute(&mut state));
    assert!(action.played);
    assert_eq!(state.counter(fighters).unwrap().value(), 5);
}

/// Test that a change past the minimum is refused and leaves the counter.
#[test]
fn test_modify_counter_at_min_refuses() {
    let mut state = two_players();
    let fighters = state.add_counter("Fighters", 0, 0, 5);

    assert!(!TmAction::modify_counter(fighters, -2).execute(&mut state));
    assert_eq!(state.counter(fighters).unwrap().value(), 0);

    assert!(TmAction::modify_counter(fighters, 3).execute(&mut state));
    assert_eq!(state.counter(fighters).unwrap().value(), 3);
}

/// Test that queued card draws convert even when the action refuses.
#[test]
fn test_refused_action_still_converts_cards() {
    let mut state = two_players();
    stock_pile(&mut state, 3);
    let fighters = state.add_counter("Fighters", 5, 0, 5);
    state.set_resource(P0, Resource::Card, 2);

    assert!(!TmAction::modify_counter(fighters, 1).execute(&mut state));

    assert_eq!(state.hand(P0).len(), 2);
    assert_eq!(state.resource(P0, Resource::Card), 0);
    assert_eq!(state.project_cards().len(), 1);
}

/// Test that queued card draws convert when a decrement below the minimum
/// is refused.
#[test]
fn test_refused_decrement_still_converts_cards() {
    let mut state = two_players();
    stock_pile(&mut state, 3);
    let fighters = state.add_counter("Fighters", 0, 0, 5);
    state.set_resource(P0, Resource::Card, 2);

    assert!(!TmAction::modify_counter(fighters, -2).execute(&mut state));

    assert_eq!(state.counter(fighters).unwrap().value(), 0);
    assert_eq!(state.hand(P0).len(), 2);
    assert_eq!(state.resource(P0, Resource::Card), 0);
    assert_eq!(state.project_cards().len(), 1);
}

/// Test that a global parameter clamps at its maximum and then refuses.
#[test]
fn test_global_parameter_clamps_then_refuses() {
    let mut state = two_players();
    state.set_global_parameter(GlobalParameter::Oxygen, 13);

    assert!(TmAction::modify_global_parameter(GlobalParameter::Oxygen, 2).execute(&mut state));
    assert_eq!(state.global_parameter(GlobalParameter::Oxygen), 14);

    assert!(!TmAction::modify_global_parameter(GlobalParameter::Oxygen, 1).execute(&mut state));
    assert_eq!(state.global_parameter(GlobalParameter::Oxygen), 14);
}

// =============================================================================
// Turn Order Tests
// =============================================================================

/// Test that only non-free actions count towards the turn.
#[test]
fn test_free_actions_do_not_count() {
    let mut state = two_players();

    TmAction::modify_resource(Resource::Heat, 1, false).execute(&mut state);
    TmAction::modify_resource(Resource::Heat, 1, false).free().execute(&mut state);

    assert_eq!(state.turn_order().actions_this_turn(P0), 1);
    assert_eq!(state.turn_order().history().len(), 1);
    assert_eq!(state.resource(P0, Resource::Heat), 2);
}

/// Test that an unmet requirement gates the primary effect only.
#[test]
fn test_requirement_gate() {
    let mut state = two_players();
    let mut action = TmAction::modify_resource(Resource::Plant, 3, false)
        .with_requirement(Requirement::counter("oxygen", 5, false));

    assert!(!action.execute(&mut state));
    assert_eq!(state.resource(P0, Resource::Plant), 0);
    assert_eq!(state.turn_order().actions_this_turn(P0), 1);

    state.set_global_parameter(GlobalParameter::Oxygen, 5);
    assert!(action.clone().execute(&mut state));
    assert_eq!(state.resource(P0, Resource::Plant), 3);
}

// =============================================================================
// Persisting Effect Tests
// =============================================================================

/// Test that an any-player effect fires for its owner on another player's
/// action, and a self-only effect does not.
#[test]
fn test_effects_across_players() {
    let mut state = two_players();
    let any_ocean = EffectTrigger::PlaceTile { on_mars: true, tile: Some(Tile::Ocean), resources_gained: vec![] };
    state.add_persisting_effect(P1, PersistingEffect::new(any_ocean.clone(), "inc-megacredits-2").for_any_player());
    state.add_persisting_effect(P1, PersistingEffect::new(any_ocean, "inc-heat-1"));

    let mut ocean = TmAction::place_tile(Some(Tile::Ocean), TileDestination::Region(MapTileType::Ocean), true)
        .with_player(P0);
    assert!(ocean.execute(&mut state));

    assert_eq!(state.resource(P1, Resource::MegaCredits), 2);
    assert_eq!(state.resource(P1, Resource::Heat), 0);
    assert_eq!(state.global_parameter(GlobalParameter::OceanTiles), 1);
    assert_eq!(state.tiles().len(), 1);
}

/// Test that a payment above the threshold triggers the effect.
#[test]
fn test_pay_for_action_effect() {
    let mut state = two_players();
    state.set_resource(P0, Resource::MegaCredits, 40);
    state.add_persisting_effect(
        P0,
        PersistingEffect::new(EffectTrigger::PayForAction { min_cost: 20 }, "inc-plant-1"),
    );

    let cheap = TmAction::modify_resource(Resource::Energy, 1, true);
    assert!(TmAction::pay_for_action(cheap, Resource::MegaCredits, 11).execute(&mut state));
    assert_eq!(state.resource(P0, Resource::Plant), 0);
    assert_eq!(state.production(P0, Resource::Energy), 1);

    let dear = TmAction::modify_global_parameter(GlobalParameter::Temperature, 1);
    assert!(TmAction::pay_for_action(dear, Resource::MegaCredits, -20).execute(&mut state));
    assert_eq!(state.resource(P0, Resource::MegaCredits), 9);
    assert_eq!(state.resource(P0, Resource::Plant), 1);
    assert_eq!(state.global_parameter(GlobalParameter::Temperature), -29);
}

/// Test that a paid action which refuses gives the payment back.
#[test]
fn test_refused_paid_action_keeps_payment() {
    let mut state = two_players();
    state.set_resource(P0, Resource::MegaCredits, 20);
    state.set_global_parameter(GlobalParameter::Temperature, 8);

    let warm = TmAction::modify_global_parameter(GlobalParameter::Temperature, 1);
    assert!(!TmAction::pay_for_action(warm, Resource::MegaCredits, 14).execute(&mut state));

    assert_eq!(state.resource(P0, Resource::MegaCredits), 20);
    assert_eq!(state.global_parameter(GlobalParameter::Temperature), 8);
    assert!(!state.resource_increased_this_generation(P0, Resource::MegaCredits));
}

/// Test that effects feeding each other stop at the nesting limit.
#[test]
fn test_effect_chain_terminates() {
    let params = TmGameParameters::default().with_seed(3);
    let mut state = TmGameState::new(params, 1);
    let greenery = EffectTrigger::PlaceTile { on_mars: false, tile: Some(Tile::Greenery), resources_gained: vec![] };
    state.add_persisting_effect(P0, PersistingEffect::new(greenery, "placetile/Greenery/Ground/false"));

    let mut action = TmAction::place_tile(Some(Tile::Greenery), TileDestination::Region(MapTileType::Ground), false);
    assert!(action.execute(&mut state));

    let limit = state.params().effect_depth_limit as usize;
    assert_eq!(state.tiles().len(), limit + 1);
}

// =============================================================================
// Card Play Tests
// =============================================================================

/// Test that playing a card pays its discounted cost and registers what it
/// grants.
#[test]
fn test_play_card_with_tag_discount() {
    let mut state = two_players();
    state.set_resource(P0, Resource::MegaCredits, 20);
    state.add_discount(P0, Requirement::Tags(vec![TagCount::any(Tag::Space)]), 2);
    state.add_persisting_effect(
        P0,
        PersistingEffect::new(EffectTrigger::PlayCard { tag: Tag::Space }, "inc-titanium-1"),
    );

    let mut satellite = Card::new(175, "Satellites").with_cost(10).with_tags([Tag::Space]);
    satellite.immediate_effects.push(TmAction::modify_resource(Resource::MegaCredits, 1, true).free());
    let id = state.add_card(satellite);
    state.add_to_hand(P0, id);

    let mut play = TmAction::play_card(id);
    assert_eq!(play.action_type, Some(ActionType::PlayCard));
    assert!(play.execute(&mut state));

    assert_eq!(state.resource(P0, Resource::MegaCredits), 12);
    assert_eq!(state.production(P0, Resource::MegaCredits), 1);
    assert_eq!(state.resource(P0, Resource::Titanium), 1);
    assert_eq!(state.tag_count(P0, Tag::Space), 1);
    assert!(state.played_cards(P0).contains(&id));
    assert!(state.hand(P0).is_empty());
}

/// Test that a card whose requirements fail stays in hand.
#[test]
fn test_play_card_requirements_unmet() {
    let mut state = two_players();
    state.set_resource(P0, Resource::MegaCredits, 20);
    let lichen = Card::new(159, "Lichen").with_cost(7).with_requirement(Requirement::counter("temperature", -24, false));
    let id = state.add_card(lichen);
    state.add_to_hand(P0, id);

    assert!(!TmAction::play_card(id).execute(&mut state));
    assert_eq!(state.resource(P0, Resource::MegaCredits), 20);
    assert!(state.hand(P0).contains(&id));
}

// =============================================================================
// Copy Tests
// =============================================================================

/// Test that a copied action executes independently of the original.
#[test]
fn test_copy_is_independent() {
    let mut state = two_players();
    let original = TmAction::modify_resource(Resource::Steel, 2, false);
    let mut copy = original.clone();

    assert!(copy.execute(&mut state));
    assert!(copy.played);
    assert!(!original.played);
    assert_eq!(copy.player, None);
}
