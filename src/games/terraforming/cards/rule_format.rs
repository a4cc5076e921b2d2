//! Structured rules definitions (corporations).
//!
//! ```json
//! {
//!   "id": 12,
//!   "name": "Helion",
//!   "start": ["42 megacredits, 3 heatprod",
//!             {"type": "first", "action": "placetile", "tile": "City"}],
//!   "tags": ["Space"],
//!   "effect": [
//!     {"type": "resourcemapping", "from": "Heat", "to": "MegaCredits", "rate": 1.0},
//!     {"type": "discount", "tag": "Space", "amount": 2},
//!     {"type": "action", "action": "resourcetransaction-Plant-1", "cost": "Energy/1"},
//!     {"type": "effect", "if": "placetile(Ocean,any)", "then": "inc-megacredits-2"}
//!   ]
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::card::Card;
use super::compiler::skip_clause;
use super::grammar::{self, ActiveActionSpec};
use crate::error::{Result, RulesError};
use crate::games::terraforming::actions::{TileDestination, TmAction};
use crate::games::terraforming::effect::{EffectTrigger, PersistingEffect};
use crate::games::terraforming::requirement::{merge_discount, Requirement, ResourceMapping};
use crate::games::terraforming::types::{resolve, ActionType, CardType, Resource, StandardProject, Tag, Tile};

#[derive(Deserialize)]
struct FirstClause {
    action: String,
    resource: Option<String>,
    amount: Option<i32>,
    tile: Option<String>,
}

#[derive(Deserialize)]
struct ActionClause {
    action: String,
    cost: String,
    #[serde(rename = "if")]
    condition: Option<String>,
}

#[derive(Deserialize)]
struct DiscountClause {
    amount: i32,
    counter: Option<Vec<String>>,
    tag: Option<String>,
    #[serde(rename = "standardproject")]
    standard_project: Option<String>,
}

#[derive(Deserialize)]
struct MappingClause {
    from: String,
    to: String,
    rate: f64,
}

#[derive(Deserialize)]
struct EffectClause {
    #[serde(rename = "if")]
    condition: String,
    then: String,
}

pub(super) fn compile(definition: &Value) -> Result<Card> {
    let fields = definition
        .as_object()
        .ok_or_else(|| RulesError::malformed("<unnamed>", "definition is not an object"))?;
    let name = fields
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| RulesError::malformed("<unnamed>", "missing name"))?;
    let number = fields
        .get("id")
        .and_then(Value::as_u64)
        .and_then(|id| u32::try_from(id).ok())
        .ok_or_else(|| RulesError::malformed(name, "missing id"))?;
    let start = fields
        .get("start")
        .and_then(Value::as_array)
        .ok_or_else(|| RulesError::malformed(name, "missing start"))?;
    let resources = start
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| RulesError::malformed(name, "start does not begin with a resource list"))?;

    let mut card = Card::new(number, name).with_type(CardType::Corporation);

    for entry in resources.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match grammar::resource_amount(entry) {
            Some(r) => card
                .immediate_effects
                .push(TmAction::modify_resource(r.resource, r.amount, r.production).free()),
            None => skip_clause(name, entry, "not an amount and resource"),
        }
    }

    for option in &start[1..] {
        compile_start_option(&mut card, option);
    }

    compile_tags(&mut card, fields);

    let clauses = fields.get("effect").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();
    for clause in clauses {
        compile_effect_clause(&mut card, clause);
    }

    tracing::debug!(
        card = %card,
        immediate = card.immediate_effects.len(),
        actions = card.actions.len(),
        effects = card.persisting_effects.len(),
        discounts = card.discounts.len(),
        "compiled rules definition"
    );
    Ok(card)
}

fn compile_start_option(card: &mut Card, option: &Value) {
    let kind = option.get("type").and_then(Value::as_str).unwrap_or_default();
    if !kind.eq_ignore_ascii_case("first") {
        tracing::debug!(card = %card.name, kind, "start option ignored");
        return;
    }
    let Some(first) = parse_clause::<FirstClause>(card, option) else {
        return;
    };

    let action = if first.action.eq_ignore_ascii_case("resourcetransaction") {
        let resource = first.resource.as_deref().and_then(resolve::<Resource>);
        match (resource, first.amount) {
            (Some(resource), Some(amount)) => Some(TmAction::resource_transaction(resource, amount)),
            _ => None,
        }
    } else if first.action.eq_ignore_ascii_case("placetile") {
        first.tile.as_deref().and_then(resolve::<Tile>).map(regular_placement)
    } else {
        None
    };

    match action {
        Some(action) => card.first_action = Some(action),
        None => skip_clause(&card.name, &option.to_string(), "unusable first action"),
    }
}

fn compile_tags(card: &mut Card, fields: &Map<String, Value>) {
    let Some(names) = fields.get("tags").and_then(Value::as_array) else {
        return;
    };
    for name in names {
        match name.as_str().and_then(resolve::<Tag>) {
            Some(tag) => card.tags.push(tag),
            None => skip_clause(&card.name, &name.to_string(), "unknown tag"),
        }
    }
}

fn compile_effect_clause(card: &mut Card, clause: &Value) {
    let kind = clause
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_ascii_lowercase();

    match kind.as_str() {
        "action" => {
            if let Some(c) = parse_clause::<ActionClause>(card, clause) {
                compile_action(card, &c);
            }
        }
        "discount" => {
            if let Some(c) = parse_clause::<DiscountClause>(card, clause) {
                compile_discount(card, c);
            }
        }
        "resourcemapping" => {
            if let Some(c) = parse_clause::<MappingClause>(card, clause) {
                match (resolve::<Resource>(&c.from), resolve::<Resource>(&c.to)) {
                    (Some(from), Some(to)) => card.resource_mappings.push(ResourceMapping::new(from, to, c.rate)),
                    _ => skip_clause(&card.name, &clause.to_string(), "unknown resource"),
                }
            }
        }
        "effect" => {
            if let Some(c) = parse_clause::<EffectClause>(card, clause) {
                compile_effect(card, c);
            }
        }
        _ => skip_clause(&card.name, &clause.to_string(), "unknown clause type"),
    }
}

/// Deserialize a clause, logging and skipping it on failure.
fn parse_clause<T: DeserializeOwned>(card: &Card, clause: &Value) -> Option<T> {
    match T::deserialize(clause) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            skip_clause(&card.name, &clause.to_string(), &err.to_string());
            None
        }
    }
}

fn regular_placement(tile: Tile) -> TmAction {
    TmAction::place_tile(Some(tile), TileDestination::Region(tile.regular_legal_tile_type()), true)
}

fn compile_action(card: &mut Card, clause: &ActionClause) {
    let (Some(spec), Some((cost_resource, cost))) =
        (grammar::active_action(&clause.action), grammar::cost_spec(&clause.cost))
    else {
        skip_clause(&card.name, &clause.action, "unrecognized action or cost");
        return;
    };

    let inner = match spec {
        ActiveActionSpec::PlaceTile(tile) => regular_placement(tile),
        ActiveActionSpec::ResourceTransaction { resource, amount } => {
            TmAction::resource_transaction(resource, amount)
        }
    };
    let mut action = TmAction::pay_for_action(inner, cost_resource, cost).with_action_type(ActionType::ActiveAction);

    if let Some(condition) = &clause.condition {
        match grammar::income_condition(condition) {
            Some(resource) => action = action.with_requirement(Requirement::ResourceIncGen(resource)),
            None => tracing::debug!(card = %card.name, %condition, "action condition not recognized"),
        }
    }
    card.actions.push(action);
}

fn compile_discount(card: &mut Card, clause: DiscountClause) {
    if let Some(counters) = clause.counter {
        for code in counters {
            merge_discount(&mut card.discounts, Requirement::counter(code, -1, true), clause.amount);
        }
    } else if let Some(tag) = clause.tag {
        match resolve::<Tag>(&tag) {
            Some(tag) => merge_discount(&mut card.discounts, Requirement::tag(tag), clause.amount),
            None => skip_clause(&card.name, &tag, "unknown discount tag"),
        }
    } else if let Some(project) = clause.standard_project {
        match resolve::<StandardProject>(&project) {
            Some(project) => {
                merge_discount(&mut card.discounts, Requirement::standard_project(project), clause.amount)
            }
            None => skip_clause(&card.name, &project, "unknown standard project"),
        }
    } else {
        skip_clause(&card.name, "discount", "no counter, tag or standard project");
    }
}

fn compile_effect(card: &mut Card, clause: EffectClause) {
    let Some(condition) = grammar::effect_condition(&clause.condition) else {
        skip_clause(&card.name, &clause.condition, "condition is not kind(args)");
        return;
    };

    let trigger = match condition.kind.as_str() {
        "placetile" => {
            let mut resources_gained = Vec::new();
            for arg in condition.args.iter().filter(|a| a.starts_with("gain")) {
                match grammar::gained_resources(arg) {
                    Some(resources) => resources_gained = resources,
                    None => {
                        skip_clause(&card.name, &clause.condition, "unknown gained resource");
                        return;
                    }
                }
            }
            EffectTrigger::PlaceTile {
                on_mars: condition.on_mars,
                tile: condition.args.iter().find_map(|a| resolve::<Tile>(a)),
                resources_gained,
            }
        }
        "playcard" => {
            let tag = condition
                .args
                .first()
                .and_then(|a| a.split('-').nth(1))
                .and_then(resolve::<Tag>);
            match tag {
                Some(tag) => EffectTrigger::PlayCard { tag },
                None => {
                    skip_clause(&card.name, &clause.condition, "unknown card tag");
                    return;
                }
            }
        }
        "payforaction" => match condition.args.first().and_then(|a| a.parse().ok()) {
            Some(min_cost) => EffectTrigger::PayForAction { min_cost },
            None => {
                skip_clause(&card.name, &clause.condition, "minimum cost is not a number");
                return;
            }
        },
        _ => {
            skip_clause(&card.name, &clause.condition, "unknown effect trigger");
            return;
        }
    };

    card.persisting_effects.push(PersistingEffect {
        self_only: !condition.any_player,
        result: clause.then,
        trigger,
    });
}
