//! Requirements: predicates over game state and over the action being paid
//! for.
//!
//! Requirements gate card play and card actions, and key the discount maps
//! that make some actions cheaper. Equality and hashing are structural so
//! two clauses producing the same requirement merge into one discount
//! entry.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::cards::Card;
use super::state::TmGameState;
use super::types::{resolve, ActionType, GlobalParameter, Resource, StandardProject, Tag};
use crate::core::PlayerId;

/// One tag entry of a tag requirement.
///
/// `min: None` means "carries the tag at all"; it is how discount keys say
/// "cards with this tag".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: Tag,
    pub min: Option<u32>,
}

impl TagCount {
    #[must_use]
    pub const fn at_least(tag: Tag, min: u32) -> Self {
        Self { tag, min: Some(min) }
    }

    #[must_use]
    pub const fn any(tag: Tag) -> Self {
        Self { tag, min: None }
    }

    fn required(&self) -> u32 {
        self.min.unwrap_or(1)
    }
}

/// A structural predicate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Requirement {
    /// Tag counts, all of which must be met.
    Tags(Vec<TagCount>),

    /// A counter compared against a threshold. `max: true` means the counter
    /// must be at most `threshold`, otherwise at least.
    Counter { counter: String, threshold: i32, max: bool },

    /// The player's stock or production of a resource rose this generation.
    ResourceIncGen(Resource),

    /// The action originates from this action type (and standard project,
    /// when given).
    ActionType {
        action_type: ActionType,
        standard_project: Option<StandardProject>,
    },
}

/// What is being paid for, used to match discount keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActionContext<'a> {
    pub action_type: Option<ActionType>,
    pub standard_project: Option<StandardProject>,
    pub card: Option<&'a Card>,
}

impl<'a> ActionContext<'a> {
    /// Context for playing `card`.
    #[must_use]
    pub fn play_card(card: &'a Card) -> Self {
        Self {
            action_type: Some(ActionType::PlayCard),
            standard_project: None,
            card: Some(card),
        }
    }
}

impl Requirement {
    /// Single-tag requirement, the form tag discounts use.
    #[must_use]
    pub fn tag(tag: Tag) -> Self {
        Self::Tags(vec![TagCount::any(tag)])
    }

    /// Counter requirement.
    #[must_use]
    pub fn counter(counter: impl Into<String>, threshold: i32, max: bool) -> Self {
        Self::Counter {
            counter: counter.into(),
            threshold,
            max,
        }
    }

    /// Standard-project requirement.
    #[must_use]
    pub fn standard_project(project: StandardProject) -> Self {
        Self::ActionType {
            action_type: ActionType::StandardProject,
            standard_project: Some(project),
        }
    }

    /// Test against the current state for `player`.
    ///
    /// Action-type requirements only make sense against an action and never
    /// hold here; use [`Requirement::applies_to`].
    #[must_use]
    pub fn test_condition(&self, state: &TmGameState, player: PlayerId) -> bool {
        match self {
            Requirement::Tags(tags) => tags
                .iter()
                .all(|t| state.tag_count(player, t.tag) >= t.required()),

            Requirement::Counter { counter, threshold, max } => {
                match counter_value(state, counter) {
                    Some(value) if *max => value <= *threshold,
                    Some(value) => value >= *threshold,
                    None => false,
                }
            }

            Requirement::ResourceIncGen(resource) => {
                state.resource_increased_this_generation(player, *resource)
            }

            Requirement::ActionType { .. } => false,
        }
    }

    /// Test against the action being paid for (discount matching).
    #[must_use]
    pub fn applies_to(&self, ctx: &ActionContext<'_>) -> bool {
        match self {
            Requirement::Tags(tags) => ctx.card.is_some_and(|card| {
                tags.iter().all(|t| {
                    let carried = card.tags.iter().filter(|&&c| c == t.tag).count() as u32;
                    carried >= t.required()
                })
            }),

            // Cards whose own requirements mention this counter.
            Requirement::Counter { counter, .. } => ctx.card.is_some_and(|card| {
                card.requirements.iter().any(|r| {
                    matches!(r, Requirement::Counter { counter: c, .. } if c.eq_ignore_ascii_case(counter))
                })
            }),

            Requirement::ResourceIncGen(_) => false,

            Requirement::ActionType { action_type, standard_project } => {
                ctx.action_type == Some(*action_type)
                    && (standard_project.is_none() || ctx.standard_project == *standard_project)
            }
        }
    }
}

fn counter_value(state: &TmGameState, code: &str) -> Option<i32> {
    resolve::<GlobalParameter>(code).map(|p| state.global_parameter(p))
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Requirement::Tags(tags) => {
                let parts: Vec<String> = tags
                    .iter()
                    .map(|t| match t.min {
                        Some(min) => format!("{} {}", min, t.tag),
                        None => t.tag.to_string(),
                    })
                    .collect();
                write!(f, "tags [{}]", parts.join(", "))
            }
            Requirement::Counter { counter, threshold, max: true } => {
                write!(f, "{} <= {}", counter, threshold)
            }
            Requirement::Counter { counter, threshold, max: false } => {
                write!(f, "{} >= {}", counter, threshold)
            }
            Requirement::ResourceIncGen(resource) => {
                write!(f, "{} increased this generation", resource)
            }
            Requirement::ActionType { action_type, standard_project: Some(sp) } => {
                write!(f, "{} {}", action_type, sp)
            }
            Requirement::ActionType { action_type, standard_project: None } => {
                write!(f, "{}", action_type)
            }
        }
    }
}

/// Cost reductions keyed by the requirement that must hold.
pub type DiscountMap = FxHashMap<Requirement, i32>;

/// Add `amount` to the discount for `requirement`.
pub fn merge_discount(discounts: &mut DiscountMap, requirement: Requirement, amount: i32) {
    *discounts.entry(requirement).or_insert(0) += amount;
}

/// Lets `from` be spent in place of `to` at `rate`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceMapping {
    pub from: Resource,
    pub to: Resource,
    pub rate: f64,
    pub requirement: Option<Requirement>,
}

impl ResourceMapping {
    #[must_use]
    pub fn new(from: Resource, to: Resource, rate: f64) -> Self {
        Self { from, to, rate, requirement: None }
    }
}
