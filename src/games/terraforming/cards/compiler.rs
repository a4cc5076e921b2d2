//! Card compiler entry points.
//!
//! Two definition formats compile to the same [`Card`]:
//!
//! - **rules**: a structured record (`id`, `name`, `start`, `tags`,
//!   `effect`) describing corporations;
//! - **markup**: nested `div` nodes scraped from printed card markup, with
//!   `@class` discriminators and `#text` contents.
//!
//! Both pipelines are tolerant. Only an unusable top-level shape fails with
//! [`RulesError::MalformedDefinition`](crate::error::RulesError); a bad
//! clause is skipped with a warning and compilation continues. Compilation
//! is deterministic: the same input always yields equal cards.

use serde_json::Value;

use super::card::Card;
use super::{markup, rule_format};
use crate::error::Result;

/// Definition format of a card source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum DefinitionFormat {
    Rules,
    Markup,
}

/// Compiles card definitions.
///
/// ## Example
///
/// ```
/// use tabletop_rules::games::terraforming::{CardCompiler, CardType, Resource};
///
/// let card = CardCompiler::compile_rules_str(r#"{
///     "id": 1,
///     "name": "Mining Guild",
///     "start": ["30 megacredits, 1 steelprod"],
///     "tags": ["Building", "Building"],
///     "effect": []
/// }"#).unwrap();
///
/// assert_eq!(card.card_type, Some(CardType::Corporation));
/// assert_eq!(card.immediate_effects.len(), 2);
/// assert_eq!(card.tags.len(), 2);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct CardCompiler;

impl CardCompiler {
    /// Compile a structured rules definition.
    pub fn compile_rules(definition: &Value) -> Result<Card> {
        rule_format::compile(definition)
    }

    /// Compile a structured rules definition from JSON text.
    pub fn compile_rules_str(json: &str) -> Result<Card> {
        let definition: Value = serde_json::from_str(json)?;
        Self::compile_rules(&definition)
    }

    /// Compile a scraped-markup definition.
    pub fn compile_markup(definition: &Value) -> Result<Card> {
        markup::compile(definition)
    }

    /// Compile a scraped-markup definition from JSON text.
    pub fn compile_markup_str(json: &str) -> Result<Card> {
        let definition: Value = serde_json::from_str(json)?;
        Self::compile_markup(&definition)
    }

    /// Compile a definition of the given format.
    pub fn compile(format: DefinitionFormat, definition: &Value) -> Result<Card> {
        match format {
            DefinitionFormat::Rules => Self::compile_rules(definition),
            DefinitionFormat::Markup => Self::compile_markup(definition),
        }
    }
}

/// Log a clause dropped by tolerant parsing.
pub(super) fn skip_clause(card: &str, clause: &str, reason: &str) {
    tracing::warn!(card, clause, reason, "card clause skipped");
}
