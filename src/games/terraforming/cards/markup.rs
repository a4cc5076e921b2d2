//! Scraped card markup.
//!
//! Printed cards are scraped into nested `div` nodes. Each node has an
//! `@class` discriminator and usually a `#text` content:
//!
//! ```json
//! {
//!   "@class": "card-container automated",
//!   "div": [
//!     {"@class": "card-title background-color-automated", "#text": "Nitrogen-Rich Asteroid"},
//!     {"@class": "card-price", "#text": "31"},
//!     {"@class": "card-tag tag-space", "#text": ""},
//!     {"@class": "card-number", "#text": "#037"},
//!     {"@class": "content", "div": [
//!       {"@class": "points", "#text": "1/2", "div": {"@class": "resource animal"}},
//!       {"@class": "requirements", "#text": "Science Science tags. 5 oxygen max"},
//!       {"@class": "description", "#text": "inc-temperature-1. inc-plantprod-1"}
//!     ]}
//!   ]
//! }
//! ```
//!
//! Counter requirements are recognized but not attached to the card, and
//! descriptions that carry an action or effect header are not parsed.

use serde_json::Value;

use super::card::Card;
use super::compiler::skip_clause;
use super::grammar::{self, RequirementClause};
use crate::error::{Result, RulesError};
use crate::games::terraforming::actions::TmAction;
use crate::games::terraforming::requirement::{Requirement, TagCount};
use crate::games::terraforming::types::{resolve, CardType, Tag, TokenType};

pub(super) fn compile(definition: &Value) -> Result<Card> {
    let class = definition
        .get("@class")
        .and_then(Value::as_str)
        .ok_or_else(|| RulesError::malformed("<unnamed>", "missing @class"))?;
    let nodes = definition
        .get("div")
        .and_then(Value::as_array)
        .ok_or_else(|| RulesError::malformed(class, "missing div nodes"))?;

    let mut card = Card::default();
    card.card_type = class.split(' ').nth(1).and_then(resolve::<CardType>);

    for node in nodes {
        let Some(info) = node.get("@class").and_then(Value::as_str) else {
            continue;
        };
        let text = node.get("#text").and_then(Value::as_str).unwrap_or_default();

        if info.contains("title") {
            if let Some(card_type) = info.rsplit('-').next().and_then(resolve::<CardType>) {
                card.card_type = Some(card_type);
            }
            card.name = text.trim().to_string();
        } else if info.contains("price") {
            match text.trim().parse() {
                Ok(cost) => card.cost = cost,
                Err(_) => skip_clause(&card.name, text, "price is not a number"),
            }
        } else if info.contains("tag") {
            match info.rsplit('-').next().and_then(resolve::<Tag>) {
                Some(tag) => card.tags.push(tag),
                None => tracing::debug!(card = %card.name, class = info, "unknown tag ignored"),
            }
        } else if info.contains("number") {
            match grammar::card_number(text) {
                Some(number) => card.number = number,
                None => skip_clause(&card.name, text, "card number has no digits"),
            }
        } else if info.contains("content") {
            if let Some(children) = node.get("div").and_then(Value::as_array) {
                for child in children {
                    compile_content(&mut card, child);
                }
            }
        }
    }

    tracing::debug!(
        card = %card,
        requirements = card.requirements.len(),
        immediate = card.immediate_effects.len(),
        "compiled markup definition"
    );
    Ok(card)
}

fn compile_content(card: &mut Card, node: &Value) {
    let Some(info) = node.get("@class").and_then(Value::as_str) else {
        return;
    };
    let text = node.get("#text").and_then(Value::as_str).unwrap_or_default();

    if info.contains("points") {
        compile_points(card, node, text);
    } else if info.contains("requirements") {
        compile_requirements(card, text);
    } else if info.contains("description") {
        compile_description(card, text);
    }
}

fn compile_points(card: &mut Card, node: &Value, text: &str) {
    match grammar::points_value(text) {
        Some(points) => card.points = points,
        None => {
            skip_clause(&card.name, text, "points are not a number");
            return;
        }
    }

    let condition = node
        .get("div")
        .and_then(|d| d.get("@class"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    let mut words = condition.split(' ');
    if words.next().is_some_and(|w| w.eq_ignore_ascii_case("resource")) {
        card.points_token = words.next().and_then(resolve::<TokenType>);
        if card.points_token.is_none() {
            skip_clause(&card.name, condition, "unknown points token");
        }
    }
}

fn compile_requirements(card: &mut Card, text: &str) {
    for sentence in text.split('.').map(str::trim).filter(|s| !s.is_empty()) {
        match grammar::requirement_sentence(sentence) {
            Some(RequirementClause::Tags(counts)) => {
                let tags = counts
                    .into_iter()
                    .map(|(tag, min)| TagCount::at_least(tag, min))
                    .collect();
                card.requirements.insert(Requirement::Tags(tags));
            }
            Some(RequirementClause::Tile) => {
                tracing::debug!(card = %card.name, sentence, "tile requirement not modeled");
            }
            Some(RequirementClause::Counter { counter, threshold, max }) => {
                tracing::debug!(
                    card = %card.name,
                    %counter,
                    threshold,
                    max,
                    "counter requirement parsed but not attached"
                );
            }
            None => skip_clause(&card.name, sentence, "unrecognized requirement"),
        }
    }
}

fn compile_description(card: &mut Card, text: &str) {
    if text.contains("Action") || text.contains("Effect") {
        tracing::debug!(card = %card.name, "action or effect description not parsed");
        return;
    }

    for sentence in text.split('.') {
        if sentence.contains("Requires") || sentence.contains("must") {
            continue;
        }
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        match TmAction::parse(sentence).action {
            Some(action) => card.immediate_effects.push(action),
            None => tracing::debug!(card = %card.name, sentence, "no action in description sentence"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::terraforming::actions::ActionKind;
    use crate::games::terraforming::{GlobalParameter, Resource};
    use serde_json::json;

    fn asteroid() -> Value {
        json!({
            "@class": "card-container automated",
            "div": [
                {"@class": "card-title background-color-event", "#text": " Nitrogen-Rich Asteroid "},
                {"@class": "card-price", "#text": "31"},
                {"@class": "card-tag tag-space", "#text": ""},
                {"@class": "card-tag tag-dragon", "#text": ""},
                {"@class": "card-number", "#text": "#037"},
                {"@class": "content", "div": [
                    {"@class": "points", "#text": "1/2", "div": {"@class": "resource animal"}},
                    {"@class": "requirements", "#text": "Science Science tags. 5 oxygen max"},
                    {"@class": "description", "#text": "Requires 2 science tags. inc-temperature-1. inc-plantprod-1. Gain glory"}
                ]}
            ]
        })
    }

    #[test]
    fn test_header_nodes() {
        let card = compile(&asteroid()).unwrap();
        assert_eq!(card.name, "Nitrogen-Rich Asteroid");
        assert_eq!(card.card_type, Some(CardType::Event));
        assert_eq!(card.cost, 31);
        assert_eq!(card.tags.as_slice(), &[Tag::Space]);
        assert_eq!(card.number, 37);
    }

    #[test]
    fn test_class_type_kept_when_title_type_unknown() {
        let mut def = asteroid();
        def["div"][0]["@class"] = json!("card-title");
        let card = compile(&def).unwrap();
        assert_eq!(card.card_type, Some(CardType::Automated));
    }

    #[test]
    fn test_points_per_token() {
        let card = compile(&asteroid()).unwrap();
        assert_eq!(card.points, 0.5);
        assert_eq!(card.points_token, Some(TokenType::Animal));
    }

    #[test]
    fn test_requirements_only_attach_tags() {
        let card = compile(&asteroid()).unwrap();
        assert_eq!(card.requirements.len(), 1);
        assert!(card
            .requirements
            .contains(&Requirement::Tags(vec![TagCount::at_least(Tag::Science, 2)])));
    }

    #[test]
    fn test_description_actions() {
        let card = compile(&asteroid()).unwrap();
        let kinds: Vec<_> = card.immediate_effects.iter().map(|a| a.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                ActionKind::ModifyGlobalParameter { parameter: GlobalParameter::Temperature, amount: 1 },
                ActionKind::ModifyResource { resource: Resource::Plant, amount: 1, production: true },
            ]
        );
    }

    #[test]
    fn test_action_descriptions_are_skipped() {
        let mut def = asteroid();
        def["div"][5]["div"][2]["#text"] = json!("Action: inc-heat-1");
        let card = compile(&def).unwrap();
        assert!(card.immediate_effects.is_empty());
    }

    #[test]
    fn test_missing_nodes_is_malformed() {
        assert!(compile(&json!({"@class": "card-container automated"})).is_err());
        assert!(compile(&json!({"div": []})).is_err());
    }
}
