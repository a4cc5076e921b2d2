//! Card library for compiled-card lookup.
//!
//! The `CardLibrary` stores every compiled card of a game keyed by printed
//! number. Loading a whole definition file is tolerant: a malformed entry is
//! logged and skipped, the rest still load. A compiled library can be cached
//! with `encode` and restored with `decode`.

use std::collections::BTreeMap;

use serde_json::Value;

use super::card::Card;
use super::compiler::{CardCompiler, DefinitionFormat};
use crate::error::{Result, RulesError};
use crate::games::terraforming::state::TmGameState;
use crate::games::terraforming::types::CardType;

/// Library of compiled cards.
///
/// ## Example
///
/// ```
/// use tabletop_rules::games::terraforming::{Card, CardLibrary, CardType};
///
/// let mut library = CardLibrary::new();
/// library.register(Card::new(9, "Algae").with_type(CardType::Automated).with_cost(10));
///
/// let found = library.get(9).unwrap();
/// assert_eq!(found.name, "Algae");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardLibrary {
    cards: BTreeMap<u32, Card>,
}

impl CardLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile every definition of a JSON array.
    ///
    /// Fails only when `json` is not valid JSON or not an array.
    pub fn load(json: &str, format: DefinitionFormat) -> Result<Self> {
        let definitions: Value = serde_json::from_str(json)?;
        let entries = definitions
            .as_array()
            .ok_or_else(|| RulesError::malformed(format!("<{format} library>"), "expected an array"))?;

        let mut library = Self::new();
        let mut skipped = 0;
        for (index, definition) in entries.iter().enumerate() {
            match CardCompiler::compile(format, definition) {
                Ok(card) => {
                    library.register(card);
                }
                Err(err) => {
                    tracing::warn!(index, %err, "card definition skipped");
                    skipped += 1;
                }
            }
        }
        tracing::info!(%format, cards = library.len(), skipped, "card library loaded");
        Ok(library)
    }

    /// Register a card, replacing any card with the same number.
    ///
    /// Returns the replaced card.
    pub fn register(&mut self, card: Card) -> Option<Card> {
        let replaced = self.cards.insert(card.number, card);
        if let Some(old) = &replaced {
            tracing::warn!(card = %old, "card number registered twice, keeping the later card");
        }
        replaced
    }

    #[must_use]
    pub fn get(&self, number: u32) -> Option<&Card> {
        self.cards.get(&number)
    }

    #[must_use]
    pub fn contains(&self, number: u32) -> bool {
        self.cards.contains_key(&number)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate in card-number order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &Card> {
        self.cards.values().filter(move |c| c.card_type == Some(card_type))
    }

    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }

    /// Push every non-corporation card onto the project pile of `state`,
    /// in card-number order. Returns how many were added.
    pub fn populate_project_pile(&self, state: &mut TmGameState) -> usize {
        let mut added = 0;
        for card in self.find(|c| c.card_type != Some(CardType::Corporation)) {
            state.push_project_card(card.clone());
            added += 1;
        }
        added
    }

    /// Serialize the compiled library.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let cards: Vec<&Card> = self.cards.values().collect();
        Ok(bincode::serialize(&cards)?)
    }

    /// Restore a library written by [`encode`](Self::encode).
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let cards: Vec<Card> = bincode::deserialize(bytes)?;
        let mut library = Self::new();
        for card in cards {
            library.register(card);
        }
        Ok(library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::terraforming::TmGameParameters;

    fn sample() -> CardLibrary {
        let mut library = CardLibrary::new();
        library.register(Card::new(2, "Helion").with_type(CardType::Corporation));
        library.register(Card::new(5, "Comet").with_type(CardType::Event).with_cost(21));
        library.register(Card::new(3, "Mine").with_type(CardType::Automated).with_cost(4));
        library
    }

    #[test]
    fn test_register_and_get() {
        let library = sample();
        assert_eq!(library.get(5).unwrap().name, "Comet");
        assert!(library.get(99).is_none());
        assert!(library.contains(2));
        assert_eq!(library.len(), 3);
    }

    #[test]
    fn test_duplicate_number_replaces() {
        let mut library = sample();
        let old = library.register(Card::new(5, "Big Comet"));
        assert_eq!(old.unwrap().name, "Comet");
        assert_eq!(library.get(5).unwrap().name, "Big Comet");
        assert_eq!(library.len(), 3);
    }

    #[test]
    fn test_iteration_is_ordered() {
        let numbers: Vec<_> = sample().iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![2, 3, 5]);
    }

    #[test]
    fn test_find() {
        let library = sample();
        assert_eq!(library.find_by_type(CardType::Corporation).count(), 1);
        let cheap: Vec<_> = library.find(|c| c.cost < 10).map(|c| c.name.as_str()).collect();
        assert_eq!(cheap, vec!["Helion", "Mine"]);
    }

    #[test]
    fn test_load_skips_malformed() {
        let json = r#"[
            {"id": 1, "name": "Helion", "start": ["42 megacredits"]},
            {"name": "No Id"},
            {"id": 3, "name": "Ecoline", "start": ["36 megacredits, 2 plantprod"]}
        ]"#;
        let library = CardLibrary::load(json, DefinitionFormat::Rules).unwrap();
        assert_eq!(library.len(), 2);
        assert!(library.contains(1));
        assert!(library.contains(3));
    }

    #[test]
    fn test_load_requires_array() {
        assert!(CardLibrary::load("{}", DefinitionFormat::Markup).is_err());
        assert!(CardLibrary::load("[", DefinitionFormat::Rules).is_err());
    }

    #[test]
    fn test_populate_project_pile() {
        let library = sample();
        let mut state = TmGameState::new(TmGameParameters::default(), 2);
        assert_eq!(library.populate_project_pile(&mut state), 2);
        assert_eq!(state.project_cards().len(), 2);
    }

    #[test]
    fn test_encode_decode() {
        let library = sample();
        let bytes = library.encode().unwrap();
        assert_eq!(CardLibrary::decode(&bytes).unwrap(), library);
        assert!(CardLibrary::decode(&[1, 2, 3]).is_err());
    }
}
