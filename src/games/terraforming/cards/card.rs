//! Compiled cards.
//!
//! A `Card` is what the compiler produces from a definition. It is
//! immutable after loading except for the tokens placed on it during play.
//! Every collection defaults to empty, so a definition that mentions no
//! actions, effects or discounts still yields a usable card.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::EnumCount;

use crate::core::PlayerId;
use crate::games::terraforming::actions::TmAction;
use crate::games::terraforming::effect::PersistingEffect;
use crate::games::terraforming::requirement::{DiscountMap, Requirement, ResourceMapping};
use crate::games::terraforming::state::TmGameState;
use crate::games::terraforming::types::{CardType, Tag, TokenType};

/// A compiled project, corporation or prelude card.
///
/// ## Example
///
/// ```
/// use tabletop_rules::games::terraforming::{Card, CardType, Tag, TokenType};
///
/// let mut card = Card::new(52, "Small Animals")
///     .with_type(CardType::Active)
///     .with_cost(6)
///     .with_tags([Tag::Animal]);
/// card.points = 0.5;
/// card.points_token = Some(TokenType::Animal);
///
/// card.add_tokens(TokenType::Animal, 3);
/// assert_eq!(card.victory_points(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Printed card number.
    pub number: u32,

    pub name: String,

    pub card_type: Option<CardType>,

    /// Megacredit cost to play.
    pub cost: i32,

    pub tags: SmallVec<[Tag; 4]>,

    /// All must hold for the card to be played.
    pub requirements: FxHashSet<Requirement>,

    /// Discounts granted to the owner once played.
    pub discounts: DiscountMap,

    pub resource_mappings: Vec<ResourceMapping>,

    pub persisting_effects: Vec<PersistingEffect>,

    /// Forced first action of the owner's first action phase.
    pub first_action: Option<TmAction>,

    /// Actions the card makes available once played.
    pub actions: Vec<TmAction>,

    /// Effects applied when the card is played.
    pub immediate_effects: Vec<TmAction>,

    /// Victory points, per token when `points_token` is set.
    pub points: f64,

    pub points_token: Option<TokenType>,

    /// Token count per token type.
    pub tokens: [u32; TokenType::COUNT],
}

impl Card {
    #[must_use]
    pub fn new(number: u32, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_type(mut self, card_type: CardType) -> Self {
        self.card_type = Some(card_type);
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: i32) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags.extend(tags);
        self
    }

    #[must_use]
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.insert(requirement);
        self
    }

    /// Whether every requirement holds for `player`.
    #[must_use]
    pub fn meets_requirements(&self, state: &TmGameState, player: PlayerId) -> bool {
        self.requirements.iter().all(|r| r.test_condition(state, player))
    }

    #[must_use]
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    #[must_use]
    pub fn token_count(&self, token: TokenType) -> u32 {
        self.tokens[token.slot()]
    }

    pub fn add_tokens(&mut self, token: TokenType, amount: u32) {
        self.tokens[token.slot()] += amount;
    }

    /// Points scored: `points`, or `points` per token of `points_token`,
    /// rounded down.
    #[must_use]
    pub fn victory_points(&self) -> i32 {
        let points = match self.points_token {
            Some(token) => self.points * f64::from(self.token_count(token)),
            None => self.points,
        };
        points.floor() as i32
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.number, self.name)
    }
}
