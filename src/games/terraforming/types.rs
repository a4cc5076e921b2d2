//! Enumerations shared by cards, actions and state.
//!
//! All names resolve case-insensitively through `FromStr`, which is what the
//! card compiler uses whenever definition text names a resource, tag, tile
//! or parameter. `resolve` wraps that into an `Option` for tolerant call
//! sites.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Case-insensitive lookup of an enum value by name.
///
/// Returns `None` for empty or unknown names instead of failing, so callers
/// decide whether an unknown name skips a clause or falls back.
pub fn resolve<T: FromStr>(name: &str) -> Option<T> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    T::from_str(name).ok()
}

/// Player resources. Each has a stock counter and a production counter.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    strum::Display, strum::EnumString, strum::EnumIter, strum::EnumCount,
)]
#[strum(ascii_case_insensitive)]
pub enum Resource {
    #[strum(to_string = "MegaCredits", serialize = "MegaCredit", serialize = "MC")]
    MegaCredits,
    Steel,
    Titanium,
    #[strum(to_string = "Plant", serialize = "Plants")]
    Plant,
    Energy,
    Heat,
    /// Queued card draws; converted into project cards after every action.
    #[strum(to_string = "Card", serialize = "Cards")]
    Card,
}

/// Global terraforming parameters.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum GlobalParameter {
    #[strum(to_string = "Temperature", serialize = "Temp")]
    Temperature,
    Oxygen,
    #[strum(to_string = "OceanTiles", serialize = "Oceans")]
    OceanTiles,
}

/// Card tags.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Tag {
    Plant,
    Microbe,
    Animal,
    Science,
    Earth,
    Space,
    Event,
    Building,
    Power,
    Jovian,
    City,
    Venus,
    Wild,
}

/// Tiles placed on the board.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Tile {
    Ocean,
    Greenery,
    City,
}

impl Tile {
    /// Map region where this tile may normally be placed.
    #[must_use]
    pub const fn regular_legal_tile_type(self) -> MapTileType {
        match self {
            Tile::Ocean => MapTileType::Ocean,
            Tile::Greenery | Tile::City => MapTileType::Ground,
        }
    }
}

/// Board regions.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum MapTileType {
    Ground,
    Ocean,
    Volcanic,
}

/// Card categories. Project colours are accepted as aliases.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum CardType {
    #[strum(to_string = "Automated", serialize = "green")]
    Automated,
    #[strum(to_string = "Active", serialize = "blue")]
    Active,
    #[strum(to_string = "Event", serialize = "red")]
    Event,
    Corporation,
    Prelude,
}

/// Tokens placed on cards. One bookkeeping slot per variant.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    strum::Display, strum::EnumString, strum::EnumIter, strum::EnumCount,
)]
#[strum(ascii_case_insensitive)]
pub enum TokenType {
    Microbe,
    Animal,
    Science,
    Fighter,
    Floater,
}

impl TokenType {
    /// Slot index in per-card token bookkeeping.
    #[must_use]
    pub const fn slot(self) -> usize {
        self as usize
    }
}

/// The kind of turn action an action originates from.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ActionType {
    PlayCard,
    StandardProject,
    ClaimMilestone,
    FundAward,
    ActiveAction,
    BasicResourceAction,
    BuyProject,
}

/// Standard projects available to every player.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum StandardProject {
    SellPatents,
    PowerPlant,
    Asteroid,
    Aquifer,
    Greenery,
    City,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::EnumCount;

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(resolve::<Resource>("megacredits"), Some(Resource::MegaCredits));
        assert_eq!(resolve::<Resource>("MegaCredit"), Some(Resource::MegaCredits));
        assert_eq!(resolve::<GlobalParameter>("oceantiles"), Some(GlobalParameter::OceanTiles));
        assert_eq!(resolve::<Tag>("SPACE"), Some(Tag::Space));
    }

    #[test]
    fn test_resolve_unknown_or_empty() {
        assert_eq!(resolve::<Tag>("Wormhole"), None);
        assert_eq!(resolve::<Tag>("  "), None);
        assert_eq!(resolve::<GlobalParameter>("megacredits"), None);
    }

    #[test]
    fn test_card_type_colour_aliases() {
        assert_eq!(resolve::<CardType>("green"), Some(CardType::Automated));
        assert_eq!(resolve::<CardType>("blue"), Some(CardType::Active));
        assert_eq!(resolve::<CardType>("red"), Some(CardType::Event));
        assert_eq!(CardType::Automated.to_string(), "Automated");
    }

    #[test]
    fn test_regular_legal_tile_type() {
        assert_eq!(Tile::Ocean.regular_legal_tile_type(), MapTileType::Ocean);
        assert_eq!(Tile::City.regular_legal_tile_type(), MapTileType::Ground);
        assert_eq!(Tile::Greenery.regular_legal_tile_type(), MapTileType::Ground);
    }

    #[test]
    fn test_token_slots_are_dense() {
        assert_eq!(TokenType::Floater.slot(), TokenType::COUNT - 1);
        assert_eq!(Resource::COUNT, 7);
    }
}
