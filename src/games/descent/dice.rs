//! Dice types, faces and the master catalog.
//!
//! Every die in play is a copy of a catalog template. The template fixes the
//! six faces; a copy only adds the index of the face currently showing.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;
use crate::error::{Result, RulesError};

/// Dice colours. Attack dice roll damage, range and surges; defence dice
/// roll shields.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum DiceType {
    Red,
    Blue,
    Yellow,
    Green,
    Brown,
    #[strum(to_string = "Gray", serialize = "Grey")]
    Gray,
    Black,
}

impl DiceType {
    /// Whether this die is rolled on defence.
    #[must_use]
    pub const fn is_defence(self) -> bool {
        matches!(self, Self::Brown | Self::Gray | Self::Black)
    }
}

/// What one face of a die shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face {
    pub damage: u8,
    pub shields: u8,
    pub surge: u8,
    pub range: u8,
}

impl Face {
    const fn attack(range: u8, damage: u8, surge: u8) -> Self {
        Self { damage, shields: 0, surge, range }
    }

    const fn defence(shields: u8) -> Self {
        Self { damage: 0, shields, surge: 0, range: 0 }
    }
}

/// Number of faces on every die.
pub const FACES: usize = 6;

/// A die: its face table plus the face currently showing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Die {
    dice_type: DiceType,
    faces: [Face; FACES],
    showing: usize,
}

impl Die {
    const fn template(dice_type: DiceType, faces: [Face; FACES]) -> Self {
        Self { dice_type, faces, showing: 0 }
    }

    /// Copy the catalog template for `dice_type`.
    pub fn from_catalog(dice_type: DiceType) -> Result<Self> {
        MASTER_DICE
            .iter()
            .find(|d| d.dice_type == dice_type)
            .cloned()
            .ok_or(RulesError::MissingCatalogEntry(dice_type))
    }

    #[must_use]
    pub fn dice_type(&self) -> DiceType {
        self.dice_type
    }

    /// The face currently showing.
    #[must_use]
    pub fn face(&self) -> Face {
        self.faces[self.showing]
    }

    #[must_use]
    pub fn showing(&self) -> usize {
        self.showing
    }

    /// Turn the die to a specific face. Out-of-range indices are ignored.
    pub fn set_face(&mut self, index: usize) {
        if index < FACES {
            self.showing = index;
        }
    }

    /// Sample a new face uniformly.
    pub fn roll(&mut self, rng: &mut GameRng) {
        self.showing = rng.roll_face(FACES);
    }

    #[must_use]
    pub fn damage(&self) -> i32 {
        i32::from(self.face().damage)
    }

    #[must_use]
    pub fn shields(&self) -> i32 {
        i32::from(self.face().shields)
    }

    #[must_use]
    pub fn surge(&self) -> i32 {
        i32::from(self.face().surge)
    }

    #[must_use]
    pub fn range(&self) -> i32 {
        i32::from(self.face().range)
    }
}

/// Master catalog; one template per dice type.
pub static MASTER_DICE: [Die; 7] = [
    Die::template(
        DiceType::Blue,
        [
            Face::attack(0, 0, 0),
            Face::attack(2, 2, 1),
            Face::attack(3, 2, 0),
            Face::attack(4, 2, 0),
            Face::attack(5, 1, 0),
            Face::attack(6, 1, 1),
        ],
    ),
    Die::template(
        DiceType::Red,
        [
            Face::attack(0, 1, 0),
            Face::attack(0, 2, 0),
            Face::attack(0, 2, 0),
            Face::attack(0, 2, 0),
            Face::attack(0, 3, 0),
            Face::attack(0, 3, 1),
        ],
    ),
    Die::template(
        DiceType::Yellow,
        [
            Face::attack(0, 1, 1),
            Face::attack(0, 2, 0),
            Face::attack(2, 1, 0),
            Face::attack(1, 1, 0),
            Face::attack(1, 0, 1),
            Face::attack(0, 2, 1),
        ],
    ),
    Die::template(
        DiceType::Green,
        [
            Face::attack(0, 1, 1),
            Face::attack(1, 1, 0),
            Face::attack(1, 0, 1),
            Face::attack(0, 1, 0),
            Face::attack(0, 0, 1),
            Face::attack(1, 1, 1),
        ],
    ),
    Die::template(
        DiceType::Brown,
        [
            Face::defence(0),
            Face::defence(0),
            Face::defence(0),
            Face::defence(1),
            Face::defence(1),
            Face::defence(2),
        ],
    ),
    Die::template(
        DiceType::Gray,
        [
            Face::defence(0),
            Face::defence(1),
            Face::defence(1),
            Face::defence(1),
            Face::defence(2),
            Face::defence(3),
        ],
    ),
    Die::template(
        DiceType::Black,
        [
            Face::defence(0),
            Face::defence(2),
            Face::defence(2),
            Face::defence(2),
            Face::defence(3),
            Face::defence(4),
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_catalog_covers_every_type() {
        for dice_type in DiceType::iter() {
            let die = Die::from_catalog(dice_type).unwrap();
            assert_eq!(die.dice_type(), dice_type);
        }
    }

    #[test]
    fn test_name_resolution_is_case_insensitive() {
        assert_eq!(DiceType::from_str("RED").unwrap(), DiceType::Red);
        assert_eq!(DiceType::from_str("grey").unwrap(), DiceType::Gray);
        assert!(DiceType::from_str("purple").is_err());
    }

    #[test]
    fn test_defence_dice_roll_only_shields() {
        for dice_type in DiceType::iter().filter(|t| t.is_defence()) {
            let mut die = Die::from_catalog(dice_type).unwrap();
            for face in 0..FACES {
                die.set_face(face);
                assert_eq!(die.damage() + die.surge() + die.range(), 0);
            }
        }
    }

    #[test]
    fn test_set_face_ignores_out_of_range() {
        let mut die = Die::from_catalog(DiceType::Red).unwrap();
        die.set_face(5);
        die.set_face(6);
        assert_eq!(die.showing(), 5);
        assert_eq!(die.damage(), 3);
        assert_eq!(die.surge(), 1);
    }

    #[test]
    fn test_roll_changes_only_the_copy() {
        let template = Die::from_catalog(DiceType::Blue).unwrap();
        let mut copy = template.clone();
        let mut rng = GameRng::new(11);
        for _ in 0..20 {
            copy.roll(&mut rng);
        }
        assert_eq!(template.showing(), 0);
        assert_eq!(MASTER_DICE[0].showing(), 0);
    }
}
