//! Dice pools.
//!
//! A pool is assembled for one combat event, rolled, optionally rerolled
//! die by die, then read through aggregate queries. Pools are always
//! visible to every player.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::dice::{DiceType, Die};
use crate::core::GameRng;
use crate::error::{Result, RulesError};

/// Who may see a component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibilityMode {
    VisibleToAll,
    VisibleToOwner,
    HiddenToAll,
}

/// Ordered dice with per-die reroll counters.
///
/// ## Example
///
/// ```
/// use tabletop_rules::core::GameRng;
/// use tabletop_rules::games::descent::{DicePool, DiceType};
///
/// let mut pool = DicePool::from_names(&["blue", "red", "red"]).unwrap();
/// assert_eq!(pool.count(DiceType::Red), 2);
///
/// pool.roll(&mut GameRng::new(42));
/// assert!(pool.has_rolled());
/// assert!(pool.total_damage() >= 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DicePool {
    dice: Vec<Die>,
    rerolls: Vec<u32>,
    rolled: bool,
}

impl DicePool {
    /// Build a pool owning the given dice.
    #[must_use]
    pub fn new(dice: Vec<Die>) -> Self {
        let rerolls = vec![0; dice.len()];
        Self { dice, rerolls, rolled: false }
    }

    /// A pool with no dice.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Build a pool from a type -> count mapping, copying catalog templates.
    pub fn from_counts(counts: &BTreeMap<DiceType, usize>) -> Result<Self> {
        let mut dice = Vec::with_capacity(counts.values().sum());
        for (&dice_type, &amount) in counts {
            let template = Die::from_catalog(dice_type)?;
            dice.extend(std::iter::repeat(template).take(amount));
        }
        Ok(Self::new(dice))
    }

    /// Build a pool from die names; repeated names add up.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let mut counts = BTreeMap::new();
        for name in names {
            let name = name.as_ref();
            let dice_type = DiceType::from_str(name.trim())
                .map_err(|_| RulesError::UnknownDieType(name.to_string()))?;
            *counts.entry(dice_type).or_insert(0) += 1;
        }
        Self::from_counts(&counts)
    }

    /// Roll every die.
    pub fn roll(&mut self, rng: &mut GameRng) {
        self.rolled = true;
        for die in &mut self.dice {
            die.roll(rng);
        }
    }

    /// Reroll a single die. Returns `false` if `index` is out of range.
    pub fn reroll(&mut self, index: usize, rng: &mut GameRng) -> bool {
        match self.dice.get_mut(index) {
            Some(die) => {
                die.roll(rng);
                self.rerolls[index] += 1;
                tracing::debug!(index, rerolls = self.rerolls[index], "die rerolled");
                true
            }
            None => false,
        }
    }

    /// How many times the die at `index` has been rerolled.
    #[must_use]
    pub fn reroll_count(&self, index: usize) -> u32 {
        self.rerolls.get(index).copied().unwrap_or(0)
    }

    /// Independent deep copy for snapshots.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Number of dice of `dice_type`.
    #[must_use]
    pub fn count(&self, dice_type: DiceType) -> usize {
        self.dice.iter().filter(|d| d.dice_type() == dice_type).count()
    }

    #[must_use]
    pub fn total_damage(&self) -> i32 {
        self.dice.iter().map(Die::damage).sum()
    }

    #[must_use]
    pub fn total_shields(&self) -> i32 {
        self.dice.iter().map(Die::shields).sum()
    }

    #[must_use]
    pub fn total_surge(&self) -> i32 {
        self.dice.iter().map(Die::surge).sum()
    }

    #[must_use]
    pub fn total_range(&self) -> i32 {
        self.dice.iter().map(Die::range).sum()
    }

    #[must_use]
    pub fn has_rolled(&self) -> bool {
        self.rolled
    }

    #[must_use]
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Dice are never rolled in secret.
    #[must_use]
    pub fn visibility(&self) -> VisibilityMode {
        VisibilityMode::VisibleToAll
    }
}

impl Default for DicePool {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for DicePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Range: {}, Damage: {}, Surge: {}, Shields: {}",
            self.total_range(),
            self.total_damage(),
            self.total_surge(),
            self.total_shields()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pool_totals_are_zero() {
        let pool = DicePool::empty();
        assert!(pool.is_empty());
        assert_eq!(pool.total_damage(), 0);
        assert_eq!(pool.total_shields(), 0);
        assert_eq!(pool.total_surge(), 0);
        assert_eq!(pool.total_range(), 0);
        assert_eq!(pool.count(DiceType::Blue), 0);
    }

    #[test]
    fn test_from_counts() {
        let counts = BTreeMap::from([(DiceType::Blue, 1), (DiceType::Yellow, 2)]);
        let pool = DicePool::from_counts(&counts).unwrap();

        assert_eq!(pool.len(), 3);
        assert_eq!(pool.count(DiceType::Blue), 1);
        assert_eq!(pool.count(DiceType::Yellow), 2);
        assert_eq!(pool.reroll_count(2), 0);
    }

    #[test]
    fn test_from_names_unknown_type_is_configuration_error() {
        let err = DicePool::from_names(&["red", "purple"]).unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(err, RulesError::UnknownDieType(name) if name == "purple"));
    }

    #[test]
    fn test_totals_follow_showing_faces() {
        let mut pool = DicePool::from_names(&["blue", "gray"]).unwrap();
        // Faces are set explicitly so totals are known.
        let mut dice = pool.dice().to_vec();
        dice[0].set_face(1);
        dice[1].set_face(5);
        pool = DicePool::new(dice);

        assert_eq!(pool.total_range(), 2);
        assert_eq!(pool.total_damage(), 2);
        assert_eq!(pool.total_surge(), 1);
        assert_eq!(pool.total_shields(), 3);
        assert_eq!(pool.to_string(), "Range: 2, Damage: 2, Surge: 1, Shields: 3");
    }

    #[test]
    fn test_reroll_tracks_counts() {
        let mut pool = DicePool::from_names(&["red", "red"]).unwrap();
        let mut rng = GameRng::new(5);
        pool.roll(&mut rng);

        assert!(pool.reroll(1, &mut rng));
        assert!(pool.reroll(1, &mut rng));
        assert!(!pool.reroll(2, &mut rng));

        assert_eq!(pool.reroll_count(0), 0);
        assert_eq!(pool.reroll_count(1), 2);
    }

    #[test]
    fn test_always_visible() {
        assert_eq!(DicePool::empty().visibility(), VisibilityMode::VisibleToAll);
    }
}
