//! Dungeon-crawl dice.
//!
//! Attack and defence rolls are made with pools of coloured dice. Each die
//! copies a template from the fixed master catalog; pools aggregate the
//! faces showing into damage, shields, surges and range.

mod dice;
mod pool;

pub use dice::{DiceType, Die, Face, FACES, MASTER_DICE};
pub use pool::{DicePool, VisibilityMode};
