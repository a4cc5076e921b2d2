//! Game rule modules.
//!
//! - `descent`: dungeon-crawl dice pools
//! - `terraforming`: the colonization game's actions and card compiler

pub mod descent;
pub mod terraforming;
