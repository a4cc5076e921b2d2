//! # tabletop-rules
//!
//! Rule content for two board games, built on a small deterministic core.
//!
//! ## Design Principles
//!
//! 1. **Data-Driven Cards**: Card behavior is compiled from definition
//!    files. The compiler is tolerant and skips clauses it cannot read.
//!
//! 2. **Deterministic**: Dice rolls and deck shuffles come from a seeded
//!    RNG, so the same seed and inputs replay the same game.
//!
//! 3. **Cheap Snapshots**: Game state uses `im-rs` persistent structures
//!    and clones in O(1) for forward search.
//!
//! ## Modules
//!
//! - `core`: Component IDs, players, bounded counters, RNG
//! - `rules`: The multi-stage action sequence trait
//! - `games::descent`: Dice pools for attack and defence rolls
//! - `games::terraforming`: Actions, effects, state and the card compiler
//! - `error`: The crate error type

pub mod core;
pub mod error;
pub mod games;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{ComponentAllocator, ComponentId, Counter, GameRng, PlayerId, PlayerMap};

pub use crate::error::{Result, RulesError};

pub use crate::rules::ExtendedSequence;

pub use crate::games::descent::{DicePool, DiceType, Die, Face, VisibilityMode};

pub use crate::games::terraforming::{
    Card, CardCompiler, CardLibrary, DefinitionFormat, TmAction, TmGameParameters, TmGameState,
};
