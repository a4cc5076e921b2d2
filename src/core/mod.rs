//! Core engine types: components, players, counters, RNG.
//!
//! These building blocks are game-agnostic. Game modules under
//! `crate::games` compose them into their own state and rules.

pub mod component;
pub mod counter;
pub mod player;
pub mod rng;

pub use component::{ComponentAllocator, ComponentId};
pub use counter::Counter;
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
