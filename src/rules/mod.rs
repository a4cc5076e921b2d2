//! Engine-facing rule contracts.
//!
//! The hosting engine drives play through a small set of traits. Games
//! implement them for their own action and state types; the engine never
//! interprets game-specific concepts directly.

pub mod sequence;

pub use sequence::ExtendedSequence;
