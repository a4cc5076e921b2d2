//! Actions of the colonization game.
//!
//! - [`TmAction`]: common fields plus an [`ActionKind`] variant, executed
//!   through one shared pipeline
//! - [`TopCardDecision`]: the keep/discard multi-stage decision
//! - [`TmAction::parse`]: free-text action encodings
//!
//! `TmAction` implements [`ExtendedSequence`](crate::rules::ExtendedSequence);
//! only top-card decisions span more than one stage.

mod action;
mod parse;
mod top_card;

pub use action::{ActionKind, TileDestination, TmAction};
pub use parse::ParsedAction;
pub use top_card::TopCardDecision;
