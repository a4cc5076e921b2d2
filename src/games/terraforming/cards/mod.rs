//! Cards and the card compiler.
//!
//! - [`Card`]: the compiled card
//! - [`CardCompiler`]: turns a rules or markup definition into a card
//! - [`CardLibrary`]: compiled cards keyed by number, with a binary cache
//! - [`grammar`]: the small text grammars both compilers share

mod card;
mod compiler;
pub mod grammar;
mod library;
mod markup;
mod rule_format;

pub use card::Card;
pub use compiler::{CardCompiler, DefinitionFormat};
pub use library::CardLibrary;
