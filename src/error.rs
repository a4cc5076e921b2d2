//! Crate error type.
//!
//! Only fatal conditions surface as `RulesError`:
//!
//! - **Configuration**: a requested die has no master-catalog entry.
//! - **Malformed definition**: a card definition whose top-level shape is
//!   unusable. Problems inside a single clause are not errors; the compiler
//!   skips the clause and logs it.
//! - **Encoding**: JSON input or cached card libraries that fail to decode.
//!
//! An action that refuses to apply (for example a counter already at its
//! bound) reports `false` from `execute`; that is a rules outcome, not an
//! error.

use crate::core::ComponentId;
use crate::games::descent::DiceType;

/// Errors raised by dice construction, card compilation and state lookups.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// A die name that does not resolve to any `DiceType`.
    #[error("unknown die type: {0}")]
    UnknownDieType(String),

    /// The master dice catalog has no template for this type.
    #[error("die not found in master catalog: {0}")]
    MissingCatalogEntry(DiceType),

    /// A card definition is missing a required field or has the wrong shape.
    #[error("malformed card definition {card}: {reason}")]
    MalformedDefinition { card: String, reason: String },

    /// No component with this id exists in the game state.
    #[error("unknown component: {0}")]
    UnknownComponent(ComponentId),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid encoded card library: {0}")]
    Encoding(#[from] bincode::Error),
}

impl RulesError {
    pub(crate) fn malformed(card: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDefinition {
            card: card.into(),
            reason: reason.into(),
        }
    }

    /// True for catalog/configuration mismatches that indicate broken data
    /// rather than a recoverable runtime condition.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::UnknownDieType(_) | Self::MissingCatalogEntry(_))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RulesError>;
