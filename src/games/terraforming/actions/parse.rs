//! Free-text action encodings.
//!
//! Card text and persisting-effect results name actions in two short
//! encodings:
//!
//! - counter change: `inc-oxygen-1`, `dec-megacreditsprod-2`;
//! - tile placement: `placetile/City/Noctis City/true`.
//!
//! Anything else yields no action and an empty label. That is "no effect
//! extracted", not an error.

use super::action::TmAction;
use crate::games::terraforming::cards::grammar;
use crate::games::terraforming::types::{resolve, GlobalParameter};

/// Result of parsing an action encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedAction {
    pub action: Option<TmAction>,
    /// The counter or tile the encoding names.
    pub label: String,
}

impl ParsedAction {
    fn found(action: TmAction, label: impl Into<String>) -> Self {
        Self {
            action: Some(action),
            label: label.into(),
        }
    }
}

impl TmAction {
    /// Parse an action encoding into a free action for the current player.
    ///
    /// ```
    /// use tabletop_rules::games::terraforming::{ActionKind, Resource, TmAction};
    ///
    /// let parsed = TmAction::parse("dec-megacredits-5");
    /// assert_eq!(parsed.label, "megacredits");
    /// assert!(matches!(
    ///     parsed.action.unwrap().kind,
    ///     ActionKind::ModifyResource { resource: Resource::MegaCredits, amount: -5, production: false }
    /// ));
    ///
    /// assert!(TmAction::parse("Draw a card").action.is_none());
    /// ```
    #[must_use]
    pub fn parse(encoding: &str) -> ParsedAction {
        if encoding.contains("inc") || encoding.contains("dec") {
            let Some(delta) = grammar::counter_delta(encoding) else {
                return ParsedAction::default();
            };
            if let Some(parameter) = resolve::<GlobalParameter>(&delta.target) {
                let action = TmAction::modify_global_parameter(parameter, delta.amount).free();
                return ParsedAction::found(action, delta.target);
            }
            return match grammar::resource_key(&delta.target) {
                Some((resource, production)) => {
                    let action = TmAction::modify_resource(resource, delta.amount, production).free();
                    ParsedAction::found(action, delta.target)
                }
                None => ParsedAction::default(),
            };
        }

        if encoding.contains("placetile") {
            return match grammar::tile_placement(encoding) {
                Some(spec) => {
                    let action = TmAction::place_tile(spec.tile, spec.destination, spec.on_mars).free();
                    ParsedAction::found(action, spec.tile_name)
                }
                None => ParsedAction::default(),
            };
        }

        ParsedAction::default()
    }
}
