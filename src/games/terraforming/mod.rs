//! Colonization game rules.
//!
//! A player-owned economy of resource stocks and productions, three global
//! parameters pushed from their minimum to their maximum, and project cards
//! whose effects are compiled from data files.
//!
//! ## Modules
//!
//! - `types`: resources, tags, tiles and the other name enumerations
//! - `config`: game parameters
//! - `requirement`: predicates, discounts and resource mappings
//! - `effect`: persisting effects triggered by other actions
//! - `actions`: the action pipeline and the top-card decision
//! - `cards`: compiled cards, the compiler and the card library
//! - `state`: counters, zones and per-player bookkeeping
//! - `turn_order`: generations and the per-player action history
//!
//! ## Example
//!
//! ```
//! use tabletop_rules::games::terraforming::{Resource, TmAction, TmGameParameters, TmGameState};
//!
//! let mut state = TmGameState::new(TmGameParameters::default(), 2);
//! let mut action = TmAction::parse("inc-heatprod-2").action.unwrap();
//!
//! assert!(action.execute(&mut state));
//! assert_eq!(state.production(state.current_player(), Resource::Heat), 2);
//! ```

mod actions;
pub mod cards;
mod config;
mod effect;
mod requirement;
mod state;
mod turn_order;
mod types;

pub use actions::{ActionKind, ParsedAction, TileDestination, TmAction, TopCardDecision};
pub use cards::{Card, CardCompiler, CardLibrary, DefinitionFormat};
pub use config::{ParameterBounds, TmGameParameters};
pub use effect::{EffectTrigger, PersistingEffect};
pub use requirement::{merge_discount, ActionContext, DiscountMap, Requirement, ResourceMapping, TagCount};
pub use state::{TilePlacement, TmGameState};
pub use turn_order::{ActionRecord, TmTurnOrder};
pub use types::{
    resolve, ActionType, CardType, GlobalParameter, MapTileType, Resource, StandardProject, Tag, Tile, TokenType,
};
