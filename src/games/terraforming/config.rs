//! Game parameters.
//!
//! Parameters are plain data fixed at game setup. Builder methods mirror the
//! JSON keys so hosts can start from `default()` or load a file.
//!
//! ```
//! use tabletop_rules::games::terraforming::TmGameParameters;
//!
//! let params = TmGameParameters::default()
//!     .with_seed(7)
//!     .with_project_purchase_cost(4);
//! assert_eq!(params.project_purchase_cost, 4);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Inclusive range of a global parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterBounds {
    pub min: i32,
    pub max: i32,
}

impl ParameterBounds {
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

/// Setup-time parameters for a colonization game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TmGameParameters {
    /// Seed for the game's random source.
    pub seed: u64,

    /// Megacredits paid to keep a card offered by a "buy" top-card decision.
    pub project_purchase_cost: i32,

    pub temperature: ParameterBounds,
    pub oxygen: ParameterBounds,
    pub ocean_tiles: ParameterBounds,

    pub starting_megacredits: i32,

    /// Lowest production a resource may fall to (megacredit production can
    /// go negative; other productions are clamped at this or zero).
    pub min_megacredit_production: i32,

    /// Nesting depth at which persisting effects stop triggering further
    /// persisting effects.
    pub effect_depth_limit: u32,
}

impl Default for TmGameParameters {
    fn default() -> Self {
        Self {
            seed: 0,
            project_purchase_cost: 3,
            temperature: ParameterBounds::new(-30, 8),
            oxygen: ParameterBounds::new(0, 14),
            ocean_tiles: ParameterBounds::new(0, 9),
            starting_megacredits: 0,
            min_megacredit_production: -5,
            effect_depth_limit: 8,
        }
    }
}

impl TmGameParameters {
    /// Parse parameters from JSON; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_project_purchase_cost(mut self, cost: i32) -> Self {
        self.project_purchase_cost = cost;
        self
    }

    #[must_use]
    pub fn with_starting_megacredits(mut self, amount: i32) -> Self {
        self.starting_megacredits = amount;
        self
    }

    #[must_use]
    pub fn with_effect_depth_limit(mut self, limit: u32) -> Self {
        self.effect_depth_limit = limit;
        self
    }
}
