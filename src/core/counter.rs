//! Bounded integer counters.
//!
//! Every numeric quantity the rules touch (global parameters, player stock
//! and production) is a `Counter` with an inclusive `[min, max]` range.

use serde::{Deserialize, Serialize};

use super::component::ComponentId;

/// A named integer counter with inclusive bounds.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Counter {
    pub id: ComponentId,
    pub name: String,
    value: i32,
    min: i32,
    max: i32,
}

impl Counter {
    /// Create a counter starting at `value`, clamped into `[min, max]`.
    ///
    /// Inverted bounds are swapped.
    #[must_use]
    pub fn new(id: ComponentId, name: impl Into<String>, value: i32, min: i32, max: i32) -> Self {
        let name = name.into();
        let (min, max) = if min <= max {
            (min, max)
        } else {
            tracing::warn!(counter = %name, min, max, "counter bounds inverted, swapping");
            (max, min)
        };
        Self {
            id,
            name,
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    #[must_use]
    pub fn value(&self) -> i32 {
        self.value
    }

    #[must_use]
    pub fn min(&self) -> i32 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> i32 {
        self.max
    }

    #[must_use]
    pub fn is_maximum(&self) -> bool {
        self.value >= self.max
    }

    #[must_use]
    pub fn is_minimum(&self) -> bool {
        self.value <= self.min
    }

    /// Whether adding `delta` keeps the counter inside its bounds.
    #[must_use]
    pub fn can_apply(&self, delta: i32) -> bool {
        let next = i64::from(self.value) + i64::from(delta);
        next >= i64::from(self.min) && next <= i64::from(self.max)
    }

    /// Add `delta`, clamping to the bounds. Returns the applied change.
    pub fn increment(&mut self, delta: i32) -> i32 {
        let before = self.value;
        self.value = self.value.saturating_add(delta).clamp(self.min, self.max);
        self.value - before
    }

    /// Set the value directly, clamped to the bounds.
    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max);
    }
}

impl std::fmt::Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.value)
    }
}
