//! Component identification.
//!
//! Counters, cards and other game components are addressed by a
//! `ComponentId` handed out by the game state. Ids are never reused within a
//! game, so an id captured by an action stays valid across state snapshots.
//!
//! ```
//! use tabletop_rules::core::{ComponentId, ComponentAllocator};
//!
//! let mut ids = ComponentAllocator::default();
//! let a = ids.next();
//! let b = ids.next();
//!
//! assert_eq!(a, ComponentId(0));
//! assert_eq!(b, ComponentId(1));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a game component (counter, card, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentId(pub u32);

impl ComponentId {
    /// Create a component ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for ComponentId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Component({})", self.0)
    }
}

/// Monotonic id source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentAllocator {
    next: u32,
}

impl ComponentAllocator {
    /// Allocate the next id.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> ComponentId {
        let id = ComponentId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_monotonic() {
        let mut ids = ComponentAllocator::default();
        let first: Vec<_> = (0..4).map(|_| ids.next()).collect();

        assert_eq!(first, vec![ComponentId(0), ComponentId(1), ComponentId(2), ComponentId(3)]);
        assert_eq!(ids.allocated(), 4);
    }

    #[test]
    fn test_cloned_allocator_continues_independently() {
        let mut ids = ComponentAllocator::default();
        ids.next();

        let mut snapshot = ids.clone();
        assert_eq!(snapshot.next(), ComponentId(1));
        assert_eq!(ids.next(), ComponentId(1));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ComponentId(42)), "Component(42)");
    }

    #[test]
    fn test_serialization() {
        let id = ComponentId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: ComponentId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
