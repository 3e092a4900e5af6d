//! Entity identification.
//!
//! Every tile on the board (a wall, a rock, the word "Is") is an entity.
//! Entities carry no data of their own; everything lives in components
//! stored by [`EntityStore`](super::EntityStore).
//!
//! IDs are handed out in creation order and never reused within a level,
//! so sorting by ID gives a stable, deterministic iteration order.
//!
//! ```
//! use rule_grid::core::EntityId;
//!
//! let first = EntityId(0);
//! let second = EntityId::from(1);
//! assert!(first < second);
//! assert_eq!(second.raw(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a board entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
