//! Entity/component storage with cheap snapshots.
//!
//! ## Layout
//!
//! One persistent ordered map per component kind, keyed by [`EntityId`].
//! `im::OrdMap` gives two things at once:
//! - iteration in ascending ID order, so every system walks entities
//!   deterministically
//! - O(1) cloning with copy-on-write, so [`EntityStore::snapshot`] is a
//!   value-semantics deep copy that costs almost nothing
//!
//! ## Usage
//!
//! ```
//! use rule_grid::core::{EntityStore, Name, Position};
//!
//! let mut store = EntityStore::new();
//! let rock = store.create_entity();
//! store.add_component(rock, Position::new(1, 2));
//! store.add_component(rock, Name::new("Rock"));
//!
//! let before = store.snapshot();
//! store.get_mut::<Position>(rock).unwrap().x = 5;
//! assert_eq!(store.position(rock), Some(Position::new(5, 2)));
//!
//! store.restore(before);
//! assert_eq!(store.position(rock), Some(Position::new(1, 2)));
//! ```

use im::{OrdMap, OrdSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::components::{Name, RuleWord};
use super::entity::EntityId;
use super::position::Position;

/// Entities sharing one cell. Cells rarely hold more than a handful.
pub type Occupants = SmallVec<[EntityId; 4]>;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Position {}
    impl Sealed for super::Name {}
    impl Sealed for super::RuleWord {}
}

/// A component kind the store knows how to hold.
///
/// Implemented for [`Position`], [`Name`] and [`RuleWord`]; the set is
/// closed.
pub trait Component: Clone + sealed::Sealed {
    /// Whether the component may be replaced or edited after it is added.
    const MUTABLE: bool;

    #[doc(hidden)]
    fn column(store: &EntityStore) -> &OrdMap<EntityId, Self>;

    #[doc(hidden)]
    fn column_mut(store: &mut EntityStore) -> &mut OrdMap<EntityId, Self>;
}

impl Component for Position {
    const MUTABLE: bool = true;

    fn column(store: &EntityStore) -> &OrdMap<EntityId, Self> {
        &store.positions
    }

    fn column_mut(store: &mut EntityStore) -> &mut OrdMap<EntityId, Self> {
        &mut store.positions
    }
}

impl Component for Name {
    const MUTABLE: bool = true;

    fn column(store: &EntityStore) -> &OrdMap<EntityId, Self> {
        &store.names
    }

    fn column_mut(store: &mut EntityStore) -> &mut OrdMap<EntityId, Self> {
        &mut store.names
    }
}

impl Component for RuleWord {
    const MUTABLE: bool = false;

    fn column(store: &EntityStore) -> &OrdMap<EntityId, Self> {
        &store.words
    }

    fn column_mut(store: &mut EntityStore) -> &mut OrdMap<EntityId, Self> {
        &mut store.words
    }
}

/// The live entity set and every component attached to it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStore {
    next_id: EntityId,
    alive: OrdSet<EntityId>,
    positions: OrdMap<EntityId, Position>,
    names: OrdMap<EntityId, Name>,
    words: OrdMap<EntityId, RuleWord>,
}

/// A frozen copy of an [`EntityStore`].
///
/// Snapshots never observe later mutation of the store they came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot(EntityStore);

impl StoreSnapshot {
    /// Number of entities captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the snapshot holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read-only view of the captured state.
    #[must_use]
    pub fn as_store(&self) -> &EntityStore {
        &self.0
    }
}

impl EntityStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Entities ===

    /// Allocate a new entity with no components.
    pub fn create_entity(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id = id.next();
        self.alive.insert(id);
        id
    }

    /// Destroy an entity and every component attached to it.
    ///
    /// Returns false if the entity did not exist. Observers are not
    /// notified here; callers that care report the removal themselves.
    pub fn destroy_entity(&mut self, id: EntityId) -> bool {
        if self.alive.remove(&id).is_none() {
            return false;
        }
        self.positions.remove(&id);
        self.names.remove(&id);
        self.words.remove(&id);
        true
    }

    /// Check whether an entity is alive.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.alive.contains(&id)
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    /// Check whether the store has no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// All live entity IDs in ascending order.
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.alive.iter().copied()
    }

    /// Remove every entity and reset ID allocation.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // === Components ===

    /// Attach a component to an entity.
    ///
    /// Replaces an existing component of the same kind, except for
    /// immutable kinds ([`RuleWord`]) which can only be attached once.
    /// Returns false if the entity does not exist or the component was
    /// refused.
    pub fn add_component<T: Component>(&mut self, id: EntityId, component: T) -> bool {
        if !self.contains(id) {
            return false;
        }
        let column = T::column_mut(self);
        if !T::MUTABLE && column.contains_key(&id) {
            return false;
        }
        column.insert(id, component);
        true
    }

    /// Get a component of an entity.
    #[must_use]
    pub fn get<T: Component>(&self, id: EntityId) -> Option<&T> {
        T::column(self).get(&id)
    }

    /// Get a mutable component of an entity.
    ///
    /// Always `None` for immutable component kinds.
    pub fn get_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        if !T::MUTABLE {
            return None;
        }
        T::column_mut(self).get_mut(&id)
    }

    /// Check whether an entity has a component.
    #[must_use]
    pub fn has<T: Component>(&self, id: EntityId) -> bool {
        T::column(self).contains_key(&id)
    }

    /// Entities carrying component `T`, in ascending ID order.
    pub fn with<'a, T: Component + 'a>(&'a self) -> impl Iterator<Item = (EntityId, &'a T)> + 'a {
        T::column(self).iter().map(|(id, component)| (*id, component))
    }

    // === Typed shortcuts ===

    /// Position of an entity.
    #[must_use]
    pub fn position(&self, id: EntityId) -> Option<Position> {
        self.get::<Position>(id).copied()
    }

    /// Move an entity. Returns false if it has no position.
    pub fn set_position(&mut self, id: EntityId, position: Position) -> bool {
        match self.get_mut::<Position>(id) {
            Some(current) => {
                *current = position;
                true
            }
            None => false,
        }
    }

    /// Name of an entity.
    #[must_use]
    pub fn name(&self, id: EntityId) -> Option<&Name> {
        self.get::<Name>(id)
    }

    /// Word tile component of an entity.
    #[must_use]
    pub fn word(&self, id: EntityId) -> Option<&RuleWord> {
        self.get::<RuleWord>(id)
    }

    /// Check whether an entity is a word tile.
    #[must_use]
    pub fn is_word(&self, id: EntityId) -> bool {
        self.has::<RuleWord>(id)
    }

    /// Entities occupying a cell, in ascending ID order.
    #[must_use]
    pub fn entities_at(&self, cell: Position) -> Occupants {
        self.positions
            .iter()
            .filter(|(_, pos)| **pos == cell)
            .map(|(id, _)| *id)
            .collect()
    }

    // === Snapshots ===

    /// Capture the complete state of the store.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot(self.clone())
    }

    /// Replace the live entity set and all components with a snapshot.
    pub fn restore(&mut self, snapshot: StoreSnapshot) {
        *self = snapshot.0;
    }
}
