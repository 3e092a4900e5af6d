//! What movement needs to know about the board's current rules.

use serde::{Deserialize, Serialize};

use crate::core::{EngineConfig, EntityId, EntityStore, Position, Properties};
use crate::rules::ActiveRules;

/// The playable area of a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    /// Create bounds for a `width` × `height` grid.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Check whether a cell lies on the grid.
    #[must_use]
    pub const fn contains(self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }
}

/// Read-only view of the rules as they stood when the turn began.
///
/// Pushability, blocking, You and Sink are all decided here so the
/// resolver itself stays free of rule lookups.
#[derive(Clone, Copy, Debug)]
pub struct MoveContext<'a> {
    rules: &'a ActiveRules,
    hard_blockers: &'a [String],
    bounds: Bounds,
}

impl<'a> MoveContext<'a> {
    /// Build a context from the active rules and engine configuration.
    #[must_use]
    pub fn new(rules: &'a ActiveRules, config: &'a EngineConfig, bounds: Bounds) -> Self {
        Self {
            rules,
            hard_blockers: &config.hard_blockers,
            bounds,
        }
    }

    /// The grid bounds.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Properties of a gameplay entity. Word tiles never carry any.
    #[must_use]
    pub fn properties(&self, store: &EntityStore, id: EntityId) -> Properties {
        if store.is_word(id) {
            return Properties::empty();
        }
        store
            .name(id)
            .and_then(|name| self.rules.get(name.as_str()))
            .copied()
            .unwrap_or_default()
    }

    /// Word tiles always; gameplay entities when their name is PUSH.
    #[must_use]
    pub fn is_pushable(&self, store: &EntityStore, id: EntityId) -> bool {
        store.is_word(id) || self.properties(store, id).contains(Properties::PUSH)
    }

    /// Gameplay entities whose name is YOU.
    #[must_use]
    pub fn is_you(&self, store: &EntityStore, id: EntityId) -> bool {
        self.properties(store, id).contains(Properties::YOU)
    }

    /// Gameplay entities whose name is SINK.
    #[must_use]
    pub fn is_sink(&self, store: &EntityStore, id: EntityId) -> bool {
        self.properties(store, id).contains(Properties::SINK)
    }

    /// Check whether an occupant refuses to let anything into its cell.
    ///
    /// Hard blockers always block. Otherwise a gameplay entity blocks when
    /// it is STOP and not also PUSH. Word tiles never block.
    #[must_use]
    pub fn blocks(&self, store: &EntityStore, id: EntityId) -> bool {
        if store.is_word(id) {
            return false;
        }
        if let Some(name) = store.name(id) {
            if self.hard_blockers.iter().any(|b| b == name.as_str()) {
                return true;
            }
        }
        let props = self.properties(store, id);
        props.contains(Properties::STOP) && !props.contains(Properties::PUSH)
    }
}
