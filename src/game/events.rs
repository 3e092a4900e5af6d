//! Notifications for the host.
//!
//! The engine queues these as a side channel. Renderers use them for
//! particles, sparkles and fanfare; nothing in the engine reads them back.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Position};

/// Something the host may want to react to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A level finished loading.
    LevelLoaded { name: String },
    /// An entity was destroyed by SINK or KILL.
    EntityDestroyed { entity: EntityId, position: Position },
    /// An entity became YOU this turn.
    BecameYou { entity: EntityId, position: Position },
    /// An entity became WIN this turn.
    BecameWin { entity: EntityId, position: Position },
    /// The level was won.
    Victory,
    /// No YOU entity is left.
    Defeat,
}

impl GameEvent {
    /// The cell the event happened in, if it has one.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            GameEvent::EntityDestroyed { position, .. }
            | GameEvent::BecameYou { position, .. }
            | GameEvent::BecameWin { position, .. } => Some(*position),
            GameEvent::LevelLoaded { .. } | GameEvent::Victory | GameEvent::Defeat => None,
        }
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::LevelLoaded { name } => write!(f, "LevelLoaded({name})"),
            GameEvent::EntityDestroyed { entity, position } => write!(f, "EntityDestroyed({entity} at {position})"),
            GameEvent::BecameYou { entity, position } => write!(f, "BecameYou({entity} at {position})"),
            GameEvent::BecameWin { entity, position } => write!(f, "BecameWin({entity} at {position})"),
            GameEvent::Victory => write!(f, "Victory"),
            GameEvent::Defeat => write!(f, "Defeat"),
        }
    }
}
