//! Core engine types: entities, components, storage, actions, configuration.
//!
//! Everything else in the crate is built on these. Nothing in `core` knows
//! about rules or movement.

pub mod entity;
pub mod position;
pub mod properties;
pub mod components;
pub mod store;
pub mod action;
pub mod config;

pub use entity::EntityId;
pub use position::{Direction, Position};
pub use properties::Properties;
pub use components::{Name, RuleWord, WordRole};
pub use store::{Component, EntityStore, Occupants, StoreSnapshot};
pub use action::{Action, ParseActionError};
pub use config::EngineConfig;
