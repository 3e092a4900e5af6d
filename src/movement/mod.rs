//! Grid movement: walking, pushing, blocking and sinking.
//!
//! ## Usage
//!
//! ```
//! use rule_grid::core::{Direction, EngineConfig, EntityStore, Name, Position, Properties};
//! use rule_grid::movement::{Bounds, MoveContext, MovementResolver};
//! use rule_grid::rules::ActiveRules;
//!
//! let mut store = EntityStore::new();
//! let blue = store.create_entity();
//! store.add_component(blue, Position::new(0, 0));
//! store.add_component(blue, Name::new("BigBlue"));
//!
//! let mut rules = ActiveRules::default();
//! rules.insert("BigBlue".into(), Properties::YOU);
//! let config = EngineConfig::default();
//!
//! let ctx = MoveContext::new(&rules, &config, Bounds::new(4, 4));
//! let report = MovementResolver::new(ctx).resolve_turn(&mut store, &[blue], Direction::Right);
//!
//! assert!(report.any_moved());
//! assert_eq!(store.position(blue), Some(Position::new(1, 0)));
//! ```

pub mod context;
pub mod resolver;

pub use context::{Bounds, MoveContext};
pub use resolver::{MoveReport, MovementResolver};
