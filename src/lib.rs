//! # rule-grid
//!
//! A rule-rewriting grid puzzle engine. Word tiles on the board form
//! sentences such as `WALL IS STOP` or `ROCK IS FLAG`, and those sentences
//! decide how every other tile behaves. Push the words around and the
//! rules change.
//!
//! ## Design Principles
//!
//! 1. **Board-Driven Rules**: The rule tables are rebuilt from the word
//!    layout after every committed move. Nothing about a rule is stored
//!    anywhere but on the board.
//!
//! 2. **Single Writer**: `RuleEngine` owns the derived tables. Movement
//!    and condition checks borrow them read-only; there is no global state.
//!
//! 3. **Whole Turns**: Every action runs to completion (move, re-derive,
//!    transform, check) before the next is accepted. A move either
//!    happens in full or not at all.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Components live in `im` maps, so an
//!   undo snapshot is an O(1) clone that never sees later edits.
//!
//! - **Deterministic Order**: Entities are always visited in ascending ID
//!   order, sentences in a fixed scan order.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, positions, components, storage, actions, configuration
//! - `rules`: Sentence recognition and rule derivation
//! - `movement`: Walking, pushing, blocking and sinking
//! - `conditions`: Kill, win and lose checks
//! - `undo`: Snapshot history
//! - `level`: Level text format and character table
//! - `game`: The turn driver and level progression

pub mod core;
pub mod rules;
pub mod movement;
pub mod conditions;
pub mod undo;
pub mod level;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    EntityId, Position, Direction,
    Name, RuleWord, WordRole, Properties,
    EntityStore, StoreSnapshot,
    Action, ParseActionError, EngineConfig,
};

pub use crate::rules::{RuleEngine, ActiveRules, Transformations, Sentence};

pub use crate::movement::{Bounds, MoveContext, MovementResolver, MoveReport};

pub use crate::conditions::{ConditionEvaluator, Outcome};

pub use crate::undo::UndoManager;

pub use crate::level::{parse_levels, Blueprint, BlueprintTable, LevelData, LevelError};

pub use crate::game::{Game, TurnResult, GameEvent, RenderTile, Campaign, CampaignStep};
