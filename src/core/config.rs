//! Engine configuration.
//!
//! Hosts configure the engine once at startup:
//! - `hard_blockers`: names that block movement no matter what the rules say
//! - `operator_word`: the linking word of a sentence ("Is")
//! - `history_limit`: cap on undo depth
//! - `blueprints`: the character table used to build levels
//!
//! Every field has a default, so a partial config deserializes cleanly.

use serde::{Deserialize, Serialize};

use crate::level::BlueprintTable;

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Names that always block movement, independent of rules.
    ///
    /// Defaults to `["Hedge"]`, the level border. Older rule sets also
    /// treated "Flag" as a blocker; add it here to get that behaviour.
    pub hard_blockers: Vec<String>,

    /// The word that links subject and complement in a sentence.
    pub operator_word: String,

    /// Maximum undo depth. `None` keeps every turn.
    pub history_limit: Option<usize>,

    /// Character to tile lookup used when loading levels.
    pub blueprints: BlueprintTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hard_blockers: vec!["Hedge".to_string()],
            operator_word: "Is".to_string(),
            history_limit: None,
            blueprints: BlueprintTable::standard(),
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name that always blocks movement.
    #[must_use]
    pub fn with_hard_blocker(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.hard_blockers.contains(&name) {
            self.hard_blockers.push(name);
        }
        self
    }

    /// Remove every hard blocker, leaving blocking purely rule-driven.
    #[must_use]
    pub fn without_hard_blockers(mut self) -> Self {
        self.hard_blockers.clear();
        self
    }

    /// Cap the undo history.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Use a different operator word.
    #[must_use]
    pub fn with_operator_word(mut self, word: impl Into<String>) -> Self {
        self.operator_word = word.into();
        self
    }

    /// Use a custom blueprint table.
    #[must_use]
    pub fn with_blueprints(mut self, blueprints: BlueprintTable) -> Self {
        self.blueprints = blueprints;
        self
    }

    /// Check whether a name always blocks.
    #[must_use]
    pub fn is_hard_blocker(&self, name: &str) -> bool {
        self.hard_blockers.iter().any(|b| b == name)
    }
}
