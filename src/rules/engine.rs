//! Rule derivation.
//!
//! `RuleEngine` turns the current word layout into two tables:
//! - the **active rules**: name → properties (`WALL IS STOP`)
//! - the **transformations**: name → name (`ROCK IS FLAG`)
//!
//! Both tables are rebuilt from scratch by every [`RuleEngine::update`].
//! Nothing carries over from a previous pass, so a rule disappears the
//! moment its sentence is broken.
//!
//! The engine is the only writer of these tables. Movement and condition
//! checks borrow them read-only.
//!
//! ## Word tiles are always pushable
//!
//! Word tiles can be shoved around regardless of the derived tables.
//! That rule is applied where pushability is decided (see
//! [`MoveContext::is_pushable`](crate::movement::MoveContext::is_pushable)),
//! not by injecting PUSH into the table, so a gameplay "Wall" never picks
//! up PUSH just because a "Wall" word exists.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::core::{EntityId, EntityStore, Name, Properties};

use super::sentence::{Complement, Sentence, WordGrid};

/// Name → properties, derived every pass.
pub type ActiveRules = FxHashMap<String, Properties>;

/// Name → name, derived every pass from `SUBJECT IS SUBJECT` sentences.
pub type Transformations = FxHashMap<String, String>;

/// Derives active rules and transformations from the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleEngine {
    operator_word: String,
    active: ActiveRules,
    transformations: Transformations,
    sentences: Vec<Sentence>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new("Is")
    }
}

impl RuleEngine {
    /// Create an engine with no rules, linking sentences with `operator_word`.
    pub fn new(operator_word: impl Into<String>) -> Self {
        Self {
            operator_word: operator_word.into(),
            active: ActiveRules::default(),
            transformations: Transformations::default(),
            sentences: Vec::new(),
        }
    }

    /// Rebuild both tables from the word tiles currently in `store`.
    ///
    /// When two sentences transform the same subject, the one scanned last
    /// wins (horizontal sentences are scanned before vertical ones).
    pub fn update(&mut self, store: &EntityStore) {
        self.active.clear();
        self.transformations.clear();
        self.sentences = WordGrid::from_store(store).sentences(&self.operator_word);

        for sentence in &self.sentences {
            match &sentence.complement {
                Complement::Property(props) => {
                    *self.active.entry(sentence.subject.clone()).or_default() |= *props;
                }
                Complement::Subject(target) => {
                    if let Some(previous) = self
                        .transformations
                        .insert(sentence.subject.clone(), target.clone())
                    {
                        if previous != *target {
                            tracing::debug!(
                                subject = %sentence.subject,
                                %previous,
                                replacement = %target,
                                "conflicting transformation, later sentence wins"
                            );
                        }
                    }
                }
            }
        }

        tracing::debug!(
            sentences = self.sentences.len(),
            names = self.active.len(),
            transformations = self.transformations.len(),
            "rules derived"
        );
    }

    // === Queries ===

    /// The operator word sentences are linked with.
    #[must_use]
    pub fn operator_word(&self) -> &str {
        &self.operator_word
    }

    /// The active name → properties table.
    #[must_use]
    pub fn active_rules(&self) -> &ActiveRules {
        &self.active
    }

    /// The name → name transformation table.
    #[must_use]
    pub fn transformations(&self) -> &Transformations {
        &self.transformations
    }

    /// Sentences found by the last update, in scan order.
    #[must_use]
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Properties currently attached to `name`.
    #[must_use]
    pub fn properties_of(&self, name: &str) -> Properties {
        self.active.get(name).copied().unwrap_or_default()
    }

    /// Check whether `name` carries every flag in `props`.
    #[must_use]
    pub fn has(&self, name: &str, props: Properties) -> bool {
        self.properties_of(name).contains(props)
    }

    /// Every name carrying all flags in `props`.
    #[must_use]
    pub fn names_with(&self, props: Properties) -> FxHashSet<String> {
        self.active
            .iter()
            .filter(|(_, p)| p.contains(props))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Follow the transformation table from `name` to a fixed point.
    ///
    /// Chains are followed (`A → B → C` yields `C`). When the walk reaches
    /// a name it has already visited it stops there, so every name on a
    /// cycle maps to itself and a chain leading into a cycle ends at the
    /// point of re-entry.
    ///
    /// ```
    /// use rule_grid::rules::RuleEngine;
    ///
    /// let engine = RuleEngine::default();
    /// assert_eq!(engine.final_transformation("Rock"), "Rock");
    /// ```
    #[must_use]
    pub fn final_transformation<'a>(&'a self, name: &'a str) -> &'a str {
        let mut current = name;
        let mut visited: FxHashSet<&str> = FxHashSet::default();

        while visited.insert(current) {
            match self.transformations.get(current) {
                Some(next) => current = next.as_str(),
                None => break,
            }
        }
        current
    }

    /// Rename every gameplay entity whose name transforms.
    ///
    /// Word tiles are never renamed. Returns the entities that changed,
    /// in ascending ID order.
    pub fn apply_transformations(&self, store: &mut EntityStore) -> Vec<EntityId> {
        if self.transformations.is_empty() {
            return Vec::new();
        }

        let changes: Vec<(EntityId, String)> = store
            .with::<Name>()
            .filter(|(id, _)| !store.is_word(*id))
            .filter_map(|(id, name)| {
                let target = self.final_transformation(name.as_str());
                (target != name.as_str()).then(|| (id, target.to_string()))
            })
            .collect();

        let mut changed = Vec::with_capacity(changes.len());
        for (id, target) in changes {
            if let Some(name) = store.get_mut::<Name>(id) {
                tracing::debug!(entity = %id, from = %name, to = %target, "entity transformed");
                *name = Name(target);
                changed.push(id);
            }
        }
        changed
    }
}
