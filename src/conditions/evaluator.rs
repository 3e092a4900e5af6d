//! Win/lose evaluation after a committed move.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, EntityStore, Name, Position, Properties};
use crate::rules::RuleEngine;

/// Result of a condition check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A YOU entity shares a cell with a WIN entity.
    Win,
    /// No YOU entity is left.
    Lose,
    /// Play goes on.
    Continue,
}

/// What a condition check did and decided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConditionReport {
    pub outcome: Outcome,
    /// YOU entities destroyed by KILL, with their cells.
    pub destroyed: Vec<(EntityId, Position)>,
}

/// Reads the derived rules to find YOU/WIN entities and settle the turn.
#[derive(Clone, Copy, Debug)]
pub struct ConditionEvaluator<'a> {
    rules: &'a RuleEngine,
}

impl<'a> ConditionEvaluator<'a> {
    #[must_use]
    pub fn new(rules: &'a RuleEngine) -> Self {
        Self { rules }
    }

    /// Every gameplay entity whose name is YOU.
    #[must_use]
    pub fn you_entities(&self, store: &EntityStore) -> BTreeSet<EntityId> {
        self.tagged(store, Properties::YOU)
    }

    /// Every gameplay entity whose name is WIN.
    #[must_use]
    pub fn win_entities(&self, store: &EntityStore) -> BTreeSet<EntityId> {
        self.tagged(store, Properties::WIN)
    }

    fn tagged(&self, store: &EntityStore, props: Properties) -> BTreeSet<EntityId> {
        let names = self.rules.names_with(props);
        if names.is_empty() {
            return BTreeSet::new();
        }
        store
            .with::<Name>()
            .filter(|(id, name)| !store.is_word(*id) && names.contains(name.as_str()))
            .map(|(id, _)| id)
            .collect()
    }

    fn has_property(&self, store: &EntityStore, id: EntityId, props: Properties) -> bool {
        !store.is_word(id)
            && store
                .name(id)
                .is_some_and(|name| self.rules.has(name.as_str(), props))
    }

    /// Resolve KILL, then decide between win, lose and continue.
    ///
    /// 1. No YOU entities: lose.
    /// 2. Every YOU entity sharing a cell with some other KILL entity is
    ///    destroyed.
    /// 3. No YOU entities left: lose.
    /// 4. A YOU entity sharing a cell with a WIN entity: win.
    pub fn check_conditions(&self, store: &mut EntityStore) -> ConditionReport {
        let you = self.you_entities(store);
        if you.is_empty() {
            return ConditionReport {
                outcome: Outcome::Lose,
                destroyed: Vec::new(),
            };
        }

        let mut victims = Vec::new();
        for &id in &you {
            let Some(cell) = store.position(id) else {
                continue;
            };
            let killed = store
                .entities_at(cell)
                .into_iter()
                .any(|other| other != id && self.has_property(store, other, Properties::KILL));
            if killed {
                victims.push((id, cell));
            }
        }

        let mut destroyed = Vec::with_capacity(victims.len());
        for (id, cell) in victims {
            if store.destroy_entity(id) {
                tracing::debug!(entity = %id, %cell, "killed");
                destroyed.push((id, cell));
            }
        }

        let you = self.you_entities(store);
        if you.is_empty() {
            return ConditionReport {
                outcome: Outcome::Lose,
                destroyed,
            };
        }

        let won = you.iter().filter_map(|&id| store.position(id)).any(|cell| {
            store
                .entities_at(cell)
                .into_iter()
                .any(|other| self.has_property(store, other, Properties::WIN))
        });

        ConditionReport {
            outcome: if won { Outcome::Win } else { Outcome::Continue },
            destroyed,
        }
    }
}
