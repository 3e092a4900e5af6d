//! Snapshot history.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{EntityStore, StoreSnapshot};
use crate::rules::RuleEngine;

/// Per-level undo history.
///
/// A turn opens with [`begin_turn`](Self::begin_turn), which records the
/// board as it was, and closes with
/// [`commit_or_discard`](Self::commit_or_discard). Turns in which nothing
/// moved leave no trace.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UndoManager {
    history: VecDeque<StoreSnapshot>,
    pending: bool,
    initial: Option<StoreSnapshot>,
    limit: Option<usize>,
}

impl UndoManager {
    /// Create an empty history, optionally capped at `limit` turns.
    #[must_use]
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Start a new level: forget the history and remember where it began.
    pub fn reset_level(&mut self, initial: StoreSnapshot) {
        self.history.clear();
        self.pending = false;
        self.initial = Some(initial);
    }

    /// Record the board before a move is attempted.
    pub fn begin_turn(&mut self, store: &EntityStore) {
        if self.pending {
            // The previous turn was never closed; treat it as a no-op.
            self.history.pop_back();
        }
        self.history.push_back(store.snapshot());
        self.pending = true;
    }

    /// Close the turn opened by [`begin_turn`](Self::begin_turn).
    ///
    /// If nothing moved the recorded snapshot is dropped. Otherwise it is
    /// kept, evicting the oldest entries past the history limit.
    pub fn commit_or_discard(&mut self, moved: bool) {
        if !self.pending {
            return;
        }
        self.pending = false;

        if !moved {
            self.history.pop_back();
            return;
        }
        if let Some(limit) = self.limit {
            while self.history.len() > limit {
                self.history.pop_front();
            }
        }
    }

    /// Step back one committed turn.
    ///
    /// Restores the store and re-derives the rules from the restored board.
    /// Returns false if there is nothing to undo.
    pub fn undo(&mut self, store: &mut EntityStore, rules: &mut RuleEngine) -> bool {
        if self.pending {
            return false;
        }
        let Some(snapshot) = self.history.pop_back() else {
            return false;
        };
        store.restore(snapshot);
        rules.update(store);
        true
    }

    /// Return to the board as it was when the level loaded.
    ///
    /// Clears the history. Returns false if no level has been loaded.
    pub fn restart(&mut self, store: &mut EntityStore, rules: &mut RuleEngine) -> bool {
        let Some(initial) = self.initial.clone() else {
            return false;
        };
        self.history.clear();
        self.pending = false;
        store.restore(initial);
        rules.update(store);
        true
    }

    /// Number of turns that can be undone.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.history.len() - usize::from(self.pending)
    }

    /// The snapshot taken when the level loaded.
    #[must_use]
    pub fn initial(&self) -> Option<&StoreSnapshot> {
        self.initial.as_ref()
    }
}
