//! Sentence recognition over word tiles.
//!
//! A sentence is three word tiles in a straight line, left-to-right or
//! top-to-bottom:
//!
//! ```text
//! Subject  Operator  Property     WALL IS STOP
//! Subject  Operator  Subject      ROCK IS FLAG
//! ```
//!
//! Several words may share a cell, so every combination of a subject in
//! the first cell and a complement in the third is a sentence.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Direction, EntityStore, Position, Properties, RuleWord, WordRole};

/// Reading direction of a sentence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The direction words are read in.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Axis::Horizontal => Direction::Right,
            Axis::Vertical => Direction::Down,
        }
    }
}

/// What a sentence says about its subject.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Complement {
    /// `SUBJECT IS PROPERTY`: attach a property.
    Property(Properties),
    /// `SUBJECT IS SUBJECT`: turn one thing into another.
    Subject(String),
}

/// A recognised rule sentence.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sentence {
    /// The subject word.
    pub subject: String,
    /// The property or noun the subject is linked to.
    pub complement: Complement,
    /// Reading direction.
    pub axis: Axis,
    /// Cell of the subject word.
    pub origin: Position,
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.complement {
            Complement::Property(props) => write!(f, "{} IS {}", self.subject, props),
            Complement::Subject(target) => write!(f, "{} IS {}", self.subject, target),
        }
    }
}

/// Sparse map from cell to the words lying in it.
///
/// Built fresh from the store on every scan; holds borrowed word text.
#[derive(Debug, Default)]
pub struct WordGrid<'a> {
    cells: FxHashMap<Position, BTreeMap<&'a str, WordRole>>,
}

impl<'a> WordGrid<'a> {
    /// Collect every positioned word tile in the store.
    #[must_use]
    pub fn from_store(store: &'a EntityStore) -> Self {
        let mut cells: FxHashMap<Position, BTreeMap<&'a str, WordRole>> = FxHashMap::default();
        for (id, word) in store.with::<RuleWord>() {
            if let Some(pos) = store.position(id) {
                cells.entry(pos).or_default().insert(word.word(), word.role());
            }
        }
        Self { cells }
    }

    /// Number of cells holding at least one word.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check whether no words are on the board.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Words at `cell` with the given role, in alphabetical order.
    pub fn words_with_role(&self, cell: Position, role: WordRole) -> impl Iterator<Item = &'a str> + '_ {
        self.cells
            .get(&cell)
            .into_iter()
            .flat_map(|words| words.iter())
            .filter(move |(_, r)| **r == role)
            .map(|(word, _)| *word)
    }

    /// Check whether `cell` holds `word` in the given role.
    #[must_use]
    pub fn has_word(&self, cell: Position, word: &str, role: WordRole) -> bool {
        self.cells
            .get(&cell)
            .and_then(|words| words.get(word))
            .is_some_and(|r| *r == role)
    }

    /// Find every sentence on the board.
    ///
    /// Horizontal sentences come first, scanning rows top-to-bottom and
    /// cells left-to-right; vertical sentences follow, scanning columns
    /// left-to-right and cells top-to-bottom. Consumers that let later
    /// sentences override earlier ones rely on this order.
    #[must_use]
    pub fn sentences(&self, operator_word: &str) -> Vec<Sentence> {
        let mut row_major: Vec<Position> = self.cells.keys().copied().collect();
        row_major.sort_by_key(|p| (p.y, p.x));
        let mut column_major = row_major.clone();
        column_major.sort_by_key(|p| (p.x, p.y));

        let mut out = Vec::new();
        for origin in row_major {
            self.read_at(origin, Axis::Horizontal, operator_word, &mut out);
        }
        for origin in column_major {
            self.read_at(origin, Axis::Vertical, operator_word, &mut out);
        }
        out
    }

    fn read_at(&self, origin: Position, axis: Axis, operator_word: &str, out: &mut Vec<Sentence>) {
        let dir = axis.direction();
        if !self.has_word(origin.offset(dir, 1), operator_word, WordRole::Operator) {
            return;
        }
        let third = origin.offset(dir, 2);

        for subject in self.words_with_role(origin, WordRole::Subject) {
            for word in self.words_with_role(third, WordRole::Property) {
                match Properties::from_word(word) {
                    Some(props) => out.push(Sentence {
                        subject: subject.to_string(),
                        complement: Complement::Property(props),
                        axis,
                        origin,
                    }),
                    None => tracing::trace!(word, %origin, "ignoring unrecognised property word"),
                }
            }
            for target in self.words_with_role(third, WordRole::Subject) {
                out.push(Sentence {
                    subject: subject.to_string(),
                    complement: Complement::Subject(target.to_string()),
                    axis,
                    origin,
                });
            }
        }
    }
}
