//! Rule derivation from word tiles.
//!
//! Word tiles on the board form sentences (`WALL IS STOP`, `ROCK IS FLAG`).
//! The `RuleEngine` scans them every turn and produces the tables that
//! movement and condition checks read:
//! - active rules: which names carry which properties
//! - transformations: which names turn into which other names

pub mod sentence;
pub mod engine;

pub use sentence::{Axis, Complement, Sentence, WordGrid};
pub use engine::{ActiveRules, RuleEngine, Transformations};
