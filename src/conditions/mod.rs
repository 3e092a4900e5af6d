//! Win and lose conditions.
//!
//! Evaluated once per committed move, after the rules are re-derived and
//! transformations applied. KILL is resolved here rather than during
//! movement.

pub mod evaluator;

pub use evaluator::{ConditionEvaluator, ConditionReport, Outcome};
