//! Level loading errors.

use thiserror::Error;

/// Which of a level's two character grids an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Gameplay,
    Rules,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layer::Gameplay => write!(f, "gameplay"),
            Layer::Rules => write!(f, "rule"),
        }
    }
}

/// A level could not be parsed or loaded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// The line after a level name was not `W x H`.
    #[error("level `{level}`: bad dimension line `{line}` (expected `W x H`)")]
    InvalidDimensions { level: String, line: String },

    /// The text ended before a level name got its dimension line.
    #[error("level `{level}`: missing dimension line")]
    MissingDimensions { level: String },

    /// The text ended partway through a layer.
    #[error("level `{level}`: {layer} layer has {found} of {expected} rows")]
    IncompleteLayer {
        level: String,
        layer: Layer,
        expected: usize,
        found: usize,
    },

    /// Width or height is zero.
    #[error("level `{level}`: grid is {width} x {height}")]
    EmptyGrid { level: String, width: usize, height: usize },

    /// A layer does not match the declared dimensions.
    #[error("level `{level}`: {layer} row {row} has {found} cells, expected {expected}")]
    NonRectangular {
        level: String,
        layer: Layer,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A campaign was given no levels.
    #[error("no levels to play")]
    NoLevels,

    /// A level index past the end of the campaign.
    #[error("level {index} requested, but there are only {count}")]
    NoSuchLevel { index: usize, count: usize },
}
