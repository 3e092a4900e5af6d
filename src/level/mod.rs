//! Level definitions: the text format, the character grids it parses
//! into, and the character table that turns grid cells into entities.

pub mod blueprint;
pub mod data;
pub mod error;
pub mod parser;

pub use blueprint::{Blueprint, BlueprintTable};
pub use data::{LevelData, BLANK};
pub use error::{Layer, LevelError};
pub use parser::parse_levels;
