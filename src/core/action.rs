//! Player actions.
//!
//! The engine accepts a closed set of discrete actions. Mapping keys,
//! buttons or network messages to actions is the host's job; hosts that
//! work with text can parse action names with [`str::parse`].
//!
//! ```
//! use rule_grid::core::{Action, Direction};
//!
//! let action: Action = "left".parse().unwrap();
//! assert_eq!(action, Action::MoveLeft);
//! assert_eq!(action.direction(), Some(Direction::Left));
//! assert!("jump".parse::<Action>().is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::position::Direction;

/// A single player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Step back one committed turn.
    Undo,
    /// Return to the level's initial layout.
    Restart,
}

impl Action {
    /// The movement action for a direction.
    #[must_use]
    pub const fn moving(direction: Direction) -> Self {
        match direction {
            Direction::Up => Action::MoveUp,
            Direction::Down => Action::MoveDown,
            Direction::Left => Action::MoveLeft,
            Direction::Right => Action::MoveRight,
        }
    }

    /// The direction of a movement action, `None` for Undo and Restart.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Action::MoveUp => Some(Direction::Up),
            Action::MoveDown => Some(Direction::Down),
            Action::MoveLeft => Some(Direction::Left),
            Action::MoveRight => Some(Direction::Right),
            Action::Undo | Action::Restart => None,
        }
    }
}

/// An action name that does not map to any [`Action`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown action `{0}`")]
pub struct ParseActionError(pub String);

impl std::str::FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Action::MoveUp),
            "down" => Ok(Action::MoveDown),
            "left" => Ok(Action::MoveLeft),
            "right" => Ok(Action::MoveRight),
            "undo" => Ok(Action::Undo),
            "restart" => Ok(Action::Restart),
            _ => Err(ParseActionError(s.to_string())),
        }
    }
}
