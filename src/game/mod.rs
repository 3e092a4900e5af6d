//! Playing levels.
//!
//! [`Game`] drives a single level turn by turn; [`Campaign`] strings levels
//! together.
//!
//! ## Usage
//!
//! ```
//! use rule_grid::core::{Action, EngineConfig};
//! use rule_grid::game::{Game, TurnResult};
//! use rule_grid::level::LevelData;
//!
//! let level = LevelData::from_rows(
//!     "First steps",
//!     3,
//!     3,
//!     &["bf ", "   ", "   "],
//!     &["   ", "BIY", "FIX"],
//! );
//!
//! let mut game = Game::new(EngineConfig::default());
//! game.load_level(&level).unwrap();
//! assert_eq!(game.apply_action(Action::MoveRight), TurnResult::Win);
//! ```

pub mod campaign;
pub mod events;
pub mod session;

pub use campaign::{Campaign, CampaignStep};
pub use events::GameEvent;
pub use session::{Game, RenderTile, TurnResult};
