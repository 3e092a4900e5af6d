//! Level progression.
//!
//! A [`Campaign`] plays an ordered list of levels: winning loads the next
//! one, losing puts the current one back to its starting layout.

use crate::core::{Action, EngineConfig};
use crate::level::{parse_levels, LevelData, LevelError};

use super::session::{Game, TurnResult};

/// What a campaign action led to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CampaignStep {
    /// The level goes on.
    Turn(TurnResult),
    /// The level was won and level `index` is now loaded.
    Advanced { index: usize },
    /// The level was lost and has been restarted.
    Restarted,
    /// The last level was won.
    Completed,
}

/// An ordered set of levels played one after another.
#[derive(Clone, Debug)]
pub struct Campaign {
    levels: Vec<LevelData>,
    current: usize,
    completed: bool,
    game: Game,
}

impl Campaign {
    /// Start a campaign at the first level.
    ///
    /// Every level is validated up front so later advances cannot fail.
    pub fn new(config: EngineConfig, levels: Vec<LevelData>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::NoLevels);
        }
        for level in &levels {
            level.validate()?;
        }

        let mut game = Game::new(config);
        game.load_level(&levels[0])?;
        Ok(Self {
            levels,
            current: 0,
            completed: false,
            game,
        })
    }

    /// Parse a level file and start at its first level.
    pub fn from_text(config: EngineConfig, text: &str) -> Result<Self, LevelError> {
        Self::new(config, parse_levels(text)?)
    }

    /// Run an action and handle any win or loss.
    ///
    /// Once the campaign is completed every action is ignored.
    pub fn apply_action(&mut self, action: Action) -> Result<CampaignStep, LevelError> {
        if self.completed {
            return Ok(CampaignStep::Completed);
        }

        match self.game.apply_action(action) {
            TurnResult::Win => self.advance(),
            TurnResult::Lose => {
                self.game.restart();
                Ok(CampaignStep::Restarted)
            }
            other => Ok(CampaignStep::Turn(other)),
        }
    }

    fn advance(&mut self) -> Result<CampaignStep, LevelError> {
        let next = self.current + 1;
        if next >= self.levels.len() {
            self.completed = true;
            tracing::info!(levels = self.levels.len(), "campaign completed");
            return Ok(CampaignStep::Completed);
        }
        self.select(next)?;
        tracing::info!(index = next, level = %self.levels[next].name, "advanced to next level");
        Ok(CampaignStep::Advanced { index: next })
    }

    /// Jump to level `index`.
    pub fn select(&mut self, index: usize) -> Result<(), LevelError> {
        let level = self.levels.get(index).ok_or(LevelError::NoSuchLevel {
            index,
            count: self.levels.len(),
        })?;
        self.game.load_level(level)?;
        self.current = index;
        self.completed = false;
        Ok(())
    }

    /// Index of the level being played.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The level being played.
    #[must_use]
    pub fn current_level(&self) -> &LevelData {
        &self.levels[self.current]
    }

    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Mutable access for hosts that drive undo or drain events directly.
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Rows 0..3 are gameplay, rows 3..6 words overlaid on the same grid.
    const LEVELS: &str = "One\n3 x 3\nbf \n\n\n\nBIY\nFIX\n\
                          Two\n3 x 3\nb a\n\n\n\nBIY\nAIN\n";

    fn campaign() -> Campaign {
        Campaign::from_text(EngineConfig::default(), LEVELS).unwrap()
    }

    #[test]
    fn test_starts_at_first_level() {
        let campaign = campaign();
        assert_eq!(campaign.level_count(), 2);
        assert_eq!(campaign.current_index(), 0);
        assert_eq!(campaign.game().level_name(), Some("One"));
    }

    #[test]
    fn test_win_advances() {
        let mut campaign = campaign();
        let step = campaign.apply_action(Action::MoveRight).unwrap();

        assert_eq!(step, CampaignStep::Advanced { index: 1 });
        assert_eq!(campaign.game().level_name(), Some("Two"));
    }

    #[test]
    fn test_lose_restarts() {
        let mut campaign = campaign();
        campaign.select(1).unwrap();
        let initial = campaign.game().store().snapshot();

        assert_eq!(campaign.apply_action(Action::MoveRight).unwrap(), CampaignStep::Turn(TurnResult::Moved));
        assert_eq!(campaign.apply_action(Action::MoveRight).unwrap(), CampaignStep::Restarted);
        assert_eq!(campaign.game().store().snapshot(), initial);
        assert_eq!(campaign.current_index(), 1);
    }

    #[test]
    fn test_last_win_completes() {
        let mut campaign = Campaign::new(EngineConfig::default(), vec![campaign().current_level().clone()]).unwrap();

        assert_eq!(campaign.apply_action(Action::MoveRight).unwrap(), CampaignStep::Completed);
        assert!(campaign.is_completed());
        assert_eq!(campaign.apply_action(Action::MoveLeft).unwrap(), CampaignStep::Completed);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut campaign = campaign();
        assert_eq!(campaign.select(5), Err(LevelError::NoSuchLevel { index: 5, count: 2 }));
        assert_eq!(campaign.current_index(), 0);
    }

    #[test]
    fn test_empty_campaign() {
        assert_eq!(
            Campaign::new(EngineConfig::default(), Vec::new()).unwrap_err(),
            LevelError::NoLevels
        );
    }
}
