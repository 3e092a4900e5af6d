//! The turn driver.
//!
//! [`Game`] owns every piece of per-level state and runs each action to
//! completion before returning:
//!
//! ```text
//! snapshot → move YOU entities → (nothing moved? discard snapshot, NoOp)
//!          → re-derive rules → apply transformations → check conditions
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::conditions::{ConditionEvaluator, Outcome};
use crate::core::{Action, Direction, EngineConfig, EntityId, EntityStore, Name, Position, RuleWord, WordRole};
use crate::level::{LevelData, LevelError, BLANK};
use crate::movement::{Bounds, MoveContext, MovementResolver};
use crate::rules::{ActiveRules, RuleEngine, Transformations};
use crate::undo::UndoManager;

use super::events::GameEvent;

/// What an action did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnResult {
    /// Undo or restart ran; play goes on.
    Continue,
    /// At least one entity moved and the level goes on.
    Moved,
    /// Nothing moved. State and history are unchanged.
    NoOp,
    /// The move won the level.
    Win,
    /// The move left no YOU entity.
    Lose,
}

impl TurnResult {
    /// Check whether the level ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, TurnResult::Win | TurnResult::Lose)
    }
}

/// One entity as a renderer sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderTile {
    pub entity: EntityId,
    pub position: Position,
    pub name: String,
    pub is_word: bool,
}

/// A single level in play.
#[derive(Clone, Debug)]
pub struct Game {
    config: EngineConfig,
    store: EntityStore,
    rules: RuleEngine,
    undo: UndoManager,
    bounds: Bounds,
    level_name: Option<String>,
    events: Vec<GameEvent>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Game {
    /// Create a game with no level loaded.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            rules: RuleEngine::new(config.operator_word.clone()),
            undo: UndoManager::new(config.history_limit),
            config,
            store: EntityStore::new(),
            bounds: Bounds::new(0, 0),
            level_name: None,
            events: Vec::new(),
        }
    }

    // === Level loading ===

    /// Replace the board with `level`.
    ///
    /// Cells are filled row by row; in each cell the gameplay tile is
    /// created before the word tile. Characters missing from the blueprint
    /// table are skipped. The rules are derived and transformations applied
    /// before the initial snapshot is taken, and the undo history starts
    /// empty.
    pub fn load_level(&mut self, level: &LevelData) -> Result<(), LevelError> {
        level.validate()?;

        self.store = EntityStore::new();
        for (pos, gameplay, rule) in level.cells() {
            self.spawn(gameplay, pos);
            self.spawn(rule, pos);
        }

        self.rules.update(&self.store);
        self.rules.apply_transformations(&mut self.store);

        self.bounds = Bounds::new(level.width as i32, level.height as i32);
        self.undo.reset_level(self.store.snapshot());
        self.level_name = Some(level.name.clone());
        self.events.push(GameEvent::LevelLoaded {
            name: level.name.clone(),
        });

        tracing::info!(
            level = %level.name,
            width = level.width,
            height = level.height,
            entities = self.store.len(),
            "level loaded"
        );
        Ok(())
    }

    fn spawn(&mut self, c: char, pos: Position) {
        if c == BLANK {
            return;
        }
        let Some(blueprint) = self.config.blueprints.get(c) else {
            tracing::warn!(character = %c, %pos, "unknown level character, skipping");
            return;
        };

        let id = self.store.create_entity();
        self.store.add_component(id, pos);
        self.store.add_component(id, Name::new(blueprint.name.as_str()));
        if blueprint.is_word {
            let role = WordRole::classify(&blueprint.name, &self.config.operator_word);
            self.store.add_component(id, RuleWord::new(blueprint.name.as_str(), role));
        }
    }

    // === Actions ===

    /// Run one action to completion.
    pub fn apply_action(&mut self, action: Action) -> TurnResult {
        match action {
            Action::Undo => {
                self.undo();
                TurnResult::Continue
            }
            Action::Restart => {
                self.restart();
                TurnResult::Continue
            }
            Action::MoveUp => self.step(Direction::Up),
            Action::MoveDown => self.step(Direction::Down),
            Action::MoveLeft => self.step(Direction::Left),
            Action::MoveRight => self.step(Direction::Right),
        }
    }

    fn step(&mut self, direction: Direction) -> TurnResult {
        let movers: Vec<EntityId> = self.you_entities().into_iter().collect();
        if movers.is_empty() {
            return TurnResult::NoOp;
        }

        self.undo.begin_turn(&self.store);
        let ctx = MoveContext::new(self.rules.active_rules(), &self.config, self.bounds);
        let report = MovementResolver::new(ctx).resolve_turn(&mut self.store, &movers, direction);

        if !report.any_moved() {
            self.undo.commit_or_discard(false);
            tracing::trace!(?direction, "nothing moved");
            return TurnResult::NoOp;
        }
        self.undo.commit_or_discard(true);

        for (entity, position) in report.destroyed {
            self.events.push(GameEvent::EntityDestroyed { entity, position });
        }

        let prev_you = self.you_entities();
        let prev_win = self.win_entities();

        self.rules.update(&self.store);
        self.rules.apply_transformations(&mut self.store);

        for entity in self.you_entities().difference(&prev_you) {
            if let Some(position) = self.store.position(*entity) {
                self.events.push(GameEvent::BecameYou { entity: *entity, position });
            }
        }
        for entity in self.win_entities().difference(&prev_win) {
            if let Some(position) = self.store.position(*entity) {
                self.events.push(GameEvent::BecameWin { entity: *entity, position });
            }
        }

        let conditions = ConditionEvaluator::new(&self.rules).check_conditions(&mut self.store);
        for (entity, position) in conditions.destroyed {
            self.events.push(GameEvent::EntityDestroyed { entity, position });
        }

        match conditions.outcome {
            Outcome::Win => {
                tracing::info!(level = ?self.level_name, "level won");
                self.events.push(GameEvent::Victory);
                TurnResult::Win
            }
            Outcome::Lose => {
                tracing::info!(level = ?self.level_name, "level lost");
                self.events.push(GameEvent::Defeat);
                TurnResult::Lose
            }
            Outcome::Continue => TurnResult::Moved,
        }
    }

    /// Step back one committed turn. Returns false if there was none.
    ///
    /// The rules are re-derived from the restored board. Transformations
    /// are not re-applied; the snapshot already holds the names as they
    /// were.
    pub fn undo(&mut self) -> bool {
        let undone = self.undo.undo(&mut self.store, &mut self.rules);
        tracing::debug!(undone, depth = self.undo.depth(), "undo");
        undone
    }

    /// Return to the board as it was when the level loaded.
    pub fn restart(&mut self) -> bool {
        let restarted = self.undo.restart(&mut self.store, &mut self.rules);
        tracing::debug!(restarted, "restart");
        restarted
    }

    // === Queries ===

    /// The active name → properties table.
    #[must_use]
    pub fn active_rules(&self) -> &ActiveRules {
        self.rules.active_rules()
    }

    /// The active name → name table.
    #[must_use]
    pub fn transformations(&self) -> &Transformations {
        self.rules.transformations()
    }

    #[must_use]
    pub fn rules(&self) -> &RuleEngine {
        &self.rules
    }

    #[must_use]
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Name of the loaded level.
    #[must_use]
    pub fn level_name(&self) -> Option<&str> {
        self.level_name.as_deref()
    }

    /// Number of turns that can be undone.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo.depth()
    }

    /// Gameplay entities that are currently YOU.
    #[must_use]
    pub fn you_entities(&self) -> BTreeSet<EntityId> {
        ConditionEvaluator::new(&self.rules).you_entities(&self.store)
    }

    /// Gameplay entities that are currently WIN.
    #[must_use]
    pub fn win_entities(&self) -> BTreeSet<EntityId> {
        ConditionEvaluator::new(&self.rules).win_entities(&self.store)
    }

    /// Every positioned entity, in ascending ID order.
    #[must_use]
    pub fn snapshot_for_render(&self) -> Vec<RenderTile> {
        self.store
            .with::<Position>()
            .map(|(entity, position)| {
                let word = self.store.word(entity);
                let name = match (self.store.name(entity), word) {
                    (Some(name), _) => name.as_str().to_string(),
                    (None, Some(word)) => word.word().to_string(),
                    (None, None) => String::new(),
                };
                RenderTile {
                    entity,
                    position: *position,
                    name,
                    is_word: word.is_some(),
                }
            })
            .collect()
    }

    /// Take every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
