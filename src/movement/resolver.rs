//! Push-chain movement resolution.
//!
//! ## Algorithm
//!
//! Moving an entity one step means first *clearing* the target cell:
//!
//! 1. A cell off the grid cannot be cleared.
//! 2. If any occupant blocks (hard blocker, or STOP without PUSH), the
//!    cell cannot be cleared.
//! 3. Occupants that are YOU and have not moved yet this turn step
//!    forward under their own agency; if any cannot, the cell cannot be
//!    cleared.
//! 4. Pushable occupants (word tiles, PUSH names) step forward the same
//!    way, recursively clearing the cell beyond them.
//!
//! Once the target is cleared the mover relocates and the destination is
//! checked for Sink.
//!
//! ## Termination
//!
//! There is no fixed chain depth. Recursion only ever proceeds one cell
//! further along a straight line, so the grid edge is what ends a chain:
//! a push that would leave the grid blocks the whole line. The cells on
//! the current line are also tracked, and re-entering one refuses the
//! move; straight pushes never trigger it, it only backstops the bound.
//!
//! ## All or nothing
//!
//! Each top-level move resolves against a scratch copy of the store
//! (cheap, thanks to persistent maps) that replaces the real store only
//! if the whole chain succeeds. A failed move leaves no partial pushes.

use rustc_hash::FxHashSet;

use crate::core::{Direction, EntityId, EntityStore, Position};

use super::context::MoveContext;

/// Outcome of resolving all movers for one turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveReport {
    /// Every entity that changed cell, in the order it moved.
    pub moved: Vec<EntityId>,
    /// Entities destroyed by Sink, with the cell they were destroyed in.
    pub destroyed: Vec<(EntityId, Position)>,
}

impl MoveReport {
    /// Check whether anything moved.
    #[must_use]
    pub fn any_moved(&self) -> bool {
        !self.moved.is_empty()
    }
}

/// Scratch bookkeeping for one top-level move.
#[derive(Default)]
struct Attempt {
    /// Cells on the push line currently being resolved.
    line: FxHashSet<Position>,
    /// Cells already cleared during this attempt.
    cleared: FxHashSet<Position>,
    moved: Vec<EntityId>,
    destroyed: Vec<(EntityId, Position)>,
}

/// Resolves movement for one turn against a fixed set of rules.
pub struct MovementResolver<'a> {
    ctx: MoveContext<'a>,
    moved: FxHashSet<EntityId>,
    report: MoveReport,
}

impl<'a> MovementResolver<'a> {
    /// Create a resolver for a single turn.
    #[must_use]
    pub fn new(ctx: MoveContext<'a>) -> Self {
        Self {
            ctx,
            moved: FxHashSet::default(),
            report: MoveReport::default(),
        }
    }

    /// Move every mover one step in `direction`.
    ///
    /// Movers are attempted in ascending ID order. A mover already carried
    /// along by an earlier one (a YOU entity standing in front of another)
    /// does not move a second time.
    pub fn resolve_turn(mut self, store: &mut EntityStore, movers: &[EntityId], direction: Direction) -> MoveReport {
        let mut order = movers.to_vec();
        order.sort_unstable();
        order.dedup();

        for id in order {
            if self.moved.contains(&id) || !store.contains(id) {
                continue;
            }
            self.try_move(store, id, direction);
        }
        self.report
    }

    /// Try to move one entity a single step.
    ///
    /// Returns false, leaving the store untouched, if the move is blocked.
    pub fn try_move(&mut self, store: &mut EntityStore, mover: EntityId, direction: Direction) -> bool {
        let mut scratch = store.clone();
        let mut attempt = Attempt::default();

        if !self.step(&mut scratch, mover, direction, &mut attempt) {
            tracing::trace!(entity = %mover, ?direction, "move blocked");
            return false;
        }

        *store = scratch;
        self.moved.extend(attempt.moved.iter().copied());
        self.report.moved.extend(attempt.moved);
        self.report.destroyed.extend(attempt.destroyed);
        true
    }

    /// Entities moved so far this turn.
    #[must_use]
    pub fn has_moved(&self, id: EntityId) -> bool {
        self.moved.contains(&id)
    }

    fn step(&self, store: &mut EntityStore, id: EntityId, direction: Direction, attempt: &mut Attempt) -> bool {
        let Some(from) = store.position(id) else {
            return false;
        };
        let target = from.step(direction);

        if !self.clear_cell(store, target, direction, attempt) {
            return false;
        }

        store.set_position(id, target);
        attempt.moved.push(id);
        self.check_and_apply_sink(store, target, id, attempt);
        true
    }

    fn clear_cell(&self, store: &mut EntityStore, cell: Position, direction: Direction, attempt: &mut Attempt) -> bool {
        if !self.ctx.bounds().contains(cell) {
            return false;
        }
        if attempt.cleared.contains(&cell) {
            return true;
        }
        if !attempt.line.insert(cell) {
            tracing::trace!(%cell, "push line re-entered a cell");
            return false;
        }

        let ok = self.clear_occupants(store, cell, direction, attempt);

        attempt.line.remove(&cell);
        if ok {
            attempt.cleared.insert(cell);
        }
        ok
    }

    fn clear_occupants(&self, store: &mut EntityStore, cell: Position, direction: Direction, attempt: &mut Attempt) -> bool {
        let occupants = store.entities_at(cell);

        if occupants.iter().any(|&id| self.ctx.blocks(store, id)) {
            return false;
        }

        // YOU entities walk out under their own agency.
        for &id in &occupants {
            if !self.still_at(store, id, cell) || self.moved_this_turn(id, attempt) {
                continue;
            }
            if self.ctx.is_you(store, id) && !self.step(store, id, direction, attempt) {
                return false;
            }
        }

        for &id in &occupants {
            if !self.still_at(store, id, cell) {
                continue;
            }
            if self.ctx.is_pushable(store, id) && !self.step(store, id, direction, attempt) {
                return false;
            }
        }

        true
    }

    fn still_at(&self, store: &EntityStore, id: EntityId, cell: Position) -> bool {
        store.position(id) == Some(cell)
    }

    fn moved_this_turn(&self, id: EntityId, attempt: &Attempt) -> bool {
        self.moved.contains(&id) || attempt.moved.contains(&id)
    }

    /// Resolve Sink at `cell` after `mover` arrived there.
    ///
    /// Needs at least two occupants in the cell, word tiles included, and a
    /// SINK gameplay entity among them. Every gameplay occupant is destroyed,
    /// except the mover when the mover is itself the sinking entity. Word
    /// tiles are never destroyed.
    fn check_and_apply_sink(&self, store: &mut EntityStore, cell: Position, mover: EntityId, attempt: &mut Attempt) {
        let occupants = store.entities_at(cell);
        if occupants.len() < 2 {
            return;
        }
        if !occupants.iter().any(|&id| self.ctx.is_sink(store, id)) {
            return;
        }

        let mover_sinks = self.ctx.is_sink(store, mover);
        let victims: Vec<EntityId> = occupants
            .into_iter()
            .filter(|&id| !store.is_word(id))
            .filter(|&id| !(id == mover && mover_sinks))
            .collect();

        for id in victims {
            if store.destroy_entity(id) {
                tracing::debug!(entity = %id, %cell, "sunk");
                attempt.destroyed.push((id, cell));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineConfig, Name, Properties, RuleWord, WordRole};
    use crate::movement::Bounds;
    use crate::rules::ActiveRules;

    struct Board {
        store: EntityStore,
        rules: ActiveRules,
        config: EngineConfig,
    }

    impl Board {
        fn new() -> Self {
            Self {
                store: EntityStore::new(),
                rules: ActiveRules::default(),
                config: EngineConfig::default(),
            }
        }

        fn thing(&mut self, name: &str, x: i32, y: i32) -> EntityId {
            let id = self.store.create_entity();
            self.store.add_component(id, Position::new(x, y));
            self.store.add_component(id, Name::new(name));
            id
        }

        fn word(&mut self, word: &str, x: i32, y: i32) -> EntityId {
            let id = self.thing(word, x, y);
            self.store.add_component(id, RuleWord::new(word, WordRole::classify(word, "Is")));
            id
        }

        fn rule(&mut self, name: &str, props: Properties) {
            *self.rules.entry(name.to_string()).or_default() |= props;
        }

        fn step(&mut self, movers: &[EntityId], direction: Direction) -> MoveReport {
            let ctx = MoveContext::new(&self.rules, &self.config, Bounds::new(10, 10));
            MovementResolver::new(ctx).resolve_turn(&mut self.store, movers, direction)
        }

        fn at(&self, id: EntityId) -> Option<Position> {
            self.store.position(id)
        }
    }

    #[test]
    fn test_move_into_empty_cell() {
        let mut b = Board::new();
        let blue = b.thing("BigBlue", 1, 1);
        b.rule("BigBlue", Properties::YOU);

        let report = b.step(&[blue], Direction::Right);

        assert!(report.any_moved());
        assert_eq!(b.at(blue), Some(Position::new(2, 1)));
    }

    #[test]
    fn test_edge_blocks() {
        let mut b = Board::new();
        let blue = b.thing("BigBlue", 0, 0);
        b.rule("BigBlue", Properties::YOU);

        let report = b.step(&[blue], Direction::Up);

        assert!(!report.any_moved());
        assert_eq!(b.at(blue), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_push_chain_of_three() {
        let mut b = Board::new();
        let blue = b.thing("BigBlue", 0, 0);
        let rocks = [b.thing("Rock", 1, 0), b.thing("Rock", 2, 0), b.thing("Rock", 3, 0)];
        b.rule("BigBlue", Properties::YOU);
        b.rule("Rock", Properties::PUSH);

        let report = b.step(&[blue], Direction::Right);

        assert!(report.any_moved());
        assert_eq!(b.at(blue), Some(Position::new(1, 0)));
        assert_eq!(b.at(rocks[0]), Some(Position::new(2, 0)));
        assert_eq!(b.at(rocks[1]), Some(Position::new(3, 0)));
        assert_eq!(b.at(rocks[2]), Some(Position::new(4, 0)));
    }

    #[test]
    fn test_blocked_chain_moves_nothing() {
        let mut b = Board::new();
        let blue = b.thing("BigBlue", 0, 0);
        let rocks = [b.thing("Rock", 1, 0), b.thing("Rock", 2, 0), b.thing("Rock", 3, 0)];
        let wall = b.thing("Wall", 4, 0);
        b.rule("BigBlue", Properties::YOU);
        b.rule("Rock", Properties::PUSH);
        b.rule("Wall", Properties::STOP);
        let before = b.store.snapshot();

        let report = b.step(&[blue], Direction::Right);

        assert!(!report.any_moved());
        assert_eq!(b.store.snapshot(), before);
        assert_eq!(b.at(rocks[0]), Some(Position::new(1, 0)));
        assert_eq!(b.at(wall), Some(Position::new(4, 0)));
    }

    #[test]
    fn test_push_into_edge_fails() {
        let mut b = Board::new();
        let blue = b.thing("BigBlue", 8, 0);
        let rock = b.thing("Rock", 9, 0);
        b.rule("BigBlue", Properties::YOU);
        b.rule("Rock", Properties::PUSH);

        assert!(!b.step(&[blue], Direction::Right).any_moved());
        assert_eq!(b.at(rock), Some(Position::new(9, 0)));
    }

    #[test]
    fn test_full_row_into_edge_is_blocked() {
        let mut b = Board::new();
        let blue = b.thing("BigBlue", 0, 4);
        let line: Vec<EntityId> = (1..10)
            .map(|x| if x % 2 == 0 { b.word("Rock", x, 4) } else { b.thing("Rock", x, 4) })
            .collect();
        b.rule("BigBlue", Properties::YOU);
        b.rule("Rock", Properties::PUSH);
        let before = b.store.snapshot();

        let report = b.step(&[blue], Direction::Right);

        assert!(!report.any_moved());
        assert_eq!(b.store.snapshot(), before);
        assert_eq!(b.at(line[8]), Some(Position::new(9, 4)));

        // One cell of room lets the whole line through.
        b.store.destroy_entity(line[8]);
        let report = b.step(&[blue], Direction::Right);
        assert_eq!(report.moved.len(), 9);
        assert_eq!(b.at(line[7]), Some(Position::new(9, 4)));
    }

    #[test]
    fn test_words_always_push() {
        let mut b = Board::new();
        let blue = b.thing("BigBlue", 0, 0);
        let word = b.word("Wall", 1, 0);
        b.rule("BigBlue", Properties::YOU);

        assert!(b.step(&[blue], Direction::Right).any_moved());
        assert_eq!(b.at(word), Some(Position::new(2, 0)));
    }

    #[test]
    fn test_non_pushable_overlap_is_allowed() {
        let mut b = Board::new();
        let blue = b.thing("BigBlue", 0, 0);
        let grass = b.thing("Grass", 1, 0);
        b.rule("BigBlue", Properties::YOU);

        assert!(b.step(&[blue], Direction::Right).any_moved());
        assert_eq!(b.at(blue), b.at(grass));
    }

    #[test]
    fn test_multiple_pushables_share_a_cell() {
        let mut b = Board::new();
        let blue = b.thing("BigBlue", 0, 0);
        let rock = b.thing("Rock", 1, 0);
        let word = b.word("Is", 1, 0);
        b.rule("BigBlue", Properties::YOU);
        b.rule("Rock", Properties::PUSH);

        assert!(b.step(&[blue], Direction::Right).any_moved());
        assert_eq!(b.at(rock), Some(Position::new(2, 0)));
        assert_eq!(b.at(word), Some(Position::new(2, 0)));
    }

    #[test]
    fn test_you_in_front_moves_itself_once() {
        let mut b = Board::new();
        let back = b.thing("BigBlue", 0, 0);
        let front = b.thing("BigBlue", 1, 0);
        b.rule("BigBlue", Properties::YOU);

        let report = b.step(&[back, front], Direction::Right);

        assert_eq!(b.at(back), Some(Position::new(1, 0)));
        assert_eq!(b.at(front), Some(Position::new(2, 0)));
        assert_eq!(report.moved, vec![front, back]);
    }

    #[test]
    fn test_blocked_you_in_front_blocks_mover() {
        let mut b = Board::new();
        let back = b.thing("BigBlue", 0, 0);
        let front = b.thing("BigBlue", 1, 0);
        b.thing("Wall", 2, 0);
        b.rule("BigBlue", Properties::YOU);
        b.rule("Wall", Properties::STOP);

        assert!(!b.step(&[back, front], Direction::Right).any_moved());
        assert_eq!(b.at(back), Some(Position::new(0, 0)));
        assert_eq!(b.at(front), Some(Position::new(1, 0)));
    }

    #[test]
    fn test_hedge_blocks_by_default() {
        let mut b = Board::new();
        let blue = b.thing("BigBlue", 0, 0);
        b.thing("Hedge", 1, 0);
        b.rule("BigBlue", Properties::YOU);

        assert!(!b.step(&[blue], Direction::Right).any_moved());

        b.config = EngineConfig::default().without_hard_blockers();
        assert!(b.step(&[blue], Direction::Right).any_moved());
    }

    #[test]
    fn test_sink_destroys_mover_and_sink() {
        let mut b = Board::new();
        let blue = b.thing("BigBlue", 0, 0);
        let rock = b.thing("Rock", 1, 0);
        let water = b.thing("Water", 2, 0);
        b.rule("BigBlue", Properties::YOU);
        b.rule("Rock", Properties::PUSH);
        b.rule("Water", Properties::SINK);

        let report = b.step(&[blue], Direction::Right);

        assert!(report.any_moved());
        assert!(!b.store.contains(rock));
        assert!(!b.store.contains(water));
        assert!(b.store.contains(blue));
        assert_eq!(
            report.destroyed,
            vec![(rock, Position::new(2, 0)), (water, Position::new(2, 0))]
        );
    }

    #[test]
    fn test_sinking_mover_survives() {
        let mut b = Board::new();
        let water = b.thing("Water", 0, 0);
        let rock = b.thing("Rock", 1, 0);
        b.rule("Water", Properties::YOU | Properties::SINK);

        let report = b.step(&[water], Direction::Right);

        assert!(report.any_moved());
        assert!(b.store.contains(water));
        assert!(!b.store.contains(rock));
    }

    #[test]
    fn test_sink_spares_words() {
        let mut b = Board::new();
        let blue = b.thing("BigBlue", 0, 0);
        let word = b.word("Rock", 1, 0);
        let water = b.thing("Water", 2, 0);
        b.rule("BigBlue", Properties::YOU);
        b.rule("Water", Properties::SINK);

        let report = b.step(&[blue], Direction::Right);

        assert!(report.any_moved());
        assert!(b.store.contains(word));
        assert!(!b.store.contains(water));
        assert_eq!(b.at(word), Some(Position::new(2, 0)));
        assert_eq!(report.destroyed, vec![(water, Position::new(2, 0))]);
    }

    #[test]
    fn test_overlap_without_sink_destroys_nothing() {
        let mut b = Board::new();
        let blue = b.thing("BigBlue", 0, 0);
        let word = b.word("Rock", 1, 0);
        let rock = b.thing("Rock", 2, 0);
        b.rule("BigBlue", Properties::YOU);

        assert!(b.step(&[blue], Direction::Right).any_moved());
        assert!(b.store.contains(word));
        assert!(b.store.contains(rock));
    }

    #[test]
    fn test_you_walks_into_sink() {
        let mut b = Board::new();
        let blue = b.thing("BigBlue", 0, 0);
        let water = b.thing("Water", 1, 0);
        b.rule("BigBlue", Properties::YOU);
        b.rule("Water", Properties::SINK);

        let report = b.step(&[blue], Direction::Right);

        assert!(report.any_moved());
        assert!(!b.store.contains(blue));
        assert!(!b.store.contains(water));
    }

    #[test]
    fn test_stop_push_is_pushed() {
        let mut b = Board::new();
        let blue = b.thing("BigBlue", 0, 0);
        let rock = b.thing("Rock", 1, 0);
        b.rule("BigBlue", Properties::YOU);
        b.rule("Rock", Properties::STOP | Properties::PUSH);

        assert!(b.step(&[blue], Direction::Right).any_moved());
        assert_eq!(b.at(rock), Some(Position::new(2, 0)));
    }
}
