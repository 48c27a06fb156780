//! Turn-based character state machine.
//!
//! A character is either alive and free to move, alive but stunned for a
//! number of discrete steps, or dead. The primitive operations ([`die`],
//! [`get_stunned`], [`move_to`]) surface guard violations to their caller;
//! the composite [`move_and_handle_effect`] is the single operation solving
//! algorithms use and consumes those violations locally, so normal play never
//! observes a [`CharacterError`].
//!
//! [`die`]: Character::die
//! [`get_stunned`]: Character::get_stunned
//! [`move_to`]: Character::move_to
//! [`move_and_handle_effect`]: Character::move_and_handle_effect

use mazewalk_core::{CellCoord, CharacterError, EffectKind, StepResult, TileType};

/// Number of steps a character stays stunned after entering a slowing tile.
pub const SLOW_STUN_STEPS: u32 = 1;

/// Character navigating a level, mutated only through guarded operations.
#[derive(Clone, Debug)]
pub struct Character {
    position: CellCoord,
    alive: bool,
    stun_remaining: u32,
    path: Vec<CellCoord>,
}

impl Character {
    /// Creates a character standing on the level's start cell.
    #[must_use]
    pub fn at_start(start: CellCoord) -> Self {
        Self {
            position: start,
            alive: true,
            stun_remaining: 0,
            path: vec![start],
        }
    }

    /// Cell the character currently occupies.
    #[must_use]
    pub const fn position(&self) -> CellCoord {
        self.position
    }

    /// Whether the character is alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Whether a move attempt would currently be rejected by a stun.
    #[must_use]
    pub const fn is_stunned(&self) -> bool {
        self.stun_remaining > 0
    }

    /// Remaining stun duration in discrete move attempts.
    #[must_use]
    pub const fn stun_remaining(&self) -> u32 {
        self.stun_remaining
    }

    /// Append-only record of every cell visited or attempted, kept for
    /// replay and audit by the external store.
    #[must_use]
    pub fn path(&self) -> &[CellCoord] {
        &self.path
    }

    /// Ends the character's life.
    pub fn die(&mut self) -> Result<(), CharacterError> {
        if !self.alive {
            return Err(CharacterError::Dead);
        }
        self.alive = false;
        Ok(())
    }

    /// Revives a dead character.
    ///
    /// Separately gated from normal play; no solving algorithm calls this.
    pub fn resurrect(&mut self) -> Result<(), CharacterError> {
        if self.alive {
            return Err(CharacterError::AlreadyAlive);
        }
        self.alive = true;
        Ok(())
    }

    /// Stuns the character for `duration` additional move attempts.
    ///
    /// Durations accumulate; stunning an already-stunned character extends
    /// the stun rather than resetting it.
    pub fn get_stunned(&mut self, duration: u32) -> Result<(), CharacterError> {
        if !self.alive {
            return Err(CharacterError::Dead);
        }
        self.stun_remaining = self.stun_remaining.saturating_add(duration);
        Ok(())
    }

    /// Relocates the character and appends the new position to its path.
    ///
    /// Does not verify traversability or grid bounds; callers resolve the
    /// target tile first. Permitted only while alive and unstunned.
    pub fn move_to(&mut self, cell: CellCoord) -> Result<(), CharacterError> {
        self.try_relocate(cell)?;
        self.path.push(cell);
        Ok(())
    }

    /// Composite move used by the solving algorithms.
    ///
    /// A non-traversable tile leaves the character completely untouched.
    /// Otherwise the target cell is appended to the path before the move is
    /// attempted, so a rejected move still records the attempted cell. A
    /// stun rejection consumes one stun unit; a dead character ignores the
    /// request. On success the tile's effect is applied.
    pub fn move_and_handle_effect(&mut self, cell: CellCoord, tile: &TileType) -> StepResult {
        if !tile.traversable {
            return StepResult::Blocked;
        }

        self.path.push(cell);

        match self.try_relocate(cell) {
            Err(CharacterError::Stunned) => {
                self.stun_remaining -= 1;
                StepResult::Stunned
            }
            Err(_) => StepResult::Dead,
            Ok(()) => {
                match tile.effect {
                    EffectKind::Slow => {
                        self.stun_remaining = self.stun_remaining.saturating_add(SLOW_STUN_STEPS);
                    }
                    EffectKind::Kill => {
                        self.alive = false;
                    }
                    EffectKind::None | EffectKind::LevelFinish => {}
                }
                StepResult::Moved(tile.effect)
            }
        }
    }

    fn try_relocate(&mut self, cell: CellCoord) -> Result<(), CharacterError> {
        if !self.alive {
            return Err(CharacterError::Dead);
        }
        if self.stun_remaining > 0 {
            return Err(CharacterError::Stunned);
        }
        self.position = cell;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazewalk_core::TileCatalogue;

    fn tile(name: &str) -> TileType {
        TileCatalogue::standard()
            .iter()
            .find(|tile| tile.name == name)
            .cloned()
            .expect("standard catalogue carries the tile")
    }

    #[test]
    fn path_starts_at_the_start_cell() {
        let character = Character::at_start(CellCoord::new(0, 0));
        assert_eq!(character.path(), &[CellCoord::new(0, 0)]);
    }

    #[test]
    fn die_is_terminal() {
        let mut character = Character::at_start(CellCoord::new(0, 0));
        assert_eq!(character.die(), Ok(()));
        assert!(!character.is_alive());
        assert_eq!(character.die(), Err(CharacterError::Dead));
    }

    #[test]
    fn resurrect_is_gated_on_death() {
        let mut character = Character::at_start(CellCoord::new(0, 0));
        assert_eq!(character.resurrect(), Err(CharacterError::AlreadyAlive));
        character.die().expect("alive character dies");
        assert_eq!(character.resurrect(), Ok(()));
        assert!(character.is_alive());
    }

    #[test]
    fn stun_durations_accumulate() {
        let mut character = Character::at_start(CellCoord::new(0, 0));
        character.get_stunned(1).expect("alive character stuns");
        character.get_stunned(1).expect("alive character stuns");
        assert_eq!(character.stun_remaining(), 2);
    }

    #[test]
    fn stunning_a_dead_character_fails() {
        let mut character = Character::at_start(CellCoord::new(0, 0));
        character.die().expect("alive character dies");
        assert_eq!(character.get_stunned(1), Err(CharacterError::Dead));
    }

    #[test]
    fn move_is_rejected_while_stunned() {
        let mut character = Character::at_start(CellCoord::new(0, 0));
        character.get_stunned(1).expect("alive character stuns");
        assert_eq!(
            character.move_to(CellCoord::new(1, 0)),
            Err(CharacterError::Stunned)
        );
        assert_eq!(character.position(), CellCoord::new(0, 0));
    }

    #[test]
    fn composite_move_on_wall_changes_nothing() {
        let mut character = Character::at_start(CellCoord::new(0, 0));
        let result = character.move_and_handle_effect(CellCoord::new(1, 0), &tile("wall"));
        assert_eq!(result, StepResult::Blocked);
        assert_eq!(character.position(), CellCoord::new(0, 0));
        assert_eq!(character.path(), &[CellCoord::new(0, 0)]);
        assert_eq!(character.stun_remaining(), 0);
    }

    #[test]
    fn composite_move_records_intent_before_attempting() {
        let mut character = Character::at_start(CellCoord::new(0, 0));
        character.get_stunned(1).expect("alive character stuns");

        let result = character.move_and_handle_effect(CellCoord::new(1, 0), &tile("empty"));

        assert_eq!(result, StepResult::Stunned);
        assert_eq!(character.position(), CellCoord::new(0, 0));
        // The attempted cell lands in the path even though the move was
        // rejected, and one stun unit is consumed by the attempt.
        assert_eq!(
            character.path(),
            &[CellCoord::new(0, 0), CellCoord::new(1, 0)]
        );
        assert_eq!(character.stun_remaining(), 0);
    }

    #[test]
    fn composite_move_is_silent_for_a_dead_character() {
        let mut character = Character::at_start(CellCoord::new(0, 0));
        character.die().expect("alive character dies");

        let result = character.move_and_handle_effect(CellCoord::new(1, 0), &tile("empty"));

        assert_eq!(result, StepResult::Dead);
        assert_eq!(character.position(), CellCoord::new(0, 0));
    }

    #[test]
    fn entering_mud_stuns_for_one_step() {
        let mut character = Character::at_start(CellCoord::new(0, 0));

        let result = character.move_and_handle_effect(CellCoord::new(1, 0), &tile("mud"));

        assert_eq!(result, StepResult::Moved(EffectKind::Slow));
        assert_eq!(character.position(), CellCoord::new(1, 0));
        assert_eq!(character.stun_remaining(), 1);
    }

    #[test]
    fn entering_a_trap_kills() {
        let mut character = Character::at_start(CellCoord::new(0, 0));

        let result = character.move_and_handle_effect(CellCoord::new(1, 0), &tile("trap"));

        assert_eq!(result, StepResult::Moved(EffectKind::Kill));
        assert!(!character.is_alive());
        assert_eq!(character.position(), CellCoord::new(1, 0));
    }

    #[test]
    fn entering_the_arrival_reports_the_finish_effect() {
        let mut character = Character::at_start(CellCoord::new(0, 0));

        let result = character.move_and_handle_effect(CellCoord::new(1, 0), &tile("arrival"));

        assert_eq!(result, StepResult::Moved(EffectKind::LevelFinish));
        assert_eq!(
            character.path(),
            &[CellCoord::new(0, 0), CellCoord::new(1, 0)]
        );
    }
}
