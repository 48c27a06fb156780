#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Human-driven solving algorithm.
//!
//! Each step consumes at most one logical direction supplied by the external
//! driver, translates it into the adjacent target cell for the level's
//! topology, and applies the character's composite move. Steps outside the
//! grid bounds or into non-traversable tiles are quietly ignored; the run
//! ends when the character enters the arrival cell or dies.

use std::time::SystemTime;

use mazewalk_core::{
    CellCoord, Direction, EffectKind, GridError, HexDirection, RunRecord, SolveOutcome,
    SolvingAlgorithm, StepResult,
};
use mazewalk_level::{Character, Level};

/// Manual solver for square-grid levels.
#[derive(Debug)]
pub struct Manual {
    level: Level,
    character: Character,
    running: bool,
    outcome: Option<SolveOutcome>,
}

impl Manual {
    /// Creates a manual solver over the provided level and character.
    ///
    /// Levels without a unique start and arrival cell are rejected before the
    /// algorithm exists; the driver reports [`GridError::MissingStartOrEnd`]
    /// as a configuration error.
    pub fn new(level: Level, character: Character) -> Result<Self, GridError> {
        let _ = level.start_position()?;
        let _ = level.arrival_position()?;
        Ok(Self {
            level,
            character,
            running: true,
            outcome: None,
        })
    }

    /// Character driven by this solver.
    #[must_use]
    pub fn character(&self) -> &Character {
        &self.character
    }

    /// Level the solver operates on.
    #[must_use]
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Releases the level and character once the playthrough is discarded.
    #[must_use]
    pub fn into_parts(self) -> (Level, Character) {
        (self.level, self.character)
    }

    /// Record of the finished playthrough, or `None` while still running.
    #[must_use]
    pub fn run_record(&self) -> Option<RunRecord> {
        if self.running {
            return None;
        }
        Some(RunRecord {
            algorithm: "manual".to_owned(),
            path: self.character.path().to_vec(),
            ended_at: SystemTime::now(),
        })
    }

    fn advance_to(&mut self, target: CellCoord) {
        let Ok(tile) = self.level.tile_at(target) else {
            return;
        };

        if let StepResult::Moved(EffectKind::LevelFinish) =
            self.character.move_and_handle_effect(target, tile)
        {
            self.running = false;
            self.outcome = Some(SolveOutcome::Finished);
        }

        if !self.character.is_alive() {
            self.running = false;
            let _ = self.outcome.get_or_insert(SolveOutcome::Died);
        }
    }
}

impl SolvingAlgorithm for Manual {
    type Input = Direction;

    fn name(&self) -> &'static str {
        "manual"
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn outcome(&self) -> Option<SolveOutcome> {
        self.outcome
    }

    fn run_one_step(&mut self, input: Option<Direction>) {
        if !self.running {
            return;
        }
        let Some(direction) = input else {
            return;
        };
        let Some(target) = direction.offset_within(
            self.character.position(),
            self.level.columns(),
            self.level.rows(),
        ) else {
            return;
        };
        self.advance_to(target);
    }
}

/// Manual solver for hexagonal-grid levels.
///
/// Identical to [`Manual`] apart from the six-direction input set and its
/// offset-coordinate deltas.
#[derive(Debug)]
pub struct HexManual {
    inner: Manual,
}

impl HexManual {
    /// Creates a hexagonal manual solver over the provided level and character.
    pub fn new(level: Level, character: Character) -> Result<Self, GridError> {
        Ok(Self {
            inner: Manual::new(level, character)?,
        })
    }

    /// Character driven by this solver.
    #[must_use]
    pub fn character(&self) -> &Character {
        self.inner.character()
    }

    /// Releases the level and character once the playthrough is discarded.
    #[must_use]
    pub fn into_parts(self) -> (Level, Character) {
        self.inner.into_parts()
    }

    /// Record of the finished playthrough, or `None` while still running.
    #[must_use]
    pub fn run_record(&self) -> Option<RunRecord> {
        self.inner.run_record().map(|record| RunRecord {
            algorithm: "manual-hex".to_owned(),
            ..record
        })
    }
}

impl SolvingAlgorithm for HexManual {
    type Input = HexDirection;

    fn name(&self) -> &'static str {
        "manual-hex"
    }

    fn is_running(&self) -> bool {
        self.inner.running
    }

    fn outcome(&self) -> Option<SolveOutcome> {
        self.inner.outcome
    }

    fn run_one_step(&mut self, input: Option<HexDirection>) {
        if !self.inner.running {
            return;
        }
        let Some(direction) = input else {
            return;
        };
        let Some(target) = direction.offset_within(
            self.inner.character.position(),
            self.inner.level.columns(),
            self.inner.level.rows(),
        ) else {
            return;
        };
        self.inner.advance_to(target);
    }
}
