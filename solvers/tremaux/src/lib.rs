#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Trémaux wall-marking exploration.
//!
//! The solver walks the character cell by cell, keeping a private mark
//! overlay beside the level instead of writing into its tiles. Fresh cells
//! are preferred over already-visited ones, lethal tiles are treated like
//! walls and never entered, exits confirmed to lead nowhere are sealed off
//! as dead ends, and the walk ends when the character reaches the arrival
//! cell or runs out of unsealed exits.

use std::time::SystemTime;

use mazewalk_core::{
    CellCoord, Direction, EffectKind, GridError, RunRecord, SolveOutcome, SolvingAlgorithm,
    StepResult, TileRole,
};
use mazewalk_level::{Character, Level};

/// Exploration state of one cell, tracked outside the level itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mark {
    /// Never entered.
    Unvisited,
    /// Entered at least once.
    Visited,
    /// Confirmed to lead nowhere new; never entered again.
    DeadEnd,
}

/// Selection rank of a candidate neighbor, lower is better.
fn priority(role: TileRole, effect: EffectKind, mark: Mark) -> u8 {
    if role == TileRole::Arrival {
        return 0;
    }
    if mark == Mark::Visited {
        return 3;
    }
    if effect == EffectKind::Slow {
        return 2;
    }
    1
}

/// Trémaux solver for square-grid levels.
#[derive(Debug)]
pub struct Tremaux {
    level: Level,
    character: Character,
    marks: Vec<Mark>,
    running: bool,
    outcome: Option<SolveOutcome>,
}

impl Tremaux {
    /// Creates a Trémaux solver over the provided level and character.
    ///
    /// Levels without a unique start and arrival cell are rejected before the
    /// walk exists.
    pub fn new(level: Level, character: Character) -> Result<Self, GridError> {
        let _ = level.start_position()?;
        let _ = level.arrival_position()?;

        let cell_count_u64 = u64::from(level.columns()) * u64::from(level.rows());
        let cell_count = usize::try_from(cell_count_u64).unwrap_or(0);

        let mut solver = Self {
            marks: vec![Mark::Unvisited; cell_count],
            running: true,
            outcome: None,
            level,
            character,
        };
        solver.mark(solver.character.position(), Mark::Visited);
        Ok(solver)
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

    /// Exploration mark currently recorded for a cell, or `None` when the
    /// cell lies outside the grid.
    #[must_use]
    pub fn mark_at(&self, cell: CellCoord) -> Option<Mark> {
        if cell.column() < self.level.columns() && cell.row() < self.level.rows() {
            Some(self.marks[self.cell_index(cell)])
        } else {
            None
        }
    }

    /// Runs steps until the walk terminates.
    pub fn run_to_completion(&mut self) {
        while self.running {
            self.run_one_step(None);
        }
    }

    /// Releases the level and character once the playthrough is discarded.
    #[must_use]
    pub fn into_parts(self) -> (Level, Character) {
        (self.level, self.character)
    }

    /// Record of the finished walk, or `None` while still running.
    #[must_use]
    pub fn run_record(&self) -> Option<RunRecord> {
        if self.running {
            return None;
        }
        Some(RunRecord {
            algorithm: "tremaux".to_owned(),
            path: self.character.path().to_vec(),
            ended_at: SystemTime::now(),
        })
    }

    fn mark(&mut self, cell: CellCoord, mark: Mark) {
        let index = self.cell_index(cell);
        self.marks[index] = mark;
    }

    fn cell_index(&self, cell: CellCoord) -> usize {
        let width = usize::try_from(self.level.columns()).unwrap_or(0);
        let row = usize::try_from(cell.row()).unwrap_or(0);
        let column = usize::try_from(cell.column()).unwrap_or(0);
        row * width + column
    }

    fn candidates(&self) -> Vec<(CellCoord, u8)> {
        let position = self.character.position();
        let mut found = Vec::with_capacity(Direction::ALL.len());
        for direction in Direction::ALL {
            let Some(neighbor) =
                direction.offset_within(position, self.level.columns(), self.level.rows())
            else {
                continue;
            };
            let Ok(tile) = self.level.tile_at(neighbor) else {
                continue;
            };
            if !tile.traversable || tile.effect == EffectKind::Kill {
                continue;
            }
            let mark = self.marks[self.cell_index(neighbor)];
            if mark == Mark::DeadEnd {
                continue;
            }
            found.push((neighbor, priority(tile.role, tile.effect, mark)));
        }
        found
    }
}

impl SolvingAlgorithm for Tremaux {
    type Input = ();

    fn name(&self) -> &'static str {
        "tremaux"
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn outcome(&self) -> Option<SolveOutcome> {
        self.outcome
    }

    fn run_one_step(&mut self, _input: Option<()>) {
        if !self.running {
            return;
        }

        let candidates = self.candidates();
        let Some(&(target, best)) = candidates
            .iter()
            .min_by_key(|(_, rank)| *rank)
        else {
            self.running = false;
            self.outcome = Some(SolveOutcome::NoSolutionFound);
            return;
        };

        // A corridor with one unsealed exit, or a junction where every exit
        // was already visited, will never offer anything new on a return
        // visit. Sealing the current cell keeps the walk from circling.
        if candidates.len() == 1 || best == 3 {
            let position = self.character.position();
            self.mark(position, Mark::DeadEnd);
        }

        let Ok(tile) = self.level.tile_at(target) else {
            self.running = false;
            self.outcome = Some(SolveOutcome::NoSolutionFound);
            return;
        };
        match self.character.move_and_handle_effect(target, tile) {
            StepResult::Moved(EffectKind::LevelFinish) => {
                self.running = false;
                self.outcome = Some(SolveOutcome::Finished);
            }
            StepResult::Moved(_) => {
                if self.mark_at(target) == Some(Mark::Unvisited) {
                    self.mark(target, Mark::Visited);
                }
            }
            StepResult::Stunned | StepResult::Blocked | StepResult::Dead => {}
        }

        if !self.character.is_alive() {
            self.running = false;
            let _ = self.outcome.get_or_insert(SolveOutcome::Died);
        }
    }
}
