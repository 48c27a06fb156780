#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Optimal shortest-path search over a square-grid level.
//!
//! Classic A* with a Manhattan-distance heuristic scaled by the fixed step
//! cost. Search nodes live in an index-based arena; the parent relation is an
//! arena index rather than an owning reference, so path reconstruction is a
//! plain lookup walk. The open set is a binary heap keyed by `(f, sequence)`
//! where the monotonically increasing sequence number keeps ties stable in
//! insertion order. Each [`run_one_step`](SolvingAlgorithm::run_one_step)
//! expands exactly one node, so an external driver can visualise the search;
//! [`Astar::run_to_completion`] produces the identical path in one call.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::SystemTime;

use mazewalk_core::{
    CellCoord, Direction, GridError, RunRecord, SolveOutcome, SolvingAlgorithm,
};
use mazewalk_level::{Character, Level};

/// Cost of one orthogonal step on the non-diagonal grid.
pub const STEP_COST: u32 = 10;

#[derive(Clone, Copy, Debug)]
struct Node {
    cell: CellCoord,
    g: u32,
    parent: Option<usize>,
}

/// A* search over a level, driven one node expansion at a time.
#[derive(Debug)]
pub struct Astar {
    level: Level,
    character: Character,
    goal: CellCoord,
    nodes: Vec<Node>,
    open: BinaryHeap<Reverse<(u32, u64, usize)>>,
    next_sequence: u64,
    closed: Vec<bool>,
    best: Vec<Option<usize>>,
    running: bool,
    outcome: Option<SolveOutcome>,
    path: Option<Vec<CellCoord>>,
}

impl Astar {
    /// Creates an A* solver over the provided level and character.
    ///
    /// Levels without a unique start and arrival cell are rejected before the
    /// search exists.
    pub fn new(level: Level, character: Character) -> Result<Self, GridError> {
        let _ = level.start_position()?;
        let goal = level.arrival_position()?;

        let cell_count_u64 = u64::from(level.columns()) * u64::from(level.rows());
        let cell_count = usize::try_from(cell_count_u64).unwrap_or(0);

        let mut solver = Self {
            goal,
            nodes: Vec::new(),
            open: BinaryHeap::new(),
            next_sequence: 0,
            closed: vec![false; cell_count],
            best: vec![None; cell_count],
            running: true,
            outcome: None,
            path: None,
            level,
            character,
        };

        let origin = solver.character.position();
        solver.push_node(Node {
            cell: origin,
            g: 0,
            parent: None,
        });
        Ok(solver)
    }

    /// Character the search was constructed with; A* never moves it.
    #[must_use]
    pub fn character(&self) -> &Character {
        &self.character
    }

    /// Level the search operates on.
    #[must_use]
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Shortest path from start to arrival, available once the search ends
    /// successfully. Contains both endpoints.
    #[must_use]
    pub fn path(&self) -> Option<&[CellCoord]> {
        self.path.as_deref()
    }

    /// Total cost of the found path, `STEP_COST` per step.
    #[must_use]
    pub fn path_cost(&self) -> Option<u32> {
        let path = self.path.as_ref()?;
        let steps = u32::try_from(path.len().saturating_sub(1)).ok()?;
        Some(STEP_COST * steps)
    }

    /// Runs node expansions until the search terminates.
    pub fn run_to_completion(&mut self) {
        while self.running {
            self.expand_next();
        }
    }

    /// Releases the level and character once the playthrough is discarded.
    #[must_use]
    pub fn into_parts(self) -> (Level, Character) {
        (self.level, self.character)
    }

    /// Record of the finished search, or `None` while still running.
    #[must_use]
    pub fn run_record(&self) -> Option<RunRecord> {
        if self.running {
            return None;
        }
        let path = match &self.path {
            Some(path) => path.clone(),
            None => self.character.path().to_vec(),
        };
        Some(RunRecord {
            algorithm: "astar".to_owned(),
            path,
            ended_at: SystemTime::now(),
        })
    }

    fn expand_next(&mut self) {
        // Superseded heap entries are skipped without counting as an
        // expansion; their cell was closed through a cheaper entry.
        let index = loop {
            let Some(Reverse((_, _, index))) = self.open.pop() else {
                self.running = false;
                self.outcome = Some(SolveOutcome::NoPathFound);
                return;
            };
            let cell_index = self.cell_index(self.nodes[index].cell);
            if !self.closed[cell_index] {
                break index;
            }
        };

        let current = self.nodes[index];
        let cell_index = self.cell_index(current.cell);
        self.closed[cell_index] = true;

        if current.cell == self.goal {
            self.path = Some(self.reconstruct(index));
            self.running = false;
            self.outcome = Some(SolveOutcome::Finished);
            return;
        }

        for direction in Direction::ALL {
            let Some(neighbor) =
                direction.offset_within(current.cell, self.level.columns(), self.level.rows())
            else {
                continue;
            };
            let Ok(tile) = self.level.tile_at(neighbor) else {
                continue;
            };
            if !tile.traversable {
                continue;
            }

            let neighbor_index = self.cell_index(neighbor);
            if self.closed[neighbor_index] {
                continue;
            }

            let tentative_g = current.g + STEP_COST;
            if let Some(existing) = self.best[neighbor_index] {
                if self.nodes[existing].g <= tentative_g {
                    continue;
                }
            }

            self.push_node(Node {
                cell: neighbor,
                g: tentative_g,
                parent: Some(index),
            });
        }
    }

    fn push_node(&mut self, node: Node) {
        let cell_index = self.cell_index(node.cell);
        let h = STEP_COST * node.cell.manhattan_distance(self.goal);
        let f = node.g + h;

        let index = self.nodes.len();
        self.nodes.push(node);
        self.best[cell_index] = Some(index);

        self.open.push(Reverse((f, self.next_sequence, index)));
        self.next_sequence += 1;
    }

    fn reconstruct(&self, goal_index: usize) -> Vec<CellCoord> {
        let mut path = Vec::new();
        let mut cursor = Some(goal_index);
        while let Some(index) = cursor {
            path.push(self.nodes[index].cell);
            cursor = self.nodes[index].parent;
        }
        path.reverse();
        path
    }

    fn cell_index(&self, cell: CellCoord) -> usize {
        let width = usize::try_from(self.level.columns()).unwrap_or(0);
        let row = usize::try_from(cell.row()).unwrap_or(0);
        let column = usize::try_from(cell.column()).unwrap_or(0);
        row * width + column
    }
}

impl SolvingAlgorithm for Astar {
    type Input = ();

    fn name(&self) -> &'static str {
        "astar"
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
        self.expand_next();
    }
}
