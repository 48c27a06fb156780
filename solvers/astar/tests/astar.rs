use mazewalk_core::{
    CellCoord, LevelSnapshot, SolveOutcome, SolvingAlgorithm, TileCatalogue, TileId,
};
use mazewalk_level::{Character, Level, LevelInfo};
use mazewalk_solver_astar::{Astar, STEP_COST};

fn level_from(columns: u32, rows: u32, tiles: &[u16]) -> Level {
    let snapshot = LevelSnapshot {
        columns,
        rows,
        tiles: tiles.iter().copied().map(TileId::new).collect(),
    };
    let info = LevelInfo {
        identifier: 1,
        name: "astar fixture".to_owned(),
        author: "tests".to_owned(),
    };
    Level::from_snapshot(info, snapshot, TileCatalogue::standard()).expect("fixture is well formed")
}

fn solver_over(level: Level) -> Astar {
    let start = level.start_position().expect("fixture has a start");
    Astar::new(level, Character::at_start(start)).expect("fixture is solvable")
}

fn assert_contiguous(path: &[CellCoord]) {
    for pair in path.windows(2) {
        assert_eq!(
            pair[0].manhattan_distance(pair[1]),
            1,
            "path steps between adjacent cells"
        );
    }
}

#[test]
fn open_grid_yields_a_manhattan_optimal_path() {
    // 4x4, start top-left, arrival bottom-right, no obstacles.
    let level = level_from(
        4,
        4,
        &[2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 3],
    );
    let mut solver = solver_over(level);

    solver.run_to_completion();

    assert_eq!(solver.outcome(), Some(SolveOutcome::Finished));
    let path = solver.path().expect("finished search has a path");
    assert_eq!(path.first(), Some(&CellCoord::new(0, 0)));
    assert_eq!(path.last(), Some(&CellCoord::new(3, 3)));
    assert_eq!(path.len(), 7, "six steps covers the Manhattan distance");
    assert_contiguous(path);
    assert_eq!(solver.path_cost(), Some(6 * STEP_COST));
}

#[test]
fn search_routes_around_a_wall_barrier() {
    // A wall column with a single gap in the bottom row.
    let level = level_from(3, 3, &[2, 4, 3, 1, 4, 1, 1, 1, 1]);
    let mut solver = solver_over(level);

    solver.run_to_completion();

    assert_eq!(solver.outcome(), Some(SolveOutcome::Finished));
    let path = solver.path().expect("finished search has a path");
    assert_eq!(
        path,
        &[
            CellCoord::new(0, 0),
            CellCoord::new(0, 1),
            CellCoord::new(0, 2),
            CellCoord::new(1, 2),
            CellCoord::new(2, 2),
            CellCoord::new(2, 1),
            CellCoord::new(2, 0),
        ]
    );
    assert_contiguous(path);
}

#[test]
fn enclosed_arrival_reports_no_path() {
    // Walls surround the arrival corner completely.
    let level = level_from(3, 3, &[2, 1, 4, 1, 1, 4, 4, 4, 3]);
    let mut solver = solver_over(level);

    solver.run_to_completion();

    assert!(!solver.is_running());
    assert_eq!(solver.outcome(), Some(SolveOutcome::NoPathFound));
    assert!(solver.path().is_none());
    assert!(solver.path_cost().is_none());
}

#[test]
fn the_character_never_moves_during_the_search() {
    let level = level_from(3, 1, &[2, 1, 3]);
    let start = CellCoord::new(0, 0);
    let mut solver = solver_over(level);

    solver.run_to_completion();

    assert_eq!(solver.outcome(), Some(SolveOutcome::Finished));
    assert_eq!(solver.character().position(), start);
    assert_eq!(solver.character().path(), &[start]);
}

#[test]
fn stepwise_and_full_runs_produce_the_same_path() {
    let tiles = [2, 1, 1, 1, 4, 1, 1, 1, 1, 4, 1, 1, 1, 1, 1, 3];
    let mut full = solver_over(level_from(4, 4, &tiles));
    full.run_to_completion();

    let mut stepwise = solver_over(level_from(4, 4, &tiles));
    let mut budget = 0_u32;
    while stepwise.is_running() {
        stepwise.run_one_step(None);
        budget += 1;
        assert!(budget <= 16, "search expands each cell at most once");
    }

    assert_eq!(full.outcome(), stepwise.outcome());
    assert_eq!(full.path(), stepwise.path());
}

#[test]
fn tied_costs_resolve_in_insertion_order() {
    // Every route across the open 3x3 grid costs the same, so the whole
    // search runs on tied f-scores. Neighbors enter the open set in
    // up/left/down/right order and ties pop oldest-first, which commits the
    // search to the down-then-right corner route every time.
    let level = level_from(3, 3, &[2, 1, 1, 1, 1, 1, 1, 1, 3]);
    let mut solver = solver_over(level);

    solver.run_to_completion();

    assert_eq!(solver.outcome(), Some(SolveOutcome::Finished));
    assert_eq!(
        solver.path().expect("finished search has a path"),
        &[
            CellCoord::new(0, 0),
            CellCoord::new(0, 1),
            CellCoord::new(0, 2),
            CellCoord::new(1, 2),
            CellCoord::new(2, 2),
        ]
    );
}

#[test]
fn record_carries_the_reconstructed_path() {
    let level = level_from(2, 1, &[2, 3]);
    let mut solver = solver_over(level);

    assert!(solver.run_record().is_none());
    solver.run_to_completion();

    let record = solver.run_record().expect("finished run yields a record");
    assert_eq!(record.algorithm, "astar");
    assert_eq!(record.path, vec![CellCoord::new(0, 0), CellCoord::new(1, 0)]);
}

#[test]
fn mud_and_traps_do_not_block_the_search() {
    // A* plans over traversability only; tile effects apply to a walker.
    let level = level_from(4, 1, &[2, 5, 6, 3]);
    let mut solver = solver_over(level);

    solver.run_to_completion();

    assert_eq!(solver.outcome(), Some(SolveOutcome::Finished));
    assert_eq!(solver.path_cost(), Some(3 * STEP_COST));
}
