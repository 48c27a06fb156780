use mazewalk_core::{
    CellCoord, Direction, GridError, HexDirection, LevelSnapshot, SolveOutcome, SolvingAlgorithm,
    TileCatalogue, TileId,
};
use mazewalk_level::{Character, Level, LevelInfo};
use mazewalk_solver_manual::{HexManual, Manual};

fn level_from(columns: u32, rows: u32, tiles: &[u16]) -> Level {
    let snapshot = LevelSnapshot {
        columns,
        rows,
        tiles: tiles.iter().copied().map(TileId::new).collect(),
    };
    let info = LevelInfo {
        identifier: 1,
        name: "manual fixture".to_owned(),
        author: "tests".to_owned(),
    };
    Level::from_snapshot(info, snapshot, TileCatalogue::standard()).expect("fixture is well formed")
}

fn solver_over(level: Level) -> Manual {
    let start = level.start_position().expect("fixture has a start");
    Manual::new(level, Character::at_start(start)).expect("fixture is solvable")
}

#[test]
fn construction_rejects_levels_without_an_arrival() {
    let level = level_from(2, 2, &[2, 1, 1, 1]);
    let character = Character::at_start(CellCoord::new(0, 0));
    assert!(matches!(
        Manual::new(level, character),
        Err(GridError::MissingStartOrEnd)
    ));
}

#[test]
fn right_right_down_down_finishes_the_three_by_three_level() {
    // Start at (0,0), arrival at (2,2), everything else empty.
    let level = level_from(3, 3, &[2, 1, 1, 1, 1, 1, 1, 1, 3]);
    let mut solver = solver_over(level);

    for direction in [
        Direction::Right,
        Direction::Right,
        Direction::Down,
        Direction::Down,
    ] {
        solver.run_one_step(Some(direction));
    }

    assert_eq!(solver.character().position(), CellCoord::new(2, 2));
    assert!(!solver.is_running());
    assert_eq!(solver.outcome(), Some(SolveOutcome::Finished));

    let record = solver.run_record().expect("finished run yields a record");
    assert_eq!(record.algorithm, "manual");
    assert_eq!(
        record.path,
        vec![
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
            CellCoord::new(2, 0),
            CellCoord::new(2, 1),
            CellCoord::new(2, 2),
        ]
    );
}

#[test]
fn steps_into_walls_and_out_of_bounds_change_nothing() {
    let level = level_from(3, 1, &[2, 4, 3]);
    let mut solver = solver_over(level);

    solver.run_one_step(Some(Direction::Right)); // wall
    solver.run_one_step(Some(Direction::Left)); // out of bounds
    solver.run_one_step(Some(Direction::Up)); // out of bounds
    solver.run_one_step(None); // no input this tick

    assert_eq!(solver.character().position(), CellCoord::new(0, 0));
    assert_eq!(solver.character().path(), &[CellCoord::new(0, 0)]);
    assert!(solver.is_running());
    assert!(solver.run_record().is_none());
}

#[test]
fn traversing_mud_stuns_for_exactly_one_attempt() {
    let level = level_from(4, 1, &[2, 5, 1, 3]);
    let mut solver = solver_over(level);

    solver.run_one_step(Some(Direction::Right));
    assert_eq!(solver.character().position(), CellCoord::new(1, 0));
    assert_eq!(solver.character().stun_remaining(), 1);

    // The next attempt is rejected and consumes the stun.
    solver.run_one_step(Some(Direction::Right));
    assert_eq!(solver.character().position(), CellCoord::new(1, 0));
    assert_eq!(solver.character().stun_remaining(), 0);

    solver.run_one_step(Some(Direction::Right));
    solver.run_one_step(Some(Direction::Right));
    assert_eq!(solver.outcome(), Some(SolveOutcome::Finished));
}

#[test]
fn stepping_onto_a_trap_ends_the_run() {
    let level = level_from(4, 1, &[2, 6, 1, 3]);
    let mut solver = solver_over(level);

    solver.run_one_step(Some(Direction::Right));

    assert!(!solver.is_running());
    assert_eq!(solver.outcome(), Some(SolveOutcome::Died));
    assert!(!solver.character().is_alive());
}

#[test]
fn further_input_is_ignored_after_the_run_ends() {
    let level = level_from(2, 1, &[2, 3]);
    let mut solver = solver_over(level);

    solver.run_one_step(Some(Direction::Right));
    assert!(!solver.is_running());

    solver.run_one_step(Some(Direction::Left));
    assert_eq!(solver.character().position(), CellCoord::new(1, 0));
}

#[test]
fn hex_solver_follows_offset_deltas() {
    // Arrival sits diagonally down-right of the start.
    let level = level_from(2, 2, &[2, 1, 1, 3]);
    let start = level.start_position().expect("fixture has a start");
    let mut solver =
        HexManual::new(level, Character::at_start(start)).expect("fixture is solvable");

    solver.run_one_step(Some(HexDirection::RightDown));

    assert_eq!(solver.character().position(), CellCoord::new(1, 1));
    assert!(!solver.is_running());
    assert_eq!(solver.outcome(), Some(SolveOutcome::Finished));

    let record = solver.run_record().expect("finished run yields a record");
    assert_eq!(record.algorithm, "manual-hex");
}
