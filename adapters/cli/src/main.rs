#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that decodes, inspects and solves maze levels.

mod level_transfer;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use mazewalk_core::{
    Direction, EffectKind, RunRecord, SolveOutcome, SolvingAlgorithm, TileCatalogue, TileRole,
    TileType,
};
use mazewalk_level::{Character, Level, LevelInfo};
use mazewalk_solver_astar::Astar;
use mazewalk_solver_manual::Manual;
use mazewalk_solver_tremaux::Tremaux;

use crate::level_transfer::LevelTransfer;

#[derive(Parser)]
#[command(name = "mazewalk", about = "Decode, inspect and solve maze levels")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Builds a transfer string from raw grid data.
    Encode {
        /// Number of tile columns.
        #[arg(long)]
        columns: u32,
        /// Number of tile rows.
        #[arg(long)]
        rows: u32,
        /// Comma-separated row-major tile identifiers.
        #[arg(long)]
        tiles: String,
        /// Stable identifier of the level.
        #[arg(long, default_value_t = 1)]
        identifier: u32,
        /// Human-readable level name.
        #[arg(long, default_value = "untitled")]
        name: String,
        /// Author credited for the level.
        #[arg(long, default_value = "unknown")]
        author: String,
    },
    /// Prints the decoded grid as ASCII art.
    Show {
        /// Encoded level transfer string.
        level: String,
    },
    /// Checks the decoded level against its catalogue bounds.
    Validate {
        /// Encoded level transfer string.
        level: String,
    },
    /// Runs a solving algorithm over the decoded level.
    Solve {
        /// Encoded level transfer string.
        level: String,
        /// Algorithm driving the playthrough.
        #[arg(long, value_enum, default_value_t = Algorithm::Astar)]
        algorithm: Algorithm,
        /// Move sequence for the manual algorithm, one of U, L, D, R per step.
        #[arg(long)]
        moves: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Algorithm {
    Manual,
    Astar,
    Tremaux,
}

/// Entry point for the mazewalk command-line interface.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Encode {
            columns,
            rows,
            tiles,
            identifier,
            name,
            author,
        } => encode(columns, rows, &tiles, identifier, name, author),
        Command::Show { level } => show(&level),
        Command::Validate { level } => validate(&level),
        Command::Solve {
            level,
            algorithm,
            moves,
        } => solve(&level, algorithm, moves.as_deref()),
    }
}

fn encode(
    columns: u32,
    rows: u32,
    tiles: &str,
    identifier: u32,
    name: String,
    author: String,
) -> anyhow::Result<()> {
    let tiles = parse_tiles(tiles)?;
    let expected = u64::from(columns) * u64::from(rows);
    if tiles.len() as u64 != expected {
        bail!(
            "expected {expected} tiles for a {columns}x{rows} grid, received {}",
            tiles.len()
        );
    }

    let transfer = LevelTransfer {
        columns,
        rows,
        identifier,
        name,
        author,
        tiles,
    };
    // Decoding through the engine catches unknown identifiers up front.
    let _ = decode_level(&transfer.encode())?;
    println!("{}", transfer.encode());
    Ok(())
}

fn show(encoded: &str) -> anyhow::Result<()> {
    let level = decode_level(encoded)?;
    println!(
        "{} ({}x{}) by {}",
        level.info().name,
        level.columns(),
        level.rows(),
        level.info().author
    );
    print!("{}", render(&level)?);
    Ok(())
}

fn validate(encoded: &str) -> anyhow::Result<()> {
    let level = decode_level(encoded)?;
    if level.start_position().is_err() || level.arrival_position().is_err() {
        bail!("level does not contain exactly one start and one arrival cell");
    }

    let anomalies = level.occurrence_anomalies();
    if anomalies.is_empty() {
        println!("level is valid");
        return Ok(());
    }
    for anomaly in &anomalies {
        println!(
            "{}: {} cells outside [{}, {}]",
            anomaly.name, anomaly.count, anomaly.min, anomaly.max
        );
    }
    bail!("level violates {} occurrence bound(s)", anomalies.len());
}

fn solve(encoded: &str, algorithm: Algorithm, moves: Option<&str>) -> anyhow::Result<()> {
    let level = decode_level(encoded)?;
    let start = level
        .start_position()
        .context("level does not contain a start cell")?;
    let character = Character::at_start(start);

    let record = match algorithm {
        Algorithm::Manual => {
            let sequence =
                parse_moves(moves.ok_or_else(|| anyhow!("manual solving requires --moves"))?)?;
            let mut solver = Manual::new(level, character)?;
            for direction in sequence {
                if !solver.is_running() {
                    break;
                }
                solver.run_one_step(Some(direction));
            }
            report_outcome(solver.outcome());
            solver.run_record()
        }
        Algorithm::Astar => {
            let mut solver = Astar::new(level, character)?;
            solver.run_to_completion();
            report_outcome(solver.outcome());
            if let Some(cost) = solver.path_cost() {
                println!("cost: {cost}");
            }
            solver.run_record()
        }
        Algorithm::Tremaux => {
            let mut solver = Tremaux::new(level, character)?;
            solver.run_to_completion();
            report_outcome(solver.outcome());
            solver.run_record()
        }
    };

    if let Some(record) = record {
        print_record(&record);
    } else {
        println!("run did not finish; no record produced");
    }
    Ok(())
}

fn decode_level(encoded: &str) -> anyhow::Result<Level> {
    let transfer = LevelTransfer::decode(encoded).map_err(anyhow::Error::new)?;
    let info = LevelInfo {
        identifier: transfer.identifier,
        name: transfer.name.clone(),
        author: transfer.author.clone(),
    };
    let level = Level::from_snapshot(info, transfer.snapshot(), TileCatalogue::standard())
        .context("transfer string does not describe a playable level")?;
    Ok(level)
}

fn parse_tiles(raw: &str) -> anyhow::Result<Vec<u16>> {
    raw.split(',')
        .map(|token| {
            token
                .trim()
                .parse::<u16>()
                .with_context(|| format!("'{}' is not a tile identifier", token.trim()))
        })
        .collect()
}

fn parse_moves(raw: &str) -> anyhow::Result<Vec<Direction>> {
    raw.chars()
        .filter(|character| !character.is_whitespace())
        .map(|character| match character.to_ascii_uppercase() {
            'U' => Ok(Direction::Up),
            'L' => Ok(Direction::Left),
            'D' => Ok(Direction::Down),
            'R' => Ok(Direction::Right),
            other => Err(anyhow!("'{other}' is not a move; use U, L, D or R")),
        })
        .collect()
}

fn render(level: &Level) -> anyhow::Result<String> {
    let mut art = String::new();
    for row in 0..level.rows() {
        for column in 0..level.columns() {
            let tile = level.tile_at(mazewalk_core::CellCoord::new(column, row))?;
            art.push(glyph(tile));
        }
        art.push('\n');
    }
    Ok(art)
}

fn glyph(tile: &TileType) -> char {
    match (tile.role, tile.traversable, tile.effect) {
        (TileRole::Start, _, _) => 'S',
        (TileRole::Arrival, _, _) => 'A',
        (_, false, _) => '#',
        (_, _, EffectKind::Slow) => '~',
        (_, _, EffectKind::Kill) => 'x',
        _ => '.',
    }
}

fn report_outcome(outcome: Option<SolveOutcome>) {
    let label = match outcome {
        Some(SolveOutcome::Finished) => "finished",
        Some(SolveOutcome::NoPathFound) => "no path found",
        Some(SolveOutcome::NoSolutionFound) => "no solution found",
        Some(SolveOutcome::Died) => "died",
        None => "still running",
    };
    println!("outcome: {label}");
}

fn print_record(record: &RunRecord) {
    println!("algorithm: {}", record.algorithm);
    println!("steps: {}", record.path.len().saturating_sub(1));
    let cells: Vec<String> = record
        .path
        .iter()
        .map(|cell| format!("({},{})", cell.column(), cell.row()))
        .collect();
    println!("path: {}", cells.join(" -> "));
}
