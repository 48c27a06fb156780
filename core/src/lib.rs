#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the mazewalk engine.
//!
//! This crate defines the value types that connect the level model, the
//! character state machine, and the solving algorithms: grid coordinates and
//! logical directions, the tile-type catalogue, the error taxonomy, and the
//! [`SolvingAlgorithm`] contract that every solver variant implements. The
//! surrounding shell (rendering, persistence, input devices) only ever
//! exchanges these plain values with the engine.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }
}

/// Logical movement directions on a square grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// All four directions in the canonical up/left/down/right order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Cell one step away in this direction, or `None` when the step would
    /// leave the `[0, columns) x [0, rows)` bounds.
    #[must_use]
    pub fn offset_within(self, cell: CellCoord, columns: u32, rows: u32) -> Option<CellCoord> {
        let (column, row) = match self {
            Direction::Up => (Some(cell.column()), cell.row().checked_sub(1)),
            Direction::Left => (cell.column().checked_sub(1), Some(cell.row())),
            Direction::Down => (Some(cell.column()), cell.row().checked_add(1)),
            Direction::Right => (cell.column().checked_add(1), Some(cell.row())),
        };
        let candidate = CellCoord::new(column?, row?);
        if candidate.column() < columns && candidate.row() < rows {
            Some(candidate)
        } else {
            None
        }
    }
}

/// Logical movement directions on a hexagonal grid using offset coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HexDirection {
    /// Movement toward decreasing row indices.
    Up,
    /// Diagonal movement toward decreasing column and row indices.
    LeftUp,
    /// Movement toward decreasing column indices.
    LeftDown,
    /// Movement toward increasing row indices.
    Down,
    /// Diagonal movement toward increasing column and row indices.
    RightDown,
    /// Movement toward increasing column indices.
    RightUp,
}

impl HexDirection {
    /// All six directions in the canonical clockwise-from-up order.
    pub const ALL: [HexDirection; 6] = [
        HexDirection::Up,
        HexDirection::LeftUp,
        HexDirection::LeftDown,
        HexDirection::Down,
        HexDirection::RightDown,
        HexDirection::RightUp,
    ];

    /// Cell one step away in this direction, or `None` when the step would
    /// leave the `[0, columns) x [0, rows)` bounds.
    #[must_use]
    pub fn offset_within(self, cell: CellCoord, columns: u32, rows: u32) -> Option<CellCoord> {
        let (column, row) = match self {
            HexDirection::Up => (Some(cell.column()), cell.row().checked_sub(1)),
            HexDirection::LeftUp => (cell.column().checked_sub(1), cell.row().checked_sub(1)),
            HexDirection::LeftDown => (cell.column().checked_sub(1), Some(cell.row())),
            HexDirection::Down => (Some(cell.column()), cell.row().checked_add(1)),
            HexDirection::RightDown => (cell.column().checked_add(1), cell.row().checked_add(1)),
            HexDirection::RightUp => (cell.column().checked_add(1), Some(cell.row())),
        };
        let candidate = CellCoord::new(column?, row?);
        if candidate.column() < columns && candidate.row() < rows {
            Some(candidate)
        } else {
            None
        }
    }
}

/// Identifier of a tile type within the catalogue.
///
/// Identifiers are dense and 1-based, matching the storage convention of the
/// persistence layer that supplies level snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(u16);

impl TileId {
    /// Creates a new tile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Gameplay consequence applied to a character entering a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Entering the cell has no consequence.
    None,
    /// The character is stunned for a fixed number of steps.
    Slow,
    /// The character's life ends.
    Kill,
    /// The level is completed successfully.
    LevelFinish,
}

/// Semantic role a tile type plays within a level.
///
/// Start and arrival cells are recognised through this tag rather than by
/// matching on catalogue names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileRole {
    /// No special role.
    Ordinary,
    /// The single cell a playthrough begins on.
    Start,
    /// The single cell that completes the level.
    Arrival,
}

/// Catalogue entry describing one category of grid cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileType {
    /// Identifier the grid stores for cells of this type.
    pub id: TileId,
    /// Human-readable name used in editor reports.
    pub name: String,
    /// Semantic role of the tile within a level.
    pub role: TileRole,
    /// Whether a character may enter cells of this type.
    pub traversable: bool,
    /// Consequence applied when a character enters a cell of this type.
    pub effect: EffectKind,
    /// Minimum number of cells of this type a valid level must contain.
    pub min_instances: u32,
    /// Maximum number of cells of this type a valid level may contain.
    pub max_instances: u32,
}

/// Immutable catalogue of the tile types a level may contain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileCatalogue {
    types: Vec<TileType>,
}

impl TileCatalogue {
    /// Creates a catalogue from the provided tile types.
    #[must_use]
    pub fn new(types: Vec<TileType>) -> Self {
        Self { types }
    }

    /// Resolves a tile identifier to its catalogue entry.
    pub fn resolve(&self, id: TileId) -> Result<&TileType, GridError> {
        self.types
            .iter()
            .find(|tile| tile.id == id)
            .ok_or(GridError::UnknownTileId(id))
    }

    /// Iterator over every tile type in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &TileType> {
        self.types.iter()
    }

    /// Identifier of the tile type carrying the start role, if present.
    #[must_use]
    pub fn start_id(&self) -> Option<TileId> {
        self.id_with_role(TileRole::Start)
    }

    /// Identifier of the tile type carrying the arrival role, if present.
    #[must_use]
    pub fn arrival_id(&self) -> Option<TileId> {
        self.id_with_role(TileRole::Arrival)
    }

    fn id_with_role(&self, role: TileRole) -> Option<TileId> {
        self.types
            .iter()
            .find(|tile| tile.role == role)
            .map(|tile| tile.id)
    }

    /// Builds the canonical six-entry catalogue used by shipped levels.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            TileType {
                id: TileId::new(1),
                name: "empty".to_owned(),
                role: TileRole::Ordinary,
                traversable: true,
                effect: EffectKind::None,
                min_instances: 25,
                max_instances: 1000,
            },
            TileType {
                id: TileId::new(2),
                name: "start".to_owned(),
                role: TileRole::Start,
                traversable: true,
                effect: EffectKind::None,
                min_instances: 1,
                max_instances: 1,
            },
            TileType {
                id: TileId::new(3),
                name: "arrival".to_owned(),
                role: TileRole::Arrival,
                traversable: true,
                effect: EffectKind::LevelFinish,
                min_instances: 1,
                max_instances: 1,
            },
            TileType {
                id: TileId::new(4),
                name: "wall".to_owned(),
                role: TileRole::Ordinary,
                traversable: false,
                effect: EffectKind::None,
                min_instances: 25,
                max_instances: 100,
            },
            TileType {
                id: TileId::new(5),
                name: "mud".to_owned(),
                role: TileRole::Ordinary,
                traversable: true,
                effect: EffectKind::Slow,
                min_instances: 5,
                max_instances: 20,
            },
            TileType {
                id: TileId::new(6),
                name: "trap".to_owned(),
                role: TileRole::Ordinary,
                traversable: true,
                effect: EffectKind::Kill,
                min_instances: 2,
                max_instances: 10,
            },
        ])
    }
}

/// Structural and editing failures reported by the grid model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GridError {
    /// The requested cell lies outside the grid bounds.
    #[error("cell ({},{}) lies outside the grid", cell.column(), cell.row())]
    OutOfBounds {
        /// Coordinate that failed the bounds check.
        cell: CellCoord,
    },
    /// The stored identifier has no catalogue entry.
    #[error("tile id {} has no catalogue entry", .0.get())]
    UnknownTileId(TileId),
    /// A uniqueness query matched zero or several cells.
    #[error("expected exactly one matching cell, found {matches}")]
    NotExactlyOne {
        /// Number of cells that matched the predicate.
        matches: usize,
    },
    /// The level does not carry exactly one start and one arrival cell.
    #[error("level is missing a unique start or arrival cell")]
    MissingStartOrEnd,
    /// A placement would push a tile count above its catalogue maximum.
    #[error("placing tile id {} would exceed its limit of {limit}", tile.get())]
    InstanceBoundsExceeded {
        /// Tile type whose placement was rejected.
        tile: TileId,
        /// Inclusive maximum instance count from the catalogue.
        limit: u32,
    },
    /// An ingested snapshot's tile array does not match its declared shape.
    #[error("snapshot declares {expected} cells but carries {actual}")]
    SnapshotShapeMismatch {
        /// Cell count implied by the declared columns and rows.
        expected: usize,
        /// Number of tiles actually present in the snapshot.
        actual: usize,
    },
}

/// Guard violations raised by the character's primitive operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CharacterError {
    /// The character is dead and cannot act.
    #[error("character is dead")]
    Dead,
    /// The character is stunned and cannot move.
    #[error("character is stunned")]
    Stunned,
    /// Resurrection was requested for a character that is still alive.
    #[error("character is already alive")]
    AlreadyAlive,
}

/// Result of the composite move applied by solving algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// The target tile is non-traversable; nothing changed.
    Blocked,
    /// The move was rejected by a stun; one stun unit was consumed.
    Stunned,
    /// The character is dead; the request was ignored.
    Dead,
    /// The move succeeded and the tile's effect was applied.
    Moved(EffectKind),
}

/// Terminal outcome of a solving run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveOutcome {
    /// The arrival cell was entered.
    Finished,
    /// The search exhausted its open set without reaching the arrival cell.
    NoPathFound,
    /// The exploration dead-ended every reachable cell without arriving.
    NoSolutionFound,
    /// The character died before the arrival cell was entered.
    Died,
}

/// Rectangular tile-id array exchanged with the persistence layer.
///
/// Tiles are stored in row-major order; the shape is fixed by `columns` and
/// `rows` and must satisfy `tiles.len() == columns * rows`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    /// Number of tile columns in the grid.
    pub columns: u32,
    /// Number of tile rows in the grid.
    pub rows: u32,
    /// Dense row-major tile identifiers.
    pub tiles: Vec<TileId>,
}

/// Violation entry in the editor's level-validity report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceAnomaly {
    /// Name of the offending tile type.
    pub name: String,
    /// Number of cells currently holding the tile type.
    pub count: u32,
    /// Inclusive minimum instance count from the catalogue.
    pub min: u32,
    /// Inclusive maximum instance count from the catalogue.
    pub max: u32,
}

/// Record of one completed playthrough, exposed for storage and replay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Name of the algorithm that drove the playthrough.
    pub algorithm: String,
    /// Ordered cells visited during the run.
    pub path: Vec<CellCoord>,
    /// Moment the playthrough ended.
    pub ended_at: SystemTime,
}

/// Common contract implemented by every maze-solving algorithm.
///
/// A solver is constructed from a level and a character, advances one discrete
/// step per [`run_one_step`](SolvingAlgorithm::run_one_step) invocation, and
/// reports termination through [`is_running`](SolvingAlgorithm::is_running)
/// plus a distinguishable [`SolveOutcome`]. The external driver invokes the
/// step operation once per game tick and stops calling once the run ends.
pub trait SolvingAlgorithm {
    /// Logical input consumed per step; `()` for automated solvers.
    type Input;

    /// Stable name of the algorithm, used in run records.
    fn name(&self) -> &'static str;

    /// Whether further step invocations can still change the run's state.
    fn is_running(&self) -> bool;

    /// Terminal outcome of the run, once it has ended.
    fn outcome(&self) -> Option<SolveOutcome>;

    /// Advances the run by one discrete step.
    fn run_one_step(&mut self, input: Option<Self::Input>);
}
