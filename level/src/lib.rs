#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state for the mazewalk engine.
//!
//! A [`Level`] couples a fixed-shape grid of tile identifiers with the tile
//! catalogue that gives those identifiers meaning. The shape is set at
//! construction and never changes; cell contents are mutable through the
//! checked [`Level::set`] operation so editors receive placement rejections
//! as values rather than panics. The [`character`] module houses the state
//! machine that solving algorithms drive across the grid.

pub mod character;

pub use character::Character;

use mazewalk_core::{
    CellCoord, GridError, LevelSnapshot, OccurrenceAnomaly, TileCatalogue, TileId, TileRole,
    TileType,
};

/// Descriptive metadata attached to a level by the persistence layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelInfo {
    /// Identifier of the level in the external store.
    pub identifier: u32,
    /// Display name of the level.
    pub name: String,
    /// Author credited for the level.
    pub author: String,
}

/// Fixed-shape grid of tile identifiers plus the catalogue resolving them.
#[derive(Clone, Debug)]
pub struct Level {
    info: LevelInfo,
    columns: u32,
    rows: u32,
    tiles: Vec<TileId>,
    catalogue: TileCatalogue,
}

impl Level {
    /// Builds a level from a persistence-layer snapshot.
    ///
    /// Rejects snapshots whose tile array disagrees with the declared shape
    /// and snapshots containing identifiers the catalogue cannot resolve, so
    /// that every stored id is guaranteed to resolve for the level's lifetime.
    pub fn from_snapshot(
        info: LevelInfo,
        snapshot: LevelSnapshot,
        catalogue: TileCatalogue,
    ) -> Result<Self, GridError> {
        let expected_u64 = u64::from(snapshot.columns) * u64::from(snapshot.rows);
        let expected = usize::try_from(expected_u64).unwrap_or(usize::MAX);
        if snapshot.tiles.len() != expected {
            return Err(GridError::SnapshotShapeMismatch {
                expected,
                actual: snapshot.tiles.len(),
            });
        }

        for id in &snapshot.tiles {
            let _ = catalogue.resolve(*id)?;
        }

        Ok(Self {
            info,
            columns: snapshot.columns,
            rows: snapshot.rows,
            tiles: snapshot.tiles,
            catalogue,
        })
    }

    /// Metadata describing the level.
    #[must_use]
    pub fn info(&self) -> &LevelInfo {
        &self.info
    }

    /// Number of tile columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Catalogue resolving the identifiers stored in the grid.
    #[must_use]
    pub fn catalogue(&self) -> &TileCatalogue {
        &self.catalogue
    }

    /// Identifier stored at the provided cell.
    pub fn get(&self, cell: CellCoord) -> Result<TileId, GridError> {
        let index = self
            .index(cell)
            .ok_or(GridError::OutOfBounds { cell })?;
        Ok(self.tiles[index])
    }

    /// Catalogue entry for the tile stored at the provided cell.
    pub fn tile_at(&self, cell: CellCoord) -> Result<&TileType, GridError> {
        let id = self.get(cell)?;
        self.catalogue.resolve(id)
    }

    /// Stores an identifier at the provided cell.
    ///
    /// The placement is rejected as a value when the cell is out of bounds,
    /// when the identifier has no catalogue entry, or when the assignment
    /// would push the tile type's instance count above its maximum. Editors
    /// rely on the rejection to give user feedback.
    pub fn set(&mut self, cell: CellCoord, id: TileId) -> Result<(), GridError> {
        let index = self
            .index(cell)
            .ok_or(GridError::OutOfBounds { cell })?;
        let limit = self.catalogue.resolve(id)?.max_instances;

        if self.tiles[index] != id && self.count(id) >= limit {
            return Err(GridError::InstanceBoundsExceeded { tile: id, limit });
        }

        self.tiles[index] = id;
        Ok(())
    }

    /// Number of cells currently holding the provided identifier.
    #[must_use]
    pub fn count(&self, id: TileId) -> u32 {
        let occurrences = self.tiles.iter().filter(|tile| **tile == id).count();
        u32::try_from(occurrences).unwrap_or(u32::MAX)
    }

    /// Locates the single cell whose tile type satisfies the predicate.
    ///
    /// Ambiguous or missing matches are rejected before a solve attempt can
    /// start, never discovered mid-search.
    pub fn find_unique<P>(&self, predicate: P) -> Result<CellCoord, GridError>
    where
        P: Fn(&TileType) -> bool,
    {
        let mut matches = 0usize;
        let mut found = None;

        for (index, id) in self.tiles.iter().enumerate() {
            let Ok(tile) = self.catalogue.resolve(*id) else {
                continue;
            };
            if predicate(tile) {
                matches += 1;
                if found.is_none() {
                    found = Some(self.cell_at(index));
                }
            }
        }

        match (matches, found) {
            (1, Some(cell)) => Ok(cell),
            _ => Err(GridError::NotExactlyOne { matches }),
        }
    }

    /// Cell carrying the start role, required before a playthrough begins.
    pub fn start_position(&self) -> Result<CellCoord, GridError> {
        self.find_unique(|tile| tile.role == TileRole::Start)
            .map_err(|_| GridError::MissingStartOrEnd)
    }

    /// Cell carrying the arrival role, required before a playthrough begins.
    pub fn arrival_position(&self) -> Result<CellCoord, GridError> {
        self.find_unique(|tile| tile.role == TileRole::Arrival)
            .map_err(|_| GridError::MissingStartOrEnd)
    }

    /// Whether the tile type's current occurrence count sits within bounds.
    #[must_use]
    pub fn occurrences_within_bounds(&self, tile: &TileType) -> bool {
        let count = self.count(tile.id);
        tile.min_instances <= count && count <= tile.max_instances
    }

    /// Aggregate report of every tile type whose count violates its bounds.
    #[must_use]
    pub fn occurrence_anomalies(&self) -> Vec<OccurrenceAnomaly> {
        self.catalogue
            .iter()
            .filter(|tile| !self.occurrences_within_bounds(tile))
            .map(|tile| OccurrenceAnomaly {
                name: tile.name.clone(),
                count: self.count(tile.id),
                min: tile.min_instances,
                max: tile.max_instances,
            })
            .collect()
    }

    /// Captures the full tile-id array for the persistence layer.
    ///
    /// The snapshot's shape is identical to the one the level was built from;
    /// re-ingesting it reproduces the same grid.
    #[must_use]
    pub fn snapshot(&self) -> LevelSnapshot {
        LevelSnapshot {
            columns: self.columns,
            rows: self.rows,
            tiles: self.tiles.clone(),
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    fn cell_at(&self, index: usize) -> CellCoord {
        let width = usize::try_from(self.columns).unwrap_or(1).max(1);
        let column = u32::try_from(index % width).unwrap_or(u32::MAX);
        let row = u32::try_from(index / width).unwrap_or(u32::MAX);
        CellCoord::new(column, row)
    }
}
