//! The square board and its coordinates.

use crate::error::{EngineError, Result};
use crate::game::{Direction, Tile, TileIds};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest supported board side.
pub const MIN_GRID_SIZE: usize = 2;

/// Largest supported board side.
pub const MAX_GRID_SIZE: usize = 16;

/// A cell position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Row index, 0 at the top.
    pub row: usize,
    /// Column index, 0 at the left.
    pub col: usize,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// An NxN matrix of optional tiles.
///
/// Cells are stored in row-major order. Accessors taking a [`Coord`] fail fast
/// on out-of-bounds coordinates: that can only be a traversal bug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidGridSize`] if `size` is outside
    /// `MIN_GRID_SIZE..=MAX_GRID_SIZE`.
    pub fn new(size: usize) -> Result<Self> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            return Err(EngineError::InvalidGridSize { size });
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    /// Build a grid from literal rows, `0` marking an empty cell.
    ///
    /// Tiles receive ids from `ids` in row-major order.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows do not form a square of supported size or
    /// a value is not a valid tile value.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R], ids: &mut TileIds) -> Result<Self> {
        let mut grid = Self::new(rows.len())?;
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != grid.size {
                return Err(EngineError::RowLength {
                    expected: grid.size,
                    found: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if value != 0 {
                    grid.place(Coord::new(row, col), Tile::new(value, ids)?);
                }
            }
        }
        Ok(grid)
    }

    /// Side length.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Check if a coordinate is on the board.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    fn checked_index(&self, coord: Coord) -> Result<usize> {
        if self.in_bounds(coord) {
            Ok(coord.row * self.size + coord.col)
        } else {
            Err(EngineError::OutOfBounds {
                coord,
                size: self.size,
            })
        }
    }

    fn index(&self, coord: Coord) -> usize {
        match self.checked_index(coord) {
            Ok(idx) => idx,
            Err(e) => panic!("{e}"),
        }
    }

    /// Checked cell lookup.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutOfBounds`] for coordinates off the board.
    pub fn get(&self, coord: Coord) -> Result<Option<&Tile>> {
        self.checked_index(coord).map(|idx| self.cells[idx].as_ref())
    }

    /// The tile at `coord`, if any.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is out of bounds.
    #[must_use]
    pub fn at(&self, coord: Coord) -> Option<&Tile> {
        self.cells[self.index(coord)].as_ref()
    }

    /// Put a tile at `coord`, returning whatever occupied it.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is out of bounds.
    pub fn place(&mut self, coord: Coord, tile: Tile) -> Option<Tile> {
        let idx = self.index(coord);
        self.cells[idx].replace(tile)
    }

    /// Vacate `coord`, returning its tile.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is out of bounds.
    pub fn take(&mut self, coord: Coord) -> Option<Tile> {
        let idx = self.index(coord);
        self.cells[idx].take()
    }

    /// The in-bounds neighbor of `coord` one step along `direction`.
    #[must_use]
    pub fn step(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        let (dr, dc) = direction.vector();
        let row = coord.row.checked_add_signed(isize::from(dr))?;
        let col = coord.col.checked_add_signed(isize::from(dc))?;
        let next = Coord::new(row, col);
        self.in_bounds(next).then_some(next)
    }

    /// Every coordinate, row-major.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Coord::new(row, col)))
    }

    /// Empty cells in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<Coord> {
        self.coords()
            .filter(|&coord| self.cells[self.index(coord)].is_none())
            .collect()
    }

    /// Occupied cells with their tiles, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = (Coord, &Tile)> {
        let size = self.size;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.as_ref()
                .map(|tile| (Coord::new(idx / size, idx % size), tile))
        })
    }

    /// Number of live tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Whether every cell is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Largest tile value, 0 on an empty board.
    #[must_use]
    pub fn max_value(&self) -> u32 {
        self.tiles().map(|(_, tile)| tile.value).max().unwrap_or(0)
    }

    /// Cell values as rows, `0` for empty cells.
    #[must_use]
    pub fn values(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|cell| cell.map_or(0, |t| t.value)).collect())
            .collect()
    }

    /// Remove every tile.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Forget which tiles were produced by a merge.
    pub fn clear_merge_marks(&mut self) {
        for tile in self.cells.iter_mut().flatten() {
            tile.merged_from = None;
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.max_value().max(2).to_string().len();
        for row in self.values() {
            let cells: Vec<String> = row
                .iter()
                .map(|&value| {
                    if value == 0 {
                        format!("{:>width$}", ".")
                    } else {
                        format!("{value:>width$}")
                    }
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
