//! Toroidal grid topology: region labels and wraparound adjacency.
//!
//! Adjacency is pure integer arithmetic over the flat row-major index, so the
//! grid stays index-addressable and no region holds a reference to another.

use serde::Serialize;
use thiserror::Error;

/// Index of a region in the row-major grid vector.
pub type RegionId = usize;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be at least 1x1, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
}

/// One of the four directional neighbor slots of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];
}

/// The four wired neighbors of a region. On a torus every region has all
/// four slots filled; on degenerate grids several slots may alias the same
/// region (a 1x1 grid is wired entirely to itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Neighbors {
    pub north: RegionId,
    pub south: RegionId,
    pub east: RegionId,
    pub west: RegionId,
}

impl Neighbors {
    pub fn get(&self, direction: Direction) -> RegionId {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }
}

/// Dimensions and adjacency math of the wraparound grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Torus {
    rows: usize,
    cols: usize,
}

impl Torus {
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows < 1 || cols < 1 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Display label for a region, 1-based `"<row>x<col>"`.
    pub fn label(&self, id: RegionId) -> String {
        let row = id / self.cols;
        let col = id % self.cols;
        format!("{}x{}", row + 1, col + 1)
    }

    /// Wraparound adjacency for the flat row-major index `id`.
    ///
    /// All four formulas use the column count for row stride; an earlier
    /// revision of this model used the row count there and only worked on
    /// square grids.
    pub fn neighbors(&self, id: RegionId) -> Neighbors {
        let total = self.len();
        debug_assert!(id < total);
        let cols = self.cols;

        let west = if id % cols != 0 { id - 1 } else { id + cols - 1 };
        let east = if id % cols != cols - 1 { id + 1 } else { id + 1 - cols };
        let north = if id >= cols {
            id - cols
        } else {
            total - cols + (id % cols)
        };
        let south = if id + cols < total { id + cols } else { id % cols };

        Neighbors {
            north,
            south,
            east,
            west,
        }
    }
}
