//! Chunk data sources and the dense grid implementation
//!
//! A chunk is one spatial partition of a tile world. Analysis only reads
//! chunks; they are authored or loaded beforehand and stay untouched while
//! being scanned.

use ndarray::Array2;
use rand::Rng;

use crate::io::error::{Result, chunk_read_error, invalid_parameter, invalid_source_data};
use crate::spatial::coordinate::{Coordinate, TileTypeId};

/// Read-only view over a rectangular grid of tile cells
///
/// Every cell is either empty or holds a tile type identifier.
pub trait Chunk {
    /// World coordinates of every occupied cell, in no particular order
    fn occupied_cells(&self) -> Vec<Coordinate>;

    /// Tile type stored at `cell`, or `None` when the cell is empty or outside the chunk
    ///
    /// # Errors
    ///
    /// Returns a chunk read error if the cell data is malformed
    fn tile_type_at(&self, cell: Coordinate) -> Result<Option<TileTypeId>>;

    /// Whether `cell` lies inside the chunk and holds a tile
    fn is_occupied(&self, cell: Coordinate) -> bool;

    /// The orthogonal neighbors of `cell`, occupied or not
    fn orthogonal_neighbors(&self, cell: Coordinate) -> Vec<Coordinate> {
        cell.orthogonal_neighbors()
    }
}

/// Dense chunk backed by a 2D array of tile codes
///
/// Codes are 1-based references into the palette; 0 marks an empty cell.
/// The array is indexed `(row, col)` and positioned in the world at `origin`,
/// so cell `(row, col)` has world coordinate `origin + (col, row)`.
#[derive(Debug, Clone)]
pub struct GridChunk {
    cells: Array2<u32>,
    palette: Vec<TileTypeId>,
    origin: Coordinate,
}

impl GridChunk {
    /// Create a chunk from tile codes and the palette they index
    ///
    /// Codes are not validated here; a code past the end of the palette
    /// surfaces as a read error when the chunk is scanned.
    pub const fn new(cells: Array2<u32>, palette: Vec<TileTypeId>) -> Self {
        Self {
            cells,
            palette,
            origin: Coordinate::new(0, 0),
        }
    }

    /// Create a chunk from a row-major code buffer
    ///
    /// # Errors
    ///
    /// Returns an error if `codes` does not hold exactly `rows * cols` entries
    pub fn from_shape_vec(
        rows: usize,
        cols: usize,
        codes: Vec<u32>,
        palette: Vec<TileTypeId>,
    ) -> Result<Self> {
        let cells = Array2::from_shape_vec((rows, cols), codes)
            .map_err(|e| invalid_source_data(&format!("chunk shape {rows}x{cols}: {e}")))?;
        Ok(Self::new(cells, palette))
    }

    /// Create a chunk from rows of optional tile types
    ///
    /// The palette is built from the tile types in order of first appearance.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows have differing lengths
    pub fn from_tile_rows(rows: &[Vec<Option<TileTypeId>>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        let mut palette: Vec<TileTypeId> = Vec::new();
        let mut codes = Vec::with_capacity(height * width);

        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(invalid_source_data(&format!(
                    "row {row_index} has {} cells, expected {width}",
                    row.len()
                )));
            }
            for cell in row {
                let code = match cell {
                    None => 0,
                    Some(tile_type) => {
                        let existing = palette.iter().position(|known| known == tile_type);
                        let index = match existing {
                            Some(index) => index,
                            None => {
                                palette.push(*tile_type);
                                palette.len() - 1
                            }
                        };
                        index as u32 + 1
                    }
                };
                codes.push(code);
            }
        }

        Self::from_shape_vec(height, width, codes, palette)
    }

    /// Fill a chunk with random tiles drawn uniformly from `palette`
    ///
    /// Each cell is occupied with probability `fill_ratio` (clamped to `[0, 1]`).
    pub fn random<R: Rng>(
        rng: &mut R,
        rows: usize,
        cols: usize,
        palette: Vec<TileTypeId>,
        fill_ratio: f64,
    ) -> Self {
        let tile_count = palette.len() as u32;
        let fill_ratio = if fill_ratio.is_nan() {
            0.0
        } else {
            fill_ratio.clamp(0.0, 1.0)
        };

        let cells = Array2::from_shape_fn((rows, cols), |_| {
            if tile_count == 0 || !rng.random_bool(fill_ratio) {
                0
            } else {
                rng.random_range(1..=tile_count)
            }
        });

        Self::new(cells, palette)
    }

    /// Place the chunk at a world origin
    ///
    /// # Errors
    ///
    /// Returns an error if the far corner of the chunk would lie outside the
    /// `i32` coordinate range
    pub fn with_origin(mut self, origin: Coordinate) -> Result<Self> {
        let (rows, cols) = self.cells.dim();
        let fits = |start: i32, extent: usize| {
            i64::try_from(extent)
                .is_ok_and(|extent| i64::from(start) + extent <= i64::from(i32::MAX) + 1)
        };
        if !(fits(origin.x, cols) && fits(origin.y, rows)) {
            return Err(invalid_parameter(
                "origin",
                &origin,
                &format!("a {rows}x{cols} chunk would extend past the i32 coordinate range"),
            ));
        }

        self.origin = origin;
        Ok(self)
    }

    /// World coordinate of the cell at row 0, column 0
    pub const fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Grid dimensions (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Tile types referenced by the codes of this chunk
    pub fn palette(&self) -> &[TileTypeId] {
        &self.palette
    }

    /// Raw tile codes
    pub const fn cells(&self) -> &Array2<u32> {
        &self.cells
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&code| code != 0).count()
    }

    fn local_index(&self, cell: Coordinate) -> Option<(usize, usize)> {
        let row = i64::from(cell.y) - i64::from(self.origin.y);
        let col = i64::from(cell.x) - i64::from(self.origin.x);
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        let (rows, cols) = self.cells.dim();
        (row < rows && col < cols).then_some((row, col))
    }

    fn world_coordinate(&self, row: usize, col: usize) -> Option<Coordinate> {
        let dx = i32::try_from(col).ok()?;
        let dy = i32::try_from(row).ok()?;
        self.origin.checked_offset(dx, dy)
    }
}

impl Chunk for GridChunk {
    fn occupied_cells(&self) -> Vec<Coordinate> {
        self.cells
            .indexed_iter()
            .filter(|&(_, &code)| code != 0)
            .filter_map(|((row, col), _)| self.world_coordinate(row, col))
            .collect()
    }

    fn tile_type_at(&self, cell: Coordinate) -> Result<Option<TileTypeId>> {
        let Some(index) = self.local_index(cell) else {
            return Ok(None);
        };
        let code = self.cells.get(index).copied().unwrap_or(0);
        if code == 0 {
            return Ok(None);
        }

        self.palette
            .get(code as usize - 1)
            .copied()
            .map(Some)
            .ok_or_else(|| {
                chunk_read_error(
                    cell,
                    &format!(
                        "tile code {code} exceeds palette of {} tile types",
                        self.palette.len()
                    ),
                )
            })
    }

    fn is_occupied(&self, cell: Coordinate) -> bool {
        self.local_index(cell)
            .and_then(|index| self.cells.get(index))
            .is_some_and(|&code| code != 0)
    }
}
