//! PNG chunk loading with a palette shared across all chunk images
//!
//! Each image is one chunk and each pixel one cell. Fully transparent pixels
//! are empty; every distinct opaque colour is a tile type. Colours from all
//! images are pooled and sorted so the same colour maps to the same tile type
//! in every chunk, and the i-th colour is placed at atlas slot
//! `(i % columns, i / columns)`.

use image::RgbaImage;
use ndarray::Array2;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::io::configuration::{EMPTY_ALPHA_THRESHOLD, MAX_CHUNK_DIMENSION};
use crate::io::error::{AdjacencyError, Result, invalid_parameter, invalid_source_data};
use crate::io::progress::ProgressManager;
use crate::spatial::{Coordinate, GridChunk, TileTypeId};

/// Sorted colour palette mapping opaque colours to atlas coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePalette {
    colors: Vec<[u8; 4]>,
    atlas_columns: u32,
}

impl TilePalette {
    /// Collect the distinct opaque colours of every image
    ///
    /// # Errors
    ///
    /// Returns an error if `atlas_columns` is zero
    pub fn from_images(images: &[RgbaImage], atlas_columns: u32) -> Result<Self> {
        if atlas_columns == 0 {
            return Err(invalid_parameter(
                "atlas_columns",
                &atlas_columns,
                &"must be at least 1",
            ));
        }

        // Deterministic colour ordering keeps tile type assignment reproducible
        let colors: BTreeSet<[u8; 4]> = images
            .iter()
            .flat_map(|image| image.pixels().map(|pixel| pixel.0))
            .filter(|color| !is_empty_color(color))
            .collect();

        Ok(Self {
            colors: colors.into_iter().collect(),
            atlas_columns,
        })
    }

    /// Number of tile types
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether no opaque colour was found
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Sorted palette colours
    pub fn colors(&self) -> &[[u8; 4]] {
        &self.colors
    }

    /// Tile type of an opaque colour, `None` for empty or unknown colours
    pub fn tile_type_of(&self, color: &[u8; 4]) -> Option<TileTypeId> {
        if is_empty_color(color) {
            return None;
        }
        self.colors
            .binary_search(color)
            .ok()
            .map(|index| self.atlas_coordinate(index))
    }

    /// Colour assigned to `tile_type`
    pub fn color_of(&self, tile_type: &TileTypeId) -> Option<[u8; 4]> {
        let x = usize::try_from(tile_type.x).ok()?;
        let y = usize::try_from(tile_type.y).ok()?;
        let columns = self.atlas_columns as usize;
        if x >= columns {
            return None;
        }
        self.colors.get(y * columns + x).copied()
    }

    /// Tile types of every palette entry, in palette order
    pub fn tile_types(&self) -> Vec<TileTypeId> {
        (0..self.colors.len())
            .map(|index| self.atlas_coordinate(index))
            .collect()
    }

    fn atlas_coordinate(&self, index: usize) -> TileTypeId {
        let columns = self.atlas_columns as usize;
        Coordinate::new((index % columns) as i32, (index / columns) as i32)
    }

    /// Convert one image into a chunk using this palette
    ///
    /// # Errors
    ///
    /// Returns an error if the image exceeds the maximum chunk dimension or
    /// contains an opaque colour missing from the palette
    pub fn chunk_from_image(&self, image: &RgbaImage) -> Result<GridChunk> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        if width > MAX_CHUNK_DIMENSION || height > MAX_CHUNK_DIMENSION {
            return Err(invalid_source_data(&format!(
                "chunk image {width}x{height} exceeds maximum dimension {MAX_CHUNK_DIMENSION}"
            )));
        }

        let mut cells: Array2<u32> = Array2::zeros((height, width));
        for (x, y, pixel) in image.enumerate_pixels() {
            let color = pixel.0;
            if is_empty_color(&color) {
                continue;
            }
            let index = self.colors.binary_search(&color).map_err(|_insertion_point| {
                invalid_source_data(&format!(
                    "colour {color:?} at ({x}, {y}) is not in the palette"
                ))
            })?;
            if let Some(cell) = cells.get_mut((y as usize, x as usize)) {
                *cell = index as u32 + 1;
            }
        }

        Ok(GridChunk::new(cells, self.tile_types()))
    }
}

const fn is_empty_color(color: &[u8; 4]) -> bool {
    color[3] <= EMPTY_ALPHA_THRESHOLD
}

/// Load a PNG file as an RGBA image
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_chunk_image<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path_buf = path.as_ref().to_path_buf();
    let image = image::open(&path_buf).map_err(|e| AdjacencyError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    Ok(image.to_rgba8())
}

/// Load every chunk image and convert them with one shared palette
///
/// Chunks are returned in the order of `paths`.
///
/// # Errors
///
/// Returns an error if any image fails to load or convert, or if
/// `atlas_columns` is zero
pub fn load_chunks(
    paths: &[PathBuf],
    atlas_columns: u32,
    mut progress: Option<&mut ProgressManager>,
) -> Result<(TilePalette, Vec<GridChunk>)> {
    if let Some(pm) = progress.as_deref_mut() {
        pm.initialize(paths.len());
    }

    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        if let Some(pm) = progress.as_deref_mut() {
            pm.start_file(path);
        }
        images.push(load_chunk_image(path)?);
        if let Some(pm) = progress.as_deref_mut() {
            pm.complete_file();
        }
    }

    let palette = TilePalette::from_images(&images, atlas_columns)?;
    let chunks = images
        .iter()
        .map(|image| palette.chunk_from_image(image))
        .collect::<Result<Vec<_>>>()?;

    Ok((palette, chunks))
}
