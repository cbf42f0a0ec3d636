//! Dense constraint table handed to constraint-propagation generators
//!
//! Generators work on small integer tile indices rather than atlas
//! coordinates. The table assigns each tile type an index in ascending
//! coordinate order and stores its permitted neighbors as a bitset.

use std::collections::HashMap;

use crate::analysis::adjacency::AdjacencyMap;
use crate::analysis::bitset::TileBitset;
use crate::spatial::TileTypeId;

/// Indexed view of an [`AdjacencyMap`]
#[derive(Debug, Clone)]
pub struct ConstraintTable {
    tile_types: Vec<TileTypeId>,
    indices: HashMap<TileTypeId, usize>,
    allowed: Vec<TileBitset>,
}

impl ConstraintTable {
    /// Index every tile type of `adjacency` and encode its neighbors
    ///
    /// Neighbors that never appear as keys cannot occur in scanner output,
    /// but are indexed as well so that no relation is dropped.
    pub fn from_adjacency(adjacency: &AdjacencyMap) -> Self {
        let mut tile_types = adjacency.tile_types();
        for (_, neighbors) in adjacency.iter() {
            for neighbor in neighbors {
                if !adjacency.contains(neighbor) {
                    tile_types.push(*neighbor);
                }
            }
        }
        tile_types.sort_unstable();
        tile_types.dedup();

        let indices: HashMap<TileTypeId, usize> = tile_types
            .iter()
            .enumerate()
            .map(|(index, &tile_type)| (tile_type, index))
            .collect();

        let allowed = tile_types
            .iter()
            .map(|tile_type| {
                let mut row = TileBitset::new(tile_types.len());
                if let Some(neighbors) = adjacency.get(tile_type) {
                    for neighbor in neighbors {
                        if let Some(&index) = indices.get(neighbor) {
                            row.insert(index);
                        }
                    }
                }
                row
            })
            .collect();

        Self {
            tile_types,
            indices,
            allowed,
        }
    }

    /// Number of indexed tile types
    pub fn len(&self) -> usize {
        self.tile_types.len()
    }

    /// Whether the table has no tile types
    pub fn is_empty(&self) -> bool {
        self.tile_types.is_empty()
    }

    /// Dense index of `tile_type`
    pub fn index_of(&self, tile_type: &TileTypeId) -> Option<usize> {
        self.indices.get(tile_type).copied()
    }

    /// Tile type at dense `index`
    pub fn tile_type(&self, index: usize) -> Option<TileTypeId> {
        self.tile_types.get(index).copied()
    }

    /// Indexed tile types in ascending order
    pub fn tile_types(&self) -> &[TileTypeId] {
        &self.tile_types
    }

    /// Permitted neighbor indices of the tile at `index`
    pub fn allowed_neighbors(&self, index: usize) -> Option<&TileBitset> {
        self.allowed.get(index)
    }

    /// Whether `neighbor` may sit orthogonally next to `tile_type`
    pub fn allows(&self, tile_type: &TileTypeId, neighbor: &TileTypeId) -> bool {
        match (self.index_of(tile_type), self.index_of(neighbor)) {
            (Some(from), Some(to)) => self
                .allowed
                .get(from)
                .is_some_and(|row| row.contains(to)),
            _ => false,
        }
    }

    /// Fraction of all tile pairs that are permitted
    pub fn density(&self) -> f64 {
        let cells = self.len() * self.len();
        if cells == 0 {
            return 0.0;
        }
        let permitted: usize = self.allowed.iter().map(TileBitset::count).sum();
        permitted as f64 / cells as f64
    }

    /// Rows of the compatibility matrix paired with their tile types
    pub fn rows(&self) -> impl Iterator<Item = (TileTypeId, &TileBitset)> {
        self.tile_types.iter().copied().zip(self.allowed.iter())
    }
}
