//! Local adjacency scan over a single chunk

use crate::analysis::adjacency::{AdjacencyMap, NeighborSet};
use crate::io::error::{Result, chunk_read_error};
use crate::spatial::Chunk;

/// Build the adjacency map of one chunk in isolation
///
/// Visits every occupied cell, collects the tile types of its occupied
/// orthogonal neighbors and unions them into the entry for the cell's own tile
/// type. Unoccupied neighbors are skipped, so an isolated tile still gets an
/// entry with no neighbors. The result does not depend on visiting order.
///
/// # Errors
///
/// Returns a chunk read error if the chunk reports malformed cell data, or
/// lists a cell as occupied without a tile type for it
pub fn scan_chunk<C: Chunk + ?Sized>(chunk: &C) -> Result<AdjacencyMap> {
    let mut partial = AdjacencyMap::new();

    for cell in chunk.occupied_cells() {
        let tile_type = chunk
            .tile_type_at(cell)?
            .ok_or_else(|| chunk_read_error(cell, &"listed as occupied but holds no tile"))?;

        let mut neighbors = NeighborSet::new();
        for neighbor in chunk.orthogonal_neighbors(cell) {
            if !chunk.is_occupied(neighbor) {
                continue;
            }
            if let Some(neighbor_type) = chunk.tile_type_at(neighbor)? {
                neighbors.insert(neighbor_type);
            }
        }

        partial.union_entry(tile_type, neighbors);
    }

    Ok(partial)
}
