//! Sequential aggregation of chunk adjacency

use crate::analysis::{AdjacencyMap, scan_chunk};
use crate::io::error::{Result, WithContext};
use crate::spatial::Chunk;

/// Scan chunks one at a time, in order, folding each into a running map
///
/// Each chunk is fully scanned and merged before the next is read. Zero
/// chunks yield an empty map.
///
/// # Errors
///
/// Stops at the first chunk that fails to scan and returns its error,
/// tagged with the chunk's index
pub fn aggregate_sequential<C: Chunk>(chunks: &[C]) -> Result<AdjacencyMap> {
    let mut adjacency = AdjacencyMap::new();

    for (index, chunk) in chunks.iter().enumerate() {
        let partial = scan_chunk(chunk).with_chunk(index)?;
        adjacency.absorb(partial);
    }

    Ok(adjacency)
}
