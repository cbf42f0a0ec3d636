//! Adjacency extraction from individual chunks and its downstream encodings

/// Adjacency maps and union-based merging
pub mod adjacency;
/// Fixed-size bitsets over dense tile indices
pub mod bitset;
/// Dense constraint tables for tile generators
pub mod constraints;
/// Local adjacency scan of a single chunk
pub mod scanner;

pub use adjacency::{AdjacencyMap, NeighborSet};
pub use scanner::scan_chunk;
