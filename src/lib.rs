//! Tile adjacency constraint extraction for constraint-propagation tile generators
//!
//! Chunked tile grids are scanned for orthogonal neighbor relations and merged
//! into one map from each tile type to every tile type observed next to it.
//! Sequential and concurrent aggregation produce identical maps.

#![forbid(unsafe_code)]

/// Sequential and concurrent aggregation over chunk collections
pub mod algorithm;
/// Per-chunk adjacency scanning and map representations
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Coordinates and chunk data sources
pub mod spatial;

pub use algorithm::{aggregate_concurrent, aggregate_sequential};
pub use analysis::AdjacencyMap;
pub use io::error::{AdjacencyError, Result};
