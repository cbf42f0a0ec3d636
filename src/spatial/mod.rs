//! Spatial data structures for chunked tile worlds
//!
//! This module contains spatial-related functionality including:
//! - Integer coordinates shared by cell positions and tile type identifiers
//! - The read-only chunk interface and its dense grid implementation

/// Chunk interface and dense grid chunks
pub mod chunk;
/// Grid coordinates and orthogonal neighborhoods
pub mod coordinate;

pub use chunk::{Chunk, GridChunk};
pub use coordinate::{Coordinate, TileTypeId};
