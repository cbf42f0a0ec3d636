//! Global aggregation of per-chunk adjacency, sequential and concurrent

/// Parallel scan-and-merge over all chunks
pub mod concurrent;
/// In-order fold over all chunks
pub mod sequential;

pub use concurrent::{
    ConcurrencyConfig, aggregate_concurrent, aggregate_concurrent_with, merge_partials,
};
pub use sequential::aggregate_sequential;
