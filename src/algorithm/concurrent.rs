//! Concurrent fan-out scan with a single-threaded fan-in merge
//!
//! Every chunk is scanned by its own rayon task into a task-local partial map.
//! Nothing is shared between tasks; partial maps are only combined after all
//! tasks have joined.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::analysis::{AdjacencyMap, scan_chunk};
use crate::io::error::{Result, WithContext, invalid_parameter};
use crate::spatial::Chunk;

/// Worker pool settings for concurrent aggregation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConcurrencyConfig {
    /// Worker thread count; `None` uses the global rayon pool
    pub threads: Option<usize>,
}

impl ConcurrencyConfig {
    /// Build a dedicated pool when a thread count is configured
    ///
    /// # Errors
    ///
    /// Returns an error if the thread count is zero or the pool cannot be created
    pub fn build_pool(&self) -> Result<Option<ThreadPool>> {
        let Some(threads) = self.threads else {
            return Ok(None);
        };
        if threads == 0 {
            return Err(invalid_parameter(
                "threads",
                &threads,
                &"must be at least 1",
            ));
        }

        ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("chunk-scan-{index}"))
            .build()
            .map(Some)
            .map_err(|e| invalid_parameter("threads", &threads, &e))
    }
}

/// Scan all chunks in parallel and merge their partial maps
///
/// Runs on the current rayon pool. The result is set-equal to
/// [`aggregate_sequential`](crate::algorithm::sequential::aggregate_sequential)
/// over the same chunks, whatever order the tasks complete in.
///
/// # Errors
///
/// Fails as a whole if any chunk fails to scan; no partial map is returned.
/// Tasks already running are not interrupted but their results are dropped.
pub fn aggregate_concurrent<C: Chunk + Sync>(chunks: &[C]) -> Result<AdjacencyMap> {
    let partials: Vec<AdjacencyMap> = chunks
        .par_iter()
        .enumerate()
        .map(|(index, chunk)| scan_chunk(chunk).with_chunk(index))
        .collect::<Result<_>>()?;

    Ok(merge_partials(partials))
}

/// Run [`aggregate_concurrent`] under the given pool configuration
///
/// # Errors
///
/// Returns an error if the pool cannot be built or any chunk fails to scan
pub fn aggregate_concurrent_with<C: Chunk + Sync>(
    chunks: &[C],
    config: &ConcurrencyConfig,
) -> Result<AdjacencyMap> {
    match config.build_pool()? {
        Some(pool) => pool.install(|| aggregate_concurrent(chunks)),
        None => aggregate_concurrent(chunks),
    }
}

/// Merge partial maps into one by per-key set union
///
/// Entries are flattened and regrouped by tile type; each group reduces to the
/// union of all its neighbor sets, never to a single member.
pub fn merge_partials<I>(partials: I) -> AdjacencyMap
where
    I: IntoIterator<Item = AdjacencyMap>,
{
    partials
        .into_iter()
        .flat_map(AdjacencyMap::into_entries)
        .collect()
}
