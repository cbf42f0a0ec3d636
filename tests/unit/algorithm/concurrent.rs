//! Tests for parallel scanning and the fan-in merge

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use tileadjacency::AdjacencyError;
    use tileadjacency::algorithm::{
        ConcurrencyConfig, aggregate_concurrent, aggregate_concurrent_with, aggregate_sequential,
        merge_partials,
    };
    use tileadjacency::analysis::{AdjacencyMap, NeighborSet, scan_chunk};
    use tileadjacency::spatial::{Coordinate, GridChunk};

    fn tile(symbol: char) -> Coordinate {
        Coordinate::new(symbol as i32 - 'a' as i32, 0)
    }

    fn chunk(rows: &[&str]) -> GridChunk {
        let rows: Vec<Vec<Option<Coordinate>>> = rows
            .iter()
            .map(|row| row.chars().map(|c| (c != '.').then(|| tile(c))).collect())
            .collect();
        GridChunk::from_tile_rows(&rows).unwrap()
    }

    fn set(symbols: &str) -> NeighborSet {
        symbols.chars().map(tile).collect()
    }

    fn random_chunks(seed: u64, count: usize) -> Vec<GridChunk> {
        let mut rng = StdRng::seed_from_u64(seed);
        let palette: Vec<Coordinate> = (0..6).map(|i| Coordinate::new(i % 3, i / 3)).collect();
        (0..count)
            .map(|_| GridChunk::random(&mut rng, 8, 8, palette.clone(), 0.6))
            .collect()
    }

    // Tests the literal first-entry-wins scenario
    // Verified by reducing each group to its first member
    #[test]
    fn test_cross_chunk_union() {
        let chunks = vec![chunk(&["xy"]), chunk(&["xz"])];
        let adjacency = aggregate_concurrent(&chunks).unwrap();

        assert_eq!(adjacency.get(&tile('x')), Some(&set("yz")));
    }

    // Tests concurrent output equals sequential output
    // Verified by dropping the last partial map before merging
    #[test]
    fn test_matches_sequential() {
        for seed in 0..5 {
            let chunks = random_chunks(seed, 12);
            let sequential = aggregate_sequential(&chunks).unwrap();
            let concurrent = aggregate_concurrent(&chunks).unwrap();
            assert_eq!(sequential, concurrent, "seed {seed}");
        }
    }

    // Tests permutations of the chunks do not change the result
    // Verified by merging partial maps with insert instead of union
    #[test]
    fn test_permutation_independence() {
        let mut chunks = random_chunks(11, 10);
        let expected = aggregate_sequential(&chunks).unwrap();
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..5 {
            chunks.shuffle(&mut rng);
            assert_eq!(aggregate_concurrent(&chunks).unwrap(), expected);
        }
    }

    // Tests merging is independent of partial map order
    // Verified by letting the last partial overwrite shared keys
    #[test]
    fn test_merge_partials_order() {
        let partials: Vec<AdjacencyMap> = [chunk(&["ab"]), chunk(&["ac"]), chunk(&["a", "d"])]
            .iter()
            .map(|c| scan_chunk(c).unwrap())
            .collect();

        let forward = merge_partials(partials.clone());
        let backward = merge_partials(partials.into_iter().rev());

        assert_eq!(forward, backward);
        assert_eq!(forward.get(&tile('a')), Some(&set("bcd")));
    }

    // Tests empty input produces an empty map
    // Verified by returning an error on empty input
    #[test]
    fn test_no_chunks() {
        let chunks: Vec<GridChunk> = Vec::new();
        assert!(aggregate_concurrent(&chunks).unwrap().is_empty());
        assert!(merge_partials(Vec::new()).is_empty());
    }

    // Tests a single failing chunk fails the whole aggregation
    // Verified by filtering out failed partial maps
    #[test]
    fn test_failure_is_fail_fast() {
        let mut chunks = random_chunks(5, 6);
        chunks.insert(3, GridChunk::new(Array2::from_elem((2, 2), 50), vec![tile('a')]));

        let result = aggregate_concurrent(&chunks);
        assert!(matches!(
            result,
            Err(AdjacencyError::ChunkRead { chunk: Some(3), .. })
        ));
    }

    // Tests a dedicated pool produces the same map
    // Verified by ignoring the configured pool
    #[test]
    fn test_dedicated_pool() {
        let chunks = random_chunks(21, 9);
        let expected = aggregate_sequential(&chunks).unwrap();

        for threads in [1, 3] {
            let config = ConcurrencyConfig {
                threads: Some(threads),
            };
            assert_eq!(aggregate_concurrent_with(&chunks, &config).unwrap(), expected);
        }
        assert_eq!(
            aggregate_concurrent_with(&chunks, &ConcurrencyConfig::default()).unwrap(),
            expected
        );
    }

    // Tests zero threads are rejected
    // Verified by passing zero through to rayon
    #[test]
    fn test_zero_threads_rejected() {
        let config = ConcurrencyConfig { threads: Some(0) };
        assert!(matches!(
            config.build_pool(),
            Err(AdjacencyError::InvalidParameter {
                parameter: "threads",
                ..
            })
        ));
        assert!(matches!(ConcurrencyConfig::default().build_pool(), Ok(None)));
    }
}
