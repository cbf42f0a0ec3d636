//! Tests for adjacency listing and compatibility matrix export

#[cfg(test)]
mod tests {
    use std::fs;
    use tileadjacency::analysis::AdjacencyMap;
    use tileadjacency::analysis::constraints::ConstraintTable;
    use tileadjacency::io::report::{render_matrix, write_adjacency, write_matrix};
    use tileadjacency::spatial::Coordinate;

    const A: Coordinate = Coordinate::new(0, 0);
    const B: Coordinate = Coordinate::new(1, 0);

    fn sample_map() -> AdjacencyMap {
        let mut map = AdjacencyMap::new();
        map.union_entry(A, [B, A]);
        map.union_entry(B, []);
        map
    }

    // Tests the matrix rendering layout
    // Verified by transposing the rows
    #[test]
    fn test_render_matrix() {
        let table = ConstraintTable::from_adjacency(&sample_map());
        assert_eq!(
            render_matrix(&table),
            "# (0, 0) (1, 0)\n(0, 0) 11\n(1, 0) 00\n"
        );
    }

    // Tests listing is written into nested directories
    // Verified by skipping directory creation
    #[test]
    fn test_write_adjacency() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/adjacency.txt");

        write_adjacency(&sample_map(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "(0, 0): (0, 0) (1, 0)\n(1, 0):\n");
    }

    // Tests matrix file export
    // Verified by writing the listing instead
    #[test]
    fn test_write_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.txt");
        let table = ConstraintTable::from_adjacency(&sample_map());

        write_matrix(&table, &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, render_matrix(&table));
    }

    // Tests write failures are reported
    // Verified by ignoring the write result
    #[test]
    fn test_write_into_missing_parent_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let result = write_adjacency(&sample_map(), blocker.join("adjacency.txt"));
        assert!(result.is_err());
    }
}
