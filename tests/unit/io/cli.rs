//! Tests for command-line parsing and the analysis orchestration

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tileadjacency::AdjacencyError;
    use tileadjacency::algorithm::ConcurrencyConfig;
    use tileadjacency::io::cli::{
        AggregationMode, ChunkAnalyzer, Cli, analyze, matrix_path, resolve_output_path,
    };
    use tileadjacency::io::configuration::DEFAULT_ATLAS_COLUMNS;
    use tileadjacency::spatial::{Coordinate, GridChunk};

    fn write_chunk(path: &Path, rows: &[&[[u8; 4]]]) {
        let mut image = RgbaImage::new(rows[0].len() as u32, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, &color) in row.iter().enumerate() {
                image.put_pixel(x as u32, y as u32, Rgba(color));
            }
        }
        image.save(path).unwrap();
    }

    // Tests CLI parsing with only the required target
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "chunks"]);

        assert_eq!(cli.target, PathBuf::from("chunks"));
        assert_eq!(cli.mode, AggregationMode::Both);
        assert_eq!(cli.atlas_columns, DEFAULT_ATLAS_COLUMNS);
        assert_eq!(cli.threads, None);
        assert!(cli.output.is_none());
        assert!(!cli.matrix);
        assert!(cli.should_show_progress());
    }

    // Tests CLI parsing with all available arguments
    // Verified by renaming a long flag
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "chunk.png",
            "--mode",
            "concurrent",
            "--threads",
            "4",
            "--atlas-columns",
            "8",
            "--output",
            "out.txt",
            "--matrix",
            "--quiet",
        ]);

        assert_eq!(cli.mode, AggregationMode::Concurrent);
        assert_eq!(cli.concurrency_config(), ConcurrencyConfig { threads: Some(4) });
        assert_eq!(cli.atlas_columns, 8);
        assert_eq!(cli.output, Some(PathBuf::from("out.txt")));
        assert!(cli.matrix);
        assert!(!cli.should_show_progress());
    }

    // Tests invalid modes are rejected by the parser
    // Verified by accepting arbitrary mode strings
    #[test]
    fn test_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["program", "x", "--mode", "fastest"]).is_err());
    }

    // Tests each mode records the timings it ran
    // Verified by always running both paths
    #[test]
    fn test_analyze_modes() {
        let a = Coordinate::new(0, 0);
        let b = Coordinate::new(1, 0);
        let chunks = vec![
            GridChunk::from_tile_rows(&[vec![Some(a), Some(b)]]).unwrap(),
            GridChunk::from_tile_rows(&[vec![Some(a)], vec![Some(a)]]).unwrap(),
        ];
        let config = ConcurrencyConfig::default();

        let sequential = analyze(&chunks, AggregationMode::Sequential, &config).unwrap();
        assert!(sequential.sequential_elapsed.is_some());
        assert!(sequential.concurrent_elapsed.is_none());

        let concurrent = analyze(&chunks, AggregationMode::Concurrent, &config).unwrap();
        assert!(concurrent.sequential_elapsed.is_none());
        assert_eq!(concurrent.adjacency, sequential.adjacency);

        let both = analyze(&chunks, AggregationMode::Both, &config).unwrap();
        assert!(both.sequential_elapsed.is_some() && both.concurrent_elapsed.is_some());
        assert_eq!(both.adjacency.get(&a).map(|set| set.len()), Some(2));
    }

    // Tests output path helpers
    // Verified by appending the suffix after the extension
    #[test]
    fn test_output_paths() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            resolve_output_path(dir.path()),
            dir.path().join("adjacency.txt")
        );
        assert_eq!(
            resolve_output_path(Path::new("out/rules.txt")),
            PathBuf::from("out/rules.txt")
        );
        assert_eq!(
            matrix_path(Path::new("out/rules.txt")),
            PathBuf::from("out/rules_matrix.txt")
        );
        assert_eq!(matrix_path(Path::new("rules")), PathBuf::from("rules_matrix"));
    }

    // Tests a directory of chunk images end to end
    // Verified by skipping the listing write
    #[test]
    fn test_process_directory() {
        let dir = tempfile::tempdir().unwrap();
        let red = [255, 0, 0, 255];
        let blue = [0, 0, 255, 255];
        let clear = [0, 0, 0, 0];
        write_chunk(&dir.path().join("chunk_0.png"), &[&[red, blue]]);
        write_chunk(&dir.path().join("chunk_1.png"), &[&[red, clear], &[red, clear]]);
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let output = dir.path().join("out/adjacency.txt");
        let cli = Cli::parse_from([
            "program".into(),
            dir.path().as_os_str().to_owned(),
            "--output".into(),
            output.as_os_str().to_owned(),
            "--matrix".into(),
            "--quiet".into(),
        ]);

        let outcome = ChunkAnalyzer::new(cli).process().unwrap();

        // blue sorts before red: blue -> (0, 0), red -> (1, 0)
        let blue_type = Coordinate::new(0, 0);
        let red_type = Coordinate::new(1, 0);
        assert_eq!(outcome.adjacency.len(), 2);
        assert!(outcome.adjacency.allows(&red_type, &red_type));
        assert!(outcome.adjacency.allows(&red_type, &blue_type));

        let listing = fs::read_to_string(&output).unwrap();
        assert_eq!(listing, "(0, 0): (1, 0)\n(1, 0): (0, 0) (1, 0)\n");
        assert!(dir.path().join("out/adjacency_matrix.txt").exists());
    }

    // Tests an empty directory yields an empty map
    // Verified by treating no chunks as an error
    #[test]
    fn test_process_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("adjacency.txt");
        let cli = Cli::parse_from([
            "program".into(),
            dir.path().as_os_str().to_owned(),
            "-o".into(),
            output.as_os_str().to_owned(),
            "-q".into(),
        ]);

        let outcome = ChunkAnalyzer::new(cli).process().unwrap();
        assert!(outcome.adjacency.is_empty());
        assert_eq!(fs::read_to_string(&output).unwrap(), "");
    }

    // Tests non-PNG targets are rejected
    // Verified by accepting any file extension
    #[test]
    fn test_rejects_non_png_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("chunk.bmp");
        fs::write(&target, "x").unwrap();

        let cli = Cli::parse_from(["program".into(), target.into_os_string(), "-q".into()]);
        let result = ChunkAnalyzer::new(cli).process();
        assert!(matches!(
            result,
            Err(AdjacencyError::InvalidParameter {
                parameter: "target",
                ..
            })
        ));
    }
}
