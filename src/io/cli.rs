//! Command-line interface for extracting adjacency constraints from chunk images

use crate::algorithm::{ConcurrencyConfig, aggregate_concurrent_with, aggregate_sequential};
use crate::analysis::AdjacencyMap;
use crate::analysis::constraints::ConstraintTable;
use crate::io::configuration::{
    CHUNK_EXTENSION, DEFAULT_ATLAS_COLUMNS, DEFAULT_OUTPUT_NAME, MATRIX_SUFFIX,
};
use crate::io::error::{AdjacencyError, Result, invalid_parameter};
use crate::io::image::load_chunks;
use crate::io::progress::ProgressManager;
use crate::io::report::{render_matrix, write_adjacency, write_matrix};
use crate::spatial::Chunk;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Which aggregation path to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum AggregationMode {
    /// Scan chunks one after another
    Sequential,
    /// Scan chunks in parallel and merge
    Concurrent,
    /// Run both paths and fail if they disagree
    #[default]
    Both,
}

#[derive(Parser)]
#[command(name = "tileadjacency")]
#[command(
    author,
    version,
    about = "Extract tile adjacency constraints from chunk images"
)]
/// Command-line arguments for the adjacency extraction tool
pub struct Cli {
    /// Chunk PNG file or directory of chunk PNGs
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Aggregation path to run
    #[arg(short, long, value_enum, default_value_t = AggregationMode::Both)]
    pub mode: AggregationMode,

    /// Worker threads for concurrent aggregation (defaults to one per core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Atlas width used to assign tile type coordinates to palette colours
    #[arg(short, long, default_value_t = DEFAULT_ATLAS_COLUMNS)]
    pub atlas_columns: u32,

    /// Write the adjacency listing here instead of stdout (directories get adjacency.txt)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also emit the dense compatibility matrix
    #[arg(short = 'M', long)]
    pub matrix: bool,

    /// Suppress progress output and the summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Worker pool settings derived from the arguments
    pub const fn concurrency_config(&self) -> ConcurrencyConfig {
        ConcurrencyConfig {
            threads: self.threads,
        }
    }
}

/// Result of running one or both aggregation paths
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// The global adjacency map
    pub adjacency: AdjacencyMap,
    /// Wall time of the sequential path, if it ran
    pub sequential_elapsed: Option<Duration>,
    /// Wall time of the concurrent path, if it ran
    pub concurrent_elapsed: Option<Duration>,
}

/// Run the requested aggregation path(s) over `chunks`
///
/// In [`AggregationMode::Both`] the concurrent result is compared key by key
/// against the sequential one.
///
/// # Errors
///
/// Returns an error if a chunk fails to scan, the worker pool cannot be built,
/// or the two paths disagree
pub fn analyze<C: Chunk + Sync>(
    chunks: &[C],
    mode: AggregationMode,
    config: &ConcurrencyConfig,
) -> Result<AnalysisOutcome> {
    let run_sequential = || -> Result<(AdjacencyMap, Duration)> {
        let start = Instant::now();
        let adjacency = aggregate_sequential(chunks)?;
        Ok((adjacency, start.elapsed()))
    };
    let run_concurrent = || -> Result<(AdjacencyMap, Duration)> {
        let start = Instant::now();
        let adjacency = aggregate_concurrent_with(chunks, config)?;
        Ok((adjacency, start.elapsed()))
    };

    match mode {
        AggregationMode::Sequential => {
            let (adjacency, elapsed) = run_sequential()?;
            Ok(AnalysisOutcome {
                adjacency,
                sequential_elapsed: Some(elapsed),
                concurrent_elapsed: None,
            })
        }
        AggregationMode::Concurrent => {
            let (adjacency, elapsed) = run_concurrent()?;
            Ok(AnalysisOutcome {
                adjacency,
                sequential_elapsed: None,
                concurrent_elapsed: Some(elapsed),
            })
        }
        AggregationMode::Both => {
            let (sequential, sequential_elapsed) = run_sequential()?;
            let (concurrent, concurrent_elapsed) = run_concurrent()?;

            let tile_types = sequential.divergence(&concurrent);
            if !tile_types.is_empty() {
                return Err(AdjacencyError::Divergence { tile_types });
            }

            Ok(AnalysisOutcome {
                adjacency: sequential,
                sequential_elapsed: Some(sequential_elapsed),
                concurrent_elapsed: Some(concurrent_elapsed),
            })
        }
    }
}

/// Loads chunk images, aggregates them and emits the results
pub struct ChunkAnalyzer {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl ChunkAnalyzer {
    /// Create a new analyzer with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Run the full extraction according to the CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, chunk loading, aggregation or
    /// output writing fails
    pub fn process(&mut self) -> Result<AnalysisOutcome> {
        let files = self.collect_files()?;

        let (_palette, chunks) =
            load_chunks(&files, self.cli.atlas_columns, self.progress_manager.as_mut())?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_stage(&format!("aggregating {} chunks", chunks.len()));
        }

        let outcome = analyze(&chunks, self.cli.mode, &self.cli.concurrency_config())?;

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        self.emit(&outcome.adjacency)?;

        if !self.cli.quiet {
            Self::report_summary(chunks.len(), &outcome);
        }

        Ok(outcome)
    }

    /// Chunk files named by the target, sorted by path
    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if has_chunk_extension(target) {
                Ok(vec![target.clone()])
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"target file must be a PNG image",
                ))
            }
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target).map_err(|e| AdjacencyError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            })?;
            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if path.is_file() && has_chunk_extension(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be a PNG file or directory",
            ))
        }
    }

    // Stdout carries the listing when no output path is given
    #[allow(clippy::print_stdout)]
    fn emit(&self, adjacency: &AdjacencyMap) -> Result<()> {
        let table = self
            .cli
            .matrix
            .then(|| ConstraintTable::from_adjacency(adjacency));

        match &self.cli.output {
            Some(output) => {
                let listing_path = resolve_output_path(output);
                write_adjacency(adjacency, &listing_path)?;
                if let Some(ref table) = table {
                    write_matrix(table, matrix_path(&listing_path))?;
                }
            }
            None => {
                print!("{adjacency}");
                if let Some(ref table) = table {
                    print!("{}", render_matrix(table));
                }
            }
        }

        Ok(())
    }

    // Allow print for user feedback once extraction has finished
    #[allow(clippy::print_stderr)]
    fn report_summary(chunk_count: usize, outcome: &AnalysisOutcome) {
        eprintln!(
            "{chunk_count} chunks, {} tile types, {} adjacency relations",
            outcome.adjacency.len(),
            outcome.adjacency.relation_count()
        );
        if let Some(elapsed) = outcome.sequential_elapsed {
            eprintln!("sequential: {elapsed:.2?}");
        }
        if let Some(elapsed) = outcome.concurrent_elapsed {
            eprintln!("concurrent: {elapsed:.2?}");
        }
    }
}

fn has_chunk_extension(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(CHUNK_EXTENSION)
}

/// Listing path for an `--output` argument; directories receive the default file name
pub fn resolve_output_path(output: &Path) -> PathBuf {
    if output.is_dir() {
        output.join(DEFAULT_OUTPUT_NAME)
    } else {
        output.to_path_buf()
    }
}

/// Matrix path derived from the listing path: `adjacency.txt` -> `adjacency_matrix.txt`
pub fn matrix_path(listing_path: &Path) -> PathBuf {
    let stem = listing_path.file_stem().unwrap_or_default();
    let matrix_name = match listing_path.extension() {
        Some(extension) => format!(
            "{}{MATRIX_SUFFIX}.{}",
            stem.to_string_lossy(),
            extension.to_string_lossy()
        ),
        None => format!("{}{MATRIX_SUFFIX}", stem.to_string_lossy()),
    };

    if let Some(parent) = listing_path.parent() {
        parent.join(matrix_name)
    } else {
        PathBuf::from(matrix_name)
    }
}
