//! Extraction constants and runtime configuration defaults

/// Atlas width used to turn palette indices into tile type coordinates
pub const DEFAULT_ATLAS_COLUMNS: u32 = 16;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed chunk dimension in cells
pub const MAX_CHUNK_DIMENSION: usize = 10_000;

/// Pixels with alpha at or below this value are empty cells
pub const EMPTY_ALPHA_THRESHOLD: u8 = 0;

/// Extension of chunk image files
pub const CHUNK_EXTENSION: &str = "png";

/// Default output file for the adjacency listing
pub const DEFAULT_OUTPUT_NAME: &str = "adjacency.txt";
/// Suffix added to the adjacency output stem for the compatibility matrix
pub const MATRIX_SUFFIX: &str = "_matrix";

// Synthetic chunk defaults for benchmarks and randomized checks
/// Fixed seed for reproducible synthetic chunks
pub const DEFAULT_SEED: u64 = 42;
/// Fraction of occupied cells in synthetic chunks
pub const DEFAULT_FILL_RATIO: f64 = 0.8;
