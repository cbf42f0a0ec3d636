//! Error types and context management for adjacency extraction

use crate::spatial::{Coordinate, TileTypeId};
use std::fmt;
use std::path::PathBuf;

/// Main error type for all extraction operations
#[derive(Debug)]
pub enum AdjacencyError {
    /// Failed to load a chunk image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source data doesn't meet extraction requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A chunk returned malformed or inconsistent cell data while being scanned
    ChunkRead {
        /// Index of the chunk within the analysed collection, once known
        chunk: Option<usize>,
        /// Cell being read when the failure occurred
        position: Coordinate,
        /// Description of the inconsistency
        reason: String,
    },

    /// Sequential and concurrent aggregation disagree
    Divergence {
        /// Tile types whose neighbor sets differ between the two results
        tile_types: Vec<TileTypeId>,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AdjacencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ChunkRead {
                chunk,
                position,
                reason,
            } => match chunk {
                Some(index) => write!(f, "Failed to read chunk {index} at {position}: {reason}"),
                None => write!(f, "Failed to read chunk at {position}: {reason}"),
            },
            Self::Divergence { tile_types } => {
                let listed = tile_types
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                write!(
                    f,
                    "Sequential and concurrent results differ for {} tile type(s): {listed}",
                    tile_types.len()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AdjacencyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for extraction results
pub type Result<T> = std::result::Result<T, AdjacencyError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Index of the chunk being processed
    pub chunk: Option<usize>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with extraction state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the chunk index
    ///
    /// # Errors
    ///
    /// Propagates the original error with the chunk index applied
    fn with_chunk(self, chunk: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AdjacencyError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only chunk read failures carry a chunk index
            if let AdjacencyError::ChunkRead { chunk, .. } = &mut error {
                if chunk.is_none() {
                    *chunk = context.chunk;
                }
            }
            error
        })
    }

    fn with_chunk(self, chunk: usize) -> Result<T> {
        self.with_context(ErrorContext {
            chunk: Some(chunk),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for AdjacencyError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AdjacencyError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AdjacencyError {
    AdjacencyError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a chunk read error without a chunk index
///
/// Aggregators attach the index through [`WithContext::with_chunk`].
pub fn chunk_read_error(position: Coordinate, reason: &impl ToString) -> AdjacencyError {
    AdjacencyError::ChunkRead {
        chunk: None,
        position,
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source_data(reason: &impl ToString) -> AdjacencyError {
    AdjacencyError::InvalidSourceData {
        reason: reason.to_string(),
    }
}
