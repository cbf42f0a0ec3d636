//! Text export of adjacency maps and compatibility matrices

use std::fmt::Write as _;
use std::path::Path;

use crate::analysis::AdjacencyMap;
use crate::analysis::constraints::ConstraintTable;
use crate::io::error::{AdjacencyError, Result};

/// Render the compatibility matrix of a constraint table
///
/// The header lists tile types in index order; each following line holds one
/// tile type and a `0`/`1` row over the same order.
pub fn render_matrix(table: &ConstraintTable) -> String {
    let mut output = String::new();
    let header = table
        .tile_types()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(output, "# {header}");
    for (tile_type, row) in table.rows() {
        let _ = writeln!(output, "{tile_type} {row}");
    }
    output
}

/// Write the sorted adjacency listing to `path`
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written
pub fn write_adjacency<P: AsRef<Path>>(adjacency: &AdjacencyMap, path: P) -> Result<()> {
    write_text(path.as_ref(), &adjacency.to_string())
}

/// Write the compatibility matrix of `table` to `path`
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written
pub fn write_matrix<P: AsRef<Path>>(table: &ConstraintTable, path: P) -> Result<()> {
    write_text(path.as_ref(), &render_matrix(table))
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| AdjacencyError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    std::fs::write(path, contents).map_err(|e| AdjacencyError::FileSystem {
        path: path.to_path_buf(),
        operation: "write",
        source: e,
    })
}
