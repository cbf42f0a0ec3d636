//! CLI entry point for tile adjacency extraction

use clap::Parser;
use tileadjacency::io::cli::{ChunkAnalyzer, Cli};

fn main() -> tileadjacency::Result<()> {
    let cli = Cli::parse();
    let mut analyzer = ChunkAnalyzer::new(cli);
    analyzer.process().map(|_outcome| ())
}
