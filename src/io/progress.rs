//! Progress display for chunk loading and aggregation stages

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Coordinates a chunk-file progress bar and a stage spinner
pub struct ProgressManager {
    multi_progress: MultiProgress,
    file_bar: Option<ProgressBar>,
    stage_spinner: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static FILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Chunks: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            file_bar: None,
            stage_spinner: None,
        }
    }

    /// Create the file bar for `file_count` chunk files
    pub fn initialize(&mut self, file_count: usize) {
        let bar = ProgressBar::new(file_count as u64);
        bar.set_style(FILE_STYLE.clone());
        self.file_bar = Some(self.multi_progress.add(bar));
    }

    /// Show the chunk file currently being read
    pub fn start_file(&self, path: &Path) {
        if let Some(ref bar) = self.file_bar {
            let display_name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            bar.set_message(display_name);
        }
    }

    /// Advance the file bar by one completed chunk
    pub fn complete_file(&self) {
        if let Some(ref bar) = self.file_bar {
            bar.inc(1);
        }
    }

    /// Replace the stage spinner message, creating the spinner on first use
    pub fn start_stage(&mut self, message: &str) {
        let spinner = self.stage_spinner.get_or_insert_with(|| {
            let spinner = self.multi_progress.add(ProgressBar::new_spinner());
            spinner.set_style(STAGE_STYLE.clone());
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner
        });
        spinner.set_message(message.to_string());
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref bar) = self.file_bar {
            bar.finish_with_message("all chunks loaded");
        }
        if let Some(ref spinner) = self.stage_spinner {
            spinner.finish_and_clear();
        }
        let _ = self.multi_progress.clear();
    }
}
