//! Terminal progress for candidate loading and tile composition

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::library::TileHandle;
use crate::mosaic::TileObserver;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static LOADING_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg:>10}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static TILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg:>10}} [{{bar:{PROGRESS_BAR_WIDTH}.green/blue}}] {{pos}}/{{len}} tiles ({{per_sec}})"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bars for the two phases of a mosaic build
pub struct ProgressManager {
    multi_progress: MultiProgress,
    bars: Vec<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager drawing to the terminal
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            bars: Vec::new(),
        }
    }

    /// Bar advanced once per decoded candidate
    pub fn start_loading(&mut self, candidate_count: usize) -> ProgressBar {
        self.add_bar(candidate_count as u64, &LOADING_STYLE, "candidates")
    }

    /// Bar advanced once per composited tile
    pub fn start_composing(&mut self, tile_count: u64) -> ProgressBar {
        self.add_bar(tile_count, &TILE_STYLE, "mosaic")
    }

    /// Number of bars started so far
    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    /// Check if every started bar has been finished
    pub fn all_finished(&self) -> bool {
        self.bars.iter().all(ProgressBar::is_finished)
    }

    /// Run `f` with the bars hidden so its terminal output is not overdrawn
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.multi_progress.suspend(f)
    }

    /// Mark every bar complete and clear the display
    pub fn finish(&self) {
        for bar in &self.bars {
            bar.finish();
        }
        let _ = self.multi_progress.clear();
    }

    fn add_bar(&mut self, length: u64, style: &ProgressStyle, label: &'static str) -> ProgressBar {
        let bar = self.multi_progress.add(ProgressBar::new(length));
        bar.set_style(style.clone());
        bar.set_message(label);
        self.bars.push(bar.clone());
        bar
    }
}

/// Run `f` with `bar` hidden, or directly when there is no bar
pub fn suspend_bar<F: FnOnce() -> R, R>(bar: Option<&ProgressBar>, f: F) -> R {
    match bar {
        Some(bar) => bar.suspend(f),
        None => f(),
    }
}

impl TileObserver for ProgressBar {
    fn tile_composited(&self, _tile_x: u32, _tile_y: u32, _handle: TileHandle) {
        self.inc(1);
    }
}
