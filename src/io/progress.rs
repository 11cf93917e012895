//! Generation progress display for a running search

use crate::search::{GenerationStats, Objective};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static GENERATION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {prefix} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar advanced once per evaluated generation
///
/// Shows the best fitness found so far next to the bar. A hidden tracker
/// keeps the same bookkeeping without drawing.
pub struct GenerationProgress {
    bar: ProgressBar,
    best: Option<f64>,
    objective: Objective,
}

impl GenerationProgress {
    /// Create a visible bar for `generations` steps labelled with `label`
    pub fn new(generations: usize, label: &str, objective: Objective) -> Self {
        let bar = ProgressBar::new(generations as u64);
        bar.set_style(GENERATION_STYLE.clone());
        bar.set_prefix(label.to_string());
        Self {
            bar,
            best: None,
            objective,
        }
    }

    /// Create a tracker that never draws
    pub fn hidden(generations: usize, objective: Objective) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(generations as u64);
        Self {
            bar,
            best: None,
            objective,
        }
    }

    /// Record a finished generation
    pub fn update(&mut self, stats: &GenerationStats) {
        let improved = self
            .best
            .is_none_or(|best| self.objective.is_better(stats.best, best));
        if improved {
            self.best = Some(stats.best);
        }
        self.bar.set_position(stats.generation as u64 + 1);
        if let Some(best) = self.best {
            self.bar.set_message(format!("best {best:.6}"));
        }
    }

    /// Best fitness reported so far
    pub const fn best(&self) -> Option<f64> {
        self.best
    }

    /// Generations completed so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
