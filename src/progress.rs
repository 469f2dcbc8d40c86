//! Progress UI (spinner) for download runs.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use pgn_downloader::ProgressReporter;

/// Spinner showing the current batch and the running game count.
pub(crate) struct SpinnerProgress {
    spinner: ProgressBar,
    label: Mutex<String>,
}

impl SpinnerProgress {
    /// Creates a ticking spinner on stderr.
    pub(crate) fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self::with_bar(spinner)
    }

    fn with_bar(spinner: ProgressBar) -> Self {
        Self {
            spinner,
            label: Mutex::new(String::new()),
        }
    }

    fn set_label(&self, label: &str) {
        let mut current = self
            .label
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *current = label.to_string();
    }

    fn render(&self, games: u64) {
        let label = self
            .label
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let noun = if games == 1 { "game" } else { "games" };
        self.spinner.set_message(format!("[{label}] {games} {noun}"));
    }
}

impl ProgressReporter for SpinnerProgress {
    fn batch_started(&self, label: &str) {
        self.set_label(label);
        self.spinner.set_message(format!("[{label}] downloading..."));
    }

    fn batch_skipped(&self, label: &str) {
        self.spinner.set_message(format!("[{label}] outside date range"));
    }

    fn games_counted(&self, total: u64) {
        self.render(total);
    }

    fn finished(&self, _total: u64) {
        self.spinner.finish_and_clear();
    }
}
