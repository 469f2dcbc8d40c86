//! Progress callbacks emitted by the pipelines.

/// Receives progress events while a download runs.
///
/// Implementations must be cheap: events arrive once per archive batch and
/// once per counted game.
pub trait ProgressReporter: Send + Sync {
    /// A monthly archive (or the single stream) is about to be fetched.
    fn batch_started(&self, _label: &str) {}

    /// A monthly archive was skipped because it lies outside the date window.
    fn batch_skipped(&self, _label: &str) {}

    /// Running number of games written so far.
    fn games_counted(&self, _total: u64) {}

    /// The download finished with `total` games.
    fn finished(&self, _total: u64) {}
}

/// Progress reporter that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {}
