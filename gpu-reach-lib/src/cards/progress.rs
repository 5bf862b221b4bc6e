/// Receives progress updates from long-running pipeline phases.
pub trait Progress: Send + Sync {
    /// Set the label of the current phase (e.g. "Downloading", "Unifying").
    fn set_phase(&self, phase: &str);

    /// Report progress through a callback returning `(total, current, message)`.
    fn set_determinate(&self, callback: Box<dyn Fn() -> (u64, u64, String) + Send + Sync + 'static>);

    /// Report progress through a message-only callback, for work of unknown size.
    fn set_indeterminate(&self, callback: Box<dyn Fn() -> String + Send + Sync + 'static>);

    /// Finish and clear the progress indicator.
    fn done(&self);
}

/// Discards all progress updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn set_phase(&self, _phase: &str) {}

    fn set_determinate(&self, _callback: Box<dyn Fn() -> (u64, u64, String) + Send + Sync + 'static>) {}

    fn set_indeterminate(&self, _callback: Box<dyn Fn() -> String + Send + Sync + 'static>) {}

    fn done(&self) {}
}
