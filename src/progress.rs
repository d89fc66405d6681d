// src/progress.rs
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Lightweight progress reporting for a report run.
/// Front ends implement this to surface status to the operator.
pub trait Progress {
    /// Called at the start with the number of accounts to process.
    fn begin(&mut self, _total: usize) {}

    /// Free-form line for the operator log.
    fn log(&mut self, _msg: &str) {}

    /// One-line "what is happening now".
    fn update_status(&mut self, _msg: &str) {}

    /// An account's report was written.
    fn item_done(&mut self, _id: u32, _name: &str, _path: &Path) {}

    /// An account was abandoned.
    fn item_failed(&mut self, _id: u32, _name: &str, _error: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Point-in-time copy of a run's progress.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub total: usize,
    /// Accounts finished, successful or not. Never decreases.
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub status: String,
    /// Append-only operator log.
    pub lines: Vec<String>,
    pub written: Vec<PathBuf>,
    pub finished: bool,
}

impl ProgressSnapshot {
    /// Percent of accounts processed, 0 when nothing was planned.
    pub fn percent(&self) -> f64 {
        if self.total == 0 { 0.0 } else { self.processed as f64 * 100.0 / self.total as f64 }
    }
}

/// Progress sink whose state can be polled from another thread.
#[derive(Clone, Debug, Default)]
pub struct SharedProgress {
    inner: Arc<Mutex<ProgressSnapshot>>,
}

impl SharedProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ProgressSnapshot> {
        // a panicking worker must not hide what it already reported
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.state().clone()
    }

    /// Log lines appended after the first `seen`.
    pub fn lines_since(&self, seen: usize) -> Vec<String> {
        self.state().lines.iter().skip(seen).cloned().collect()
    }
}

impl Progress for SharedProgress {
    fn begin(&mut self, total: usize) {
        let mut st = self.state();
        st.total = total;
        st.finished = false;
    }
    fn log(&mut self, msg: &str) {
        self.state().lines.push(s!(msg));
    }
    fn update_status(&mut self, msg: &str) {
        self.state().status = s!(msg);
    }
    fn item_done(&mut self, _id: u32, name: &str, path: &Path) {
        let mut st = self.state();
        st.processed += 1;
        st.succeeded += 1;
        st.written.push(path.to_path_buf());
        st.status = format!("Done {name} ({}/{})", st.processed, st.total);
    }
    fn item_failed(&mut self, _id: u32, name: &str, error: &str) {
        let mut st = self.state();
        st.processed += 1;
        st.failed += 1;
        st.lines.push(format!("Failed {name}: {error}"));
    }
    fn finish(&mut self) {
        self.state().finished = true;
    }
}
