// src/runner/task.rs
//
// A run on its own thread. The caller keeps a handle to poll progress and
// request a stop; the worker only honours the stop between accounts and
// while waiting for the browser to come up.

use std::thread::{self, JoinHandle};

use crate::cancel::CancelToken;
use crate::config::options::RunOptions;
use crate::error::{RenderError, RunError};
use crate::model::AccountRecord;
use crate::progress::{Progress, ProgressSnapshot, SharedProgress};
use crate::render::Renderer;
use crate::render::boot::{self, BootOutcome};

use super::{Orchestrator, RunSummary};

pub struct RunHandle {
    cancel: CancelToken,
    progress: SharedProgress,
    join: JoinHandle<Result<RunSummary, RunError>>,
}

impl RunHandle {
    /// Ask the worker to stop at the next account boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn progress(&self) -> ProgressSnapshot {
        self.progress.snapshot()
    }

    pub fn shared_progress(&self) -> SharedProgress {
        self.progress.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the worker. A panic inside it comes back as `RunError::Worker`.
    pub fn join(self) -> Result<RunSummary, RunError> {
        match self.join.join() {
            Ok(res) => res,
            Err(panic) => {
                let msg = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| s!("unknown panic"));
                loge!("Worker panicked: {msg}");
                Err(RunError::Worker(msg))
            }
        }
    }
}

/// Start a run that first waits for the debugging port in `options.debugger_address`.
pub fn spawn<R, C>(options: RunOptions, accounts: Vec<AccountRecord>, connect: C) -> RunHandle
where
    R: Renderer,
    C: FnOnce(&RunOptions) -> Result<R, RenderError> + Send + 'static,
{
    let addr = options.debugger_address.clone();
    spawn_with_probe(options, accounts, move || boot::port_open(&addr), connect)
}

/// Like `spawn`, with a custom readiness probe for the render resource.
pub fn spawn_with_probe<R, C, P>(
    options: RunOptions,
    accounts: Vec<AccountRecord>,
    probe: P,
    connect: C,
) -> RunHandle
where
    R: Renderer,
    C: FnOnce(&RunOptions) -> Result<R, RenderError> + Send + 'static,
    P: FnMut() -> bool + Send + 'static,
{
    let cancel = CancelToken::new();
    let progress = SharedProgress::new();

    let worker_cancel = cancel.clone();
    let mut worker_progress = progress.clone();

    let join = thread::spawn(move || {
        let res = work(options, &accounts, probe, connect, &mut worker_progress, &worker_cancel);
        if let Err(e) = &res {
            worker_progress.log(&format!("Run aborted: {e}"));
            worker_progress.finish();
        }
        res
    });

    RunHandle { cancel, progress, join }
}

fn work<R, C, P>(
    options: RunOptions,
    accounts: &[AccountRecord],
    probe: P,
    connect: C,
    progress: &mut SharedProgress,
    cancel: &CancelToken,
) -> Result<RunSummary, RunError>
where
    R: Renderer,
    C: FnOnce(&RunOptions) -> Result<R, RenderError>,
    P: FnMut() -> bool,
{
    match boot::await_ready(probe, cancel, options.boot, Some(&mut *progress)) {
        BootOutcome::Ready(_) => {}
        BootOutcome::Cancelled => return Err(RenderError::BootCancelled.into()),
        BootOutcome::TimedOut => {
            return Err(RenderError::BootTimedOut(options.boot.timeout.as_secs_f64()).into());
        }
    }

    let renderer = connect(&options)?;
    Orchestrator::new(renderer, options).run(accounts, progress, cancel)
}
