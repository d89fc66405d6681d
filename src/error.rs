// src/error.rs
//
// Only failures that abort something are errors here. A table that never
// became ready, or a page that yields no usable rows, is recovered in place
// (see `sync::TableState` and the `Default` impls in `model`).

use std::path::PathBuf;

use thiserror::Error;

use crate::query::ReportKind;

/// Registry could not be loaded. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("account registry not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("could not read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("account registry {} is empty or malformed", .0.display())]
    Empty(PathBuf),
}

/// Failures of the render capability itself (not of the page content).
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render transport: {0}")]
    Transport(String),

    #[error("webdriver {command} failed: {message}")]
    Protocol { command: &'static str, message: String },

    #[error("no browser session")]
    NoSession,

    #[error("render resource not ready after {0:.1}s")]
    BootTimedOut(f64),

    #[error("render resource start cancelled")]
    BootCancelled,
}

impl From<reqwest::Error> for RenderError {
    fn from(e: reqwest::Error) -> Self {
        RenderError::Transport(e.to_string())
    }
}

/// One account's traversal failed; the run moves on to the next account.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{kind} page: {source}")]
    Navigate { kind: ReportKind, source: RenderError },

    #[error("writing report {}: {source}", path.display())]
    Persist { path: PathBuf, source: std::io::Error },
}

/// The run itself cannot continue.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("cannot create reports folder {}: {source}", path.display())]
    OutputDir { path: PathBuf, source: std::io::Error },

    #[error("worker stopped unexpectedly: {0}")]
    Worker(String),
}
