// src/file.rs

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;

use crate::config::consts::{REPORTS_DIR_PREFIX, REPORT_EXT, RUN_STAMP_FMT};
use crate::core::sanitize::sanitize_report_filename;

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// `<out_root>/reports_YYYYmmdd_HHMMSS`, created if needed.
pub fn create_run_dir(out_root: &Path, now: NaiveDateTime) -> io::Result<PathBuf> {
    let dir = out_root.join(run_dir_name(now));
    ensure_directory(&dir)?;
    Ok(dir)
}

pub fn run_dir_name(now: NaiveDateTime) -> String {
    format!("{REPORTS_DIR_PREFIX}{}", now.format(RUN_STAMP_FMT))
}

/// Duplicate handling **only within this run**:
/// first `<stem>.txt`, then `<stem> (2).txt`, `<stem> (3).txt`, ...
pub fn resolve_report_path(dir: &Path, stem: &str, seen: &mut HashMap<String, usize>) -> PathBuf {
    let count = seen.entry(stem.to_string()).or_insert(0);
    let filename = if *count == 0 {
        format!("{stem}.{REPORT_EXT}")
    } else {
        format!("{stem} ({}).{REPORT_EXT}", *count + 1)
    };
    *count += 1;
    dir.join(filename)
}

/// Writes run-scoped report files without overwriting earlier ones from the same run.
#[derive(Debug)]
pub struct ReportWriter {
    dir: PathBuf,
    seen: HashMap<String, usize>,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), seen: HashMap::new() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `text` for account `name` (`id` only feeds the empty-name fallback).
    pub fn write(&mut self, name: &str, id: u32, text: &str) -> io::Result<PathBuf> {
        let stem = sanitize_report_filename(name, id);
        let path = resolve_report_path(&self.dir, &stem, &mut self.seen);
        fs::write(&path, text)?;
        Ok(path)
    }
}
