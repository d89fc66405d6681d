// src/specs/mod.rs
//! # Page extractors
//!
//! One module per dashboard page. Each turns the markup captured after the
//! readiness poll into that page's typed record (`crate::model`).
//!
//! ## Conventions
//! - Only the **first `<table>`** on a page is read.
//! - Cells are addressed by **fixed offsets**. A row that is too short for an
//!   offset is skipped; nothing tries to re-align shifted columns.
//! - No markup, no table, or no qualifying rows → the record's `Default`.
//!   That is the recovery path, not an error, so extractors return plain
//!   values rather than `Result`.
//! - `locate` holds the lookups shared by the pages that summarize per
//!   account (speed, conversion): alias resolution and the "Total (...)" row.
pub mod locate;

pub mod ads;
pub mod arbitrage;
pub mod bank;
pub mod conversion;
pub mod speed;
