// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cancel;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod file;
pub mod model;
pub mod progress;
pub mod query;
pub mod registry;
pub mod render;
pub mod report;
pub mod runner;
pub mod specs;
pub mod sync;
