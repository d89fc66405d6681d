// src/core/mod.rs

pub mod html;
pub mod sanitize;
pub mod table;

pub use table::{Cell, Row, Table, TableProbe};
