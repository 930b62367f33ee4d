//! CSV output sink
//!
//! Tables are written with the `csv` crate, one file per entity type.

pub mod writer;

pub use writer::{format_cell, CsvTableWriter};
