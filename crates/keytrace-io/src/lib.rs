//! keytrace-io - Data I/O for keystroke-timing datasets
//!
//! This crate turns CSV exports into the inputs of the statistics core:
//!
//! - **CsvTable**: header-addressed string table read with the `csv` crate
//! - **Group**: Parkinson's / control label parsed from `"True"`/`"Yes"` style cells
//! - **GroupedSamples**: one numeric column partitioned by group
//! - **load_all**: async join point that resolves only after every file loads
//! - **KeystrokeRecord**: press/release timestamps for keyboard replay
//!
//! # Design
//!
//! Loading is fire-once: every requested file is read concurrently on the
//! blocking pool and the caller proceeds only when all of them resolved.
//! Any failure fails the whole load; there is no retry.

pub mod csv_reader;
pub mod groups;
pub mod keystrokes;
pub mod loader;
pub mod reader;

pub use csv_reader::*;
pub use groups::*;
pub use keystrokes::*;
pub use loader::*;
pub use reader::*;
