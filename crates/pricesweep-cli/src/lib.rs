//! Support code for the `pricesweep` binary
//!
//! The binary itself lives in `src/bin/pricesweep.rs`; anything worth unit
//! testing outside of `main` is kept here.

pub mod export;

pub use export::{write_export, ExportDocument};
