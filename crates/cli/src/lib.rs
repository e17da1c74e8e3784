// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! soak: coverage instrumentation and threshold enforcement around a test
//! run.
//!
//! The pipeline instruments matching source files before they execute
//! (through a pluggable [`hook::Instrument`]), accumulates per-file
//! execution counters while the suite runs, and at process termination
//! synchronously persists the raw counters, aggregates them with
//! externally produced coverage files, renders reports, and enforces
//! configured thresholds.
//!
//! ```no_run
//! use soak::config::CoverageConfig;
//! use soak::hook::HookOptions;
//! use soak::pipeline::CoveragePipeline;
//! # fn instrumenter() -> Box<dyn soak::hook::Instrument> { unimplemented!() }
//!
//! # fn main() -> Result<(), soak::pipeline::SetupError> {
//! let config = CoverageConfig { enable: true, ..CoverageConfig::default() };
//! let pipeline = CoveragePipeline::install(
//!     config,
//!     std::path::Path::new("."),
//!     instrumenter(),
//!     HookOptions::default(),
//! )?;
//! let outcome = pipeline.run(|| {
//!     // execute the test suite; instrumented code fills the accumulator
//! });
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod collect;
pub mod color;
pub mod config;
pub mod coverage;
pub mod discovery;
pub mod drain;
pub mod file_reader;
pub mod hook;
pub mod pipeline;
pub mod report;
pub mod run;
pub mod threshold;
pub mod verbose;

#[cfg(test)]
pub mod test_utils;

pub use config::{Config, CoverageConfig};
pub use coverage::{CoverageMap, FileCoverage};
pub use drain::DrainOutcome;
pub use pipeline::{CoveragePipeline, SetupError};
