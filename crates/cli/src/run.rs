// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Live coverage state for one test run.
//!
//! The accumulator is the runtime side effect of instrumented code: counters
//! fill in place while the suite executes. Rather than a true global, the
//! state is owned by a [`RunContext`] created at run start and handed by
//! handle to the instrumentation layer, so independent runs can coexist in
//! one process. The coverage variable name is derived from a timestamp for
//! the same reason: a run's counters can never collide with a prior run's.

use std::cell::RefCell;
use std::rc::Rc;

use crate::coverage::{CoverageMap, FileCoverage};

/// Prefix and suffix of the run-unique coverage variable name, matching the
/// name instrumented code addresses its counters under.
const COVERAGE_VAR_PREFIX: &str = "$$cov_";
const COVERAGE_VAR_SUFFIX: &str = "$$";

/// Owner of the live coverage map for one run.
///
/// Created before any instrumented file loads, so the map exists (empty)
/// when the test framework scans for leaked state. Execution is
/// single-threaded and cooperative; the drain takes its snapshot only after
/// the run has finished mutating.
#[derive(Debug)]
pub struct RunContext {
    coverage_var: String,
    map: Rc<RefCell<CoverageMap>>,
}

impl RunContext {
    /// Create a context with a timestamp-derived coverage variable name.
    pub fn new() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        Self::with_coverage_var(format!("{COVERAGE_VAR_PREFIX}{millis}{COVERAGE_VAR_SUFFIX}"))
    }

    /// Create a context with an explicit coverage variable name.
    pub fn with_coverage_var(name: impl Into<String>) -> Self {
        Self {
            coverage_var: name.into(),
            map: Rc::new(RefCell::new(CoverageMap::new())),
        }
    }

    /// The run-unique name instrumented code addresses its counters under.
    pub fn coverage_var(&self) -> &str {
        &self.coverage_var
    }

    /// A counter handle for the instrumentation layer.
    pub fn accumulator(&self) -> Accumulator {
        Accumulator { map: Rc::clone(&self.map) }
    }

    pub fn is_empty(&self) -> bool {
        self.map.borrow().is_empty()
    }

    /// Copy of the accumulated map. The drain works from this snapshot;
    /// the live map is not observed again afterwards.
    pub fn snapshot(&self) -> CoverageMap {
        self.map.borrow().clone()
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle instrumented code increments counters through.
///
/// Increments never decrement and never block; lost updates are not a
/// concern in the single-threaded cooperative model.
#[derive(Debug, Clone)]
pub struct Accumulator {
    map: Rc<RefCell<CoverageMap>>,
}

impl Accumulator {
    /// Seed the zeroed counters and static metadata for a freshly
    /// instrumented file. Registering the same path again is a no-op, so
    /// re-instrumentation never resets accumulated counts.
    pub fn register(&self, cov: FileCoverage) {
        self.map.borrow_mut().register(cov);
    }

    pub fn hit_statement(&self, path: &str, id: u32) {
        if let Some(cov) = self.map.borrow_mut().get_mut(path) {
            cov.hit_statement(id);
        }
    }

    pub fn hit_function(&self, path: &str, id: u32) {
        if let Some(cov) = self.map.borrow_mut().get_mut(path) {
            cov.hit_function(id);
        }
    }

    pub fn hit_branch(&self, path: &str, id: u32, arm: usize) {
        if let Some(cov) = self.map.borrow_mut().get_mut(path) {
            cov.hit_branch(id, arm);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.map.borrow().is_empty()
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
