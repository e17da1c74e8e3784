// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline assembly: everything that must happen before the run starts.
//!
//! Setup is the only place a coverage problem may abort the build outright:
//! a reporting directory that cannot be created, an include set that cannot
//! be enumerated, or a report format nobody implements would all surface as
//! silent data loss if deferred, so they fail here, before any test
//! executes. The embedder checks `enable` and simply skips installation
//! when coverage is off.

use std::fs;
use std::io;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};
use std::path::{Path, PathBuf};

use crate::config::CoverageConfig;
use crate::drain::{DrainOutcome, ExitDrain, run_drain};
use crate::hook::{FileMatcher, HookOptions, Instrument, SourceHook};
use crate::report::reports_for;
use crate::run::RunContext;

/// Fatal setup errors. None of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("failed to resolve working directory: {0}")]
    WorkingDir(#[source] io::Error),

    #[error("failed to create reporting directory {path}: {source}")]
    ReportingDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to enumerate source files under {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("invalid glob pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("unknown report format `{0}`")]
    UnknownReport(String),
}

/// An installed coverage pipeline: hook + accumulator + one-shot drain.
pub struct CoveragePipeline {
    config: CoverageConfig,
    reporting_dir: PathBuf,
    cwd: PathBuf,
    ctx: RunContext,
    hook: SourceHook,
    drain: ExitDrain,
}

impl CoveragePipeline {
    /// Set up the pipeline for one run.
    ///
    /// Creates the reporting directory (failing early if it cannot),
    /// validates the configured report formats, enumerates the files to
    /// instrument under `project_root`, and wires the hook to a fresh run
    /// context.
    pub fn install(
        config: CoverageConfig,
        project_root: &Path,
        instrumenter: Box<dyn Instrument>,
        opts: HookOptions,
    ) -> Result<Self, SetupError> {
        let cwd = std::env::current_dir().map_err(SetupError::WorkingDir)?;
        let reporting_dir = cwd.join(&config.save_path);
        fs::create_dir_all(&reporting_dir).map_err(|source| SetupError::ReportingDir {
            path: reporting_dir.clone(),
            source,
        })?;

        reports_for(&config.report, config.print)?;

        let matcher = FileMatcher::build(project_root, &config.includes, &config.excludes)?;
        let ctx = RunContext::new();
        let hook = SourceHook::new(matcher, instrumenter, ctx.accumulator(), ctx.coverage_var(), opts);

        Ok(Self { config, reporting_dir, cwd, ctx, hook, drain: ExitDrain::new() })
    }

    pub fn hook(&self) -> &SourceHook {
        &self.hook
    }

    pub fn context(&self) -> &RunContext {
        &self.ctx
    }

    pub fn reporting_dir(&self) -> &Path {
        &self.reporting_dir
    }

    /// Fire the exit-time drain. Returns `None` if it already fired.
    pub fn drain(&self) -> Option<DrainOutcome> {
        self.drain.fire(|| {
            run_drain(self.ctx.snapshot(), &self.config, &self.reporting_dir, &self.cwd)
        })
    }

    /// Run the test suite callback with the drain guaranteed afterwards.
    ///
    /// The drain fires even when `run_fn` unwinds (the terminal path of a
    /// failing suite still gets its coverage persisted), and the unwind
    /// then resumes.
    pub fn run<F: FnOnce()>(&self, run_fn: F) -> Option<DrainOutcome> {
        let result = catch_unwind(AssertUnwindSafe(run_fn));
        let outcome = self.drain();
        if let Err(panic) = result {
            resume_unwind(panic);
        }
        outcome
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
