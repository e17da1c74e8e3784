// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Console color handling for the text reports.

use termcolor::{Color, ColorChoice, ColorSpec};

/// Color output mode from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Resolve the effective color choice. `--no-color` wins over everything.
pub fn resolve_color(mode: ColorMode, no_color: bool) -> ColorChoice {
    if no_color {
        return ColorChoice::Never;
    }
    match mode {
        ColorMode::Auto => ColorChoice::Auto,
        ColorMode::Always => ColorChoice::Always,
        ColorMode::Never => ColorChoice::Never,
    }
}

/// Color scheme for report output.
pub mod scheme {
    use super::{Color, ColorSpec};

    /// Table headers and banners.
    pub fn header() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec
    }

    /// Percentages at or above the high watermark.
    pub fn high() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        spec
    }

    /// Percentages between the watermarks.
    pub fn medium() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow)).set_bold(true);
        spec
    }

    /// Percentages below the low watermark.
    pub fn low() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }

    /// File paths.
    pub fn path() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        spec
    }
}

/// Coverage watermarks for picking a percentage color.
pub const HIGH_WATERMARK: f64 = 80.0;
pub const LOW_WATERMARK: f64 = 50.0;

/// The color spec for a coverage percentage.
pub fn pct_spec(pct: f64) -> ColorSpec {
    if pct >= HIGH_WATERMARK {
        scheme::high()
    } else if pct >= LOW_WATERMARK {
        scheme::medium()
    } else {
        scheme::low()
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
