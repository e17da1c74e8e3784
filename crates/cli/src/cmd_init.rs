// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Init command implementation: write a starter soak.toml.

use soak::cli::InitArgs;
use soak::config;

/// Run the init command.
pub fn run(args: &InitArgs) -> anyhow::Result<i32> {
    let path = std::env::current_dir()?.join("soak.toml");
    if path.exists() && !args.force {
        anyhow::bail!("soak.toml already exists (use --force to overwrite)");
    }
    std::fs::write(&path, config::starter_toml())?;
    eprintln!("wrote {}", path.display());
    Ok(0)
}
