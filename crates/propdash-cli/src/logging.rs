// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::APP_NAME;

const LOG_ENV: &str = "PROPDASH_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// The TUI owns the terminal, so interactive runs log to a file.
    File(PathBuf),
    Stderr,
}

pub fn default_log_path() -> Result<PathBuf> {
    let cache_root = dirs::cache_dir()
        .ok_or_else(|| anyhow!("cannot resolve cache directory for the log file"))?;
    let app_dir = cache_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create log directory {}", app_dir.display()))?;
    Ok(app_dir.join(format!("{APP_NAME}.log")))
}

pub fn init(target: &LogTarget) -> Result<()> {
    let filter = EnvFilter::try_new(filter_directive(env::var(LOG_ENV).ok()))
        .or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVE))
        .context("build log filter")?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|error| anyhow!("install log subscriber: {error}"))
}

fn filter_directive(raw: Option<String>) -> String {
    raw.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_owned())
}
