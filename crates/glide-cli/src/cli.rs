//! Argument parsing, logging setup, and dispatch into the demo loop.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use glide_tui::DemoOptions;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Built-in rotation shown when no texts are given. Consecutive entries
/// share long substrings so the minimal-edit cascade is easy to see.
const DEFAULT_TEXTS: &[&str] = &[
    "connecting…",
    "connected",
    "syncing 1 of 3",
    "syncing 2 of 3",
    "syncing 3 of 3",
    "everything up to date",
];

#[derive(Debug, Parser)]
#[command(
    name = "glide",
    version,
    about = "Animated per-character text in the terminal"
)]
struct Args {
    /// Texts to rotate through; defaults to a built-in demo rotation.
    #[arg(value_name = "TEXT")]
    texts: Vec<String>,

    /// Dwell time per text, in milliseconds.
    #[arg(long, default_value_t = 2500)]
    interval_ms: u64,

    /// Apply end states instantly instead of playing transitions.
    #[arg(long)]
    no_animations: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_logging()?;

    let texts = if args.texts.is_empty() {
        DEFAULT_TEXTS.iter().map(ToString::to_string).collect()
    } else {
        args.texts
    };
    let options = DemoOptions {
        texts,
        interval: Duration::from_millis(args.interval_ms),
        animations: !args.no_animations,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;
    runtime.block_on(glide_tui::run_demo(options))
}

/// Opt-in file logging: the TUI owns the terminal, so traces go to the
/// file named by `GLIDE_LOG`, filtered through `RUST_LOG`.
fn init_logging() -> Result<Option<WorkerGuard>> {
    let Ok(path) = std::env::var("GLIDE_LOG") else {
        return Ok(None);
    };
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create log file {path}"))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("glide_engine=debug,info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["glide"]);
        assert!(args.texts.is_empty());
        assert_eq!(args.interval_ms, 2500);
        assert!(!args.no_animations);
    }

    #[test]
    fn test_args_positional_texts() {
        let args = Args::parse_from(["glide", "one", "two"]);
        assert_eq!(args.texts, vec!["one", "two"]);
    }
}
