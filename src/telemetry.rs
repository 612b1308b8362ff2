//! Tracing subscriber setup for the binaries and tests.

use once_cell::sync::OnceCell;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// JSON lines on stderr, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(io::stderr)
        .json();

    tracing_subscriber::registry().with(env_filter()).with(fmt_layer).try_init().ok();
}

/// JSON lines appended to `path`. Used where the terminal belongs to the UI.
pub fn init_tracing_to_file(path: &Path) -> io::Result<()> {
    let file = File::options().create(true).append(true).open(path)?;
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .json();

    tracing_subscriber::registry().with(env_filter()).with(fmt_layer).try_init().ok();
    Ok(())
}

static TEST_INIT: OnceCell<()> = OnceCell::new();

/// Idempotent test logging. Level comes from `TEST_LOG`, then `RUST_LOG`, then "warn".
pub fn init_test() {
    TEST_INIT.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
