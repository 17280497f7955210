//! Subscriber setup for applications embedding printwatch.
//!
//! The core only emits `tracing` events. Call [`init`] once at startup to see
//! them; `RUST_LOG` takes precedence over the default directive.

use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Human-readable output on stderr.
    Stderr,
    /// Append to a file without ANSI colours (`tail -f` to inspect).
    File(PathBuf),
}

/// Install a global fmt subscriber writing to `target`.
///
/// `default_directive` (e.g. `"printwatch_core=warn"`) applies when
/// `RUST_LOG` is unset or invalid. Fails if a global subscriber is already
/// installed or the log file cannot be opened.
pub fn init(target: LogTarget, default_directive: &str) -> anyhow::Result<()> {
    let filter = env_filter(default_directive);

    match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .try_init()
            .map_err(|err| anyhow::anyhow!(err))?,
        LogTarget::File(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            tracing_subscriber::fmt()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(filter)
                .try_init()
                .map_err(|err| anyhow::anyhow!(err))?;
            tracing::info!(path = %path.display(), "printwatch debug log started");
        }
    }
    Ok(())
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(default_directive))
}
