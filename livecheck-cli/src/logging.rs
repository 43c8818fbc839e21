//! Logging initialization for livecheck.
//!
//! Configures `tracing-subscriber` based on the `[general]` section
//! of `LivecheckConfig` and the `--debug` / `--verbose` / `--quiet` flags.
//! All log output goes to stderr; stdout carries only check output.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use livecheck_core::config::GeneralConfig;

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Verbosity flags from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verbosity {
    pub debug: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl Verbosity {
    /// Level after applying the flags to the configured level.
    ///
    /// `--debug` and `--verbose` only ever raise the level; `--quiet` lowers it
    /// to `error` unless one of the raising flags is also set.
    pub fn effective_level(&self, configured: &str) -> String {
        let rank = |level: &str| LEVELS.iter().position(|l| *l == level).unwrap_or(1);
        let current = rank(configured);

        let target = if self.debug {
            current.max(rank("debug"))
        } else if self.verbose {
            current.max(rank("info"))
        } else if self.quiet {
            rank("error")
        } else {
            current
        };
        LEVELS[target].to_owned()
    }
}

/// Initialize the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros are used.
/// `RUST_LOG` takes precedence over the configured level.
///
/// # Formats
///
/// * `"json"` - Machine-parseable JSON lines
/// * `"pretty"` - Human-readable colored output
pub fn init_tracing(config: &GeneralConfig, verbosity: Verbosity) -> Result<()> {
    let level = verbosity.effective_level(&config.log_level);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize JSON tracing subscriber: {}", e)
                })?;
        }
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize pretty tracing subscriber: {}", e)
                })?;
        }
        _ => {
            return Err(anyhow::anyhow!(
                "unknown log format '{}', expected 'json' or 'pretty'",
                config.log_format
            ));
        }
    }

    Ok(())
}
