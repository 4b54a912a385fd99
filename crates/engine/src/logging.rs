//! Structured logging initialisation for hosts embedding the engine.
//!
//! The filter level can be overridden at runtime via the `RUST_LOG`
//! environment variable. When `RUST_LOG` is not set, the caller-supplied
//! `level` string is used (e.g. `"info"`, `"warn,scamshield_engine=debug"`).

use std::str::FromStr;

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::domain::error::EngineError;

static INSTALLED: OnceCell<LogFormat> = OnceCell::new();

/// Selects the output format for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines (development, device consoles).
    Human,
    /// Newline-delimited JSON (log shipping).
    Json,
}

impl FromStr for LogFormat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" | "text" => Ok(LogFormat::Human),
            "json" => Ok(LogFormat::Json),
            other => Err(EngineError::Config(format!("unknown log format: {other}"))),
        }
    }
}

/// Install the global tracing subscriber.
///
/// Mobile hosts may call this from several entry points, so only the first
/// call installs anything; later calls return the format already active.
pub fn init_logging(format: LogFormat, level: &str) -> LogFormat {
    *INSTALLED.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        // `try_init` fails if the host installed its own subscriber; theirs wins.
        let _ = match format {
            LogFormat::Human => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true))
                .try_init(),
            LogFormat::Json => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_target(true))
                .try_init(),
        };
        format
    })
}
