//! Logging for Lexis.
//!
//! Logs go to stderr; stdout carries search results and JSON output.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, AppResult};

/// Filter used when neither a level nor `RUST_LOG` is given: Lexis crates
/// at `info`, everything else at `warn`.
const DEFAULT_FILTER: &str = "warn,lexis=info,lexis_core=info,lexis_index=info";

/// Install the global subscriber.
///
/// `log_level` is either a bare level (`debug`), applied to the Lexis crates
/// only, or a full `EnvFilter` directive string. `no_color` turns off ANSI
/// escapes; `AppConfig::load` already sets it when `NO_COLOR` is present.
///
/// # Example
/// ```no_run
/// use lexis_core::logging::init_logging;
///
/// init_logging(Some("debug"), false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level: Option<&str>, no_color: bool) -> AppResult<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(!no_color);

    tracing_subscriber::registry()
        .with(build_filter(log_level)?)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to init logging: {}", e)))?;

    Ok(())
}

/// Turn a level or directive string into an `EnvFilter`.
pub fn build_filter(log_level: Option<&str>) -> AppResult<EnvFilter> {
    let directives = match log_level.map(str::trim) {
        None | Some("") => {
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string())
        }
        Some(level) if is_bare_level(level) => {
            format!("warn,lexis={0},lexis_core={0},lexis_index={0}", level)
        }
        Some(directives) => directives.to_string(),
    };

    EnvFilter::try_new(&directives)
        .map_err(|e| AppError::Config(format!("Invalid log filter {:?}: {}", directives, e)))
}

fn is_bare_level(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error" | "off"
    )
}
