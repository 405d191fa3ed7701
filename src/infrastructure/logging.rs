//! Logging bootstrap.
//!
//! Logs go to stderr; stdout carries command output and the tool protocol.
//! Initialization happens at most once per process and never panics.

use flexi_logger::{Logger, LoggerHandle, WriteMode};
use log::debug;
use std::sync::OnceLock;

/// Environment variable holding a log level spec, e.g. `debug` or `orgenda=trace`
pub const LOG_ENV: &str = "ORGENDA_LOG";

static LOGGER: OnceLock<LoggerHandle> = OnceLock::new();

/// Level spec from `ORGENDA_LOG`, else `debug` when verbose, else `warn`.
pub fn level_spec(env_value: Option<&str>, verbose: bool) -> String {
    match env_value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(spec) => spec.to_string(),
        None if verbose => "debug".to_string(),
        None => "warn".to_string(),
    }
}

/// Start the stderr logger. Later calls are no-ops.
///
/// # Errors
/// Returns a readable message when the level spec is invalid or the backend
/// fails to start.
pub fn init_logging(verbose: bool) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Ok(());
    }

    let spec = level_spec(std::env::var(LOG_ENV).ok().as_deref(), verbose);
    let handle = Logger::try_with_str(&spec)
        .map_err(|err| format!("invalid log level `{spec}`: {err}"))?
        .log_to_stderr()
        .write_mode(WriteMode::Direct)
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    if LOGGER.set(handle).is_ok() {
        debug!(
            "event=app_start module=core status=ok level={} version={}",
            spec,
            env!("CARGO_PKG_VERSION")
        );
    }
    Ok(())
}
