//! Console logging for the seed binary.
//!
//! Progress lines go to stderr through `flexi_logger`. `RUST_LOG` wins over
//! the build-mode default.

use errors::*;
use flexi_logger::{Logger, LoggerHandle};

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Starts the logger. Keep the returned handle alive until exit.
pub fn init_logging(default_level: &str) -> Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(default_level)?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()?;
    debug!(
        "logging started platform={} version={}",
        ::std::env::consts::OS,
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}
