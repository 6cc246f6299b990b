//! Observability and diagnostics for the record codec.
//!
//! All library code logs through the `log` facade. Nothing is printed unless the
//! host application installs a logger, either its own or the `env_logger`
//! backend configured by [`enable_verbose_logging`].
//!
//! The `log_metric!` macro emits structured `key=value` trace lines for
//! per-record events. It only exists in debug builds; release builds compile
//! it (and the formatting of its arguments) away entirely.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Once;

use log::LevelFilter;

use crate::error::Result;

/// Logs a structured key-value metric line at `trace` level, only in debug builds.
///
/// ```ignore
/// log_metric!("event" = "encode", "dims" = dims, "stride" = stride);
/// ```
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            if log::log_enabled!(log::Level::Trace) {
                let mut parts: Vec<String> = Vec::new();
                $(
                    parts.push(format!("{}={}", $key, $value));
                )+
                log::trace!("KDPOINT_METRIC: {}", parts.join(" "));
            }
        }
    };
}

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` backend at `Debug` level, at most once per process.
///
/// With `log_file` set, output is appended to that file instead of stderr.
/// Later calls are no-ops apart from opening (and validating) the file.
pub fn enable_verbose_logging(log_file: Option<&Path>) -> Result<()> {
    let file = match log_file {
        Some(path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };

    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Debug);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
    Ok(())
}

/// Routes log output through the test harness so it is captured per test.
#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = env_logger::Builder::new()
        .is_test(true)
        .filter_level(LevelFilter::Trace)
        .try_init();
}
