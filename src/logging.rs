use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding an `EnvFilter` directive, e.g.
/// `RAILHEAD_LOG=railhead=debug`.
pub const LOG_ENV_VAR: &str = "RAILHEAD_LOG";

/// Sets up logging to stderr.
///
/// `RAILHEAD_LOG` wins when set. Otherwise the level follows the number of
/// `-v` flags: warnings by default, `info` for one, `debug` for two and
/// `trace` beyond.
///
/// Stdout stays reserved for command output.
pub fn setup_logging(verbosity: u8) -> Result<()> {
    let env_filter = match EnvFilter::try_from_env(LOG_ENV_VAR) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(default_directive(verbosity)),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!("Logging initialized: verbosity={}", verbosity);

    Ok(())
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
