use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives (e.g. `pdr_core=debug`).
pub const LOG_ENV: &str = "PDR_LOG";

/// Installs the global fmt subscriber writing to stderr, so stdout stays reserved for
/// command output.
///
/// `PDR_LOG` wins if set, otherwise `verbosity` picks the level: 0 = warn, 1 = info,
/// 2 and above = debug. Calling this twice is harmless, the second call is ignored.
pub fn init(verbosity: u64) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn default_directive(verbosity: u64) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
