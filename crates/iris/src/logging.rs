use env_logger::Builder;
use log::LevelFilter;

/// Install the global logger.
///
/// `-v` flags raise the level above the configured one; `RUST_LOG`
/// directives are applied last and win over both.
pub fn init(verbosity: u8, config_level: &str) {
    let level = match verbosity {
        0 => config_level.parse().unwrap_or(LevelFilter::Warn),
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = Builder::new();
    builder.filter_level(level).format_timestamp(None).parse_default_env();
    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
