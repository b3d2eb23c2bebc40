/// Application name
pub const APP_NAME: &str = "Iris";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reader plugin API version offered to plugins
pub const API_VERSION: &str = "0.1.0";

/// Configuration directory name, relative to the home directory
pub const CONFIG_DIR_NAME: &str = ".iris";

/// Default configuration file name inside the configuration directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable pointing at a configuration file
pub const CONFIG_ENV_VAR: &str = "IRIS_CONFIG";

/// Log level used when neither the config nor the environment sets one
pub const DEFAULT_LOG_LEVEL: &str = "warn";
