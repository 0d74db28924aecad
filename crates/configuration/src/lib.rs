use crate::error::ConfigError;
use crate::settings::Settings;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{DataSettings, LoggingSettings, Overrides, ServerSettings};

/// Prefix for environment overrides, e.g. `TICKERLENS__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "TICKERLENS";

/// Default location of the settings file.
pub const DEFAULT_CONFIG_FILE: &str = "tickerlens.toml";

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file at `path`
/// (optional unless explicitly given), then `TICKERLENS__*` environment variables
/// (after loading `.env` if present). The result is validated before it is returned.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    dotenvy::dotenv().ok();

    let (file, required) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };

    let builder = config::Config::builder()
        .set_default("data.path", "data/master_data.csv")?
        .set_default("data.date_format", "%Y-%m-%d")?
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("logging.level", "info")?
        .set_default("logging.file_prefix", "tickerlens")?
        .add_source(config::File::from(file).required(required))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}
