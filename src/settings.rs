use serde::Deserialize;

use crate::error::Result;
use crate::persist::PersistenceMode;

pub const DEFAULT_CONFIG: &str = "xray_aliases";
pub const ENV_PREFIX: &str = "XRAY_ALIASES";

/// Process configuration, read once at startup.
///
/// Layers, later ones winning: built-in defaults, an optional config file
/// (`xray_aliases.toml`, `.json`, ... as understood by the `config` crate) and
/// `XRAY_ALIASES_*` environment variables, e.g. `XRAY_ALIASES_DATABASE`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// SQLite file for book settings; empty keeps everything in memory.
    pub database: String,
    pub log_filter: String,
    pub listen: String,
}

impl Settings {
    pub fn load(path: Option<&str>) -> Result<Settings> {
        let settings = config::Config::builder()
            .set_default("database", "")?
            .set_default("log_filter", "info")?
            .set_default("listen", "127.0.0.1:8080")?
            .add_source(config::File::with_name(path.unwrap_or(DEFAULT_CONFIG)).required(path.is_some()))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn persistence_mode(&self) -> PersistenceMode {
        PersistenceMode::from_path(&self.database)
    }
}
