use thiserror::Error;

#[derive(Error, Debug)]
pub enum AliasError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Roster error: {0}")]
    Roster(String),
    #[error("Resolution error: {0}")]
    Resolution(String),
    #[error("I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, AliasError>;

// Helper conversions
impl From<rusqlite::Error> for AliasError {
    fn from(e: rusqlite::Error) -> Self { Self::Persistence(e.to_string()) }
}
impl From<serde_json::Error> for AliasError {
    fn from(e: serde_json::Error) -> Self { Self::Serialization(e.to_string()) }
}
impl From<config::ConfigError> for AliasError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<std::io::Error> for AliasError {
    fn from(e: std::io::Error) -> Self { Self::Io(e.to_string()) }
}
