use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Champion not found: {0}")]
    ChampionNotFound(String),
}
