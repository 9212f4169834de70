/// Error type shared by every settings operation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("no element matches `{0}`")]
    MissingElement(String),

    #[error("stored preferences are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cookie expiry date is out of range")]
    ExpiryOutOfRange,

    #[error("browser environment unavailable: {0}")]
    Environment(String),

    #[error("invalid widget configuration: {0}")]
    Config(String),
}
