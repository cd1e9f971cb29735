use thiserror::Error;

/// Errors raised while turning observations into a normalized series, aggregates and a forecast
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// A record is structurally impossible (missing timestamp, missing or non-finite value)
    #[error("invalid observation #{index}: field '{field}' has value '{value}'")]
    InvalidObservation { index: usize, field: String, value: String },

    /// Too few samples for the requested operation
    #[error("insufficient data: need at least {needed} samples, got {got}")]
    InsufficientData { needed: usize, got: usize },
}

impl PipelineError {
    pub fn invalid(index: usize, field: &str, value: impl ToString) -> PipelineError {
        PipelineError::InvalidObservation {
            index,
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ConfigError::Io: {0}")]
    Io(String),
    #[error("ConfigError::Document: {0}")]
    Document(String),
    #[error("ConfigError::Invalid: '{field}' can't be '{value}'")]
    Invalid { field: String, value: String },
}

impl ConfigError {
    pub fn invalid(field: &str, value: impl ToString) -> ConfigError {
        ConfigError::Invalid { field: field.to_string(), value: value.to_string() }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self { ConfigError::Io(e.to_string()) }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self { ConfigError::Document(e.to_string()) }
}

/// Errors raised while reading observation files or writing result bundles
#[derive(Error, Debug)]
pub enum FileError {
    #[error("FileError::Io: {0}")]
    Io(String),
    #[error("FileError::Document: {0}")]
    Document(String),
}

impl From<std::io::Error> for FileError {
    fn from(e: std::io::Error) -> Self { FileError::Io(e.to_string()) }
}
impl From<serde_json::Error> for FileError {
    fn from(e: serde_json::Error) -> Self { FileError::Document(e.to_string()) }
}
