use thiserror::Error;

/// Errors raised while validating or deriving configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration for {option}: {message}")]
    InvalidConfiguration { option: String, message: String },

    #[error("invalid priority '{value}' for {option}: expected a single ASCII letter")]
    InvalidPriority { option: String, value: String },
}

impl ConfigError {
    pub fn invalid(option: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidConfiguration {
            option: option.to_string(),
            message: message.into(),
        }
    }
}
