use std::fmt;

use crate::config::SecretError;
use crate::config::logging::LoggingError;
use crate::errors::InternalError;

/// Failures while bootstrapping the application
#[derive(Debug)]
pub enum ApplicationError {
    InvalidSetting { setting_name: String, reason: String },
    ParseError { setting_name: String, error: String },
    Secret(SecretError),
    Logging(LoggingError),
    Startup(InternalError),
    Server(std::io::Error),
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSetting { setting_name, reason } => {
                write!(f, "Invalid setting '{}': {}", setting_name, reason)
            }
            Self::ParseError { setting_name, error } => {
                write!(f, "Failed to parse setting '{}': {}", setting_name, error)
            }
            Self::Secret(err) => write!(f, "Secret configuration error: {}", err),
            Self::Logging(err) => write!(f, "{}", err),
            Self::Startup(err) => write!(f, "Startup failed: {}", err),
            Self::Server(err) => write!(f, "Server error: {}", err),
        }
    }
}

impl std::error::Error for ApplicationError {}

impl From<SecretError> for ApplicationError {
    fn from(err: SecretError) -> Self {
        Self::Secret(err)
    }
}

impl From<LoggingError> for ApplicationError {
    fn from(err: LoggingError) -> Self {
        Self::Logging(err)
    }
}

impl From<InternalError> for ApplicationError {
    fn from(err: InternalError) -> Self {
        Self::Startup(err)
    }
}

impl From<std::io::Error> for ApplicationError {
    fn from(err: std::io::Error) -> Self {
        Self::Server(err)
    }
}
