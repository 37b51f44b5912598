use crate::auth::PasswordError;
use crate::config::ConfigError;
use crate::matching::MatchingConfigError;
use crate::storage::RepositoryError;
use crate::telemetry::TelemetryError;
use std::fmt;
use std::path::PathBuf;

/// Process-level failures surfaced by the binary before or outside request handling.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Input {
        path: PathBuf,
        source: serde_json::Error,
    },
    Password(PasswordError),
    Matching(MatchingConfigError),
    Seed(RepositoryError),
}

impl AppError {
    pub fn input(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Input {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Input { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
            AppError::Password(err) => write!(f, "password error: {}", err),
            AppError::Matching(err) => write!(f, "matching policy error: {}", err),
            AppError::Seed(err) => write!(f, "failed to seed demo data: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Input { source, .. } => Some(source),
            AppError::Password(err) => Some(err),
            AppError::Matching(err) => Some(err),
            AppError::Seed(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<PasswordError> for AppError {
    fn from(value: PasswordError) -> Self {
        Self::Password(value)
    }
}

impl From<MatchingConfigError> for AppError {
    fn from(value: MatchingConfigError) -> Self {
        Self::Matching(value)
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        Self::Seed(value)
    }
}
