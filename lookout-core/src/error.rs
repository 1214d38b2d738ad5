use std::{error, fmt, io};

use crate::data::ApiError;

#[derive(Debug)]
pub enum Error {
    /// The server answered, but not with a usable artifact.
    Api {
        status: u16,
        error: Option<ApiError>,
    },
    /// No response at all.
    Transport(String),
    JsonError(Box<dyn error::Error + Send>),
    ConfigError(String),
    Disconnected,
    IoError(io::Error),
}

impl Error {
    /// Status code and user-facing error for this failure.  Anything
    /// without a structured error from the server gets the general one.
    pub fn into_failure(self) -> (u16, ApiError) {
        match self {
            Self::Api { status, error } => (status, error.unwrap_or_else(ApiError::general)),
            _ => (0, ApiError::general()),
        }
    }
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api {
                status,
                error: Some(err),
            } => write!(f, "API error {status}: {}", err.message),
            Self::Api { status, error: None } => write!(f, "Unexpected API response {status}"),
            Self::Transport(err) => write!(f, "Transport error: {err}"),
            Self::JsonError(err) => err.fmt(f),
            Self::ConfigError(err) => write!(f, "Configuration error: {err}"),
            Self::Disconnected => write!(f, "Dispatcher disconnected"),
            Self::IoError(err) => err.fmt(f),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::JsonError(Box::new(err))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Error {
        Error::ConfigError(err.to_string())
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Error {
        Error::Transport(err.to_string())
    }
}
