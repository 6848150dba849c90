use std::fmt;

use reqwest::StatusCode;

/// Boxed underlying cause carried by authentication and API errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Missing credential or any failure while exchanging it for an IAM token.
    Authentication {
        message: String,
        source: Option<BoxError>,
    },
    /// Failure executing an API request. `status` is `None` when no response was received.
    Api {
        message: String,
        status: Option<StatusCode>,
        source: Option<BoxError>,
    },
    Validation(String),
    Config(String),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Error {
    pub fn authentication(message: impl Into<String>) -> Self {
        Error::Authentication {
            message: message.into(),
            source: None,
        }
    }

    pub fn authentication_with(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Error::Authentication {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn api(message: impl Into<String>, status: Option<StatusCode>) -> Self {
        Error::Api {
            message: message.into(),
            status,
            source: None,
        }
    }

    pub fn api_with(
        message: impl Into<String>,
        status: Option<StatusCode>,
        source: impl Into<BoxError>,
    ) -> Self {
        Error::Api {
            message: message.into(),
            status,
            source: Some(source.into()),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// HTTP status attached to an API error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Error::Authentication { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Authentication { message, source } | Error::Api { message, source, .. } => {
                match source {
                    Some(cause) => write!(f, "{message}: {cause}"),
                    None => f.write_str(message),
                }
            }
            Error::Validation(msg) => f.write_str(msg),
            Error::Config(msg) => write!(f, "configuration error: {msg}"),
            Error::Io(err) => write!(f, "io error: {err}"),
            Error::Json(err) => write!(f, "json error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Authentication { source, .. } | Error::Api { source, .. } => source
                .as_ref()
                .map(|cause| cause.as_ref() as &(dyn std::error::Error + 'static)),
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Validation(_) | Error::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
