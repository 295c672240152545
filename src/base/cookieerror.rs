use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CookieError {
    // Environment / primitive errors
    #[error("Invalid cookie name: {name:?}")]
    InvalidCookieName { name: String },
    #[error("Invalid header")]
    InvalidHeader,
    #[error("Headers already sent")]
    HeadersAlreadySent,
    #[error("Environment does not support native SameSite cookies")]
    NativeSameSiteUnsupported,

    // Attribute / configuration errors
    #[error("Invalid SameSite value: {value:?}")]
    InvalidSameSite { value: String },
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Unknown cookie error ({0})")]
    Unknown(i32),
}

impl CookieError {
    /// Create an invalid cookie name error.
    pub fn invalid_cookie_name(name: impl Into<String>) -> Self {
        CookieError::InvalidCookieName { name: name.into() }
    }

    /// Create an invalid SameSite error.
    pub fn invalid_same_site(value: impl Into<String>) -> Self {
        CookieError::InvalidSameSite {
            value: value.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        CookieError::Config {
            message: message.into(),
        }
    }

    pub fn as_i32(&self) -> i32 {
        match self {
            CookieError::InvalidCookieName { .. } => -1000,
            CookieError::InvalidHeader => -1001,
            CookieError::HeadersAlreadySent => -1002,
            CookieError::NativeSameSiteUnsupported => -1003,
            CookieError::InvalidSameSite { .. } => -1100,
            CookieError::Config { .. } => -1101,
            CookieError::Unknown(code) => *code,
        }
    }

    /// Whether the failure came from the hosting environment rather than
    /// from caller input.
    pub fn is_environment_failure(&self) -> bool {
        matches!(
            self,
            CookieError::HeadersAlreadySent | CookieError::NativeSameSiteUnsupported
        )
    }
}

impl From<i32> for CookieError {
    fn from(code: i32) -> Self {
        match code {
            -1000 => CookieError::InvalidCookieName {
                name: String::new(),
            },
            -1001 => CookieError::InvalidHeader,
            -1002 => CookieError::HeadersAlreadySent,
            -1003 => CookieError::NativeSameSiteUnsupported,
            -1100 => CookieError::InvalidSameSite {
                value: String::new(),
            },
            -1101 => CookieError::Config {
                message: String::new(),
            },
            _ => CookieError::Unknown(code),
        }
    }
}

impl From<http::header::InvalidHeaderValue> for CookieError {
    fn from(_: http::header::InvalidHeaderValue) -> Self {
        CookieError::InvalidHeader
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for CookieError {
    fn from(err: serde_json::Error) -> Self {
        CookieError::Config {
            message: err.to_string(),
        }
    }
}
