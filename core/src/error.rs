use std::fmt;
use thiserror::Error;

/// The error type for edgegrid operations
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Not all of client token, client secret, access token and host could be assembled
    InsufficientCredentials,

    /// The requested section does not exist in the credentials file
    InvalidSection,

    /// A section was found but its key/value data is unusable
    InvalidSectionData,

    /// Request cannot be built or signed (bad uri, header, redirect location, etc.)
    RequestInvalid,

    /// The HTTP transport failed to deliver the request
    TransportError,

    /// A redirect chain went past the configured maximum number of hops
    RedirectLoopExceeded,

    /// Unexpected errors (I/O, encoding, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check if this error comes from resolving credentials
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InsufficientCredentials
                | ErrorKind::InvalidSection
                | ErrorKind::InvalidSectionData
        )
    }
}

// Convenience constructors
impl Error {
    /// Create an insufficient credentials error
    pub fn insufficient_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InsufficientCredentials, message)
    }

    /// Create an invalid section error
    pub fn invalid_section(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSection, message)
    }

    /// Create an invalid section data error
    pub fn invalid_section_data(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSectionData, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TransportError, message)
    }

    /// Create a redirect loop exceeded error
    pub fn redirect_loop_exceeded(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RedirectLoopExceeded, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InsufficientCredentials => write!(f, "insufficient credentials"),
            ErrorKind::InvalidSection => write!(f, "invalid section"),
            ErrorKind::InvalidSectionData => write!(f, "invalid section data"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::TransportError => write!(f, "transport error"),
            ErrorKind::RedirectLoopExceeded => write!(f, "redirect loop exceeded"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::ToStrError> for Error {
    fn from(err: http::header::ToStrError) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
