use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

/// Error kinds for docmap operations.
///
/// Each kind describes a category of failure. docmap performs no local
/// recovery; every error is surfaced synchronously to the immediate caller.
///
/// # Examples
///
/// ```rust,ignore
/// use docmap::errors::{DocmapError, ErrorKind, DocmapResult};
///
/// fn example() -> DocmapResult<()> {
///     Err(DocmapError::new("no active connection", ErrorKind::NotConnected))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// The driver could not establish a connection (bad URI, unreachable
    /// or unauthorized database).
    ConnectionFailed,
    /// A collection-resolving operation was called before `connect`.
    NotConnected,
    /// A value could not be converted to or from the native identifier type.
    InvalidId,
    /// The operation is not valid in the current context.
    InvalidOperation,
    /// A document with the same identifier already exists.
    DuplicateKey,
    /// Error reported by the underlying driver during an operation.
    DriverError,
    /// Internal error (usually indicates a bug).
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ConnectionFailed => write!(f, "Connection failed"),
            ErrorKind::NotConnected => write!(f, "Not connected"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::DuplicateKey => write!(f, "Duplicate key"),
            ErrorKind::DriverError => write!(f, "Driver error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom docmap error type.
///
/// `DocmapError` carries the error message, kind, and an optional cause for
/// error chaining.
///
/// # Examples
///
/// ```rust,ignore
/// use docmap::errors::{DocmapError, ErrorKind};
///
/// // Create a simple error
/// let err = DocmapError::new("malformed id", ErrorKind::InvalidId);
///
/// // Create an error with a cause
/// let cause = DocmapError::new("connection refused", ErrorKind::ConnectionFailed);
/// let err = DocmapError::new_with_cause("connect failed", ErrorKind::ConnectionFailed, cause);
/// ```
#[derive(Clone)]
pub struct DocmapError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<DocmapError>>,
}

impl DocmapError {
    /// Creates a new `DocmapError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        DocmapError {
            message: message.to_string(),
            error_kind,
            cause: None,
        }
    }

    /// Creates a new `DocmapError` with a cause error attached.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: DocmapError) -> Self {
        DocmapError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&DocmapError> {
        self.cause.as_deref()
    }
}

impl Display for DocmapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for DocmapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message followed by the cause chain
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{} ({})", self.message, self.error_kind),
        }
    }
}

impl Error for DocmapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for docmap operations.
///
/// `DocmapResult<T>` is shorthand for `Result<T, DocmapError>`.
/// All fallible docmap operations return this type.
pub type DocmapResult<T> = Result<T, DocmapError>;

// From trait implementations for automatic error conversion
impl From<String> for DocmapError {
    fn from(msg: String) -> Self {
        DocmapError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for DocmapError {
    fn from(msg: &str) -> Self {
        DocmapError::new(msg, ErrorKind::InternalError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docmap_error_new_creates_error() {
        let error = DocmapError::new("an error occurred", ErrorKind::DriverError);
        assert_eq!(error.message(), "an error occurred");
        assert_eq!(error.kind(), &ErrorKind::DriverError);
        assert!(error.cause().is_none());
    }

    #[test]
    fn docmap_error_new_with_cause_creates_error() {
        let cause = DocmapError::new("connection refused", ErrorKind::ConnectionFailed);
        let error =
            DocmapError::new_with_cause("connect failed", ErrorKind::ConnectionFailed, cause);
        assert_eq!(error.message(), "connect failed");
        assert_eq!(error.kind(), &ErrorKind::ConnectionFailed);
        assert!(error.cause().is_some());
        assert_eq!(error.cause().unwrap().message(), "connection refused");
    }

    #[test]
    fn error_source_exposes_cause() {
        let cause = DocmapError::new("root", ErrorKind::DriverError);
        let error = DocmapError::new_with_cause("outer", ErrorKind::DriverError, cause);
        let source = error.source();
        assert!(source.is_some());
        assert_eq!(source.unwrap().to_string(), "root");
    }

    #[test]
    fn display_shows_message() {
        let error = DocmapError::new("malformed id", ErrorKind::InvalidId);
        assert_eq!(format!("{}", error), "malformed id");
    }

    #[test]
    fn debug_shows_kind_and_chain() {
        let error = DocmapError::new("malformed id", ErrorKind::InvalidId);
        assert_eq!(format!("{:?}", error), "malformed id (Invalid ID)");

        let cause = DocmapError::new("root", ErrorKind::DriverError);
        let chained = DocmapError::new_with_cause("outer", ErrorKind::DriverError, cause);
        assert!(format!("{:?}", chained).contains("Caused by: root"));
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::NotConnected.to_string(), "Not connected");
        assert_eq!(ErrorKind::DuplicateKey.to_string(), "Duplicate key");
    }

    #[test]
    fn from_string_conversions() {
        let error: DocmapError = "boom".into();
        assert_eq!(error.kind(), &ErrorKind::InternalError);
        let error: DocmapError = String::from("boom").into();
        assert_eq!(error.message(), "boom");
    }
}
