//! Binding error types.
//!
//! [`BindError`] is returned by every binder operation. Each error knows which
//! part of the request it came from ([`BindSource`]) and maps to an HTTP
//! status code and a stable error code for error envelopes.

use http::StatusCode;
use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias using [`BindError`].
pub type BindResult<T> = Result<T, BindError>;

/// Part of the request a value was being bound from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindSource {
    /// Route path parameters (e.g., `/users/{id}`)
    Path,
    /// Query string parameters
    Query,
    /// Request body (text, JSON, XML)
    Body,
    /// Multipart form data
    Multipart,
}

impl fmt::Display for BindSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Query => write!(f, "query"),
            Self::Body => write!(f, "body"),
            Self::Multipart => write!(f, "multipart"),
        }
    }
}

/// Failure converting raw wire strings into a typed destination.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The literal cannot be parsed as the destination's kind.
    #[error("cannot parse {value:?} as {kind}")]
    InvalidLiteral {
        /// Name of the destination kind (e.g. `i64`, `bool`).
        kind: &'static str,
        /// The offending literal.
        value: String,
    },

    /// Several values were supplied for a scalar destination.
    #[error("expected a single value, got {count}")]
    NotASequence {
        /// Number of values supplied.
        count: usize,
    },

    /// The destination cannot be written in place.
    #[error("destination is not addressable")]
    PointerTarget,
}

impl ConvertError {
    /// Creates an [`ConvertError::InvalidLiteral`] for `T`.
    pub fn invalid<T: ?Sized>(value: impl Into<String>) -> Self {
        Self::InvalidLiteral {
            kind: std::any::type_name::<T>(),
            value: value.into(),
        }
    }
}

/// Error that occurs while binding request data.
#[derive(Debug, Error)]
pub enum BindError {
    /// The destination is not addressable and cannot be written in place.
    #[error("binding target must be addressable")]
    PointerTarget,

    /// A required query parameter is absent.
    #[error("missing required query parameter: {key}")]
    QueryMissing {
        /// The query key that was looked up.
        key: String,
    },

    /// A required path parameter is absent or empty.
    #[error("missing required path parameter: {key}")]
    PathValueMissing {
        /// The path key that was looked up.
        key: String,
    },

    /// A raw value could not be converted into the destination.
    #[error("invalid {origin} parameter '{key}': {error}")]
    Convert {
        /// Where the raw value came from.
        origin: BindSource,
        /// The key the value was bound from.
        key: String,
        /// The conversion failure.
        #[source]
        error: ConvertError,
    },

    /// A multipart operation was attempted on a non-multipart request.
    #[error("request is not multipart/form-data")]
    InvalidMultipart,

    /// The multipart body could not be decoded.
    #[error("malformed multipart body: {0}")]
    Multipart(#[from] multer::Error),

    /// The multipart body exceeded the configured size limit.
    #[error("multipart body exceeds limit of {limit} bytes")]
    MultipartTooLarge {
        /// The limit in bytes.
        limit: u64,
    },

    /// The multipart body carried more parts than allowed.
    #[error("multipart body has more than {limit} parts")]
    TooManyParts {
        /// The part limit.
        limit: usize,
    },

    /// An uploaded file part could not be opened.
    #[error("failed to open uploaded file '{file}' in field '{field}'")]
    OpenFile {
        /// Form field name.
        field: String,
        /// Client-supplied filename.
        file: String,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// An uploaded file part could not be read.
    #[error("failed to read uploaded file '{file}' in field '{field}'")]
    ReadData {
        /// Form field name.
        field: String,
        /// Client-supplied filename.
        file: String,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// The JSON body could not be decoded.
    #[error("failed to decode JSON body: {0}")]
    Json(#[from] serde_json::Error),

    /// The XML body could not be decoded.
    #[error("failed to decode XML body: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// The text body is not valid UTF-8.
    #[error("body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Reading the request body failed.
    #[error("failed to read request body: {0}")]
    Io(#[from] io::Error),
}

impl BindError {
    /// Creates a [`BindError::QueryMissing`].
    pub fn query_missing(key: impl Into<String>) -> Self {
        Self::QueryMissing { key: key.into() }
    }

    /// Creates a [`BindError::PathValueMissing`].
    pub fn path_value_missing(key: impl Into<String>) -> Self {
        Self::PathValueMissing { key: key.into() }
    }

    /// Wraps a conversion failure with the key and source it came from.
    ///
    /// A non-addressable destination stays a [`BindError::PointerTarget`].
    pub fn convert(source: BindSource, key: impl Into<String>, error: ConvertError) -> Self {
        match error {
            ConvertError::PointerTarget => Self::PointerTarget,
            error => Self::Convert {
                origin: source,
                key: key.into(),
                error,
            },
        }
    }

    /// Returns the part of the request this error relates to, if any.
    #[must_use]
    pub fn bind_source(&self) -> Option<BindSource> {
        match self {
            Self::PointerTarget => None,
            Self::QueryMissing { .. } => Some(BindSource::Query),
            Self::PathValueMissing { .. } => Some(BindSource::Path),
            Self::Convert { origin, .. } => Some(*origin),
            Self::InvalidMultipart
            | Self::Multipart(_)
            | Self::MultipartTooLarge { .. }
            | Self::TooManyParts { .. }
            | Self::OpenFile { .. }
            | Self::ReadData { .. } => Some(BindSource::Multipart),
            Self::Json(_) | Self::Xml(_) | Self::InvalidUtf8(_) | Self::Io(_) => {
                Some(BindSource::Body)
            }
        }
    }

    /// Returns the key or field name involved, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::QueryMissing { key }
            | Self::PathValueMissing { key }
            | Self::Convert { key, .. } => Some(key),
            Self::OpenFile { field, .. } | Self::ReadData { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::QueryMissing { .. }
            | Self::PathValueMissing { .. }
            | Self::Convert { .. }
            | Self::Multipart(_)
            | Self::Json(_)
            | Self::Xml(_)
            | Self::InvalidUtf8(_) => StatusCode::BAD_REQUEST,
            Self::InvalidMultipart => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::MultipartTooLarge { .. } | Self::TooManyParts { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            Self::PointerTarget | Self::OpenFile { .. } | Self::ReadData { .. } | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error code suitable for error envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::PointerTarget => "POINTER_TARGET",
            Self::QueryMissing { .. } => "QUERY_MISSING",
            Self::PathValueMissing { .. } => "PATH_VALUE_MISSING",
            Self::Convert { .. } => "INVALID_PARAMETER",
            Self::InvalidMultipart => "INVALID_MULTIPART",
            Self::Multipart(_) => "MALFORMED_MULTIPART",
            Self::MultipartTooLarge { .. } | Self::TooManyParts { .. } => "PAYLOAD_TOO_LARGE",
            Self::OpenFile { .. } => "OPEN_FILE",
            Self::ReadData { .. } => "READ_DATA",
            Self::Json(_) | Self::Xml(_) | Self::InvalidUtf8(_) => "DESERIALIZATION_FAILED",
            Self::Io(_) => "BODY_READ_FAILED",
        }
    }
}
