//! Error types for the view catalog pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable error codes, used in logs and by tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The catalog could not be encoded to JSON.
    EncodingFailed,
    /// Two server views resolve to the same menu link.
    DuplicateRoute,
    /// No server route source is available for the current request.
    SourceUnavailable,
    /// The client route file could not be read or parsed.
    RouteFileInvalid,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EncodingFailed => write!(f, "ENCODING_FAILED"),
            Self::DuplicateRoute => write!(f, "DUPLICATE_ROUTE"),
            Self::SourceUnavailable => write!(f, "SOURCE_UNAVAILABLE"),
            Self::RouteFileInvalid => write!(f, "ROUTE_FILE_INVALID"),
        }
    }
}

/// Errors raised while building or emitting a view catalog.
///
/// None of these fail a page response; the emitter logs them and carries on
/// with whatever part of the catalog is still valid.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to encode view catalog: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("server routes '{first}' and '{second}' both resolve to menu link '{link}'")]
    DuplicateRoute {
        link: String,
        first: String,
        second: String,
    },

    #[error("server route source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("failed to load route file {path}: {message}")]
    RouteFile { path: String, message: String },
}

impl CatalogError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Encoding(_) => ErrorCode::EncodingFailed,
            Self::DuplicateRoute { .. } => ErrorCode::DuplicateRoute,
            Self::SourceUnavailable(_) => ErrorCode::SourceUnavailable,
            Self::RouteFile { .. } => ErrorCode::RouteFileInvalid,
        }
    }

    pub fn source_unavailable(reason: impl Into<String>) -> Self {
        Self::SourceUnavailable(reason.into())
    }

    pub fn route_file(path: impl fmt::Display, message: impl fmt::Display) -> Self {
        Self::RouteFile {
            path: path.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serialization() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::DuplicateRoute).unwrap(),
            "\"DUPLICATE_ROUTE\""
        );
        assert_eq!(ErrorCode::SourceUnavailable.to_string(), "SOURCE_UNAVAILABLE");
    }

    #[test]
    fn test_duplicate_route_names_both_sources() {
        let err = CatalogError::DuplicateRoute {
            link: "/users".to_string(),
            first: "/users/:id?".to_string(),
            second: "/users/*".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("/users/:id?"));
        assert!(message.contains("/users/*"));
        assert_eq!(err.code(), ErrorCode::DuplicateRoute);
    }
}
