//! Error types for Insightly API operations.

use thiserror::Error;

/// Errors that can occur during Insightly API operations.
///
/// The first five variants map 1:1 from HTTP status codes returned by the
/// API. Each of them carries the response body text and the request URL.
#[derive(Debug, Error)]
pub enum InsightlyError {
    /// HTTP 400: a required parameter was missing or invalid.
    #[error("{message} at {url}")]
    InvalidParameter { message: String, url: String },

    /// HTTP 401: the API key was rejected.
    #[error("{message} at {url}")]
    Unauthorized { message: String, url: String },

    /// HTTP 403: the API key lacks permission for this resource.
    #[error("{message} at {url}")]
    NoPermission { message: String, url: String },

    /// HTTP 404: the resource does not exist on the server.
    #[error("{message} at {url}")]
    NotFound { message: String, url: String },

    /// Any other non-2xx response.
    #[error("{message} at {url} (HTTP status: {status})")]
    ResourceUnavailable {
        message: String,
        url: String,
        status: u16,
    },

    /// A link or sub-record is not present in the parent's local collection.
    #[error("{entity} {id} does not exist")]
    DoesNotExist { entity: &'static str, id: i64 },

    /// A search filter was not a key/value mapping.
    #[error("Invalid search filter: {0}")]
    InvalidFilter(String),

    /// The operation needs a server-assigned identifier that is not set yet.
    #[error("{entity} has no identifier; save it first")]
    MissingId { entity: &'static str },

    /// The endpoint table has no entry for this resource/operation pair.
    #[error("{resource} does not support {operation}")]
    Unsupported {
        resource: &'static str,
        operation: &'static str,
    },

    /// The server answered 2xx with a body of an unexpected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Configuration is missing or incomplete.
    #[error("Insightly configuration required: {0}")]
    ConfigMissing(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl InsightlyError {
    /// Map a non-success HTTP status to its error variant.
    pub(crate) fn from_status(status: u16, message: String, url: String) -> Self {
        match status {
            400 => Self::InvalidParameter { message, url },
            401 => Self::Unauthorized { message, url },
            403 => Self::NoPermission { message, url },
            404 => Self::NotFound { message, url },
            _ => Self::ResourceUnavailable {
                message,
                url,
                status,
            },
        }
    }

    /// The HTTP status code behind this error, if it came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::InvalidParameter { .. } => Some(400),
            Self::Unauthorized { .. } => Some(401),
            Self::NoPermission { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::ResourceUnavailable { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The request URL, for errors mapped from an HTTP response.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::InvalidParameter { url, .. }
            | Self::Unauthorized { url, .. }
            | Self::NoPermission { url, .. }
            | Self::NotFound { url, .. }
            | Self::ResourceUnavailable { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Result type alias for Insightly operations.
pub type Result<T> = core::result::Result<T, InsightlyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_is_distinct() {
        let url = "https://api.insight.ly/v2.3/Contacts/1".to_string();
        let cases = [400u16, 401, 403, 404, 500];
        let errors: Vec<_> = cases
            .iter()
            .map(|s| InsightlyError::from_status(*s, "body".to_string(), url.clone()))
            .collect();

        assert!(matches!(errors[0], InsightlyError::InvalidParameter { .. }));
        assert!(matches!(errors[1], InsightlyError::Unauthorized { .. }));
        assert!(matches!(errors[2], InsightlyError::NoPermission { .. }));
        assert!(matches!(errors[3], InsightlyError::NotFound { .. }));
        assert!(matches!(
            errors[4],
            InsightlyError::ResourceUnavailable { status: 500, .. }
        ));

        for (err, status) in errors.iter().zip(cases) {
            assert_eq!(err.status_code(), Some(status));
            assert_eq!(err.url(), Some(url.as_str()));
            assert!(err.to_string().contains("body at https://api.insight.ly"));
        }
    }

    #[test]
    fn test_does_not_exist_display() {
        let err = InsightlyError::DoesNotExist {
            entity: "ContactLink",
            id: 42,
        };
        assert_eq!(err.to_string(), "ContactLink 42 does not exist");
        assert_eq!(err.status_code(), None);
    }
}
