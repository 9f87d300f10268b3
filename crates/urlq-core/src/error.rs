//! Error type shared by the URL model.

use thiserror::Error;

/// Convenience alias for results produced by `urlq-core`.
pub type Result<T, E = UrlError> = std::result::Result<T, E>;

/// Failure raised by parsing, reading or mutating a [`ParsedUrl`](crate::url_model::ParsedUrl).
///
/// Every failure is local to the call that produced it; a `ParsedUrl` that
/// returned an error is left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// A required argument was missing or empty, or the charset label is unknown.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The input is not a structurally valid URL.
    #[error("malformed url {input:?}: {reason}")]
    MalformedInput { input: String, reason: String },

    /// A value could not be percent-encoded or decoded under the charset.
    #[error("{charset}: {reason}")]
    Encoding { charset: String, reason: String },
}

impl UrlError {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        UrlError::MalformedInput {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn encoding(charset: &str, reason: impl Into<String>) -> Self {
        UrlError::Encoding {
            charset: charset.to_string(),
            reason: reason.into(),
        }
    }

    /// Short machine-friendly name of the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            UrlError::InvalidArgument(_) => "invalid_argument",
            UrlError::MalformedInput { .. } => "malformed_input",
            UrlError::Encoding { .. } => "encoding",
        }
    }
}
