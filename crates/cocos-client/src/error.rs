use serde_json::Value;
use thiserror::Error;

use cocos_core::ValidationError;

/// Error taxonomy for every public client operation.
///
/// Validation failures are raised before any network call; transport,
/// authentication and server errors propagate unchanged to the caller.
/// The only recovery this layer performs is the single 401 retry inside
/// the request executor.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller bug or invalid setup. Never retried.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Login or challenge failed, or a 401 survived the single retry.
    /// Fatal to the session; the caller must authenticate again.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Remote 500 with the parsed error body attached. Not retried.
    #[error("server error 500: {body}")]
    Server { body: Value },

    /// No response was obtained from the transport. Not retried here.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not the structured JSON the API promises.
    #[error("response body is not valid JSON: {0}")]
    Decode(String),

    /// Domain invariant violated; the request was never sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// Stable machine-readable code, mirrored in logs.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "client.configuration",
            Self::Authentication(_) => "client.authentication",
            Self::Server { .. } => "client.server",
            Self::Transport(_) => "client.transport",
            Self::Decode(_) => "client.decode",
            Self::Validation(_) => "client.validation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_convert_transparently() {
        let error: ApiError = ValidationError::QueryTooShort.into();
        assert_eq!(error.code(), "client.validation");
        assert_eq!(
            error.to_string(),
            "search query must be at least 2 characters long"
        );
    }

    #[test]
    fn server_error_displays_parsed_body() {
        let error = ApiError::Server {
            body: serde_json::json!({"message": "boom"}),
        };
        assert!(error.to_string().contains("boom"));
    }
}
