//! Gateway error types and the structured error frame.
//!
//! [`GatewayError`] is the central error type for the gateway. Every
//! failure while handling a websocket request is answered with exactly one
//! [`ErrorResponse`] frame built from the error's code and message.

use serde::Serialize;

use crate::domain::CommandSpec;

/// Structured JSON error frame sent back over the websocket.
///
/// All error frames follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "unrecognized request type: \"teleport\""
///   }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Numeric error code (see [`GatewayError::error_code`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details, omitted from the frame when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Failure while handling a single websocket request.
///
/// # Error Code Ranges
///
/// | Range     | Category   |
/// |-----------|------------|
/// | 1000–1999 | Request    |
/// | 3000–3999 | Subprocess |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Inbound frame is not valid UTF-8 JSON.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// The `type` field is missing or names an unknown request kind.
    #[error("unrecognized request type: {}", .0.as_deref().unwrap_or("<missing>"))]
    UnrecognizedRequestType(Option<String>),

    /// The external executable could not be started.
    #[error("failed to spawn `{command}`: {source}")]
    SpawnFailure {
        /// Command that failed to start.
        command: CommandSpec,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the child or reading its pipes failed.
    #[error("i/o error while running `{command}`: {source}")]
    ProcessIo {
        /// Command being run.
        command: CommandSpec,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The child ran longer than the configured timeout and was killed.
    #[error("`{command}` timed out after {timeout_secs} s")]
    CommandTimeout {
        /// Command that timed out.
        command: CommandSpec,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::MalformedRequest(_) => 1001,
            Self::UnrecognizedRequestType(_) => 1002,
            Self::Internal(_) => 3000,
            Self::SpawnFailure { .. } => 3001,
            Self::ProcessIo { .. } => 3002,
            Self::CommandTimeout { .. } => 3003,
        }
    }

    /// Returns `true` for errors caused by the client's request rather than
    /// by the gateway or the external tools.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedRequest(_) | Self::UnrecognizedRequestType(_)
        )
    }

    /// Builds the structured error frame for this error.
    #[must_use]
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        }
    }

    /// Serializes the error frame to JSON text.
    #[must_use]
    pub fn to_frame(&self) -> String {
        serde_json::to_string(&self.to_response()).unwrap_or_else(|_| {
            format!(
                r#"{{"error":{{"code":{},"message":"internal error"}}}}"#,
                self.error_code()
            )
        })
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedRequest(err.to_string())
    }
}
