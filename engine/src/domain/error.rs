//! Engine-level error types.
//!
//! These errors are transport agnostic. Whatever drives the engine (a
//! desktop shell, a web view, a test harness) maps them onto its own
//! presentation; nothing in this module knows about HTTP or SQL.

use serde::{Deserialize, Serialize};

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The mutation conflicts with existing state (e.g. a duplicate code).
    Conflict,
    /// The referenced route or delivery point does not exist.
    NotFound,
    /// A collaborator is temporarily unreachable; the caller may retry.
    ServiceUnavailable,
    /// An unexpected error occurred inside the engine.
    InternalError,
}

/// Engine error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use engine::domain::error::{EngineError, ErrorCode};
///
/// let err = EngineError::not_found("missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineError {
    code: ErrorCode,
    message: String,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineErrorValidationError {
    EmptyMessage,
}

impl std::fmt::Display for EngineErrorValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for EngineErrorValidationError {}

impl EngineError {
    /// Create a new error, panicking if validation fails.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, EngineErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(EngineErrorValidationError::EmptyMessage);
        }
        Ok(Self { code, message })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message for the caller.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::invalid_request(EngineError::invalid_request("bad"), ErrorCode::InvalidRequest)]
    #[case::conflict(EngineError::conflict("clash"), ErrorCode::Conflict)]
    #[case::not_found(EngineError::not_found("missing"), ErrorCode::NotFound)]
    #[case::service_unavailable(
        EngineError::service_unavailable("down"),
        ErrorCode::ServiceUnavailable
    )]
    #[case::internal(EngineError::internal("boom"), ErrorCode::InternalError)]
    fn constructors_set_expected_code(#[case] err: EngineError, #[case] code: ErrorCode) {
        assert_eq!(err.code(), code);
    }

    #[rstest]
    fn try_new_rejects_blank_message() {
        let result = EngineError::try_new(ErrorCode::InternalError, "   ");
        assert_eq!(result, Err(EngineErrorValidationError::EmptyMessage));
    }

    #[rstest]
    fn display_renders_message() {
        let err = EngineError::conflict("code 12 already in use");
        assert_eq!(err.to_string(), "code 12 already in use");
    }
}
