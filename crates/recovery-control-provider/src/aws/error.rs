//! AWS error classification and handling
//!
//! Provides typed errors for AWS SDK operations using the `.code()` method
//! instead of string matching on Debug format.

use aws_sdk_route53recoverycontrolconfig::error::{
    DisplayErrorContext, ProvideErrorMetadata, SdkError,
};
use thiserror::Error;

/// AWS error categories for lifecycle decisions
#[derive(Debug, Error)]
pub enum AwsError {
    /// Resource was not found (deleted out of band, or not yet visible)
    #[error("Resource not found: {message}")]
    NotFound { message: String },

    /// Another operation is in progress on the resource or its cluster
    #[error("Conflicting operation in progress: {message}")]
    Conflict { message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    Throttled,

    /// Caller lacks permission for the operation
    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    /// Request parameters were rejected
    #[error("Invalid request: {message}")]
    Validation { message: String },

    /// Account quota for the resource type reached
    #[error("Service quota exceeded: {message}")]
    QuotaExceeded { message: String },

    /// Generic AWS SDK error with code and message
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AwsError::NotFound { .. })
    }

    /// Check if the same request could succeed later without changes
    pub fn is_transient(&self) -> bool {
        matches!(self, AwsError::Throttled | AwsError::Conflict { .. })
    }

    /// Get a user-friendly suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            AwsError::AccessDenied { .. } => Some(
                "Check that your credentials allow route53-recovery-control-config:* actions.",
            ),
            AwsError::QuotaExceeded { .. } => {
                Some("Request a service limit increase via AWS Service Quotas console.")
            }
            AwsError::Throttled => Some("AWS API rate limit hit. Try again in a moment."),
            AwsError::Conflict { .. } => Some(
                "Another change is still being applied to this cluster. Wait for it to finish and retry.",
            ),
            AwsError::Sdk { code: None, .. } => {
                Some("Check network access to the us-west-2 control plane endpoint.")
            }
            _ => None,
        }
    }
}

/// Known AWS error codes for "not found" conditions
const NOT_FOUND_CODES: &[&str] = &["ResourceNotFoundException"];

/// Known AWS error codes for conflicting in-flight operations
const CONFLICT_CODES: &[&str] = &["ConflictException"];

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &["Throttling", "ThrottlingException", "TooManyRequestsException"];

/// Known AWS error codes for authorization failures
const ACCESS_DENIED_CODES: &[&str] = &["AccessDeniedException", "UnrecognizedClientException"];

/// Known AWS error codes for rejected parameters
const VALIDATION_CODES: &[&str] = &["ValidationException"];

/// Known AWS error codes for quota exhaustion
const QUOTA_CODES: &[&str] = &["ServiceQuotaExceededException"];

/// Classify an AWS error using the error code.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if NOT_FOUND_CODES.contains(&c) => AwsError::NotFound { message },
        Some(c) if CONFLICT_CODES.contains(&c) => AwsError::Conflict { message },
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled,
        Some(c) if ACCESS_DENIED_CODES.contains(&c) => AwsError::AccessDenied { message },
        Some(c) if VALIDATION_CODES.contains(&c) => AwsError::Validation { message },
        Some(c) if QUOTA_CODES.contains(&c) => AwsError::QuotaExceeded { message },
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Classify an SDK error returned by any Recovery Control Config operation.
///
/// Service errors carry a code; dispatch, timeout and response errors do not
/// and become `AwsError::Sdk` with the full error context as message.
pub fn classify_sdk_error<E, R>(error: &SdkError<E, R>) -> AwsError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match error.code() {
        Some(code) => classify_aws_error(Some(code), error.message()),
        None => AwsError::Sdk {
            code: None,
            message: DisplayErrorContext(error).to_string(),
        },
    }
}

/// Find the classified `AwsError` in an anyhow error chain, if any
pub fn find_aws_error(error: &anyhow::Error) -> Option<&AwsError> {
    error.chain().find_map(|cause| cause.downcast_ref::<AwsError>())
}

/// Check whether an anyhow error was caused by a "not found" response
pub fn is_not_found(error: &anyhow::Error) -> bool {
    find_aws_error(error).is_some_and(AwsError::is_not_found)
}

/// Convert a "not found" failure into `Ok(None)`.
///
/// Used by delete paths where a missing resource means there is nothing left to do.
pub fn ignore_not_found<T>(result: anyhow::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if is_not_found(&e) => Ok(None),
        Err(e) => Err(e),
    }
}
