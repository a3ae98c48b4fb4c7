//! Typed error handling for the payment form
//!
//! Field validation problems are not Rust errors: they are user-visible
//! messages collected in [`ValidationErrors`](crate::core::validation::ValidationErrors).
//! The types here cover everything else.
//!
//! # Error Categories
//!
//! - [`FormError`]: misuse of the form (unknown field, illegal transition)
//! - [`GatewayError`]: the submission gateway could not complete a call
//! - [`ConfigError`]: invalid configuration values
//!
//! [`FailureReason`] classifies how a payment attempt ended in failure.
//!
//! # Example
//!
//! ```rust,ignore
//! match controller.retry().await {
//!     Ok(()) => {}
//!     Err(FormError::InvalidTransition { from, .. }) => {
//!         println!("nothing to retry while {}", from);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Form Errors
// =============================================================================

/// Errors raised by the form state machine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The requested action is not allowed in the current status
    #[error("cannot {action} while {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },

    /// A submission is awaiting the gateway and cannot be interrupted
    #[error("a payment submission is already in flight")]
    SubmissionInFlight,

    /// The task settling a submission stopped before finishing
    #[error("submission task aborted: {0}")]
    Aborted(String),

    #[error("unknown form field: {0}")]
    UnknownField(String),

    #[error("unknown payment method: {0}")]
    UnknownPaymentMethod(String),
}

impl FormError {
    pub fn error_code(&self) -> &'static str {
        match self {
            FormError::InvalidTransition { .. } => "INVALID_TRANSITION",
            FormError::SubmissionInFlight => "SUBMISSION_IN_FLIGHT",
            FormError::Aborted(_) => "SUBMISSION_ABORTED",
            FormError::UnknownField(_) => "UNKNOWN_FIELD",
            FormError::UnknownPaymentMethod(_) => "UNKNOWN_PAYMENT_METHOD",
        }
    }
}

// =============================================================================
// Gateway Errors
// =============================================================================

/// Failures of the submission gateway itself
///
/// A declined payment is not an error: it is a regular
/// [`GatewayOutcome::Declined`](crate::gateway::GatewayOutcome::Declined).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The processor could not be reached
    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),

    /// The processor refused the request as malformed
    #[error("payment gateway rejected the request: {0}")]
    Rejected(String),

    #[error("payment gateway internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn error_code(&self) -> &'static str {
        match self {
            GatewayError::Unavailable(_) => "GATEWAY_UNAVAILABLE",
            GatewayError::Rejected(_) => "GATEWAY_REJECTED",
            GatewayError::Internal(_) => "GATEWAY_INTERNAL",
        }
    }
}

/// Why a submission ended in failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The processor answered with a decline
    Declined,
    /// The processor did not answer in time
    Timeout,
    /// The gateway call itself failed
    GatewayError,
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Invalid value in configuration
    #[error("invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}
