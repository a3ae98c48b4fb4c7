//! Form state and its transitions
//!
//! [`FormState`] is a plain synchronous reducer: it never awaits and never
//! calls the gateway. The controller drives it and performs the I/O.
//!
//! ```text
//! Idle ──submit (invalid)──▶ Idle
//! Idle ──submit (valid)────▶ Submitting ──approved──────────▶ Succeeded ──reset──▶ Idle
//!                                        ──declined/error───▶ Failed ──retry──▶ Idle (fields kept)
//!                                                                    ──reset──▶ Idle (fields cleared)
//! ```

use crate::core::error::{FailureReason, FormError, GatewayError};
use crate::core::field::{PaymentField, PaymentFormData};
use crate::core::validation::{ValidationErrors, reformat, validate_field, validate_form};
use crate::gateway::{GatewayOutcome, generate_error_code};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Summary shown after an approved payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub transaction_id: String,
    pub last_four: String,
    pub method_label: String,
    pub amount: String,
}

/// Details shown after a failed payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFailure {
    pub error_code: String,
    pub reason: FailureReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Lifecycle of one payment attempt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded(PaymentReceipt),
    Failed(PaymentFailure),
}

impl SubmissionStatus {
    pub fn name(&self) -> &'static str {
        match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Submitting => "submitting",
            SubmissionStatus::Succeeded(_) => "succeeded",
            SubmissionStatus::Failed(_) => "failed",
        }
    }
}

/// Result of editing one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    /// The value was stored and revalidated
    Applied {
        value: String,
        error: Option<String>,
    },
    /// The keystroke was ignored, the stored value is unchanged
    Rejected,
}

/// What `begin_submit` decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Validation passed; call the gateway with this snapshot
    Start(PaymentFormData),
    /// Validation failed; errors are surfaced and the form stays idle
    Rejected(ValidationErrors),
    /// A submission is already awaiting the gateway
    AlreadyInFlight,
}

/// How the gateway call ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayResolution {
    Completed(Result<GatewayOutcome, GatewayError>),
    TimedOut { after: Duration },
}

/// Final answer of a submit action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Rejected { errors: ValidationErrors },
    AlreadyInFlight,
    Succeeded(PaymentReceipt),
    Failed(PaymentFailure),
}

/// Everything the payment form holds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormState {
    data: PaymentFormData,
    errors: ValidationErrors,
    status: SubmissionStatus,
    #[serde(skip)]
    in_flight: Option<PaymentFormData>,
}

impl FormState {
    pub fn new(initial: PaymentFormData) -> Self {
        Self {
            data: initial,
            errors: ValidationErrors::new(),
            status: SubmissionStatus::Idle,
            in_flight: None,
        }
    }

    pub fn data(&self) -> &PaymentFormData {
        &self.data
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.status, SubmissionStatus::Submitting)
    }

    /// Snapshot handed to the gateway by the submission in flight
    pub fn in_flight(&self) -> Option<&PaymentFormData> {
        self.in_flight.as_ref()
    }

    /// Reformat, store and revalidate one field
    ///
    /// Only this field's error is touched. Edits are accepted in any status;
    /// while submitting they do not affect the snapshot already sent.
    pub fn change_field(
        &mut self,
        field: PaymentField,
        raw: &str,
        today: NaiveDate,
    ) -> FieldChange {
        let Some(value) = reformat(field, raw) else {
            return FieldChange::Rejected;
        };

        if self.data.set(field, value.clone()).is_err() {
            return FieldChange::Rejected;
        }

        let error = validate_field(field, &value, today);
        if field.is_validated() {
            self.errors.set(field, error.clone());
        }
        FieldChange::Applied { value, error }
    }

    /// Validate everything and, if clean, move to `Submitting`
    pub fn begin_submit(&mut self, today: NaiveDate) -> Result<SubmitDecision, FormError> {
        match self.status {
            SubmissionStatus::Idle => {}
            SubmissionStatus::Submitting => return Ok(SubmitDecision::AlreadyInFlight),
            _ => {
                return Err(FormError::InvalidTransition {
                    from: self.status.name(),
                    action: "submit",
                });
            }
        }

        self.errors = validate_form(&self.data, today);
        if !self.errors.is_empty() {
            return Ok(SubmitDecision::Rejected(self.errors.clone()));
        }

        let snapshot = self.data.clone();
        self.in_flight = Some(snapshot.clone());
        self.status = SubmissionStatus::Submitting;
        Ok(SubmitDecision::Start(snapshot))
    }

    /// Settle the submission in flight
    pub fn complete_submit(
        &mut self,
        resolution: GatewayResolution,
    ) -> Result<SubmitOutcome, FormError> {
        if !self.is_submitting() {
            return Err(FormError::InvalidTransition {
                from: self.status.name(),
                action: "complete a submission",
            });
        }
        let snapshot = self.in_flight.take().unwrap_or_else(|| self.data.clone());

        let outcome = match resolution {
            GatewayResolution::Completed(Ok(GatewayOutcome::Approved {
                transaction_id,
                last_four,
                method_label,
            })) => SubmitOutcome::Succeeded(PaymentReceipt {
                transaction_id,
                last_four,
                method_label,
                amount: snapshot.amount,
            }),
            GatewayResolution::Completed(Ok(GatewayOutcome::Declined { error_code })) => {
                SubmitOutcome::Failed(PaymentFailure {
                    error_code,
                    reason: FailureReason::Declined,
                    message: None,
                })
            }
            GatewayResolution::Completed(Err(error)) => SubmitOutcome::Failed(PaymentFailure {
                error_code: generate_error_code(),
                reason: FailureReason::GatewayError,
                message: Some(error.to_string()),
            }),
            GatewayResolution::TimedOut { after } => SubmitOutcome::Failed(PaymentFailure {
                error_code: generate_error_code(),
                reason: FailureReason::Timeout,
                message: Some(format!(
                    "payment gateway did not answer within {} ms",
                    after.as_millis()
                )),
            }),
        };

        self.status = match &outcome {
            SubmitOutcome::Succeeded(receipt) => SubmissionStatus::Succeeded(receipt.clone()),
            SubmitOutcome::Failed(failure) => SubmissionStatus::Failed(failure.clone()),
            _ => SubmissionStatus::Idle,
        };
        Ok(outcome)
    }

    /// Restore `defaults`, clear errors and go back to `Idle`
    pub fn reset(&mut self, defaults: PaymentFormData) -> Result<(), FormError> {
        if self.is_submitting() {
            return Err(FormError::SubmissionInFlight);
        }
        self.data = defaults;
        self.errors.clear();
        self.status = SubmissionStatus::Idle;
        Ok(())
    }

    /// Dismiss a failure, keeping the entered values
    pub fn retry(&mut self) -> Result<(), FormError> {
        if !matches!(self.status, SubmissionStatus::Failed(_)) {
            return Err(FormError::InvalidTransition {
                from: self.status.name(),
                action: "retry",
            });
        }
        self.status = SubmissionStatus::Idle;
        Ok(())
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(PaymentFormData::default())
    }
}
