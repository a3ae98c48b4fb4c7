//! Submission gateway: the collaborator that performs the payment attempt
//!
//! The controller only depends on the [`SubmissionGateway`] trait. Two
//! implementations ship with the crate:
//!
//! - [`SimulatedGateway`]: fixed delay and random declines, for demos
//! - [`ScriptedGateway`]: replays predetermined outcomes, for tests
//!
//! A real processor integration implements the same trait.

pub mod scripted;
pub mod simulated;

pub use scripted::{ScriptedGateway, ScriptedResponse};
pub use simulated::SimulatedGateway;

use crate::core::card::{CardBrand, last_four};
use crate::core::error::GatewayError;
use crate::core::field::PaymentFormData;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Answer of the payment processor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GatewayOutcome {
    Approved {
        transaction_id: String,
        last_four: String,
        method_label: String,
    },
    Declined {
        error_code: String,
    },
}

impl GatewayOutcome {
    /// Approval for `data` with a fresh transaction id
    pub fn approved_for(data: &PaymentFormData) -> Self {
        GatewayOutcome::Approved {
            transaction_id: generate_transaction_id(),
            last_four: last_four(&data.card_number),
            method_label: CardBrand::detect(&data.card_number).label(),
        }
    }

    /// Decline with a fresh error code
    pub fn declined() -> Self {
        GatewayOutcome::Declined {
            error_code: generate_error_code(),
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, GatewayOutcome::Approved { .. })
    }
}

/// Performs one payment attempt for a snapshot of the form
///
/// Implementations must not retry on their own; the controller issues
/// exactly one call per accepted submit.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit(&self, data: &PaymentFormData) -> Result<GatewayOutcome, GatewayError>;
}

/// `TXN` followed by the current Unix time in milliseconds
pub fn generate_transaction_id() -> String {
    format!("TXN{}", Utc::now().timestamp_millis())
}

/// `ERR` followed by the current Unix time in milliseconds
pub fn generate_error_code() -> String {
    format!("ERR{}", Utc::now().timestamp_millis())
}
