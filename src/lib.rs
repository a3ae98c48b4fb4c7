//! # payform
//!
//! The core of a checkout form: keystroke reformatting, field validation and
//! a submission state machine that talks to an injected payment gateway.
//!
//! ## Features
//!
//! - **Pure Field Rules**: `reformat` and `validate_field` are plain functions
//! - **Sparse Errors**: one message per invalid field, cleared as soon as it is fixed
//! - **Submission Lifecycle**: idle → submitting → succeeded / failed, with reset and retry
//! - **Injected Gateway**: any `SubmissionGateway`; simulated and scripted ones included
//! - **Optional Timeout**: a slow gateway ends in a distinct `timeout` failure
//! - **Lifecycle Events**: every transition is broadcast on an `EventBus`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use payform::prelude::*;
//!
//! let controller = PaymentFormController::new(Arc::new(SimulatedGateway::default()));
//!
//! controller.on_field_change(PaymentField::CardNumber, "4242424242424242").await;
//! controller.on_field_change(PaymentField::ExpiryDate, "1230").await;
//! controller.on_field_change(PaymentField::Cvv, "123").await;
//! controller.on_field_change(PaymentField::CardholderName, "Ada Lovelace").await;
//! controller.on_field_change(PaymentField::Email, "ada@example.com").await;
//!
//! match controller.submit().await? {
//!     SubmitOutcome::Succeeded(receipt) => println!("{}", receipt.transaction_id),
//!     SubmitOutcome::Failed(failure) => {
//!         println!("{}", failure.error_code);
//!         controller.retry().await?;
//!     }
//!     SubmitOutcome::Rejected { errors } => println!("{:?}", errors),
//!     SubmitOutcome::AlreadyInFlight => {}
//! }
//! ```

pub mod config;
pub mod core;
pub mod form;
pub mod gateway;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Model ===
    pub use crate::core::{
        card::CardBrand,
        field::{PaymentField, PaymentFormData, PaymentMethod},
        validation::{ValidationErrors, reformat, validate_field, validate_form},
    };

    // === Plumbing ===
    pub use crate::core::{
        clock::{Clock, FixedClock, SystemClock},
        error::{ConfigError, FailureReason, FormError, GatewayError},
        events::{EventBus, EventEnvelope, FormEvent},
    };

    // === Form ===
    pub use crate::form::{
        FieldChange, FormState, PaymentFailure, PaymentFormController, PaymentReceipt,
        SubmissionStatus, SubmitOutcome,
    };

    // === Gateway ===
    pub use crate::gateway::{
        GatewayOutcome, ScriptedGateway, ScriptedResponse, SimulatedGateway, SubmissionGateway,
    };

    // === Config ===
    pub use crate::config::{FormConfig, SimulationConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
