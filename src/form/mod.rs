//! Payment form: pure state reducer and the async controller around it

pub mod controller;
pub mod state;

pub use controller::PaymentFormController;
pub use state::{
    FieldChange, FormState, GatewayResolution, PaymentFailure, PaymentReceipt, SubmissionStatus,
    SubmitDecision, SubmitOutcome,
};
