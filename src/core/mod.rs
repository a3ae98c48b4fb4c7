//! Core module containing the form model, validation and shared plumbing

pub mod card;
pub mod clock;
pub mod error;
pub mod events;
pub mod field;
pub mod validation;

pub use card::CardBrand;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, FailureReason, FormError, GatewayError};
pub use events::{EventBus, EventEnvelope, FormEvent};
pub use field::{PaymentField, PaymentFormData, PaymentMethod};
pub use validation::{ValidationErrors, validate_form};
