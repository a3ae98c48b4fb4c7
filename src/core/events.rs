//! Form lifecycle events
//!
//! The controller publishes an event for every state change on an
//! [`EventBus`] backed by `tokio::sync::broadcast`. A UI layer subscribes to
//! drive its feedback (shake on a rejected submit, success and failure
//! panels) without polling the controller.
//!
//! ```text
//! on_field_change ──┐
//! submit ───────────┼──▶ EventBus::publish() ──▶ broadcast channel ──▶ subscribers
//! reset / retry ────┘
//! ```

use crate::core::error::FailureReason;
use crate::core::field::PaymentField;
use crate::core::validation::ValidationErrors;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Something that happened to the payment form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormEvent {
    /// A field was edited and revalidated
    FieldChanged { field: PaymentField, valid: bool },
    /// Submit was refused because some fields are invalid
    SubmissionRejected { errors: ValidationErrors },
    /// The gateway was called
    SubmissionStarted,
    PaymentSucceeded { transaction_id: String },
    PaymentFailed {
        error_code: String,
        reason: FailureReason,
    },
    /// Fields restored to their defaults
    FormReset,
    /// Failure dismissed, fields kept
    RetryRequested,
}

impl FormEvent {
    /// Short name of the event (`field_changed`, `payment_failed`, ...)
    pub fn name(&self) -> &'static str {
        match self {
            FormEvent::FieldChanged { .. } => "field_changed",
            FormEvent::SubmissionRejected { .. } => "submission_rejected",
            FormEvent::SubmissionStarted => "submission_started",
            FormEvent::PaymentSucceeded { .. } => "payment_succeeded",
            FormEvent::PaymentFailed { .. } => "payment_failed",
            FormEvent::FormReset => "form_reset",
            FormEvent::RetryRequested => "retry_requested",
        }
    }
}

/// Envelope wrapping a form event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event: FormEvent,
}

impl EventEnvelope {
    pub fn new(event: FormEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone; all clones share the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// Receivers lagging more than `capacity` events behind lose the oldest
    /// ones.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails. Without subscribers the event is dropped. Returns the
    /// number of receivers that will see it.
    pub fn publish(&self, event: FormEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Receive every event published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
