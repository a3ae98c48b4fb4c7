//! Async controller driving a [`FormState`] against a submission gateway

use super::state::{
    FieldChange, FormState, GatewayResolution, SubmissionStatus, SubmitDecision, SubmitOutcome,
};
use crate::config::FormConfig;
use crate::core::clock::{Clock, SystemClock};
use crate::core::error::{FormError, GatewayError};
use crate::core::events::{EventBus, EventEnvelope, FormEvent};
use crate::core::field::{PaymentField, PaymentFormData};
use crate::core::validation::ValidationErrors;
use crate::gateway::SubmissionGateway;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, broadcast};

/// Payment form controller
///
/// Cheap to clone; clones share the same form. Field edits are applied
/// immediately. A submission validates the whole form, then awaits the
/// gateway without holding the form lock, so edits keep working while the
/// call is in flight and a second submit is answered with
/// [`SubmitOutcome::AlreadyInFlight`].
///
/// # Example
///
/// ```rust,ignore
/// let controller = PaymentFormController::new(Arc::new(SimulatedGateway::default()));
/// controller.on_field_change(PaymentField::CardNumber, "4242424242424242").await;
/// match controller.submit().await? {
///     SubmitOutcome::Succeeded(receipt) => println!("paid: {}", receipt.transaction_id),
///     other => println!("{:?}", other),
/// }
/// ```
#[derive(Clone)]
pub struct PaymentFormController {
    state: Arc<RwLock<FormState>>,
    gateway: Arc<dyn SubmissionGateway>,
    clock: Arc<dyn Clock>,
    events: EventBus,
    config: FormConfig,
}

impl PaymentFormController {
    /// Controller with the default configuration and the system clock
    pub fn new(gateway: Arc<dyn SubmissionGateway>) -> Self {
        let config = FormConfig::default();
        Self {
            state: Arc::new(RwLock::new(FormState::new(config.initial_form()))),
            gateway,
            clock: Arc::new(SystemClock),
            events: EventBus::default(),
            config,
        }
    }

    /// Use `config`; the form restarts from its defaults
    ///
    /// Construction-time builder: this swaps in a fresh form, so clones taken
    /// before the call keep sharing the old one.
    pub fn with_config(mut self, config: FormConfig) -> Self {
        self.state = Arc::new(RwLock::new(FormState::new(config.initial_form())));
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Receive lifecycle events from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.events.subscribe()
    }

    /// Apply a keystroke to one field
    pub async fn on_field_change(&self, field: PaymentField, raw: &str) -> FieldChange {
        let today = self.clock.today();
        let change = self.state.write().await.change_field(field, raw, today);

        match &change {
            FieldChange::Applied { error, .. } => {
                tracing::debug!(field = %field, valid = error.is_none(), "Field changed");
                self.events.publish(FormEvent::FieldChanged {
                    field,
                    valid: error.is_none(),
                });
            }
            FieldChange::Rejected => {
                tracing::debug!(field = %field, "Keystroke rejected");
            }
        }
        change
    }

    /// Apply a keystroke to a field named by its user-facing name
    pub async fn on_field_change_str(
        &self,
        name: &str,
        raw: &str,
    ) -> Result<FieldChange, FormError> {
        let field = name.parse()?;
        Ok(self.on_field_change(field, raw).await)
    }

    /// Validate the form and, if clean, submit it to the gateway
    ///
    /// Gateway errors and timeouts never surface as `Err`: they end in
    /// [`SubmitOutcome::Failed`]. `Err` is only returned when submitting is
    /// not allowed in the current status (after a success or failure the
    /// form must be reset or retried first).
    pub async fn submit(&self) -> Result<SubmitOutcome, FormError> {
        let today = self.clock.today();
        let decision = self.state.write().await.begin_submit(today)?;

        let snapshot = match decision {
            SubmitDecision::Start(snapshot) => snapshot,
            SubmitDecision::AlreadyInFlight => {
                tracing::debug!("Submit ignored, a submission is already in flight");
                return Ok(SubmitOutcome::AlreadyInFlight);
            }
            SubmitDecision::Rejected(errors) => {
                tracing::debug!(errors = errors.len(), "Submit rejected by validation");
                self.events.publish(FormEvent::SubmissionRejected {
                    errors: errors.clone(),
                });
                return Ok(SubmitOutcome::Rejected { errors });
            }
        };

        tracing::info!(
            amount = %snapshot.amount,
            method = %snapshot.payment_method,
            "Submitting payment"
        );
        self.events.publish(FormEvent::SubmissionStarted);

        // Settle on a separate task so the form leaves `Submitting` even if
        // the caller stops awaiting this future.
        let worker = self.clone();
        tokio::spawn(async move { worker.settle(snapshot).await })
            .await
            .map_err(|e| FormError::Aborted(e.to_string()))?
    }

    async fn settle(&self, snapshot: PaymentFormData) -> Result<SubmitOutcome, FormError> {
        let resolution =
            call_gateway(self.gateway.clone(), snapshot, self.config.gateway_timeout()).await;
        let outcome = self.state.write().await.complete_submit(resolution)?;

        match &outcome {
            SubmitOutcome::Succeeded(receipt) => {
                tracing::info!(
                    transaction_id = %receipt.transaction_id,
                    last_four = %receipt.last_four,
                    "Payment succeeded"
                );
                self.events.publish(FormEvent::PaymentSucceeded {
                    transaction_id: receipt.transaction_id.clone(),
                });
            }
            SubmitOutcome::Failed(failure) => {
                tracing::warn!(
                    error_code = %failure.error_code,
                    reason = ?failure.reason,
                    detail = failure.message.as_deref().unwrap_or(""),
                    "Payment failed"
                );
                self.events.publish(FormEvent::PaymentFailed {
                    error_code: failure.error_code.clone(),
                    reason: failure.reason,
                });
            }
            _ => {}
        }
        Ok(outcome)
    }

    /// Restore the configured defaults, clear errors and return to idle
    pub async fn reset(&self) -> Result<(), FormError> {
        self.state
            .write()
            .await
            .reset(self.config.initial_form())?;
        tracing::info!("Payment form reset");
        self.events.publish(FormEvent::FormReset);
        Ok(())
    }

    /// Leave the failure state, keeping the entered values
    pub async fn retry(&self) -> Result<(), FormError> {
        self.state.write().await.retry()?;
        tracing::info!("Retrying after failed payment");
        self.events.publish(FormEvent::RetryRequested);
        Ok(())
    }

    /// Copy of the whole form state
    pub async fn snapshot(&self) -> FormState {
        self.state.read().await.clone()
    }

    pub async fn data(&self) -> PaymentFormData {
        self.state.read().await.data().clone()
    }

    pub async fn errors(&self) -> ValidationErrors {
        self.state.read().await.errors().clone()
    }

    pub async fn status(&self) -> SubmissionStatus {
        self.state.read().await.status().clone()
    }

    pub async fn is_submitting(&self) -> bool {
        self.state.read().await.is_submitting()
    }
}

/// Run one gateway call, isolating panics and applying the timeout
async fn call_gateway(
    gateway: Arc<dyn SubmissionGateway>,
    snapshot: PaymentFormData,
    timeout: Option<Duration>,
) -> GatewayResolution {
    let call = tokio::spawn(async move {
        match timeout {
            Some(limit) => match tokio::time::timeout(limit, gateway.submit(&snapshot)).await {
                Ok(result) => GatewayResolution::Completed(result),
                Err(_) => GatewayResolution::TimedOut { after: limit },
            },
            None => GatewayResolution::Completed(gateway.submit(&snapshot).await),
        }
    });

    match call.await {
        Ok(resolution) => resolution,
        Err(e) => GatewayResolution::Completed(Err(GatewayError::Internal(format!(
            "gateway task failed: {}",
            e
        )))),
    }
}
