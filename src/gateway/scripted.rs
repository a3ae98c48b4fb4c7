//! Deterministic gateway for tests and development

use super::{GatewayOutcome, SubmissionGateway, generate_error_code};
use crate::core::error::GatewayError;
use crate::core::field::PaymentFormData;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// One scripted answer
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Approve with a generated transaction id
    Approve,
    /// Decline with the given error code, or a generated one
    Decline(Option<String>),
    /// Fail the call itself
    Fail(GatewayError),
    /// Answer `Approve` after sleeping
    Delay(Duration),
    /// Panic inside the call, like a gateway with a bug
    Panic(String),
}

/// Gateway that replays predetermined responses
///
/// Responses are consumed in order; once the script is exhausted every call
/// gets the fallback response. Every snapshot received is recorded.
///
/// With [`ScriptedGateway::held`] each call blocks after being recorded until
/// [`release`](ScriptedGateway::release) is called, which keeps a submission
/// in flight for as long as a test needs.
#[derive(Clone)]
pub struct ScriptedGateway {
    script: Arc<Mutex<VecDeque<ScriptedResponse>>>,
    fallback: ScriptedResponse,
    calls: Arc<Mutex<Vec<PaymentFormData>>>,
    hold: Option<Arc<Notify>>,
    entered: Arc<Notify>,
}

impl ScriptedGateway {
    /// Gateway that approves every call
    pub fn approving() -> Self {
        Self::with_fallback(ScriptedResponse::Approve)
    }

    /// Gateway that declines every call
    pub fn declining() -> Self {
        Self::with_fallback(ScriptedResponse::Decline(None))
    }

    pub fn with_fallback(fallback: ScriptedResponse) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback,
            calls: Arc::new(Mutex::new(Vec::new())),
            hold: None,
            entered: Arc::new(Notify::new()),
        }
    }

    /// Queue responses to hand out before the fallback
    pub fn then(self, response: ScriptedResponse) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(response);
        }
        self
    }

    /// Block every call until released
    pub fn held(mut self) -> Self {
        self.hold = Some(Arc::new(Notify::new()));
        self
    }

    /// Let one held call proceed
    pub fn release(&self) {
        if let Some(hold) = &self.hold {
            hold.notify_one();
        }
    }

    /// Wait until a call has reached the gateway
    pub async fn wait_for_call(&self) {
        self.entered.notified().await;
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    /// Snapshots received so far, oldest first
    pub fn calls(&self) -> Vec<PaymentFormData> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn next_response(&self) -> Result<ScriptedResponse, GatewayError> {
        let mut script = self
            .script
            .lock()
            .map_err(|e| GatewayError::Internal(format!("Failed to acquire script lock: {}", e)))?;
        Ok(script.pop_front().unwrap_or_else(|| self.fallback.clone()))
    }
}

impl Default for ScriptedGateway {
    fn default() -> Self {
        Self::approving()
    }
}

#[async_trait]
impl SubmissionGateway for ScriptedGateway {
    async fn submit(&self, data: &PaymentFormData) -> Result<GatewayOutcome, GatewayError> {
        self.calls
            .lock()
            .map_err(|e| GatewayError::Internal(format!("Failed to acquire calls lock: {}", e)))?
            .push(data.clone());
        let response = self.next_response()?;
        self.entered.notify_one();

        if let Some(hold) = &self.hold {
            hold.notified().await;
        }

        match response {
            ScriptedResponse::Approve => Ok(GatewayOutcome::approved_for(data)),
            ScriptedResponse::Decline(code) => Ok(GatewayOutcome::Declined {
                error_code: code.unwrap_or_else(generate_error_code),
            }),
            ScriptedResponse::Fail(error) => Err(error),
            ScriptedResponse::Delay(delay) => {
                tokio::time::sleep(delay).await;
                Ok(GatewayOutcome::approved_for(data))
            }
            ScriptedResponse::Panic(message) => panic!("{}", message),
        }
    }
}
