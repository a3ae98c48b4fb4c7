//! Gateway stand-in with a fixed delay and random declines

use super::{GatewayOutcome, SubmissionGateway};
use crate::config::SimulationConfig;
use crate::core::error::GatewayError;
use crate::core::field::PaymentFormData;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Simulated payment processor
///
/// Waits `delay`, then declines with probability `failure_rate`. Useful for
/// demos only; tests should use [`ScriptedGateway`](super::ScriptedGateway).
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
    failure_rate: f64,
}

impl SimulatedGateway {
    /// `failure_rate` is clamped to `[0, 1]`
    pub fn new(delay: Duration, failure_rate: f64) -> Self {
        let failure_rate = if failure_rate.is_nan() {
            0.0
        } else {
            failure_rate.clamp(0.0, 1.0)
        };
        Self {
            delay,
            failure_rate,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(Duration::from_millis(config.delay_ms), config.failure_rate)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

#[async_trait]
impl SubmissionGateway for SimulatedGateway {
    async fn submit(&self, data: &PaymentFormData) -> Result<GatewayOutcome, GatewayError> {
        tokio::time::sleep(self.delay).await;

        let declined = rand::thread_rng().gen_bool(self.failure_rate);
        let outcome = if declined {
            GatewayOutcome::declined()
        } else {
            GatewayOutcome::approved_for(data)
        };

        tracing::debug!(
            approved = outcome.is_approved(),
            delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX),
            "Simulated gateway answered"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_rate_is_clamped() {
        assert_eq!(SimulatedGateway::new(Duration::ZERO, 3.0).failure_rate(), 1.0);
        assert_eq!(SimulatedGateway::new(Duration::ZERO, -1.0).failure_rate(), 0.0);
        assert_eq!(SimulatedGateway::new(Duration::ZERO, f64::NAN).failure_rate(), 0.0);
    }

    #[test]
    fn test_default_matches_simulation_defaults() {
        let gateway = SimulatedGateway::default();
        assert_eq!(gateway.delay(), Duration::from_millis(3000));
        assert_eq!(gateway.failure_rate(), 0.1);
    }

    #[tokio::test]
    async fn test_never_fails_with_zero_rate() {
        let gateway = SimulatedGateway::new(Duration::ZERO, 0.0);
        let data = PaymentFormData {
            card_number: "4242 4242 4242 4242".to_string(),
            ..PaymentFormData::default()
        };
        for _ in 0..20 {
            assert!(gateway.submit(&data).await.unwrap().is_approved());
        }
    }

    #[tokio::test]
    async fn test_always_fails_with_full_rate() {
        let gateway = SimulatedGateway::new(Duration::ZERO, 1.0);
        let outcome = gateway.submit(&PaymentFormData::default()).await.unwrap();
        assert!(!outcome.is_approved());
    }
}
