//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::field::{DEFAULT_AMOUNT, PaymentFormData, PaymentMethod};
use crate::core::validation::validators;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings of the simulated gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// How long the simulated processor takes to answer
    pub delay_ms: u64,

    /// Probability of a decline, between 0 and 1
    pub failure_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            delay_ms: 3000,
            failure_rate: 0.1,
        }
    }
}

/// Configuration of a payment form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Amount prefilled in a new or reset form
    pub default_amount: String,

    /// Payment method selected in a new or reset form
    pub default_method: PaymentMethod,

    /// Give up on the gateway after this long (no limit when unset)
    pub gateway_timeout_ms: Option<u64>,

    pub simulation: SimulationConfig,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_amount: DEFAULT_AMOUNT.to_string(),
            default_method: PaymentMethod::default(),
            gateway_timeout_ms: None,
            simulation: SimulationConfig::default(),
        }
    }
}

impl FormConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(message) = validators::amount(&self.default_amount) {
            return Err(ConfigError::InvalidValue {
                field: "default_amount".to_string(),
                value: self.default_amount.clone(),
                message,
            });
        }

        let rate = self.simulation.failure_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::InvalidValue {
                field: "simulation.failure_rate".to_string(),
                value: rate.to_string(),
                message: "must be between 0 and 1".to_string(),
            });
        }

        if self.gateway_timeout_ms == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "gateway_timeout_ms".to_string(),
                value: "0".to_string(),
                message: "must be greater than 0 when set".to_string(),
            });
        }

        Ok(())
    }

    pub fn gateway_timeout(&self) -> Option<Duration> {
        self.gateway_timeout_ms.map(Duration::from_millis)
    }

    /// Form record a new or reset form starts from
    pub fn initial_form(&self) -> PaymentFormData {
        PaymentFormData {
            payment_method: self.default_method,
            ..PaymentFormData::with_default_amount(self.default_amount.clone())
        }
    }
}
