//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::method::PaymentMethod;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Settings of the simulated payment handler
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmissionConfig {
    /// Artificial latency before a payment is acknowledged
    #[validate(range(max = 30000))]
    #[serde(default = "default_delay_ms")]
    pub simulated_delay_ms: u64,
}

impl SubmissionConfig {
    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: default_delay_ms(),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Listen address (e.g. "127.0.0.1:3000")
    #[validate(length(min = 1))]
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Complete configuration of the checkout engine
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutConfig {
    /// Payment methods offered to the user
    #[validate(length(min = 1))]
    #[serde(default = "default_methods")]
    pub methods: Vec<PaymentMethod>,

    #[validate(nested)]
    #[serde(default)]
    pub submission: SubmissionConfig,

    #[validate(nested)]
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_delay_ms() -> u64 {
    1500
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_methods() -> Vec<PaymentMethod> {
    PaymentMethod::ALL.to_vec()
}

impl CheckoutConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.check()?;
        Ok(config)
    }

    /// Check value bounds
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate().map_err(|e| ConfigError::Invalid {
            message: e.to_string(),
        })
    }

    /// Whether `method` is offered
    pub fn is_method_enabled(&self, method: PaymentMethod) -> bool {
        self.methods.contains(&method)
    }

    /// Configuration with every method enabled and default timings
    pub fn default_config() -> Self {
        Self {
            methods: default_methods(),
            submission: SubmissionConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
