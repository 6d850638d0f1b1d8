//! Environment-backed configuration
//!
//! The three configuration values are read once at startup. A missing value
//! never halts the program: the header shows a "not connected" indicator and
//! the completion client reports which variable is absent when a call is
//! attempted.

use std::env;

pub const ENV_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT";

const UNSET_LABEL: &str = "(not set)";

#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub deployment: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config through an arbitrary lookup function. Blank values are
    /// treated the same as absent ones.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        EnvConfig {
            api_key: read(ENV_API_KEY),
            endpoint: read(ENV_ENDPOINT),
            deployment: read(ENV_DEPLOYMENT),
        }
    }

    /// Whether a credential is present. Endpoint and deployment gaps are
    /// reported separately when a completion call is attempted.
    pub fn is_connected(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn endpoint_label(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(UNSET_LABEL)
    }

    pub fn deployment_label(&self) -> &str {
        self.deployment.as_deref().unwrap_or(UNSET_LABEL)
    }
}
