//! Completion client
//!
//! Performs one request per user turn: serialize the transcript plus fixed
//! sampling parameters, POST to the deployment URL, wait for the full
//! response body, and extract the first choice's text. No streaming, no
//! retries, no timeout configuration.

use std::error::Error;
use std::fmt;

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::api::{ChatRequest, ChatResponse};
use crate::core::config::{EnvConfig, ENV_API_KEY, ENV_DEPLOYMENT, ENV_ENDPOINT};
use crate::core::constants::{API_VERSION, MAX_TOKENS, TEMPERATURE};
use crate::utils::url::completion_url;

#[derive(Debug)]
pub enum CompletionError {
    /// A required configuration value is absent. Carries the variable name.
    /// Detected when a call is attempted, never at startup.
    NotConfigured(&'static str),
    Network(reqwest::Error),
    Status { code: StatusCode, body: String },
    Parse(serde_json::Error),
    EmptyChoices,
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::NotConfigured(var) => {
                write!(f, "not connected: {var} is not set")
            }
            CompletionError::Network(e) => write!(f, "network error: {e}"),
            CompletionError::Status { code, body } => {
                write!(f, "HTTP {code}: {body}")
            }
            CompletionError::Parse(e) => write!(f, "malformed response: {e}"),
            CompletionError::EmptyChoices => write!(f, "response contained no choices"),
        }
    }
}

impl Error for CompletionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CompletionError::Network(e) => Some(e),
            CompletionError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct CompletionClient {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: Option<String>,
    deployment: Option<String>,
}

impl CompletionClient {
    pub fn new(config: &EnvConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
            deployment: config.deployment.clone(),
        }
    }

    /// Resolve the request URL and credential, reporting the first missing
    /// configuration value in endpoint, deployment, credential order.
    fn request_parts(&self) -> Result<(String, &str), CompletionError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or(CompletionError::NotConfigured(ENV_ENDPOINT))?;
        let deployment = self
            .deployment
            .as_deref()
            .ok_or(CompletionError::NotConfigured(ENV_DEPLOYMENT))?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CompletionError::NotConfigured(ENV_API_KEY))?;

        Ok((completion_url(endpoint, deployment, API_VERSION), api_key))
    }

    /// Submit the full transcript and return the first choice's text.
    pub async fn complete(
        &self,
        messages: Vec<crate::api::ChatMessage>,
    ) -> Result<String, CompletionError> {
        let (url, api_key) = self.request_parts()?;

        let request = ChatRequest {
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        debug!(url = %url, messages = request.messages.len(), "sending completion request");

        let response = self
            .client
            .post(&url)
            .header("api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(CompletionError::Network)?;

        let code = response.status();
        if !code.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            warn!(%code, "completion request failed");
            return Err(CompletionError::Status { code, body });
        }

        let body = response.text().await.map_err(CompletionError::Network)?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(CompletionError::Parse)?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(CompletionError::EmptyChoices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with(
        api_key: Option<&str>,
        endpoint: Option<&str>,
        deployment: Option<&str>,
    ) -> CompletionClient {
        CompletionClient::new(&EnvConfig {
            api_key: api_key.map(str::to_string),
            endpoint: endpoint.map(str::to_string),
            deployment: deployment.map(str::to_string),
        })
    }

    #[test]
    fn fully_configured_client_resolves_the_deployment_url() {
        let client = client_with(
            Some("secret"),
            Some("https://example.openai.azure.com"),
            Some("gpt-4o-mini"),
        );

        let (url, api_key) = client.request_parts().unwrap();
        assert_eq!(
            url,
            "https://example.openai.azure.com/openai/deployments/gpt-4o-mini/chat/completions?api-version=2024-08-01-preview"
        );
        assert_eq!(api_key, "secret");
    }

    #[test]
    fn missing_values_are_reported_in_order() {
        let err = client_with(None, None, None).request_parts().unwrap_err();
        assert!(matches!(err, CompletionError::NotConfigured(ENV_ENDPOINT)));

        let err = client_with(None, Some("https://e"), None)
            .request_parts()
            .unwrap_err();
        assert!(matches!(err, CompletionError::NotConfigured(ENV_DEPLOYMENT)));

        let err = client_with(None, Some("https://e"), Some("d"))
            .request_parts()
            .unwrap_err();
        assert!(matches!(err, CompletionError::NotConfigured(ENV_API_KEY)));
    }

    #[test]
    fn error_display_names_the_missing_variable() {
        let err = CompletionError::NotConfigured(ENV_API_KEY);
        assert_eq!(
            err.to_string(),
            "not connected: AZURE_OPENAI_API_KEY is not set"
        );
    }

    #[test]
    fn status_error_carries_code_and_body() {
        let err = CompletionError::Status {
            code: StatusCode::UNAUTHORIZED,
            body: "Access denied".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 401 Unauthorized: Access denied");
    }
}
