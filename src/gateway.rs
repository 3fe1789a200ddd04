use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::payload::SubmissionPayload;

const DEFAULT_RELAY_TIMEOUT_SEC: u64 = 3;

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("error making HTTP request: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected HTTP status code {0}")]
    UnexpectedStatus(u16),
}

/// Delivers a validated, masked payload. The state machine calls this exactly
/// once per submission attempt and maps the result onto its own status; how
/// the payload actually travels is the implementation's concern.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), SubmissionError>;
}

/// Local backend: records the payload as a structured log line and reports
/// success. Useful while the relay side is not wired up.
pub struct LogGateway;

#[async_trait]
impl SubmissionGateway for LogGateway {
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), SubmissionError> {
        tracing::info!(payload = ?payload, "form submission recorded");
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EmailRelayConfig {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub timeout: Duration,
}

impl EmailRelayConfig {
    pub fn new(
        endpoint: impl Into<String>,
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        EmailRelayConfig {
            endpoint: endpoint.into(),
            service_id: service_id.into(),
            template_id: template_id.into(),
            user_id: user_id.into(),
            timeout: Duration::from_secs(DEFAULT_RELAY_TIMEOUT_SEC),
        }
    }
}

/// Relay backend: POSTs the payload as template parameters of a hosted
/// email-template service. Any 2xx response counts as delivered; everything
/// else surfaces as a [`SubmissionError`], which the state machine turns into
/// the Failed status.
pub struct EmailRelayGateway {
    config: EmailRelayConfig,
}

impl EmailRelayGateway {
    pub fn new(config: EmailRelayConfig) -> Self {
        EmailRelayGateway { config }
    }
}

#[async_trait]
impl SubmissionGateway for EmailRelayGateway {
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), SubmissionError> {
        let body = json!({
            "service_id": self.config.service_id,
            "template_id": self.config.template_id,
            "user_id": self.config.user_id,
            "template_params": payload,
        });

        let client = Client::new();
        let response = client
            .post(&self.config.endpoint)
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SubmissionError::UnexpectedStatus(status.as_u16()))
        }
    }
}
