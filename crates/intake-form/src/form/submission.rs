//! Outbound delivery of validated forms.
//!
//! [`SubmissionClient`] owns serialization and outcome mapping; the wire itself sits behind
//! [`SubmissionTransport`] so the client can run against an in-memory fake.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use super::domain::ValidatedRecord;
use super::outcome::SubmissionOutcome;
use crate::config::SubmissionConfig;

const JSON_MEDIA_TYPE: &str = "application/json";

/// Status and body of the single response to a form POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// Full response text for 2xx responses, empty otherwise.
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("could not connect to intake endpoint: {0}")]
    Connect(String),
    #[error("intake endpoint timed out: {0}")]
    Timeout(String),
    #[error("could not read intake response: {0}")]
    Body(String),
    #[error("request to intake endpoint failed: {0}")]
    Request(String),
}

/// One JSON POST to the intake endpoint. Implementations must not retry.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn post_json(&self, body: String) -> Result<TransportResponse, TransportError>;
}

/// Reqwest-backed transport bound to a single endpoint.
#[derive(Debug, Clone)]
pub struct HttpSubmissionTransport {
    client: Client,
    endpoint: Url,
    send_accept_header: bool,
}

impl HttpSubmissionTransport {
    /// Build a transport with a default reqwest client (no timeout override).
    pub fn new(config: &SubmissionConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, config))
    }

    /// Reuse an existing client and its connection pool.
    pub fn with_client(client: Client, config: &SubmissionConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            send_accept_header: config.send_accept_header,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionTransport for HttpSubmissionTransport {
    async fn post_json(&self, body: String) -> Result<TransportResponse, TransportError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, JSON_MEDIA_TYPE);
        if self.send_accept_header {
            request = request.header(ACCEPT, JSON_MEDIA_TYPE);
        }

        let response = request.body(body).send().await.map_err(map_send_error)?;
        let status = response.status();
        if !status.is_success() {
            return Ok(TransportResponse {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|err| TransportError::Body(err.to_string()))?;

        Ok(TransportResponse {
            status: status.as_u16(),
            body: text,
        })
    }
}

fn map_send_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(error.to_string())
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else if error.is_body() || error.is_decode() {
        TransportError::Body(error.to_string())
    } else {
        TransportError::Request(error.to_string())
    }
}

/// Posts validated records and folds every result, including failures, into an outcome.
pub struct SubmissionClient<T> {
    transport: Arc<T>,
}

impl<T> Clone for SubmissionClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl SubmissionClient<HttpSubmissionTransport> {
    pub fn from_config(config: &SubmissionConfig) -> Result<Self, reqwest::Error> {
        let transport = HttpSubmissionTransport::new(config)?;
        Ok(Self::new(Arc::new(transport)))
    }
}

impl<T> SubmissionClient<T>
where
    T: SubmissionTransport + 'static,
{
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Send `record` once. Never fails; transport problems become `TransportFailure`.
    pub async fn submit(&self, record: ValidatedRecord) -> SubmissionOutcome {
        let body = match serde_json::to_string(&record.payload()) {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "could not serialize form payload");
                return SubmissionOutcome::TransportFailure(format!(
                    "could not serialize form: {err}"
                ));
            }
        };

        debug!(bytes = body.len(), "posting form payload");
        match self.transport.post_json(body).await {
            Ok(response) if response.is_success() => {
                info!(status = response.status, "form accepted by intake endpoint");
                SubmissionOutcome::Success(response.body)
            }
            Ok(response) => {
                warn!(status = response.status, "form rejected by intake endpoint");
                SubmissionOutcome::RejectedByServer(response.status)
            }
            Err(err) => {
                warn!(error = %err, "form submission failed");
                SubmissionOutcome::TransportFailure(err.to_string())
            }
        }
    }
}
