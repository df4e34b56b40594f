//! Shared HTTP plumbing for the collaborator clients.
//!
//! Every client owns an [`UpstreamHttp`] that holds the pooled `reqwest`
//! client, the service base URL and the service name used in errors,
//! logs and metrics.

use std::time::Instant;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::ServiceSettings;
use crate::infrastructure::metrics;
use crate::shared::error::UpstreamError;

/// Header carrying the caller identity to the collaborators.
pub const USER_NAME_HEADER: &str = "X-User-Name";

/// Health endpoint exposed by every collaborator.
const HEALTH_PATH: &str = "/manage/health";

/// Pooled HTTP access to one collaborator service.
#[derive(Debug, Clone)]
pub struct UpstreamHttp {
    service: &'static str,
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamHttp {
    /// Build a client with the timeouts configured for the service.
    pub fn new(service: &'static str, settings: &ServiceSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout())
            .timeout(settings.request_timeout())
            .build()?;

        Ok(Self {
            service,
            client,
            base_url: settings.base_url().to_string(),
        })
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Start a request against a path below the base URL.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    /// Send the request and decode a JSON body.
    ///
    /// `subject` names the entity for a 404 (e.g. "reservation 1b2c...").
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        subject: &str,
        request: RequestBuilder,
    ) -> Result<T, UpstreamError> {
        let started = Instant::now();
        let result = match self.execute(subject, request).await {
            Ok(response) => response.json::<T>().await.map_err(|e| UpstreamError::Decode {
                service: self.service,
                message: e.to_string(),
            }),
            Err(e) => Err(e),
        };
        self.observe(operation, started, result.as_ref().err());
        result
    }

    /// Send the request and discard any body.
    pub async fn send_empty(
        &self,
        operation: &'static str,
        subject: &str,
        request: RequestBuilder,
    ) -> Result<(), UpstreamError> {
        let started = Instant::now();
        let result = self.execute(subject, request).await.map(|_| ());
        self.observe(operation, started, result.as_ref().err());
        result
    }

    /// Probe the collaborator's health endpoint.
    pub async fn ping(&self) -> Result<(), UpstreamError> {
        let request = self.request(Method::GET, HEALTH_PATH);
        self.send_empty("ping", "health endpoint", request).await
    }

    async fn execute(
        &self,
        subject: &str,
        request: RequestBuilder,
    ) -> Result<Response, UpstreamError> {
        let response = request.send().await.map_err(|e| UpstreamError::Unavailable {
            service: self.service,
            message: e.to_string(),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::NOT_FOUND => Err(UpstreamError::NotFound {
                service: self.service,
                what: subject.to_string(),
            }),
            StatusCode::CONFLICT => {
                let message = response.text().await.unwrap_or_default();
                Err(UpstreamError::Conflict {
                    service: self.service,
                    message,
                })
            }
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                Err(UpstreamError::Unavailable {
                    service: self.service,
                    message: format!("responded with status {}", status.as_u16()),
                })
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(
                    service = self.service,
                    status = status.as_u16(),
                    body = %body,
                    "Upstream returned an error status"
                );
                Err(UpstreamError::Status {
                    service: self.service,
                    status: status.as_u16(),
                })
            }
        }
    }

    fn observe(&self, operation: &'static str, started: Instant, error: Option<&UpstreamError>) {
        let elapsed = started.elapsed();
        let outcome = outcome_label(error);

        tracing::debug!(
            service = self.service,
            operation,
            outcome,
            elapsed_ms = elapsed.as_millis() as u64,
            "Upstream call finished"
        );
        metrics::record_upstream_call(self.service, operation, outcome, elapsed.as_secs_f64());
    }
}

/// Metric label for the result of an upstream call.
fn outcome_label(error: Option<&UpstreamError>) -> &'static str {
    match error {
        None => "ok",
        Some(UpstreamError::NotFound { .. }) => "not_found",
        Some(UpstreamError::Conflict { .. }) => "conflict",
        Some(UpstreamError::Unavailable { .. }) => "unavailable",
        Some(UpstreamError::Status { .. }) => "error_status",
        Some(UpstreamError::Decode { .. }) => "decode_error",
    }
}
