//! Outbound HTTP client shared by every integration
//!
//! The default policy is single-shot: no timeout, no retry. Both can be turned
//! on through configuration without touching the call sites.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};

use crate::domain::DomainError;

const USER_AGENT: &str = concat!("LandmarkQuest/", env!("CARGO_PKG_VERSION"));

/// Timeout and retry settings applied to every outbound request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpPolicy {
    /// Per-request timeout, `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Extra attempts after a transport error or a 5xx response
    pub max_retries: u32,
    /// Linear backoff step between attempts
    pub retry_backoff: Duration,
}

impl HttpPolicy {
    /// Single attempt, no timeout
    pub fn single_shot() -> Self {
        Self::default()
    }
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    policy: HttpPolicy,
}

impl HttpClient {
    pub fn new(policy: HttpPolicy) -> Result<Self, DomainError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = policy.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DomainError::Internal(format!("Failed to build client: {}", e)))?;

        Ok(Self { client, policy })
    }

    /// Send the request produced by `build`, retrying per the policy.
    ///
    /// `build` is called once per attempt. After the last attempt a 5xx
    /// response is returned as-is and a transport error is returned as `Err`.
    pub async fn send<F>(&self, build: F) -> Result<Response, reqwest::Error>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut attempt: u32 = 0;
        loop {
            let result = build(&self.client).send().await;
            let retryable = match &result {
                Ok(resp) => resp.status().is_server_error(),
                Err(e) => !e.is_builder(),
            };

            if !retryable || attempt >= self.policy.max_retries {
                return result;
            }

            attempt += 1;
            match &result {
                Ok(resp) => tracing::warn!(
                    "Upstream returned {}, retrying ({}/{})",
                    resp.status(),
                    attempt,
                    self.policy.max_retries
                ),
                Err(e) => tracing::warn!(
                    "Request failed: {}, retrying ({}/{})",
                    e,
                    attempt,
                    self.policy.max_retries
                ),
            }

            if !self.policy.retry_backoff.is_zero() {
                tokio::time::sleep(self.policy.retry_backoff * attempt).await;
            }
        }
    }
}
