use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use url::Url;

use super::error::SubmitError;
use crate::model::FormFields;

/// JSON body sent to the collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
    /// Anti-automation token; omitted from the body when absent.
    #[serde(
        rename = "g-recaptcha-response",
        skip_serializing_if = "Option::is_none"
    )]
    pub challenge_token: Option<String>,
}

impl Submission {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.name.clone(),
            email: fields.email.clone(),
            message: fields.message.clone(),
            challenge_token: None,
        }
    }

    /// Attaches a challenge token, if one was obtained.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.challenge_token = token;
        self
    }
}

/// Delivers a [`Submission`] somewhere.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, submission: &Submission) -> Result<(), SubmitError>;
}

/// Non-success response body; only `error` is used.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// POSTs submissions as JSON to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Creates a transport whose requests give up after `timeout`.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, submission: &Submission) -> Result<(), SubmitError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(status = status.as_u16(), "submission accepted");
            return Ok(());
        }

        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), error = ?body.error, "submission rejected");
        Err(SubmitError::Rejected {
            status: status.as_u16(),
            message: body.error,
        })
    }
}
