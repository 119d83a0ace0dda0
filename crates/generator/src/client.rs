use iq_core::{IqError, Result, Sample};
use reqwest::StatusCode;
use std::time::Duration;

/// HTTP client that delivers sample batches to the ingestion webhook.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    url:  String,
}

impl WebhookClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IqError::Transport(format!("cannot build HTTP client: {e}")))?;

        Ok(Self { http, url: url.into() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST `batch` as a JSON array.  Anything but `200 OK` is an error.
    pub async fn send(&self, batch: &[Sample]) -> Result<()> {
        let response = self
            .http
            .post(&self.url)
            .json(batch)
            .send()
            .await
            .map_err(|e| IqError::Transport(format!("error sending request: {e}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(IqError::Transport(format!(
                "unexpected response status: {status}"
            )));
        }

        Ok(())
    }
}
