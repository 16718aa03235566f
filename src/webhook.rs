//! Outbound HTTP client for the AI assistant webhooks. Each endpoint is a
//! single POST to an externally hosted workflow; callers fall back to a
//! canned response when the workflow is unreachable or times out.

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Canned reply when the chat workflow is unavailable.
pub const CHAT_FALLBACK: &str = "I'm currently experiencing technical difficulties. \
    Please try again in a moment. For urgent concerns, please consult with your \
    healthcare provider.";

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AiClient {
    http: Client,
    chat_url: String,
    summary_url: String,
}

impl AiClient {
    pub fn new(chat_url: String, summary_url: String) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(WEBHOOK_TIMEOUT).build()?;
        Ok(Self {
            http,
            chat_url,
            summary_url,
        })
    }

    /// Forward a chat payload; the workflow nests its answer under `data`
    /// when present.
    pub async fn post_chat(&self, payload: &Value) -> Result<Value, reqwest::Error> {
        let body: Value = self
            .http
            .post(&self.chat_url)
            .json(payload)
            .send()
            .await?
            .json()
            .await?;
        Ok(body.get("data").cloned().unwrap_or(body))
    }

    pub async fn post_summary(&self, payload: &Value) -> Result<Value, reqwest::Error> {
        self.http
            .post(&self.summary_url)
            .json(payload)
            .send()
            .await?
            .json()
            .await
    }
}

/// Locally computed summary sentence used when the workflow is down.
pub fn fallback_summary(total_feedings: usize, total_sleep_hours: f64) -> String {
    format!(
        "Today's summary: {} feedings and {:.1} hours of sleep recorded. Everything looks good!",
        total_feedings, total_sleep_hours
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_summary_formats_hours_to_one_decimal() {
        assert_eq!(
            fallback_summary(6, 12.25),
            "Today's summary: 6 feedings and 12.2 hours of sleep recorded. Everything looks good!"
        );
        assert_eq!(
            fallback_summary(0, 0.0),
            "Today's summary: 0 feedings and 0.0 hours of sleep recorded. Everything looks good!"
        );
    }
}
