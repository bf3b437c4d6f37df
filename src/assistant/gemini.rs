use std::time::Duration as StdDuration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::{Assistant, AssistantRequest};
use crate::config::Config;
use crate::constants::assistant::TIMEOUT_SECS;
use crate::error::{Error, Result};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client for the generative-language `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiAssistant {
    api_key: String,
    model: String,
    client: Client,
}

impl std::fmt::Debug for GeminiAssistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiAssistant").field("model", &self.model).finish_non_exhaustive()
    }
}

impl GeminiAssistant {
    /// Create a client from config.
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.assistant_api_key.clone(),
            model: config.assistant_model.clone(),
            client: Client::builder()
                .timeout(StdDuration::from_secs(TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Model this client talks to.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn generate(&self, prompt: &str) -> Result<Value> {
        let url = format!("{BASE_URL}/{}:generateContent", self.model);
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {} failed: {e}", self.model)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::assistant_status(
                format!("{} returned {status}", self.model),
                status.as_u16(),
            ));
        }

        resp.json()
            .await
            .map_err(|e| Error::parse(format!("Invalid JSON from {}: {e}", self.model), None))
    }
}

/// Concatenate the text parts of the first candidate.
fn reply_text(response: &Value) -> String {
    response["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect::<Vec<_>>().join(""))
        .unwrap_or_default()
}

#[async_trait]
impl Assistant for GeminiAssistant {
    async fn suggest(&self, request: &AssistantRequest) -> Result<String> {
        if !self.is_configured() {
            return Err(Error::config(
                "Assistant not configured",
                "Set the GEMINI_API_KEY environment variable",
            ));
        }
        tracing::info!(model = %self.model, elements = request.elements.len(), "Asking assistant");
        let response = self.generate(&request.prompt()).await?;
        Ok(reply_text(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_text_joins_parts() {
        let v = json!({"candidates":[{"content":{"parts":[{"text":"a"},{"text":"b"}]}}]});
        assert_eq!(reply_text(&v), "ab");
        assert_eq!(reply_text(&json!({"promptFeedback":{}})), "");
    }

    #[tokio::test]
    async fn unconfigured_client_is_a_config_error() {
        let assistant = GeminiAssistant::new(&Config::default());
        let request = AssistantRequest { elements: Vec::new(), message: "hi".into() };
        let err = assistant.suggest(&request).await;
        assert!(matches!(err, Err(Error::Config { .. })));
    }
}
