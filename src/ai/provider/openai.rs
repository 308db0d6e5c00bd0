//! OpenAI-compatible Chat Completions client
//!
//! Posts `{model, messages, temperature}` to a full endpoint URL with a
//! bearer key and digs the reply text out of the response body.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::{ChatMessage, ChatModel};
use crate::constants::network::CONNECTION_TIMEOUT_SECS;
use crate::types::{ErrorCategory, ErrorClassifier, LlmError, QuestError, Result};

/// Chat completions provider with secure API key handling
pub struct OpenAiCompatibleProvider {
    name: String,
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    endpoint: String,
    model: String,
    temperature: f32,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiCompatibleProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleProvider")
            .field("name", &self.name)
            .field("api_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl OpenAiCompatibleProvider {
    pub fn new(
        name: &str,
        api_key: &str,
        endpoint: &str,
        model: &str,
        temperature: f32,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECTION_TIMEOUT_SECS))
            .build()
            .map_err(|e| QuestError::LlmApi(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            name: name.to_string(),
            api_key: SecretString::from(api_key.to_string()),
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            temperature,
            client,
        })
    }

    fn build_request<'a>(&'a self, messages: &'a [ChatMessage]) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiCompatibleProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        info!(
            "Calling {} (model: {}, temperature: {})",
            self.name, self.model, self.temperature
        );

        let start_time = Instant::now();
        let request = self.build_request(messages);

        let response = self
            .client
            .post(&self.endpoint)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let message = format!("模型请求失败: {}", e);
                if e.is_connect() || e.is_timeout() {
                    LlmError::with_provider(ErrorCategory::Network, message, &self.name)
                } else {
                    ErrorClassifier::classify(&message, &self.name)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::classify_http_status(
                status.as_u16(),
                &format!("模型调用失败({}): {}", status.as_u16(), body),
                &self.name,
            )
            .into());
        }

        let body: Value = response.json().await.map_err(|e| {
            ErrorClassifier::classify(&format!("Failed to decode json response: {}", e), &self.name)
        })?;

        if let Some(usage) = body.get("usage") {
            debug!(
                prompt_tokens = usage.get("prompt_tokens").and_then(serde_json::Value::as_u64),
                completion_tokens = usage.get("completion_tokens").and_then(serde_json::Value::as_u64),
                "{} usage",
                self.name
            );
        }
        debug!(
            "{} responded in {}ms",
            self.name,
            start_time.elapsed().as_millis()
        );

        Ok(reply_text(&body))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Reply text from a completions body.
///
/// Looks at `choices[0].message.content`, then legacy `choices[0].text`,
/// then the Volcengine envelope `data.choices[0].message.content`. Missing
/// or empty content yields `""`.
pub(crate) fn reply_text(body: &Value) -> String {
    let candidates = [
        body.pointer("/choices/0/message/content"),
        body.pointer("/choices/0/text"),
        body.pointer("/data/choices/0/message/content"),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

// Request types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reply_text_message_content() {
        let body = json!({"choices": [{"message": {"role": "assistant", "content": "simple"}}]});
        assert_eq!(reply_text(&body), "simple");
    }

    #[test]
    fn test_reply_text_legacy_text() {
        let body = json!({"choices": [{"text": "[]"}]});
        assert_eq!(reply_text(&body), "[]");
    }

    #[test]
    fn test_reply_text_data_envelope() {
        let body = json!({"data": {"choices": [{"message": {"content": "hard"}}]}});
        assert_eq!(reply_text(&body), "hard");
    }

    #[test]
    fn test_reply_text_skips_empty_content() {
        let body = json!({"choices": [{"message": {"content": ""}, "text": "fallback"}]});
        assert_eq!(reply_text(&body), "fallback");
    }

    #[test]
    fn test_reply_text_missing() {
        assert_eq!(reply_text(&json!({})), "");
        assert_eq!(reply_text(&json!({"choices": []})), "");
        assert_eq!(reply_text(&json!({"choices": [{"message": {"content": null}}]})), "");
    }

    #[test]
    fn test_request_body() {
        let provider = OpenAiCompatibleProvider::new(
            "deepseek",
            "sk-secret",
            "https://api.deepseek.com/v1/chat/completions",
            "deepseek-chat",
            0.2,
        )
        .unwrap();
        let messages = vec![ChatMessage::user("hi")];
        let value = serde_json::to_value(provider.build_request(&messages)).unwrap();
        assert_eq!(value["model"], "deepseek-chat");
        assert_eq!(value["messages"][0]["role"], "user");
        assert!((value["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_refused_connection_is_recoverable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider = OpenAiCompatibleProvider::new(
            "deepseek",
            "sk-secret",
            &format!("http://{}/v1/chat/completions", addr),
            "deepseek-chat",
            0.2,
        )
        .unwrap();

        let err = provider
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        match &err {
            QuestError::Llm(llm) => assert_eq!(llm.category, ErrorCategory::Network),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_debug_redacts_key() {
        let provider =
            OpenAiCompatibleProvider::new("doubao", "sk-secret", "https://x/y", "m", 0.2).unwrap();
        let debug = format!("{:?}", provider);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
