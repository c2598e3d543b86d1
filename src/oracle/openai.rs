//! OpenAI-compatible chat-completions oracle
//!
//! Sends a fixed system instruction plus the utterance to a
//! chat-completions endpoint and parses the reply into an [`ActionBatch`].
//! Works against any endpoint speaking the OpenAI request shape.

use super::ClassificationOracle;
use crate::config::OracleConfig;
use crate::error::{Error, Result};
use crate::router::ActionBatch;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// System instruction describing the two action kinds and the expected
/// output schema. The model must answer with a bare JSON array.
const SYSTEM_INSTRUCTION: &str = r#"You classify a user message into actions against a personal document store.

Two action kinds exist:
- {"kind": "save_to_docs", "statement": "<text to remember>"} when the user states information to keep.
- {"kind": "ask", "queries": ["<question>", ...]} when the user asks one or more questions. Split compound questions into separate queries, preserving their order.

Respond with ONLY a JSON array of actions. Use [] when the message needs no action. Do not add commentary."#;

/// Classification oracle backed by an OpenAI-compatible API
pub struct OpenAiOracle {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl OpenAiOracle {
    /// Build an oracle from configuration.
    ///
    /// The API key is read from the environment variable named in
    /// `config.api_key_env`.
    pub fn from_config(config: &OracleConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            Error::Config(format!(
                "Oracle API key environment variable '{}' is not set",
                config.api_key_env
            ))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Classification(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Strip a markdown code fence if the model wrapped its JSON in one
    fn unfence(content: &str) -> &str {
        let trimmed = content.trim();
        let Some(inner) = trimmed.strip_prefix("```") else {
            return trimmed;
        };
        let inner = inner.strip_prefix("json").unwrap_or(inner);
        inner.strip_suffix("```").unwrap_or(inner).trim()
    }

    /// Parse the model reply into an action batch
    fn parse_batch(content: &str) -> Result<ActionBatch> {
        let payload = Self::unfence(content);
        serde_json::from_str(payload).map_err(|e| {
            Error::Classification(format!(
                "oracle output is not a valid action batch: {e}: {payload}"
            ))
        })
    }
}

#[async_trait]
impl ClassificationOracle for OpenAiOracle {
    async fn classify(&self, utterance: &str) -> Result<ActionBatch> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: utterance,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Classification(format!("oracle request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Classification(format!(
                "oracle returned HTTP {status}: {body}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Classification(format!("malformed oracle response: {}", e)))?;

        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| Error::Classification("oracle returned no choices".to_string()))?;

        let batch = Self::parse_batch(content)?;
        tracing::debug!(actions = batch.len(), "Oracle classified utterance");
        Ok(batch)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Action;

    #[test]
    fn test_parse_bare_array() {
        let batch = OpenAiOracle::parse_batch(
            r#"[{"kind": "ask", "queries": ["Who is Tuana?"]}]"#,
        )
        .unwrap();
        assert_eq!(batch.len(), 1);
        assert!(matches!(batch.actions[0], Action::Ask { .. }));
    }

    #[test]
    fn test_parse_fenced_array() {
        let content = "```json\n[{\"kind\": \"save_to_docs\", \"statement\": \"the meeting is on Friday\"}]\n```";
        let batch = OpenAiOracle::parse_batch(content).unwrap();
        assert_eq!(
            batch.actions[0],
            Action::SaveToDocs {
                statement: "the meeting is on Friday".to_string()
            }
        );
    }

    #[test]
    fn test_parse_empty_array() {
        let batch = OpenAiOracle::parse_batch("[]").unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_parse_prose_is_classification_error() {
        let result = OpenAiOracle::parse_batch("Sure! I'll remember that for you.");
        assert!(matches!(result, Err(Error::Classification(_))));
    }

    #[test]
    fn test_parse_wrong_shape_is_classification_error() {
        let result = OpenAiOracle::parse_batch(r#"{"kind": "ask", "queries": ["q"]}"#);
        assert!(matches!(result, Err(Error::Classification(_))));
    }

    #[test]
    fn test_missing_key_env_is_config_error() {
        let config = OracleConfig {
            api_key_env: "JOTTER_TEST_ORACLE_KEY_UNSET".to_string(),
            ..Default::default()
        };
        let result = OpenAiOracle::from_config(&config);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
