//! LLM client: the single point of entry for text-generation API calls.
//!
//! Only the optional generated-review path uses it; the heuristic engine never does.
//! Targets the OpenAI Responses API.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

const RESPONSES_API_URL: &str = "https://api.openai.com/v1/responses";
/// Small, inexpensive default; override with `OPENAI_MODEL`.
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Sampling settings for one call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage<'a>>,
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Wraps the Responses API with retry on 429/5xx.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: String, model: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends a system + user message pair and returns the concatenated output text.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn generate(
        &self,
        system: &str,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, LlmError> {
        let request_body = ResponsesRequest {
            model: &self.model,
            input: vec![
                InputMessage {
                    role: "system",
                    content: system,
                },
                InputMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: options.temperature,
            max_output_tokens: options.max_output_tokens,
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(RESPONSES_API_URL)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let data: Value = response.json().await?;
            let text = extract_output_text(&data);
            debug!("LLM call succeeded: {} chars of output", text.len());

            if text.trim().is_empty() {
                return Err(LlmError::EmptyContent);
            }
            return Ok(text);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

/// Joins every `output[*].content[*].text` part, falling back to the
/// top-level `output_text` or `text` fields.
fn extract_output_text(data: &Value) -> String {
    let joined: String = data
        .get("output")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("content").and_then(Value::as_array))
                .flatten()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if !joined.trim().is_empty() {
        return joined;
    }

    ["output_text", "text"]
        .iter()
        .find_map(|key| data.get(*key).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_joins_output_parts() {
        let data = json!({
            "output": [
                { "type": "message", "content": [
                    { "type": "output_text", "text": "<div>" },
                    { "type": "output_text", "text": "review</div>" }
                ]},
                { "type": "reasoning" }
            ]
        });
        assert_eq!(extract_output_text(&data), "<div>review</div>");
    }

    #[test]
    fn test_extract_falls_back_to_output_text() {
        let data = json!({ "output": [], "output_text": "fallback" });
        assert_eq!(extract_output_text(&data), "fallback");
    }

    #[test]
    fn test_extract_falls_back_to_text() {
        let data = json!({ "text": "plain" });
        assert_eq!(extract_output_text(&data), "plain");
    }

    #[test]
    fn test_extract_empty_when_nothing_usable() {
        assert_eq!(extract_output_text(&json!({ "id": "resp_1" })), "");
    }

    #[test]
    fn test_request_serializes_expected_shape() {
        let body = ResponsesRequest {
            model: DEFAULT_MODEL,
            input: vec![InputMessage {
                role: "system",
                content: "rules",
            }],
            temperature: 0.35,
            max_output_tokens: 2000,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "gpt-4.1-nano");
        assert_eq!(value["input"][0]["role"], "system");
        assert_eq!(value["max_output_tokens"], 2000);
    }
}
