//! GeminiBackend - Direct REST API implementation for Gemini.
//!
//! Calls `models/{model}:generateContent` with `reqwest`. Conversation turns map
//! to Gemini roles: user messages are `"user"`, assistant messages `"model"`.

use async_trait::async_trait;
use lumina_core::{ChatRole, ChatTurn, GatewayConfig};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::backend::{CompletionBackend, GenerateOptions};
use crate::error::GatewayError;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Backend that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiBackend {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiBackend {
    /// Builds a backend from resolved configuration.
    ///
    /// Fails with [`GatewayError::MissingCredential`] when no key is set.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let api_key = config.api_key().ok_or(GatewayError::MissingCredential)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| GatewayError::Request {
                status_code: None,
                message: format!("Failed to build HTTP client: {err}"),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: config.model.clone(),
            base_url: BASE_URL.to_string(),
        })
    }

    /// Points the backend at another endpoint root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, GatewayError> {
        let url = format!("{}/{model}:generateContent", self.base_url, model = self.model);

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| GatewayError::Request {
                status_code: None,
                message: format!("Gemini API request failed: {err}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| GatewayError::Parse(format!("Failed to parse Gemini response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl CompletionBackend for GeminiBackend {
    async fn converse(
        &self,
        system_instruction: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<String, GatewayError> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content::text(gemini_role(turn.role), &turn.text))
            .collect();
        contents.push(Content::text("user", message));

        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(Content::text("system", system_instruction)),
            generation_config: None,
        };
        self.send_request(&request).await
    }

    async fn generate(
        &self,
        prompt: &str,
        options: GenerateOptions,
    ) -> Result<String, GatewayError> {
        let generation_config = options.thinking_budget.map(|budget| GenerationConfig {
            thinking_config: ThinkingConfig {
                thinking_budget: budget,
            },
        });

        let request = GenerateContentRequest {
            contents: vec![Content::text("user", prompt)],
            system_instruction: None,
            generation_config,
        };
        self.send_request(&request).await
    }
}

fn gemini_role(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Assistant => "model",
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn text(role: &str, text: &str) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Concatenates the text parts of the first candidate.
fn extract_text_response(response: GenerateContentResponse) -> Result<String, GatewayError> {
    let text: String = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GatewayError::EmptyResponse);
    }
    Ok(text)
}

fn map_http_error(status: StatusCode, body: String) -> GatewayError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    GatewayError::Request {
        status_code: Some(status.as_u16()),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "- Pair with "}, {"text": "linen."}]}}]
        }))
        .unwrap();
        assert_eq!(extract_text_response(response).unwrap(), "- Pair with linen.");
    }

    #[test]
    fn test_extract_text_empty_is_error() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": []})).unwrap();
        assert!(matches!(
            extract_text_response(response),
            Err(GatewayError::EmptyResponse)
        ));

        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "  "}]}}]
        }))
        .unwrap();
        assert!(matches!(
            extract_text_response(response),
            Err(GatewayError::EmptyResponse)
        ));
    }

    #[test]
    fn test_map_http_error_reads_google_envelope() {
        let body = json!({
            "error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}
        })
        .to_string();
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(err.status_code(), Some(429));
        assert_eq!(err.to_string(), "Request failed: RESOURCE_EXHAUSTED: Quota exceeded");
    }

    #[test]
    fn test_map_http_error_plain_body() {
        let err = map_http_error(StatusCode::BAD_REQUEST, "bad".to_string());
        assert_eq!(err.status_code(), Some(400));
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_from_config_requires_key() {
        assert!(matches!(
            GeminiBackend::from_config(&GatewayConfig::default()),
            Err(GatewayError::MissingCredential)
        ));
        let backend =
            GeminiBackend::from_config(&GatewayConfig::default().with_api_key("k").with_model("m"))
                .unwrap();
        assert_eq!(backend.model(), "m");
    }
}
