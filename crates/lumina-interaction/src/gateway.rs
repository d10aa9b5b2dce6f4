//! AssistantGateway - the storefront's only route to the hosted model.
//!
//! Both operations always produce display text. Missing credentials, transport
//! failures, and empty answers all become fixed fallback strings, logged here
//! and never surfaced to callers as errors.

use std::sync::Arc;

use lumina_core::{ChatTurn, GatewayConfig};

use crate::backend::{CompletionBackend, GenerateOptions};
use crate::error::GatewayError;
use crate::gemini::GeminiBackend;
use crate::prompts::{ASSISTANT_PERSONA, styling_tips_prompt};

pub const CHAT_MISSING_CREDENTIAL: &str =
    "I'm sorry, I can't connect to my brain right now (API Key missing).";
pub const CHAT_REQUEST_FAILED: &str =
    "I'm having trouble connecting to the design servers right now. Please try again.";
pub const CHAT_EMPTY_REPLY: &str = "I'm thinking...";

pub const TIPS_MISSING_CREDENTIAL: &str = "Styling tips unavailable.";
pub const TIPS_REQUEST_FAILED: &str = "Could not load styling tips.";
pub const TIPS_EMPTY_REPLY: &str = "No tips available.";

/// Fallback texts for one operation.
struct Fallbacks {
    missing_credential: &'static str,
    request_failed: &'static str,
    empty_reply: &'static str,
}

const CHAT_FALLBACKS: Fallbacks = Fallbacks {
    missing_credential: CHAT_MISSING_CREDENTIAL,
    request_failed: CHAT_REQUEST_FAILED,
    empty_reply: CHAT_EMPTY_REPLY,
};

const TIPS_FALLBACKS: Fallbacks = Fallbacks {
    missing_credential: TIPS_MISSING_CREDENTIAL,
    request_failed: TIPS_REQUEST_FAILED,
    empty_reply: TIPS_EMPTY_REPLY,
};

/// Request/response wrapper around a [`CompletionBackend`].
///
/// Cloning is cheap; clones share the backend. Calls are independent: nothing
/// is cached or deduplicated.
#[derive(Clone)]
pub struct AssistantGateway {
    backend: Option<Arc<dyn CompletionBackend>>,
}

impl AssistantGateway {
    /// Wraps an existing backend.
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// A gateway with no credential. Every call returns its fallback at once.
    pub fn disabled() -> Self {
        Self { backend: None }
    }

    /// Builds a Gemini-backed gateway, or a disabled one when the
    /// configuration has no credential.
    pub fn from_config(config: &GatewayConfig) -> Self {
        match GeminiBackend::from_config(config) {
            Ok(backend) => {
                tracing::info!(model = %backend.model(), "Assistant gateway enabled");
                Self::new(Arc::new(backend))
            }
            Err(GatewayError::MissingCredential) => {
                tracing::warn!("API key is missing. Assistant features will be disabled.");
                Self::disabled()
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to initialize assistant backend");
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Replies to `new_message` given the prior conversation.
    ///
    /// `history` must not contain `new_message`.
    pub async fn get_assistant_reply(&self, history: &[ChatTurn], new_message: &str) -> String {
        let Some(backend) = &self.backend else {
            tracing::debug!("Assistant disabled, returning chat fallback");
            return CHAT_MISSING_CREDENTIAL.to_string();
        };

        let result = backend
            .converse(ASSISTANT_PERSONA, history, new_message)
            .await;
        settle("chat", result, &CHAT_FALLBACKS)
    }

    /// Asks for three short, bulleted styling tips for a product.
    pub async fn get_styling_tips(&self, product_name: &str, product_description: &str) -> String {
        let Some(backend) = &self.backend else {
            tracing::debug!("Assistant disabled, returning styling fallback");
            return TIPS_MISSING_CREDENTIAL.to_string();
        };

        let result = match styling_tips_prompt(product_name, product_description) {
            Ok(prompt) => {
                let options = GenerateOptions {
                    thinking_budget: Some(0),
                };
                backend.generate(&prompt, options).await
            }
            Err(err) => Err(err),
        };
        settle("styling_tips", result, &TIPS_FALLBACKS)
    }
}

fn settle(operation: &str, result: Result<String, GatewayError>, fallbacks: &Fallbacks) -> String {
    match result {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) | Err(GatewayError::EmptyResponse) => {
            tracing::warn!(operation, "Assistant returned no text");
            fallbacks.empty_reply.to_string()
        }
        Err(GatewayError::MissingCredential) => fallbacks.missing_credential.to_string(),
        Err(err) => {
            tracing::error!(
                operation,
                error = %err,
                status = ?err.status_code(),
                "Assistant request failed"
            );
            fallbacks.request_failed.to_string()
        }
    }
}
