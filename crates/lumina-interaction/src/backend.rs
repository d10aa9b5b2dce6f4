//! The seam between the gateway and a hosted completion service.

use async_trait::async_trait;
use lumina_core::ChatTurn;

use crate::error::GatewayError;

/// Tuning for single-shot completions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Reasoning token budget; `Some(0)` turns thinking off.
    pub thinking_budget: Option<u32>,
}

/// A hosted language model reachable over the network.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Continues a conversation. `history` excludes `message`.
    async fn converse(
        &self,
        system_instruction: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<String, GatewayError>;

    /// Completes a single prompt with no history.
    async fn generate(&self, prompt: &str, options: GenerateOptions)
    -> Result<String, GatewayError>;
}
