//! Assistant gateway for the Lumina storefront.
//!
//! [`AssistantGateway`] is what the presentation layer talks to. It forwards
//! chat turns and styling requests to a [`CompletionBackend`] (Gemini over
//! REST in production) and guarantees a displayable string back.

pub mod backend;
pub mod error;
pub mod gateway;
pub mod gemini;
pub mod prompts;

pub use backend::{CompletionBackend, GenerateOptions};
pub use error::GatewayError;
pub use gateway::AssistantGateway;
pub use gemini::GeminiBackend;
