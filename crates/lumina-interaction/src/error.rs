//! Failures of the hosted model backend.
//!
//! These never leave the gateway: [`crate::AssistantGateway`] turns every one
//! of them into a fallback reply.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// No API credential is configured.
    #[error("API credential is not configured")]
    MissingCredential,

    /// The request could not be sent or the service answered with an error.
    #[error("Request failed: {message}")]
    Request {
        status_code: Option<u16>,
        message: String,
    },

    /// The service answered without any text.
    #[error("Response contained no text")]
    EmptyResponse,

    /// The response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A prompt template failed to render.
    #[error("Failed to render prompt: {0}")]
    Prompt(String),
}

impl GatewayError {
    /// HTTP status of a failed request, when the service answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Request { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

impl From<minijinja::Error> for GatewayError {
    fn from(err: minijinja::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}
