//! Assistant configuration.
//!
//! The API credential is resolved from, in order:
//! 1. `LUMINA_API_KEY`
//! 2. `GEMINI_API_KEY`
//! 3. `~/.config/lumina/secret.json`
//!
//! A missing credential is not an error: the assistant runs disabled.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{LuminaError, Result};

pub const API_KEY_ENV: &str = "LUMINA_API_KEY";
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "LUMINA_MODEL";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Root structure of `secret.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini section of `secret.json`
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Returns the path of the secret file: `~/.config/lumina/secret.json`
pub fn default_secret_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| LuminaError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("lumina").join("secret.json"))
}

/// Loads a secret file. A missing file is `Ok(None)`.
pub fn load_secret_config(path: &Path) -> Result<Option<SecretConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let config = serde_json::from_str(&content)?;
    Ok(Some(config))
}

/// Settings for the hosted model backend.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

// Keeps the key out of logs.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = non_blank(Some(api_key.into()));
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Resolves the configuration from an environment lookup and an optional
    /// secret file. Blank values count as absent.
    pub fn from_sources<F>(env: F, secret: Option<&SecretConfig>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini = secret.and_then(|s| s.gemini.as_ref());

        let api_key = non_blank(env(API_KEY_ENV))
            .or_else(|| non_blank(env(GEMINI_API_KEY_ENV)))
            .or_else(|| non_blank(gemini.map(|g| g.api_key.clone())));

        let model = non_blank(env(MODEL_ENV))
            .or_else(|| non_blank(gemini.and_then(|g| g.model_name.clone())))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            api_key,
            model,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Resolves from the process environment and the default secret file.
    ///
    /// An unreadable secret file is logged and skipped.
    pub fn resolve() -> Self {
        let secret = default_secret_path()
            .and_then(|path| load_secret_config(&path))
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Ignoring unreadable secret file");
                None
            });
        Self::from_sources(|key| std::env::var(key).ok(), secret.as_ref())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn secret(api_key: &str, model: Option<&str>) -> SecretConfig {
        SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: api_key.to_string(),
                model_name: model.map(str::to_string),
            }),
        }
    }

    #[test]
    fn test_nothing_configured() {
        let config = GatewayConfig::from_sources(env_of(&[]), None);
        assert!(!config.has_credential());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_env_precedence() {
        let file = secret("file-key", Some("file-model"));
        let config = GatewayConfig::from_sources(
            env_of(&[(API_KEY_ENV, "lumina-key"), (GEMINI_API_KEY_ENV, "gemini-key")]),
            Some(&file),
        );
        assert_eq!(config.api_key(), Some("lumina-key"));
        assert_eq!(config.model, "file-model");

        let config =
            GatewayConfig::from_sources(env_of(&[(GEMINI_API_KEY_ENV, "gemini-key")]), Some(&file));
        assert_eq!(config.api_key(), Some("gemini-key"));

        let config = GatewayConfig::from_sources(env_of(&[]), Some(&file));
        assert_eq!(config.api_key(), Some("file-key"));
    }

    #[test]
    fn test_blank_values_are_absent() {
        let file = secret("   ", None);
        let config =
            GatewayConfig::from_sources(env_of(&[(API_KEY_ENV, ""), (MODEL_ENV, " ")]), Some(&file));
        assert!(!config.has_credential());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(!GatewayConfig::default().with_api_key("  ").has_credential());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = GatewayConfig::default().with_api_key("super-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
