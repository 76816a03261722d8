//! Runtime configuration loaded from a TOML file.
//!
//! ```toml
//! [sampling]
//! max_tokens = 400
//! starter_max_tokens = 120
//! starter_temperature = 0.85
//!
//! [prompt]
//! history_window = 8
//! extra_stop_sequences = ["\n###"]
//!
//! [logging]
//! filter = "oread=debug"
//! ```
//!
//! Every section and key is optional; missing values take the built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::{
    BACKSTORY_LIMIT, DEFAULT_MAX_TOKENS, HISTORY_WINDOW, STARTER_MAX_TOKENS, STARTER_TEMPERATURE,
    WELLNESS_STARTER_MAX_TOKENS, WELLNESS_STARTER_TEMPERATURE,
};

/// Token budgets and starter sampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub max_tokens: u32,
    pub starter_max_tokens: u32,
    pub starter_temperature: f32,
    pub wellness_starter_max_tokens: u32,
    pub wellness_starter_temperature: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            starter_max_tokens: STARTER_MAX_TOKENS,
            starter_temperature: STARTER_TEMPERATURE,
            wellness_starter_max_tokens: WELLNESS_STARTER_MAX_TOKENS,
            wellness_starter_temperature: WELLNESS_STARTER_TEMPERATURE,
        }
    }
}

/// Prompt window sizes and stop sequences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Recent messages to include
    pub history_window: usize,
    /// Character backstory truncation, in characters
    pub backstory_limit: usize,
    /// Appended after the speaker-turn stop sequences
    pub extra_stop_sequences: Vec<String>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            history_window: HISTORY_WINDOW,
            backstory_limit: BACKSTORY_LIMIT,
            extra_stop_sequences: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter directive, overridden by RUST_LOG
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "info".to_string() }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OreadConfig {
    pub sampling: SamplingConfig,
    pub prompt: PromptConfig,
    pub logging: LoggingConfig,
}

impl OreadConfig {
    /// Parse from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded config");
        Ok(config)
    }

    /// Load from a file if given, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = OreadConfig::from_toml("").unwrap();
        assert_eq!(config, OreadConfig::default());
        assert_eq!(config.sampling.max_tokens, 400);
        assert_eq!(config.prompt.history_window, 8);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_partial_override() {
        let config = OreadConfig::from_toml(
            "[sampling]\nmax_tokens = 256\n\n[prompt]\nextra_stop_sequences = [\"###\"]\n",
        )
        .unwrap();
        assert_eq!(config.sampling.max_tokens, 256);
        assert_eq!(config.sampling.starter_max_tokens, 120);
        assert_eq!(config.prompt.extra_stop_sequences, vec!["###".to_string()]);
        assert_eq!(config.prompt.backstory_limit, 1000);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(OreadConfig::from_toml("[sampling\nmax_tokens = ").is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(OreadConfig::load("/nonexistent/oread.toml").is_err());
        assert!(OreadConfig::load_or_default(None).is_ok());
    }
}
