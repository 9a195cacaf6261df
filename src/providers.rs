//! LLM provider catalog.
//!
//! Single source of truth for supported providers, their default models and
//! the environment variables they read credentials from.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment variable selecting the provider
pub const PROVIDER_ENV: &str = "LLMPORT_PROVIDER";

/// Supported LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    OpenRouter,
}

impl Provider {
    /// All available providers
    pub const ALL: &'static [Provider] = &[Provider::Gemini, Provider::OpenRouter];

    /// Provider name as used in settings files and CLI
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenRouter => "openrouter",
        }
    }

    /// Human-readable name used in error messages
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::OpenRouter => "OpenRouter",
        }
    }

    /// Model used when neither an override nor the model variable is set
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini-1.5-flash",
            Self::OpenRouter => "deepseek/deepseek-chat-v3-0324:free",
        }
    }

    /// API key variables, checked in order
    pub const fn api_key_envs(&self) -> &'static [&'static str] {
        match self {
            Self::Gemini => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
            Self::OpenRouter => &["OPENROUTER_API_KEY"],
        }
    }

    /// Variable overriding the model
    pub const fn model_env(&self) -> &'static str {
        match self {
            Self::Gemini => "LLMPORT_GEMINI_MODEL",
            Self::OpenRouter => "LLMPORT_OPENROUTER_MODEL",
        }
    }

    /// Get all provider names as strings
    pub fn all_names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::name).collect()
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|p| p.name() == lower)
            .copied()
            .ok_or_else(|| ConfigError::UnsupportedProvider(s.to_string()))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("gemini".parse::<Provider>().ok(), Some(Provider::Gemini));
        assert_eq!(
            "OpenRouter".parse::<Provider>().ok(),
            Some(Provider::OpenRouter)
        );
        assert!(matches!(
            "anthropic".parse::<Provider>(),
            Err(ConfigError::UnsupportedProvider(name)) if name == "anthropic"
        ));
    }

    #[test]
    fn test_provider_defaults() {
        assert_eq!(Provider::default(), Provider::Gemini);
        assert_eq!(Provider::Gemini.default_model(), "gemini-1.5-flash");
        assert_eq!(
            Provider::OpenRouter.default_model(),
            "deepseek/deepseek-chat-v3-0324:free"
        );
        assert_eq!(
            Provider::Gemini.api_key_envs(),
            &["GEMINI_API_KEY", "GOOGLE_API_KEY"]
        );
        assert_eq!(Provider::OpenRouter.model_env(), "LLMPORT_OPENROUTER_MODEL");
    }

    #[test]
    fn test_names_round_trip() {
        for provider in Provider::ALL {
            assert_eq!(provider.name().parse::<Provider>().ok(), Some(*provider));
            assert_eq!(provider.to_string(), provider.name());
        }
    }
}
