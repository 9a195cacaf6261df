//! Provider configuration.
//!
//! [`resolve`] turns explicit overrides plus the environment into a [`Config`].
//! [`Settings`] is the TOML file written by `llmport config`.

use crate::error::ConfigError;
use crate::log_debug;
use crate::providers::{PROVIDER_ENV, Provider};

use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Fully resolved configuration used to construct a connector
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub provider: Provider,
    /// `None` when neither an override nor any of the provider's key variables is set
    pub api_key: Option<String>,
    pub model: String,
    /// Request timeout in seconds, `None` leaves it to the transport
    pub timeout_secs: Option<u64>,
    /// Alternative API base URL (proxies, tests)
    pub base_url: Option<String>,
}

impl Config {
    /// The API key, or the error telling the user how to configure one
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey {
                provider: self.provider.name().to_string(),
                env_hint: self.provider.api_key_envs().join(" or "),
            })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Explicit values that take precedence over the environment
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ConfigOverrides {
    /// Field-wise fallback: values set on `self` win
    #[must_use]
    pub fn merge(self, fallback: Self) -> Self {
        Self {
            provider: self.provider.or(fallback.provider),
            api_key: self.api_key.or(fallback.api_key),
            model: self.model.or(fallback.model),
            timeout_secs: self.timeout_secs.or(fallback.timeout_secs),
            base_url: self.base_url.or(fallback.base_url),
        }
    }
}

/// Source of environment variables
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<S: ::std::hash::BuildHasher> Environment for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolve the effective configuration.
///
/// Each field takes the override when present, then the environment, then the
/// provider default. Empty values count as unset. No network access and no
/// global state: the same inputs always give the same `Config`.
pub fn resolve(
    overrides: &ConfigOverrides,
    env: &impl Environment,
) -> Result<Config, ConfigError> {
    let provider_name =
        non_empty(overrides.provider.clone()).or_else(|| non_empty(env.var(PROVIDER_ENV)));
    let provider = match provider_name {
        Some(name) => name.parse::<Provider>()?,
        None => Provider::default(),
    };

    let api_key = non_empty(overrides.api_key.clone()).or_else(|| {
        provider
            .api_key_envs()
            .iter()
            .find_map(|var| non_empty(env.var(var)))
    });

    let model = non_empty(overrides.model.clone())
        .or_else(|| non_empty(env.var(provider.model_env())))
        .unwrap_or_else(|| provider.default_model().to_string());

    let config = Config {
        provider,
        api_key,
        model,
        timeout_secs: overrides.timeout_secs,
        base_url: non_empty(overrides.base_url.clone()),
    };
    log_debug!("Configuration resolved: {:?}", config);
    Ok(config)
}

/// Saved per-provider values
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProviderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Persisted settings, written by `llmport config`
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    /// Default provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Provider-specific settings keyed by provider name
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub providers: HashMap<String, ProviderSettings>,
}

impl Settings {
    /// Load settings from the user configuration directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load settings from a specific file. A missing file yields empty settings.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self =
            toml::from_str(&content).map_err(|e| ConfigError::SettingsFormat(e.to_string()))?;
        log_debug!("Settings loaded from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::SettingsIo {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SettingsFormat(e.to_string()))?;
        fs::write(path, content).map_err(io_err)?;
        log_debug!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Path to the settings file
    pub fn path() -> Result<PathBuf, ConfigError> {
        let mut path = config_dir().ok_or(ConfigError::NoConfigDir)?;
        path.push("llmport");
        path.push("config.toml");
        Ok(path)
    }

    /// Record explicit values. The provider is validated and becomes the
    /// default; key, model and base URL are stored under that provider.
    pub fn update(&mut self, changes: &ConfigOverrides) -> Result<bool, ConfigError> {
        let mut changed = false;

        if let Some(name) = non_empty(changes.provider.clone()) {
            let provider: Provider = name.parse()?;
            if self.provider.as_deref() != Some(provider.name()) {
                self.provider = Some(provider.name().to_string());
                changed = true;
            }
        }

        if let Some(timeout) = changes.timeout_secs
            && self.timeout_secs != Some(timeout)
        {
            self.timeout_secs = Some(timeout);
            changed = true;
        }

        let provider = self.default_provider()?;
        let entry = self
            .providers
            .entry(provider.name().to_string())
            .or_default();

        for (slot, value) in [
            (&mut entry.api_key, &changes.api_key),
            (&mut entry.model, &changes.model),
            (&mut entry.base_url, &changes.base_url),
        ] {
            if let Some(value) = value
                && slot.as_ref() != Some(value)
            {
                *slot = Some(value.clone());
                changed = true;
            }
        }

        Ok(changed)
    }

    /// Saved default provider, falling back to the built-in default
    pub fn default_provider(&self) -> Result<Provider, ConfigError> {
        self.provider
            .as_deref()
            .map_or(Ok(Provider::default()), str::parse)
    }

    /// Layer saved values beneath `cli` for the provider that will be used.
    ///
    /// Precedence is CLI flags, then saved settings, then environment.
    pub fn layered_overrides(
        &self,
        cli: &ConfigOverrides,
        env: &impl Environment,
    ) -> ConfigOverrides {
        let provider = non_empty(cli.provider.clone())
            .or_else(|| self.provider.clone())
            .or_else(|| non_empty(env.var(PROVIDER_ENV)));

        let lookup = provider
            .as_deref()
            .map_or_else(|| Provider::default().name().to_string(), |p| p.trim().to_lowercase());
        let saved = self.providers.get(&lookup).cloned().unwrap_or_default();

        cli.clone().merge(ConfigOverrides {
            provider,
            api_key: saved.api_key,
            model: saved.model,
            timeout_secs: self.timeout_secs,
            base_url: saved.base_url,
        })
    }
}
