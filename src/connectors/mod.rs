//! Provider connectors.
//!
//! A connector submits one prompt and returns the provider's text. Each
//! provider gets its own struct; [`from_config`] picks one through the
//! [`CONNECTORS`] table so callers never name a concrete type.

pub mod gemini;
pub mod openrouter;

use crate::config::Config;
use crate::error::{ConfigError, Error, ProviderError};
use crate::providers::Provider;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub use gemini::GeminiConnector;
pub use openrouter::OpenRouterConnector;

/// Capability to send a prompt to an LLM and get its text back.
///
/// Implementations hold only immutable state, so a connector can be reused
/// for any number of sequential calls. No internal synchronization is done.
#[async_trait]
pub trait Connector: Send + Sync {
    fn provider(&self) -> Provider;

    fn model(&self) -> &str;

    /// Perform exactly one request. No retries.
    async fn call_llm(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Transport settings applied when a connector is built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectorOptions {
    pub timeout: Option<Duration>,
    /// Replaces the provider's public API origin
    pub base_url: Option<String>,
}

impl ConnectorOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            timeout: config.timeout(),
            base_url: config.base_url.clone(),
        }
    }

    pub(crate) fn base_url_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.base_url
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
    }
}

/// Builds a connector from credential, model and transport options
pub type ConnectorCtor =
    fn(String, String, &ConnectorOptions) -> Result<Box<dyn Connector>, ProviderError>;

/// Provider tag to constructor mapping
pub const CONNECTORS: &[(Provider, ConnectorCtor)] = &[
    (Provider::Gemini, GeminiConnector::boxed),
    (Provider::OpenRouter, OpenRouterConnector::boxed),
];

/// Construct the connector selected by `config`.
///
/// A missing credential fails here, before any request is made.
pub fn from_config(config: &Config) -> Result<Box<dyn Connector>, Error> {
    let api_key = config.require_api_key()?;
    let ctor = CONNECTORS
        .iter()
        .find(|(provider, _)| *provider == config.provider)
        .map(|(_, ctor)| *ctor)
        .ok_or_else(|| ConfigError::UnsupportedProvider(config.provider.name().to_string()))?;

    let connector = ctor(
        api_key.to_string(),
        config.model.clone(),
        &ConnectorOptions::from_config(config),
    )?;
    Ok(connector)
}

pub(crate) fn http_client(
    provider: &'static str,
    options: &ConnectorOptions,
) -> Result<Client, ProviderError> {
    let mut builder = Client::builder();
    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|source| transport(provider, source))
}

/// Wrap a reqwest failure. The URL is dropped since it may carry a credential.
pub(crate) fn transport(provider: &'static str, source: reqwest::Error) -> ProviderError {
    ProviderError::Transport {
        provider,
        source: source.without_url(),
    }
}

/// Read the body of a response, turning non-success statuses into errors
pub(crate) async fn success_body(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| transport(provider, source))?;

    if !status.is_success() {
        return Err(ProviderError::from_status(provider, status.as_u16(), body));
    }
    Ok(body)
}
