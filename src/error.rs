//! Error taxonomy shared by the library.
//!
//! `ConfigError` covers anything that can be detected before a request is
//! sent, `ProviderError` covers the round trip itself, and `ModuleError`
//! covers the module files on disk. `Error` wraps all three so the handler
//! and workflow can propagate them unchanged.

use std::path::PathBuf;

/// Configuration and input validation failures
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unsupported LLM provider '{0}'. Supported: gemini, openrouter")]
    UnsupportedProvider(String),
    #[error(
        "API key not configured for provider '{provider}'. Run `llmport config --api-key <KEY>` or set {env_hint}"
    )]
    MissingApiKey {
        provider: String,
        env_hint: String,
    },
    #[error("Intent must not be empty")]
    EmptyIntent,
    #[error("Unable to determine the user configuration directory")]
    NoConfigDir,
    #[error("Failed to access settings file {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings file format: {0}")]
    SettingsFormat(String),
}

/// Failures talking to an LLM provider
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider rejected the credential. Callers can offer reconfiguration.
    #[error("{provider} rejected the API key (HTTP {status}): {body}")]
    Auth {
        provider: &'static str,
        status: u16,
        body: String,
    },
    #[error("{provider} API request failed with status {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("Unexpected {provider} response: {detail}")]
    Malformed {
        provider: &'static str,
        detail: String,
    },
}

impl ProviderError {
    /// True when the provider rejected the credential
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Classify a non-success HTTP status
    pub(crate) fn from_status(provider: &'static str, status: u16, body: String) -> Self {
        if status == 401 || status == 403 {
            Self::Auth {
                provider,
                status,
                body,
            }
        } else {
            Self::Status {
                provider,
                status,
                body,
            }
        }
    }
}

/// Failures around generated module files
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    #[error("Invalid module name '{0}': use letters, digits and underscores, not starting with a digit")]
    InvalidName(String),
    #[error("The file {} does not exist and cannot be updated", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level library error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Module(#[from] ModuleError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
