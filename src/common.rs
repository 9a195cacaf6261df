use crate::config::ConfigOverrides;
use crate::providers::Provider;
use clap::Args;
use std::fmt;
use std::path::PathBuf;

/// Provider selection flags shared by commands that call an LLM
#[derive(Args, Clone, Default)]
pub struct CommonParams {
    /// Override the configured LLM provider
    #[arg(long, help = "Override the configured LLM provider", value_parser = available_providers_parser)]
    pub provider: Option<String>,

    /// Override the model for this run
    #[arg(long, help = "Override the model for this run")]
    pub model: Option<String>,

    /// Use this API key instead of the saved or environment one
    #[arg(long, help = "Use this API key instead of the saved or environment one")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, help = "Request timeout in seconds")]
    pub timeout: Option<u64>,
}

impl fmt::Debug for CommonParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommonParams")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CommonParams {
    pub fn to_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            provider: self.provider.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            timeout_secs: self.timeout,
            base_url: None,
        }
    }
}

/// Where modules and event logs go and how events are echoed
#[derive(Args, Clone, Debug)]
pub struct OutputParams {
    /// Directory holding the generated modules
    #[arg(long, default_value = ".", help = "Directory holding the generated modules")]
    pub dir: PathBuf,

    /// Echo the prompt and raw response to stdout
    #[arg(long, help = "Echo the prompt and raw response to stdout")]
    pub stdout: bool,

    /// Do not append the prompt and response to <MODULE>.log
    #[arg(long, help = "Do not append the prompt and response to <MODULE>.log")]
    pub no_log: bool,

    /// Print the cleaned source after writing it
    #[arg(short, long, help = "Print the cleaned source after writing it")]
    pub print: bool,
}

/// Validates that a provider name is available in the system
pub fn available_providers_parser(s: &str) -> Result<String, String> {
    match s.parse::<Provider>() {
        Ok(provider) => Ok(provider.name().to_string()),
        Err(_) => Err(format!(
            "Invalid provider '{}'. Available providers: {}",
            s,
            Provider::all_names().join(", ")
        )),
    }
}
