//! llmport - generate source modules on demand by prompting an LLM
//!
//! A prompt is rendered from the user's intent, sent through a provider
//! [`Connector`](connectors::Connector), and the answer is cleaned of markdown
//! fencing before being saved as a module file.

#![allow(clippy::uninlined_format_args)] // Style preference

pub mod cleaner;
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod connectors;
pub mod error;
pub mod event_log;
pub mod handler;
pub mod logger;
pub mod prompts;
pub mod providers;
pub mod store;
pub mod ui;
pub mod workflow;

// Re-export important structs and functions for easier testing
pub use cleaner::clean_response;
pub use config::{Config, ConfigOverrides, resolve};
pub use connectors::{Connector, ConnectorOptions};
pub use error::{ConfigError, Error, ModuleError, ProviderError};
pub use handler::{Generation, ModuleHandler};
pub use providers::Provider;
pub use workflow::{Outcome, Workflow};
