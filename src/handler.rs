//! Prompt → connector → cleaner pipeline.

use crate::cleaner::clean_response;
use crate::connectors::Connector;
use crate::error::Result;
use crate::log_debug;
use crate::prompts::{render_generate, render_update};

/// Everything one generate/update call produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Cleaned source ready to be written to disk
    pub source: String,
    /// The rendered prompt that was sent
    pub prompt: String,
    /// The provider's unmodified answer
    pub raw_response: String,
}

/// Generates and updates module source through a connector
pub struct ModuleHandler {
    connector: Box<dyn Connector>,
}

impl ModuleHandler {
    pub fn new(connector: Box<dyn Connector>) -> Self {
        Self { connector }
    }

    /// Create the full code for a new module
    pub async fn generate(&self, intent: &str) -> Result<Generation> {
        let prompt = render_generate(intent)?;
        self.run(prompt).await
    }

    /// Create the full code for an updated module
    pub async fn update(&self, existing_source: &str, intent: &str) -> Result<Generation> {
        let prompt = render_update(intent, existing_source)?;
        self.run(prompt).await
    }

    async fn run(&self, prompt: String) -> Result<Generation> {
        log_debug!(
            "Calling {} ({}) with a {}-byte prompt",
            self.connector.provider(),
            self.connector.model(),
            prompt.len()
        );
        let raw_response = self.connector.call_llm(&prompt).await?;
        log_debug!("Received {} bytes", raw_response.len());

        Ok(Generation {
            source: clean_response(&raw_response),
            prompt,
            raw_response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error, ProviderError};
    use crate::providers::Provider;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct ScriptedConnector {
        reply: String,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Connector for ScriptedConnector {
        fn provider(&self) -> Provider {
            Provider::OpenRouter
        }

        fn model(&self) -> &str {
            "scripted"
        }

        async fn call_llm(&self, prompt: &str) -> std::result::Result<String, ProviderError> {
            self.prompts.lock().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    fn scripted(reply: &str) -> (ModuleHandler, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let connector = ScriptedConnector {
            reply: reply.to_string(),
            prompts: Arc::clone(&prompts),
        };
        (ModuleHandler::new(Box::new(connector)), prompts)
    }

    #[tokio::test]
    async fn test_generate_returns_all_artifacts() {
        let raw = "```python\ndef add(a, b):\n    return a + b\n```";
        let (handler, prompts) = scripted(raw);

        let generation = handler
            .generate("a function add(a,b) that returns a+b")
            .await
            .expect("generate");

        assert_eq!(generation.source, "def add(a, b):\n    return a + b");
        assert_eq!(generation.raw_response, raw);
        assert!(generation.prompt.contains("a function add(a,b) that returns a+b"));
        assert_eq!(prompts.lock().as_slice(), [generation.prompt.clone()]);
    }

    #[tokio::test]
    async fn test_update_sends_existing_source() {
        let (handler, prompts) = scripted("def add(a: int, b: int) -> int:\n    return a + b\n");

        let generation = handler
            .update("def add(a,b): return a+b", "add type hints")
            .await
            .expect("update");

        assert_eq!(
            generation.source,
            "def add(a: int, b: int) -> int:\n    return a + b"
        );
        let sent = prompts.lock();
        assert!(sent[0].contains("def add(a,b): return a+b"));
        assert!(sent[0].contains("add type hints"));
    }

    #[tokio::test]
    async fn test_empty_intent_skips_connector() {
        let (handler, prompts) = scripted("unused");
        let result = handler.generate("   ").await;
        assert!(matches!(result, Err(Error::Config(ConfigError::EmptyIntent))));
        assert!(prompts.lock().is_empty());
    }
}
