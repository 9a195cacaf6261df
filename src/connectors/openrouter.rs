use super::{Connector, ConnectorOptions, http_client, success_body, transport};
use crate::error::ProviderError;
use crate::providers::Provider;
use crate::trace_debug;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const NAME: &str = Provider::OpenRouter.display_name();
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai";
const COMPLETIONS_PATH: &str = "/api/v1/chat/completions";

/// Connector for OpenRouter's OpenAI-compatible chat completions API
pub struct OpenRouterConnector {
    api_key: String,
    model: String,
    endpoint: String,
    client: Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    /// OpenRouter may report failures inside a 200 body
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: String,
}

impl OpenRouterConnector {
    pub fn new(
        api_key: String,
        model: String,
        options: &ConnectorOptions,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            api_key,
            model,
            endpoint: format!("{}{COMPLETIONS_PATH}", options.base_url_or(DEFAULT_BASE_URL)),
            client: http_client(NAME, options)?,
        })
    }

    pub(crate) fn boxed(
        api_key: String,
        model: String,
        options: &ConnectorOptions,
    ) -> Result<Box<dyn Connector>, ProviderError> {
        Ok(Box::new(Self::new(api_key, model, options)?))
    }
}

#[async_trait]
impl Connector for OpenRouterConnector {
    fn provider(&self) -> Provider {
        Provider::OpenRouter
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn call_llm(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };
        trace_debug!(
            model = %self.model,
            endpoint = %self.endpoint,
            "Sending OpenRouter chat request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("X-Title", "llmport")
            .json(&request)
            .send()
            .await
            .map_err(|source| transport(NAME, source))?;

        let body = success_body(NAME, response).await?;
        parse_completion(&body)
    }
}

/// Pull `choices[0].message.content` out of a completion body
fn parse_completion(body: &str) -> Result<String, ProviderError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed {
            provider: NAME,
            detail: format!("invalid completion body: {e}"),
        })?;

    if let Some(error) = response.error {
        return Err(ProviderError::from_status(
            NAME,
            error.code.unwrap_or(500),
            error.message,
        ));
    }

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ProviderError::Malformed {
            provider: NAME,
            detail: "missing choices[0].message.content".to_string(),
        })
}
