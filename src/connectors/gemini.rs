use super::{Connector, ConnectorOptions, http_client, success_body, transport};
use crate::error::ProviderError;
use crate::providers::Provider;
use crate::trace_debug;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{Value, json};

const NAME: &str = Provider::Gemini.display_name();
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Connector for Google's Gemini `generateContent` API
pub struct GeminiConnector {
    api_key: String,
    model: String,
    endpoint: Url,
    client: Client,
}

impl GeminiConnector {
    pub fn new(
        api_key: String,
        model: String,
        options: &ConnectorOptions,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            endpoint: generate_content_url(options.base_url_or(DEFAULT_BASE_URL), &model)?,
            api_key,
            model,
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
impl Connector for GeminiConnector {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn call_llm(&self, prompt: &str) -> Result<String, ProviderError> {
        let request_body = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }
            ]
        });

        // Model is specified in the URL, not the body
        trace_debug!(model = %self.model, "Sending Gemini generateContent request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .query(&[("key", &self.api_key)])
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|source| transport(NAME, source))?;

        let body = success_body(NAME, response).await.map_err(invalid_key_as_auth)?;
        let response_body: Value =
            serde_json::from_str(&body).map_err(|e| ProviderError::Malformed {
                provider: NAME,
                detail: format!("invalid JSON body: {e}"),
            })?;

        extract_text(&response_body)
    }
}

/// `{base}/v1beta/models/{model}:generateContent`, with the model percent-encoded
fn generate_content_url(base_url: &str, model: &str) -> Result<Url, ProviderError> {
    let invalid = |detail: String| ProviderError::Malformed {
        provider: NAME,
        detail,
    };
    let method = format!("{model}:generateContent");
    let mut url =
        Url::parse(base_url).map_err(|e| invalid(format!("invalid base URL {base_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| invalid(format!("base URL {base_url} cannot take a path")))?
        .pop_if_empty()
        .extend(["v1beta", "models", method.as_str()]);
    Ok(url)
}

/// Gemini answers a bad key with 400 and reason `API_KEY_INVALID`
fn invalid_key_as_auth(err: ProviderError) -> ProviderError {
    match err {
        ProviderError::Status {
            provider,
            status: 400,
            body,
        } if body.contains("API_KEY_INVALID") => ProviderError::Auth {
            provider,
            status: 400,
            body,
        },
        other => other,
    }
}

// The response format is:
// {
//   "candidates": [
//     { "content": { "parts": [ { "text": "Response text here" } ] } }
//   ]
// }
fn extract_text(response_body: &Value) -> Result<String, ProviderError> {
    let parts = response_body["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| ProviderError::Malformed {
            provider: NAME,
            detail: "missing candidates[0].content.parts".to_string(),
        })?;

    let texts: Vec<&str> = parts.iter().filter_map(|part| part["text"].as_str()).collect();
    if texts.is_empty() {
        return Err(ProviderError::Malformed {
            provider: NAME,
            detail: "no text in candidates[0].content.parts".to_string(),
        });
    }
    Ok(texts.concat())
}
