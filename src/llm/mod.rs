pub mod queue;

use async_openai::{
    config::OpenAIConfig,
    types::{ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::LlmConfig;
use crate::error::FetchError;

pub use queue::LLMQueue;

/// A generative text model: one prompt in, free text out.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, FetchError>;
}

#[derive(Clone)]
pub struct LLMClient {
    client: Client<OpenAIConfig>,
    model: String,
    has_credential: bool,
}

impl LLMClient {
    pub fn new(api_key: Option<String>, base_url: Option<String>, model: String) -> Self {
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        let has_credential = api_key.is_some();

        let mut config = OpenAIConfig::new().with_api_key(api_key.unwrap_or_default());
        if let Some(url) = base_url {
            config = config.with_api_base(url);
        }
        let client = Client::with_config(config);
        Self { client, model, has_credential }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(config.api_key.clone(), config.base_url.clone(), config.model.clone())
    }
}

#[async_trait]
impl TextModel for LLMClient {
    async fn generate(&self, prompt: &str) -> Result<String, FetchError> {
        if !self.has_credential {
            return Err(FetchError::MissingCredential);
        }

        info!("🤖 [LLM] Sending request (model: {})...", self.model);

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()?,
            )])
            .build()?;

        let response = self.client.chat().create(request).await?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| FetchError::MalformedResponse("reply has no content".to_string()))?;

        info!("🤖 [LLM] Response received ({} chars).", text.len());
        debug!("🤖 [LLM] Raw reply: {}", text);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_credential_fails_without_network() {
        let client = LLMClient::new(None, Some("http://127.0.0.1:9".to_string()), "m".to_string());
        let result = client.generate("hello").await;
        assert!(matches!(result, Err(FetchError::MissingCredential)));
    }

    #[tokio::test]
    async fn test_blank_credential_counts_as_missing() {
        let client = LLMClient::new(Some("   ".to_string()), None, "m".to_string());
        assert!(matches!(client.generate("hello").await, Err(FetchError::MissingCredential)));
    }
}
