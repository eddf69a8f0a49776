use reqwest::Client;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::models::*;

pub const NO_RESPONSE: &str = "No response from the model";
const UNKNOWN_API_ERROR: &str = "Unknown error occurred";

/// Sends extracted text to an OpenAI-style chat-completion endpoint.
pub struct ChatService {
    client: Client,
    config: ClientConfig,
}

impl ChatService {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_request(&self, text: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::user(format!(
                "{}{}",
                self.config.prompt_prefix, text
            ))],
            temperature: self.config.temperature,
        }
    }

    /// One POST, no retries. Returns the first choice's content verbatim.
    pub async fn query_model(&self, text: &str) -> Result<String> {
        let request = self.build_request(text);

        log::info!(
            "Sending {} characters to {} (model {})",
            text.len(),
            self.config.endpoint,
            self.config.model
        );

        let response = self
            .client
            .post(self.config.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(ClientError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::HttpStatus(status));
        }

        let body = response.bytes().await.map_err(ClientError::Network)?;
        let chat_response: ChatResponse =
            serde_json::from_slice(&body).map_err(ClientError::MalformedResponse)?;

        if let Some(message) = chat_response.error() {
            return Err(ClientError::Api(
                message.unwrap_or(UNKNOWN_API_ERROR).to_string(),
            ));
        }

        let answer = chat_response
            .first_content()
            .unwrap_or(NO_RESPONSE)
            .to_string();

        Ok(answer)
    }
}
