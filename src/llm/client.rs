// file: src/llm/client.rs
// description: Groq chat-completions client for prompt completion
// reference: https://console.groq.com/docs/api-reference#chat

use crate::config::LlmConfig;
use crate::error::{AgentError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const SERVICE: &str = "language model";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::network(SERVICE, e))?;

        Ok(Self { client, config })
    }

    /// Send a single-message conversation to the chat-completions endpoint
    /// and return the first choice's content. One attempt, no retries.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        debug!(
            "Requesting completion from {} for {} chars",
            self.config.endpoint,
            prompt.len()
        );

        let api_key = self.config.api_key.clone().unwrap_or_default();

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::network(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(AgentError::Authentication {
                    service: SERVICE.to_string(),
                    status: status.as_u16(),
                });
            }

            return Err(AgentError::Api {
                service: SERVICE.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AgentError::malformed(SERVICE, e))?;

        first_choice(chat_response)
    }
}

fn first_choice(response: ChatResponse) -> Result<String> {
    match response.choices.into_iter().next() {
        Some(choice) => {
            debug!(
                "Received completion of {} chars",
                choice.message.content.len()
            );
            Ok(choice.message.content)
        }
        None => Err(AgentError::EmptyCompletion),
    }
}
