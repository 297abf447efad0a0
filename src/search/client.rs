// file: src/search/client.rs
// description: Tavily search client returning synthesized answers
// reference: https://docs.tavily.com/docs/rest-api/api-reference

use crate::config::SearchConfig;
use crate::error::{AgentError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const SERVICE: &str = "search provider";

/// Returned when the provider responds but has no synthesized answer.
pub const NO_ANSWER: &str = "No answer found.";

/// Context placeholder the orchestrator substitutes when the search call
/// itself fails.
pub const SEARCH_FAILED: &str = "Failed to search";

#[derive(Debug, Serialize)]
struct SearchRequest {
    api_key: String,
    query: String,
    search_depth: String,
    include_answer: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    answer: Option<String>,
}

pub struct SearchClient {
    client: Client,
    config: SearchConfig,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::network(SERVICE, e))?;

        Ok(Self { client, config })
    }

    /// Run a shallow search and return the provider's synthesized answer,
    /// or [`NO_ANSWER`] when the provider found nothing to synthesize.
    pub async fn search(&self, query: &str) -> Result<String> {
        let request = SearchRequest {
            api_key: self.config.api_key.clone().unwrap_or_default(),
            query: query.to_string(),
            search_depth: self.config.search_depth.clone(),
            include_answer: self.config.include_answer,
        };

        debug!("Searching {} for: {}", self.config.endpoint, query);

        let response = self
            .client
            .post(&self.config.endpoint)
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

        let search_response: SearchResponse = response
            .json()
            .await
            .map_err(|e| AgentError::malformed(SERVICE, e))?;

        Ok(extract_answer(search_response))
    }
}

fn extract_answer(response: SearchResponse) -> String {
    match response.answer {
        Some(answer) => answer,
        None => NO_ANSWER.to_string(),
    }
}
