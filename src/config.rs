// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{AgentError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub search_depth: String,
    pub include_answer: bool,
    pub timeout_secs: u64,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("QUERY_ROUTER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| AgentError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| AgentError::Config(e.to_string()))?;

        config.apply_env_fallbacks();
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        let mut config = Self {
            llm: LlmConfig {
                api_key: None,
                model: "llama-3.1-8b-instant".to_string(),
                endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
                timeout_secs: 30,
            },
            search: SearchConfig {
                api_key: None,
                endpoint: "https://api.tavily.com/search".to_string(),
                search_depth: "basic".to_string(),
                include_answer: true,
                timeout_secs: 30,
            },
        };
        config.apply_env_fallbacks();
        config
    }

    // Key names used by the original deployment; missing keys are not an
    // error here, they surface as authentication failures at call time.
    fn apply_env_fallbacks(&mut self) {
        if self.llm.api_key.is_none() {
            self.llm.api_key = std::env::var("GROQ_API_KEY").ok();
        }
        if self.search.api_key.is_none() {
            self.search.api_key = std::env::var("TAVILY_API_KEY").ok();
        }
    }

    fn validate(&self) -> Result<()> {
        if self.llm.timeout_secs == 0 || self.search.timeout_secs == 0 {
            return Err(AgentError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.model.trim().is_empty() {
            return Err(AgentError::Config("llm.model must not be empty".to_string()));
        }

        match self.search.search_depth.as_str() {
            "basic" | "advanced" => {}
            other => {
                return Err(AgentError::Config(format!(
                    "search_depth must be 'basic' or 'advanced', got '{}'",
                    other
                )));
            }
        }

        let endpoints = [
            ("llm.endpoint", &self.llm.endpoint),
            ("search.endpoint", &self.search.endpoint),
        ];
        for (name, url) in endpoints {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AgentError::Config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        Ok(())
    }
}
