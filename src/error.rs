// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AgentError>;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error calling {service}: {message}")]
    Network { service: String, message: String },

    #[error("Authentication failed for {service} (status {status}): check the API key")]
    Authentication { service: String, status: u16 },

    #[error("{service} request failed with status {status}: {body}")]
    Api {
        service: String,
        status: u16,
        body: String,
    },

    #[error("Malformed response from {service}: {message}")]
    MalformedResponse { service: String, message: String },

    #[error("Completion response contained no choices")]
    EmptyCompletion,
}

impl AgentError {
    pub fn network(service: &str, err: reqwest::Error) -> Self {
        AgentError::Network {
            service: service.to_string(),
            message: err.to_string(),
        }
    }

    pub fn malformed(service: &str, err: impl std::fmt::Display) -> Self {
        AgentError::MalformedResponse {
            service: service.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_service() {
        let err = AgentError::Authentication {
            service: "groq".to_string(),
            status: 401,
        };
        let msg = err.to_string();
        assert!(msg.contains("groq"));
        assert!(msg.contains("401"));
    }

    #[test]
    fn test_api_error_display() {
        let err = AgentError::Api {
            service: "tavily".to_string(),
            status: 500,
            body: "internal error".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("internal error"));
    }
}
