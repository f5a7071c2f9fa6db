//! LLM error types

use thiserror::Error;

/// Errors that can occur during LLM operations
///
/// None of these are recovered by the chat loop: a failed completion ends the session.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key not found. Set the {env} environment variable.")]
    MissingApiKey { env: String },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported LLM provider '{provider}'. Supported: anthropic")]
    UnsupportedProvider { provider: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_names_variable() {
        let err = LlmError::MissingApiKey {
            env: "ANTHROPIC_API_KEY".to_string(),
        };
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_api_error_carries_status_and_body() {
        let err = LlmError::ApiError {
            status: 529,
            message: "Overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "API error 529: Overloaded");
    }

    #[test]
    fn test_unsupported_provider_names_provider() {
        let err = LlmError::UnsupportedProvider {
            provider: "openai".to_string(),
        };
        assert!(err.to_string().contains("'openai'"));
    }
}
