//! Tool trait definition

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::ToolError;
use super::context::ToolContext;

/// A tool that can be called by the LLM
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches LLM tool_use name)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool, returning text for the model or a typed failure
    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<String, ToolError>;
}

/// Decode a raw tool payload into its typed input record
pub fn parse_input<T: DeserializeOwned>(input: Value) -> Result<T, ToolError> {
    Ok(serde_json::from_value(input)?)
}

/// Result of a tool execution, as fed back to the model
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(content: impl Into<String>) -> Self {
        debug!("ToolResult::success: called");
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    /// Create an error result
    pub fn error(content: impl Into<String>) -> Self {
        debug!("ToolResult::error: called");
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct PathInput {
        path: String,
    }

    #[test]
    fn test_tool_result_success() {
        let result = ToolResult::success("File written successfully");
        assert!(!result.is_error);
        assert_eq!(result.content, "File written successfully");
    }

    #[test]
    fn test_tool_result_error() {
        let result = ToolResult::error("File not found");
        assert!(result.is_error);
        assert_eq!(result.content, "File not found");
    }

    #[test]
    fn test_parse_input_rejects_unknown_fields() {
        let err = parse_input::<PathInput>(serde_json::json!({"path": "a", "mode": "x"})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }

    #[test]
    fn test_parse_input_requires_fields() {
        assert!(parse_input::<PathInput>(serde_json::json!({})).is_err());
        assert_eq!(parse_input::<PathInput>(serde_json::json!({"path": "a"})).unwrap().path, "a");
    }
}
