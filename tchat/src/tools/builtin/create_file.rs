//! create_file tool - write a whole file, creating parent directories

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use super::ensure_parent_dir;
use crate::tools::{Tool, ToolContext, ToolError, parse_input};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateFileInput {
    path: String,
    content: String,
}

/// Create a file with the given content
///
/// An existing file at the same path is overwritten without warning.
pub struct CreateFileTool;

#[async_trait]
impl Tool for CreateFileTool {
    fn name(&self) -> &'static str {
        "create_file"
    }

    fn description(&self) -> &'static str {
        "Create a new file with the given content at the specified path. Creates parent directories if needed."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The path to the file to create"
                },
                "content": {
                    "type": "string",
                    "description": "The content to write to the file"
                }
            },
            "required": ["path", "content"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        let input: CreateFileInput = parse_input(input)?;
        debug!(path = %input.path, content_len = input.content.len(), "CreateFileTool::execute: called");
        if input.path.is_empty() {
            return Err(ToolError::InvalidArgument("path is required".to_string()));
        }

        let full_path = ctx.resolve(Path::new(&input.path));
        ensure_parent_dir(&full_path).await?;

        tokio::fs::write(&full_path, &input.content)
            .await
            .map_err(|e| ToolError::io("failed to create file", e))?;

        Ok(format!("Successfully created file {}", input.path))
    }
}
