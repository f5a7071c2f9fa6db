//! edit_file tool - replace text in a file, or create it

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use super::ensure_parent_dir;
use crate::tools::{Tool, ToolContext, ToolError, parse_input};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EditFileInput {
    path: String,
    old_str: String,
    new_str: String,
}

/// Replace every occurrence of a string in a file
///
/// A missing file with an empty `old_str` is created with `new_str` as its
/// full content.
pub struct EditFileTool;

#[async_trait]
impl Tool for EditFileTool {
    fn name(&self) -> &'static str {
        "edit_file"
    }

    fn description(&self) -> &'static str {
        "Edit a file by replacing old_str with new_str. If the file doesn't exist and old_str is empty, \
         creates a new file with new_str as content."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The relative path of the file to edit."
                },
                "old_str": {
                    "type": "string",
                    "description": "The text to replace. If empty and file doesn't exist, creates a new file."
                },
                "new_str": {
                    "type": "string",
                    "description": "The replacement text."
                }
            },
            "required": ["path", "old_str", "new_str"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        let input: EditFileInput = parse_input(input)?;
        debug!(path = %input.path, "EditFileTool::execute: called");

        if input.path.is_empty() || input.old_str == input.new_str {
            debug!("EditFileTool::execute: rejecting empty path or no-op edit");
            return Err(ToolError::InvalidArgument(
                "path must be set and old_str must differ from new_str".to_string(),
            ));
        }

        let full_path = ctx.resolve(Path::new(&input.path));

        let content = match tokio::fs::read_to_string(&full_path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound && input.old_str.is_empty() => {
                debug!("EditFileTool::execute: file absent, creating");
                ensure_parent_dir(&full_path).await?;
                tokio::fs::write(&full_path, &input.new_str)
                    .await
                    .map_err(|e| ToolError::io("failed to create file", e))?;
                return Ok("OK".to_string());
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("EditFileTool::execute: file absent and old_str set");
                return Err(ToolError::FileNotFound { path: input.path });
            }
            Err(e) => return Err(ToolError::io(format!("failed to read {}", input.path), e)),
        };

        let new_content = content.replace(&input.old_str, &input.new_str);

        if new_content == content && !input.old_str.is_empty() {
            debug!("EditFileTool::execute: old_str not found in file");
            return Err(ToolError::PatternNotFound);
        }

        tokio::fs::write(&full_path, &new_content)
            .await
            .map_err(|e| ToolError::io(format!("failed to write {}", input.path), e))?;

        debug!("EditFileTool::execute: file written");
        Ok("OK".to_string())
    }
}
