//! read_file tool - read a file's raw contents

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolError, parse_input};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReadFileInput {
    path: String,
}

/// Read the contents of a file
pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &'static str {
        "read_file"
    }

    fn description(&self) -> &'static str {
        "Read the contents of a given relative file path. Use this when you want to see what's inside a file. \
         Do not use this with directory names."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The relative path of a file in the working directory."
                }
            },
            "required": ["path"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        let input: ReadFileInput = parse_input(input)?;
        debug!(path = %input.path, "ReadFileTool::execute: called");
        if input.path.is_empty() {
            return Err(ToolError::InvalidArgument("path is required".to_string()));
        }

        let full_path = ctx.resolve(Path::new(&input.path));
        match tokio::fs::read(&full_path).await {
            Ok(bytes) => {
                debug!(len = bytes.len(), "ReadFileTool::execute: read file");
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ToolError::FileNotFound { path: input.path }),
            Err(e) => Err(ToolError::io(format!("failed to read {}", input.path), e)),
        }
    }
}
