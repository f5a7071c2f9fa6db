//! run_gh tool - GitHub CLI passthrough

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;
use std::process::Stdio;
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolError, parse_input};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GhInput {
    args: String,
}

/// Run `gh` with whitespace-separated arguments
///
/// There is no quoting: a single argument containing spaces cannot be
/// expressed. stdout and stderr are captured interleaved, as written.
pub struct GhTool {
    program: String,
}

impl GhTool {
    pub fn new() -> Self {
        Self::with_program("gh")
    }

    /// Use a different executable (tests point this at coreutils)
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GhTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Split an argument string the way the tool does: on runs of whitespace
pub fn split_args(args: &str) -> Vec<&str> {
    args.split_whitespace().collect()
}

#[async_trait]
impl Tool for GhTool {
    fn name(&self) -> &'static str {
        "run_gh"
    }

    fn description(&self) -> &'static str {
        "Run GitHub CLI (gh) commands to interact with GitHub. Can list/create issues, view/create PRs, manage repos, \
         etc. The gh CLI must be authenticated. Examples: 'issue list', 'pr view 123', 'repo view owner/repo'."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "args": {
                    "type": "string",
                    "description": "The arguments to pass to the gh command (e.g., 'issue list', 'pr view 123', 'repo view')"
                }
            },
            "required": ["args"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        let input: GhInput = parse_input(input)?;
        let args = split_args(&input.args);
        debug!(program = %self.program, ?args, "GhTool::execute: called");

        // stdout and stderr share one pipe so the text keeps the order it was written in
        let (mut reader, writer) = std::io::pipe().map_err(|e| ToolError::io("failed to create pipe", e))?;
        let writer_err = writer
            .try_clone()
            .map_err(|e| ToolError::io("failed to create pipe", e))?;

        // The command owns the write ends; it must drop before reading to EOF
        let mut child = {
            let mut command = tokio::process::Command::new(&self.program);
            command
                .args(&args)
                .current_dir(&ctx.workdir)
                .stdin(Stdio::null())
                .stdout(writer)
                .stderr(writer_err);
            command.spawn().map_err(|e| ToolError::CommandSpawn {
                program: self.program.clone(),
                source: e,
            })?
        };

        let read = tokio::task::spawn_blocking(move || {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf).map(|_| buf)
        });

        let status = child
            .wait()
            .await
            .map_err(|e| ToolError::io(format!("failed to wait for {}", self.program), e))?;
        let bytes = read
            .await
            .map_err(|e| ToolError::io("output reader failed", std::io::Error::other(e)))?
            .map_err(|e| ToolError::io("failed to read command output", e))?;

        let combined = String::from_utf8_lossy(&bytes).into_owned();
        debug!(?status, output_len = combined.len(), "GhTool::execute: command completed");

        if status.success() {
            Ok(combined)
        } else {
            Err(ToolError::CommandFailed {
                program: self.program.clone(),
                code: status.code().unwrap_or(-1),
                output: combined,
            })
        }
    }
}
