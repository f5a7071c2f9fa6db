//! Tool error types

use thiserror::Error;

/// Errors that can occur during tool execution
///
/// Every variant is recoverable: the registry turns it into a failing
/// tool result that goes back to the model.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool {name:?} not found")]
    UnknownTool { name: String },

    #[error("tool {name:?} is already registered")]
    DuplicateTool { name: String },

    #[error("invalid input: {0}")]
    InvalidInput(#[from] serde_json::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("old_str not found in file")]
    PatternNotFound,

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run {program}: {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {code}: {output}")]
    CommandFailed { program: String, code: i32, output: String },
}

impl ToolError {
    /// Wrap an io::Error with a short description of what was being done
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ToolError::Io {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_message_contains_name() {
        let err = ToolError::UnknownTool {
            name: "frobnicate".to_string(),
        };
        assert_eq!(err.to_string(), "tool \"frobnicate\" not found");
    }

    #[test]
    fn test_command_failed_message_carries_output() {
        let err = ToolError::CommandFailed {
            program: "gh".to_string(),
            code: 1,
            output: "no git remotes found".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("gh exited with 1"));
        assert!(msg.contains("no git remotes found"));
    }

    #[test]
    fn test_io_message_has_context() {
        let err = ToolError::io(
            "failed to read a.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "failed to read a.txt: gone");
    }
}
