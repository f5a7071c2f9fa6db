//! ToolRegistry - the fixed set of tools a session can dispatch to

use tracing::{debug, info, warn};

use crate::llm::{ToolCall, ToolDefinition};

use super::builtin::{CreateFileTool, EditFileTool, GhTool, ListFilesTool, ReadFileTool};
use super::{Tool, ToolContext, ToolError, ToolResult};

/// Ordered set of tools with unique names
///
/// Built once at startup. Lookup is a linear scan; the list is small.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create registry with the standard tools
    pub fn standard() -> Self {
        let tools: Vec<Box<dyn Tool>> = vec![
            Box::new(ReadFileTool),
            Box::new(ListFilesTool),
            Box::new(EditFileTool),
            Box::new(CreateFileTool),
            Box::new(GhTool::new()),
        ];
        Self { tools }
    }

    /// Add a tool; names must be unique
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<(), ToolError> {
        debug!(name = tool.name(), "ToolRegistry::register: called");
        if self.find(tool.name()).is_some() {
            return Err(ToolError::DuplicateTool {
                name: tool.name().to_string(),
            });
        }
        self.tools.push(tool);
        Ok(())
    }

    /// All tools in registration order
    pub fn list(&self) -> &[Box<dyn Tool>] {
        &self.tools
    }

    /// Find a tool by name
    pub fn find(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    /// Get tool definitions for LLM, in registration order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition::new(t.name(), t.description(), t.input_schema()))
            .collect()
    }

    /// Execute a tool call
    ///
    /// Never fails: unknown tools and executor errors become failing results.
    pub async fn execute(&self, tool_call: &ToolCall, ctx: &ToolContext) -> ToolResult {
        debug!(id = %tool_call.id, name = %tool_call.name, "ToolRegistry::execute: called");
        let Some(tool) = self.find(&tool_call.name) else {
            warn!(name = %tool_call.name, "ToolRegistry::execute: unknown tool");
            return ToolResult::error(
                ToolError::UnknownTool {
                    name: tool_call.name.clone(),
                }
                .to_string(),
            );
        };

        match tool.execute(tool_call.input.clone(), ctx).await {
            Ok(content) => {
                info!(name = %tool_call.name, bytes = content.len(), "tool succeeded");
                ToolResult::success(content)
            }
            Err(e) => {
                info!(name = %tool_call.name, error = %e, "tool failed");
                ToolResult::error(format!("error: {}", e))
            }
        }
    }

    /// Execute multiple tool calls, one after another, in order
    pub async fn execute_all(&self, tool_calls: &[ToolCall], ctx: &ToolContext) -> Vec<(String, ToolResult)> {
        let mut results = Vec::with_capacity(tool_calls.len());

        for call in tool_calls {
            let result = self.execute(call, ctx).await;
            results.push((call.id.clone(), result));
        }

        results
    }

    /// Get tool names in registration order
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
