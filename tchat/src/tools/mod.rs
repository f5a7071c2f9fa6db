//! Tool system
//!
//! Tools give the model file system access and a GitHub CLI passthrough.
//! Each tool decodes a typed input record, performs one side effect, and
//! returns text or a `ToolError`; the `ToolRegistry` turns either outcome
//! into a tool result for the conversation.

mod context;
mod error;
mod registry;
mod traits;

pub mod builtin;

pub use context::ToolContext;
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use traits::{Tool, ToolResult, parse_input};
