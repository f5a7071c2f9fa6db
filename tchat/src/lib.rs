//! tchat - terminal chat agent
//!
//! A single-user conversational loop against the Anthropic Messages API.
//! The model can read, list, create and edit local files and run GitHub CLI
//! commands; each tool call runs in order and its result goes back to the
//! model before the user is prompted again.
//!
//! # Modules
//!
//! - [`llm`] - LLM client trait and Anthropic implementation
//! - [`tools`] - Tool trait, registry and the built-in tools
//! - [`chat`] - Conversation loop and input sources
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod chat;
pub mod cli;
pub mod config;
pub mod llm;
pub mod tools;

pub use chat::{ChatSession, InputSource, LineInput};
pub use config::{ChatConfig, Config, LlmConfig};
pub use llm::{LlmClient, LlmError};
pub use tools::{ToolContext, ToolRegistry};
