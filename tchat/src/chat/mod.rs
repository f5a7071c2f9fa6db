//! Interactive chat for tchat
//!
//! Reads user lines, sends the conversation to the model, and runs the tools
//! it asks for until it answers in plain text.

mod input;
mod session;

pub use input::{EditorInput, InputSource, LineInput};
pub use session::ChatSession;

use std::io::IsTerminal;

use eyre::{Context, Result};
use tracing::debug;

use crate::config::Config;
use crate::llm::create_client;
use crate::tools::{ToolContext, ToolRegistry};

/// Run the interactive chat
///
/// This is the main entry point for `tchat chat`.
pub async fn run_interactive(config: &Config) -> Result<()> {
    config.validate()?;

    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    let ctx = ToolContext::current_dir().context("Failed to resolve working directory")?;

    let mut session = ChatSession::new(llm, ToolRegistry::standard(), ctx, std::io::stdout())
        .with_config(config.chat.clone())
        .with_max_tokens(config.llm.max_tokens);

    if std::io::stdin().is_terminal() {
        debug!("run_interactive: stdin is a terminal, using line editor");
        let mut input = EditorInput::new()?;
        session.run(&mut input).await
    } else {
        debug!("run_interactive: stdin is not a terminal, reading lines");
        let stdin = std::io::stdin();
        let mut input = LineInput::new(stdin.lock(), std::io::stdout());
        session.run(&mut input).await
    }
}
