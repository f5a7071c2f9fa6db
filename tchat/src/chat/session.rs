//! Chat session - the conversation loop

use std::io::Write;
use std::sync::Arc;

use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use super::InputSource;
use crate::config::ChatConfig;
use crate::llm::{CompletionRequest, ContentBlock, LlmClient, Message, Role, ToolCall};
use crate::tools::{ToolContext, ToolRegistry};

/// Interactive chat session
///
/// Owns the conversation for the life of the process. Each user line starts
/// a turn; within a turn the model may call tools any number of times before
/// control returns to the user.
pub struct ChatSession<W: Write> {
    llm: Arc<dyn LlmClient>,
    registry: ToolRegistry,
    ctx: ToolContext,
    config: ChatConfig,
    max_tokens: u32,
    conversation: Vec<Message>,
    out: W,
}

/// What to do after a slash command
enum SlashResult {
    Continue,
    Quit,
    /// Not a local command; the line goes to the model as typed
    NotCommand,
}

impl<W: Write> ChatSession<W> {
    /// Create a new chat session writing to `out`
    pub fn new(llm: Arc<dyn LlmClient>, registry: ToolRegistry, ctx: ToolContext, out: W) -> Self {
        debug!(workdir = ?ctx.workdir, "ChatSession::new: called");
        Self {
            llm,
            registry,
            ctx,
            config: ChatConfig::default(),
            max_tokens: crate::config::LlmConfig::default().max_tokens,
            conversation: Vec::new(),
            out,
        }
    }

    /// Use the given chat settings
    pub fn with_config(mut self, config: ChatConfig) -> Self {
        self.config = config;
        self
    }

    /// Cap generated tokens per call
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Conversation so far, oldest first
    pub fn conversation(&self) -> &[Message] {
        &self.conversation
    }

    /// Where session output went
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Run until the input source is exhausted or the user quits
    ///
    /// Returns an error only when an inference call fails or output cannot
    /// be written; tool failures are handed back to the model.
    pub async fn run(&mut self, input: &mut dyn InputSource) -> Result<()> {
        info!(tools = ?self.registry.tool_names(), "chat session starting");
        writeln!(self.out, "Chat with {} (use 'ctrl-c' to quit)", self.config.assistant_label)?;

        let prompt = format!("{}: ", "You".bright_green());
        loop {
            let Some(line) = input.read_line(&prompt)? else {
                debug!("run: input exhausted");
                break;
            };

            let text = line.trim();
            if text.is_empty() {
                continue;
            }

            if text.starts_with('/') {
                match self.handle_slash_command(text)? {
                    SlashResult::Continue => continue,
                    SlashResult::Quit => break,
                    SlashResult::NotCommand => {}
                }
            }

            self.process_user_input(text).await?;
        }

        info!(messages = self.conversation.len(), "chat session ended");
        Ok(())
    }

    /// Run one turn: infer, dispatch tools, repeat until no tools are requested
    async fn process_user_input(&mut self, input: &str) -> Result<()> {
        self.conversation.push(Message::user(input));

        loop {
            let message = self.infer().await?;
            let tool_calls = self.print_response(&message)?;
            self.conversation.push(message);

            if tool_calls.is_empty() {
                debug!("process_user_input: no tool calls, turn complete");
                return Ok(());
            }

            let result_blocks = self.dispatch_tools(&tool_calls).await?;
            self.conversation.push(Message::user_blocks(result_blocks));
        }
    }

    /// Send the full conversation to the model
    async fn infer(&self) -> Result<Message> {
        let request = CompletionRequest {
            system_prompt: self.config.system_prompt.clone(),
            messages: self.conversation.clone(),
            tools: self.registry.definitions(),
            max_tokens: self.max_tokens,
        };

        debug!(messages = request.messages.len(), "infer: sending request");
        let response = self.llm.complete(request).await.context("Inference request failed")?;
        Ok(response.into_message())
    }

    /// Print text blocks in order and return the tool calls
    fn print_response(&mut self, message: &Message) -> Result<Vec<ToolCall>> {
        for block in &message.content {
            if let ContentBlock::Text { text } = block {
                writeln!(
                    self.out,
                    "{}: {}",
                    self.config.assistant_label.truecolor(255, 135, 0),
                    text
                )?;
            }
        }
        Ok(message.tool_calls())
    }

    /// Run each requested tool in order, producing one result block per call
    async fn dispatch_tools(&mut self, tool_calls: &[ToolCall]) -> Result<Vec<ContentBlock>> {
        if self.config.show_tool_calls {
            for call in tool_calls {
                writeln!(self.out, "{}", format!("tool: {}({})", call.name, call.input).dimmed())?;
            }
        }

        let results = self.registry.execute_all(tool_calls, &self.ctx).await;
        Ok(results
            .into_iter()
            .map(|(id, result)| ContentBlock::tool_result(id, result.content, result.is_error))
            .collect())
    }

    /// Handle slash commands
    ///
    /// Only a line that is exactly a known command word is handled locally.
    fn handle_slash_command(&mut self, input: &str) -> Result<SlashResult> {
        match input {
            "/help" | "/h" => {
                self.print_help()?;
                Ok(SlashResult::Continue)
            }
            "/tools" => {
                self.print_tools()?;
                Ok(SlashResult::Continue)
            }
            "/history" => {
                self.print_history()?;
                Ok(SlashResult::Continue)
            }
            "/quit" | "/q" | "/exit" => Ok(SlashResult::Quit),
            _ => {
                debug!("handle_slash_command: not a local command, sending to model");
                Ok(SlashResult::NotCommand)
            }
        }
    }

    fn print_help(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", "Available Commands:".bright_cyan())?;
        writeln!(self.out, "  {:14} Show this help", "/help".yellow())?;
        writeln!(self.out, "  {:14} List the tools the model can call", "/tools".yellow())?;
        writeln!(self.out, "  {:14} Show conversation history", "/history".yellow())?;
        writeln!(self.out, "  {:14} Exit", "/quit".yellow())?;
        writeln!(self.out)?;
        self.print_tools()
    }

    fn print_tools(&mut self) -> Result<()> {
        writeln!(self.out, "{}", "Available Tools:".bright_cyan())?;
        for tool in self.registry.list() {
            let summary = tool.description().split(". ").next().unwrap_or("");
            writeln!(self.out, "  {:14} {}", tool.name().yellow(), summary)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn print_history(&mut self) -> Result<()> {
        if self.conversation.is_empty() {
            writeln!(self.out, "{}", "No conversation history.".dimmed())?;
            return Ok(());
        }

        writeln!(self.out)?;
        writeln!(self.out, "{}", "Conversation History:".bright_cyan())?;
        for (i, msg) in self.conversation.iter().enumerate() {
            let role = match msg.role {
                Role::User => "User".bright_green(),
                Role::Assistant => "Assistant".bright_blue(),
            };
            let preview = match msg.content.as_slice() {
                [ContentBlock::Text { text }] => {
                    let preview: String = text.chars().take(50).collect();
                    if text.chars().count() > 50 { format!("{}...", preview) } else { preview }
                }
                blocks => format!("[{} blocks]", blocks.len()),
            };
            writeln!(self.out, "  {}. {}: {}", i + 1, role, preview)?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}
