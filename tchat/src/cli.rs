//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// tchat - terminal chat agent
#[derive(Parser)]
#[command(
    name = "tchat",
    about = "Chat with Claude from the terminal, with local file and GitHub CLI tools",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Override the configured model
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Override the per-call output token limit
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    /// Subcommand to execute (defaults to chat)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start an interactive chat (default)
    Chat,

    /// List the tools available to the model
    Tools,
}

/// Result of checking an external tool
pub struct ToolCheck {
    pub name: &'static str,
    pub available: bool,
    pub version: Option<String>,
}

impl ToolCheck {
    /// Check if a tool is available and get its version
    pub fn check(name: &'static str, version_args: &[&str]) -> Self {
        debug!(name, ?version_args, "ToolCheck::check: called");
        let result = std::process::Command::new(name).args(version_args).output();

        match result {
            Ok(output) if output.status.success() => {
                debug!(name, "ToolCheck::check: tool available");
                let version_str = String::from_utf8_lossy(&output.stdout);
                Self {
                    name,
                    available: true,
                    version: Some(parse_version(&version_str)),
                }
            }
            _ => {
                debug!(name, "ToolCheck::check: tool not available");
                Self {
                    name,
                    available: false,
                    version: None,
                }
            }
        }
    }
}

/// Parse version from command output (first word starting with a digit)
fn parse_version(output: &str) -> String {
    for word in output.split_whitespace() {
        let word = word.trim_start_matches('v');
        if word.starts_with(|c: char| c.is_ascii_digit()) {
            let version: String = word.chars().take_while(|c| c.is_ascii_digit() || *c == '.').collect();
            if !version.is_empty() {
                return version;
            }
        }
    }
    "unknown".to_string()
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tchat")
        .join("logs")
        .join("tchat.log")
}

/// Generate the after_help text with the gh check and log location
pub fn generate_after_help() -> String {
    debug!("generate_after_help: called");
    let gh = ToolCheck::check("gh", &["--version"]);

    let mut help = String::new();
    help.push_str("External Tools:\n");
    let icon = if gh.available { "\u{2705}" } else { "\u{274C}" };
    let version = gh.version.as_deref().unwrap_or("not found (run_gh will fail)");
    help.push_str(&format!("  {} {:<10} {}\n", icon, gh.name, version));

    help.push('\n');
    help.push_str(&format!("Logs are written to: {}\n", get_log_path().display()));
    help
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults_to_no_command() {
        let cli = Cli::try_parse_from(["tchat"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.model.is_none());
    }

    #[test]
    fn test_parse_global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from(["tchat", "chat", "--model", "claude-x", "--max-tokens", "64", "-l", "debug"])
            .unwrap();
        assert!(matches!(cli.command, Some(Command::Chat)));
        assert_eq!(cli.model.as_deref(), Some("claude-x"));
        assert_eq!(cli.max_tokens, Some(64));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("gh version 2.45.0 (2024-03-04)"), "2.45.0");
        assert_eq!(parse_version("tool v1.2.3"), "1.2.3");
        assert_eq!(parse_version("no digits here"), "unknown");
    }

    #[test]
    fn test_log_path_ends_with_tchat_log() {
        assert!(get_log_path().ends_with("tchat/logs/tchat.log"));
    }
}
