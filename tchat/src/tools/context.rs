//! ToolContext - execution context for tools

use std::path::{Path, PathBuf};
use tracing::debug;

/// Execution context shared by every tool call in a session
///
/// Relative paths from the model resolve against `workdir`, which is the
/// process working directory for the real binary and a temp dir in tests.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Directory relative paths resolve against
    pub workdir: PathBuf,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(workdir: PathBuf) -> Self {
        debug!(?workdir, "ToolContext::new: called");
        Self { workdir }
    }

    /// Create a context rooted at the current working directory
    pub fn current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// Resolve a path from tool input against the workdir
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workdir.join(path)
        }
    }
}
