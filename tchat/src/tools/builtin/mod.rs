//! Built-in tools

mod create_file;
mod edit_file;
mod gh;
mod list_files;
mod read_file;

pub use create_file::CreateFileTool;
pub use edit_file::EditFileTool;
pub use gh::GhTool;
pub use list_files::ListFilesTool;
pub use read_file::ReadFileTool;

use std::path::Path;

use super::ToolError;

/// Create the parent directories of `path`, if it has any
pub(crate) async fn ensure_parent_dir(path: &Path) -> Result<(), ToolError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ToolError::io("failed to create directory", e))?;
    }
    Ok(())
}
