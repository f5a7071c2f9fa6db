//! list_files tool - recursive listing as a JSON array

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::tools::{Tool, ToolContext, ToolError, parse_input};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ListFilesInput {
    #[serde(default)]
    path: Option<String>,
}

/// List files and directories below a path, recursively
///
/// Output is a JSON array of paths relative to the queried directory, in
/// walk order. Directories carry a trailing `/`. The root itself is omitted.
pub struct ListFilesTool;

#[async_trait]
impl Tool for ListFilesTool {
    fn name(&self) -> &'static str {
        "list_files"
    }

    fn description(&self) -> &'static str {
        "List files and directories at a given path. If no path is provided, lists files in the current directory."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Optional relative path to list files from. Defaults to current directory if not provided."
                }
            },
            "additionalProperties": false
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        let input: ListFilesInput = parse_input(input)?;
        let path = input.path.as_deref().filter(|p| !p.is_empty()).unwrap_or(".");
        debug!(%path, "ListFilesTool::execute: called");

        let root = ctx.resolve(Path::new(path));
        tokio::fs::metadata(&root)
            .await
            .map_err(|e| ToolError::io(format!("failed to list {}", path), e))?;

        let mut files = Vec::new();
        for entry in WalkDir::new(&root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| ToolError::io(format!("failed to list {}", path), e.into()))?;
            let rel = entry.path().strip_prefix(&root).unwrap_or(entry.path());
            let rel = rel.to_string_lossy();

            if entry.file_type().is_dir() {
                files.push(format!("{}/", rel));
            } else {
                files.push(rel.into_owned());
            }
        }

        debug!(count = files.len(), "ListFilesTool::execute: entries collected");
        Ok(Value::from(files).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    async fn list(ctx: &ToolContext, input: Value) -> Vec<String> {
        let out = ListFilesTool.execute(input, ctx).await.unwrap();
        serde_json::from_str(&out).unwrap()
    }

    #[tokio::test]
    async fn test_list_files_recursive() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("file1.txt"), "").unwrap();
        fs::create_dir(temp.path().join("subdir")).unwrap();
        fs::write(temp.path().join("subdir").join("nested.txt"), "").unwrap();

        let ctx = ToolContext::new(temp.path().to_path_buf());
        let entries = list(&ctx, serde_json::json!({})).await;

        assert_eq!(entries, vec!["file1.txt", "subdir/", "subdir/nested.txt"]);
    }

    #[tokio::test]
    async fn test_list_files_with_path_is_relative_to_it() {
        let temp = tempdir().unwrap();
        let subdir = temp.path().join("subdir");
        fs::create_dir_all(subdir.join("deeper")).unwrap();
        fs::write(subdir.join("nested.txt"), "").unwrap();

        let ctx = ToolContext::new(temp.path().to_path_buf());
        let entries = list(&ctx, serde_json::json!({"path": "subdir"})).await;

        assert_eq!(entries, vec!["deeper/", "nested.txt"]);
    }

    #[tokio::test]
    async fn test_list_files_empty_path_means_workdir() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("only.txt"), "").unwrap();

        let ctx = ToolContext::new(temp.path().to_path_buf());
        let entries = list(&ctx, serde_json::json!({"path": ""})).await;

        assert_eq!(entries, vec!["only.txt"]);
    }

    #[tokio::test]
    async fn test_list_files_empty_directory() {
        let temp = tempdir().unwrap();
        let ctx = ToolContext::new(temp.path().to_path_buf());

        let out = ListFilesTool.execute(serde_json::json!({}), &ctx).await.unwrap();
        assert_eq!(out, "[]");
    }

    #[tokio::test]
    async fn test_list_files_not_found() {
        let temp = tempdir().unwrap();
        let ctx = ToolContext::new(temp.path().to_path_buf());

        let err = ListFilesTool
            .execute(serde_json::json!({"path": "nonexistent"}), &ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::Io { .. }));
    }
}
