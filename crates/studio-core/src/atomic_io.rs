use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::time_utils::current_unix_timestamp_ms;

/// Writes text through a sibling temp file and a rename so readers never see a
/// half-written export.
pub fn write_text_atomic(path: &Path, content: &str) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("destination path cannot be empty");
    }
    if path.is_dir() {
        bail!("destination path '{}' is a directory", path.display());
    }

    let parent_dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent_dir)
        .with_context(|| format!("failed to create {}", parent_dir.display()))?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("catalog-export");
    let temp_path = parent_dir.join(format!(
        ".{file_name}.tmp-{}-{}",
        std::process::id(),
        current_unix_timestamp_ms()
    ));
    std::fs::write(&temp_path, content)
        .with_context(|| format!("failed to write temporary file {}", temp_path.display()))?;
    if let Err(error) = std::fs::rename(&temp_path, path) {
        discard_temp_file(&temp_path);
        return Err(error).with_context(|| {
            format!(
                "failed to move temporary file {} into place at {}",
                temp_path.display(),
                path.display()
            )
        });
    }
    Ok(())
}

// The caller reports the rename error; a failed cleanup only leaves a stray temp file.
fn discard_temp_file(temp_path: &Path) -> bool {
    match std::fs::remove_file(temp_path) {
        Ok(()) => true,
        Err(error) => {
            tracing::debug!(
                temp_path = %temp_path.display(),
                %error,
                "failed to remove temporary file after rename failure"
            );
            false
        }
    }
}
