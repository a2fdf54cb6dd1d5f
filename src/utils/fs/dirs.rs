//! Directory creation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Ensures a directory exists, creating it and all parent directories if necessary.
///
/// Fails if `path` exists but is not a directory.
///
/// # Examples
///
/// ```rust
/// use rulegen::utils::fs::ensure_dir;
///
/// # fn example() -> anyhow::Result<()> {
/// let temp = std::env::temp_dir().join("rulegen_doc_ensure_dir");
/// ensure_dir(&temp.join("app/src"))?;
/// assert!(temp.join("app/src").is_dir());
/// # std::fs::remove_dir_all(&temp)?;
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).with_context(|| {
            format!(
                "Failed to create directory: {}\n\nCheck directory permissions and path validity",
                path.display()
            )
        })?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}
