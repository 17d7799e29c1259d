//! # File I/O Module
//!
//! This module provides file reading and the atomic replacement used to
//! commit transformed content.
//!
//! New content is written to a temporary sibling of the target, flushed to
//! disk, and then renamed over the original in a single step, so the target
//! always holds either its old or its new content.

use std::fs;
use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::trace;

/// Suffix of the temporary sibling created while committing a file.
pub const TEMP_SUFFIX: &str = ".new";

/// File I/O operations for the processor.
///
/// This struct provides static methods for reading and committing files.
pub struct FileIO;

impl FileIO {
  /// Reads a file's raw bytes.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to read
  pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Atomically replaces the content of `path`.
  ///
  /// The temporary file is created in the same directory as `path` (so the
  /// final rename never crosses a filesystem), receives the original file's
  /// permissions, and is removed again if any step fails.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the existing file to replace
  /// * `content` - The new content
  pub fn commit(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };
    let file_name = path
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .unwrap_or_default();

    let permissions = fs::metadata(path)
      .with_context(|| format!("Failed to stat file: {}", path.display()))?
      .permissions();

    let prefix = format!(".{file_name}.");
    let mut temp = tempfile::Builder::new()
      .prefix(&prefix)
      .suffix(TEMP_SUFFIX)
      .tempfile_in(dir)
      .with_context(|| format!("Failed to create temporary file in: {}", dir.display()))?;
    trace!("Writing {} via {}", path.display(), temp.path().display());

    temp
      .write_all(content.as_bytes())
      .with_context(|| format!("Failed to write temporary file: {}", temp.path().display()))?;
    temp
      .as_file()
      .sync_all()
      .with_context(|| format!("Failed to flush temporary file: {}", temp.path().display()))?;
    temp
      .as_file()
      .set_permissions(permissions)
      .with_context(|| format!("Failed to copy permissions to: {}", temp.path().display()))?;

    temp
      .persist(path)
      .with_context(|| format!("Failed to replace file: {}", path.display()))?;

    Ok(())
  }
}
