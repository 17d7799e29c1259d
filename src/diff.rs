//! # Diff Module
//!
//! This module renders the changes a dry run would make as unified diffs.
//! Diffs can be printed to stderr, appended to a file, or both.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use similar::TextDiff;

/// Lines of unchanged context around each hunk.
const CONTEXT_RADIUS: usize = 3;

/// Manages diff creation and rendering for dry runs.
///
/// This struct handles:
/// - Generating unified diffs between original and transformed content
/// - Displaying diffs to stderr with colorization
/// - Appending diffs to a file
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,

  /// File that diffs are appended to
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  /// Creates a new DiffManager.
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether any diff output was requested.
  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Truncates the diff file so a run starts with an empty one.
  pub fn init(&self) -> Result<()> {
    if let Some(ref diff_path) = self.save_diff_path {
      std::fs::write(diff_path, "").with_context(|| format!("Failed to create diff file: {}", diff_path.display()))?;
    }
    Ok(())
  }

  /// Renders the unified diff for one file.
  pub fn render(path: &Path, original: &str, new: &str) -> String {
    let display = path.to_string_lossy().replace('\\', "/");
    TextDiff::from_lines(original, new)
      .unified_diff()
      .context_radius(CONTEXT_RADIUS)
      .header(&format!("a/{display}"), &format!("b/{display}"))
      .to_string()
  }

  /// Displays and/or saves the diff between original and new content.
  ///
  /// Multiple diffs are appended to the same file, creating a single
  /// consolidated patch.
  ///
  /// # Parameters
  ///
  /// * `path` - Path of the file, as shown in the diff headers
  /// * `original` - Original file content
  /// * `new` - Content with the license inserted
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    let diff = Self::render(path, original, new);

    if self.show_diff {
      for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
          eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.bold()));
        } else if line.starts_with('+') {
          eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.green()));
        } else if line.starts_with('-') {
          eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.red()));
        } else if line.starts_with("@@") {
          eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.cyan()));
        } else {
          eprintln!("{}", line);
        }
      }
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      file
        .write_all(diff.as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_render_shows_replaced_marker() {
    let diff = DiffManager::render(
      Path::new("src/foo.h"),
      "// $COPYRIGHT$\n#pragma once\n",
      "// Copyright 2024 Acme Corp.\n#pragma once\n",
    );

    assert!(diff.contains("--- a/src/foo.h"));
    assert!(diff.contains("+++ b/src/foo.h"));
    assert!(diff.contains("-// $COPYRIGHT$"));
    assert!(diff.contains("+// Copyright 2024 Acme Corp."));
    assert!(diff.contains(" #pragma once"));
  }

  #[test]
  fn test_save_diff_appends() {
    let temp_dir = TempDir::new().unwrap();
    let diff_path = temp_dir.path().join("changes.diff");
    let manager = DiffManager::new(false, Some(diff_path.clone()));
    manager.init().unwrap();

    manager.display_diff(Path::new("a.h"), "x\n", "y\n").unwrap();
    manager.display_diff(Path::new("b.h"), "x\n", "z\n").unwrap();

    let saved = std::fs::read_to_string(&diff_path).unwrap();
    assert!(saved.contains("+++ b/a.h"));
    assert!(saved.contains("+++ b/b.h"));
  }

  #[test]
  fn test_is_enabled() {
    assert!(!DiffManager::new(false, None).is_enabled());
    assert!(DiffManager::new(true, None).is_enabled());
    assert!(DiffManager::new(false, Some(PathBuf::from("x.diff"))).is_enabled());
  }
}
