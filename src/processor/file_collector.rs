//! # File Collector Module
//!
//! This module walks a directory tree and collects the files whose base name
//! matches the resolved [`PatternSet`].
//!
//! Version-control metadata directories are never entered. Directories that
//! cannot be listed are skipped as if they were empty. Symbolic links are not
//! followed, so the walk cannot loop.

use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::patterns::PatternSet;

/// Version-control metadata directories that are always excluded.
pub const VCS_DIRS: [&str; 2] = [".svn", "CVS"];

/// File collector for directory traversal.
///
/// The `FileCollector` handles:
/// - Recursive traversal starting at a root directory
/// - Excluding directories by name at any depth
/// - Selecting regular files by base-name pattern
/// - Producing paths relative to the root
pub struct FileCollector {
  /// Directory the walk starts from
  root: PathBuf,
  /// Directory names that are never entered
  excluded_dirs: Vec<String>,
}

impl FileCollector {
  /// Creates a new FileCollector rooted at `root` that excludes [`VCS_DIRS`].
  ///
  /// # Parameters
  ///
  /// * `root` - The directory the walk starts from
  pub fn new(root: PathBuf) -> Self {
    Self {
      root,
      excluded_dirs: VCS_DIRS.iter().map(|name| name.to_string()).collect(),
    }
  }

  /// Adds directory names to exclude on top of [`VCS_DIRS`].
  pub fn with_excluded_dirs(mut self, names: impl IntoIterator<Item = String>) -> Self {
    for name in names {
      if !self.excluded_dirs.contains(&name) {
        self.excluded_dirs.push(name);
      }
    }
    self
  }

  /// The root directory of the walk.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// The excluded directory names.
  pub fn excluded_dirs(&self) -> &[String] {
    &self.excluded_dirs
  }

  /// Checks whether a directory with this name is skipped.
  pub fn is_excluded_dir(&self, name: &str) -> bool {
    self.excluded_dirs.iter().any(|excluded| excluded == name)
  }

  /// Walks the tree and returns matching files relative to the root.
  ///
  /// Entries are visited in file-name order, so the result is deterministic.
  /// The root itself is never excluded, even if its name is in the
  /// exclusion list.
  ///
  /// # Parameters
  ///
  /// * `patterns` - The resolved file-name patterns
  ///
  /// # Returns
  ///
  /// The selected files, relative to the root.
  pub fn walk(&self, patterns: &PatternSet) -> Vec<PathBuf> {
    debug!("Scanning directory: {}", self.root.display());
    let start_time = std::time::Instant::now();

    let mut files = Vec::new();
    let walker = WalkDir::new(&self.root)
      .follow_links(false)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|entry| {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
          return true;
        }
        let excluded = self.is_excluded_dir(&entry.file_name().to_string_lossy());
        if excluded {
          trace!("Skipping directory: {} (excluded)", entry.path().display());
        }
        !excluded
      });

    for entry in walker {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          let location = e.path().unwrap_or(&self.root).display().to_string();
          warn!("Skipping unreadable directory {}: {}", location, e);
          continue;
        }
      };

      // Symlinks report their own file type here, so they are never regular
      // files and symlinked directories are never descended into.
      if entry.depth() == 0 || !entry.file_type().is_file() {
        continue;
      }

      let file_name = entry.file_name().to_string_lossy();
      if !patterns.is_match(&file_name) {
        trace!("Skipping: {} (no pattern matches)", entry.path().display());
        continue;
      }

      let relative = entry
        .path()
        .strip_prefix(&self.root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| entry.path().to_path_buf());
      files.push(relative);
    }

    debug!(
      "Found {} files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );

    files
  }
}
