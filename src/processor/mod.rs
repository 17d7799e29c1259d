//! # Processor Module
//!
//! This module contains the core functionality for inserting license text
//! into the files of a source tree.
//!
//! The module is organized into several submodules:
//! - [`file_collector`] - Directory traversal and file-name matching
//! - [`content_transformer`] - Marker detection and license insertion
//! - [`file_io`] - File reading and atomic replacement
//!
//! The [`Processor`] struct is the main entry point, orchestrating the
//! submodules. The walk always completes before the first file is read, and
//! files are then processed one at a time in walk order.

mod content_transformer;
mod file_collector;
mod file_io;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
pub use content_transformer::{ContentTransformer, DEFAULT_MARKER, Transformed};
pub use file_collector::{FileCollector, VCS_DIRS};
pub use file_io::{FileIO, TEMP_SUFFIX};
use tracing::{debug, trace};

use crate::diff::DiffManager;
use crate::license::LicenseText;
use crate::patterns::PatternSet;
use crate::report::{FileAction, FileReport};
use crate::verbose_log;

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  /// Directory the walk starts from
  pub root: PathBuf,
  /// License text inserted at the marker
  pub license: LicenseText,
  /// Resolved file-name patterns
  pub patterns: PatternSet,
  /// Marker token
  pub marker: String,
  /// Directory names excluded on top of `.svn` and `CVS`
  pub excluded_dirs: Vec<String>,

  /// Dry run: compute everything, commit nothing
  pub dry_run: bool,
  /// Diff output for dry runs
  pub diff_manager: Option<DiffManager>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     dry_run: true,
  ///     ..ProcessorConfig::new(root, license, patterns)
  /// }
  /// ```
  pub fn new(root: PathBuf, license: LicenseText, patterns: PatternSet) -> Self {
    Self {
      root,
      license,
      patterns,
      marker: DEFAULT_MARKER.to_string(),
      excluded_dirs: Vec::new(),
      dry_run: false,
      diff_manager: None,
    }
  }
}

/// Result of processing a file set.
#[derive(Debug, Clone)]
pub struct RunOutcome {
  /// One report per processed file, in walk order
  pub reports: Vec<FileReport>,
  /// Wall time spent processing
  pub processing_time: Duration,
}

impl RunOutcome {
  /// Whether any file failed to process.
  pub fn has_failures(&self) -> bool {
    self.reports.iter().any(|report| report.action == FileAction::Failed)
  }

  /// Number of files that received (or would receive) the license.
  pub fn inserted_count(&self) -> usize {
    self
      .reports
      .iter()
      .filter(|report| report.action == FileAction::Inserted)
      .count()
  }
}

/// Processor for inserting license text into files.
///
/// The `Processor` handles:
/// - Collecting the file set from the walk root
/// - Reading each file and rejecting non-UTF-8 content
/// - Replacing the marker line with the license text
/// - Committing the result atomically, or rendering a diff in dry runs
pub struct Processor {
  /// Walks the tree
  collector: FileCollector,

  /// Resolved file-name patterns
  patterns: PatternSet,

  /// License text inserted at the marker
  license: LicenseText,

  /// Replaces marker lines
  transformer: ContentTransformer,

  /// Whether to skip committing
  dry_run: bool,

  /// Diff output for dry runs
  diff_manager: Option<DiffManager>,
}

impl Processor {
  /// Creates a new Processor from the given configuration.
  ///
  /// # Returns
  ///
  /// A new `Processor` instance, or an error if the diff file cannot be
  /// created.
  pub fn new(config: ProcessorConfig) -> Result<Self> {
    let collector = FileCollector::new(config.root).with_excluded_dirs(config.excluded_dirs);

    if let Some(ref diff_manager) = config.diff_manager
      && config.dry_run
    {
      diff_manager.init()?;
    }

    Ok(Self {
      collector,
      patterns: config.patterns,
      license: config.license,
      transformer: ContentTransformer::new(config.marker),
      dry_run: config.dry_run,
      diff_manager: config.diff_manager,
    })
  }

  /// The root directory of the walk.
  pub fn root(&self) -> &Path {
    self.collector.root()
  }

  /// The marker token this processor replaces.
  pub fn marker(&self) -> &str {
    self.transformer.marker()
  }

  /// Walks the tree and returns the file set, relative to the root.
  ///
  /// No file content is read.
  pub fn collect_files(&self) -> Vec<PathBuf> {
    let files = self.collector.walk(&self.patterns);
    verbose_log!("Selected {} files under {}", files.len(), self.root().display());
    files
  }

  /// Processes the given files, relative to the root, in order.
  ///
  /// Per-file failures are recorded as [`FileAction::Failed`] and do not stop
  /// the run.
  pub fn process(&self, files: &[PathBuf]) -> RunOutcome {
    let start_time = Instant::now();
    let mut reports = Vec::with_capacity(files.len());

    for file in files {
      let report = self.process_file(file).unwrap_or_else(|e| {
        debug!("Failed to process {}: {:#}", file.display(), e);
        FileReport::with_reason(file, FileAction::Failed, format!("{:#}", e))
      });
      reports.push(report);
    }

    RunOutcome {
      reports,
      processing_time: start_time.elapsed(),
    }
  }

  /// Processes a single file and reports what happened to it.
  fn process_file(&self, relative: &Path) -> Result<FileReport> {
    let path = self.collector.root().join(relative);
    trace!("Processing file: {}", path.display());

    let bytes = FileIO::read_bytes(&path)?;
    let Ok(source) = String::from_utf8(bytes) else {
      debug!("Skipping {}: {}", relative.display(), NOT_UTF8_REASON);
      return Ok(FileReport::with_reason(relative, FileAction::Skipped, NOT_UTF8_REASON));
    };

    let transformed = self.transformer.apply(&source, &self.license);
    if !transformed.matched {
      trace!("No marker in {}", relative.display());
      return Ok(FileReport::new(relative, FileAction::NoMarker));
    }

    debug!(
      "Marker at {}:{} with prefix {:?}",
      relative.display(),
      transformed.marker_line.unwrap_or_default(),
      transformed.comment_prefix.as_deref().unwrap_or_default()
    );

    if self.dry_run {
      if let Some(ref diff_manager) = self.diff_manager
        && diff_manager.is_enabled()
      {
        diff_manager.display_diff(relative, &source, &transformed.content)?;
      }
      verbose_log!("Would insert license into: {}", relative.display());
    } else {
      FileIO::commit(&path, &transformed.content)?;
      verbose_log!("Inserted license into: {}", relative.display());
    }

    Ok(FileReport::new(relative, FileAction::Inserted))
  }
}

/// Reason recorded for files whose content is not valid UTF-8.
pub const NOT_UTF8_REASON: &str = "not valid UTF-8";
