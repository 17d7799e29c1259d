//! # Report Module
//!
//! This module provides functionality for generating reports of a run in
//! JSON or CSV format.
//!
//! It captures the outcome for each selected file (license inserted, no
//! marker found, skipped, or failed) so a run that stops part-way still
//! tells the user which files were already rewritten.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Information about a processed file for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
  /// Path to the file, relative to the walk root
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// What happened to the file
  pub action: FileAction,
  /// Detail for skipped or failed files
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reason: Option<String>,
}

impl FileReport {
  /// Creates a report without a reason.
  pub fn new(path: impl Into<PathBuf>, action: FileAction) -> Self {
    Self {
      path: path.into(),
      action,
      reason: None,
    }
  }

  /// Creates a report with a reason.
  pub fn with_reason(path: impl Into<PathBuf>, action: FileAction, reason: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      action,
      reason: Some(reason.into()),
    }
  }
}

/// Possible outcomes for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileAction {
  /// The marker was replaced with the license (or would be, in a dry run)
  Inserted,
  /// The file has no marker and was left untouched
  NoMarker,
  /// The file was not processed (e.g. not valid UTF-8)
  Skipped,
  /// Reading or committing the file failed
  Failed,
}

impl FileAction {
  /// Label used in CSV output.
  pub const fn label(self) -> &'static str {
    match self {
      FileAction::Inserted => "inserted",
      FileAction::NoMarker => "no-marker",
      FileAction::Skipped => "skipped",
      FileAction::Failed => "failed",
    }
  }
}

/// Helper module for serializing/deserializing PathBuf
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy().replace('\\', "/"))
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
  /// JSON format for machine readability
  Json,
  /// CSV format for spreadsheet compatibility
  Csv,
}

impl std::fmt::Display for ReportFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ReportFormat::Json => write!(f, "JSON"),
      ReportFormat::Csv => write!(f, "CSV"),
    }
  }
}

/// Summary of the processing results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingSummary {
  /// Total number of selected files
  pub total_files: usize,
  /// Number of files that received the license
  pub inserted: usize,
  /// Number of files without a marker
  pub no_marker: usize,
  /// Number of skipped files
  pub skipped: usize,
  /// Number of files that failed
  pub failed: usize,
  /// Whether this was a dry run
  pub dry_run: bool,
  /// Total processing time
  #[serde(skip_serializing)]
  pub processing_time: Duration,
  /// Processing time in seconds for serialization
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
  /// Timestamp when the summary was created
  pub timestamp: i64,
}

impl ProcessingSummary {
  /// Create a ProcessingSummary from a collection of FileReports
  pub fn from_reports(files: &[FileReport], processing_time: Duration, dry_run: bool) -> Self {
    let count = |action: FileAction| files.iter().filter(|file| file.action == action).count();

    Self {
      total_files: files.len(),
      inserted: count(FileAction::Inserted),
      no_marker: count(FileAction::NoMarker),
      skipped: count(FileAction::Skipped),
      failed: count(FileAction::Failed),
      dry_run,
      processing_time,
      processing_time_secs: processing_time.as_secs_f64(),
      timestamp: Local::now().timestamp(),
    }
  }
}

/// Report Generator for writing run reports
pub struct ReportGenerator<'a> {
  /// Format of the report to generate
  format: ReportFormat,
  /// Path where the report will be saved
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  /// Create a new report generator
  ///
  /// # Parameters
  ///
  /// * `format` - The format to use for the report
  /// * `output_path` - The path where the report will be saved
  pub const fn new(format: ReportFormat, output_path: &'a Path) -> Self {
    Self { format, output_path }
  }

  /// Generate a report from a collection of file reports
  ///
  /// # Returns
  ///
  /// `Ok(())` if the report was generated successfully, or an error if the
  /// report couldn't be rendered or written to disk.
  pub fn generate(&self, files: &[FileReport], summary: &ProcessingSummary) -> Result<()> {
    let content = self.render(files, summary)?;

    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write {} report to {}", self.format, self.output_path.display()))
  }

  /// Render the report content without writing it.
  pub fn render(&self, files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
    match self.format {
      ReportFormat::Json => generate_json(files, summary),
      ReportFormat::Csv => Ok(generate_csv(files, summary)),
    }
  }
}

/// Generate JSON report content
fn generate_json(files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
  let report = serde_json::json!({
    "summary": summary,
    "files": files,
  });

  Ok(serde_json::to_string_pretty(&report)?)
}

/// Generate CSV report content
fn generate_csv(files: &[FileReport], summary: &ProcessingSummary) -> String {
  let mut csv = String::new();

  csv.push_str("file_path,action,reason\n");

  for file in files {
    let path = file.path.to_string_lossy().replace(',', "%2C");
    let reason = file.reason.as_deref().unwrap_or_default().replace(',', "%2C");
    csv.push_str(&format!("{},{},{}\n", path, file.action.label(), reason));
  }

  csv.push_str("\n# Summary\n");
  csv.push_str(&format!("Total files,{}\n", summary.total_files));
  csv.push_str(&format!("License inserted,{}\n", summary.inserted));
  csv.push_str(&format!("No marker,{}\n", summary.no_marker));
  csv.push_str(&format!("Skipped,{}\n", summary.skipped));
  csv.push_str(&format!("Failed,{}\n", summary.failed));
  csv.push_str(&format!("Dry run,{}\n", summary.dry_run));
  csv.push_str(&format!(
    "Processing time (seconds),{:.2}\n",
    summary.processing_time.as_secs_f64()
  ));
  csv.push_str(&format!("Generated on,{}\n", Local::now().format("%Y-%m-%d %H:%M:%S")));

  csv
}
