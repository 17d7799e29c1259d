//! # Output Module
//!
//! This module centralizes all user-facing output for the license-insert
//! tool. It provides consistent formatting, colors, and symbols for terminal
//! output.
//!
//! Normal output is a start line, the list of rewritten files, any failures
//! and a one-line summary. `-v` lifts the list truncation and adds timing;
//! `-q` prints nothing except failed paths.

use std::path::PathBuf;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileAction, FileReport, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// License inserted
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Skipped
  pub const SKIPPED: &str = "-";
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Print the initial "Processing N files..." message.
pub fn print_start_message(file_count: usize, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let verb = if dry_run { "Checking" } else { "Processing" };
  let files_word = if file_count == 1 { "file" } else { "files" };

  println!("{} {} {}...", verb, file_count, files_word);
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the file set, one path per line, for `--list`.
///
/// This output is meant for scripts, so it is printed even in quiet mode and
/// never colored.
pub fn print_file_list(files: &[PathBuf]) {
  for file in files {
    println!("{}", file.display());
  }
}

/// Print the known shorthands, for `--list-shorthands`.
pub fn print_shorthands(shorthands: &[(String, String)]) {
  let width = shorthands.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
  for (name, regex) in shorthands {
    println!(
      "{:<width$}  {}",
      name.if_supports_color(Stream::Stdout, |s| s.green()),
      regex
    );
  }
}

/// Print the list of files that received (or would receive) the license.
pub fn print_inserted_files(files: &[&FileReport], dry_run: bool) {
  if is_quiet() || files.is_empty() {
    return;
  }

  let count = files.len();
  let header = format!(
    "{} {} license into {} {}:",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    if dry_run { "Would insert" } else { "Inserted" },
    count,
    if count == 1 { "file" } else { "files" }
  );
  println!("{}", header);

  print_truncated(files, |file| file.path.display().to_string());
}

/// Print the list of files that were skipped, with reasons.
pub fn print_skipped_files(files: &[&FileReport]) {
  if is_quiet() || files.is_empty() {
    return;
  }

  let count = files.len();
  let header = format!(
    "{} Skipped {} {}:",
    symbols::SKIPPED.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    count,
    if count == 1 { "file" } else { "files" }
  );
  println!("{}", header);

  print_truncated(files, describe);
}

/// Print the list of files that failed.
///
/// Failures are always listed in full; in quiet mode only the paths are
/// printed so the output can be piped.
pub fn print_failed_files(files: &[&FileReport]) {
  if files.is_empty() {
    return;
  }

  if is_quiet() {
    for file in files {
      println!("{}", file.path.display());
    }
    return;
  }

  let count = files.len();
  let header = format!(
    "{} {} {} failed:",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
    count,
    if count == 1 { "file" } else { "files" }
  );
  println!("{}", header);

  for file in files {
    println!("  {}", describe(file));
  }
}

/// Print the message shown when no file contained the marker.
pub fn print_nothing_to_do(marker: &str) {
  if is_quiet() {
    return;
  }

  println!(
    "{} No file contains the {} marker.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    marker
  );
}

/// Print the processing summary.
///
/// Format: "Summary: X inserted, Y without marker, Z skipped, W failed"
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary) {
  if is_quiet() {
    return;
  }

  let inserted_str = summary.inserted.if_supports_color(Stream::Stdout, |s| s.cyan());
  let failed_str = if summary.failed > 0 {
    summary.failed.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
  } else {
    summary.failed.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
  };
  let no_marker_str = summary.no_marker.if_supports_color(Stream::Stdout, |s| s.dimmed());
  let skipped_str = summary.skipped.if_supports_color(Stream::Stdout, |s| s.dimmed());

  let mut summary_line = format!(
    "Summary: {} {}, {} without marker, {} skipped, {} failed",
    inserted_str,
    if summary.dry_run { "to insert" } else { "inserted" },
    no_marker_str,
    skipped_str,
    failed_str
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", summary_line);
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// Print file lines, truncated to [`DEFAULT_FILE_LIST_LIMIT`] unless verbose.
fn print_truncated(files: &[&FileReport], render: impl Fn(&FileReport) -> String) {
  let count = files.len();
  let show_all = is_verbose();
  let limit = if show_all { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in files.iter().take(limit) {
    println!("  {}", render(file));
  }

  if !show_all && count > limit {
    let remaining = count - limit;
    println!(
      "  {} ... and {} more (use -v to see all)",
      "".if_supports_color(Stream::Stdout, |s| s.dimmed()),
      remaining
    );
  }
}

/// Path plus reason, if any.
fn describe(file: &FileReport) -> String {
  match file.reason {
    Some(ref reason) => format!("{} ({})", file.path.display(), reason),
    None => file.path.display().to_string(),
  }
}

/// File reports grouped by outcome for output.
pub struct CategorizedReports<'a> {
  /// Files that received the license
  pub inserted: Vec<&'a FileReport>,
  /// Files without a marker
  pub no_marker: Vec<&'a FileReport>,
  /// Files that were skipped
  pub skipped: Vec<&'a FileReport>,
  /// Files that failed
  pub failed: Vec<&'a FileReport>,
}

impl<'a> CategorizedReports<'a> {
  /// Categorize a slice of file reports, keeping their order.
  pub fn from_reports(reports: &'a [FileReport]) -> Self {
    let mut inserted = Vec::new();
    let mut no_marker = Vec::new();
    let mut skipped = Vec::new();
    let mut failed = Vec::new();

    for report in reports {
      match report.action {
        FileAction::Inserted => inserted.push(report),
        FileAction::NoMarker => no_marker.push(report),
        FileAction::Skipped => skipped.push(report),
        FileAction::Failed => failed.push(report),
      }
    }

    Self {
      inserted,
      no_marker,
      skipped,
      failed,
    }
  }
}
