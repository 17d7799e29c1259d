//! # Insert Command
//!
//! This module implements the license insertion command: it loads the
//! license text and configuration, resolves the patterns, walks the tree and
//! rewrites every file that carries the marker.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Args;
use tracing::debug;

use crate::config::{Config, load_config, validate_exclude_dir, validate_marker};
use crate::diff::DiffManager;
use crate::info_log;
use crate::license::LicenseText;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{
  CategorizedReports, print_blank_line, print_failed_files, print_file_list, print_hint, print_inserted_files,
  print_nothing_to_do, print_shorthands, print_skipped_files, print_start_message, print_summary,
};
use crate::patterns::PatternRegistry;
use crate::processor::{DEFAULT_MARKER, FileCollector, Processor, ProcessorConfig};
use crate::report::{ProcessingSummary, ReportFormat, ReportGenerator};

/// Arguments for the insert command
#[derive(Args, Debug, Default)]
pub struct InsertArgs {
  /// File containing the license text to insert
  #[arg(value_name = "LICENSE_FILE", required_unless_present = "list_shorthands")]
  pub license_file: Option<PathBuf>,

  /// File-name patterns: shorthands (cpp-sources, c-sources, script-sources)
  /// or regular expressions. Matches every file when omitted.
  #[arg(value_name = "PATTERNS")]
  pub patterns: Vec<String>,

  /// Directory to walk
  #[arg(long, short = 'C', value_name = "DIR", default_value = ".")]
  pub root: PathBuf,

  /// Compute changes without modifying any file
  #[arg(long, short = 'n')]
  pub dry_run: bool,

  /// Show diff of changes in dry run mode
  #[arg(long, requires = "dry_run")]
  pub show_diff: bool,

  /// Save diff of changes to a file in dry run mode
  #[arg(long, value_name = "FILE", requires = "dry_run")]
  pub save_diff: Option<PathBuf>,

  /// Print the files matching the patterns and exit without reading them
  #[arg(long)]
  pub list: bool,

  /// Print the known shorthand patterns and exit
  #[arg(long)]
  pub list_shorthands: bool,

  /// Directory names to skip, in addition to .svn and CVS (repeatable)
  #[arg(long, value_name = "NAME")]
  pub exclude_dir: Vec<String>,

  /// Let literal patterns match anywhere in the file name
  #[arg(long)]
  pub unanchored: bool,

  /// Marker token to replace [default: $COPYRIGHT$]
  #[arg(long, value_name = "TOKEN")]
  pub marker: Option<String>,

  /// Replace {{year}} in the license text with YEAR, or the current year
  #[arg(long, value_name = "YEAR", num_args = 0..=1, require_equals = true)]
  pub year: Option<Option<String>>,

  /// Path to config file (default: .license-insert.toml in the root)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except failures
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,

  /// Write a JSON report of the run to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Write a CSV report of the run to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_csv: Option<PathBuf>,
}

impl InsertArgs {
  /// The effective marker: flag, then config, then the default.
  fn effective_marker(&self, config: Option<&Config>) -> String {
    self
      .marker
      .clone()
      .or_else(|| config.and_then(|c| c.marker.clone()))
      .unwrap_or_else(|| DEFAULT_MARKER.to_string())
  }

  /// Whether literal patterns are anchored: flag, then config, then on.
  fn effective_anchoring(&self, config: Option<&Config>) -> bool {
    if self.unanchored {
      return false;
    }
    config.and_then(|c| c.anchored).unwrap_or(true)
  }

  /// Excluded directories from the config followed by the flags.
  fn effective_excluded_dirs(&self, config: Option<&Config>) -> Vec<String> {
    let mut dirs = config.map(|c| c.exclude_dirs.clone()).unwrap_or_default();
    dirs.extend(self.exclude_dir.iter().cloned());
    dirs
  }

  /// The year to substitute into the license, if requested.
  fn effective_year(&self) -> Option<String> {
    self
      .year
      .as_ref()
      .map(|year| year.clone().unwrap_or_else(|| chrono::Local::now().year().to_string()))
  }
}

/// Run the insert command.
///
/// Resource, configuration and pattern errors are returned before any
/// source file is read. Per-file failures are reported and turn into a
/// nonzero exit once the run is complete.
pub fn run_insert(args: InsertArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }

  args.colors.apply();

  let config = load_config(args.config.as_deref(), &args.root, args.no_config)?;
  let config = config.as_ref();

  let registry = PatternRegistry::new()
    .with_anchoring(args.effective_anchoring(config))
    .with_custom_shorthands(&config.map(|c| c.shorthands.clone()).unwrap_or_default())
    .context("Invalid shorthand in config file")?;

  if args.list_shorthands {
    print_shorthands(&registry.shorthands());
    return Ok(());
  }

  let patterns = registry.resolve(&args.patterns).context("Invalid file pattern")?;
  debug!("Patterns: {}", patterns.describe().join(", "));

  let marker = args.effective_marker(config);
  validate_marker(&marker)?;

  for name in &args.exclude_dir {
    validate_exclude_dir(name).context("Invalid --exclude-dir value")?;
  }
  let excluded_dirs = args.effective_excluded_dirs(config);

  if args.list {
    let collector = FileCollector::new(args.root.clone()).with_excluded_dirs(excluded_dirs);
    print_file_list(&collector.walk(&patterns));
    return Ok(());
  }

  // Reading the license first guarantees no source file is touched when it
  // is missing.
  let license_file = args.license_file.as_deref().context("No license file given")?;
  let mut license = LicenseText::load(license_file)?;
  if let Some(year) = args.effective_year() {
    debug!("Substituting year {}", year);
    license = license.with_year(&year);
  }

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff.clone());

  let processor = Processor::new(ProcessorConfig {
    marker: marker.clone(),
    excluded_dirs,
    dry_run: args.dry_run,
    diff_manager: Some(diff_manager),
    ..ProcessorConfig::new(args.root.clone(), license, patterns)
  })?;

  let files = processor.collect_files();

  print_start_message(files.len(), args.dry_run);

  let outcome = processor.process(&files);
  let summary = ProcessingSummary::from_reports(&outcome.reports, outcome.processing_time, args.dry_run);
  let categorized = CategorizedReports::from_reports(&outcome.reports);

  print_blank_line();

  if categorized.inserted.is_empty() && categorized.failed.is_empty() {
    print_nothing_to_do(&marker);
  } else {
    print_inserted_files(&categorized.inserted, args.dry_run);
  }
  if !categorized.skipped.is_empty() {
    print_blank_line();
    print_skipped_files(&categorized.skipped);
  }
  if !categorized.failed.is_empty() {
    print_blank_line();
    print_failed_files(&categorized.failed);
  }

  print_blank_line();
  print_summary(&summary);

  if args.dry_run && !categorized.inserted.is_empty() {
    print_blank_line();
    print_hint("Run without --dry-run to insert the license.");
  }

  for (format, output_path) in [
    (ReportFormat::Json, args.report_json.as_ref()),
    (ReportFormat::Csv, args.report_csv.as_ref()),
  ] {
    let Some(output_path) = output_path else {
      continue;
    };
    let report_generator = ReportGenerator::new(format, output_path);
    if let Err(e) = report_generator.generate(&outcome.reports, &summary) {
      eprintln!("Error generating {} report: {:#}", format, e);
    } else {
      info_log!("Generated {} report at {}", format, output_path.display());
    }
  }

  if outcome.has_failures() {
    process::exit(1);
  }

  Ok(())
}
