//! # License Module
//!
//! This module loads the license text that replaces the marker line. The text
//! is read once per run and shared read-only by every file transformation.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, trace};

/// Placeholder substituted when a year is requested.
static YEAR_PLACEHOLDER: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)\{\{\s*year\s*\}\}").expect("year placeholder regex must compile"));

/// The license text, split into lines without their terminators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseText {
  lines: Vec<String>,
}

impl LicenseText {
  /// Builds license text from an in-memory string.
  ///
  /// Both `\n` and `\r\n` terminators are stripped. A trailing terminator
  /// does not produce an extra empty line.
  pub fn from_text(text: &str) -> Self {
    let lines = text.lines().map(str::to_string).collect();
    Self { lines }
  }

  /// Reads the license file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file does not exist, cannot be read, or is not
  /// valid UTF-8.
  pub fn load(path: &Path) -> Result<Self> {
    debug!("Loading license text from: {}", path.display());

    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read license file: {}", path.display()))?;

    let license = Self::from_text(&content);
    trace!("License text has {} lines", license.lines.len());

    Ok(license)
  }

  /// Replaces every `{{year}}` placeholder with `year`.
  pub fn with_year(self, year: &str) -> Self {
    let lines = self
      .lines
      .into_iter()
      .map(|line| YEAR_PLACEHOLDER.replace_all(&line, year).into_owned())
      .collect();
    Self { lines }
  }

  /// The license lines, without terminators.
  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  /// Number of lines.
  pub const fn len(&self) -> usize {
    self.lines.len()
  }

  /// Whether the license text has no lines.
  pub const fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }
}
