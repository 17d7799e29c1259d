//! # Content Transformer Module
//!
//! This module replaces the marker line of a file with the license text.
//!
//! The transformation is purely line based. Lines are copied unchanged until
//! the first line containing the marker token. The text in front of the token
//! on that line becomes the comment prefix, every license line is emitted
//! behind that prefix, and the marker line itself is dropped. Everything after
//! it is copied unchanged, including further marker occurrences.

use crate::license::LicenseText;

/// The marker token that signals where the license text goes.
pub const DEFAULT_MARKER: &str = "$COPYRIGHT$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
  /// Looking for the marker, copying lines as-is
  Scanning,
  /// Marker consumed, copying the rest of the file as-is
  Copying,
}

/// Result of transforming one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
  /// The new file content. Equal to the input when `matched` is false.
  pub content: String,
  /// Whether a marker line was found and replaced
  pub matched: bool,
  /// 1-based number of the replaced line
  pub marker_line: Option<usize>,
  /// Text that preceded the marker on its line
  pub comment_prefix: Option<String>,
}

/// Marker-anchored license insertion.
///
/// The `ContentTransformer` holds the marker token and applies the license
/// text to file contents. It keeps no state between files.
#[derive(Debug, Clone)]
pub struct ContentTransformer {
  marker: String,
}

impl Default for ContentTransformer {
  fn default() -> Self {
    Self::new(DEFAULT_MARKER)
  }
}

impl ContentTransformer {
  /// Creates a transformer for the given marker token.
  ///
  /// The marker must be non-empty and must not contain line breaks; the
  /// configuration layer validates this before construction.
  pub fn new(marker: impl Into<String>) -> Self {
    Self { marker: marker.into() }
  }

  /// The marker token this transformer looks for.
  pub fn marker(&self) -> &str {
    &self.marker
  }

  /// Replaces the first marker line in `source` with `license`.
  ///
  /// Line terminators are preserved exactly. Inserted lines use the marker
  /// line's terminator; when the marker sits on an unterminated last line,
  /// inserted lines are joined with the previous line's terminator (`\n` if
  /// there is none) and the final one stays unterminated.
  pub fn apply(&self, source: &str, license: &LicenseText) -> Transformed {
    let license_len: usize = license.lines().iter().map(|line| line.len() + 1).sum();
    let mut content = String::with_capacity(source.len() + license_len * 2);
    let mut state = State::Scanning;
    let mut marker_line = None;
    let mut comment_prefix = None;
    let mut previous_eol = "\n";

    for (index, line) in source.split_inclusive('\n').enumerate() {
      match state {
        State::Copying => content.push_str(line),
        State::Scanning => {
          let Some(position) = line.find(self.marker.as_str()) else {
            content.push_str(line);
            previous_eol = line_terminator(line);
            continue;
          };

          let prefix = &line[..position];
          let eol = line_terminator(line);
          let joiner = if eol.is_empty() { previous_eol } else { eol };
          push_license(&mut content, prefix, eol, joiner, license);

          marker_line = Some(index + 1);
          comment_prefix = Some(prefix.to_string());
          state = State::Copying;
        }
      }
    }

    Transformed {
      content,
      matched: state == State::Copying,
      marker_line,
      comment_prefix,
    }
  }
}

/// Emits every license line behind `prefix`.
///
/// Lines are separated by `joiner`; the last one ends with `eol`, which is
/// empty when the marker line had no terminator.
fn push_license(content: &mut String, prefix: &str, eol: &str, joiner: &str, license: &LicenseText) {
  let count = license.len();
  for (index, line) in license.lines().iter().enumerate() {
    content.push_str(prefix);
    content.push_str(line);
    content.push_str(if index + 1 < count { joiner } else { eol });
  }
}

/// The terminator a line ends with: `\r\n`, `\n` or nothing.
fn line_terminator(line: &str) -> &str {
  if line.ends_with("\r\n") {
    "\r\n"
  } else if line.ends_with('\n') {
    "\n"
  } else {
    ""
  }
}
