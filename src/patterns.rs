//! # Patterns Module
//!
//! This module resolves the pattern arguments given on the command line into a
//! [`PatternSet`], the OR-combination of regular expressions that decides which
//! files are selected during the tree walk.
//!
//! Each argument is either a shorthand keyword (see [`Shorthand`]) that expands
//! to a predefined regular expression, a shorthand defined in the
//! configuration file, or a literal regular expression. Patterns are always
//! matched against a file's base name, never against its full path.

use std::collections::BTreeMap;

use regex::Regex;
use tracing::debug;

/// Pattern used when no pattern arguments are supplied.
pub const MATCH_ALL: &str = "^.*$";

/// Error type for pattern resolution.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
  /// A literal or configured pattern is not a valid regular expression.
  #[error("Invalid pattern '{pattern}': {source}")]
  InvalidRegex { pattern: String, source: regex::Error },

  /// A configured shorthand tries to redefine a built-in one.
  #[error("Shorthand '{name}' cannot redefine a built-in shorthand")]
  ReservedShorthand { name: String },
}

/// Built-in shorthand keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shorthand {
  /// C++ headers and sources
  CppSources,
  /// C headers and sources
  CSources,
  /// csh, tcsh, sh and bash scripts
  ScriptSources,
}

impl Shorthand {
  /// All built-in shorthands, in the order they are listed to the user.
  pub const ALL: [Self; 3] = [Self::CppSources, Self::CSources, Self::ScriptSources];

  /// The canonical keyword.
  pub const fn name(self) -> &'static str {
    match self {
      Self::CppSources => "cpp-sources",
      Self::CSources => "c-sources",
      Self::ScriptSources => "script-sources",
    }
  }

  /// Older keywords that are still accepted.
  pub const fn alias(self) -> &'static str {
    match self {
      Self::CppSources => "cpppattern",
      Self::CSources => "cpattern",
      Self::ScriptSources => "scriptpattern",
    }
  }

  /// The whole-name regular expression this shorthand expands to.
  pub const fn regex(self) -> &'static str {
    match self {
      Self::CppSources => r"^.+\.(?:[chit]pp|cc|hh|cxx|hxx)$",
      Self::CSources => r"^.+\.[ch]$",
      Self::ScriptSources => r"^.+\.(?:csh|tcsh|sh|bash)$",
    }
  }

  /// Looks up a shorthand by its canonical keyword or alias.
  pub fn from_keyword(keyword: &str) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|shorthand| shorthand.name() == keyword || shorthand.alias() == keyword)
  }
}

/// Where a resolved pattern came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternOrigin {
  /// The match-all default
  MatchAll,
  /// A built-in or configured shorthand, by name
  Shorthand(String),
  /// A literal regular expression from the command line
  Literal,
}

/// A compiled file-name pattern.
#[derive(Debug, Clone)]
pub struct FilePattern {
  origin: PatternOrigin,
  regex: Regex,
}

impl FilePattern {
  fn compile(source: &str, origin: PatternOrigin) -> Result<Self, PatternError> {
    let regex = Regex::new(source).map_err(|e| PatternError::InvalidRegex {
      pattern: source.to_string(),
      source: e,
    })?;
    Ok(Self { origin, regex })
  }

  /// The origin of this pattern.
  pub const fn origin(&self) -> &PatternOrigin {
    &self.origin
  }

  /// The regular expression as compiled.
  pub fn as_str(&self) -> &str {
    self.regex.as_str()
  }

  /// Checks a bare file name against this pattern.
  pub fn is_match(&self, file_name: &str) -> bool {
    self.regex.is_match(file_name)
  }
}

/// The resolved set of file-name patterns, combined with logical OR.
#[derive(Debug, Clone)]
pub struct PatternSet {
  patterns: Vec<FilePattern>,
}

impl PatternSet {
  /// A set holding only the match-all pattern.
  pub fn match_all() -> Self {
    let regex = Regex::new(MATCH_ALL).expect("match-all regex must compile");
    Self {
      patterns: vec![FilePattern {
        origin: PatternOrigin::MatchAll,
        regex,
      }],
    }
  }

  /// Returns `true` if the base name matches any pattern in the set.
  pub fn is_match(&self, file_name: &str) -> bool {
    self.patterns.iter().any(|pattern| pattern.is_match(file_name))
  }

  /// Number of patterns in the set.
  pub const fn len(&self) -> usize {
    self.patterns.len()
  }

  /// Whether the set is empty.
  pub const fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }

  /// Iterates over the patterns in resolution order.
  pub fn iter(&self) -> impl Iterator<Item = &FilePattern> {
    self.patterns.iter()
  }

  /// Human-readable description of each pattern, for diagnostics.
  pub fn describe(&self) -> Vec<String> {
    self
      .patterns
      .iter()
      .map(|pattern| match pattern.origin() {
        PatternOrigin::MatchAll => format!("{} (all files)", pattern.as_str()),
        PatternOrigin::Shorthand(name) => format!("{} ({})", pattern.as_str(), name),
        PatternOrigin::Literal => pattern.as_str().to_string(),
      })
      .collect()
  }
}

/// Resolves shorthand keywords and literal regular expressions into a
/// [`PatternSet`].
///
/// The registry knows the built-in [`Shorthand`]s plus any shorthands defined
/// in the configuration file. Literal patterns are anchored to the whole file
/// name unless anchoring is disabled, in which case they are matched as
/// unanchored substring searches.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
  /// Shorthands from the configuration file, name to whole-name regex
  custom: BTreeMap<String, String>,
  /// Whether literal patterns must match the whole file name
  anchored: bool,
}

impl Default for PatternRegistry {
  fn default() -> Self {
    Self::new()
  }
}

impl PatternRegistry {
  /// Creates a registry with only the built-in shorthands and anchoring on.
  pub const fn new() -> Self {
    Self {
      custom: BTreeMap::new(),
      anchored: true,
    }
  }

  /// Sets whether literal patterns are anchored to the whole file name.
  pub const fn with_anchoring(mut self, anchored: bool) -> Self {
    self.anchored = anchored;
    self
  }

  /// Adds shorthands defined in the configuration file.
  ///
  /// # Errors
  ///
  /// Returns an error if a name collides with a built-in shorthand or its
  /// alias, or if a regex does not compile.
  pub fn with_custom_shorthands(mut self, shorthands: &BTreeMap<String, String>) -> Result<Self, PatternError> {
    for (name, regex) in shorthands {
      if Shorthand::from_keyword(name).is_some() {
        return Err(PatternError::ReservedShorthand { name: name.clone() });
      }
      let anchored = anchor(regex);
      // Compile once here so a bad config fails before the walk starts.
      FilePattern::compile(&anchored, PatternOrigin::Shorthand(name.clone()))?;
      self.custom.insert(name.clone(), anchored);
    }
    Ok(self)
  }

  /// Lists every known shorthand as `(name, regex)`, built-ins first.
  pub fn shorthands(&self) -> Vec<(String, String)> {
    let mut list: Vec<(String, String)> = Shorthand::ALL
      .iter()
      .map(|shorthand| (shorthand.name().to_string(), shorthand.regex().to_string()))
      .collect();
    list.extend(self.custom.iter().map(|(name, regex)| (name.clone(), regex.clone())));
    list
  }

  /// Resolves raw pattern arguments into a [`PatternSet`].
  ///
  /// An empty argument list resolves to the match-all pattern.
  ///
  /// # Errors
  ///
  /// Returns [`PatternError::InvalidRegex`] if a literal pattern does not
  /// compile.
  pub fn resolve(&self, raw_args: &[String]) -> Result<PatternSet, PatternError> {
    if raw_args.is_empty() {
      debug!("No patterns given, matching all files");
      return Ok(PatternSet::match_all());
    }

    let mut patterns = Vec::with_capacity(raw_args.len());
    for raw in raw_args {
      let pattern = if let Some(shorthand) = Shorthand::from_keyword(raw) {
        FilePattern::compile(shorthand.regex(), PatternOrigin::Shorthand(shorthand.name().to_string()))?
      } else if let Some(regex) = self.custom.get(raw) {
        FilePattern::compile(regex, PatternOrigin::Shorthand(raw.clone()))?
      } else if self.anchored {
        FilePattern::compile(&anchor(raw), PatternOrigin::Literal)?
      } else {
        FilePattern::compile(raw, PatternOrigin::Literal)?
      };
      debug!("Resolved pattern '{}' to {}", raw, pattern.as_str());
      patterns.push(pattern);
    }

    Ok(PatternSet { patterns })
  }
}

/// Wraps a regex so it must match the whole input.
fn anchor(regex: &str) -> String {
  format!("^(?:{regex})$")
}
