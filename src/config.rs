//! # Configuration Module
//!
//! This module provides configuration support for license-insert, allowing
//! users to define their own shorthand patterns, exclude more directories,
//! change the marker token, and control pattern anchoring.
//!
//! Configuration can be specified in a `.license-insert.toml` file in the walk
//! root or via the `LICENSE_INSERT_CONFIG` environment variable. Command-line
//! flags take precedence over configuration values.
//!
//! ```toml
//! marker = "$COPYRIGHT$"
//! anchored = true
//! exclude-dirs = [".git", "third_party"]
//!
//! [shorthands]
//! rust-sources = '.*\.rs'
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".license-insert.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "LICENSE_INSERT_CONFIG";

/// Main configuration struct for license-insert.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
  /// Marker token replacing the default `$COPYRIGHT$`.
  #[serde(default)]
  pub marker: Option<String>,

  /// Whether literal patterns must match the whole file name.
  #[serde(default)]
  pub anchored: Option<bool>,

  /// Directory names never entered, in addition to `.svn` and `CVS`.
  #[serde(default)]
  pub exclude_dirs: Vec<String>,

  /// Named patterns usable like the built-in shorthands.
  /// Values are regexes matched against the whole file name.
  #[serde(default)]
  pub shorthands: BTreeMap<String, String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// The marker token is unusable.
  #[error("Invalid marker '{marker}': {message}")]
  InvalidMarker { marker: String, message: String },

  /// An excluded directory entry is unusable.
  #[error("Invalid excluded directory '{name}': {message}")]
  InvalidExcludeDir { name: String, message: String },

  /// A shorthand definition is unusable.
  #[error("Invalid shorthand '{name}': {message}")]
  InvalidShorthand { name: String, message: String },
}

/// Checks that a marker token can be found on a single line.
pub fn validate_marker(marker: &str) -> Result<(), ConfigError> {
  let message = if marker.is_empty() {
    "marker cannot be empty"
  } else if marker.contains(['\n', '\r']) {
    "marker cannot contain line breaks"
  } else {
    return Ok(());
  };

  Err(ConfigError::InvalidMarker {
    marker: marker.to_string(),
    message: message.to_string(),
  })
}

/// Checks that an excluded directory is a bare name.
///
/// Exclusions are compared against one path component at a time, so a value
/// containing a separator could never match.
pub fn validate_exclude_dir(name: &str) -> Result<(), ConfigError> {
  let message = if name.is_empty() {
    "name cannot be empty"
  } else if name.contains(['/', '\\']) {
    "must be a directory name, not a path"
  } else {
    return Ok(());
  };

  Err(ConfigError::InvalidExcludeDir {
    name: name.to_string(),
    message: message.to_string(),
  })
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read,
  /// parsed, or validated.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config = Self::parse(&content).map_err(|e| match e {
      ConfigError::ParseError { source, .. } => ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
      },
      other => other,
    })?;

    verbose_log!("Loaded {} shorthand definitions", config.shorthands.len());

    Ok(config)
  }

  /// Parse and validate configuration from TOML text.
  pub fn parse(content: &str) -> Result<Self, ConfigError> {
    let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
      path: PathBuf::new(),
      source: e,
    })?;

    config.validate()?;

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - The marker, if set, is non-empty and on a single line
  /// - Excluded directories are bare names, not paths
  /// - Shorthand names and patterns are non-empty
  fn validate(&self) -> Result<(), ConfigError> {
    if let Some(ref marker) = self.marker {
      validate_marker(marker)?;
    }

    for name in &self.exclude_dirs {
      validate_exclude_dir(name)?;
    }

    for (name, pattern) in &self.shorthands {
      if name.trim().is_empty() {
        return Err(ConfigError::InvalidShorthand {
          name: name.clone(),
          message: "name cannot be empty".to_string(),
        });
      }
      if pattern.is_empty() {
        return Err(ConfigError::InvalidShorthand {
          name: name.clone(),
          message: "pattern cannot be empty".to_string(),
        });
      }
    }

    Ok(())
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `LICENSE_INSERT_CONFIG` environment variable
/// 3. `.license-insert.toml` in the walk root
///
/// An explicit path is returned even if it does not exist, so that loading
/// reports the missing file instead of silently running without it.
pub fn discover_config_path(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let root_config = root.join(DEFAULT_CONFIG_FILENAME);
  if root_config.is_file() {
    verbose_log!("Using config: {}", root_config.display());
    return Some(root_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `root` - The walk root directory
/// * `no_config` - If true, skip config file discovery
///
/// # Returns
///
/// The loaded configuration, or `None` if no config file is used.
pub fn load_config(explicit_path: Option<&Path>, root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
