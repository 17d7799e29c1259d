//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod insert;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use insert::{InsertArgs, run_insert};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

const LONG_VERSION: &str = concat!(
  env!("CARGO_PKG_VERSION"),
  " (",
  env!("GIT_HASH"),
  " ",
  env!("GIT_DATE"),
  ")"
);

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  name = "license-insert",
  author,
  version,
  long_version = LONG_VERSION,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Insert LICENSE.txt into every file that carries a $COPYRIGHT$ marker
  license-insert LICENSE.txt

  # Only C and C++ sources under src/
  license-insert -C src LICENSE.txt cpp-sources c-sources

  # Literal patterns are regular expressions matched against the file name
  license-insert LICENSE.txt '.*\\.rs'

  # Preview the changes as a unified diff without touching any file
  license-insert --dry-run --show-diff LICENSE.txt

  # Fill {{year}} placeholders in the license with the current year
  license-insert --year LICENSE.txt

  # ... or with a fixed year
  license-insert --year=2024 LICENSE.txt

  # Show which files would be considered, without reading them
  license-insert --list LICENSE.txt script-sources
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub insert_args: InsertArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
