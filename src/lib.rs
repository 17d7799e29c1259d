//! # license-insert
//!
//! A tool that inserts license text into source files at a marker line.
//!
//! `license-insert` walks a directory tree, selects files by base-name
//! pattern, and replaces the first line containing the `$COPYRIGHT$` marker
//! with the license text. Every license line inherits whatever preceded the
//! marker on that line, so `// $COPYRIGHT$` in a C++ file and `# $COPYRIGHT$`
//! in a shell script both come out correctly commented. Files without a
//! marker are never rewritten.
//!
//! ## Features
//!
//! * Shorthand patterns for common source families (`cpp-sources`,
//!   `c-sources`, `script-sources`) plus arbitrary regular expressions
//! * `.svn` and `CVS` directories are never entered
//! * Atomic replacement: a file holds either its old or its new content
//! * Dry runs with unified diffs
//! * Optional `{{year}}` substitution in the license text
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//!
//! use license_insert::license::LicenseText;
//! use license_insert::patterns::PatternRegistry;
//! use license_insert::processor::{Processor, ProcessorConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let license = LicenseText::load(Path::new("LICENSE.txt"))?.with_year("2025");
//!     let patterns = PatternRegistry::new().resolve(&["cpp-sources".to_string()])?;
//!
//!     let processor = Processor::new(ProcessorConfig::new(PathBuf::from("src"), license, patterns))?;
//!     let files = processor.collect_files();
//!     let outcome = processor.process(&files);
//!
//!     println!("Inserted the license into {} files", outcome.inserted_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`patterns`] - Shorthand and regex file-name patterns
//! * [`processor`] - Tree walk, marker replacement and atomic commit
//! * [`license`] - License text loading
//! * [`logging`] - Logging utilities for verbose output

pub mod cli;
pub mod config;
pub mod diff;
pub mod license;
pub mod logging;
pub mod output;
pub mod patterns;
pub mod processor;
pub mod report;
