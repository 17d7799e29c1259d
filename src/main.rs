//! # license-insert
//!
//! Inserts license text into source files at a marker line.

use anyhow::Result;
use license_insert::cli::{Cli, run_insert};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_insert(cli.insert_args)
}
