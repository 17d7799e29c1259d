#![allow(dead_code)]

use std::fs;
use std::path::Path;

use anyhow::Result;

/// License text used by the integration tests.
pub const LICENSE: &str = "Copyright 2024 Acme Corp.\nAll rights reserved.\n";

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<()> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(path, content)?;
  Ok(())
}

/// Reads `root/relative` as a string.
pub fn read_file(root: &Path, relative: &str) -> Result<String> {
  Ok(fs::read_to_string(root.join(relative))?)
}

/// Creates a tree with a license file and a few marked and unmarked sources.
///
/// ```text
/// LICENSE.txt
/// foo.c          // $COPYRIGHT$
/// foo.h          /* $COPYRIGHT$ */
/// foo.py         # $COPYRIGHT$
/// plain.h        no marker
/// legacy/CVS/old.h
/// legacy/.svn/entries.h
/// ```
pub fn setup_tree(root: &Path) -> Result<()> {
  write_file(root, "LICENSE.txt", LICENSE)?;
  write_file(root, "foo.c", "// $COPYRIGHT$\nint main(void) { return 0; }\n")?;
  write_file(root, "foo.h", "/* $COPYRIGHT$ */\n#pragma once\n")?;
  write_file(root, "foo.py", "# $COPYRIGHT$\nprint('hi')\n")?;
  write_file(root, "plain.h", "#pragma once\n")?;
  write_file(root, "legacy/CVS/old.h", "// $COPYRIGHT$\n")?;
  write_file(root, "legacy/.svn/entries.h", "// $COPYRIGHT$\n")?;
  Ok(())
}
