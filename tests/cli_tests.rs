//! End-to-end tests that run the `license-insert` binary against temporary
//! source trees.

mod common;

use std::fs;
use std::process::Command;

use anyhow::Result;
use assert_cmd::prelude::*;
use common::{LICENSE, read_file, setup_tree, write_file};
use predicates::prelude::*;
use tempfile::tempdir;

fn license_insert() -> Result<Command> {
  let mut cmd = Command::cargo_bin("license-insert")?;
  cmd.env_remove("LICENSE_INSERT_CONFIG").env_remove("LICENSE_INSERT_LOG");
  cmd.arg("--colors=never");
  Ok(cmd)
}

#[test]
fn test_basic_insertion() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "LICENSE.txt", "Copyright 2024 Acme Corp.\n")?;
  write_file(root, "src/widget.cc", "// $COPYRIGHT$\n#include \"widget.h\"\n")?;

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg(root.join("LICENSE.txt"))
    .assert()
    .success()
    .stdout(predicate::str::contains("Inserted license into 1 file"))
    .stdout(predicate::str::contains("src/widget.cc"));

  assert_eq!(
    read_file(root, "src/widget.cc")?,
    "// Copyright 2024 Acme Corp.\n#include \"widget.h\"\n"
  );
  Ok(())
}

#[test]
fn test_file_without_marker_is_byte_identical() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "LICENSE.txt", LICENSE)?;
  let original = "#pragma once\r\nint x;\n\tno newline at end";
  write_file(root, "plain.h", original)?;

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg(root.join("LICENSE.txt"))
    .assert()
    .success()
    .stdout(predicate::str::contains("No file contains the $COPYRIGHT$ marker"));

  assert_eq!(read_file(root, "plain.h")?, original);
  Ok(())
}

#[test]
fn test_shorthand_selection() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  setup_tree(root)?;

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg(root.join("LICENSE.txt"))
    .arg("cpattern")
    .assert()
    .success();

  assert_eq!(
    read_file(root, "foo.c")?,
    "// Copyright 2024 Acme Corp.\n// All rights reserved.\nint main(void) { return 0; }\n"
  );
  assert_eq!(
    read_file(root, "foo.h")?,
    "/* Copyright 2024 Acme Corp.\n/* All rights reserved.\n#pragma once\n"
  );
  assert_eq!(read_file(root, "foo.py")?, "# $COPYRIGHT$\nprint('hi')\n");
  Ok(())
}

#[test]
fn test_vcs_directories_are_never_modified() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  setup_tree(root)?;

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg(root.join("LICENSE.txt"))
    .assert()
    .success();

  assert_eq!(read_file(root, "legacy/CVS/old.h")?, "// $COPYRIGHT$\n");
  assert_eq!(read_file(root, "legacy/.svn/entries.h")?, "// $COPYRIGHT$\n");
  assert!(read_file(root, "foo.py")?.starts_with("# Copyright 2024 Acme Corp.\n"));
  Ok(())
}

#[test]
fn test_only_first_marker_is_replaced() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "LICENSE.txt", LICENSE)?;
  write_file(root, "twice.sh", "#!/bin/sh\n# $COPYRIGHT$\necho\n# $COPYRIGHT$\n")?;

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg(root.join("LICENSE.txt"))
    .arg("script-sources")
    .assert()
    .success();

  assert_eq!(
    read_file(root, "twice.sh")?,
    "#!/bin/sh\n# Copyright 2024 Acme Corp.\n# All rights reserved.\necho\n# $COPYRIGHT$\n"
  );
  Ok(())
}

#[test]
fn test_rerun_is_stable() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  setup_tree(root)?;

  for _ in 0..2 {
    license_insert()?
      .arg("-C")
      .arg(root)
      .arg(root.join("LICENSE.txt"))
      .assert()
      .success();
  }

  let after_first = read_file(root, "foo.c")?;
  license_insert()?
    .arg("-C")
    .arg(root)
    .arg(root.join("LICENSE.txt"))
    .assert()
    .success()
    .stdout(predicate::str::contains("No file contains the $COPYRIGHT$ marker"));

  assert_eq!(read_file(root, "foo.c")?, after_first);
  Ok(())
}

#[test]
fn test_unmatched_files_keep_mtime() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  setup_tree(root)?;
  let before = fs::metadata(root.join("foo.py"))?.modified()?;

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg(root.join("LICENSE.txt"))
    .arg("c-sources")
    .assert()
    .success();

  assert_eq!(fs::metadata(root.join("foo.py"))?.modified()?, before);
  Ok(())
}

#[test]
fn test_dry_run_with_diff() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  setup_tree(root)?;
  let diff_path = temp_dir.path().join("changes.diff");

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg("--dry-run")
    .arg("--show-diff")
    .arg("--save-diff")
    .arg(&diff_path)
    .arg(root.join("LICENSE.txt"))
    .arg("c-sources")
    .assert()
    .success()
    .stdout(predicate::str::contains("Would insert license into 2 files"))
    .stderr(predicate::str::contains("+// Copyright 2024 Acme Corp."));

  assert_eq!(read_file(root, "foo.c")?, "// $COPYRIGHT$\nint main(void) { return 0; }\n");
  let diff = fs::read_to_string(&diff_path)?;
  assert!(diff.contains("--- a/foo.c"));
  assert!(diff.contains("-/* $COPYRIGHT$ */"));
  Ok(())
}

#[test]
fn test_list_prints_file_set_without_modifying() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  setup_tree(root)?;

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg("--list")
    .arg(root.join("LICENSE.txt"))
    .arg("cpattern")
    .assert()
    .success()
    .stdout("foo.c\nfoo.h\nplain.h\n");

  assert_eq!(read_file(root, "foo.c")?, "// $COPYRIGHT$\nint main(void) { return 0; }\n");
  Ok(())
}

#[test]
fn test_list_shorthands() -> Result<()> {
  license_insert()?
    .arg("--list-shorthands")
    .assert()
    .success()
    .stdout(predicate::str::contains("cpp-sources"))
    .stdout(predicate::str::contains("script-sources"));
  Ok(())
}

#[test]
fn test_missing_license_file_touches_nothing() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  setup_tree(root)?;

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg(root.join("NO_SUCH_LICENSE.txt"))
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("Failed to read license file"));

  assert_eq!(read_file(root, "foo.c")?, "// $COPYRIGHT$\nint main(void) { return 0; }\n");
  Ok(())
}

#[test]
fn test_missing_license_argument_is_usage_error() -> Result<()> {
  license_insert()?
    .assert()
    .failure()
    .code(2)
    .stderr(predicate::str::contains("LICENSE_FILE"));
  Ok(())
}

#[test]
fn test_invalid_regex_is_rejected() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  setup_tree(root)?;

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg(root.join("LICENSE.txt"))
    .arg("foo(")
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("Invalid file pattern"));

  assert_eq!(read_file(root, "foo.c")?, "// $COPYRIGHT$\nint main(void) { return 0; }\n");
  Ok(())
}

#[test]
fn test_config_shorthand_and_marker() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "LICENSE.txt", LICENSE)?;
  write_file(
    root,
    ".license-insert.toml",
    "marker = \"@LICENSE@\"\nexclude-dirs = [\"vendor\"]\n\n[shorthands]\nrust-sources = '.*\\.rs'\n",
  )?;
  write_file(root, "src/lib.rs", "// @LICENSE@\npub fn f() {}\n")?;
  write_file(root, "vendor/dep.rs", "// @LICENSE@\n")?;
  write_file(root, "build.sh", "# @LICENSE@\n")?;

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg(root.join("LICENSE.txt"))
    .arg("rust-sources")
    .assert()
    .success();

  assert!(read_file(root, "src/lib.rs")?.starts_with("// Copyright 2024 Acme Corp.\n"));
  assert_eq!(read_file(root, "vendor/dep.rs")?, "// @LICENSE@\n");
  assert_eq!(read_file(root, "build.sh")?, "# @LICENSE@\n");
  Ok(())
}

#[test]
fn test_no_config_ignores_config_file() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "LICENSE.txt", LICENSE)?;
  write_file(root, ".license-insert.toml", "marker = \"@LICENSE@\"\n")?;
  write_file(root, "a.c", "// $COPYRIGHT$\n")?;

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg("--no-config")
    .arg(root.join("LICENSE.txt"))
    .assert()
    .success();

  assert!(read_file(root, "a.c")?.starts_with("// Copyright 2024"));
  Ok(())
}

#[test]
fn test_year_substitution() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "LICENSE.txt", "Copyright {{year}} Acme Corp.\n")?;
  write_file(root, "a.c", "// $COPYRIGHT$\n")?;
  write_file(root, "b.c", "// $COPYRIGHT$\n")?;

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg("--year=1999")
    .arg(root.join("LICENSE.txt"))
    .arg("a\\.c")
    .assert()
    .success();

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg(root.join("LICENSE.txt"))
    .arg("b\\.c")
    .assert()
    .success();

  assert_eq!(read_file(root, "a.c")?, "// Copyright 1999 Acme Corp.\n");
  assert_eq!(read_file(root, "b.c")?, "// Copyright {{year}} Acme Corp.\n");
  Ok(())
}

#[test]
fn test_unanchored_patterns() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "LICENSE.txt", LICENSE)?;
  write_file(root, "main.cpp", "// $COPYRIGHT$\n")?;

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg("--list")
    .arg(root.join("LICENSE.txt"))
    .arg("main")
    .assert()
    .success()
    .stdout("");

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg("--list")
    .arg("--unanchored")
    .arg(root.join("LICENSE.txt"))
    .arg("main")
    .assert()
    .success()
    .stdout("main.cpp\n");
  Ok(())
}

#[test]
fn test_non_utf8_file_is_skipped() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "LICENSE.txt", LICENSE)?;
  let bytes = b"\xff\xfe// $COPYRIGHT$\n".to_vec();
  fs::write(root.join("data.h"), &bytes)?;

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg(root.join("LICENSE.txt"))
    .assert()
    .success()
    .stdout(predicate::str::contains("data.h (not valid UTF-8)"));

  assert_eq!(fs::read(root.join("data.h"))?, bytes);
  Ok(())
}

#[test]
fn test_json_report() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  setup_tree(root)?;
  let report_path = temp_dir.path().join("report.json");

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg("-q")
    .arg("--report-json")
    .arg(&report_path)
    .arg(root.join("LICENSE.txt"))
    .arg("c-sources")
    .assert()
    .success()
    .stdout("");

  let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report_path)?)?;
  assert_eq!(report["summary"]["inserted"], 2);
  assert_eq!(report["summary"]["no_marker"], 1);
  Ok(())
}

#[test]
fn test_exclude_dir_flag_rejects_paths() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "LICENSE.txt", LICENSE)?;
  write_file(root, "vendor/lib/x.c", "// $COPYRIGHT$\n")?;

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg("--exclude-dir")
    .arg("vendor/lib")
    .arg(root.join("LICENSE.txt"))
    .arg("c-sources")
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("must be a directory name, not a path"));

  assert_eq!(read_file(root, "vendor/lib/x.c")?, "// $COPYRIGHT$\n");
  Ok(())
}

#[test]
fn test_exclude_dir_flag_skips_named_directory() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "LICENSE.txt", LICENSE)?;
  write_file(root, "vendor/lib/x.c", "// $COPYRIGHT$\n")?;
  write_file(root, "src/y.c", "// $COPYRIGHT$\n")?;

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg("--exclude-dir")
    .arg("lib")
    .arg(root.join("LICENSE.txt"))
    .arg("c-sources")
    .assert()
    .success();

  assert_eq!(read_file(root, "vendor/lib/x.c")?, "// $COPYRIGHT$\n");
  assert!(read_file(root, "src/y.c")?.starts_with("// Copyright 2024"));
  Ok(())
}

#[test]
fn test_list_does_not_read_license_file() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "a.c", "// $COPYRIGHT$\n")?;

  license_insert()?
    .arg("-C")
    .arg(root)
    .arg("--list")
    .arg(root.join("NO_SUCH_LICENSE.txt"))
    .assert()
    .success()
    .stdout("a.c\n");

  assert_eq!(read_file(root, "a.c")?, "// $COPYRIGHT$\n");
  Ok(())
}
