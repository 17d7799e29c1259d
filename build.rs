use std::process::Command;

fn main() {
  embed_build_info();
  set_rerun_conditions();
}

/// Runs a git command and returns its trimmed stdout, or `None` when git is
/// unavailable or the command fails (e.g. building from a crates.io tarball).
fn git_output(args: &[&str]) -> Option<String> {
  let output = Command::new("git").args(args).output().ok()?;
  if !output.status.success() {
    return None;
  }
  let text = String::from_utf8(output.stdout).ok()?.trim().to_string();
  if text.is_empty() { None } else { Some(text) }
}

fn embed_build_info() {
  // The CLI's long version string reads both variables with env!(), so they
  // must always be set.
  let git_hash = git_output(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());
  println!("cargo:rustc-env=GIT_HASH={git_hash}");

  let git_date = git_output(&["log", "-1", "--format=%cs"]).unwrap_or_else(|| "unknown".to_string());
  println!("cargo:rustc-env=GIT_DATE={git_date}");
}

fn set_rerun_conditions() {
  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-changed=.git/HEAD");
}
