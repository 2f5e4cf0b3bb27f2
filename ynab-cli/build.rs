//! Stamps `ynab-push --version` with the source revision.
//!
//! Packagers building from a tarball set `YNAB_PUSH_BUILD_SHA` themselves;
//! otherwise the workspace's git checkout is described, with `-dirty` for
//! uncommitted changes.

use std::path::Path;
use std::process::Command;

const SHA_VAR: &str = "YNAB_PUSH_BUILD_SHA";

fn main() {
    println!("cargo:rerun-if-env-changed={SHA_VAR}");

    let revision = std::env::var(SHA_VAR)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(describe_checkout)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env={SHA_VAR}={}", revision.trim());
}

fn describe_checkout() -> Option<String> {
    let workspace = Path::new(env!("CARGO_MANIFEST_DIR")).parent()?;

    let head = workspace.join(".git").join("HEAD");
    if head.exists() {
        println!("cargo:rerun-if-changed={}", head.display());
    }

    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["describe", "--always", "--dirty", "--abbrev=10"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;

    let revision = String::from_utf8(out.stdout).ok()?;
    Some(revision.trim().to_string()).filter(|s| !s.is_empty())
}
