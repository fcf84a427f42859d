//! Build script: embeds the version string shown by `--version`.
//!
//! `MP3SNIP_VERSION` is always set: the package version, with the short git
//! hash appended when building from a git checkout.

use std::process::Command;

fn main() {
    let version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let full = match git_short_hash() {
        Some(hash) => format!("{}+{}", version, hash),
        None => version,
    };
    println!("cargo:rustc-env=MP3SNIP_VERSION={}", full);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");
}

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!hash.is_empty()).then_some(hash)
}
