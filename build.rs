use std::env;
use std::process::Command;

/// Trimmed stdout of a git command, None when git is missing or fails.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/tags");

    let version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());
    let release_tag = format!("v{version}");
    let on_release_tag =
        git(&["describe", "--tags", "--exact-match"]).as_deref() == Some(release_tag.as_str());

    // Plain semver for release builds and the release tag, otherwise -dev+<commit>
    let display = if env::var("PROFILE").as_deref() == Ok("release") || on_release_tag {
        version
    } else {
        match git(&["rev-parse", "--short", "HEAD"]) {
            Some(commit) => format!("{version}-dev+{commit}"),
            None => format!("{version}-dev"),
        }
    };

    println!("cargo:rustc-env=APP_VERSION_DISPLAY={display}");
}
