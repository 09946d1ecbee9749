//! Build script for clipboard-inspector
//!
//! Embeds the build date and commit shown in the startup banner.

use std::process::Command;

/// Trimmed stdout of a successful command
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn main() {
    let build_date = command_stdout("date", &["-u", "+%Y-%m-%d"]).unwrap_or_else(|| "unknown".to_string());
    let git_hash = command_stdout("git", &["describe", "--always", "--dirty"]).unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=BUILD_DATE={}", build_date);
    println!("cargo:rustc-env=GIT_HASH={}", git_hash);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=build.rs");
}
