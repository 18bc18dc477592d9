use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let hash = command_output("git", &["rev-parse", "--short", "HEAD"])
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| UNKNOWN.into());
    let status = command_output("git", &["status", "--porcelain"])
        .map(|changes| if changes.is_empty() { "clean" } else { "dirty" }.to_string())
        .unwrap_or_else(|| UNKNOWN.into());
    let rustc = command_output("rustc", &["--version"]).unwrap_or_else(|| UNKNOWN.into());
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    let metadata = [
        ("HASH", hash),
        ("STATUS", status),
        ("TIMESTAMP", timestamp),
        ("TARGET", env::var("TARGET").unwrap_or_else(|_| UNKNOWN.into())),
        ("PROFILE", env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.into())),
        ("RUSTC", rustc),
    ];
    for (key, value) in metadata {
        println!("cargo:rustc-env=FINCAL_BUILD_{key}={value}");
    }
}

/// Trimmed stdout of a successful command, or `None` when it cannot run.
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
