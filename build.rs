//! Build script: embeds the crate version from `DOKPLOY_CI_VERSION` or `git describe`.

use std::process::Command;

fn main() {
    // Prefer DOKPLOY_CI_VERSION if set (e.g., by the release workflow),
    // otherwise fall back to git describe for local builds.
    if let Ok(version) = std::env::var("DOKPLOY_CI_VERSION") {
        println!("cargo:rustc-env=DOKPLOY_CI_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !version.is_empty() {
            println!("cargo:rustc-env=DOKPLOY_CI_VERSION={version}");
        }
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=DOKPLOY_CI_VERSION");
}
