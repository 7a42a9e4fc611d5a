//! Embeds commit hash, build date and profile into `OUT_DIR/build_info.rs`.

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Short hash from `BUILD_COMMIT` (CI) or `git`, else "unknown".
fn commit() -> String {
    if let Ok(commit) = env::var("BUILD_COMMIT") {
        return commit;
    }
    Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn build_date() -> String {
    env::var("BUILD_DATE").unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string())
}

fn main() {
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    let contents = format!(
        "pub const BUILD_COMMIT: &str = {:?};\n\
         pub const BUILD_DATE: &str = {:?};\n\
         pub const BUILD_PROFILE: &str = {:?};\n",
        commit(),
        build_date(),
        profile
    );

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    fs::write(Path::new(&out_dir).join("build_info.rs"), contents)
        .expect("failed to write build_info.rs");

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=BUILD_COMMIT");
    println!("cargo:rerun-if-env-changed=BUILD_DATE");
}
