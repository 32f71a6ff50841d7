use std::process::Command;

/// Run a command and return its trimmed stdout, if it ran at all.
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-env-changed=DAMPENER_COMMIT");
    println!("cargo:rerun-if-env-changed=DAMPENER_BUILD_DATE");

    // Packaged builds pass these in; local builds ask git and date.
    let commit = std::env::var("DAMPENER_COMMIT")
        .ok()
        .or_else(|| command_output("git", &["rev-parse", "--short", "HEAD"]))
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=DAMPENER_COMMIT={}", commit);

    let build_date = std::env::var("DAMPENER_BUILD_DATE")
        .ok()
        .or_else(|| command_output("date", &["+%Y-%m-%d"]))
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=DAMPENER_BUILD_DATE={}", build_date);
}
