//! Functional test harness
//!
//! Runs the `steamy` binary with credentials from the environment.

use std::env;
use std::path::PathBuf;
use std::process::Command;

#[allow(deprecated)]
use assert_cmd::cargo::cargo_bin;
#[allow(unused_imports)]
use assert_cmd::prelude::*;

pub mod error_tests;
pub mod read_tests;

/// Gabe Newell's public profile
pub const PUBLIC_STEAM_ID: &str = "76561197960287930";

/// Team Fortress 2
pub const TF2_APP_ID: &str = "440";

const MISSING_KEY_HELP: &str = r#"
Functional tests call the live Steam Web API and need a key:

    STEAM_API_KEY=... cargo test --features functional-tests --test functional
"#;

pub struct FunctionalTestContext {
    pub binary_path: PathBuf,
}

impl FunctionalTestContext {
    /// Panics with instructions when `STEAM_API_KEY` is not set.
    pub fn new() -> Self {
        if env::var("STEAM_API_KEY").map_or(true, |k| k.trim().is_empty()) {
            eprintln!("{}", MISSING_KEY_HELP);
            panic!("STEAM_API_KEY is required for functional tests");
        }

        Self {
            binary_path: cargo_bin!("steamy").to_path_buf(),
        }
    }

    /// Build a command; config files are ignored so only the environment counts.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.binary_path);
        cmd.args(["--config", "/nonexistent/steamy-functional.yaml"]);
        cmd.args(args);
        cmd
    }

    pub fn run(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command(args).assert()
    }

    /// Run and return stdout, panicking on failure.
    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self
            .command(args)
            .output()
            .expect("Failed to execute command");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("Command failed: steamy {}\nstderr: {}", args.join(" "), stderr);
        }

        String::from_utf8_lossy(&output.stdout).to_string()
    }
}

impl Default for FunctionalTestContext {
    fn default() -> Self {
        Self::new()
    }
}
