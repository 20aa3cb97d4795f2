use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI against `api_url` with state kept under `state_dir`.
pub fn run_cli(args: &[&str], api_url: &str, state_dir: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_natter"));
    cmd.args(args);
    cmd.env("NATTER_API_URL", api_url);
    cmd.env("NATTER_STATE_DIR", state_dir);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("NATTER_AUTH");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI off the async runtime so the mock server keeps serving.
pub async fn run_cli_async(args: &[&str], api_url: &str, state_dir: &Path) -> Output {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let api_url = api_url.to_string();
    let state_dir = state_dir.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli(&args, &api_url, &state_dir)
    })
    .await
    .expect("CLI task panicked")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Assert success, showing stderr otherwise.
pub fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{} failed: {}",
        what,
        stderr(output)
    );
}
