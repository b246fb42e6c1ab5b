//! CLI integration tests.

mod support;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use satwatch::testkit::payload;
use support::server::{Reply, StubServer};
use tempfile::TempDir;

/// Run the binary in an empty directory with no satwatch environment.
fn satwatch(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("satwatch");
    cmd.current_dir(dir.path())
        .env_remove("SATWATCH_API_URL")
        .env_remove("SATWATCH_TIMEOUT_MS")
        .env_remove("SATWATCH_FRESHNESS_SECS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    satwatch(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("satwatch"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("presets"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    satwatch(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_presets_list() {
    let dir = TempDir::new().unwrap();
    satwatch(&dir)
        .args(["--color", "never", "presets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("open-notify"))
        .stdout(predicate::str::contains("wheretheiss"))
        .stdout(predicate::str::contains("api.open-notify.org"));
}

#[test]
fn test_presets_json_lines() {
    let dir = TempDir::new().unwrap();
    let output = satwatch(&dir).args(["--json", "presets"]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    for line in stdout.lines() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["type"], "preset");
    }
    assert_eq!(stdout.lines().count(), 2);
}

#[test]
fn test_check_config_defaults() {
    let dir = TempDir::new().unwrap();
    satwatch(&dir)
        .args(["--color", "never", "check", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains(
            "http://api.open-notify.org/iss-now.json",
        ))
        .stdout(predicate::str::contains("iss_position.latitude"));
}

#[test]
fn test_check_config_reads_file_in_working_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("satwatch.toml"),
        "[provider]\npreset = \"wheretheiss\"\nfreshness_secs = 0\n",
    )
    .unwrap();

    satwatch(&dir)
        .args(["--color", "never", "check", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api.wheretheiss.at"))
        .stdout(predicate::str::contains("disabled"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[provider]\ntimeout_ms = 0\n").unwrap();

    satwatch(&dir)
        .args(["check", "config", "-c"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("provider.timeout_ms"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    satwatch(&dir)
        .args(["show", "-c", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn test_unknown_preset_flag_fails() {
    let dir = TempDir::new().unwrap();
    satwatch(&dir)
        .args(["show", "--preset", "celestrak"])
        .assert()
        .failure();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_show_renders_position() {
    let server = StubServer::start(vec![Reply::ok(payload::open_notify(
        "51.5072",
        "-0.1276",
        1_700_000_000,
    ))])
    .await;
    let dir = TempDir::new().unwrap();
    let mut cmd = satwatch(&dir);
    cmd.args(["--color", "never", "show", "--url", &server.url]);

    let assert = tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("51.507200"))
        .stdout(predicate::str::contains("-0.127600"))
        .stdout(predicate::str::contains("2023-11-14 22:13:20 UTC"))
        .stdout(predicate::str::contains("@ ISS"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_show_json_emits_position_record() {
    let server =
        StubServer::start(vec![Reply::ok(payload::where_the_iss(-12.5, 140.25, 1_700_000_100))])
            .await;
    let dir = TempDir::new().unwrap();
    let mut cmd = satwatch(&dir);
    cmd.args(["--json", "show", "--preset", "wheretheiss", "--url", &server.url]);

    let output = tokio::task::spawn_blocking(move || cmd.output())
        .await
        .unwrap()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let position = stdout
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
        .find(|value| value["type"] == "position")
        .expect("position line");
    assert_eq!(position["payload"]["record"]["latitude"], -12.5);
    assert_eq!(position["payload"]["record"]["visibility"], "daylight");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_show_reports_unavailable_position() {
    let server = StubServer::start(vec![Reply::raw(500, "{}")]).await;
    let dir = TempDir::new().unwrap();
    let mut cmd = satwatch(&dir);
    cmd.args(["--color", "never", "show", "--url", &server.url]);

    let assert = tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .unwrap();

    assert
        .failure()
        .stderr(predicate::str::contains("position not available"))
        .stderr(predicate::str::contains("HTTP 500"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_watch_stops_after_cycles() {
    let server = StubServer::start(vec![Reply::ok(payload::open_notify("1.0", "2.0", 100))]).await;
    let dir = TempDir::new().unwrap();
    let mut cmd = satwatch(&dir);
    cmd.args([
        "--color",
        "never",
        "watch",
        "--interval",
        "1",
        "--cycles",
        "2",
        "--url",
        &server.url,
    ])
    .write_stdin("");

    let assert = tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("Current location").count(2));
    assert_eq!(server.hits(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_watch_quits_on_q() {
    let server = StubServer::start(vec![Reply::ok(payload::open_notify("1.0", "2.0", 100))]).await;
    let dir = TempDir::new().unwrap();
    let mut cmd = satwatch(&dir);
    cmd.args(["--json", "watch", "--interval", "60", "--url", &server.url])
        .write_stdin("q\n")
        .timeout(std::time::Duration::from_secs(10));

    let assert = tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .unwrap();

    assert.success();
}
