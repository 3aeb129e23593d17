use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn wt_cmd() -> Command {
    let mut cmd = Command::cargo_bin("wt").expect("Failed to find wt binary");
    cmd.arg("--no-color");
    cmd
}

/// Layout with the step 2 metrics and chart anchors; the header is absent.
fn write_layout(dir: &Path) -> String {
    let path = dir.join("layout.json");
    std::fs::write(
        &path,
        r#"{
            "viewport_width": 1280,
            "anchors": {
                "[data-walkthrough=\"metrics\"]": { "left": 40, "top": 120, "width": 600, "height": 160 },
                "[data-walkthrough=\"chart\"]": { "left": 1000, "top": 320, "width": 260, "height": 240 }
            }
        }"#,
    )
    .expect("Failed to write layout");
    path.to_str().unwrap().to_string()
}

#[test]
fn test_cli_list_steps() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let output = wt_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "steps"])
        .output()
        .expect("Failed to run wt");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 15);
    assert!(stdout.contains("1. **Welcome to DeepSafe**"));
    assert!(stdout.contains("15. **Walkthrough Complete**"));
}

#[test]
fn test_cli_list_steps_by_phase() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wt_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "steps",
            "--phase",
            "Introduction",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2. **Dashboard Overview**"))
        .stdout(predicate::str::contains("Security Metrics").not());

    wt_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "steps",
            "--phase",
            "Nonexistent",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No steps found."));
}

#[test]
fn test_cli_show_step() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wt_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 2. Dashboard Overview"))
        .stdout(predicate::str::contains("metrics-area"))
        .stdout(predicate::str::contains("- Duration: 15s"));
}

#[test]
fn test_cli_show_missing_step() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wt_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "show", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Step with ID 99 not found"));
}

#[test]
fn test_cli_list_phases() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wt_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "phases"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Introduction**: steps 1, 2"))
        .stdout(predicate::str::contains("- **Completion**: steps 15"));
}

#[test]
fn test_cli_status_fresh() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wt_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed: no"))
        .stdout(predicate::str::contains("Skip preference: ask"))
        .stdout(predicate::str::contains("Saved progress: none"));
}

#[test]
fn test_cli_resolve_positions() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let layout = write_layout(temp_dir.path());

    wt_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "resolve",
            "2",
            "--layout",
            &layout,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "| metrics-area | 186 | 648 | right | right |",
        ))
        .stdout(predicate::str::contains(
            "| chart-area | 426 | 964 | left | left |",
        ))
        .stdout(predicate::str::contains("Not on screen: header-nav"));
}

#[test]
fn test_cli_resolve_narrow_viewport_flips_marker() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let layout = write_layout(temp_dir.path());

    wt_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "resolve",
            "2",
            "--layout",
            &layout,
            "--width",
            "700",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "| metrics-area | 186 | 8 | left | left |",
        ));
}

#[test]
fn test_cli_resolve_rejects_unusable_width() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let layout = write_layout(temp_dir.path());

    for width in ["0", "NaN"] {
        wt_cmd()
            .args([
                "--database-file",
                db_path.to_str().unwrap(),
                "resolve",
                "2",
                "--layout",
                &layout,
                "--width",
                width,
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("must be a positive number of pixels"));
    }
}

#[test]
fn test_cli_resolve_missing_layout() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wt_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "resolve",
            "2",
            "--layout",
            temp_dir.path().join("missing.json").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load layout"));
}

#[test]
fn test_cli_play_saves_progress_on_quit() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    wt_cmd()
        .args(["--database-file", db_arg, "play"])
        .write_stdin("start\nnext\nopen metrics-area\nclose\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to DeepSafe Dashboard"))
        .stdout(predicate::str::contains("Step 2 of 15"))
        .stdout(predicate::str::contains("## Security Metrics"));

    wt_cmd()
        .args(["--database-file", db_arg, "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Saved progress: step 2 of 15, 1 hotspots explored",
        ));

    wt_cmd()
        .args(["--database-file", db_arg, "play", "--resume"])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 2 of 15"))
        .stdout(predicate::str::contains("Welcome to DeepSafe Dashboard").not());
}

#[test]
fn test_cli_play_reports_bad_input() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wt_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "play"])
        .write_stdin("start\nspeed 3\ngoto ten\nopen nowhere\ndance\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid playback speed: 3"))
        .stdout(predicate::str::contains("Not a step number: ten"))
        .stdout(predicate::str::contains("Hotspot 'nowhere' not found on step 1"))
        .stdout(predicate::str::contains("Unknown command: dance"));
}

#[test]
fn test_cli_play_follows_routes() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wt_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "play"])
        .write_stdin("start\ngoto 6\nroute /app/meetings\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 6 of 15"))
        .stdout(predicate::str::contains("Step 7 of 15"));
}

#[test]
fn test_cli_play_to_completion() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    wt_cmd()
        .args(["--database-file", db_arg, "play", "--speed", "2x"])
        .write_stdin("start\ngoto 15\nnext\nfinish\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("paused at 2x"))
        .stdout(predicate::str::contains("**Steps completed**: 2"))
        .stdout(predicate::str::contains("Walkthrough closed."));

    wt_cmd()
        .args(["--database-file", db_arg, "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed: yes"))
        .stdout(predicate::str::contains("Saved progress: none"));

    // Completed once, so the default entry no longer offers the tour.
    wt_cmd()
        .args(["--database-file", db_arg])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("not shown automatically"));
}

#[test]
fn test_cli_prefer_and_reset() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    wt_cmd()
        .args(["--database-file", db_arg, "prefer", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skip preference set to never_show."));

    wt_cmd()
        .args(["--database-file", db_arg, "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skip preference: never_show"));

    wt_cmd()
        .args(["--database-file", db_arg])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("not shown automatically"));

    wt_cmd()
        .args(["--database-file", db_arg, "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Walkthrough state cleared."));

    wt_cmd()
        .args(["--database-file", db_arg, "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skip preference: ask"));
}

#[test]
fn test_cli_prefer_rejects_unknown_value() {
    wt_cmd().args(["prefer", "sometimes"]).assert().failure();
}

#[test]
fn test_cli_custom_catalog() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let catalog_path = temp_dir.path().join("catalog.json");
    std::fs::write(
        &catalog_path,
        r#"{"steps": [
            {"id": 1, "name": "Hello", "phase": "Intro", "kind": "modal", "route": "/"},
            {"id": 2, "name": "Look Around", "phase": "Intro", "kind": "full-page", "route": "/", "duration_secs": 8}
        ]}"#,
    )
    .expect("Failed to write catalog");

    let output = wt_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "--catalog",
            catalog_path.to_str().unwrap(),
            "steps",
        ])
        .output()
        .expect("Failed to run wt");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.contains("2. **Look Around** (full-page, 8s)"));
}
