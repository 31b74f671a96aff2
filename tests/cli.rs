use assert_cmd::Command;
use predicates::prelude::*;

fn pixelpad_cmd() -> Command {
    Command::cargo_bin("pixelpad").expect("binary exists")
}

#[test]
fn pixelpad_help_prints_usage() {
    pixelpad_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Immediate-mode drawing surface for Wayland compositors",
        ))
        .stdout(predicate::str::contains("--demo"));
}

#[test]
fn pixelpad_requires_wayland_env() {
    pixelpad_cmd()
        .env_remove("WAYLAND_DISPLAY")
        .arg("--demo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("WAYLAND_DISPLAY not set"));
}

#[test]
fn unknown_flag_is_rejected() {
    pixelpad_cmd()
        .arg("--fullscreen")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}
