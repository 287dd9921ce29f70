//! Integration tests for the `tw` command-line interface.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TWO_DOORS: &str = r#"{
    "player": { "names": ["player", "me"] },
    "rooms": [
        {
            "name": "Porch",
            "description": "A creaky porch.",
            "entities": [
                { "names": ["oak door"], "portal": { "to": "Kitchen", "direction": "east" } },
                { "names": ["screen door"], "portal": { "to": "Kitchen", "direction": "west" } }
            ]
        },
        { "name": "Kitchen", "description": "It smells of bread." }
    ]
}"#;

/// Write a world definition into a fresh temp directory.
fn world_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("world.json");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

fn tw() -> Command {
    Command::cargo_bin("tw").unwrap()
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_demo_world() {
    tw().arg("play")
        .write_stdin("take key\ni\nexamine ground\nexit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("A damp cellar.")
                .and(predicate::str::contains("There is an iron key here."))
                .and(predicate::str::contains("You take the iron key"))
                .and(predicate::str::contains(" - an iron key"))
                .and(predicate::str::contains("It doesn't look like anything to you.")),
        );
}

#[test]
fn play_reports_mistakes_and_continues() {
    tw().args(["play", "--no-intro"])
        .write_stdin("dance\ntake lamp\ngo west\nlook\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Invalid command.")
                .and(predicate::str::contains("No objects match that description"))
                .and(predicate::str::contains("You cannot go that way."))
                .and(predicate::str::contains("A damp cellar.")),
        );
}

#[test]
fn play_without_intro() {
    tw().args(["play", "--no-intro", "--prompt", ""])
        .write_stdin("inventory\n")
        .assert()
        .success()
        .stdout("Your inventory is empty\n");
}

#[test]
fn play_moves_between_rooms() {
    tw().args(["play", "--no-intro", "--prompt", ""])
        .write_stdin("up\nn\nexamine bench\ns\nd\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("A draughty hall.")
                .and(predicate::str::contains("An overgrown garden"))
                .and(predicate::str::contains("There is a red apple here."))
                .and(predicate::str::contains("A weathered stone bench.")),
        );
}

#[test]
fn play_undo() {
    tw().args(["play", "--no-intro", "--prompt", ""])
        .write_stdin("take key\nundo\ni\nundo\n")
        .assert()
        .success()
        .stdout("You take the iron key\nUndone.\nYour inventory is empty\nNothing to undo.\n");
}

#[test]
fn play_with_history_disabled() {
    tw().args(["play", "--no-intro", "--prompt", "", "--history", "0"])
        .write_stdin("take key\nundo\n")
        .assert()
        .success()
        .stdout("You take the iron key\nNothing to undo.\n");
}

#[test]
fn play_world_file_with_ambiguous_names() {
    let (_dir, path) = world_file(TWO_DOORS);
    tw().args(["play", "--prompt", "", "-w", path.to_str().unwrap()])
        .write_stdin("enter door\nenter oak door\n")
        .assert()
        .success()
        .stdout(
            "A creaky porch.\n\
             Multiple objects match that description\n\
             It smells of bread.\n",
        );
}

#[test]
fn play_missing_world_file() {
    tw().args(["play", "-w", "/nonexistent/world.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: cannot read"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_valid_world() {
    let (_dir, path) = world_file(TWO_DOORS);
    tw().args(["check", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("All checks passed")
                .and(predicate::str::contains("2 rooms"))
                .and(predicate::str::contains("Porch")),
        );
}

#[test]
fn check_malformed_world() {
    let (_dir, path) = world_file("{ \"rooms\": [ }");
    tw().args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed document"));
}

#[test]
fn check_unknown_portal_target() {
    let (_dir, path) = world_file(
        r#"{
            "player": { "names": ["me"] },
            "rooms": [ { "name": "Void", "entities": [
                { "names": ["hole"], "portal": { "to": "Nowhere" } }
            ] } ]
        }"#,
    );
    tw().args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown room \"Nowhere\""));
}

#[test]
fn verbose_flag_logs_to_stderr() {
    tw().args(["-vv", "play", "--no-intro"])
        .env_remove("RUST_LOG")
        .write_stdin("take key\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You take the iron key"))
        .stderr(predicate::str::contains("action chosen"));
}
