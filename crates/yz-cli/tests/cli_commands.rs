//! Integration tests for the yz CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

fn yz() -> Command {
    Command::cargo_bin("yz").unwrap()
}

fn roll_json(args: &[&str]) -> serde_json::Value {
    let output = yz()
        .arg("roll")
        .args(args)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// games
// ---------------------------------------------------------------------------

#[test]
fn games_lists_every_game() {
    yz().arg("games").assert().success().stdout(
        predicate::str::contains("Mutant: Year Zero")
            .and(predicate::str::contains("Twilight 2000"))
            .and(predicate::str::contains("Blade Runner"))
            .and(predicate::str::contains("8 games")),
    );
}

#[test]
fn games_describes_one_game() {
    yz().args(["games", "fbl"]).assert().success().stdout(
        predicate::str::contains("Forbidden Lands")
            .and(predicate::str::contains("artoD12"))
            .and(predicate::str::contains("skill dice")),
    );
}

#[test]
fn games_unknown_game_fails() {
    yz().args(["games", "dnd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown game").and(predicate::str::contains("t2k")));
}

// ---------------------------------------------------------------------------
// roll
// ---------------------------------------------------------------------------

#[test]
fn roll_prints_summary() {
    yz().args(["roll", "--game", "myz", "base=3", "skill=2", "gear=1", "--seed", "3"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Mutant: Year Zero")
                .and(predicate::str::contains("3db + 2ds + 1dg"))
                .and(predicate::str::contains("Successes"))
                .and(predicate::str::contains("Attribute trauma"))
                .and(predicate::str::contains("not pushed")),
        );
}

#[test]
fn roll_json_report() {
    let report = roll_json(&["--game", "alien", "skill=4", "stress=2", "--name", "Mobility"]);
    assert_eq!(report["game"], "alien");
    assert_eq!(report["name"], "Mobility");
    assert_eq!(report["formula"], "4ds + 2dz");
    assert_eq!(report["terms"].as_array().unwrap().len(), 2);
    assert_eq!(report["stats"]["stress"], 2);
}

#[test]
fn roll_is_reproducible_with_seed() {
    let a = roll_json(&["--game", "cor", "s=5", "--seed", "11", "--push", "1"]);
    let b = roll_json(&["--game", "cor", "s=5", "--seed", "11", "--push", "1"]);
    assert_eq!(a, b);
}

#[test]
fn roll_applies_ladder_modifier() {
    let report = roll_json(&["--game", "t2k", "d=1", "--modify", "2"]);
    assert_eq!(report["formula"], "1d10");
}

#[test]
fn roll_applies_negative_modifier() {
    let report = roll_json(&["--game", "myz", "base=2", "skill=1", "--modify=-2"]);
    assert_eq!(report["formula"], "2db - 1dn");
}

#[test]
fn roll_rejects_huge_modifier() {
    yz().args(["roll", "--game", "myz", "base=2", "--modify=-2147483648"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn roll_parses_own_denomination_over_foreign_key() {
    let report = roll_json(&["--game", "myz", "b=3", "s=1"]);
    assert_eq!(report["formula"], "3db + 1ds");
}

#[test]
fn roll_without_pushes_allowed() {
    let report = roll_json(&["--game", "vae", "s=3", "--push", "2", "--max-push", "0"]);
    assert_eq!(report["stats"]["push_count"], 0);
    assert_eq!(report["stats"]["pushable"], false);
}

#[test]
fn roll_rejects_malformed_dice() {
    yz().args(["roll", "--game", "myz", "base3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KIND=N"));
}

#[test]
fn roll_rejects_die_from_another_game() {
    yz().args(["roll", "--game", "alien", "base=2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown die type"));
}

#[test]
fn roll_requires_dice() {
    yz().args(["roll", "--game", "myz"]).assert().failure();
}

#[test]
fn verbose_logs_to_stderr() {
    yz().args(["roll", "-v", "--game", "br", "brD10=1", "brD6=1", "--modify", "1", "--seed", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1d10 + 2d6"))
        .stderr(predicate::str::contains("modifier"));
}
