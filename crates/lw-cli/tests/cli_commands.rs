//! Integration tests for the `lw` CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A temp directory with a character file and a `tables/` directory.
///
/// Every table has a single row so draws are deterministic.
fn test_setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("anna.json"),
        r#"{"name": "Anna", "attributes": {"Inventory_Money": "10"}}"#,
    )
    .unwrap();

    let tables = dir.path().join("tables");
    fs::create_dir(&tables).unwrap();
    write_table(
        &tables,
        "origins",
        "Origins",
        r#"{"choice":{"title":"Farm Child","text":"Goats everywhere."},
            "rewards":[{"weight":1,"changes":[{"type":"money","amount":5},{"type":"body"}],
                        "next":{"tableRef":"youth"}}]}"#,
    );
    write_table(
        &tables,
        "youth",
        "Youth",
        r#"{"choice":{"title":"Soldier"},
            "rewards":[{"weight":1,"changes":[{"type":"stat","characteristic":"Strength","steps":4}]}]}"#,
    );
    write_table(&tables, "scars", "Scars", "Burnt hand");
    dir
}

fn write_table(dir: &Path, id: &str, name: &str, description: &str) {
    let table = serde_json::json!({
        "id": id,
        "name": name,
        "rows": [{"id": "1", "name": description, "description": description}]
    });
    fs::write(dir.join(format!("{id}.json")), table.to_string()).unwrap();
}

fn lw() -> Command {
    Command::cargo_bin("lw").unwrap()
}

fn session_args(dir: &TempDir) -> Vec<String> {
    vec![
        "-c".to_string(),
        dir.path().join("anna.json").display().to_string(),
        "-t".to_string(),
        dir.path().join("tables").display().to_string(),
        "--seed".to_string(),
        "3".to_string(),
    ]
}

fn run_lw(dir: &TempDir, command: &[&str]) -> assert_cmd::assert::Assert {
    lw().args(command).args(session_args(dir)).assert()
}

fn start(dir: &TempDir) {
    run_lw(
        dir,
        &["start", "--table", "origins", "--choices", "1", "--rolls", "3", "--body-table", "scars"],
    )
    .success();
}

fn character(dir: &TempDir) -> serde_json::Value {
    let text = fs::read_to_string(dir.path().join("anna.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

// ---------------------------------------------------------------------------
// start / show
// ---------------------------------------------------------------------------

#[test]
fn start_offers_cards() {
    let dir = test_setup();
    run_lw(
        &dir,
        &["start", "--table", "origins", "--choices", "1", "--rolls", "3"],
    )
    .success()
    .stdout(
        predicate::str::contains("Started")
            .and(predicate::str::contains("Farm Child"))
            .and(predicate::str::contains("Rolls left:")),
    );

    let c = character(&dir);
    assert_eq!(c["flags"]["chargen"]["setup"]["tableRef"], "origins");
    assert_eq!(c["flags"]["chargen"]["run"]["remainingGlobalRolls"], 3);
}

#[test]
fn start_with_unknown_table_fails() {
    let dir = test_setup();
    run_lw(&dir, &["start", "--table", "nowhere"])
        .failure()
        .stderr(predicate::str::contains("roll table not found: nowhere"));
}

#[test]
fn start_setup_only() {
    let dir = test_setup();
    run_lw(&dir, &["start", "--table", "origins", "--setup-only"])
        .success()
        .stdout(predicate::str::contains("Setup saved"));
    assert!(character(&dir)["flags"]["chargen"]["run"].is_null());

    run_lw(&dir, &["show"])
        .success()
        .stdout(predicate::str::contains("No run in progress"));
}

#[test]
fn show_without_run() {
    let dir = test_setup();
    run_lw(&dir, &["show"])
        .success()
        .stdout(predicate::str::contains("No character generation in progress"));
}

// ---------------------------------------------------------------------------
// choose
// ---------------------------------------------------------------------------

#[test]
fn choose_advances_then_finishes() {
    let dir = test_setup();
    start(&dir);

    run_lw(&dir, &["choose", "1"])
        .success()
        .stdout(predicate::str::contains("youth").and(predicate::str::contains("Soldier")));

    let c = character(&dir);
    assert_eq!(c["attributes"]["Inventory_Money"], "15");
    assert_eq!(c["attributes"]["BodilyChanges"], "Burnt hand");

    run_lw(&dir, &["choose", "1"])
        .success()
        .stdout(
            predicate::str::contains("Character Generation Finished")
                .and(predicate::str::contains("Improved Strength (1d6+0 → 2d6+0)"))
                .and(predicate::str::contains("Character generation finished.")),
        );

    let c = character(&dir);
    assert_eq!(c["attributes"]["Stats_StrengthDice"], "2");
    assert_eq!(c["flags"]["chargen"]["run"]["status"], "finished");
}

#[test]
fn choose_out_of_range_finishes() {
    let dir = test_setup();
    start(&dir);
    run_lw(&dir, &["choose", "7", "--format", "markdown"])
        .success()
        .stdout(predicate::str::contains("# Character Generation Finished"));
}

#[test]
fn choose_without_run_fails() {
    let dir = test_setup();
    run_lw(&dir, &["choose", "1"])
        .failure()
        .stderr(predicate::str::contains("no character generation run in progress"));
}

// ---------------------------------------------------------------------------
// reroll / finish / reset
// ---------------------------------------------------------------------------

#[test]
fn reroll_keeps_budget() {
    let dir = test_setup();
    start(&dir);
    run_lw(&dir, &["reroll"])
        .success()
        .stdout(predicate::str::contains("Rerolled"));
    assert_eq!(
        character(&dir)["flags"]["chargen"]["run"]["remainingGlobalRolls"],
        3
    );
}

#[test]
fn finish_prints_summary() {
    let dir = test_setup();
    start(&dir);
    run_lw(&dir, &["choose", "1"]).success();
    run_lw(&dir, &["finish"])
        .success()
        .stdout(
            predicate::str::contains("Anna biography:")
                .and(predicate::str::contains("Chose: Farm Child"))
                .and(predicate::str::contains("Received 5 silver")),
        );

    run_lw(&dir, &["reroll"])
        .failure()
        .stderr(predicate::str::contains("already finished"));
}

#[test]
fn reset_restarts() {
    let dir = test_setup();
    start(&dir);
    run_lw(&dir, &["choose", "1"]).success();
    run_lw(&dir, &["reset"])
        .success()
        .stdout(
            predicate::str::contains("Character generation reset.")
                .and(predicate::str::contains("Farm Child")),
        );

    let run = &character(&dir)["flags"]["chargen"]["run"];
    assert_eq!(run["remainingGlobalRolls"], 3);
    assert_eq!(run["currentTableRef"], "origins");
}

// ---------------------------------------------------------------------------
// tables / decode
// ---------------------------------------------------------------------------

#[test]
fn tables_lists_directory() {
    let dir = test_setup();
    lw().args(["tables", "-t", dir.path().join("tables").to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Origins")
                .and(predicate::str::contains("Scars"))
                .and(predicate::str::contains("3 tables")),
        );
}

#[test]
fn decode_html_payload() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("row.html");
    fs::write(
        &file,
        "<p>{&quot;choice&quot;:{&quot;title&quot;:&quot;Born Poor&quot;},&quot;rewards&quot;:[{&quot;weight&quot;:1,&quot;changes&quot;:[{&quot;type&quot;:&quot;money&quot;,&quot;amount&quot;:10}]}]}</p>",
    )
    .unwrap();
    lw().args(["decode", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"title\": \"Born Poor\"")
                .and(predicate::str::contains("\"type\": \"money\"")),
        );
}

#[test]
fn decode_reports_table_and_preview() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("row.json");
    fs::write(&file, r#"{"choice":{"title":"A"},"rewards":[]}"#).unwrap();
    lw().args(["decode", file.to_str().unwrap(), "-n", "Origins"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("invalid JSON in Origins result")
                .and(predicate::str::contains("Missing rewards[]")),
        );
}
