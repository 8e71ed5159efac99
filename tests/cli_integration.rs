//! Integration tests for the `pg` CLI.
//!
//! Each test writes a document into a temp directory, runs `pg` as a
//! subprocess, and verifies stdout and/or file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Get the path to the built `pg` binary.
fn pg_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("pg");
    path
}

/// Two pages and two assets. `logo` (image) comes first; `body` (text) has
/// an override on p1.
fn create_document(dir: &Path) -> PathBuf {
    let path = dir.join("doc.json");
    fs::write(
        &path,
        r#"{
  "pages": [
    {
      "id": "p1",
      "title": "Intro",
      "instances": {
        "p1-logo": {"id": "p1-logo", "asset_id": "logo", "overrides": {"type": "image"}},
        "p1-body": {"id": "p1-body", "asset_id": "body", "overrides": {"type": "text", "text": {"en": "Hi"}}}
      }
    },
    {
      "id": "p2",
      "instances": {}
    }
  ],
  "assets": {
    "logo": {"id": "logo", "name": "Logo", "defaults": {"type": "image", "path": "logo.svg"}},
    "body": {"id": "body", "name": "Body", "defaults": {"type": "text", "text": {"en": "Body", "de": "Inhalt"}}}
  }
}
"#,
    )
    .unwrap();
    path
}

fn run_pg(args: &[&str]) -> Output {
    Command::new(pg_bin())
        .args(args)
        .output()
        .expect("failed to run pg")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_prints_grid() {
    let tmp = TempDir::new().unwrap();
    let doc = create_document(tmp.path());

    let output = run_pg(&["show", path_str(&doc)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("page"));
    assert!(lines[0].contains("Logo"));
    assert!(lines[0].find("Logo") < lines[0].find("Body"));
    assert!(lines[1].starts_with("Intro"));
    assert!(lines[1].contains("*Hi"));
    assert!(lines[2].starts_with("p2"));
    assert!(lines[2].contains('\u{00B7}'));
}

#[test]
fn show_json_lists_columns_and_cells() {
    let tmp = TempDir::new().unwrap();
    let doc = create_document(tmp.path());

    let output = run_pg(&["show", "--json", path_str(&doc)]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();

    assert_eq!(json["columns"][0]["asset_id"], "logo");
    assert_eq!(json["columns"][1]["kind"], "text");
    assert_eq!(json["rows"][0]["cells"][1]["instance_id"], "p1-body");
    assert_eq!(json["rows"][0]["cells"][1]["overridden"], true);
    assert_eq!(json["rows"][0]["cells"][0]["overridden"], false);
    assert_eq!(json["rows"][1]["cells"][0].get("instance_id"), None);
}

#[test]
fn config_next_to_document_selects_language() {
    let tmp = TempDir::new().unwrap();
    let doc = create_document(tmp.path());
    fs::write(tmp.path().join("pagegrid.toml"), "[editor]\nlanguage = \"de\"\n").unwrap();

    // p1 only overrides English, so German falls back to the default
    let output = run_pg(&["replay", path_str(&doc), "click:p1:body", "enter", "type:!", "ctrl+enter"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("text[de] = \"Inhalt!\""));
}

#[test]
fn missing_document_fails() {
    let tmp = TempDir::new().unwrap();
    let output = run_pg(&["show", path_str(&tmp.path().join("nope.json"))]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("could not read"));
}

// ---------------------------------------------------------------------------
// replay
// ---------------------------------------------------------------------------

#[test]
fn replay_inline_edit_writes_document() {
    let tmp = TempDir::new().unwrap();
    let doc = create_document(tmp.path());

    let output = run_pg(&[
        "replay",
        "--write",
        path_str(&doc),
        "click:p1:body",
        "enter",
        "type:!",
        "ctrl+enter",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("intents:"));
    assert!(out.contains("update p1/p1-body: text[en] = \"Hi!\""));
    assert!(out.contains("cursor: p1:body"));
    assert!(out.contains("wrote"));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&doc).unwrap()).unwrap();
    assert_eq!(
        saved["pages"][0]["instances"]["p1-body"]["overrides"]["text"]["en"],
        "Hi!"
    );
}

#[test]
fn replay_drag_reports_reorder_without_writing() {
    let tmp = TempDir::new().unwrap();
    let doc = create_document(tmp.path());
    let before = fs::read_to_string(&doc).unwrap();

    let output = run_pg(&["replay", path_str(&doc), "drag:logo:1"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("begin pointer capture"));
    assert!(out.contains("reorder [body, logo]"));
    assert!(out.contains("end pointer capture"));
    assert!(!out.contains("wrote"));
    assert_eq!(fs::read_to_string(&doc).unwrap(), before);
}

#[test]
fn replay_paste_mismatch_reports_error_status() {
    let tmp = TempDir::new().unwrap();
    let doc = create_document(tmp.path());

    let output = run_pg(&[
        "replay",
        path_str(&doc),
        "click:p1:logo",
        "ctrl+c",
        "click:p1:body",
        "ctrl+v",
    ]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("no intents"));
    assert!(out.contains("status (error): cannot paste a image cell onto a text cell"));
}

#[test]
fn replay_json_report() {
    let tmp = TempDir::new().unwrap();
    let doc = create_document(tmp.path());

    let output = run_pg(&["replay", "--json", path_str(&doc), "click:p2:preview", "right", "space"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["intents"][0]["intent"], "toggle_asset_instance");
    assert_eq!(json["intents"][0]["asset_id"], "logo");
    assert_eq!(json["cursor"]["page_id"], "p2");
    assert_eq!(json["document_changed"], true);
}

#[test]
fn replay_rejects_unknown_event() {
    let tmp = TempDir::new().unwrap();
    let doc = create_document(tmp.path());

    let output = run_pg(&["replay", path_str(&doc), "jump"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("jump"));
}

#[test]
fn replay_saves_cursor_to_state() {
    let tmp = TempDir::new().unwrap();
    let doc = create_document(tmp.path());
    let state = tmp.path().join("state.json");

    let output = run_pg(&[
        "replay",
        "--save-state",
        "--state",
        path_str(&state),
        path_str(&doc),
        "click:p1:logo",
        "down",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&state).unwrap()).unwrap();
    assert_eq!(saved["cursor"]["page_id"], "p2");

    // The next replay starts where the last one stopped
    let output = run_pg(&["replay", "--state", path_str(&state), path_str(&doc), "up"]);
    assert!(stdout(&output).contains("cursor: p1:logo"));
}

// ---------------------------------------------------------------------------
// hide / unhide
// ---------------------------------------------------------------------------

#[test]
fn hide_and_unhide_column() {
    let tmp = TempDir::new().unwrap();
    let doc = create_document(tmp.path());
    let state = tmp.path().join("state.json");

    let output = run_pg(&["hide", path_str(&doc), "--column", "logo", "--state", path_str(&state)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("hidden columns: logo"));
    assert!(state.exists());

    let output = run_pg(&["show", path_str(&doc), "--state", path_str(&state)]);
    let out = stdout(&output);
    assert!(!out.lines().next().unwrap().contains("Logo"));
    assert!(out.contains("hidden columns: logo"));

    let output = run_pg(&["unhide", path_str(&doc), "--all", "--state", path_str(&state)]);
    assert!(output.status.success());
    assert!(!stdout(&output).contains("hidden columns"));

    let output = run_pg(&["unhide", path_str(&doc), "--all", "--state", path_str(&state)]);
    assert!(stdout(&output).contains("nothing to change"));
}

#[test]
fn hide_last_visible_column_fails() {
    let tmp = TempDir::new().unwrap();
    let doc = create_document(tmp.path());
    let state = tmp.path().join("state.json");

    run_pg(&["hide", path_str(&doc), "--column", "logo", "--state", path_str(&state)]);
    let output = run_pg(&["hide", path_str(&doc), "--column", "body", "--state", path_str(&state)]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("cannot hide the last visible column"));
}

#[test]
fn hide_unknown_row_fails() {
    let tmp = TempDir::new().unwrap();
    let doc = create_document(tmp.path());
    let state = tmp.path().join("state.json");

    let output = run_pg(&["hide", path_str(&doc), "--row", "p9", "--state", path_str(&state)]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("page not found: p9"));
    assert!(!state.exists());
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_valid_document() {
    let tmp = TempDir::new().unwrap();
    let doc = create_document(tmp.path());

    let output = run_pg(&["check", path_str(&doc)]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("\u{2713} document is valid"));
}

#[test]
fn check_dangling_asset_exits_with_error() {
    let tmp = TempDir::new().unwrap();
    let doc = tmp.path().join("doc.json");
    fs::write(
        &doc,
        r#"{
  "pages": [
    {"id": "p1", "instances": {"i1": {"id": "i1", "asset_id": "gone", "overrides": {"type": "image"}}}}
  ],
  "assets": {}
}"#,
    )
    .unwrap();

    let output = run_pg(&["check", path_str(&doc)]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("[p1] i1 references missing asset: gone"));
    assert!(stderr(&output).contains("1 integrity error(s)"));
}
