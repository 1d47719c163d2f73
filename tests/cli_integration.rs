//! Integration tests for the `tg` CLI.
//!
//! Each test creates a temp directory, runs `tg` as a subprocess, and
//! verifies stdout and/or file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;

/// Get the path to the built `tg` binary.
fn tg_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tg");
    path
}

fn tg(dir: &Path, args: &[&str]) -> Output {
    Command::new(tg_bin())
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run tg")
}

fn tg_ok(dir: &Path, args: &[&str]) -> String {
    let out = tg(dir, args);
    assert!(
        out.status.success(),
        "tg {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8(out.stdout).unwrap()
}

fn tg_json(dir: &Path, args: &[&str]) -> Value {
    let mut full = args.to_vec();
    full.push("--json");
    serde_json::from_str(&tg_ok(dir, &full)).expect("invalid JSON output")
}

fn write_feeds(dir: &Path) {
    fs::write(
        dir.join("feeds.json"),
        r#"{
  "assigned": [
    {
      "id": 101,
      "title": "Fix login bug",
      "url": "https://github.com/acme/widgets/issues/101",
      "repo": "acme/widgets",
      "type": "issue",
      "author": { "login": "octocat", "avatarUrl": "" },
      "labels": [{ "name": "bug", "color": "d73a4a" }],
      "priority": "high",
      "updatedAt": "2020-01-01T00:00:00Z"
    },
    {
      "id": "PR_55",
      "title": "Refactor parser",
      "url": "https://github.com/acme/widgets/pull/55",
      "repo": "acme/widgets",
      "type": "pullRequest",
      "author": { "login": "hubot", "avatarUrl": "" },
      "priority": "medium",
      "updatedAt": "2020-01-01T00:00:00Z",
      "mergeable": "MERGEABLE"
    }
  ],
  "mentions": [
    {
      "id": 202,
      "title": "Thoughts on this design?",
      "repo": "acme/gadgets",
      "type": "issue",
      "author": { "login": "octocat", "avatarUrl": "" },
      "priority": "low",
      "updatedAt": "2020-01-01T00:00:00Z"
    }
  ],
  "stale": [
    {
      "id": 303,
      "title": "Ancient bug nobody fixed",
      "repo": "acme/widgets",
      "type": "issue",
      "author": { "login": "hubot", "avatarUrl": "" },
      "priority": "urgent",
      "updatedAt": "2020-01-01T00:00:00Z"
    }
  ],
  "goodIssues": [
    {
      "id": 401,
      "title": "Add missing docs",
      "repository": "acme/widgets",
      "url": "https://github.com/acme/widgets/issues/401",
      "difficulty": "easy",
      "language": "Rust",
      "stars": 1500,
      "labels": ["good first issue"],
      "priority": "low"
    }
  ],
  "easyFixes": [
    {
      "id": 402,
      "title": "Typo in README",
      "repository": "acme/tools",
      "url": "https://github.com/acme/tools/issues/402",
      "difficulty": "easy",
      "stars": 80,
      "labels": ["help wanted"],
      "priority": "low"
    }
  ]
}"#,
    )
    .unwrap();
}

// ============================================================================
// init + board lifecycle
// ============================================================================

#[test]
fn init_creates_data_dir() {
    let dir = tempfile::TempDir::new().unwrap();
    tg_ok(dir.path(), &["init"]);
    assert!(dir.path().join(".triage/triage.toml").exists());
    assert!(dir.path().join(".triage/board.json").exists());

    // reinit without --force refuses
    let out = tg(dir.path(), &["init"]);
    assert!(!out.status.success());
    tg_ok(dir.path(), &["init", "--force"]);
}

#[test]
fn add_and_show_board() {
    let dir = tempfile::TempDir::new().unwrap();
    tg_ok(dir.path(), &["init"]);
    let out = tg_ok(dir.path(), &["add", "Write docs", "--priority", "high"]);
    assert!(out.contains("added task-001"));

    let board = tg_json(dir.path(), &["board"]);
    let todo = &board["columns"]["todo"]["tasks"];
    assert_eq!(todo[0]["title"], "Write docs");
    assert_eq!(todo[0]["priority"], "high");
    assert_eq!(todo[0]["type"], "custom");
}

#[test]
fn move_archive_restore_cycle() {
    let dir = tempfile::TempDir::new().unwrap();
    tg_ok(dir.path(), &["init"]);
    tg_ok(dir.path(), &["add", "Task one"]);
    tg_ok(dir.path(), &["mv", "task-001", "done"]);

    let board = tg_json(dir.path(), &["board"]);
    assert_eq!(board["columns"]["done"]["tasks"][0]["id"], "task-001");

    tg_ok(dir.path(), &["archive", "task-001"]);
    let archived = tg_json(dir.path(), &["archived"]);
    assert_eq!(archived.as_array().unwrap().len(), 1);
    assert!(archived[0]["archivedAt"].is_string());

    // restore lands in todo, not the original column
    tg_ok(dir.path(), &["restore", "task-001"]);
    let board = tg_json(dir.path(), &["board"]);
    assert_eq!(board["columns"]["todo"]["tasks"][0]["id"], "task-001");
    assert!(board["columns"]["todo"]["tasks"][0]["archivedAt"].is_null());
    assert_eq!(tg_json(dir.path(), &["archived"]).as_array().unwrap().len(), 0);
}

#[test]
fn missing_ids_are_noops() {
    let dir = tempfile::TempDir::new().unwrap();
    tg_ok(dir.path(), &["init"]);
    // none of these should fail the process
    tg_ok(dir.path(), &["mv", "task-404", "done"]);
    tg_ok(dir.path(), &["archive", "task-404"]);
    tg_ok(dir.path(), &["restore", "task-404"]);
    tg_ok(dir.path(), &["purge", "task-404"]);
}

#[test]
fn clear_archive_requires_confirmation() {
    let dir = tempfile::TempDir::new().unwrap();
    tg_ok(dir.path(), &["init"]);
    tg_ok(dir.path(), &["add", "A"]);
    tg_ok(dir.path(), &["add", "B"]);
    tg_ok(dir.path(), &["archive", "task-001"]);
    tg_ok(dir.path(), &["archive", "task-002"]);
    tg_ok(dir.path(), &["purge", "task-001"]);

    let out = tg(dir.path(), &["clear-archive"]);
    assert!(!out.status.success());
    assert_eq!(tg_json(dir.path(), &["archived"]).as_array().unwrap().len(), 1);

    tg_ok(dir.path(), &["clear-archive", "--yes"]);
    assert_eq!(tg_json(dir.path(), &["archived"]).as_array().unwrap().len(), 0);
}

// ============================================================================
// feed classification, filtering, import
// ============================================================================

#[test]
fn items_lists_and_filters() {
    let dir = tempfile::TempDir::new().unwrap();
    write_feeds(dir.path());

    let all = tg_json(dir.path(), &["items", "feeds.json"]);
    assert_eq!(all.as_array().unwrap().len(), 4);
    // fixture dates are years old, every row is critical
    assert_eq!(all[0]["severity"], "critical");
    assert!(all[0]["days_old"].as_i64().unwrap() > 14);

    let stale = tg_json(dir.path(), &["items", "feeds.json", "--tab", "stale"]);
    assert_eq!(stale.as_array().unwrap().len(), 1);
    assert_eq!(stale[0]["id"], "303");

    let octocat = tg_json(dir.path(), &["items", "feeds.json", "--assignee", "octocat"]);
    assert_eq!(octocat.as_array().unwrap().len(), 2);

    let prs = tg_json(dir.path(), &["items", "feeds.json", "--type", "pullRequest"]);
    assert_eq!(prs.as_array().unwrap().len(), 1);
    assert_eq!(prs[0]["id"], "PR_55");

    // --query pairs go through the same codec
    let via_query = tg_json(
        dir.path(),
        &["items", "feeds.json", "--query", "repository=acme/gadgets"],
    );
    assert_eq!(via_query.as_array().unwrap().len(), 1);
    assert_eq!(via_query[0]["id"], "202");

    // unknown enum tokens are coerced away, not errors
    let coerced = tg_json(
        dir.path(),
        &["items", "feeds.json", "--query", "type=banana", "--query", "staleness=soon"],
    );
    assert_eq!(coerced.as_array().unwrap().len(), 4);
}

#[test]
fn items_filter_options_projection() {
    let dir = tempfile::TempDir::new().unwrap();
    write_feeds(dir.path());

    let options = tg_json(dir.path(), &["items", "feeds.json", "--options"]);
    assert_eq!(options["assignees"], serde_json::json!(["hubot", "octocat"]));
    assert_eq!(
        options["repositories"],
        serde_json::json!(["acme/gadgets", "acme/widgets"])
    );
}

#[test]
fn wins_lists_and_filters() {
    let dir = tempfile::TempDir::new().unwrap();
    write_feeds(dir.path());

    let all = tg_json(dir.path(), &["wins", "feeds.json"]);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let starred = tg_json(dir.path(), &["wins", "feeds.json", "--min-stars", "500"]);
    assert_eq!(starred.as_array().unwrap().len(), 1);
    assert_eq!(starred[0]["id"], "401");

    let fixes = tg_json(dir.path(), &["wins", "feeds.json", "--category", "easy-fixes"]);
    assert_eq!(fixes.as_array().unwrap().len(), 1);
    assert_eq!(fixes[0]["id"], "402");
}

#[test]
fn import_action_items_onto_board() {
    let dir = tempfile::TempDir::new().unwrap();
    tg_ok(dir.path(), &["init"]);
    write_feeds(dir.path());

    let out = tg_ok(dir.path(), &["import", "feeds.json", "--id", "101", "--id", "999"]);
    assert!(out.contains("imported 1 task(s), skipped 1"));

    let board = tg_json(dir.path(), &["board"]);
    let task = &board["columns"]["todo"]["tasks"][0];
    assert_eq!(task["title"], "Fix login bug");
    assert_eq!(task["type"], "github-issue");
    assert_eq!(task["description"], "acme/widgets#101");
    assert_eq!(task["labels"], serde_json::json!(["bug"]));
}

#[test]
fn import_quick_wins_onto_board() {
    let dir = tempfile::TempDir::new().unwrap();
    tg_ok(dir.path(), &["init"]);
    write_feeds(dir.path());

    tg_ok(dir.path(), &["import", "feeds.json", "--wins", "--column", "in-progress"]);
    let board = tg_json(dir.path(), &["board"]);
    let tasks = board["columns"]["in-progress"]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["type"], "github-issue");
}

#[test]
fn status_reflects_feed_freshness() {
    let dir = tempfile::TempDir::new().unwrap();
    tg_ok(dir.path(), &["init"]);
    write_feeds(dir.path());

    // before any listing, every feed is stale
    let rows = tg_json(dir.path(), &["status"]);
    assert!(rows.as_array().unwrap().iter().all(|r| r["fresh"] == false));

    // listing the stale tab refreshes only that feed
    tg_ok(dir.path(), &["items", "feeds.json", "--tab", "stale"]);
    let rows = tg_json(dir.path(), &["status"]);
    for row in rows.as_array().unwrap() {
        let expect_fresh = row["feed"] == "stale";
        assert_eq!(row["fresh"].as_bool().unwrap(), expect_fresh, "{}", row["feed"]);
    }
}
