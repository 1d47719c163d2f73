use serde::Serialize;

use crate::model::board::Board;
use crate::model::item::{ActionItem, QuickWinIssue, SourceCategory};
use crate::ops::classify::{stale_severity, StaleSeverity};
use crate::ops::filter_ops::ActionFilterOptions;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ItemRowJson<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub repo: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub priority: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_old: Option<i64>,
    pub severity: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
}

#[derive(Serialize)]
pub struct WinRowJson<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub repository: &'a str,
    pub difficulty: &'a str,
    pub stars: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<&'a str>,
    pub category: &'a str,
    pub url: &'a str,
}

#[derive(Serialize)]
pub struct FeedStatusJson {
    pub feed: &'static str,
    pub fresh: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_refresh: Option<String>,
}

fn severity_str(severity: StaleSeverity) -> &'static str {
    match severity {
        StaleSeverity::Normal => "normal",
        StaleSeverity::Warning => "warning",
        StaleSeverity::Critical => "critical",
    }
}

fn severity_marker(severity: StaleSeverity) -> &'static str {
    match severity {
        StaleSeverity::Normal => " ",
        StaleSeverity::Warning => "~",
        StaleSeverity::Critical => "!",
    }
}

pub fn item_row<'a>(item: &'a ActionItem) -> ItemRowJson<'a> {
    ItemRowJson {
        id: &item.id,
        title: &item.title,
        repo: &item.repo,
        kind: item.kind.as_str(),
        priority: item.priority.as_str(),
        days_old: item.days_old,
        severity: severity_str(stale_severity(item.days_old)),
        url: item.url.as_deref(),
    }
}

pub fn win_row<'a>(issue: &'a QuickWinIssue, category: SourceCategory) -> WinRowJson<'a> {
    WinRowJson {
        id: &issue.id,
        title: &issue.title,
        repository: &issue.repository,
        difficulty: issue.difficulty.as_str(),
        stars: issue.stars,
        language: issue.language.as_deref(),
        category: category.as_str(),
        url: &issue.url,
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

pub fn print_board(board: &Board) {
    for column in board.columns.values() {
        println!("{} ({})", column.title, column.tasks.len());
        for task in &column.tasks {
            let labels = if task.labels.is_empty() {
                String::new()
            } else {
                format!(" [{}]", task.labels.join(", "))
            };
            println!(
                "  {}  {} ({}){}",
                task.id,
                task.title,
                task.priority.as_str(),
                labels
            );
        }
        println!();
    }
    if !board.archive.is_empty() {
        println!("Archive: {} task(s), see `tg archived`", board.archive.len());
    }
}

pub fn print_archived(board: &Board) {
    if board.archive.is_empty() {
        println!("no archived tasks");
        return;
    }
    for task in &board.archive {
        let stamp = task
            .archived_at
            .map(|t| t.format(" archived %Y-%m-%d").to_string())
            .unwrap_or_default();
        println!("  {}  {}{}", task.id, task.title, stamp);
    }
}

pub fn print_items(items: &[&ActionItem]) {
    for item in items {
        let age = item
            .days_old
            .map(|d| format!("{}d", d))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{} {:>4}  {}  {} ({}, {})",
            severity_marker(stale_severity(item.days_old)),
            age,
            item.id,
            item.title,
            item.repo,
            item.priority.as_str(),
        );
    }
    println!("{} item(s)", items.len());
}

pub fn print_filter_options(options: &ActionFilterOptions) {
    println!("assignees:    {}", options.assignees.join(", "));
    println!("repositories: {}", options.repositories.join(", "));
    let labels: Vec<&str> = options.labels.iter().map(|l| l.name.as_str()).collect();
    println!("labels:       {}", labels.join(", "));
    println!("languages:    {}", options.languages.join(", "));
}

pub fn print_wins(rows: &[WinRowJson<'_>]) {
    for row in rows {
        println!(
            "  {:>6}*  {}  {} ({}, {})",
            row.stars,
            row.id,
            row.title,
            row.repository,
            row.difficulty,
        );
    }
    println!("{} issue(s)", rows.len());
}

pub fn print_status(rows: &[FeedStatusJson]) {
    for row in rows {
        let state = if row.fresh { "fresh" } else { "stale" };
        let last = row.last_refresh.as_deref().unwrap_or("never fetched");
        println!("  {:<12} {:<6} {}", row.feed, state, last);
    }
}
