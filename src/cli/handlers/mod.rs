mod init;
pub use init::cmd_init;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{TimeDelta, Utc};

use crate::cli::commands::*;
use crate::cli::output::{self, FeedStatusJson};
use crate::io::board_io::{BoardRepository, JsonBoardRepository};
use crate::io::config_io::{self, BOARD_FILE};
use crate::io::items_io::{self, FeedExport};
use crate::io::state;
use crate::model::board::{Board, COLUMN_TODO};
use crate::model::item::{ActionItem, Priority, QuickWinIssue, SourceCategory};
use crate::ops::board_ops::{self, NewTask};
use crate::ops::classify::{classify, Tab};
use crate::ops::filter_ops::{
    action_filter_options, action_item_matches, quick_win_matches,
};
use crate::ops::refresh::{feeds_for_tab, Feed, FreshnessTracker};
use crate::query::{decode_action_filters, decode_quick_wins_filters, QueryParams};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    let Cli { command, json, dir } = cli;
    let dir = dir.as_deref();

    match command {
        Commands::Init(args) => cmd_init(args, dir),
        Commands::Board => cmd_board(json, dir),
        Commands::Add(args) => cmd_add(args, dir),
        Commands::Mv(args) => cmd_mv(args, dir),
        Commands::Archive(args) => cmd_archive(args, dir),
        Commands::Restore(args) => cmd_restore(args, dir),
        Commands::Purge(args) => cmd_purge(args, dir),
        Commands::Archived => cmd_archived(json, dir),
        Commands::ClearArchive(args) => cmd_clear_archive(args, dir),
        Commands::Items(args) => cmd_items(args, json, dir),
        Commands::Wins(args) => cmd_wins(args, json, dir),
        Commands::Import(args) => cmd_import(args, dir),
        Commands::Status => cmd_status(json, dir),
    }
}

/// Locate the .triage/ data directory, honoring the -C override.
fn resolve_dir(dir_override: Option<&str>) -> Result<PathBuf, Box<dyn Error>> {
    let start = match dir_override {
        Some(dir) => fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
        None => std::env::current_dir()?,
    };
    Ok(config_io::discover_dir(&start)?)
}

fn board_repo(triage_dir: &Path) -> JsonBoardRepository {
    JsonBoardRepository::new(&triage_dir.join(BOARD_FILE))
}

// ---------------------------------------------------------------------------
// Board commands
// ---------------------------------------------------------------------------

fn cmd_board(json: bool, dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    let triage_dir = resolve_dir(dir)?;
    let board = board_repo(&triage_dir).load()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        output::print_board(&board);
    }
    Ok(())
}

fn cmd_add(args: AddArgs, dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    let triage_dir = resolve_dir(dir)?;
    let repo = board_repo(&triage_dir);
    let mut board = repo.load()?;

    // clap restricts --priority to the valid tokens
    let priority = Priority::parse(&args.priority).unwrap_or(Priority::Medium);
    let new = NewTask {
        title: args.title,
        description: args.desc,
        priority,
        column: args.column,
        ..NewTask::custom("")
    };
    let id = board_ops::add_task(&mut board, new);
    repo.save(&board)?;
    println!("added {}", id);
    Ok(())
}

fn cmd_mv(args: MvArgs, dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    let triage_dir = resolve_dir(dir)?;
    let repo = board_repo(&triage_dir);
    let mut board = repo.load()?;
    if board_ops::move_task(&mut board, &args.id, &args.column) {
        repo.save(&board)?;
        println!("moved {} to {}", args.id, args.column);
    } else {
        println!("{} not on the board, nothing to do", args.id);
    }
    Ok(())
}

fn cmd_archive(args: IdArgs, dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    let triage_dir = resolve_dir(dir)?;
    let repo = board_repo(&triage_dir);
    let mut board = repo.load()?;
    if board_ops::archive_task(&mut board, &args.id, Utc::now()) {
        repo.save(&board)?;
        println!("archived {}", args.id);
    } else {
        println!("{} not on the board, nothing to do", args.id);
    }
    Ok(())
}

fn cmd_restore(args: IdArgs, dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    let triage_dir = resolve_dir(dir)?;
    let config = config_io::read_config(&triage_dir)?;
    let repo = board_repo(&triage_dir);
    let mut board = repo.load()?;
    if board_ops::restore_task(&mut board, &args.id, &config.board.restore_column) {
        repo.save(&board)?;
        println!("restored {} to {}", args.id, config.board.restore_column);
    } else {
        println!("{} not in the archive, nothing to do", args.id);
    }
    Ok(())
}

fn cmd_purge(args: IdArgs, dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    let triage_dir = resolve_dir(dir)?;
    let repo = board_repo(&triage_dir);
    let mut board = repo.load()?;
    if board_ops::delete_archived_task(&mut board, &args.id) {
        repo.save(&board)?;
        println!("deleted {}", args.id);
    } else {
        println!("{} not in the archive, nothing to do", args.id);
    }
    Ok(())
}

fn cmd_archived(json: bool, dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    let triage_dir = resolve_dir(dir)?;
    let board = board_repo(&triage_dir).load()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&board.archive)?);
    } else {
        output::print_archived(&board);
    }
    Ok(())
}

fn cmd_clear_archive(args: ClearArchiveArgs, dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    let triage_dir = resolve_dir(dir)?;
    let repo = board_repo(&triage_dir);
    let mut board = repo.load()?;
    if !args.yes {
        return Err(format!(
            "refusing to delete {} archived task(s) without --yes",
            board.archive.len()
        )
        .into());
    }
    let count = board_ops::clear_archive(&mut board);
    repo.save(&board)?;
    println!("deleted {} archived task(s)", count);
    Ok(())
}

// ---------------------------------------------------------------------------
// Feed commands
// ---------------------------------------------------------------------------

/// Assemble a query-parameter map from `--query k=v` pairs plus the
/// dedicated filter flags (flags win), then let the codec decode it.
fn params_from(pairs: &[String]) -> Result<QueryParams, Box<dyn Error>> {
    let mut params = QueryParams::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(format!("invalid --query pair '{}', expected key=value", pair).into());
        };
        params.insert(key.to_string(), value.to_string());
    }
    Ok(params)
}

fn merge_list(params: &mut QueryParams, key: &str, values: &[String]) {
    if !values.is_empty() {
        params.insert(key.to_string(), values.join(","));
    }
}

fn cmd_items(args: ItemsArgs, json: bool, dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    let export = items_io::read_feed_export(Path::new(&args.file))?;
    let now = Utc::now();
    let classified = classify(export.assigned, export.mentions, export.stale, now);

    let mut params = params_from(&args.query)?;
    merge_list(&mut params, "assignee", &args.assignee);
    merge_list(&mut params, "repository", &args.repo);
    merge_list(&mut params, "labels", &args.label);
    merge_list(&mut params, "type", &args.types);
    merge_list(&mut params, "language", &args.language);
    if let Some(staleness) = args.staleness {
        params.insert("staleness".to_string(), staleness.to_string());
    }
    let filters = decode_action_filters(&params);

    // tab is externally owned: a --query tab=... pair wins over the flag
    let tab_token = params
        .get("tab")
        .cloned()
        .unwrap_or_else(|| args.tab.clone());
    let tab = Tab::parse(&tab_token);

    if args.options {
        let options = action_filter_options(&classified);
        if json {
            println!("{}", serde_json::to_string_pretty(&options)?);
        } else {
            output::print_filter_options(&options);
        }
        return Ok(());
    }

    let rows: Vec<&ActionItem> = classified
        .tab_items(tab)
        .into_iter()
        .filter(|item| action_item_matches(item, &filters))
        .collect();

    if json {
        let json_rows: Vec<_> = rows.iter().map(|item| output::item_row(item)).collect();
        println!("{}", serde_json::to_string_pretty(&json_rows)?);
    } else {
        output::print_items(&rows);
    }

    // remember the fetch, when run inside a triage directory
    if let Ok(triage_dir) = resolve_dir(dir) {
        let mut fetch_state = state::read_fetch_state(&triage_dir);
        for feed in feeds_for_tab(tab) {
            fetch_state.last_refresh.insert(*feed, now);
        }
        state::write_fetch_state(&triage_dir, &fetch_state)?;
    }
    Ok(())
}

fn cmd_wins(args: WinsArgs, json: bool, dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    let export = items_io::read_feed_export(Path::new(&args.file))?;
    let now = Utc::now();

    let mut params = params_from(&args.query)?;
    merge_list(&mut params, "difficulty", &args.difficulty);
    merge_list(&mut params, "language", &args.language);
    merge_list(&mut params, "sourceCategory", &args.category);
    merge_list(&mut params, "repository", &args.repo);
    if let Some(min_stars) = args.min_stars {
        params.insert("minStars".to_string(), min_stars.to_string());
    }
    let filters = decode_quick_wins_filters(&params);

    let mut rows = Vec::new();
    for issue in &export.good_issues {
        if quick_win_matches(issue, SourceCategory::GoodIssues, &filters) {
            rows.push(output::win_row(issue, SourceCategory::GoodIssues));
        }
    }
    for issue in &export.easy_fixes {
        if quick_win_matches(issue, SourceCategory::EasyFixes, &filters) {
            rows.push(output::win_row(issue, SourceCategory::EasyFixes));
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        output::print_wins(&rows);
    }

    if let Ok(triage_dir) = resolve_dir(dir) {
        let mut fetch_state = state::read_fetch_state(&triage_dir);
        fetch_state.last_refresh.insert(Feed::GoodIssues, now);
        fetch_state.last_refresh.insert(Feed::EasyFixes, now);
        state::write_fetch_state(&triage_dir, &fetch_state)?;
    }
    Ok(())
}

fn cmd_import(args: ImportArgs, dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    let export = items_io::read_feed_export(Path::new(&args.file))?;
    let triage_dir = resolve_dir(dir)?;
    let repo = board_repo(&triage_dir);
    let mut board = repo.load()?;
    let column = args.column.as_deref().unwrap_or(COLUMN_TODO);

    let (added, skipped) = if args.wins {
        import_wins(&mut board, &export, &args.ids, column)
    } else {
        let items: Vec<ActionItem> = export
            .assigned
            .into_iter()
            .chain(export.mentions)
            .chain(export.stale)
            .collect();
        let mut selection = if args.ids.is_empty() {
            let mut all: Vec<String> = Vec::new();
            for item in &items {
                if !all.contains(&item.id) {
                    all.push(item.id.clone());
                }
            }
            all
        } else {
            args.ids.clone()
        };
        let outcome = board_ops::bulk_import(&mut board, &items, &mut selection, column);
        (outcome.added.len(), outcome.skipped)
    };

    repo.save(&board)?;
    println!("imported {} task(s), skipped {}", added, skipped);
    Ok(())
}

/// Quick-win variant of the bulk import: same skip-and-continue
/// semantics over the two quick-win feeds.
fn import_wins(
    board: &mut Board,
    export: &FeedExport,
    ids: &[String],
    column: &str,
) -> (usize, usize) {
    let issues: Vec<&QuickWinIssue> = export
        .good_issues
        .iter()
        .chain(export.easy_fixes.iter())
        .collect();
    let selection: Vec<String> = if ids.is_empty() {
        let mut all: Vec<String> = Vec::new();
        for issue in &issues {
            if !all.contains(&issue.id) {
                all.push(issue.id.clone());
            }
        }
        all
    } else {
        ids.to_vec()
    };

    let mut added = 0;
    let mut skipped = 0;
    for id in &selection {
        let result = issues
            .iter()
            .find(|issue| &issue.id == id)
            .and_then(|issue| board_ops::add_task_from_quick_win(board, issue, "", column));
        match result {
            Some(_) => added += 1,
            None => skipped += 1,
        }
    }
    (added, skipped)
}

fn cmd_status(json: bool, dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    let triage_dir = resolve_dir(dir)?;
    let config = config_io::read_config(&triage_dir)?;
    let fetch_state = state::read_fetch_state(&triage_dir);

    let mut tracker =
        FreshnessTracker::new(TimeDelta::minutes(config.refresh.window_minutes as i64));
    tracker.load(&fetch_state.last_refresh);

    let now = Utc::now();
    let rows: Vec<FeedStatusJson> = Feed::ALL
        .iter()
        .map(|feed| FeedStatusJson {
            feed: feed.as_str(),
            fresh: !tracker.should_refresh(*feed, now),
            last_refresh: tracker.last_refresh(*feed).map(|t| t.to_rfc3339()),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        output::print_status(&rows);
    }
    Ok(())
}
