use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tg", about = concat!("[#] triage v", env!("CARGO_PKG_VERSION"), " - your GitHub inbox, on a board"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a .triage/ data directory here
    Init(InitArgs),
    /// Show the kanban board
    Board,
    /// Add a task to the board
    Add(AddArgs),
    /// Move a task to another column
    Mv(MvArgs),
    /// Archive a task
    Archive(IdArgs),
    /// Restore an archived task to the board
    Restore(IdArgs),
    /// Permanently delete an archived task
    Purge(IdArgs),
    /// List archived tasks
    Archived,
    /// Permanently delete all archived tasks
    ClearArchive(ClearArchiveArgs),
    /// Classify and list action items from a feed export
    Items(ItemsArgs),
    /// List quick-win issues from a feed export
    Wins(WinsArgs),
    /// Import items from a feed export onto the board
    Import(ImportArgs),
    /// Show per-feed freshness
    Status,
}

#[derive(Args)]
pub struct InitArgs {
    /// Reinitialize even if .triage/ already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Target column (default: todo)
    #[arg(long)]
    pub column: Option<String>,
    /// Priority
    #[arg(long, value_parser = ["urgent", "high", "medium", "low"], default_value = "medium")]
    pub priority: String,
    /// Description
    #[arg(long, default_value = "")]
    pub desc: String,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task id
    pub id: String,
    /// Target column
    pub column: String,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task id
    pub id: String,
}

#[derive(Args)]
pub struct ClearArchiveArgs {
    /// Confirm: this cannot be undone
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ItemsArgs {
    /// Path to a feed-export JSON file
    pub file: String,
    /// Tab to list (all, assigned, mentions, stale)
    #[arg(long, default_value = "all")]
    pub tab: String,
    /// Filter by author login (repeatable)
    #[arg(long)]
    pub assignee: Vec<String>,
    /// Filter by repository full name (repeatable)
    #[arg(long)]
    pub repo: Vec<String>,
    /// Filter by label name (repeatable)
    #[arg(long)]
    pub label: Vec<String>,
    /// Filter by item type (issue, pullRequest; repeatable)
    #[arg(long = "type")]
    pub types: Vec<String>,
    /// Only items at least this many days old
    #[arg(long)]
    pub staleness: Option<u32>,
    /// Filter by primary language (repeatable)
    #[arg(long)]
    pub language: Vec<String>,
    /// Raw filter parameters as key=value pairs, decoded like a query
    /// string (repeatable)
    #[arg(long)]
    pub query: Vec<String>,
    /// Show the filter options available in the loaded data
    #[arg(long)]
    pub options: bool,
}

#[derive(Args)]
pub struct WinsArgs {
    /// Path to a feed-export JSON file
    pub file: String,
    /// Filter by difficulty (easy, medium; repeatable)
    #[arg(long)]
    pub difficulty: Vec<String>,
    /// Filter by primary language (repeatable)
    #[arg(long)]
    pub language: Vec<String>,
    /// Filter by source category (good-issues, easy-fixes; repeatable)
    #[arg(long)]
    pub category: Vec<String>,
    /// Filter by repository full name (repeatable)
    #[arg(long)]
    pub repo: Vec<String>,
    /// Only issues with at least this many stars
    #[arg(long)]
    pub min_stars: Option<u32>,
    /// Raw filter parameters as key=value pairs (repeatable)
    #[arg(long)]
    pub query: Vec<String>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Path to a feed-export JSON file
    pub file: String,
    /// Item id to import (repeatable; default: every action item)
    #[arg(long = "id")]
    pub ids: Vec<String>,
    /// Import from the quick-win feeds instead of the action feeds
    #[arg(long)]
    pub wins: bool,
    /// Target column (default: todo)
    #[arg(long)]
    pub column: Option<String>,
}
