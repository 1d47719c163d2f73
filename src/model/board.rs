use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::item::Priority;

/// The three columns every board starts with. Further columns may be
/// added through config or `ensure_column`.
pub const COLUMN_TODO: &str = "todo";
pub const COLUMN_IN_PROGRESS: &str = "in-progress";
pub const COLUMN_DONE: &str = "done";

/// Where a kanban task came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    GithubIssue,
    GithubPullRequest,
    Custom,
}

impl TaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::GithubIssue => "github-issue",
            TaskKind::GithubPullRequest => "github-pull-request",
            TaskKind::Custom => "custom",
        }
    }
}

/// A user-visible unit of work on the board.
///
/// A task either sits in exactly one column or in the archive, never
/// both. `archived_at` is set exactly while the task is archived. Ids
/// are stable across move/archive/restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

/// An ordered column of tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<KanbanTask>,
}

impl Column {
    pub fn new(id: &str) -> Column {
        Column {
            id: id.to_string(),
            title: column_title(id),
            tasks: Vec::new(),
        }
    }
}

/// Display title for a column id: `in-progress` → `In Progress`.
fn column_title(id: &str) -> String {
    id.split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The kanban board: ordered columns plus the archive set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Keyed by column id; map order is column order.
    pub columns: IndexMap<String, Column>,
    #[serde(default)]
    pub archive: Vec<KanbanTask>,
}

impl Default for Board {
    fn default() -> Board {
        Board::with_columns(&[COLUMN_TODO, COLUMN_IN_PROGRESS, COLUMN_DONE])
    }
}

impl Board {
    pub fn with_columns(ids: &[&str]) -> Board {
        let mut columns = IndexMap::new();
        for id in ids {
            columns.insert(id.to_string(), Column::new(id));
        }
        Board {
            columns,
            archive: Vec::new(),
        }
    }

    /// Get a column by id, creating it at the end of the board if missing.
    pub fn ensure_column(&mut self, id: &str) -> &mut Column {
        self.columns
            .entry(id.to_string())
            .or_insert_with(|| Column::new(id))
    }

    /// Locate an active (non-archived) task: `(column_id, index)`.
    pub fn find_task(&self, task_id: &str) -> Option<(&str, usize)> {
        for (column_id, column) in &self.columns {
            if let Some(idx) = column.tasks.iter().position(|t| t.id == task_id) {
                return Some((column_id.as_str(), idx));
            }
        }
        None
    }

    pub fn get_task(&self, task_id: &str) -> Option<&KanbanTask> {
        let (column_id, idx) = self.find_task(task_id)?;
        Some(&self.columns[column_id].tasks[idx])
    }

    /// Index of an archived task, if present.
    pub fn find_archived(&self, task_id: &str) -> Option<usize> {
        self.archive.iter().position(|t| t.id == task_id)
    }

    pub fn active_task_count(&self) -> usize {
        self.columns.values().map(|c| c.tasks.len()).sum()
    }

    /// Next free id of the form `task-NNN`, scanning the board and the
    /// archive so ids stay unique across the whole lifecycle.
    pub fn next_task_id(&self) -> String {
        let max = self
            .columns
            .values()
            .flat_map(|c| c.tasks.iter())
            .chain(self.archive.iter())
            .filter_map(|t| t.id.strip_prefix("task-"))
            .filter_map(|n| n.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        format!("task-{:03}", max + 1)
    }
}
