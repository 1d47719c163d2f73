use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::model::board::{Board, KanbanTask, TaskKind, COLUMN_TODO};
use crate::model::item::{ActionItem, ItemKind, Priority, QuickWinIssue};

/// Matches `/issues/42` or `/pull/42` in an item URL.
static ISSUE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(issues|pull)/(\d+)").expect("static pattern"));

/// Fields for a task about to be added; id assignment and column
/// placement happen in `add_task`.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub kind: TaskKind,
    pub priority: Priority,
    pub github_url: Option<String>,
    pub labels: Vec<String>,
    /// Target column; `None` defaults to `todo`.
    pub column: Option<String>,
}

impl NewTask {
    pub fn custom(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: String::new(),
            kind: TaskKind::Custom,
            priority: Priority::Medium,
            github_url: None,
            labels: Vec::new(),
            column: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Adding tasks
// ---------------------------------------------------------------------------

/// Append a task to its column (created if missing) and return the
/// generated id.
pub fn add_task(board: &mut Board, new: NewTask) -> String {
    let id = board.next_task_id();
    let column_id = new.column.as_deref().unwrap_or(COLUMN_TODO).to_string();
    let task = KanbanTask {
        id: id.clone(),
        title: new.title,
        description: new.description,
        kind: new.kind,
        priority: new.priority,
        github_url: new.github_url,
        labels: new.labels,
        archived_at: None,
    };
    board.ensure_column(&column_id).tasks.push(task);
    id
}

/// Map an action item into a task. Returns `None` when the item fails
/// validation (blank title) so bulk imports can skip it.
///
/// An empty description defaults to a `owner/repo#N` reference derived
/// from the item URL.
pub fn task_from_action_item(item: &ActionItem, description: &str, column: &str) -> Option<NewTask> {
    if item.title.trim().is_empty() {
        return None;
    }
    let description = if description.is_empty() {
        source_ref(&item.repo, item.url.as_deref())
    } else {
        description.to_string()
    };
    Some(NewTask {
        title: item.title.clone(),
        description,
        kind: match item.kind {
            ItemKind::Issue => TaskKind::GithubIssue,
            ItemKind::PullRequest => TaskKind::GithubPullRequest,
        },
        priority: item.priority,
        github_url: item.url.clone(),
        labels: item.labels.iter().map(|l| l.name.clone()).collect(),
        column: Some(column.to_string()),
    })
}

/// Quick-win variant of `task_from_action_item`. Quick wins are always
/// issues.
pub fn task_from_quick_win(issue: &QuickWinIssue, description: &str, column: &str) -> Option<NewTask> {
    if issue.title.trim().is_empty() {
        return None;
    }
    let description = if description.is_empty() {
        source_ref(&issue.repository, Some(&issue.url))
    } else {
        description.to_string()
    };
    Some(NewTask {
        title: issue.title.clone(),
        description,
        kind: TaskKind::GithubIssue,
        priority: issue.priority,
        github_url: Some(issue.url.clone()),
        labels: issue.labels.clone(),
        column: Some(column.to_string()),
    })
}

pub fn add_task_from_action_item(
    board: &mut Board,
    item: &ActionItem,
    description: &str,
    column: &str,
) -> Option<String> {
    let new = task_from_action_item(item, description, column)?;
    Some(add_task(board, new))
}

pub fn add_task_from_quick_win(
    board: &mut Board,
    issue: &QuickWinIssue,
    description: &str,
    column: &str,
) -> Option<String> {
    let new = task_from_quick_win(issue, description, column)?;
    Some(add_task(board, new))
}

/// `acme/widgets` + `…/issues/42` → `acme/widgets#42`.
fn source_ref(repo: &str, url: Option<&str>) -> String {
    let number = url
        .and_then(|u| ISSUE_URL.captures(u))
        .map(|c| c[2].to_string());
    match number {
        Some(n) => format!("{}#{}", repo, n),
        None => repo.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Move a task to another column, keeping relative order by appending.
/// Already in the target column is a no-op, not an error. Returns
/// whether the task was found on the board.
pub fn move_task(board: &mut Board, task_id: &str, target_column: &str) -> bool {
    let Some((column_id, idx)) = board.find_task(task_id) else {
        return false;
    };
    if column_id == target_column {
        return true;
    }
    let column_id = column_id.to_string();
    let task = board.columns[&column_id].tasks.remove(idx);
    board.ensure_column(target_column).tasks.push(task);
    true
}

/// Remove a task from its column, stamp `archived_at`, and add it to
/// the archive. Silent no-op when the id is not on the board.
pub fn archive_task(board: &mut Board, task_id: &str, now: DateTime<Utc>) -> bool {
    let Some((column_id, idx)) = board.find_task(task_id) else {
        return false;
    };
    let column_id = column_id.to_string();
    let mut task = board.columns[&column_id].tasks.remove(idx);
    task.archived_at = Some(now);
    board.archive.push(task);
    true
}

/// Take a task out of the archive, clear its timestamp, and append it
/// to `restore_column`. The archive does not remember the original
/// column. Silent no-op when the id is not archived.
pub fn restore_task(board: &mut Board, task_id: &str, restore_column: &str) -> bool {
    let Some(idx) = board.find_archived(task_id) else {
        return false;
    };
    let mut task = board.archive.remove(idx);
    task.archived_at = None;
    board.ensure_column(restore_column).tasks.push(task);
    true
}

/// Permanently remove a task from the archive. Irreversible. Silent
/// no-op when the id is not archived.
pub fn delete_archived_task(board: &mut Board, task_id: &str) -> bool {
    let Some(idx) = board.find_archived(task_id) else {
        return false;
    };
    board.archive.remove(idx);
    true
}

/// Empty the archive. Irreversible; the confirmation prompt belongs to
/// the caller, not the store. Returns how many tasks were deleted.
pub fn clear_archive(board: &mut Board) -> usize {
    let count = board.archive.len();
    board.archive.clear();
    count
}

// ---------------------------------------------------------------------------
// Bulk import
// ---------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BulkImportOutcome {
    /// Ids of the tasks created, in selection order.
    pub added: Vec<String>,
    /// Selected ids that were skipped (unknown id or failed validation).
    pub skipped: usize,
}

/// Import every selected item as a task. A selected id that is missing
/// from `items` or fails validation is skipped without aborting the
/// batch; the selection is cleared only after the whole batch ran.
pub fn bulk_import(
    board: &mut Board,
    items: &[ActionItem],
    selection: &mut Vec<String>,
    column: &str,
) -> BulkImportOutcome {
    let mut outcome = BulkImportOutcome::default();
    for selected_id in selection.iter() {
        let added = items
            .iter()
            .find(|item| &item.id == selected_id)
            .and_then(|item| add_task_from_action_item(board, item, "", column));
        match added {
            Some(task_id) => outcome.added.push(task_id),
            None => outcome.skipped += 1,
        }
    }
    selection.clear();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::board::{COLUMN_DONE, COLUMN_IN_PROGRESS};
    use crate::model::item::{Author, Label};
    use pretty_assertions::assert_eq;

    fn item(id: &str, title: &str) -> ActionItem {
        ActionItem {
            id: id.to_string(),
            title: title.to_string(),
            url: Some(format!("https://github.com/acme/widgets/issues/{}", id)),
            repo: "acme/widgets".into(),
            kind: ItemKind::Issue,
            author: Author {
                login: "octocat".into(),
                avatar_url: String::new(),
            },
            labels: vec![Label {
                name: "bug".into(),
                color: None,
            }],
            priority: Priority::High,
            days_old: Some(3),
            updated_at: "2026-08-27T12:00:00Z".parse().unwrap(),
            comments: None,
            stars: None,
            additions: None,
            deletions: None,
            language: None,
            mergeable: None,
            status_check_rollup: None,
        }
    }

    fn now() -> DateTime<Utc> {
        "2026-08-30T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_add_task_defaults_to_todo() {
        let mut board = Board::default();
        let id = add_task(&mut board, NewTask::custom("Write docs"));
        assert_eq!(id, "task-001");
        assert_eq!(board.find_task(&id), Some((COLUMN_TODO, 0)));
    }

    #[test]
    fn test_add_task_from_action_item_maps_fields() {
        let mut board = Board::default();
        let id = add_task_from_action_item(&mut board, &item("42", "Fix bug"), "", COLUMN_TODO)
            .unwrap();
        let task = board.get_task(&id).unwrap();
        assert_eq!(task.title, "Fix bug");
        assert_eq!(task.kind, TaskKind::GithubIssue);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.labels, ["bug"]);
        assert_eq!(task.description, "acme/widgets#42");
        assert_eq!(
            task.github_url.as_deref(),
            Some("https://github.com/acme/widgets/issues/42")
        );
    }

    #[test]
    fn test_pull_request_kind_and_explicit_description() {
        let mut pr = item("10", "Add retry");
        pr.kind = ItemKind::PullRequest;
        pr.url = Some("https://github.com/acme/widgets/pull/10".into());
        let new = task_from_action_item(&pr, "review carefully", COLUMN_IN_PROGRESS).unwrap();
        assert_eq!(new.kind, TaskKind::GithubPullRequest);
        assert_eq!(new.description, "review carefully");
        assert_eq!(new.column.as_deref(), Some(COLUMN_IN_PROGRESS));
    }

    #[test]
    fn test_source_ref_without_number_falls_back_to_repo() {
        let mut it = item("42", "Fix bug");
        it.url = Some("https://github.com/acme/widgets".into());
        let new = task_from_action_item(&it, "", COLUMN_TODO).unwrap();
        assert_eq!(new.description, "acme/widgets");
    }

    #[test]
    fn test_move_task() {
        let mut board = Board::default();
        let id = add_task(&mut board, NewTask::custom("Task"));

        assert!(move_task(&mut board, &id, COLUMN_DONE));
        assert_eq!(board.find_task(&id), Some((COLUMN_DONE, 0)));

        // already there: no-op, still reported as found
        assert!(move_task(&mut board, &id, COLUMN_DONE));
        assert_eq!(board.columns[COLUMN_DONE].tasks.len(), 1);

        assert!(!move_task(&mut board, "task-999", COLUMN_DONE));
    }

    #[test]
    fn test_archive_then_restore() {
        let mut board = Board::default();
        let id = add_task(&mut board, NewTask::custom("Task"));
        move_task(&mut board, &id, COLUMN_DONE);

        assert!(archive_task(&mut board, &id, now()));
        assert_eq!(board.active_task_count(), 0);
        assert_eq!(board.archive.len(), 1);
        assert_eq!(board.archive[0].archived_at, Some(now()));

        assert!(restore_task(&mut board, &id, COLUMN_TODO));
        assert!(board.archive.is_empty());
        let (column, _) = board.find_task(&id).unwrap();
        assert_eq!(column, COLUMN_TODO);
        assert_eq!(board.get_task(&id).unwrap().archived_at, None);
        assert_eq!(board.get_task(&id).unwrap().title, "Task");
    }

    #[test]
    fn test_archive_missing_id_is_noop() {
        let mut board = Board::default();
        assert!(!archive_task(&mut board, "task-404", now()));
        assert!(!restore_task(&mut board, "task-404", COLUMN_TODO));
        assert!(board.archive.is_empty());
    }

    #[test]
    fn test_delete_and_clear_archive() {
        let mut board = Board::default();
        let a = add_task(&mut board, NewTask::custom("A"));
        let b = add_task(&mut board, NewTask::custom("B"));
        archive_task(&mut board, &a, now());
        archive_task(&mut board, &b, now());

        assert!(delete_archived_task(&mut board, &a));
        assert_eq!(board.archive.len(), 1);
        // deleting again is a no-op, archive unchanged
        assert!(!delete_archived_task(&mut board, &a));
        assert_eq!(board.archive.len(), 1);

        assert_eq!(clear_archive(&mut board), 1);
        assert!(board.archive.is_empty());
        assert_eq!(clear_archive(&mut board), 0);
    }

    #[test]
    fn test_bulk_import_skips_invalid_and_clears_selection() {
        let mut board = Board::default();
        let items = vec![
            item("1", "First"),
            item("2", "   "), // blank title fails validation
            item("3", "Third"),
        ];
        let mut selection = vec!["1".to_string(), "2".to_string(), "3".to_string()];

        let outcome = bulk_import(&mut board, &items, &mut selection, COLUMN_TODO);
        assert_eq!(outcome.added.len(), 2);
        assert_eq!(outcome.skipped, 1);
        assert!(selection.is_empty());
        assert_eq!(board.columns[COLUMN_TODO].tasks.len(), 2);
    }

    #[test]
    fn test_bulk_import_unknown_id_skipped() {
        let mut board = Board::default();
        let items = vec![item("1", "First")];
        let mut selection = vec!["1".to_string(), "999".to_string()];

        let outcome = bulk_import(&mut board, &items, &mut selection, COLUMN_TODO);
        assert_eq!(outcome.added.len(), 1);
        assert_eq!(outcome.skipped, 1);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_quick_win_import() {
        let mut board = Board::default();
        let issue = QuickWinIssue {
            id: "7".into(),
            title: "Fix typo".into(),
            repository: "acme/widgets".into(),
            url: "https://github.com/acme/widgets/issues/7".into(),
            difficulty: crate::model::item::Difficulty::Easy,
            language: Some("Rust".into()),
            stars: 1200,
            labels: vec!["good first issue".into()],
            priority: Priority::Low,
        };
        let id = add_task_from_quick_win(&mut board, &issue, "", COLUMN_TODO).unwrap();
        let task = board.get_task(&id).unwrap();
        assert_eq!(task.kind, TaskKind::GithubIssue);
        assert_eq!(task.description, "acme/widgets#7");
        assert_eq!(task.labels, ["good first issue"]);
    }

    #[test]
    fn test_ids_stable_across_lifecycle() {
        let mut board = Board::default();
        let id = add_task(&mut board, NewTask::custom("Task"));
        move_task(&mut board, &id, COLUMN_IN_PROGRESS);
        archive_task(&mut board, &id, now());
        restore_task(&mut board, &id, COLUMN_TODO);
        assert_eq!(board.get_task(&id).unwrap().id, id);
        // next id does not reuse it
        assert_ne!(board.next_task_id(), id);
    }
}
