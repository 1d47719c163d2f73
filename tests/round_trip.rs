//! Persistence round-trip tests: a board pushed through the JSON
//! repository comes back identical, across the full task lifecycle.

use chrono::Utc;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use triage::io::board_io::{BoardRepository, JsonBoardRepository, MemoryBoardRepository};
use triage::model::board::{Board, COLUMN_DONE, COLUMN_TODO};
use triage::ops::board_ops::{add_task, archive_task, move_task, restore_task, NewTask};

fn repo_in(dir: &TempDir) -> JsonBoardRepository {
    JsonBoardRepository::new(&dir.path().join("board.json"))
}

#[test]
fn round_trip_empty_board() {
    let dir = TempDir::new().unwrap();
    let repo = repo_in(&dir);
    repo.save(&Board::default()).unwrap();
    assert_eq!(repo.load().unwrap(), Board::default());
}

#[test]
fn round_trip_populated_board() {
    let dir = TempDir::new().unwrap();
    let repo = repo_in(&dir);

    let mut board = Board::default();
    let a = add_task(&mut board, NewTask::custom("Write release notes"));
    let b = add_task(&mut board, NewTask::custom("Fix CI"));
    move_task(&mut board, &b, COLUMN_DONE);
    archive_task(&mut board, &a, Utc::now());

    repo.save(&board).unwrap();
    let loaded = repo.load().unwrap();
    assert_eq!(loaded, board);
    assert_eq!(loaded.archive.len(), 1);
    assert!(loaded.archive[0].archived_at.is_some());
}

#[test]
fn round_trip_survives_archive_restore_cycle() {
    let dir = TempDir::new().unwrap();
    let repo = repo_in(&dir);

    let mut board = Board::default();
    let id = add_task(&mut board, NewTask::custom("Task"));
    archive_task(&mut board, &id, Utc::now());
    repo.save(&board).unwrap();

    let mut board = repo.load().unwrap();
    assert!(restore_task(&mut board, &id, COLUMN_TODO));
    repo.save(&board).unwrap();

    let board = repo.load().unwrap();
    assert!(board.archive.is_empty());
    let task = board.get_task(&id).unwrap();
    assert_eq!(task.archived_at, None);
    assert_eq!(board.find_task(&id).unwrap().0, COLUMN_TODO);
}

#[test]
fn memory_and_json_repositories_agree() {
    let dir = TempDir::new().unwrap();
    let json_repo = repo_in(&dir);
    let memory_repo = MemoryBoardRepository::default();

    let mut board = Board::default();
    add_task(&mut board, NewTask::custom("Same everywhere"));
    json_repo.save(&board).unwrap();
    memory_repo.save(&board).unwrap();

    assert_eq!(json_repo.load().unwrap(), memory_repo.load().unwrap());
}
