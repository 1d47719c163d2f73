use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::board::Board;

/// Error type for board persistence
#[derive(Debug, thiserror::Error)]
pub enum BoardIoError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse board file: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Storage seam for the kanban board. The board's transition logic
/// only ever sees `load`/`save`, so it can be unit-tested against the
/// in-memory repository.
pub trait BoardRepository {
    fn load(&self) -> Result<Board, BoardIoError>;
    fn save(&self, board: &Board) -> Result<(), BoardIoError>;
}

/// Board persisted as pretty-printed JSON at a fixed path.
pub struct JsonBoardRepository {
    path: PathBuf,
}

impl JsonBoardRepository {
    pub fn new(path: &Path) -> JsonBoardRepository {
        JsonBoardRepository {
            path: path.to_path_buf(),
        }
    }
}

impl BoardRepository for JsonBoardRepository {
    /// A missing file is an empty default board, not an error.
    fn load(&self) -> Result<Board, BoardIoError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Board::default()),
            Err(err) => Err(BoardIoError::ReadError {
                path: self.path.clone(),
                source: err,
            }),
        }
    }

    /// Write-to-temp-then-rename so a crash mid-save never leaves a
    /// truncated board file.
    fn save(&self, board: &Board) -> Result<(), BoardIoError> {
        let content = serde_json::to_string_pretty(board)?;
        let dir = self.path.parent().unwrap_or(Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-memory repository for tests and embedding without a filesystem.
#[derive(Default)]
pub struct MemoryBoardRepository {
    board: RefCell<Board>,
}

impl MemoryBoardRepository {
    pub fn with_board(board: Board) -> MemoryBoardRepository {
        MemoryBoardRepository {
            board: RefCell::new(board),
        }
    }
}

impl BoardRepository for MemoryBoardRepository {
    fn load(&self) -> Result<Board, BoardIoError> {
        Ok(self.board.borrow().clone())
    }

    fn save(&self, board: &Board) -> Result<(), BoardIoError> {
        *self.board.borrow_mut() = board.clone();
        Ok(())
    }
}
