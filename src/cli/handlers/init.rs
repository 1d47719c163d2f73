use std::error::Error;
use std::fs;
use std::path::PathBuf;

use crate::cli::commands::InitArgs;
use crate::io::board_io::{BoardRepository, JsonBoardRepository};
use crate::io::config_io::{self, BOARD_FILE, DATA_DIR};
use crate::model::board::Board;
use crate::model::config::TriageConfig;

/// `tg init`: create .triage/ with a default config and an empty board.
pub fn cmd_init(args: InitArgs, dir_override: Option<&str>) -> Result<(), Box<dyn Error>> {
    let root = match dir_override {
        Some(dir) => fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
        None => std::env::current_dir()?,
    };
    let triage_dir: PathBuf = root.join(DATA_DIR);

    if triage_dir.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force to reinitialize)",
            triage_dir.display()
        )
        .into());
    }

    fs::create_dir_all(&triage_dir)?;
    config_io::write_default_config(&triage_dir)?;

    let config = TriageConfig::default();
    let columns: Vec<&str> = config.board.columns.iter().map(String::as_str).collect();
    let board = Board::with_columns(&columns);
    JsonBoardRepository::new(&triage_dir.join(BOARD_FILE)).save(&board)?;

    println!("initialized {}", triage_dir.display());
    Ok(())
}
