use serde::{Deserialize, Serialize};

/// Configuration from triage.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriageConfig {
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub board: BoardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Freshness window: a feed older than this needs a refetch.
    #[serde(default = "default_window_minutes")]
    pub window_minutes: u32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        RefreshConfig {
            window_minutes: default_window_minutes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Column restored tasks land in. The archive does not remember a
    /// task's original column.
    #[serde(default = "default_restore_column")]
    pub restore_column: String,
    /// Columns created by `tg init`, in board order.
    #[serde(default = "default_columns")]
    pub columns: Vec<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            restore_column: default_restore_column(),
            columns: default_columns(),
        }
    }
}

fn default_window_minutes() -> u32 {
    5
}

fn default_restore_column() -> String {
    super::board::COLUMN_TODO.to_string()
}

fn default_columns() -> Vec<String> {
    vec![
        super::board::COLUMN_TODO.to_string(),
        super::board::COLUMN_IN_PROGRESS.to_string(),
        super::board::COLUMN_DONE.to_string(),
    ]
}
