use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::item::{ActionItem, QuickWinIssue};

/// Error type for feed-export files
#[derive(Debug, thiserror::Error)]
pub enum ItemsError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse feed export: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// A JSON export of the upstream feeds, one array per feed. Every feed
/// is optional; a feed that failed upstream is simply absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedExport {
    #[serde(default)]
    pub assigned: Vec<ActionItem>,
    #[serde(default)]
    pub mentions: Vec<ActionItem>,
    #[serde(default)]
    pub stale: Vec<ActionItem>,
    #[serde(default)]
    pub good_issues: Vec<QuickWinIssue>,
    #[serde(default)]
    pub easy_fixes: Vec<QuickWinIssue>,
}

pub fn read_feed_export(path: &Path) -> Result<FeedExport, ItemsError> {
    let content = fs::read_to_string(path).map_err(|e| ItemsError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(serde_json::from_str(&content)?)
}
