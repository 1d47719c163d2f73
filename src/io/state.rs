use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ops::refresh::Feed;

pub const STATE_FILE: &str = "state.json";

/// Persisted fetch bookkeeping (written to state.json), so feed
/// freshness survives across invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchState {
    #[serde(default)]
    pub last_refresh: HashMap<Feed, DateTime<Utc>>,
}

/// Read state.json from the data directory. Unreadable or corrupt
/// state is treated as empty; it is only bookkeeping.
pub fn read_fetch_state(triage_dir: &Path) -> FetchState {
    let path = triage_dir.join(STATE_FILE);
    fs::read_to_string(&path)
        .ok()
        .and_then(|content| serde_json::from_str(&content).ok())
        .unwrap_or_default()
}

/// Write state.json to the data directory
pub fn write_fetch_state(triage_dir: &Path, state: &FetchState) -> Result<(), std::io::Error> {
    let path = triage_dir.join(STATE_FILE);
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut state = FetchState::default();
        state
            .last_refresh
            .insert(Feed::Assigned, "2026-08-30T12:00:00Z".parse().unwrap());
        write_fetch_state(dir.path(), &state).unwrap();

        let loaded = read_fetch_state(dir.path());
        assert_eq!(
            loaded.last_refresh.get(&Feed::Assigned),
            state.last_refresh.get(&Feed::Assigned)
        );
    }

    #[test]
    fn test_missing_or_corrupt_state_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(read_fetch_state(dir.path()).last_refresh.is_empty());

        fs::write(dir.path().join(STATE_FILE), "garbage").unwrap();
        assert!(read_fetch_state(dir.path()).last_refresh.is_empty());
    }
}
