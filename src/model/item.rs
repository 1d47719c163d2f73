use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Priority carried through from the upstream source, never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn parse(s: &str) -> Option<Priority> {
        match s {
            "urgent" => Some(Priority::Urgent),
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

/// Whether an action item is an issue or a pull request.
/// Determines which optional fields are meaningful: merge state and
/// diff stats apply only to pull requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Issue,
    PullRequest,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Issue => "issue",
            ItemKind::PullRequest => "pullRequest",
        }
    }

    pub fn parse(s: &str) -> Option<ItemKind> {
        match s {
            "issue" => Some(ItemKind::Issue),
            "pullRequest" => Some(ItemKind::PullRequest),
            _ => None,
        }
    }
}

/// Item author as reported upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

/// A label attached to an item. Names are unique within one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Merge status rollup for pull requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MergeState {
    Mergeable,
    Conflicting,
    Unknown,
}

/// CI status rollup state for pull requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CiState {
    Success,
    Failure,
    Pending,
    Expected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRollup {
    pub state: CiState,
}

/// A normalized GitHub issue or pull request relevant to the current user.
///
/// Created by the classification step from an upstream feed payload,
/// immutable for the rest of that fetch cycle, and replaced wholesale on
/// the next refresh. `days_old` is the only derived field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    /// Unique within its source feed. Upstream sends either a string
    /// node id or a numeric database id, so both are accepted.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub repo: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub author: Author,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub priority: Priority,
    /// Whole days since last update, filled in by classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_old: Option<i64>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mergeable: Option<MergeState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_check_rollup: Option<CheckRollup>,
}

/// Difficulty bucket for a quick-win issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
        }
    }

    pub fn parse(s: &str) -> Option<Difficulty> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            _ => None,
        }
    }
}

/// Which upstream search produced a quick-win issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceCategory {
    GoodIssues,
    EasyFixes,
}

impl SourceCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceCategory::GoodIssues => "good-issues",
            SourceCategory::EasyFixes => "easy-fixes",
        }
    }

    pub fn parse(s: &str) -> Option<SourceCategory> {
        match s {
            "good-issues" => Some(SourceCategory::GoodIssues),
            "easy-fixes" => Some(SourceCategory::EasyFixes),
            _ => None,
        }
    }
}

/// An easy external contribution opportunity, from the label-based
/// "good first issue" / "help wanted" searches. Same fetch/replace
/// cycle as `ActionItem`, separate upstream query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickWinIssue {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub repository: String,
    pub url: String,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub stars: u32,
    #[serde(default)]
    pub labels: Vec<String>,
    pub priority: Priority,
}

/// Accept both JSON strings and integers for upstream identifiers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(n) => n.to_string(),
        Raw::Str(s) => s,
    })
}
