use chrono::{DateTime, Utc};

use crate::model::item::ActionItem;

/// The tabs of the action-required view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    All,
    Assigned,
    Mentions,
    Stale,
}

impl Tab {
    pub fn as_str(self) -> &'static str {
        match self {
            Tab::All => "all",
            Tab::Assigned => "assigned",
            Tab::Mentions => "mentions",
            Tab::Stale => "stale",
        }
    }

    /// An unknown tab token falls back to `All`.
    pub fn parse(s: &str) -> Tab {
        match s {
            "assigned" => Tab::Assigned,
            "mentions" => Tab::Mentions,
            "stale" => Tab::Stale,
            _ => Tab::All,
        }
    }
}

/// Display weighting for a row, derived from item age. Not a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleSeverity {
    Normal,
    Warning,
    Critical,
}

/// `> 14` days → critical, `> 7` → warning, else normal.
/// Missing or zero age counts as normal.
pub fn stale_severity(days_old: Option<i64>) -> StaleSeverity {
    match days_old {
        Some(d) if d > 14 => StaleSeverity::Critical,
        Some(d) if d > 7 => StaleSeverity::Warning,
        _ => StaleSeverity::Normal,
    }
}

/// Whole days between an item's last update and `now`, floored at zero
/// in case upstream clocks run ahead of ours.
pub fn age_in_days(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - updated_at).num_days().max(0)
}

/// Action items bucketed by source feed, with ages filled in.
///
/// Bucket membership comes from the feed that returned the item and is
/// never recomputed from age: an item fetched from the stale feed stays
/// in `stale` even as its age drifts during a session.
#[derive(Debug, Clone, Default)]
pub struct Classified {
    pub assigned: Vec<ActionItem>,
    pub mentions: Vec<ActionItem>,
    pub stale: Vec<ActionItem>,
}

impl Classified {
    /// Union of all three buckets, in bucket order, without
    /// de-duplication: an item returned by two feeds appears twice.
    pub fn all(&self) -> Vec<&ActionItem> {
        self.assigned
            .iter()
            .chain(self.mentions.iter())
            .chain(self.stale.iter())
            .collect()
    }

    /// Items for a tab, borrowing from the buckets.
    pub fn tab_items(&self, tab: Tab) -> Vec<&ActionItem> {
        match tab {
            Tab::All => self.all(),
            Tab::Assigned => self.assigned.iter().collect(),
            Tab::Mentions => self.mentions.iter().collect(),
            Tab::Stale => self.stale.iter().collect(),
        }
    }
}

/// Classify raw feed payloads: compute `days_old` for every item
/// against `now` and keep each item in its source bucket. Priority is
/// passed through from upstream unchanged.
pub fn classify(
    assigned: Vec<ActionItem>,
    mentions: Vec<ActionItem>,
    stale: Vec<ActionItem>,
    now: DateTime<Utc>,
) -> Classified {
    let annotate = |items: Vec<ActionItem>| -> Vec<ActionItem> {
        items
            .into_iter()
            .map(|mut item| {
                item.days_old = Some(age_in_days(item.updated_at, now));
                item
            })
            .collect()
    };
    Classified {
        assigned: annotate(assigned),
        mentions: annotate(mentions),
        stale: annotate(stale),
    }
}
