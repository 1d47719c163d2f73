use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::ops::classify::Tab;

/// Default freshness window: a feed fetched within the last five
/// minutes is not refetched.
pub const DEFAULT_WINDOW_MINUTES: u32 = 5;

/// An independently fetched upstream feed. Each feed carries its own
/// last-refresh timestamp, in-flight flag, and error state; a slow or
/// failing feed never blocks the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feed {
    Assigned,
    Mentions,
    Stale,
    GoodIssues,
    EasyFixes,
}

impl Feed {
    pub fn as_str(self) -> &'static str {
        match self {
            Feed::Assigned => "assigned",
            Feed::Mentions => "mentions",
            Feed::Stale => "stale",
            Feed::GoodIssues => "good-issues",
            Feed::EasyFixes => "easy-fixes",
        }
    }

    pub const ALL: [Feed; 5] = [
        Feed::Assigned,
        Feed::Mentions,
        Feed::Stale,
        Feed::GoodIssues,
        Feed::EasyFixes,
    ];
}

/// Feeds behind a tab of the action-required view. `All` fans out to
/// the three action feeds, each judged independently.
pub fn feeds_for_tab(tab: Tab) -> &'static [Feed] {
    match tab {
        Tab::All => &[Feed::Assigned, Feed::Mentions, Feed::Stale],
        Tab::Assigned => &[Feed::Assigned],
        Tab::Mentions => &[Feed::Mentions],
        Tab::Stale => &[Feed::Stale],
    }
}

/// What caused a refresh check. All triggers funnel through the same
/// decision; there is no forced-vs-lazy distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Mount,
    TabChange,
    VisibilityRegained,
}

/// Per-feed last-refresh bookkeeping against a fixed window.
#[derive(Debug, Clone)]
pub struct FreshnessTracker {
    last_refresh: HashMap<Feed, DateTime<Utc>>,
    window: TimeDelta,
}

impl FreshnessTracker {
    pub fn new(window: TimeDelta) -> FreshnessTracker {
        FreshnessTracker {
            last_refresh: HashMap::new(),
            window,
        }
    }

    pub fn with_default_window() -> FreshnessTracker {
        FreshnessTracker::new(TimeDelta::minutes(DEFAULT_WINDOW_MINUTES as i64))
    }

    /// True when the feed has never been fetched or its last fetch is
    /// older than the window.
    pub fn should_refresh(&self, feed: Feed, now: DateTime<Utc>) -> bool {
        match self.last_refresh.get(&feed) {
            None => true,
            Some(last) => now - *last > self.window,
        }
    }

    pub fn mark_refreshed(&mut self, feed: Feed, now: DateTime<Utc>) {
        self.last_refresh.insert(feed, now);
    }

    pub fn last_refresh(&self, feed: Feed) -> Option<DateTime<Utc>> {
        self.last_refresh.get(&feed).copied()
    }

    /// Seed timestamps from persisted state.
    pub fn load(&mut self, saved: &HashMap<Feed, DateTime<Utc>>) {
        self.last_refresh.extend(saved.iter().map(|(f, t)| (*f, *t)));
    }

    pub fn snapshot(&self) -> HashMap<Feed, DateTime<Utc>> {
        self.last_refresh.clone()
    }
}

/// Fetch status of one feed, tracked independently of all others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedStatus {
    pub in_flight: bool,
    pub error: Option<String>,
}

/// Drives refetching for a page. The owning view calls `start()` when
/// it mounts its listeners and `stop()` on teardown; while stopped no
/// trigger produces work, which keeps teardown deterministic.
#[derive(Debug)]
pub struct RefreshScheduler {
    tracker: FreshnessTracker,
    status: HashMap<Feed, FeedStatus>,
    last_trigger: Option<RefreshTrigger>,
    started: bool,
}

impl RefreshScheduler {
    pub fn new(tracker: FreshnessTracker) -> RefreshScheduler {
        RefreshScheduler {
            tracker,
            status: HashMap::new(),
            last_trigger: None,
            started: false,
        }
    }

    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn stop(&mut self) {
        self.started = false;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn last_trigger(&self) -> Option<RefreshTrigger> {
        self.last_trigger
    }

    pub fn tracker(&self) -> &FreshnessTracker {
        &self.tracker
    }

    /// The feeds the caller should refetch for this trigger. Empty
    /// while stopped. A feed already in flight is not re-requested.
    pub fn on_trigger(
        &mut self,
        trigger: RefreshTrigger,
        tab: Tab,
        now: DateTime<Utc>,
    ) -> Vec<Feed> {
        if !self.started {
            return Vec::new();
        }
        self.last_trigger = Some(trigger);
        feeds_for_tab(tab)
            .iter()
            .copied()
            .filter(|feed| !self.status(*feed).in_flight && self.tracker.should_refresh(*feed, now))
            .collect()
    }

    pub fn status(&self, feed: Feed) -> FeedStatus {
        self.status.get(&feed).cloned().unwrap_or_default()
    }

    /// A fetch for this feed went out: mark in flight, clear any stale
    /// error from the previous attempt.
    pub fn begin_fetch(&mut self, feed: Feed) {
        let status = self.status.entry(feed).or_default();
        status.in_flight = true;
        status.error = None;
    }

    /// A fetch landed: the feed is fresh as of `now`.
    pub fn complete_fetch(&mut self, feed: Feed, now: DateTime<Utc>) {
        let status = self.status.entry(feed).or_default();
        status.in_flight = false;
        status.error = None;
        self.tracker.mark_refreshed(feed, now);
    }

    /// A fetch failed: record the error on this feed only. The feed's
    /// timestamp is not advanced, so the next trigger retries it.
    pub fn fail_fetch(&mut self, feed: Feed, error: String) {
        let status = self.status.entry(feed).or_default();
        status.in_flight = false;
        status.error = Some(error);
    }
}
