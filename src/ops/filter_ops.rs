use crate::model::filters::{ActionRequiredFilters, QuickWinsFilters};
use crate::model::item::{ActionItem, Label, QuickWinIssue, SourceCategory};
use crate::ops::classify::Classified;

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Does one action item pass every active filter field?
///
/// Active fields AND together. Within the labels field it is enough for
/// one item label to match one filter label. Thresholds are inclusive
/// (`>=`); an item missing the underlying numeric field fails an active
/// threshold.
pub fn action_item_matches(item: &ActionItem, filters: &ActionRequiredFilters) -> bool {
    if !filters.assignee.is_empty() && !filters.assignee.contains(&item.author.login) {
        return false;
    }

    if !filters.repository.is_empty() && !filters.repository.contains(&item.repo) {
        return false;
    }

    if !filters.labels.is_empty() {
        let any_match = item
            .labels
            .iter()
            .any(|label| filters.labels.contains(&label.name));
        if !any_match {
            return false;
        }
    }

    if !filters.types.is_empty() && !filters.types.contains(&item.kind) {
        return false;
    }

    if let Some(threshold) = filters.staleness {
        match item.days_old {
            Some(days) if days >= threshold as i64 => {}
            _ => return false,
        }
    }

    if !filters.language.is_empty() {
        match &item.language {
            Some(lang) if filters.language.contains(lang) => {}
            _ => return false,
        }
    }

    true
}

/// Pure, order-preserving filter over action items.
pub fn apply_action_filters<'a>(
    items: &'a [ActionItem],
    filters: &ActionRequiredFilters,
) -> Vec<&'a ActionItem> {
    items
        .iter()
        .filter(|item| action_item_matches(item, filters))
        .collect()
}

/// Quick-win analog of `action_item_matches`. `category` is the feed
/// the issue came from, matched against the source-category filter.
pub fn quick_win_matches(
    issue: &QuickWinIssue,
    category: SourceCategory,
    filters: &QuickWinsFilters,
) -> bool {
    if !filters.difficulty.is_empty() && !filters.difficulty.contains(&issue.difficulty) {
        return false;
    }

    if !filters.language.is_empty() {
        match &issue.language {
            Some(lang) if filters.language.contains(lang) => {}
            _ => return false,
        }
    }

    if !filters.source_category.is_empty() && !filters.source_category.contains(&category) {
        return false;
    }

    if !filters.repository.is_empty() && !filters.repository.contains(&issue.repository) {
        return false;
    }

    if let Some(min) = filters.min_stars {
        if issue.stars < min {
            return false;
        }
    }

    true
}

/// Pure, order-preserving filter over one quick-win feed.
pub fn apply_quick_win_filters<'a>(
    issues: &'a [QuickWinIssue],
    category: SourceCategory,
    filters: &QuickWinsFilters,
) -> Vec<&'a QuickWinIssue> {
    issues
        .iter()
        .filter(|issue| quick_win_matches(issue, category, filters))
        .collect()
}

// ---------------------------------------------------------------------------
// Available-option projections
// ---------------------------------------------------------------------------

/// Filter choices derivable from the currently loaded action items.
/// Recomputed on demand from the buckets, never cached.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ActionFilterOptions {
    pub assignees: Vec<String>,
    pub repositories: Vec<String>,
    /// Unique by name; the first color seen wins.
    pub labels: Vec<Label>,
    pub languages: Vec<String>,
}

pub fn action_filter_options(classified: &Classified) -> ActionFilterOptions {
    let mut options = ActionFilterOptions::default();

    for item in classified.all() {
        push_unique(&mut options.assignees, &item.author.login);
        push_unique(&mut options.repositories, &item.repo);
        if let Some(lang) = &item.language {
            push_unique(&mut options.languages, lang);
        }
        for label in &item.labels {
            if !options.labels.iter().any(|l| l.name == label.name) {
                options.labels.push(label.clone());
            }
        }
    }

    options.assignees.sort();
    options.repositories.sort();
    options.languages.sort();
    options.labels.sort_by(|a, b| a.name.cmp(&b.name));
    options
}

/// Filter choices derivable from the currently loaded quick wins.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct QuickWinFilterOptions {
    pub languages: Vec<String>,
    pub repositories: Vec<String>,
}

pub fn quick_win_filter_options(
    good_issues: &[QuickWinIssue],
    easy_fixes: &[QuickWinIssue],
) -> QuickWinFilterOptions {
    let mut options = QuickWinFilterOptions::default();

    for issue in good_issues.iter().chain(easy_fixes.iter()) {
        if let Some(lang) = &issue.language {
            push_unique(&mut options.languages, lang);
        }
        push_unique(&mut options.repositories, &issue.repository);
    }

    options.languages.sort();
    options.repositories.sort();
    options
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
