//! Filter codec: the lossless mapping between filter state and a flat
//! string-keyed query-parameter map.
//!
//! Array fields are comma-joined and omitted when empty; numeric fields
//! are emitted as decimal strings and omitted when unset (zero is the
//! "unset" sentinel, never a threshold). Decoding an absent key yields
//! the field default; malformed numbers and unknown enum tokens coerce
//! to defaults instead of erroring. The codec owns only its own keys;
//! anything else in the map (the `tab` parameter in particular) is left
//! untouched.

use std::collections::BTreeMap;

use crate::model::filters::{ActionRequiredFilters, QuickWinsFilters};
use crate::model::item::{Difficulty, ItemKind, SourceCategory};

pub type QueryParams = BTreeMap<String, String>;

/// Keys owned by the action-required codec.
pub const ACTION_REQUIRED_KEYS: &[&str] = &[
    "assignee",
    "repository",
    "labels",
    "type",
    "staleness",
    "language",
];

/// Keys owned by the quick-wins codec.
pub const QUICK_WINS_KEYS: &[&str] = &[
    "difficulty",
    "language",
    "sourceCategory",
    "repository",
    "minStars",
];

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

pub fn encode_action_filters(filters: &ActionRequiredFilters) -> QueryParams {
    let mut params = QueryParams::new();
    set_list(&mut params, "assignee", &filters.assignee);
    set_list(&mut params, "repository", &filters.repository);
    set_list(&mut params, "labels", &filters.labels);
    let types: Vec<String> = filters.types.iter().map(|t| t.as_str().to_string()).collect();
    set_list(&mut params, "type", &types);
    set_number(&mut params, "staleness", filters.staleness);
    set_list(&mut params, "language", &filters.language);
    params
}

pub fn encode_quick_wins_filters(filters: &QuickWinsFilters) -> QueryParams {
    let mut params = QueryParams::new();
    let difficulty: Vec<String> = filters
        .difficulty
        .iter()
        .map(|d| d.as_str().to_string())
        .collect();
    set_list(&mut params, "difficulty", &difficulty);
    set_list(&mut params, "language", &filters.language);
    let categories: Vec<String> = filters
        .source_category
        .iter()
        .map(|c| c.as_str().to_string())
        .collect();
    set_list(&mut params, "sourceCategory", &categories);
    set_list(&mut params, "repository", &filters.repository);
    set_number(&mut params, "minStars", filters.min_stars);
    params
}

/// Write the filter state into an existing parameter map, replacing
/// only the codec's own keys. An externally owned `tab` (or any other
/// key) survives unchanged.
pub fn apply_action_filters_to_query(filters: &ActionRequiredFilters, params: &mut QueryParams) {
    for key in ACTION_REQUIRED_KEYS {
        params.remove(*key);
    }
    params.extend(encode_action_filters(filters));
}

pub fn apply_quick_wins_filters_to_query(filters: &QuickWinsFilters, params: &mut QueryParams) {
    for key in QUICK_WINS_KEYS {
        params.remove(*key);
    }
    params.extend(encode_quick_wins_filters(filters));
}

fn set_list(params: &mut QueryParams, key: &str, values: &[String]) {
    if !values.is_empty() {
        params.insert(key.to_string(), values.join(","));
    }
}

fn set_number(params: &mut QueryParams, key: &str, value: Option<u32>) {
    if let Some(n) = value {
        if n > 0 {
            params.insert(key.to_string(), n.to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

pub fn decode_action_filters(params: &QueryParams) -> ActionRequiredFilters {
    ActionRequiredFilters {
        assignee: parse_list(params, "assignee"),
        repository: parse_list(params, "repository"),
        labels: parse_list(params, "labels"),
        types: parse_tokens(params, "type", ItemKind::parse),
        staleness: parse_number(params, "staleness"),
        language: parse_list(params, "language"),
    }
}

pub fn decode_quick_wins_filters(params: &QueryParams) -> QuickWinsFilters {
    QuickWinsFilters {
        difficulty: parse_tokens(params, "difficulty", Difficulty::parse),
        language: parse_list(params, "language"),
        source_category: parse_tokens(params, "sourceCategory", SourceCategory::parse),
        repository: parse_list(params, "repository"),
        min_stars: parse_number(params, "minStars"),
    }
}

fn parse_list(params: &QueryParams, key: &str) -> Vec<String> {
    match params.get(key) {
        None => Vec::new(),
        Some(raw) => raw
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect(),
    }
}

/// Comma-separated enum tokens; unknown tokens are dropped silently.
fn parse_tokens<T>(params: &QueryParams, key: &str, parse: fn(&str) -> Option<T>) -> Vec<T> {
    parse_list(params, key)
        .iter()
        .filter_map(|s| parse(s))
        .collect()
}

/// A threshold parameter. Absent, unparseable, or zero all decode to
/// "unset".
fn parse_number(params: &QueryParams, key: &str) -> Option<u32> {
    params
        .get(key)
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|n| *n > 0)
}
