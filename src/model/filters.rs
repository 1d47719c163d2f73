use serde::{Deserialize, Serialize};

use super::item::{Difficulty, ItemKind, SourceCategory};

/// Active filter criteria for the action-required view.
///
/// Every set-valued field is a set of strings (order irrelevant); the
/// default value of every field means "no restriction". Thresholds are
/// a positive number or unset; zero is never a semantic floor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionRequiredFilters {
    pub assignee: Vec<String>,
    pub repository: Vec<String>,
    pub labels: Vec<String>,
    pub types: Vec<ItemKind>,
    /// Minimum days since last update.
    pub staleness: Option<u32>,
    pub language: Vec<String>,
}

impl ActionRequiredFilters {
    pub fn has_active_filters(&self) -> bool {
        !self.assignee.is_empty()
            || !self.repository.is_empty()
            || !self.labels.is_empty()
            || !self.types.is_empty()
            || self.staleness.is_some()
            || !self.language.is_empty()
    }
}

/// Active filter criteria for the quick-wins view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuickWinsFilters {
    pub difficulty: Vec<Difficulty>,
    pub language: Vec<String>,
    pub source_category: Vec<SourceCategory>,
    pub repository: Vec<String>,
    pub min_stars: Option<u32>,
}

impl QuickWinsFilters {
    pub fn has_active_filters(&self) -> bool {
        !self.difficulty.is_empty()
            || !self.language.is_empty()
            || !self.source_category.is_empty()
            || !self.repository.is_empty()
            || self.min_stars.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_unrestricted() {
        assert!(!ActionRequiredFilters::default().has_active_filters());
        assert!(!QuickWinsFilters::default().has_active_filters());
    }

    #[test]
    fn test_threshold_counts_as_active() {
        let f = ActionRequiredFilters {
            staleness: Some(7),
            ..Default::default()
        };
        assert!(f.has_active_filters());

        let q = QuickWinsFilters {
            min_stars: Some(100),
            ..Default::default()
        };
        assert!(q.has_active_filters());
    }
}
