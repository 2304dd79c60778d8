//! Filter to keep only one spirit category.

use crate::traits::Filter;
use data_loader::{normalize_key, LiquorRecord};

/// Keeps records whose category equals the wanted one.
///
/// Comparison is case-insensitive and ignores surrounding whitespace.
/// Records without a category never match.
pub struct CategoryFilter {
    category: String,
}

impl CategoryFilter {
    pub fn new(category: &str) -> Self {
        Self {
            category: normalize_key(category),
        }
    }
}

impl Filter for CategoryFilter {
    fn name(&self) -> &str {
        "CategoryFilter"
    }

    fn matches(&self, record: &LiquorRecord) -> bool {
        record
            .category
            .as_deref()
            .is_some_and(|category| normalize_key(category) == self.category)
    }
}
