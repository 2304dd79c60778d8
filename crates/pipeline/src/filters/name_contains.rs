//! Filter for free-text search over product names.

use crate::traits::Filter;
use data_loader::LiquorRecord;

/// Keeps records whose name or brand contains a substring.
///
/// ## Algorithm
/// The needle is lowercased once at construction; each record's name
/// (and brand, if any) is lowercased and searched.
pub struct NameContainsFilter {
    needle: String,
}

impl NameContainsFilter {
    pub fn new(needle: &str) -> Self {
        Self {
            needle: needle.to_lowercase(),
        }
    }
}

impl Filter for NameContainsFilter {
    fn name(&self) -> &str {
        "NameContainsFilter"
    }

    fn matches(&self, record: &LiquorRecord) -> bool {
        record.name.to_lowercase().contains(&self.needle)
            || record
                .brand
                .as_deref()
                .is_some_and(|brand| brand.to_lowercase().contains(&self.needle))
    }
}
