//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible predicates to be applied to catalog records.

use data_loader::LiquorRecord;

/// Core trait for filtering records.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` lets the pipeline evaluate a filter from Rayon workers
/// - Filters only see a borrowed record; the catalog is never copied
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether `record` passes this filter.
    fn matches(&self, record: &LiquorRecord) -> bool;
}
