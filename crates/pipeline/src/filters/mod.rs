//! Filter implementations for the query pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod abv_range;
pub mod category;
pub mod name_contains;
pub mod price_range;

// Re-export for convenience
pub use abv_range::AbvRangeFilter;
pub use category::CategoryFilter;
pub use name_contains::NameContainsFilter;
pub use price_range::PriceRangeFilter;

/// Inclusive bounds check. A missing value never passes, since range
/// filters are only built when at least one bound is set.
pub(crate) fn within_bounds(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    match value {
        Some(v) => min.is_none_or(|lo| v >= lo) && max.is_none_or(|hi| v <= hi),
        None => false,
    }
}
