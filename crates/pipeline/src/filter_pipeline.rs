//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern. A record must
//! pass every filter to survive (logical AND).

use crate::filters::{AbvRangeFilter, CategoryFilter, NameContainsFilter, PriceRangeFilter};
use crate::params::QueryParams;
use crate::traits::Filter;
use data_loader::LiquorRecord;
use rayon::prelude::*;
use tracing;

/// Inputs at least this large are filtered with Rayon.
const PARALLEL_THRESHOLD: usize = 4096;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(CategoryFilter::new("vodka"))
///     .add_filter(PriceRangeFilter::new(Some(20.0), Some(50.0)));
///
/// let matched = pipeline.apply(catalog.records().iter().collect());
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Build the pipeline for the predicates set in `params`.
    ///
    /// Slicing and sorting are not filters and are left to the caller.
    pub fn from_params(params: &QueryParams) -> Self {
        let mut pipeline = Self::new();
        if let Some(category) = &params.category {
            pipeline = pipeline.add_filter(CategoryFilter::new(category));
        }
        if let Some(needle) = &params.name_contains {
            pipeline = pipeline.add_filter(NameContainsFilter::new(needle));
        }
        if params.price_min.is_some() || params.price_max.is_some() {
            pipeline = pipeline.add_filter(PriceRangeFilter::new(params.price_min, params.price_max));
        }
        if params.abv_min.is_some() || params.abv_max.is_some() {
            pipeline = pipeline.add_filter(AbvRangeFilter::new(params.abv_min, params.abv_max));
        }
        pipeline
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the records.
    ///
    /// The relative order of the input is preserved, including on the
    /// parallel path.
    pub fn apply<'a>(&self, records: Vec<&'a LiquorRecord>) -> Vec<&'a LiquorRecord> {
        let mut current = records;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = if current.len() >= PARALLEL_THRESHOLD {
                current
                    .into_par_iter()
                    .filter(|record| filter.matches(record))
                    .collect()
            } else {
                current
                    .into_iter()
                    .filter(|record| filter.matches(record))
                    .collect()
            };
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
