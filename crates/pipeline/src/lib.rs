//! Query engine for the liquor catalog.
//!
//! This crate provides:
//! - Filter trait and implementations for record predicates
//! - FilterPipeline for composing filters
//! - QueryParams, the typed form of a request's query string
//! - `query` / `execute`, which filter, sort and slice a Catalog
//!
//! ## Architecture
//! A query is processed in stages:
//! 1. Raw key/value pairs are mapped to QueryParams (unknown keys rejected)
//! 2. Filters remove non-matching records (AND across options)
//! 3. An optional explicit sort reorders the survivors
//! 4. `offset`/`limit` slice the result
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{query, QueryParams};
//!
//! let params = QueryParams::from_pairs([("category", "vodka"), ("price_max", "40")])?;
//! let records = query(&catalog, &params)?;
//! ```

pub mod error;
pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod params;
pub mod engine;

// Re-export main types
pub use error::{InvalidQueryError, Result};
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use params::{QueryOption, QueryParams, SortDirection, SortKey, SortSpec};
pub use engine::{execute, query, QueryPage};
