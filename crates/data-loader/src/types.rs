//! Core domain types for the liquor catalog.
//!
//! The catalog is built once at startup and never mutated afterwards,
//! so every accessor here takes `&self` and hands out borrows.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a catalog record
pub type RecordId = u64;

// =============================================================================
// Record Type
// =============================================================================

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquorRecord {
    pub id: RecordId,
    /// Display name, never empty
    pub name: String,
    /// Spirit type (whiskey, vodka, ...)
    pub category: Option<String>,
    /// Shelf price, non-negative when present
    pub price: Option<f64>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub origin: Option<String>,
    /// Alcohol by volume, 0-100
    pub abv: Option<f64>,
    pub proof: Option<f64>,
    pub fair_price: Option<f64>,
    pub ranking: Option<u32>,
    /// Any other non-blank columns, keyed by lowercased header
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl LiquorRecord {
    /// Create a record with only the required fields set.
    pub fn new(id: RecordId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: None,
            price: None,
            brand: None,
            size: None,
            origin: None,
            abv: None,
            proof: None,
            fair_price: None,
            ranking: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_abv(mut self, abv: f64) -> Self {
        self.abv = Some(abv);
        self
    }

    /// ABV if present, otherwise derived from proof (US proof = 2 x ABV).
    pub fn effective_abv(&self) -> Option<f64> {
        self.abv.or_else(|| self.proof.map(|p| p / 2.0))
    }
}

// =============================================================================
// Load Reporting
// =============================================================================

/// A data row that was rejected during loading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based line number in the source (header is line 1)
    pub line: u64,
    pub reason: String,
}

/// Summary of a single load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_loaded: usize,
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    pub fn rows_skipped(&self) -> usize {
        self.skipped.len()
    }
}

// =============================================================================
// Statistics Types
// =============================================================================

/// Precomputed catalog statistics
///
/// Computed once when the catalog is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub record_count: usize,
    /// Records per category, keyed by lowercased category
    pub category_counts: BTreeMap<String, usize>,
    /// Records without a category
    pub uncategorized: usize,
    pub priced_count: usize,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub mean_price: Option<f64>,
}

// =============================================================================
// Catalog - The In-Memory Dataset
// =============================================================================

/// The full, immutable collection of records in load order.
///
/// Besides the ordered records it keeps two secondary indices:
/// id => position and lowercased category => positions. Positions in
/// the category index are ascending, so walking one preserves load order.
#[derive(Debug, Default)]
pub struct Catalog {
    pub(crate) records: Vec<LiquorRecord>,
    pub(crate) id_index: HashMap<RecordId, usize>,
    pub(crate) category_index: HashMap<String, Vec<usize>>,
    pub(crate) stats: CatalogStats,
    pub(crate) report: LoadReport,
}

impl Catalog {
    /// All records in load order
    pub fn records(&self) -> &[LiquorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a record by id
    pub fn get(&self, id: RecordId) -> Option<&LiquorRecord> {
        self.id_index.get(&id).map(|&pos| &self.records[pos])
    }

    /// Positions (ascending) of records whose category equals `category`,
    /// compared case-insensitively after trimming.
    ///
    /// Returns an empty slice for unknown categories.
    pub fn positions_for_category(&self, category: &str) -> &[usize] {
        self.category_index
            .get(&normalize_key(category))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Distinct lowercased categories, sorted
    pub fn categories(&self) -> Vec<&str> {
        self.stats
            .category_counts
            .keys()
            .map(|k| k.as_str())
            .collect()
    }

    pub fn stats(&self) -> &CatalogStats {
        &self.stats
    }

    /// What happened while this catalog was loaded
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }
}

/// Lowercase and trim, used for every case-insensitive key in the crate
pub fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase()
}
