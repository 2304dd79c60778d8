//! # Data Loader Crate
//!
//! This crate loads the packaged liquor CSV into an immutable, indexed
//! in-memory [`Catalog`].
//!
//! ## Main Components
//!
//! - **types**: Core domain types (LiquorRecord, Catalog, LoadReport, CatalogStats)
//! - **parser**: Header mapping and row parsing
//! - **index**: Build the catalog, its indices and statistics
//! - **error**: Error types for dataset loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//!
//! // Load once at startup
//! let catalog = Catalog::load_from_file(Path::new("data/liquors.csv"))?;
//!
//! let record = catalog.get(1).unwrap();
//! let vodkas = catalog.positions_for_category("vodka");
//!
//! println!("{} has {} vodkas", record.name, vodkas.len());
//! ```
//!
//! ## Row Policy
//!
//! A malformed row (blank name, unparseable or negative number, duplicate
//! id) is always skipped and counted in [`LoadReport`]; it never aborts
//! the load. A structurally incompatible header always does.

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DatasetError, Result};
pub use types::{
    // Type aliases
    RecordId,
    // Core types
    LiquorRecord,
    Catalog,
    CatalogStats,
    LoadReport,
    SkippedRow,
    // Helpers
    normalize_key,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<LiquorRecord> {
        vec![
            LiquorRecord::new(1, "Jameson").with_category("whiskey").with_price(30.0),
            LiquorRecord::new(2, "Grey Goose").with_category("Vodka").with_price(45.0),
            LiquorRecord::new(3, "Mystery Bottle"),
        ]
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::from_records(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.stats().record_count, 0);
        assert!(catalog.stats().mean_price.is_none());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::from_records(sample_records()).unwrap();

        assert_eq!(catalog.get(2).unwrap().name, "Grey Goose");
        assert!(catalog.get(999).is_none());
    }

    #[test]
    fn test_category_index_is_case_insensitive() {
        let catalog = Catalog::from_records(sample_records()).unwrap();

        assert_eq!(catalog.positions_for_category("VODKA"), &[1]);
        assert_eq!(catalog.positions_for_category(" whiskey "), &[0]);
        assert!(catalog.positions_for_category("rum").is_empty());
        assert_eq!(catalog.categories(), vec!["vodka", "whiskey"]);
    }

    #[test]
    fn test_stats() {
        let catalog = Catalog::from_records(sample_records()).unwrap();
        let stats = catalog.stats();

        assert_eq!(stats.record_count, 3);
        assert_eq!(stats.priced_count, 2);
        assert_eq!(stats.uncategorized, 1);
        assert_eq!(stats.min_price, Some(30.0));
        assert_eq!(stats.max_price, Some(45.0));
        assert_eq!(stats.mean_price, Some(37.5));
    }

    #[test]
    fn test_from_records_rejects_duplicates() {
        let records = vec![LiquorRecord::new(1, "A"), LiquorRecord::new(1, "B")];
        assert!(matches!(
            Catalog::from_records(records),
            Err(DatasetError::Validation(_))
        ));
    }

    #[test]
    fn test_from_records_rejects_blank_name() {
        let records = vec![LiquorRecord::new(1, "  ")];
        assert!(Catalog::from_records(records).is_err());
    }

    #[test]
    fn test_effective_abv_falls_back_to_proof() {
        let mut record = LiquorRecord::new(1, "Wild Turkey 101");
        record.proof = Some(101.0);
        assert_eq!(record.effective_abv(), Some(50.5));

        let record = record.with_abv(50.0);
        assert_eq!(record.effective_abv(), Some(50.0));
    }
}
