//! Filter on shelf price.

use super::within_bounds;
use crate::traits::Filter;
use data_loader::LiquorRecord;

/// Keeps records priced within `[min, max]` (both inclusive, either optional).
///
/// Records without a price are excluded.
pub struct PriceRangeFilter {
    min: Option<f64>,
    max: Option<f64>,
}

impl PriceRangeFilter {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }
}

impl Filter for PriceRangeFilter {
    fn name(&self) -> &str {
        "PriceRangeFilter"
    }

    fn matches(&self, record: &LiquorRecord) -> bool {
        within_bounds(record.price, self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_range_filter() {
        let filter = PriceRangeFilter::new(Some(8.0), Some(12.0));

        assert!(!filter.matches(&LiquorRecord::new(1, "A").with_price(5.0)));
        assert!(filter.matches(&LiquorRecord::new(2, "B").with_price(10.0)));
        assert!(!filter.matches(&LiquorRecord::new(3, "C").with_price(15.0)));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let filter = PriceRangeFilter::new(Some(10.0), Some(10.0));
        assert!(filter.matches(&LiquorRecord::new(1, "A").with_price(10.0)));
    }

    #[test]
    fn test_unpriced_records_are_excluded() {
        let filter = PriceRangeFilter::new(None, Some(100.0));
        assert!(!filter.matches(&LiquorRecord::new(1, "A")));
    }
}
