//! Filter on alcohol content.

use super::within_bounds;
use crate::traits::Filter;
use data_loader::LiquorRecord;

/// Keeps records whose ABV lies within `[min, max]`.
///
/// Uses [`LiquorRecord::effective_abv`], so a record with only a proof
/// value still participates. Records with neither are excluded.
pub struct AbvRangeFilter {
    min: Option<f64>,
    max: Option<f64>,
}

impl AbvRangeFilter {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }
}

impl Filter for AbvRangeFilter {
    fn name(&self) -> &str {
        "AbvRangeFilter"
    }

    fn matches(&self, record: &LiquorRecord) -> bool {
        within_bounds(record.effective_abv(), self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abv_range_uses_proof_fallback() {
        let filter = AbvRangeFilter::new(Some(50.0), None);

        let mut overproof = LiquorRecord::new(1, "Wild Turkey 101");
        overproof.proof = Some(101.0);

        assert!(filter.matches(&overproof));
        assert!(!filter.matches(&LiquorRecord::new(2, "Jameson").with_abv(40.0)));
        assert!(!filter.matches(&LiquorRecord::new(3, "Unlabeled")));
    }
}
