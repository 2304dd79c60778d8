//! Candidate prefilter
//!
//! Scores every catalog record against a taste profile and keeps the best
//! few as candidates for the final recommendation step.
//!
//! ## Scoring
//! - +2 when the record's ABV is within `abv_tolerance` of the target ABV
//! - +3 when the record's category equals the favorite spirit (case-insensitive)
//! - +1 when the record's price is at or under `price_ceiling`
//!
//! Records missing an ABV or a price cannot be scored and are skipped.
//! A record without a category is still scored, it just never matches the
//! spirit. Equal scores keep catalog order.

use crate::types::{Candidate, TasteProfile};
use data_loader::{normalize_key, Catalog, LiquorRecord};
use std::sync::Arc;
use tracing::{debug, instrument};

pub const ABV_MATCH_POINTS: u32 = 2;
pub const SPIRIT_MATCH_POINTS: u32 = 3;
pub const AFFORDABLE_POINTS: u32 = 1;

/// Scores catalog records against a profile
pub struct CandidatePrefilter {
    /// Shared reference to the catalog
    catalog: Arc<Catalog>,

    /// Maximum ABV distance that still counts as a match
    abv_tolerance: f64,

    /// Highest price that counts as affordable
    price_ceiling: f64,

    max_candidates: usize,
}

impl CandidatePrefilter {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            abv_tolerance: 5.0,
            price_ceiling: 100.0,
            max_candidates: 20,
        }
    }

    /// Configure the ABV tolerance (default: 5.0)
    pub fn with_abv_tolerance(mut self, tolerance: f64) -> Self {
        self.abv_tolerance = tolerance;
        self
    }

    /// Configure the affordable price ceiling (default: 100.0)
    pub fn with_price_ceiling(mut self, ceiling: f64) -> Self {
        self.price_ceiling = ceiling;
        self
    }

    /// Configure how many candidates are kept (default: 20)
    pub fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = max;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Candidates for `profile`, best first
    #[instrument(skip(self, profile), fields(spirit = profile.favorite_spirit()))]
    pub fn get_candidates(&self, profile: &TasteProfile) -> Vec<Candidate> {
        self.candidates_for(profile.favorite_spirit(), profile.target_abv())
    }

    /// Candidates for an explicit spirit and target ABV, best first
    pub fn candidates_for(&self, favorite_spirit: &str, target_abv: f64) -> Vec<Candidate> {
        let spirit = normalize_key(favorite_spirit);

        let mut candidates: Vec<Candidate> = self
            .catalog
            .records()
            .iter()
            .filter_map(|record| self.score(record, &spirit, target_abv))
            .collect();

        // Stable: equal scores stay in catalog order
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates.truncate(self.max_candidates);

        debug!(
            "Kept {} candidates for spirit '{}' at {:.1}% ABV",
            candidates.len(),
            favorite_spirit,
            target_abv
        );
        candidates
    }

    fn score(&self, record: &LiquorRecord, spirit: &str, target_abv: f64) -> Option<Candidate> {
        let abv = record.effective_abv()?;
        let price = record.price?;

        let abv_match = (abv - target_abv).abs() <= self.abv_tolerance;
        let spirit_match = record
            .category
            .as_deref()
            .is_some_and(|category| normalize_key(category) == spirit);
        let affordable = price <= self.price_ceiling;

        let mut score = 0;
        if abv_match {
            score += ABV_MATCH_POINTS;
        }
        if spirit_match {
            score += SPIRIT_MATCH_POINTS;
        }
        if affordable {
            score += AFFORDABLE_POINTS;
        }

        Some(Candidate {
            record_id: record.id,
            score,
            abv_match,
            spirit_match,
            affordable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_catalog() -> Arc<Catalog> {
        let records = vec![
            LiquorRecord::new(1, "Cheap Vodka").with_category("vodka").with_price(15.0).with_abv(35.0),
            LiquorRecord::new(2, "Bourbon").with_category("Whiskey").with_price(40.0).with_abv(45.0),
            LiquorRecord::new(3, "Old Rye").with_category("whiskey").with_price(250.0).with_abv(55.0),
            LiquorRecord::new(4, "No Price").with_category("whiskey").with_abv(45.0),
            LiquorRecord::new(5, "Rye").with_category("whiskey").with_price(30.0).with_abv(46.0),
        ];
        Arc::new(Catalog::from_records(records).unwrap())
    }

    #[test]
    fn test_scoring_and_order() {
        let prefilter = CandidatePrefilter::new(create_test_catalog());
        let candidates = prefilter.candidates_for("WHISKEY", 45.0);

        let ids: Vec<u64> = candidates.iter().map(|c| c.record_id).collect();
        // 2 and 5 score 6, 3 scores 3, 1 scores 1; 4 has no price
        assert_eq!(ids, vec![2, 5, 3, 1]);
        assert_eq!(candidates[0].score, 6);
        assert_eq!(candidates[2].score, 3);
        assert!(!candidates[2].affordable);
        assert_eq!(candidates[3].score, 1);
    }

    #[test]
    fn test_uncategorized_record_still_scores() {
        let records = vec![
            LiquorRecord::new(1, "Mystery Bottle").with_price(20.0).with_abv(45.0),
            LiquorRecord::new(2, "Unpriced").with_category("whiskey").with_abv(45.0),
        ];
        let prefilter = CandidatePrefilter::new(Arc::new(Catalog::from_records(records).unwrap()));
        let candidates = prefilter.candidates_for("whiskey", 45.0);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].record_id, 1);
        assert_eq!(candidates[0].score, ABV_MATCH_POINTS + AFFORDABLE_POINTS);
        assert!(!candidates[0].spirit_match);
    }

    #[test]
    fn test_max_candidates() {
        let prefilter = CandidatePrefilter::new(create_test_catalog()).with_max_candidates(2);
        assert_eq!(prefilter.candidates_for("whiskey", 45.0).len(), 2);
    }

    #[test]
    fn test_profile_drives_candidates() {
        let prefilter = CandidatePrefilter::new(create_test_catalog());
        let profile = TasteProfile {
            avg_proof: 80.0,
            favorite_spirits: vec!["vodka".to_string()],
            ..TasteProfile::default()
        };
        let candidates = prefilter.get_candidates(&profile);
        assert_eq!(candidates[0].record_id, 1);
        assert_eq!(candidates[0].score, 6);
    }
}
