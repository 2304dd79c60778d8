//! Error types for the recommender crate.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    /// Room recommendations need at least one member profile
    #[error("No profiles provided for aggregation")]
    NoProfiles,

    /// Too few catalog records fit the profile to make a recommendation
    #[error("Insufficient candidates ({found}) for recommendations, need at least {required}")]
    InsufficientCandidates { found: usize, required: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecommendError>;
