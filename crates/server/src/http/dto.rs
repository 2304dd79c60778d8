//! Data Transfer Objects for the HTTP API.

use data_loader::{CatalogStats, LiquorRecord};
use recommender::BarEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Records in the loaded catalog
    pub records: usize,
}

/// Response for `GET /v1/liquors`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquorListResponse {
    /// Records in this page
    pub count: usize,
    /// Records matched before `offset`/`limit`
    pub total: usize,
    pub offset: usize,
    pub records: Vec<LiquorRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CatalogStats,
    pub rows_read: usize,
    pub rows_loaded: usize,
    pub rows_skipped: usize,
}

/// Request body for personal recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalRequest {
    pub username: String,
    /// The user's bar; an empty bar falls back to a default profile
    #[serde(default)]
    pub bar: Vec<BarEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberBar {
    pub username: String,
    #[serde(default)]
    pub bar: Vec<BarEntry>,
}

/// Request body for room recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomRequest {
    pub members: Vec<MemberBar>,
}
