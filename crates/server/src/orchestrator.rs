//! # Recommendation Orchestrator
//!
//! Coordinates the recommendation pipeline:
//! 1. Analyze the bar(s) into a taste profile
//! 2. Prefilter the catalog into scored candidates
//! 3. Rank and select the top N
//! 4. Attach an explanation (and, for rooms, the most influential member)
//!
//! Profile analysis and scoring are CPU-bound, so each request runs them
//! on the blocking pool.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use data_loader::{Catalog, LiquorRecord, RecordId};
use recommender::{
    aggregate_profiles, analyze_bar, find_influential_user, BarEntry, Candidate,
    CandidatePrefilter, RecommendError, RoomMember, TasteProfile,
};

/// Number of bottles returned per request
pub const DEFAULT_LIMIT: usize = 5;
/// Number of candidates kept by the prefilter
pub const DEFAULT_CANDIDATES: usize = 20;

/// One recommended bottle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BottleRecommendation {
    pub id: RecordId,
    pub name: String,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub abv: Option<f64>,
    pub score: u32,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub influenced_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalRecommendations {
    pub username: String,
    pub profile: TasteProfile,
    pub recommendations: Vec<BottleRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomRecommendations {
    pub members: Vec<String>,
    pub profile: TasteProfile,
    pub recommendations: Vec<BottleRecommendation>,
}

/// Main orchestrator that coordinates the recommendation pipeline
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    catalog: Arc<Catalog>,
    prefilter: Arc<CandidatePrefilter>,
    limit: usize,
}

impl RecommendationOrchestrator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let prefilter = CandidatePrefilter::new(catalog.clone())
            .with_max_candidates(DEFAULT_CANDIDATES);
        Self {
            catalog,
            prefilter: Arc::new(prefilter),
            limit: DEFAULT_LIMIT,
        }
    }

    /// Configure how many bottles are returned (default: 5)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Recommendations for a single user's bar
    pub async fn recommend_personal(
        &self,
        username: String,
        bar: Vec<BarEntry>,
    ) -> Result<PersonalRecommendations> {
        let start_time = Instant::now();
        let this = self.clone();

        let (profile, recommendations) = tokio::task::spawn_blocking(move || {
            let profile = analyze_bar(&bar);
            let candidates = this.prefilter.get_candidates(&profile);
            let recommendations = this.rank_and_select(&candidates, &profile, "your")?;
            Ok::<_, RecommendError>((profile, recommendations))
        })
        .await
        .context("Recommendation task panicked")??;

        info!(
            "Recommended {} bottles for {} in {:.2?}",
            recommendations.len(),
            username,
            start_time.elapsed()
        );

        Ok(PersonalRecommendations {
            username,
            profile,
            recommendations,
        })
    }

    /// Recommendations for a room of users, each attributed to the member
    /// it suits best
    pub async fn recommend_room(
        &self,
        members: Vec<(String, Vec<BarEntry>)>,
    ) -> Result<RoomRecommendations> {
        let start_time = Instant::now();
        let this = self.clone();

        let (usernames, profile, recommendations) = tokio::task::spawn_blocking(move || {
            let members: Vec<RoomMember> = members
                .into_iter()
                .map(|(username, bar)| RoomMember {
                    username,
                    profile: analyze_bar(&bar),
                })
                .collect();

            let profiles: Vec<TasteProfile> = members.iter().map(|m| m.profile.clone()).collect();
            let profile = aggregate_profiles(&profiles)?;

            let candidates = this.prefilter.get_candidates(&profile);
            let mut recommendations = this.rank_and_select(&candidates, &profile, "the room's")?;
            for recommendation in &mut recommendations {
                if let Some(record) = this.catalog.get(recommendation.id) {
                    recommendation.influenced_by =
                        find_influential_user(record, &members).map(str::to_string);
                }
            }

            let usernames = members.into_iter().map(|m| m.username).collect::<Vec<_>>();
            Ok::<_, RecommendError>((usernames, profile, recommendations))
        })
        .await
        .context("Room recommendation task panicked")??;

        info!(
            "Recommended {} bottles for a room of {} in {:.2?}",
            recommendations.len(),
            usernames.len(),
            start_time.elapsed()
        );

        Ok(RoomRecommendations {
            members: usernames,
            profile,
            recommendations,
        })
    }

    /// Take the top `limit` candidates, which arrive sorted best first
    fn rank_and_select(
        &self,
        candidates: &[Candidate],
        profile: &TasteProfile,
        audience: &str,
    ) -> std::result::Result<Vec<BottleRecommendation>, RecommendError> {
        if candidates.len() < self.limit {
            return Err(RecommendError::InsufficientCandidates {
                found: candidates.len(),
                required: self.limit,
            });
        }

        let recommendations = candidates
            .iter()
            .take(self.limit)
            .filter_map(|candidate| {
                let record = self.catalog.get(candidate.record_id)?;
                Some(BottleRecommendation {
                    id: record.id,
                    name: record.name.clone(),
                    category: record.category.clone(),
                    price: record.price,
                    abv: record.effective_abv(),
                    score: candidate.score,
                    reason: explain(record, candidate, profile, audience),
                    influenced_by: None,
                })
            })
            .collect();

        Ok(recommendations)
    }
}

/// Human-readable reason built from what the candidate matched
fn explain(record: &LiquorRecord, candidate: &Candidate, profile: &TasteProfile, audience: &str) -> String {
    let mut parts = Vec::new();
    if candidate.spirit_match {
        parts.push(format!("matches {} favorite spirit ({})", audience, profile.favorite_spirit()));
    }
    if candidate.abv_match {
        parts.push(format!(
            "sits near {} usual {:.0} proof",
            audience, profile.avg_proof
        ));
    }
    if candidate.affordable
        && let Some(price) = record.price
    {
        parts.push(format!("priced at ${:.2}", price));
    }

    match parts.split_first() {
        Some((first, rest)) => {
            let mut reason = capitalize(first);
            for part in rest {
                reason.push_str(", ");
                reason.push_str(part);
            }
            reason
        }
        None => format!("Something different from {} usual pours", audience),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
