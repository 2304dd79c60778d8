//! Build taste profiles from users' bars.
//!
//! A profile is gathered once per request and then drives candidate
//! generation, the same way a user context is built up front before any
//! catalog scan.

use crate::error::{RecommendError, Result};
use crate::types::{BarEntry, TasteProfile};
use std::collections::HashMap;

/// Analyze a user's bar into a [`TasteProfile`].
///
/// An empty bar yields [`TasteProfile::default`].
pub fn analyze_bar(bar: &[BarEntry]) -> TasteProfile {
    if bar.is_empty() {
        return TasteProfile::default();
    }

    let proofs: Vec<f64> = bar.iter().map(|e| e.product.proof).collect();
    let prices: Vec<f64> = bar.iter().map(|e| e.product.average_msrp).collect();

    let avg_proof = proofs.iter().sum::<f64>() / proofs.len() as f64;

    let spirits = rank_by_count(bar.iter().map(|e| e.product.spirit.as_str()));
    let brands = rank_by_count(bar.iter().map(|e| e.product.brand.as_str()));

    TasteProfile {
        avg_proof,
        proof_range: min_max(&proofs),
        price_range: min_max(&prices),
        spirits: first_seen(bar.iter().map(|e| e.product.spirit.as_str())),
        favorite_spirits: spirits,
        favorite_brands: brands,
    }
}

/// Combine several profiles into one for a room.
///
/// - favorite spirit: most common across every member's favorites
/// - average proof: mean of member averages
/// - ranges: union of member ranges
pub fn aggregate_profiles(profiles: &[TasteProfile]) -> Result<TasteProfile> {
    if profiles.is_empty() {
        return Err(RecommendError::NoProfiles);
    }

    let favorite_spirits = rank_by_count(
        profiles
            .iter()
            .flat_map(|p| p.favorite_spirits.iter().map(String::as_str)),
    );
    let favorite = favorite_spirits
        .into_iter()
        .next()
        .unwrap_or_else(|| crate::types::DEFAULT_SPIRIT.to_string());

    let avg_proof = profiles.iter().map(|p| p.avg_proof).sum::<f64>() / profiles.len() as f64;

    let proof_range = (
        profiles.iter().map(|p| p.proof_range.0).fold(f64::INFINITY, f64::min),
        profiles.iter().map(|p| p.proof_range.1).fold(f64::NEG_INFINITY, f64::max),
    );
    let price_range = (
        profiles.iter().map(|p| p.price_range.0).fold(f64::INFINITY, f64::min),
        profiles.iter().map(|p| p.price_range.1).fold(f64::NEG_INFINITY, f64::max),
    );

    Ok(TasteProfile {
        avg_proof,
        proof_range,
        price_range,
        spirits: first_seen(profiles.iter().flat_map(|p| p.spirits.iter().map(String::as_str))),
        favorite_spirits: vec![favorite],
        favorite_brands: rank_by_count(
            profiles
                .iter()
                .flat_map(|p| p.favorite_brands.iter().map(String::as_str)),
        ),
    })
}

/// Distinct values ordered by count descending; ties keep first-seen order.
/// Blank values are ignored.
fn rank_by_count<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for value in values.filter(|v| !v.trim().is_empty()) {
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    // sort_by is stable, so equal counts stay in first-seen order
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.into_iter().map(str::to_string).collect()
}

fn first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values.filter(|v| !v.trim().is_empty()) {
        if !out.iter().any(|seen| seen == value) {
            out.push(value.to_string());
        }
    }
    out
}

fn min_max(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}
