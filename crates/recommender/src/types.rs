//! Types shared by profile analysis and candidate generation.

use data_loader::RecordId;
use serde::{de, Deserialize, Deserializer, Serialize};

/// Proof assumed for an empty bar
pub const DEFAULT_PROOF: f64 = 80.0;
/// Price assumed for an empty bar
pub const DEFAULT_PRICE: f64 = 30.0;
pub const DEFAULT_SPIRIT: &str = "whiskey";
pub const DEFAULT_BRAND: &str = "Jameson";

/// A bottle in a user's bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarProduct {
    pub name: String,
    #[serde(default)]
    pub brand: String,
    pub spirit: String,
    /// US proof (2 x ABV)
    #[serde(deserialize_with = "number_or_string")]
    pub proof: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub average_msrp: f64,
}

/// Bar exports carry numbers either as JSON numbers or as strings ("90", "$34.99").
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| de::Error::custom(format!("expected a number, got '{}'", text))),
    }
}

/// One entry of a user's bar, as the bar API shapes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarEntry {
    pub product: BarProduct,
}

/// Summary of what a user (or a room of users) drinks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TasteProfile {
    pub avg_proof: f64,
    /// (min, max)
    pub proof_range: (f64, f64),
    /// (min, max)
    pub price_range: (f64, f64),
    /// Distinct spirits in first-seen order
    pub spirits: Vec<String>,
    /// Spirits by count, most frequent first; ties keep first-seen order
    pub favorite_spirits: Vec<String>,
    pub favorite_brands: Vec<String>,
}

impl TasteProfile {
    /// Most frequent spirit, or whiskey if the profile has none
    pub fn favorite_spirit(&self) -> &str {
        self.favorite_spirits
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_SPIRIT)
    }

    /// Average ABV, derived from the average proof
    pub fn target_abv(&self) -> f64 {
        self.avg_proof / 2.0
    }
}

impl Default for TasteProfile {
    /// The profile used for an empty bar
    fn default() -> Self {
        Self {
            avg_proof: DEFAULT_PROOF,
            proof_range: (DEFAULT_PROOF, DEFAULT_PROOF),
            price_range: (DEFAULT_PRICE, DEFAULT_PRICE),
            spirits: vec![DEFAULT_SPIRIT.to_string()],
            favorite_spirits: vec![DEFAULT_SPIRIT.to_string()],
            favorite_brands: vec![DEFAULT_BRAND.to_string()],
        }
    }
}

/// A catalog record scored against a taste profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub record_id: RecordId,
    pub score: u32,
    pub abv_match: bool,
    pub spirit_match: bool,
    pub affordable: bool,
}

/// A named member of a room with their analyzed profile
#[derive(Debug, Clone, PartialEq)]
pub struct RoomMember {
    pub username: String,
    pub profile: TasteProfile,
}
