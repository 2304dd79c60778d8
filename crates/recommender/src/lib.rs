//! # Recommender Crate
//!
//! Taste profiles and candidate scoring for bottle recommendations.
//!
//! ## Components
//!
//! ### Profiles
//! - [`analyze_bar`]: one user's bar into a [`TasteProfile`]
//! - [`aggregate_profiles`]: several profiles into one for a room
//!
//! ### Candidates
//! [`CandidatePrefilter`] scores the catalog against a profile and keeps
//! the top 20 by default.
//!
//! ### Attribution
//! [`find_influential_user`] names the room member a bottle suits best.
//!
//! ## Example Usage
//!
//! ```ignore
//! use recommender::{analyze_bar, CandidatePrefilter};
//! use std::sync::Arc;
//!
//! let profile = analyze_bar(&bar);
//! let prefilter = CandidatePrefilter::new(Arc::new(catalog));
//! let candidates = prefilter.get_candidates(&profile);
//! ```

pub mod error;
pub mod types;
pub mod profile;
pub mod prefilter;
pub mod influence;

pub use error::{RecommendError, Result};
pub use types::{BarEntry, BarProduct, Candidate, RoomMember, TasteProfile};
pub use profile::{aggregate_profiles, analyze_bar};
pub use prefilter::CandidatePrefilter;
pub use influence::find_influential_user;
