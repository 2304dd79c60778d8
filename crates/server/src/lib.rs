//! Server crate for the liquor catalog service.
//!
//! Wires the catalog, the query engine and the recommender behind an
//! axum HTTP API.

pub mod config;
pub mod http;
pub mod orchestrator;

pub use config::ServerConfig;
pub use http::{create_router, AppState};
pub use orchestrator::{
    BottleRecommendation, PersonalRecommendations, RecommendationOrchestrator,
    RoomRecommendations,
};
