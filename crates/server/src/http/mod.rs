//! HTTP layer for the liquor catalog service.
//!
//! ```text
//! axum handlers ──► pipeline::execute (inline, read-only catalog)
//!               └─► RecommendationOrchestrator (blocking pool)
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
