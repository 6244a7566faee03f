// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod feed;
pub mod metrics;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::config::AppConfig;
pub use crate::feed::date::FeedDate;
pub use crate::feed::types::{Card, CardDetails, DayFeed, DetailLink, FeedKpis, SourceError};
pub use crate::feed::FeedAggregator;
