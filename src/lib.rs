//! greencache - golf course POI ingestion and caching.
//!
//! Takes raw geocoded coordinate records from a third-party course data
//! provider and turns them into a hole-indexed map of course features
//! (greens, bunkers, hazards, tees) suitable for distance calculations and
//! on-course rendering, cached per course with a 90-day freshness policy.
//!
//! The pipeline has three stages:
//!
//! 1. [`api::ApiClient`] fetches raw coordinates for a provider course id
//! 2. [`poi::normalize`] classifies and groups them per hole (pure, no I/O)
//! 3. [`service::PoiService`] owns freshness and replace-on-refresh
//!    semantics against the local [`cache::CacheManager`]

pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod poi;
pub mod service;

pub use api::{ApiClient, ApiError, CoordinateFetcher};
pub use cache::CacheManager;
pub use config::Config;
pub use models::{CachedCourse, CoursePoi, HolePoi, RawCoordinate};
pub use poi::normalize;
pub use service::{PoiError, PoiLookup, PoiService};
