//! HTTP client module for the golf course data provider.
//!
//! This module provides the `ApiClient` for fetching raw coordinate data
//! from the provider's REST API, plus the `CoordinateFetcher` seam the
//! policy layer depends on so tests can substitute a canned fetcher.
//!
//! The API uses bearer token authentication with a per-account key.

pub mod client;
pub mod error;

use std::future::Future;

use anyhow::Result;

use crate::models::RawCoordinate;

pub use client::ApiClient;
pub use error::ApiError;

/// Source of raw coordinate records for a course.
pub trait CoordinateFetcher {
    fn fetch_coordinates(
        &self,
        provider_id: &str,
    ) -> impl Future<Output = Result<Vec<RawCoordinate>>> + Send;
}
