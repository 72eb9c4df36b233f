//! Local caching module for normalized course POI.
//!
//! This module provides the `CacheManager` for storing and retrieving
//! per-course POI data locally. Each course is one JSON file holding the
//! `poi` hole array and its `updated_at` timestamp; staleness is judged
//! against a 90-day freshness window.

pub mod manager;

pub use manager::CacheManager;
