//! Course POI lookup with freshness, stale-preserving fallback, and
//! refresh coalescing.
//!
//! `PoiService` is the one place that decides when to fetch. The normalize
//! core stays pure; the cache manager stays dumb; everything conditional
//! lives here:
//!
//! - fresh cache (within 90 days, non-empty) is served without a fetch
//! - stale/missing/forced lookups fetch, normalize, and atomically replace
//! - fetch failures and empty results fall back to stale cached data when
//!   any exists, without touching `updated_at`
//! - concurrent refreshes of the same course are coalesced behind a
//!   per-course async lock; unrelated courses refresh independently

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::api::{ApiError, CoordinateFetcher};
use crate::cache::CacheManager;
use crate::models::{CachedCourse, CoursePoi};
use crate::poi::normalize;

/// After a fetch that yielded no usable holes, don't hit the provider again
/// for the same course within this window, even on force-refresh.
const EMPTY_RETRY_MINUTES: i64 = 15;

/// Cache state for a course, decided before any fetch happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Freshness {
    /// No cached record at all - must fetch.
    Missing,
    /// Non-empty and within the freshness window - serve as-is.
    Fresh,
    /// Expired, empty, or refresh was forced - fetch and replace.
    Stale,
}

fn freshness(cached: Option<&CachedCourse>, force_refresh: bool) -> Freshness {
    match cached {
        None => Freshness::Missing,
        Some(_) if force_refresh => Freshness::Stale,
        Some(c) if c.is_stale() => Freshness::Stale,
        Some(_) => Freshness::Fresh,
    }
}

#[derive(Debug, Error)]
pub enum PoiError {
    /// The provider answered, but nothing in the batch classified and no
    /// previously cached data exists to fall back on.
    #[error("course {course_id} returned no usable POI data")]
    EmptyResult { course_id: String },
}

/// Result of a POI lookup.
///
/// `refreshed` reports whether this call hit the provider; `persist_error`
/// carries a cache write failure separately, because a successful fetch is
/// still returned to the caller even when it could not be persisted.
#[derive(Debug)]
pub struct PoiLookup {
    pub course: CoursePoi,
    pub refreshed: bool,
    pub persist_error: Option<anyhow::Error>,
}

impl PoiLookup {
    fn cached(course: CoursePoi) -> Self {
        Self {
            course,
            refreshed: false,
            persist_error: None,
        }
    }
}

pub struct PoiService<F> {
    cache: CacheManager,
    fetcher: F,
    /// Per-course refresh locks - at most one fetch in flight per course.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    /// Courses whose last fetch came back unusable, with the attempt time.
    /// In-memory only: the backoff applies within a session.
    empty_attempts: StdMutex<HashMap<String, DateTime<Utc>>>,
}

impl<F: CoordinateFetcher> PoiService<F> {
    pub fn new(cache: CacheManager, fetcher: F) -> Self {
        Self {
            cache,
            fetcher,
            locks: Mutex::new(HashMap::new()),
            empty_attempts: StdMutex::new(HashMap::new()),
        }
    }

    /// Get the POI for a course, fetching from the provider only when the
    /// cached copy is missing, stale, empty, or a refresh is forced.
    pub async fn get_course_poi(&self, course_id: &str, force_refresh: bool) -> Result<PoiLookup> {
        // Fast path without taking the course lock
        let cached = self.cache.load(course_id)?;
        if let (Freshness::Fresh, Some(c)) =
            (freshness(cached.as_ref(), force_refresh), cached.as_ref())
        {
            debug!(course_id, age_days = c.age_days(), "serving fresh cached POI");
            return Ok(PoiLookup::cached(c.clone().into_course_poi(course_id)));
        }

        let lock = self.course_lock(course_id).await;
        let _guard = lock.lock().await;

        // Re-check under the lock: a concurrent refresh may have finished
        // while we waited.
        let cached = self.cache.load(course_id)?;
        if let (Freshness::Fresh, Some(c)) =
            (freshness(cached.as_ref(), force_refresh), cached.as_ref())
        {
            debug!(course_id, "refresh coalesced onto a concurrent fetch");
            return Ok(PoiLookup::cached(c.clone().into_course_poi(course_id)));
        }

        // A recent unusable fetch means the provider has nothing for us
        // right now; don't hammer it again this session.
        if self.recently_empty(course_id) {
            if let Some(cached) = cached {
                debug!(course_id, "skipping refetch after recent empty result");
                return Ok(PoiLookup::cached(cached.into_course_poi(course_id)));
            }
            return Err(PoiError::EmptyResult {
                course_id: course_id.to_string(),
            }
            .into());
        }

        self.refresh(course_id, cached).await
    }

    /// Fetch, normalize, and replace the cached POI for a course.
    /// `cached` is whatever (possibly stale) data existed beforehand.
    async fn refresh(&self, course_id: &str, cached: Option<CachedCourse>) -> Result<PoiLookup> {
        info!(course_id, "refreshing course POI from provider");

        let records = match self.fetcher.fetch_coordinates(course_id).await {
            Ok(records) => records,
            Err(err) => return self.handle_fetch_failure(course_id, cached, err),
        };

        let holes = normalize(course_id, &records);
        if holes.is_empty() {
            return self.handle_empty_result(course_id, cached, records.len());
        }

        let fresh = CachedCourse::new(holes);
        let persist_error = match self.cache.save(course_id, &fresh) {
            Ok(()) => None,
            Err(err) => {
                // Fetch succeeded; report the write failure alongside the
                // data instead of discarding it.
                warn!(course_id, error = %err, "failed to persist refreshed POI");
                Some(err)
            }
        };

        self.clear_empty_attempt(course_id);
        Ok(PoiLookup {
            course: fresh.into_course_poi(course_id),
            refreshed: true,
            persist_error,
        })
    }

    /// Availability over freshness: a failed fetch serves stale data when
    /// any exists. Only a course with no cache at all propagates the error.
    fn handle_fetch_failure(
        &self,
        course_id: &str,
        cached: Option<CachedCourse>,
        err: anyhow::Error,
    ) -> Result<PoiLookup> {
        if let Some(cached) = cached {
            warn!(course_id, error = %err, "fetch failed, serving stale cached POI");
            return Ok(PoiLookup::cached(cached.into_course_poi(course_id)));
        }

        // Provider 404 means the course simply has no coordinate data.
        // Persist an empty marker and answer "no POI" instead of erroring,
        // so missing data never blocks the caller.
        if err
            .downcast_ref::<ApiError>()
            .is_some_and(ApiError::is_not_found)
        {
            info!(course_id, "provider has no coordinates for course, caching empty marker");
            let empty = CachedCourse::new(Vec::new());
            let persist_error = self.cache.save(course_id, &empty).err();
            self.mark_empty_attempt(course_id);
            return Ok(PoiLookup {
                course: empty.into_course_poi(course_id),
                refreshed: true,
                persist_error,
            });
        }

        Err(err).with_context(|| format!("failed to fetch POI for course {}", course_id))
    }

    /// A well-formed response in which nothing classified. Distinct from a
    /// transport failure: previously cached good data must never be
    /// overwritten with an empty result, and `updated_at` stays untouched
    /// so empty data is never marked fresh.
    fn handle_empty_result(
        &self,
        course_id: &str,
        cached: Option<CachedCourse>,
        record_count: usize,
    ) -> Result<PoiLookup> {
        warn!(course_id, record_count, "provider batch yielded zero usable holes");
        self.mark_empty_attempt(course_id);

        if let Some(cached) = cached {
            return Ok(PoiLookup::cached(cached.into_course_poi(course_id)));
        }

        Err(PoiError::EmptyResult {
            course_id: course_id.to_string(),
        }
        .into())
    }

    async fn course_lock(&self, course_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(course_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn recently_empty(&self, course_id: &str) -> bool {
        let attempts = self.empty_attempts.lock().unwrap();
        attempts
            .get(course_id)
            .is_some_and(|at| Utc::now() - *at < Duration::minutes(EMPTY_RETRY_MINUTES))
    }

    fn mark_empty_attempt(&self, course_id: &str) {
        let mut attempts = self.empty_attempts.lock().unwrap();
        attempts.insert(course_id.to_string(), Utc::now());
    }

    fn clear_empty_attempt(&self, course_id: &str) {
        let mut attempts = self.empty_attempts.lock().unwrap();
        attempts.remove(course_id);
    }
}

// ============================================================================
// Tests
// ============================================================================
