use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::CachedCourse;

/// File-backed store of normalized course POI, one JSON file per course.
pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    /// Course ids come from an external provider; restrict them to a safe
    /// filename alphabet.
    fn cache_path(&self, course_id: &str) -> PathBuf {
        let safe: String = course_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.cache_dir.join(format!("{}.json", safe))
    }

    pub fn load(&self, course_id: &str) -> Result<Option<CachedCourse>> {
        let path = self.cache_path(course_id);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cached POI for course {}", course_id))?;

        let cached: CachedCourse = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cached POI for course {}", course_id))?;

        Ok(Some(cached))
    }

    /// Replace the cached POI for a course wholesale.
    ///
    /// Write-then-rename keeps the replace atomic: a concurrent reader sees
    /// either the old hole set or the new one, never a partial write.
    pub fn save(&self, course_id: &str, cached: &CachedCourse) -> Result<()> {
        let path = self.cache_path(course_id);
        let tmp = path.with_extension("json.tmp");
        let contents = serde_json::to_string_pretty(cached)?;
        std::fs::write(&tmp, contents)
            .with_context(|| format!("Failed to write cached POI for course {}", course_id))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace cached POI for course {}", course_id))?;
        debug!(course_id, holes = cached.poi.len(), "cached course POI");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CachedCourse, GreenLocation, GreenPoint, HolePoi};
    use chrono::{Duration, Utc};

    fn sample_course() -> CachedCourse {
        let mut hole = HolePoi::new(5);
        hole.greens.push(GreenPoint {
            lat: 40.1,
            lng: -74.2,
            location: GreenLocation::Front,
        });
        CachedCourse::new(vec![hole])
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(dir.path().to_path_buf()).unwrap();

        let course = sample_course();
        cache.save("012141520658", &course).unwrap();

        let loaded = cache.load("012141520658").unwrap().unwrap();
        assert_eq!(loaded, course);
    }

    #[test]
    fn test_load_missing_course_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(dir.path().to_path_buf()).unwrap();
        assert!(cache.load("nope").unwrap().is_none());
    }

    #[test]
    fn test_save_replaces_rather_than_merges() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(dir.path().to_path_buf()).unwrap();

        cache.save("c1", &sample_course()).unwrap();

        let mut replacement = CachedCourse::new(vec![HolePoi::new(1), HolePoi::new(2)]);
        replacement.updated_at = Utc::now() - Duration::days(1);
        cache.save("c1", &replacement).unwrap();

        let loaded = cache.load("c1").unwrap().unwrap();
        assert_eq!(loaded.poi.len(), 2);
        assert_eq!(loaded, replacement);
    }

    #[test]
    fn test_hostile_course_ids_are_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(dir.path().to_path_buf()).unwrap();

        cache.save("../../etc/passwd", &sample_course()).unwrap();
        assert!(cache.load("../../etc/passwd").unwrap().is_some());

        // Everything stayed inside the cache dir
        for entry in std::fs::read_dir(dir.path()).unwrap() {
            let entry = entry.unwrap();
            assert!(entry.path().extension().is_some());
        }
    }
}
