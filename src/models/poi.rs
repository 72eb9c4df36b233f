//! Normalized course POI types.
//!
//! These are the domain shapes consumed by distance calculators and map
//! renderers, decoupled from the provider's raw coordinate records. Field
//! and tag names match the JSON persisted against a course record
//! (`poi: [...]`, `updated_at`), so serialization is the storage format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cached POI is considered stale after 90 days.
/// Course layouts change rarely; 90 days balances freshness against
/// provider API quota.
pub const FRESHNESS_DAYS: i64 = 90;

/// Relative position of a point on or around the green.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GreenLocation {
    Front,
    Center,
    Back,
}

/// Which side of the fairway a bunker sits on, viewed from the tee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BunkerSide {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BunkerLocation {
    Front,
    Middle,
    Back,
}

/// Greenside vs. fairway bunker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BunkerType {
    Green,
    Fairway,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeeLocation {
    Front,
    Back,
}

/// A point on the green surface (front/center/back markers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreenPoint {
    pub lat: f64,
    pub lng: f64,
    pub location: GreenLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BunkerPoint {
    pub lat: f64,
    pub lng: f64,
    pub side: BunkerSide,
    pub location: BunkerLocation,
    #[serde(rename = "type")]
    pub kind: BunkerType,
}

/// Anything a player wants to carry or avoid, plus fixed yardage markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardPoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(flatten)]
    pub kind: HazardKind,
}

/// Hazard discriminator, tagged as `type` in the stored JSON
/// (`{"type":"distance_marker","distance":150}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HazardKind {
    Water,
    Trees,
    DistanceMarker { distance: u32 },
    Dogleg,
    Road,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeePoint {
    pub lat: f64,
    pub lng: f64,
    pub location: TeeLocation,
}

/// All classified features for one hole.
///
/// Arrays default to empty on deserialize so consumers never see null;
/// a hole number appears at most once per course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolePoi {
    pub hole: u32,
    #[serde(default)]
    pub greens: Vec<GreenPoint>,
    #[serde(default)]
    pub bunkers: Vec<BunkerPoint>,
    #[serde(default)]
    pub hazards: Vec<HazardPoint>,
    #[serde(default)]
    pub tees: Vec<TeePoint>,
}

impl HolePoi {
    pub fn new(hole: u32) -> Self {
        Self {
            hole,
            greens: Vec::new(),
            bunkers: Vec::new(),
            hazards: Vec::new(),
            tees: Vec::new(),
        }
    }

    pub fn feature_count(&self) -> usize {
        self.greens.len() + self.bunkers.len() + self.hazards.len() + self.tees.len()
    }
}

/// Normalized POI for a whole course, ordered ascending by hole number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoursePoi {
    pub course_id: String,
    pub holes: Vec<HolePoi>,
    pub last_refreshed: DateTime<Utc>,
}

impl CoursePoi {
    /// Total classified features across all holes.
    pub fn feature_count(&self) -> usize {
        self.holes.iter().map(HolePoi::feature_count).sum()
    }

    /// Consumers treat an empty hole list as "no data".
    pub fn has_poi_data(&self) -> bool {
        self.feature_count() > 0
    }

    pub fn hole(&self, number: u32) -> Option<&HolePoi> {
        self.holes.iter().find(|h| h.hole == number)
    }
}

/// The persisted per-course record. Field names match the course table
/// columns the consumer side reads back (`poi`, `updated_at`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedCourse {
    pub poi: Vec<HolePoi>,
    pub updated_at: DateTime<Utc>,
}

impl CachedCourse {
    pub fn new(poi: Vec<HolePoi>) -> Self {
        Self {
            poi,
            updated_at: Utc::now(),
        }
    }

    pub fn age_days(&self) -> i64 {
        (Utc::now() - self.updated_at).num_days()
    }

    pub fn has_poi_data(&self) -> bool {
        !self.poi.is_empty()
    }

    /// Stale when past the freshness window or holding no data at all.
    pub fn is_stale(&self) -> bool {
        !self.has_poi_data() || self.age_days() > FRESHNESS_DAYS
    }

    pub fn into_course_poi(self, course_id: &str) -> CoursePoi {
        CoursePoi {
            course_id: course_id.to_string(),
            holes: self.poi,
            last_refreshed: self.updated_at,
        }
    }
}
