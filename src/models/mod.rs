//! Data models for course POI handling.
//!
//! Two layers, kept separate on purpose:
//!
//! - `coordinate`: the provider's raw wire shapes (`RawCoordinate` and the
//!   `CoordinatesResponse` envelope), tolerant of the provider's loose typing
//! - `poi`: the normalized domain shapes (`HolePoi`, `CoursePoi`, the
//!   feature point types) whose serialization is the storage format

pub mod coordinate;
pub mod poi;

pub use coordinate::{CoordinatesResponse, ProviderValue, RawCoordinate};
pub use poi::{
    BunkerLocation, BunkerPoint, BunkerSide, BunkerType, CachedCourse, CoursePoi, GreenLocation,
    GreenPoint, HazardKind, HazardPoint, HolePoi, TeeLocation, TeePoint, FRESHNESS_DAYS,
};
