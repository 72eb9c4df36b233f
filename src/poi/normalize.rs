//! Per-hole aggregation of classified coordinate records.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::models::{HolePoi, RawCoordinate};
use crate::poi::classify::{classify, Feature};

/// Transform a raw coordinate batch into hole-indexed POI, ordered
/// ascending by hole number.
///
/// Malformed records (missing hole number or lat/lng) are skipped and
/// logged; records with unknown category codes are dropped silently. A hole
/// entry is only emitted when at least one of its records classified, so
/// the output never contains all-empty holes.
///
/// An empty result is not an error here — the caller decides whether empty
/// means "course has no POI" or "keep the previous data".
pub fn normalize(course_id: &str, coordinates: &[RawCoordinate]) -> Vec<HolePoi> {
    let mut holes: BTreeMap<u32, HolePoi> = BTreeMap::new();
    let mut skipped = 0usize;

    for coord in coordinates {
        let Some(hole) = coord.hole_number() else {
            warn!(course_id, hole = ?coord.hole, "skipping coordinate with invalid hole number");
            skipped += 1;
            continue;
        };
        if coord.point().is_none() {
            warn!(course_id, hole, "skipping coordinate without usable lat/lng");
            skipped += 1;
            continue;
        }

        // Unknown category codes fall through without creating a hole entry
        let Some(feature) = classify(coord) else {
            continue;
        };

        let entry = holes.entry(hole).or_insert_with(|| HolePoi::new(hole));
        match feature {
            Feature::Green(g) => entry.greens.push(g),
            Feature::Bunker(b) => entry.bunkers.push(b),
            Feature::Hazard(h) => entry.hazards.push(h),
            Feature::Tee(t) => entry.tees.push(t),
        }
    }

    debug!(
        course_id,
        holes = holes.len(),
        records = coordinates.len(),
        skipped,
        "normalized coordinate batch"
    );

    holes.into_values().collect()
}
