//! Mapping from provider category codes to typed course features.
//!
//! The provider encodes feature categories as small integers on each
//! coordinate record, with two optional position qualifiers (`location` for
//! front/middle/back, `sideFW` for left/center/right). This module turns
//! that scheme into one exhaustive match.

use crate::models::{
    BunkerLocation, BunkerPoint, BunkerSide, BunkerType, GreenLocation, GreenPoint, HazardKind,
    HazardPoint, RawCoordinate, TeeLocation, TeePoint,
};

/// A single classified feature, routed to exactly one of the four
/// per-hole arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    Green(GreenPoint),
    Bunker(BunkerPoint),
    Hazard(HazardPoint),
    Tee(TeePoint),
}

/// Provider category codes:
/// 1 green, 2 greenside bunker, 3 fairway bunker, 4 water, 5 trees,
/// 6/7/8 yardage markers (100/150/200), 9 dogleg, 10 road,
/// 11 front tee, 12 back tee.
///
/// Returns `None` when the record has no valid point, no numeric code, or
/// a code outside the table — all of which drop the record.
pub fn classify(coord: &RawCoordinate) -> Option<Feature> {
    let (lat, lng) = coord.point()?;
    let code = coord.poi_code()?;

    let feature = match code {
        1 => Feature::Green(GreenPoint {
            lat,
            lng,
            location: green_location(coord.location_code()),
        }),
        2 => Feature::Bunker(bunker_point(lat, lng, BunkerType::Green, coord)),
        3 => Feature::Bunker(bunker_point(lat, lng, BunkerType::Fairway, coord)),
        4 => Feature::Hazard(hazard_point(lat, lng, HazardKind::Water)),
        5 => Feature::Hazard(hazard_point(lat, lng, HazardKind::Trees)),
        6 => Feature::Hazard(hazard_point(lat, lng, HazardKind::DistanceMarker { distance: 100 })),
        7 => Feature::Hazard(hazard_point(lat, lng, HazardKind::DistanceMarker { distance: 150 })),
        8 => Feature::Hazard(hazard_point(lat, lng, HazardKind::DistanceMarker { distance: 200 })),
        9 => Feature::Hazard(hazard_point(lat, lng, HazardKind::Dogleg)),
        10 => Feature::Hazard(hazard_point(lat, lng, HazardKind::Road)),
        11 => Feature::Tee(TeePoint {
            lat,
            lng,
            location: TeeLocation::Front,
        }),
        12 => Feature::Tee(TeePoint {
            lat,
            lng,
            location: TeeLocation::Back,
        }),
        _ => return None,
    };

    Some(feature)
}

fn green_location(code: Option<i64>) -> GreenLocation {
    match code {
        Some(1) => GreenLocation::Front,
        Some(3) => GreenLocation::Back,
        _ => GreenLocation::Center,
    }
}

fn bunker_side(code: Option<i64>) -> BunkerSide {
    match code {
        Some(1) => BunkerSide::Left,
        Some(3) => BunkerSide::Right,
        _ => BunkerSide::Center,
    }
}

fn bunker_location(code: Option<i64>) -> BunkerLocation {
    match code {
        Some(1) => BunkerLocation::Front,
        Some(3) => BunkerLocation::Back,
        _ => BunkerLocation::Middle,
    }
}

fn bunker_point(lat: f64, lng: f64, kind: BunkerType, coord: &RawCoordinate) -> BunkerPoint {
    BunkerPoint {
        lat,
        lng,
        side: bunker_side(coord.side_code()),
        location: bunker_location(coord.location_code()),
        kind,
    }
}

fn hazard_point(lat: f64, lng: f64, kind: HazardKind) -> HazardPoint {
    HazardPoint { lat, lng, kind }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProviderValue;

    fn coord(poi: f64, location: Option<f64>, side_fw: Option<f64>) -> RawCoordinate {
        RawCoordinate {
            hole: Some(ProviderValue::Number(1.0)),
            latitude: Some(ProviderValue::Number(33.5)),
            longitude: Some(ProviderValue::Number(-79.9)),
            poi: Some(ProviderValue::Number(poi)),
            location: location.map(ProviderValue::Number),
            side_fw: side_fw.map(ProviderValue::Number),
        }
    }

    #[test]
    fn test_green_location_mapping() {
        let cases = [
            (Some(1.0), GreenLocation::Front),
            (Some(3.0), GreenLocation::Back),
            (Some(2.0), GreenLocation::Center),
            (None, GreenLocation::Center),
        ];
        for (loc, expected) in cases {
            match classify(&coord(1.0, loc, None)) {
                Some(Feature::Green(g)) => assert_eq!(g.location, expected),
                other => panic!("expected green, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_bunker_side_and_location_defaults() {
        // No qualifiers: center side, middle location
        match classify(&coord(2.0, None, None)) {
            Some(Feature::Bunker(b)) => {
                assert_eq!(b.side, BunkerSide::Center);
                assert_eq!(b.location, BunkerLocation::Middle);
                assert_eq!(b.kind, BunkerType::Green);
            }
            other => panic!("expected bunker, got {:?}", other),
        }

        match classify(&coord(3.0, Some(3.0), Some(1.0))) {
            Some(Feature::Bunker(b)) => {
                assert_eq!(b.side, BunkerSide::Left);
                assert_eq!(b.location, BunkerLocation::Back);
                assert_eq!(b.kind, BunkerType::Fairway);
            }
            other => panic!("expected bunker, got {:?}", other),
        }
    }

    #[test]
    fn test_distance_markers() {
        for (code, distance) in [(6.0, 100), (7.0, 150), (8.0, 200)] {
            match classify(&coord(code, None, None)) {
                Some(Feature::Hazard(h)) => {
                    assert_eq!(h.kind, HazardKind::DistanceMarker { distance })
                }
                other => panic!("expected marker, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_tee_locations() {
        match classify(&coord(11.0, None, None)) {
            Some(Feature::Tee(t)) => assert_eq!(t.location, TeeLocation::Front),
            other => panic!("expected tee, got {:?}", other),
        }
        match classify(&coord(12.0, None, None)) {
            Some(Feature::Tee(t)) => assert_eq!(t.location, TeeLocation::Back),
            other => panic!("expected tee, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_codes_are_dropped() {
        for code in [0.0, 13.0, 42.0, -1.0] {
            assert!(classify(&coord(code, None, None)).is_none());
        }
    }

    #[test]
    fn test_string_poi_code_does_not_classify() {
        let mut c = coord(1.0, None, None);
        c.poi = Some(ProviderValue::Text("1".to_string()));
        assert!(classify(&c).is_none());
    }

    #[test]
    fn test_missing_point_does_not_classify() {
        let mut c = coord(4.0, None, None);
        c.longitude = None;
        assert!(classify(&c).is_none());
    }
}
