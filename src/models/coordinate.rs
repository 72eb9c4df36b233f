//! Raw coordinate records as emitted by the provider's
//! `/coordinates/{courseId}` endpoint.
//!
//! The provider is loose about types: numeric fields arrive as JSON numbers
//! or as numeric strings depending on the course. `ProviderValue` absorbs
//! both so a single odd record cannot fail deserialization of the whole
//! batch.

use serde::Deserialize;

/// A field value as the provider sends it: number, numeric string, or junk.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProviderValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl ProviderValue {
    /// Numeric value, parsing strings. `None` for non-finite or junk input.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ProviderValue::Number(n) if n.is_finite() => Some(*n),
            ProviderValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Integer value, parsing strings (fractional values truncate).
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ProviderValue::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            ProviderValue::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|n| n.trunc() as i64))
            }
            _ => None,
        }
    }

    /// Strict numeric integer code. String codes do not match, mirroring the
    /// provider contract that category codes are always numbers.
    pub fn as_code(&self) -> Option<i64> {
        match self {
            ProviderValue::Number(n) if n.is_finite() && n.fract() == 0.0 => Some(*n as i64),
            _ => None,
        }
    }
}

/// One geocoded point-of-interest record for a course.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCoordinate {
    #[serde(default)]
    pub hole: Option<ProviderValue>,
    #[serde(default)]
    pub latitude: Option<ProviderValue>,
    #[serde(default)]
    pub longitude: Option<ProviderValue>,
    /// Feature category code (1..=12, anything else is ignored).
    #[serde(default)]
    pub poi: Option<ProviderValue>,
    /// Relative front/middle/back position qualifier.
    #[serde(default)]
    pub location: Option<ProviderValue>,
    /// Relative left/center/right position qualifier.
    #[serde(default, rename = "sideFW")]
    pub side_fw: Option<ProviderValue>,
}

impl RawCoordinate {
    /// 1-based hole number. The provider emits 0 or omits the field for
    /// unset records, so 0 and negatives are treated as missing.
    pub fn hole_number(&self) -> Option<u32> {
        self.hole
            .as_ref()
            .and_then(ProviderValue::as_int)
            .filter(|h| *h >= 1)
            .and_then(|h| u32::try_from(h).ok())
    }

    /// Latitude/longitude pair. The provider emits 0 for unset coordinates,
    /// so an exact 0 on either axis is treated as missing.
    pub fn point(&self) -> Option<(f64, f64)> {
        let lat = self.latitude.as_ref().and_then(ProviderValue::as_f64)?;
        let lng = self.longitude.as_ref().and_then(ProviderValue::as_f64)?;
        if lat == 0.0 || lng == 0.0 {
            return None;
        }
        Some((lat, lng))
    }

    pub fn poi_code(&self) -> Option<i64> {
        self.poi.as_ref().and_then(ProviderValue::as_code)
    }

    pub fn location_code(&self) -> Option<i64> {
        self.location.as_ref().and_then(ProviderValue::as_code)
    }

    pub fn side_code(&self) -> Option<i64> {
        self.side_fw.as_ref().and_then(ProviderValue::as_code)
    }
}

/// Response envelope from `/coordinates/{courseId}`.
///
/// A missing `coordinates` key is a shape error and fails deserialization;
/// the policy layer treats that the same as a transport failure.
#[derive(Debug, Deserialize)]
pub struct CoordinatesResponse {
    pub coordinates: Vec<RawCoordinate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_numeric_and_string_fields() {
        let json = r#"{
            "coordinates": [
                {"poi": 1, "location": 2, "sideFW": 2, "hole": 1, "latitude": 33.5, "longitude": -79.9},
                {"poi": 11, "location": "1", "sideFW": "0", "hole": "7", "latitude": "33.501", "longitude": "-79.91"}
            ]
        }"#;
        let parsed: CoordinatesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.coordinates.len(), 2);

        let numeric = &parsed.coordinates[0];
        assert_eq!(numeric.hole_number(), Some(1));
        assert_eq!(numeric.point(), Some((33.5, -79.9)));
        assert_eq!(numeric.poi_code(), Some(1));

        let stringy = &parsed.coordinates[1];
        assert_eq!(stringy.hole_number(), Some(7));
        assert_eq!(stringy.point(), Some((33.501, -79.91)));
        // Category codes only match when numeric
        assert_eq!(stringy.location_code(), None);
    }

    #[test]
    fn test_missing_fields_are_none() {
        let coord: RawCoordinate = serde_json::from_str(r#"{"poi": 4}"#).unwrap();
        assert_eq!(coord.hole_number(), None);
        assert_eq!(coord.point(), None);
        assert_eq!(coord.poi_code(), Some(4));
    }

    #[test]
    fn test_junk_values_do_not_fail_the_batch() {
        let json = r#"{
            "coordinates": [
                {"hole": null, "latitude": true, "longitude": {"x": 1}, "poi": "green"}
            ]
        }"#;
        let parsed: CoordinatesResponse = serde_json::from_str(json).unwrap();
        let coord = &parsed.coordinates[0];
        assert_eq!(coord.hole_number(), None);
        assert_eq!(coord.point(), None);
        assert_eq!(coord.poi_code(), None);
    }

    #[test]
    fn test_zero_coordinates_treated_as_missing() {
        let coord: RawCoordinate =
            serde_json::from_str(r#"{"hole": 3, "latitude": 0, "longitude": -79.9}"#).unwrap();
        assert_eq!(coord.hole_number(), Some(3));
        assert_eq!(coord.point(), None);
    }

    #[test]
    fn test_envelope_without_coordinates_key_is_an_error() {
        let result = serde_json::from_str::<CoordinatesResponse>(r#"{"courseID": "012141520658"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_hole_zero_is_invalid() {
        let coord: RawCoordinate =
            serde_json::from_str(r#"{"hole": 0, "latitude": 1.0, "longitude": 1.0}"#).unwrap();
        assert_eq!(coord.hole_number(), None);
    }
}
