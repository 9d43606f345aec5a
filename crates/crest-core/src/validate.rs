//! Candidate record and geometry-shape validation.
//!
//! Two validation levels:
//!
//! 1. **Geometry shape** — the text parses as JSON, the top level is a
//!    mapping tagged `FeatureCollection`, and `features` is a list. No deep
//!    geometry checks: malformed coordinate arrays are accepted here and
//!    only surface later as "no usable bounds".
//! 2. **Record fields** — the minimum bar for a record to be eligible for
//!    the persisted store. Built-in seed records are trusted and never
//!    re-validated.

use crate::error::ValidationError;
use crate::model::{EventRecord, FEATURE_COLLECTION, FeatureCollection};
use serde_json::Value as JsonValue;

/// Parse raw text as a GeoJSON `FeatureCollection` shape.
///
/// Pure and total over arbitrary input: returns `None` for unparsable
/// text, a non-mapping top level, a `type` tag other than
/// `"FeatureCollection"`, or a non-list `features`. An empty feature list
/// passes this check; [`validate_record`] enforces the non-empty store
/// invariant.
#[must_use]
pub fn validate_geojson(text: &str) -> Option<FeatureCollection> {
    let value: JsonValue = serde_json::from_str(text).ok()?;
    let mapping = value.as_object()?;

    if mapping.get("type").and_then(JsonValue::as_str) != Some(FEATURE_COLLECTION) {
        return None;
    }
    if !mapping.get("features")?.is_array() {
        return None;
    }

    serde_json::from_value(value).ok()
}

/// Check that a candidate record is eligible for the store.
///
/// Fails when `name` or `summary` is missing or blank, or when `geojson`
/// is absent, mis-tagged, or carries an empty feature list. All other
/// fields are optional.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn validate_record(candidate: &EventRecord) -> Result<(), ValidationError> {
    if candidate.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if candidate.summary.trim().is_empty() {
        return Err(ValidationError::MissingSummary);
    }

    let Some(geojson) = candidate.geojson.as_ref() else {
        return Err(ValidationError::MissingGeojson);
    };
    if geojson.kind != FEATURE_COLLECTION {
        return Err(ValidationError::NotAFeatureCollection);
    }
    if geojson.features.is_empty() {
        return Err(ValidationError::EmptyFeatures);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Feature, Geometry};
    use serde_json::json;

    fn minimal_collection() -> FeatureCollection {
        FeatureCollection {
            kind: FEATURE_COLLECTION.to_string(),
            features: vec![Feature {
                kind: "Feature".to_string(),
                properties: JsonValue::Null,
                geometry: Some(Geometry {
                    kind: "Polygon".to_string(),
                    coordinates: json!([[[-89.0, 37.2], [-88.3, 37.1], [-87.7, 37.3]]]),
                }),
            }],
        }
    }

    fn valid_candidate() -> EventRecord {
        EventRecord {
            id: "1997_march_flood".to_string(),
            name: "1997 March Flood".to_string(),
            year: 1997,
            summary: "Ohio Valley flooding in early March 1997.".to_string(),
            geojson: Some(minimal_collection()),
            ..EventRecord::default()
        }
    }

    #[test]
    fn rejects_unparsable_text() {
        assert!(validate_geojson("{not json").is_none());
        assert!(validate_geojson("").is_none());
        assert!(validate_geojson("[1, 2, 3]").is_none());
    }

    #[test]
    fn rejects_wrong_type_tag() {
        assert!(validate_geojson(r#"{"type":"Feature"}"#).is_none());
    }

    #[test]
    fn rejects_non_list_features() {
        assert!(validate_geojson(r#"{"type":"FeatureCollection","features":"x"}"#).is_none());
    }

    #[test]
    fn accepts_empty_feature_list() {
        let fc = validate_geojson(r#"{"type":"FeatureCollection","features":[]}"#)
            .expect("shape check should pass");
        assert!(fc.features.is_empty());
    }

    #[test]
    fn accepts_malformed_coordinates() {
        // Deep geometry validation is out of scope.
        let text = r#"{"type":"FeatureCollection","features":[{"type":"Feature",
            "geometry":{"type":"Polygon","coordinates":[[[],"oops"]]}}]}"#;
        assert!(validate_geojson(text).is_some());
    }

    #[test]
    fn record_with_all_required_fields_passes() {
        assert_eq!(validate_record(&valid_candidate()), Ok(()));
    }

    #[test]
    fn blank_summary_is_rejected() {
        let mut candidate = valid_candidate();
        candidate.summary = "   ".to_string();
        assert_eq!(
            validate_record(&candidate),
            Err(ValidationError::MissingSummary)
        );
    }

    #[test]
    fn missing_name_is_rejected() {
        let mut candidate = valid_candidate();
        candidate.name = String::new();
        assert_eq!(
            validate_record(&candidate),
            Err(ValidationError::MissingName)
        );
    }

    #[test]
    fn missing_geojson_is_rejected() {
        let mut candidate = valid_candidate();
        candidate.geojson = None;
        assert_eq!(
            validate_record(&candidate),
            Err(ValidationError::MissingGeojson)
        );
    }

    #[test]
    fn empty_features_are_rejected_at_record_level() {
        let mut candidate = valid_candidate();
        candidate.geojson = Some(FeatureCollection {
            kind: FEATURE_COLLECTION.to_string(),
            features: Vec::new(),
        });
        assert_eq!(
            validate_record(&candidate),
            Err(ValidationError::EmptyFeatures)
        );
    }
}
