use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// All persisted fields for one flood event.
///
/// Optional fields model "absent", not "zero": a record without
/// `damages_usd_bil` means the figure is unknown, and serialization skips
/// the key entirely so a merge never sees a spurious `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRecord {
    pub id: String,
    pub name: String,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deaths: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damages_usd_bil: Option<f64>,
    pub counties: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geojson: Option<FeatureCollection>,
    pub markers: Vec<Marker>,
    pub river_crests: Vec<RiverCrest>,
    pub photos: Vec<Photo>,
    pub resources: Vec<Resource>,
}

impl Default for EventRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            year: 0,
            dates: None,
            summary: String::new(),
            deaths: None,
            damages_usd_bil: None,
            counties: Vec::new(),
            geojson: None,
            markers: Vec::new(),
            river_crests: Vec::new(),
            photos: Vec::new(),
            resources: Vec::new(),
        }
    }
}

/// A named point of interest shown on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// One river gage observation. `crest_ft` is nullable: some historical
/// gages have a known crest date but no sourced height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiverCrest {
    pub gage: String,
    pub crest_ft: Option<f64>,
    pub date: String,
}

/// An archival photo with attribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub title: String,
    pub url: String,
    pub credit: String,
}

/// An external reference link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub label: String,
    pub url: String,
}

/// GeoJSON FeatureCollection container.
///
/// Only the container shape is typed. Coordinate arrays stay an untyped
/// value tree: deep geometry validation is out of scope, and malformed
/// coordinates only surface later as "no usable bounds".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

/// One named geographic shape within a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub properties: JsonValue,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

/// A geometry blob: type tag plus nested coordinate arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: JsonValue,
}

/// The literal `type` tag a collection must carry.
pub const FEATURE_COLLECTION: &str = "FeatureCollection";
