//! Built-in Kentucky flood events.
//!
//! The base layer of the store, compiled in and trusted without
//! re-validation. Geometry is a rough visualization envelope; curators
//! replace it with authoritative polygons through the external layer.

use crate::model::{
    EventRecord, FEATURE_COLLECTION, Feature, FeatureCollection, Geometry, Marker, Photo,
    Resource, RiverCrest,
};
use serde_json::json;

/// The built-in events, in declaration order (load sorts by year).
#[must_use]
pub fn builtin_events() -> Vec<EventRecord> {
    vec![ohio_river_1937(), louisville_1978(), winter_2021()]
}

fn envelope(event: &str, ring: serde_json::Value) -> FeatureCollection {
    FeatureCollection {
        kind: FEATURE_COLLECTION.to_string(),
        features: vec![Feature {
            kind: "Feature".to_string(),
            properties: json!({ "event": event }),
            geometry: Some(Geometry {
                kind: "Polygon".to_string(),
                coordinates: json!([ring]),
            }),
        }],
    }
}

fn ohio_river_1937() -> EventRecord {
    EventRecord {
        id: "1937_ohio_river_flood".to_string(),
        name: "1937 Ohio River Flood".to_string(),
        year: 1937,
        dates: Some("Jan 9 – Feb 5, 1937".to_string()),
        summary: "Historic Ohio River basin flood impacting Louisville, Paducah, and many \
                  communities along the river. Record crests in multiple locations."
            .to_string(),
        deaths: Some(385),
        damages_usd_bil: Some(8.7),
        counties: [
            "Jefferson",
            "McCracken",
            "Daviess",
            "Campbell",
            "Kenton",
            "Henderson",
        ]
        .map(String::from)
        .to_vec(),
        geojson: Some(envelope(
            "1937 Ohio River Flood",
            json!([
                [-89.0, 37.2], [-88.3, 37.1], [-87.7, 37.3], [-86.3, 37.7],
                [-85.7, 38.0], [-85.0, 38.7], [-84.6, 38.9], [-84.4, 39.0],
                [-83.9, 38.8], [-84.6, 38.2], [-85.4, 37.9], [-86.8, 37.4],
                [-87.5, 37.1], [-88.8, 36.9], [-89.0, 37.2]
            ]),
        )),
        markers: vec![
            Marker {
                name: "Louisville".to_string(),
                lat: 38.2527,
                lon: -85.7585,
            },
            Marker {
                name: "Paducah".to_string(),
                lat: 37.0834,
                lon: -88.6000,
            },
            Marker {
                name: "Owensboro".to_string(),
                lat: 37.7742,
                lon: -87.1133,
            },
        ],
        river_crests: vec![
            RiverCrest {
                gage: "Louisville, OH (McAlpine)".to_string(),
                crest_ft: Some(52.0),
                date: "1937-01-27".to_string(),
            },
            RiverCrest {
                gage: "Paducah, OH".to_string(),
                crest_ft: Some(60.8),
                date: "1937-02-02".to_string(),
            },
            RiverCrest {
                gage: "Cincinnati, OH".to_string(),
                crest_ft: Some(79.99),
                date: "1937-01-26".to_string(),
            },
        ],
        photos: vec![
            Photo {
                title: "Downtown Louisville under water".to_string(),
                url: "https://upload.wikimedia.org/wikipedia/commons/1/1a/Louisville_flood_1937.jpg"
                    .to_string(),
                credit: "Wikimedia Commons".to_string(),
            },
            Photo {
                title: "Sandbagging efforts".to_string(),
                url: "https://upload.wikimedia.org/wikipedia/commons/3/39/Ohio_River_Flood_1937_Louisville.jpg"
                    .to_string(),
                credit: "Wikimedia Commons".to_string(),
            },
        ],
        resources: vec![Resource {
            label: "NOAA/NWS event summary (external)".to_string(),
            url: "https://www.weather.gov/lmk/1937flood".to_string(),
        }],
    }
}

fn louisville_1978() -> EventRecord {
    EventRecord {
        id: "1978_louisville_flash_flood".to_string(),
        name: "1978 Louisville Flash Flood".to_string(),
        year: 1978,
        dates: Some("May 19–20, 1978".to_string()),
        summary: "Torrential thunderstorms produced extreme short-duration rainfall in the \
                  Louisville metro, triggering damaging flash flooding."
            .to_string(),
        deaths: Some(5),
        damages_usd_bil: Some(0.2),
        counties: ["Jefferson", "Oldham", "Bullitt"].map(String::from).to_vec(),
        geojson: Some(envelope(
            "1978 Louisville Flash Flood",
            json!([
                [-86.1, 38.4], [-85.9, 38.4], [-85.5, 38.4], [-85.3, 38.2],
                [-85.5, 38.0], [-85.9, 37.9], [-86.2, 38.0], [-86.1, 38.4]
            ]),
        )),
        markers: vec![Marker {
            name: "Louisville".to_string(),
            lat: 38.2527,
            lon: -85.7585,
        }],
        river_crests: vec![RiverCrest {
            gage: "Beargrass Creek (local)".to_string(),
            crest_ft: None,
            date: "1978-05-20".to_string(),
        }],
        photos: vec![Photo {
            title: "Urban flooding, Louisville 1978".to_string(),
            url: "https://upload.wikimedia.org/wikipedia/commons/5/57/Flash_flood_generic.jpg"
                .to_string(),
            credit: "Example / Replace with KY archival photo".to_string(),
        }],
        resources: Vec::new(),
    }
}

fn winter_2021() -> EventRecord {
    EventRecord {
        id: "2021_winter_floods".to_string(),
        name: "February 2021 Kentucky Floods".to_string(),
        year: 2021,
        dates: Some("Feb 26 – Mar 5, 2021".to_string()),
        summary: "Prolonged late-winter rainfall and snowmelt led to widespread river and \
                  flash flooding, especially across eastern and south-central Kentucky."
            .to_string(),
        deaths: Some(3),
        damages_usd_bil: Some(0.1),
        counties: [
            "Breathitt", "Floyd", "Pike", "Madison", "Estill", "Jackson",
        ]
        .map(String::from)
        .to_vec(),
        geojson: Some(envelope(
            "February 2021 KY Floods",
            json!([
                [-84.6, 38.2], [-83.0, 38.3], [-82.2, 37.6], [-82.5, 37.1],
                [-83.2, 37.0], [-84.0, 37.4], [-84.6, 38.2]
            ]),
        )),
        markers: vec![
            Marker {
                name: "Jackson".to_string(),
                lat: 37.5534,
                lon: -83.3830,
            },
            Marker {
                name: "Prestonsburg".to_string(),
                lat: 37.6698,
                lon: -82.7749,
            },
        ],
        river_crests: vec![
            RiverCrest {
                gage: "North Fork KY River at Jackson".to_string(),
                crest_ft: Some(43.5),
                date: "2021-03-01".to_string(),
            },
            RiverCrest {
                gage: "Red River at Clay City".to_string(),
                crest_ft: Some(25.8),
                date: "2021-03-01".to_string(),
            },
        ],
        photos: vec![Photo {
            title: "Eastern KY high water, 2021".to_string(),
            url: "https://upload.wikimedia.org/wikipedia/commons/8/8f/Flood_generic.jpg"
                .to_string(),
            credit: "Example / Replace with KY archival photo".to_string(),
        }],
        resources: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::builtin_events;
    use crate::geo;
    use std::collections::HashSet;

    #[test]
    fn seed_ids_are_unique() {
        let events = builtin_events();
        let mut seen = HashSet::new();
        for event in &events {
            assert!(seen.insert(event.id.clone()), "duplicate id {}", event.id);
        }
    }

    #[test]
    fn every_seed_has_usable_geometry() {
        for event in builtin_events() {
            let geojson = event.geojson.as_ref().expect("seed geometry");
            assert!(!geojson.features.is_empty());
            assert!(
                geo::collection_bounds(geojson).is_some(),
                "seed {} must produce viewport bounds",
                event.id
            );
        }
    }
}
