use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Deserialize;

/// Response of the occurrence search service.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OccurrenceSearch {
    /// Matching records.
    #[serde(default)]
    pub results: Vec<OccurrenceRecord>,
}

/// A single observation of a species.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceRecord {
    /// Longitude of the observation.
    #[serde(default)]
    pub decimal_longitude: Option<f64>,
    /// Latitude of the observation.
    #[serde(default)]
    pub decimal_latitude: Option<f64>,
    /// Species name as recorded.
    #[serde(default)]
    pub species: Option<String>,
}

impl OccurrenceRecord {
    fn position(&self) -> Option<(f64, f64)> {
        let lon = self.decimal_longitude?;
        let lat = self.decimal_latitude?;
        ((-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat)).then_some((lon, lat))
    }
}

impl OccurrenceSearch {
    /// Converts the records into point features. Records with a missing or out of range
    /// coordinate are dropped.
    pub fn into_collection(self) -> FeatureCollection {
        let total = self.results.len();
        let features: Vec<Feature> = self
            .results
            .into_iter()
            .filter_map(|record| {
                let (lon, lat) = record.position()?;
                let mut properties = JsonObject::new();
                if let Some(species) = record.species {
                    properties.insert("species".to_string(), species.into());
                }

                Some(Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(Value::Point(vec![lon, lat]))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                })
            })
            .collect();

        if features.len() < total {
            log::debug!(
                "Dropped {} occurrence records without valid coordinates",
                total - features.len()
            );
        }

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}
