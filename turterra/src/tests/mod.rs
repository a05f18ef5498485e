use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use parking_lot::Mutex;
use tokio::sync::Notify;
use turterra_types::RegionSlug;

use crate::data_provider::{MapDataProvider, SubRegionMapping, SubRegionSource};
use crate::error::MapError;

pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(true)
        .try_init();
}

/// Collection with a single square polygon.
pub fn square(min_lon: f64, min_lat: f64, size: f64) -> FeatureCollection {
    let ring = vec![
        vec![min_lon, min_lat],
        vec![min_lon + size, min_lat],
        vec![min_lon + size, min_lat + size],
        vec![min_lon, min_lat + size],
        vec![min_lon, min_lat],
    ];

    FeatureCollection {
        bbox: None,
        features: vec![Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
            id: None,
            properties: Some(JsonObject::new()),
            foreign_members: None,
        }],
        foreign_members: None,
    }
}

/// Feature without geometry carrying the given `NAME` property.
pub fn named_feature(name: &str) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("NAME".into(), name.into());

    Feature {
        bbox: None,
        geometry: None,
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn not_found(url: &str) -> MapError {
    MapError::Status {
        url: url.to_string(),
        status: 404,
    }
}

/// Data provider answering from fixed data.
///
/// The first sub-region mapping request can be held until a [`Notify`] is triggered, which lets
/// tests interleave selections deterministically.
#[derive(Default)]
pub struct ScriptedProvider {
    geometries: Arc<Mutex<HashMap<String, FeatureCollection>>>,
    sub_regions: HashMap<String, Vec<SubRegionSource>>,
    range: Option<FeatureCollection>,
    occurrences: Option<FeatureCollection>,
    mapping_gate: Option<Arc<Notify>>,
    fail_mapping: bool,
    mapping_calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    pub fn with_geometry(self, slug: &str, geometry: FeatureCollection) -> Self {
        self.geometries.lock().insert(slug.to_string(), geometry);
        self
    }

    pub fn with_sub_region(mut self, slug: &str, name: &str, url: &str) -> Self {
        self.sub_regions
            .entry(slug.to_string())
            .or_default()
            .push(SubRegionSource {
                name: name.to_string(),
                geojson_url: url.to_string(),
            });
        self
    }

    pub fn with_range(mut self, range: FeatureCollection) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_occurrences(mut self, occurrences: FeatureCollection) -> Self {
        self.occurrences = Some(occurrences);
        self
    }

    pub fn with_mapping_gate(mut self, gate: Arc<Notify>) -> Self {
        self.mapping_gate = Some(gate);
        self
    }

    pub fn with_failing_mapping(mut self) -> Self {
        self.fail_mapping = true;
        self
    }

    /// Geometry answered per region slug. Changes are visible to later requests.
    pub fn geometries(&self) -> Arc<Mutex<HashMap<String, FeatureCollection>>> {
        self.geometries.clone()
    }

    /// Counter of sub-region mapping requests.
    pub fn mapping_calls(&self) -> Arc<AtomicUsize> {
        self.mapping_calls.clone()
    }
}

#[async_trait]
impl MapDataProvider for ScriptedProvider {
    async fn region_geometry(&self, slug: &RegionSlug) -> Result<FeatureCollection, MapError> {
        self.geometries
            .lock()
            .get(slug.as_str())
            .cloned()
            .ok_or_else(|| not_found(&format!("geometry/{slug}")))
    }

    async fn sub_region_mapping(&self) -> Result<SubRegionMapping, MapError> {
        let call = self.mapping_calls.fetch_add(1, Ordering::SeqCst);
        if call == 0 {
            if let Some(gate) = &self.mapping_gate {
                gate.notified().await;
            }
        }

        if self.fail_mapping {
            return Err(MapError::Network("mapping: connection reset".to_string()));
        }

        Ok(SubRegionMapping::new(self.sub_regions.clone()))
    }

    async fn range_data(&self, url: &str) -> Result<FeatureCollection, MapError> {
        self.range.clone().ok_or_else(|| not_found(url))
    }

    async fn occurrences(&self, scientific_name: &str) -> Result<FeatureCollection, MapError> {
        self.occurrences
            .clone()
            .ok_or_else(|| not_found(scientific_name))
    }
}
