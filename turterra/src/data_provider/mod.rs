//! Loading of the data displayed on the map.
//!
//! The controller asks a [`MapDataProvider`] for region geometry, the sub-region mapping, the
//! species range and the occurrence points. [`UrlMapDataProvider`] loads them over HTTP from
//! the urls configured in [`MapConfig`](crate::MapConfig).

use std::collections::HashMap;

use async_trait::async_trait;
use geojson::FeatureCollection;
use maybe_sync::{MaybeSend, MaybeSync};
use serde::{Deserialize, Serialize};
use turterra_types::RegionSlug;

use crate::error::MapError;

mod http;
mod occurrences;
mod url_provider;

pub(crate) use http::{join_segments, parse_url};
pub use http::HttpLoader;
pub use occurrences::{OccurrenceRecord, OccurrenceSearch};
pub use url_provider::UrlMapDataProvider;

/// Source of the map data.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MapDataProvider: MaybeSend + MaybeSync {
    /// Loads the geometry of a region.
    async fn region_geometry(&self, slug: &RegionSlug) -> Result<FeatureCollection, MapError>;
    /// Loads the list of sub-regions of every region.
    async fn sub_region_mapping(&self) -> Result<SubRegionMapping, MapError>;
    /// Loads the species range from the given url.
    async fn range_data(&self, url: &str) -> Result<FeatureCollection, MapError>;
    /// Loads observed occurrences of a species as a collection of points.
    async fn occurrences(&self, scientific_name: &str) -> Result<FeatureCollection, MapError>;
}

/// Geometry source of a sub-region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubRegionSource {
    /// Display name of the sub-region, as used in distribution payloads.
    pub name: String,
    /// Url of the sub-region GeoJSON.
    pub geojson_url: String,
}

/// Sub-regions of every region, keyed by region slug.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubRegionMapping(HashMap<String, Vec<SubRegionSource>>);

impl SubRegionMapping {
    /// Creates a mapping from its entries.
    pub fn new(entries: HashMap<String, Vec<SubRegionSource>>) -> Self {
        Self(entries)
    }

    /// Sub-regions of a region. A region missing from the mapping has no sub-regions.
    pub fn get(&self, region: &RegionSlug) -> &[SubRegionSource] {
        self.0
            .get(region.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Finds the source of a sub-region by its exact name.
    pub fn find(&self, region: &RegionSlug, name: &str) -> Option<&SubRegionSource> {
        self.get(region).iter().find(|source| source.name == name)
    }

    /// Number of regions in the mapping.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the mapping has no regions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
