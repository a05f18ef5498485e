use std::collections::HashMap;

use async_trait::async_trait;
use geojson::FeatureCollection;
use reqwest::Url;
use turterra_types::geometry::assign_feature_ids;
use turterra_types::RegionSlug;

use crate::config::MapConfig;
use crate::data_provider::{
    parse_url, HttpLoader, MapDataProvider, OccurrenceSearch, SubRegionMapping,
};
use crate::error::MapError;

/// Loads map data over HTTP from the configured urls.
///
/// The region geometry url is a template with a `{slug}` placeholder. The occurrence search
/// gets the scientific name and the record limit as query parameters.
#[derive(Debug, Clone)]
pub struct UrlMapDataProvider {
    loader: HttpLoader,
    region_geometry_url: String,
    sub_region_mapping_url: String,
    occurrences_url: String,
    occurrences_limit: u32,
}

impl UrlMapDataProvider {
    /// Creates a provider with the urls of the configuration.
    pub fn new(loader: HttpLoader, config: &MapConfig) -> Self {
        Self {
            loader,
            region_geometry_url: config.region_geometry_url().to_string(),
            sub_region_mapping_url: config.sub_region_mapping_url().to_string(),
            occurrences_url: config.occurrences_url().to_string(),
            occurrences_limit: config.occurrences_limit(),
        }
    }

    /// Creates a provider with a new HTTP client.
    pub fn from_config(config: &MapConfig) -> Result<Self, MapError> {
        Ok(Self::new(HttpLoader::new()?, config))
    }

    /// Url of the region geometry.
    pub fn region_geometry_url(&self, slug: &RegionSlug) -> Result<String, MapError> {
        render(&self.region_geometry_url, &[("slug", slug.to_string())])
    }

    /// Url of the occurrence search for the species.
    pub fn occurrences_url(&self, scientific_name: &str) -> Result<Url, MapError> {
        let mut url = parse_url(&self.occurrences_url)?;
        url.query_pairs_mut()
            .append_pair("scientificName", scientific_name)
            .append_pair("limit", &self.occurrences_limit.to_string());
        Ok(url)
    }

    async fn load_collection(&self, url: &str) -> Result<FeatureCollection, MapError> {
        let mut collection: FeatureCollection = self.loader.load_json(url).await?;
        assign_feature_ids(&mut collection);
        Ok(collection)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MapDataProvider for UrlMapDataProvider {
    async fn region_geometry(&self, slug: &RegionSlug) -> Result<FeatureCollection, MapError> {
        let url = self.region_geometry_url(slug)?;
        self.load_collection(&url).await
    }

    async fn sub_region_mapping(&self) -> Result<SubRegionMapping, MapError> {
        self.loader.load_json(&self.sub_region_mapping_url).await
    }

    async fn range_data(&self, url: &str) -> Result<FeatureCollection, MapError> {
        self.loader.load_json(url).await
    }

    async fn occurrences(&self, scientific_name: &str) -> Result<FeatureCollection, MapError> {
        let url = self.occurrences_url(scientific_name)?;
        let search: OccurrenceSearch = self.loader.load_json(url.as_str()).await?;
        Ok(search.into_collection())
    }
}

fn render(template: &str, values: &[(&str, String)]) -> Result<String, MapError> {
    let vars: HashMap<String, String> = values
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();

    strfmt::strfmt(template, &vars)
        .map_err(|err| MapError::DataShape(format!("invalid url template {template}: {err}")))
}
