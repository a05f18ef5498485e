use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use turterra_types::DistributionPayload;

use crate::catalog::search::SpeciesIndex;
use crate::catalog::taxonomy::{resolve_taxonomy, Taxonomy, TaxonomyCollections};
use crate::config::{CollectionIds, MapConfig};
use crate::data_provider::{join_segments, HttpLoader};
use crate::error::MapError;

const DISTRIBUTION_FIELD: &str = "species-distribution-json";

/// All items of a CMS collection.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionResponse {
    /// Collection items.
    #[serde(default)]
    pub items: Vec<CollectionItem>,
}

/// CMS collection item.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionItem {
    /// Item id, referenced by other items.
    pub id: String,
    /// Item fields keyed by field slug.
    #[serde(rename = "fieldData", default)]
    pub field_data: Map<String, Value>,
}

impl CollectionItem {
    /// Value of a text field. Empty strings are treated as missing.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.field_data
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Value of a text field nested in an object field, e.g. `url` of an image field.
    pub fn nested_str_field(&self, key: &str, nested: &str) -> Option<&str> {
        self.field_data
            .get(key)
            .and_then(|value| value.get(nested))
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Item slug.
    pub fn slug(&self) -> Option<&str> {
        self.str_field("slug")
    }
}

/// A species with everything the distribution map needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesRecord {
    /// CMS item id.
    pub item_id: String,
    /// Species slug.
    pub slug: String,
    /// Common name.
    pub common_name: Option<String>,
    /// Scientific name, used for the occurrence search.
    pub scientific_name: Option<String>,
    /// Url of the species range GeoJSON.
    pub range_data_url: Option<String>,
    /// Distribution over countries. `None` if the species has no distribution item or its
    /// payload cannot be parsed.
    pub distribution: Option<DistributionPayload>,
}

impl SpeciesRecord {
    /// Finds the species with the given slug and its distribution item. The distribution item
    /// references the species by its item id in the `species` field.
    pub fn resolve(
        species_items: &[CollectionItem],
        distribution_items: &[CollectionItem],
        slug: &str,
    ) -> Result<Self, MapError> {
        let species = species_items
            .iter()
            .find(|item| item.slug() == Some(slug))
            .ok_or_else(|| MapError::NotFound(format!("species {slug}")))?;

        let distribution = distribution_items
            .iter()
            .find(|item| item.str_field("species") == Some(species.id.as_str()));

        let distribution = match distribution.and_then(|item| item.str_field(DISTRIBUTION_FIELD)) {
            Some(json) => match DistributionPayload::from_json(json) {
                Ok(payload) => Some(payload),
                Err(err) => {
                    log::error!("Failed to parse distribution of species {slug}: {err}");
                    None
                }
            },
            None => {
                log::warn!("Missing distribution data for species {slug}");
                None
            }
        };

        Ok(Self {
            item_id: species.id.clone(),
            slug: slug.to_string(),
            common_name: species.str_field("name").map(str::to_string),
            scientific_name: species.str_field("species").map(str::to_string),
            range_data_url: species.str_field("range-data-url").map(str::to_string),
            distribution,
        })
    }
}

/// Client of the CMS routes of the proxy.
#[derive(Debug, Clone)]
pub struct CmsClient {
    loader: HttpLoader,
    base_url: String,
    collections: CollectionIds,
}

impl CmsClient {
    /// Creates a client for the proxy and collections of the configuration.
    pub fn new(loader: HttpLoader, config: &MapConfig) -> Self {
        Self {
            loader,
            base_url: config.proxy_url().to_string(),
            collections: config.collections().clone(),
        }
    }

    /// Url of a collection.
    pub fn collection_url(&self, collection_id: &str) -> Result<Url, MapError> {
        join_segments(&self.base_url, ["webflow", collection_id])
    }

    /// Loads all items of a collection.
    pub async fn collection(&self, collection_id: &str) -> Result<CollectionResponse, MapError> {
        let url = self.collection_url(collection_id)?;
        self.loader.load_json(url.as_str()).await
    }

    /// Loads a single item of a collection.
    pub async fn item(
        &self,
        collection_id: &str,
        item_id: &str,
    ) -> Result<CollectionItem, MapError> {
        let url = join_segments(&self.base_url, ["webflow", collection_id, item_id])?;
        self.loader.load_json(url.as_str()).await
    }

    /// Loads the species with the given slug together with its distribution.
    pub async fn load_species_record(&self, slug: &str) -> Result<SpeciesRecord, MapError> {
        let (species, distributions) = futures::try_join!(
            self.collection(&self.collections.species),
            self.collection(&self.collections.distributions),
        )?;

        let record = SpeciesRecord::resolve(&species.items, &distributions.items, slug)?;
        log::info!("Loaded species record {slug}");
        Ok(record)
    }

    /// Loads the search index of all species.
    pub async fn load_species_index(&self) -> Result<SpeciesIndex, MapError> {
        let species = self.collection(&self.collections.species).await?;
        Ok(SpeciesIndex::from_items(&species.items))
    }

    /// Loads the taxonomy of a species.
    pub async fn load_taxonomy(
        &self,
        scientific_name: &str,
        common_name: Option<&str>,
    ) -> Result<Taxonomy, MapError> {
        let (genera, families, suborders, orders) = futures::try_join!(
            self.collection(&self.collections.genus),
            self.collection(&self.collections.family),
            self.collection(&self.collections.suborder),
            self.collection(&self.collections.order),
        )?;

        resolve_taxonomy(
            scientific_name,
            common_name,
            TaxonomyCollections {
                genera: &genera.items,
                families: &families.items,
                suborders: &suborders.items,
                orders: &orders.items,
            },
        )
    }
}
