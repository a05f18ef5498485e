use std::collections::BTreeMap;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use turterra_types::FeatureCategory;

use crate::config::MapConfig;
use crate::data_provider::{join_segments, HttpLoader};
use crate::error::MapError;

const ASSET_HOST: &str = "res.cloudinary.com";
const UPLOAD_SEGMENT: &str = "/upload/";

/// Image stored in the asset manager.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetImage {
    /// Asset id.
    #[serde(default)]
    pub public_id: String,
    /// Https url of the original image.
    #[serde(default)]
    pub secure_url: String,
    /// Tags, some of which name a [`FeatureCategory`].
    #[serde(default)]
    pub tags: Vec<String>,
    /// Structured metadata.
    #[serde(default)]
    pub metadata: AssetMetadata,
}

impl AssetImage {
    /// Whether the image is the main photo of the species.
    pub fn is_primary(&self) -> bool {
        self.metadata.primary_photo
    }
}

/// Structured metadata of an [`AssetImage`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetMetadata {
    /// Main photo of the species.
    pub primary_photo: bool,
    /// Life stage shown, e.g. `adult`.
    pub life_stage: Option<String>,
    /// Kind of the asset, e.g. `photo` or `illustration`.
    pub asset_type: Option<String>,
    /// Photo credits.
    pub credits_basic: Option<String>,
}

/// Image of a physical feature category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryImage {
    /// Image url, optimized for display.
    pub url: String,
    /// Photo credits.
    pub credits: Option<String>,
}

/// Client of the asset manager routes of the proxy.
#[derive(Debug, Clone)]
pub struct AssetClient {
    loader: HttpLoader,
    base_url: String,
}

impl AssetClient {
    /// Display width of category images.
    pub const CATEGORY_IMAGE_WIDTH: u32 = 800;

    /// Creates a client for the proxy of the configuration.
    pub fn new(loader: HttpLoader, config: &MapConfig) -> Self {
        Self {
            loader,
            base_url: config.proxy_url().to_string(),
        }
    }

    /// Url of the species image folder.
    pub fn species_url(&self, species: &str) -> Result<Url, MapError> {
        join_segments(&self.base_url, ["cloudinary", &folder_name(species)])
    }

    /// Loads all images of a species, main photo first.
    pub async fn species_images(&self, species: &str) -> Result<Vec<AssetImage>, MapError> {
        let url = self.species_url(species)?;
        self.load_images(url.as_str()).await
    }

    /// Loads the physical feature images of a species, main photo first.
    pub async fn physical_feature_images(
        &self,
        species: &str,
    ) -> Result<Vec<AssetImage>, MapError> {
        let url = join_segments(
            &self.base_url,
            ["cloudinary", &folder_name(species), "physical-features"],
        )?;
        self.load_images(url.as_str()).await
    }

    async fn load_images(&self, url: &str) -> Result<Vec<AssetImage>, MapError> {
        let mut images: Vec<AssetImage> = match self.loader.load_json(url).await {
            Ok(images) => images,
            Err(MapError::Status { status: 404, .. }) => {
                log::debug!("No images at {url}");
                return Ok(vec![]);
            }
            Err(err) => return Err(err),
        };

        sort_primary_first(&mut images);
        Ok(images)
    }
}

/// Species folder name in the asset manager: runs of whitespace become `-`.
fn folder_name(species: &str) -> String {
    species.split_whitespace().collect::<Vec<_>>().join("-")
}

fn sort_primary_first(images: &mut [AssetImage]) {
    images.sort_by_key(|image| !image.is_primary());
}

/// Groups images by the physical feature category named in their tags. An image with several
/// category tags appears in each of them. Tags that do not name a category are ignored.
pub fn images_by_category(
    images: &[AssetImage],
) -> BTreeMap<FeatureCategory, Vec<CategoryImage>> {
    let mut groups: BTreeMap<FeatureCategory, Vec<CategoryImage>> = BTreeMap::new();
    for image in images {
        for category in image.tags.iter().filter_map(|tag| FeatureCategory::from_tag(tag)) {
            groups.entry(category).or_default().push(CategoryImage {
                url: optimize_image_url(&image.secure_url, AssetClient::CATEGORY_IMAGE_WIDTH),
                credits: image.metadata.credits_basic.clone(),
            });
        }
    }

    groups
}

/// Adds a width limiting transformation to an asset manager url.
///
/// Urls of other hosts, and urls that already carry a width transformation, are returned
/// unchanged.
///
/// ```
/// use turterra::catalog::optimize_image_url;
///
/// assert_eq!(
///     optimize_image_url("https://res.cloudinary.com/demo/image/upload/v1/a.png", 600),
///     "https://res.cloudinary.com/demo/image/upload/w_600,c_limit/v1/a.png"
/// );
/// ```
pub fn optimize_image_url(url: &str, width: u32) -> String {
    if !url.contains(ASSET_HOST) || url.contains("w_") {
        return url.to_string();
    }

    url.replacen(
        UPLOAD_SEGMENT,
        &format!("{UPLOAD_SEGMENT}w_{width},c_limit/"),
        1,
    )
}
