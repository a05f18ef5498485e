//! Clients of the content services behind the proxy: the CMS holding species records and the
//! asset manager holding species photos, plus the helpers that turn their responses into what
//! the map and the profile pages display.

mod assets;
mod cms;
pub mod features;
pub mod search;
pub mod taxonomy;

pub use assets::{
    images_by_category, optimize_image_url, AssetClient, AssetImage, AssetMetadata, CategoryImage,
};
pub use cms::{CmsClient, CollectionItem, CollectionResponse, SpeciesRecord};
