//! Data model shared by the Turterra map crates: region identifiers, species distribution
//! payloads, cached region records, GeoJSON helpers and the canonical physical feature
//! categories.

pub mod category;
pub mod distribution;
pub mod error;
pub mod geometry;
pub mod region;
pub mod slug;

pub use category::FeatureCategory;
pub use distribution::{CountryEntry, DistributionPayload, StateEntry};
pub use geometry::Bounds;
pub use region::{Presence, Region, SpeciesDetail};
pub use slug::{normalize, species_display_name, RegionSlug};

// Reexport geojson
pub use geojson;
