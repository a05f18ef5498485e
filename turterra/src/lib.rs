//! Turterra draws the distribution of turtle species on an interactive map.
//!
//! # Quick start
//!
//! ```no_run
//! use turterra::catalog::CmsClient;
//! use turterra::data_provider::{HttpLoader, UrlMapDataProvider};
//! use turterra::engine::MemoryEngine;
//! use turterra::{HighlightController, MapConfig};
//!
//! # async fn run() -> Result<(), turterra::MapError> {
//! let config = MapConfig::default();
//! let loader = HttpLoader::new()?;
//! let cms = CmsClient::new(loader.clone(), &config);
//! let record = cms.load_species_record("green-sea-turtle").await?;
//!
//! let controller = HighlightController::new(
//!     MemoryEngine::default(),
//!     UrlMapDataProvider::new(loader, &config),
//!     config,
//! );
//! controller.load_species(&record).await;
//! # Ok(())
//! # }
//! ```
//!
//! # Main components
//!
//! * [`HighlightController`] owns everything that is on the map and reacts to
//!   [`control::MapEvent`]s: it highlights the selected country, shows its states and fills
//!   the details panel.
//! * Region records live in a [`store::RegionStore`], filled from species distribution payloads.
//! * Layers are registered with a rendering engine through the [`engine::MapEngine`] trait by a
//!   [`layer::LayerRenderer`], and [`layer::ensure_layer_order`] keeps them in the draw order
//!   `countries < range fill < range outline < states < occurrences`.
//! * Map data is loaded by a [`data_provider::MapDataProvider`], species records and images by
//!   the [`catalog`] clients.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod catalog;
mod color;
pub mod config;
pub mod control;
mod controller;
pub mod data_provider;
pub mod engine;
pub mod error;
pub mod layer;
mod messenger;
pub mod store;
mod view;

#[cfg(test)]
pub(crate) mod tests;

pub use color::Color;
pub use config::{MapConfig, MapStyle};
pub use controller::HighlightController;
pub use error::MapError;
pub use messenger::{DummyMessenger, Messenger};
pub use view::{MapView, Viewport};

// Reexport turterra_types
pub use turterra_types;
