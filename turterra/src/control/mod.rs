//! User interaction with the distribution map.
//!
//! The host application translates pointer and UI events into [`MapEvent`]s and hands them to
//! [`HighlightController::handle_event`](crate::HighlightController::handle_event). The
//! controller keeps the [`Selection`] and the [`DetailsPanel`] consistent with the map layers.

use geojson::Feature;
use turterra_types::geometry::feature_name;
use turterra_types::RegionSlug;

use crate::layer::LayerId;

mod panel;
mod selection;

pub use panel::{DetailsPanel, PanelState, PanelTransition, RegionDetails, SpeciesSection};
pub use selection::{Selection, SelectionState, SelectionTicket};

/// Interaction event.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Pointer moved over a feature of an interactive layer.
    PointerMoved {
        /// Layer under the pointer.
        layer: LayerId,
        /// `NAME` property of the feature under the pointer.
        feature_name: Option<String>,
        /// Longitude of the pointer.
        lon: f64,
        /// Latitude of the pointer.
        lat: f64,
    },
    /// Pointer left an interactive layer.
    PointerLeft {
        /// Layer the pointer left.
        layer: LayerId,
    },
    /// A feature of an interactive layer was clicked.
    Clicked {
        /// Clicked layer. A click on a region layer selects the region of the layer.
        layer: LayerId,
        /// `NAME` property of the clicked feature. Geometry names may differ from the region
        /// names of the distribution data, so this is informational only.
        feature_name: Option<String>,
    },
    /// An entry of the region list was clicked.
    RegionListClicked(RegionSlug),
    /// Close button of the details panel was clicked.
    CloseClicked,
    /// Slide animation of the details panel finished.
    PanelTransitionEnd,
}

impl MapEvent {
    /// Click on a feature of an interactive layer. The feature name is read from its `NAME`
    /// property.
    pub fn feature_clicked(layer: LayerId, feature: &Feature) -> Self {
        Self::Clicked {
            layer,
            feature_name: feature_name(feature).map(str::to_string),
        }
    }

    /// Pointer move over a feature of an interactive layer.
    pub fn pointer_over_feature(layer: LayerId, feature: &Feature, lon: f64, lat: f64) -> Self {
        Self::PointerMoved {
            layer,
            feature_name: feature_name(feature).map(str::to_string),
            lon,
            lat,
        }
    }
}

/// Whether an event should be passed on to the other handlers of the host application.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventPropagation {
    /// The event was not relevant for the map.
    Propagate,
    /// The event was handled.
    Stop,
}
