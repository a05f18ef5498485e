//! Seam between the controller and a map rendering engine.
//!
//! The controller never draws anything itself. It registers sources and layers, changes paint
//! properties, shows popups and moves the camera through the [`MapEngine`] trait. A headless
//! [`MemoryEngine`] is provided for tests and for running the controller without a display.

use maybe_sync::{MaybeSend, MaybeSync};
use turterra_types::Bounds;

use crate::layer::{LayerId, LayerPosition, LayerSpec, Paint, PaintProperty, SourceData};
use crate::messenger::Messenger;
use crate::view::MapView;

mod layer_stack;
mod memory;

pub use layer_stack::LayerStack;
pub use memory::MemoryEngine;

/// Map rendering engine.
///
/// Operations on layers or sources that do not exist are no-ops. Implementations should log
/// them at `debug` level rather than fail, since a missing layer during an interaction is an
/// expected race with the engine's own loading.
pub trait MapEngine: MaybeSend + MaybeSync {
    /// Returns true if the source is registered.
    fn has_source(&self, id: &str) -> bool;
    /// Registers a new source. An existing source with the same id is replaced.
    fn add_source(&mut self, id: &str, data: SourceData);
    /// Replaces data of an existing source in place. Returns false if the source does not exist.
    fn set_source_data(&mut self, id: &str, data: SourceData) -> bool;
    /// Removes a source.
    fn remove_source(&mut self, id: &str);

    /// Returns true if the layer is registered.
    fn has_layer(&self, id: &LayerId) -> bool;
    /// Adds a layer at the given position. Does nothing if a layer with the same id exists.
    fn add_layer(&mut self, spec: LayerSpec, position: LayerPosition);
    /// Removes a layer.
    fn remove_layer(&mut self, id: &LayerId);
    /// Moves a layer on top of all other layers.
    fn move_layer(&mut self, id: &LayerId);
    /// Managed layers, bottom first.
    fn layer_ids(&self) -> Vec<LayerId>;
    /// Current paint of a layer.
    fn paint(&self, id: &LayerId) -> Option<Paint>;
    /// Changes a single paint property of a layer.
    fn set_paint(&mut self, id: &LayerId, property: PaintProperty);

    /// Shows a text popup at a geographic position, replacing the previous popup.
    fn show_popup(&mut self, popup: Popup);
    /// Hides the popup.
    fn hide_popup(&mut self);
    /// Sets the pointer cursor over the map.
    fn set_cursor(&mut self, cursor: Cursor);

    /// Moves the camera to the given view.
    fn fly_to(&mut self, view: MapView);
    /// Moves the camera to show the bounds, leaving `padding` pixels at the sides and zooming in
    /// not further than `max_zoom`.
    fn fit_bounds(&mut self, bounds: Bounds, padding: f64, max_zoom: f64);
    /// Current camera.
    fn view(&self) -> MapView;

    /// Sets the messenger notified about every visible change.
    fn set_messenger(&mut self, messenger: Box<dyn Messenger>);
}

/// Label shown next to the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    /// Longitude of the anchor.
    pub lon: f64,
    /// Latitude of the anchor.
    pub lat: f64,
    /// Text of the label.
    pub text: String,
}

impl Popup {
    /// Creates a new popup.
    pub fn new(lon: f64, lat: f64, text: impl Into<String>) -> Self {
        Self {
            lon,
            lat,
            text: text.into(),
        }
    }
}

/// Pointer cursor.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Cursor {
    /// Engine default cursor.
    #[default]
    Default,
    /// Hand cursor shown over clickable features.
    Pointer,
}
