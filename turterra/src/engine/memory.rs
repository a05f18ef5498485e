use std::collections::HashMap;

use turterra_types::Bounds;

use crate::engine::{Cursor, LayerStack, MapEngine, Popup};
use crate::layer::{LayerId, LayerPosition, LayerSpec, Paint, PaintProperty, SourceData};
use crate::messenger::Messenger;
use crate::view::{MapView, Viewport};

/// Headless map engine keeping the whole map state in memory.
///
/// It does not draw anything, but it tracks exactly what a real engine would display: the layer
/// stack with paints, the sources, the popup, the cursor and the camera. Every visible change is
/// reported to the messenger, if one is set.
#[derive(Default)]
pub struct MemoryEngine {
    layers: LayerStack,
    sources: HashMap<String, SourceData>,
    popup: Option<Popup>,
    cursor: Cursor,
    view: MapView,
    viewport: Viewport,
    messenger: Option<Box<dyn Messenger>>,
}

impl std::fmt::Debug for MemoryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryEngine")
            .field("layers", &self.layers)
            .field("sources", &self.sources.len())
            .field("popup", &self.popup)
            .field("cursor", &self.cursor)
            .field("view", &self.view)
            .finish()
    }
}

impl MemoryEngine {
    /// Creates an engine with the given camera and surface size.
    pub fn new(view: MapView, viewport: Viewport) -> Self {
        Self {
            view,
            viewport,
            ..Default::default()
        }
    }

    /// Data of a source.
    pub fn source(&self, id: &str) -> Option<&SourceData> {
        self.sources.get(id)
    }

    /// Number of registered sources.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Layer stack.
    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    /// Popup currently shown.
    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    /// Current cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Size of the map surface.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Changes the size of the map surface.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.redraw();
    }

    fn redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw();
        }
    }
}

impl MapEngine for MemoryEngine {
    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn add_source(&mut self, id: &str, data: SourceData) {
        self.sources.insert(id.to_string(), data);
        self.redraw();
    }

    fn set_source_data(&mut self, id: &str, data: SourceData) -> bool {
        match self.sources.get_mut(id) {
            Some(source) => {
                *source = data;
                self.redraw();
                true
            }
            None => {
                log::debug!("Cannot set data of source {id}: source does not exist");
                false
            }
        }
    }

    fn remove_source(&mut self, id: &str) {
        if self.sources.remove(id).is_some() {
            self.redraw();
        }
    }

    fn has_layer(&self, id: &LayerId) -> bool {
        self.layers.contains(id)
    }

    fn add_layer(&mut self, spec: LayerSpec, position: LayerPosition) {
        if !self.sources.contains_key(&spec.source) {
            log::debug!(
                "Layer {} is added before its source {} is available",
                spec.id,
                spec.source
            );
        }

        let id = spec.id.clone();
        if self.layers.insert(spec, position) {
            self.redraw();
        } else {
            log::debug!("Layer {id} already exists");
        }
    }

    fn remove_layer(&mut self, id: &LayerId) {
        if self.layers.remove(id).is_some() {
            self.redraw();
        }
    }

    fn move_layer(&mut self, id: &LayerId) {
        if self.layers.move_to_top(id) {
            self.redraw();
        } else {
            log::debug!("Cannot move layer {id}: layer does not exist");
        }
    }

    fn layer_ids(&self) -> Vec<LayerId> {
        self.layers.ids()
    }

    fn paint(&self, id: &LayerId) -> Option<Paint> {
        self.layers.get(id).map(|spec| spec.paint)
    }

    fn set_paint(&mut self, id: &LayerId, property: PaintProperty) {
        let Some(paint) = self.layers.paint_mut(id) else {
            log::debug!("Cannot set paint of layer {id}: layer does not exist");
            return;
        };

        if paint.apply(property) {
            self.redraw();
        } else {
            log::debug!("Paint property {property:?} does not apply to layer {id}");
        }
    }

    fn show_popup(&mut self, popup: Popup) {
        self.popup = Some(popup);
        self.redraw();
    }

    fn hide_popup(&mut self) {
        if self.popup.take().is_some() {
            self.redraw();
        }
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn fly_to(&mut self, view: MapView) {
        self.view = view;
        self.redraw();
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding: f64, max_zoom: f64) {
        self.view = MapView::fit(&bounds, padding, max_zoom, self.viewport);
        self.redraw();
    }

    fn view(&self) -> MapView {
        self.view
    }

    fn set_messenger(&mut self, messenger: Box<dyn Messenger>) {
        self.messenger = Some(messenger);
    }
}
