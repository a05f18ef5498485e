//! Map configuration.
//!
//! Every field has a default matching the production deployment, so [`MapConfig::from_json`]
//! accepts a partial document and fills in the rest.

use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::layer::Paint;
use crate::view::{MapView, Viewport};
use crate::Color;

const DEFAULT_PROXY_URL: &str = "https://turterra.vercel.app";
const DEFAULT_REGION_GEOMETRY_URL: &str =
    "https://raw.githubusercontent.com/DenisBielat/natural-earth-admin-0-countries/main/geojson/{slug}.geojson";
const DEFAULT_SUB_REGION_MAPPING_URL: &str =
    "https://raw.githubusercontent.com/DenisBielat/natural-earth-admin-1-states/main/states_provinces_mapping.json";
const DEFAULT_OCCURRENCES_URL: &str = "https://api.gbif.org/v1/occurrence/search";

/// Configuration of the distribution map and of the clients it uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    proxy_url: String,
    collections: CollectionIds,
    region_geometry_url: String,
    sub_region_mapping_url: String,
    occurrences_url: String,
    occurrences_limit: u32,
    default_view: MapView,
    fit_padding: f64,
    max_fit_zoom: f64,
    viewport: Viewport,
    style: MapStyle,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            collections: CollectionIds::default(),
            region_geometry_url: DEFAULT_REGION_GEOMETRY_URL.to_string(),
            sub_region_mapping_url: DEFAULT_SUB_REGION_MAPPING_URL.to_string(),
            occurrences_url: DEFAULT_OCCURRENCES_URL.to_string(),
            occurrences_limit: 1000,
            default_view: MapView::default(),
            fit_padding: 20.0,
            max_fit_zoom: 5.0,
            viewport: Viewport::default(),
            style: MapStyle::default(),
        }
    }
}

impl MapConfig {
    /// Loads configuration from a JSON document. Missing fields take default values.
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Base url of the proxy serving the CMS and asset manager routes.
    pub fn proxy_url(&self) -> &str {
        &self.proxy_url
    }

    /// Sets base url of the proxy.
    pub fn with_proxy_url(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = url.into();
        self
    }

    /// CMS collection identifiers.
    pub fn collections(&self) -> &CollectionIds {
        &self.collections
    }

    /// Sets CMS collection identifiers.
    pub fn with_collections(mut self, collections: CollectionIds) -> Self {
        self.collections = collections;
        self
    }

    /// Template of the region geometry url. `{slug}` is replaced with the region slug.
    pub fn region_geometry_url(&self) -> &str {
        &self.region_geometry_url
    }

    /// Sets template of the region geometry url.
    pub fn with_region_geometry_url(mut self, template: impl Into<String>) -> Self {
        self.region_geometry_url = template.into();
        self
    }

    /// Url of the document listing sub-regions of every country.
    pub fn sub_region_mapping_url(&self) -> &str {
        &self.sub_region_mapping_url
    }

    /// Sets url of the sub-region mapping document.
    pub fn with_sub_region_mapping_url(mut self, url: impl Into<String>) -> Self {
        self.sub_region_mapping_url = url.into();
        self
    }

    /// Endpoint of the occurrence search. The `scientificName` and `limit` query parameters are
    /// appended to it.
    pub fn occurrences_url(&self) -> &str {
        &self.occurrences_url
    }

    /// Sets endpoint of the occurrence search.
    pub fn with_occurrences_url(mut self, url: impl Into<String>) -> Self {
        self.occurrences_url = url.into();
        self
    }

    /// Maximum number of occurrence records requested.
    pub fn occurrences_limit(&self) -> u32 {
        self.occurrences_limit
    }

    /// Sets maximum number of occurrence records requested.
    pub fn with_occurrences_limit(mut self, limit: u32) -> Self {
        self.occurrences_limit = limit;
        self
    }

    /// View the map starts with and returns to on reset.
    pub fn default_view(&self) -> MapView {
        self.default_view
    }

    /// Sets the default view.
    pub fn with_default_view(mut self, view: MapView) -> Self {
        self.default_view = view;
        self
    }

    /// Padding in pixels left around a region when the view is fitted to it.
    pub fn fit_padding(&self) -> f64 {
        self.fit_padding
    }

    /// Sets the fit padding.
    pub fn with_fit_padding(mut self, padding: f64) -> Self {
        self.fit_padding = padding;
        self
    }

    /// Maximum zoom used when the view is fitted to a region.
    pub fn max_fit_zoom(&self) -> f64 {
        self.max_fit_zoom
    }

    /// Sets maximum fit zoom.
    pub fn with_max_fit_zoom(mut self, zoom: f64) -> Self {
        self.max_fit_zoom = zoom;
        self
    }

    /// Size of the map surface.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Sets size of the map surface.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Sets size of the map surface.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Layer paint values.
    pub fn style(&self) -> &MapStyle {
        &self.style
    }

    /// Sets layer paint values.
    pub fn with_style(mut self, style: MapStyle) -> Self {
        self.style = style;
        self
    }
}

/// Identifiers of the CMS collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionIds {
    /// Turtle species.
    pub species: String,
    /// Species distributions.
    pub distributions: String,
    /// Genera.
    pub genus: String,
    /// Families.
    pub family: String,
    /// Suborders.
    pub suborder: String,
    /// Orders.
    pub order: String,
}

impl Default for CollectionIds {
    fn default() -> Self {
        Self {
            species: "65a871ba95802374d1170989".to_string(),
            distributions: "665f58dea5d07e31b92c2ba2".to_string(),
            genus: "66637132663284af3d60c285".to_string(),
            family: "66636a5b1814b2e86443af71".to_string(),
            suborder: "6663676f890637f16da7d6e3".to_string(),
            order: "666366bd63ec3102249a34b6".to_string(),
        }
    }
}

/// Paint values of the map layers.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    /// Fill color of regions that are not selected.
    pub region_color: Color,
    /// Fill opacity of regions that are not selected.
    pub region_opacity: f32,
    /// Fill opacity of a region under the pointer.
    pub region_hover_opacity: f32,
    /// Outline color of regions.
    pub region_outline_color: Color,
    /// Fill color of the selected region.
    pub selected_color: Color,
    /// Fill opacity of the selected region.
    pub selected_opacity: f32,
    /// Fill color of sub-regions.
    pub state_color: Color,
    /// Fill opacity of sub-regions.
    pub state_opacity: f32,
    /// Fill opacity of a sub-region under the pointer.
    pub state_hover_opacity: f32,
    /// Outline color of sub-regions.
    pub state_outline_color: Color,
    /// Fill color of the species range.
    pub range_color: Color,
    /// Fill opacity of the species range.
    pub range_opacity: f32,
    /// Outline color of the species range.
    pub range_outline_color: Color,
    /// Outline width of the species range.
    pub range_outline_width: f32,
    /// Radius of occurrence points.
    pub occurrence_radius: f32,
    /// Color of occurrence points.
    pub occurrence_color: Color,
    /// Opacity of occurrence points.
    pub occurrence_opacity: f32,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            region_color: Color::from_hex("#00C35E"),
            region_opacity: 0.5,
            region_hover_opacity: 0.8,
            region_outline_color: Color::BLACK,
            selected_color: Color::from_hex("#30302E"),
            selected_opacity: 0.3,
            state_color: Color::RED,
            state_opacity: 0.5,
            state_hover_opacity: 0.8,
            state_outline_color: Color::BLACK,
            range_color: Color::from_hex("#FFA500"),
            range_opacity: 0.3,
            range_outline_color: Color::from_hex("#FF4500"),
            range_outline_width: 2.0,
            occurrence_radius: 5.0,
            occurrence_color: Color::from_hex("#FF0000"),
            occurrence_opacity: 0.8,
        }
    }
}

impl MapStyle {
    /// Paint of a region that is not selected.
    pub fn region_paint(&self) -> Paint {
        Paint::Fill {
            color: self.region_color,
            opacity: self.region_opacity,
            outline_color: Some(self.region_outline_color),
        }
    }

    /// Paint of the selected region.
    pub fn selected_paint(&self) -> Paint {
        Paint::Fill {
            color: self.selected_color,
            opacity: self.selected_opacity,
            outline_color: Some(self.region_outline_color),
        }
    }

    /// Paint of a sub-region.
    pub fn state_paint(&self) -> Paint {
        Paint::Fill {
            color: self.state_color,
            opacity: self.state_opacity,
            outline_color: Some(self.state_outline_color),
        }
    }

    /// Paint of the species range fill.
    pub fn range_fill_paint(&self) -> Paint {
        Paint::Fill {
            color: self.range_color,
            opacity: self.range_opacity,
            outline_color: None,
        }
    }

    /// Paint of the species range outline.
    pub fn range_outline_paint(&self) -> Paint {
        Paint::Line {
            color: self.range_outline_color,
            width: self.range_outline_width,
        }
    }

    /// Paint of the occurrence points.
    pub fn occurrence_paint(&self) -> Paint {
        Paint::Circle {
            radius: self.occurrence_radius,
            color: self.occurrence_color,
            opacity: self.occurrence_opacity,
        }
    }
}
