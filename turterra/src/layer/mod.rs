//! Map layers managed by the controller: identifiers, draw categories and paint.
//!
//! Every region ever displayed gets its own fill layer backed by a source of the same name.
//! Besides those, the map carries three singleton layers: the species range fill and outline
//! (sharing the `range-data` source) and the occurrence points.

use std::fmt::{Display, Formatter};

use geojson::FeatureCollection;
use turterra_types::RegionSlug;

use crate::Color;

pub mod order;
pub mod renderer;

pub use order::{draw_order, ensure_layer_order, is_ordered};
pub use renderer::LayerRenderer;

/// Name of the source shared by the range fill and outline layers.
pub const RANGE_SOURCE: &str = "range-data";
/// Name of the occurrence points source.
pub const OCCURRENCES_SOURCE: &str = "occurrences";

/// Identifier of a layer managed by the controller.
///
/// The string form (see [`Display`]) is the name the layer is registered under in the rendering
/// engine: `country-{slug}`, `state-{country}-{state}`, `range-data`, `range-outline` and
/// `occurrences`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerId {
    /// Fill layer of a country.
    Country(RegionSlug),
    /// Fill layer of a sub-region (state or province) of a country.
    State {
        /// Parent country.
        country: RegionSlug,
        /// Sub-region slug.
        state: RegionSlug,
    },
    /// Species range fill.
    RangeFill,
    /// Species range outline.
    RangeOutline,
    /// Occurrence points.
    Occurrences,
}

impl LayerId {
    /// Layer of the given country.
    pub fn country(slug: &RegionSlug) -> Self {
        Self::Country(slug.clone())
    }

    /// Layer of the given sub-region.
    pub fn state(country: &RegionSlug, state: &RegionSlug) -> Self {
        Self::State {
            country: country.clone(),
            state: state.clone(),
        }
    }

    /// Draw category of the layer.
    pub fn category(&self) -> LayerCategory {
        match self {
            Self::Country(_) => LayerCategory::Country,
            Self::State { .. } => LayerCategory::State,
            Self::RangeFill => LayerCategory::RangeFill,
            Self::RangeOutline => LayerCategory::RangeOutline,
            Self::Occurrences => LayerCategory::Occurrences,
        }
    }

    /// Name of the source the layer draws.
    pub fn source_id(&self) -> String {
        match self {
            Self::RangeFill | Self::RangeOutline => RANGE_SOURCE.to_string(),
            Self::Occurrences => OCCURRENCES_SOURCE.to_string(),
            _ => self.to_string(),
        }
    }
}

impl Display for LayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Country(slug) => write!(f, "country-{slug}"),
            Self::State { country, state } => write!(f, "state-{country}-{state}"),
            Self::RangeFill => f.write_str("range-data"),
            Self::RangeOutline => f.write_str("range-outline"),
            Self::Occurrences => f.write_str("occurrences"),
        }
    }
}

/// Draw category of a layer. The `Ord` of this enum is the draw order: lower categories are
/// drawn first and end up below the higher ones.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerCategory {
    /// Country fills.
    Country,
    /// Species range fill.
    RangeFill,
    /// Species range outline.
    RangeOutline,
    /// Sub-region fills.
    State,
    /// Occurrence points.
    Occurrences,
}

/// Data of a source registered with the rendering engine.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceData {
    /// Inline GeoJSON.
    GeoJson(FeatureCollection),
    /// GeoJSON document the engine loads by itself.
    Url(String),
}

/// Paint of a layer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Paint {
    /// Polygon fill.
    Fill {
        /// Fill color.
        color: Color,
        /// Fill opacity in `0.0..=1.0`.
        opacity: f32,
        /// Outline color of the polygons.
        outline_color: Option<Color>,
    },
    /// Line.
    Line {
        /// Line color.
        color: Color,
        /// Width in pixels.
        width: f32,
    },
    /// Circles drawn at points.
    Circle {
        /// Radius in pixels.
        radius: f32,
        /// Circle color.
        color: Color,
        /// Circle opacity in `0.0..=1.0`.
        opacity: f32,
    },
}

impl Paint {
    /// Sets a single paint property. Returns `false` if the property does not apply to this kind
    /// of paint, in which case the paint is left untouched.
    pub fn apply(&mut self, property: PaintProperty) -> bool {
        match (self, property) {
            (Paint::Fill { color, .. }, PaintProperty::FillColor(value)) => *color = value,
            (Paint::Fill { opacity, .. }, PaintProperty::FillOpacity(value)) => *opacity = value,
            (Paint::Line { color, .. }, PaintProperty::LineColor(value)) => *color = value,
            (Paint::Line { width, .. }, PaintProperty::LineWidth(value)) => *width = value,
            (Paint::Circle { color, .. }, PaintProperty::CircleColor(value)) => *color = value,
            (Paint::Circle { opacity, .. }, PaintProperty::CircleOpacity(value)) => {
                *opacity = value
            }
            _ => return false,
        }

        true
    }

    /// Fill color, if this is a fill paint.
    pub fn fill_color(&self) -> Option<Color> {
        match self {
            Paint::Fill { color, .. } => Some(*color),
            _ => None,
        }
    }

    /// Fill opacity, if this is a fill paint.
    pub fn fill_opacity(&self) -> Option<f32> {
        match self {
            Paint::Fill { opacity, .. } => Some(*opacity),
            _ => None,
        }
    }
}

/// A single paint property change.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PaintProperty {
    /// `fill-color`
    FillColor(Color),
    /// `fill-opacity`
    FillOpacity(f32),
    /// `line-color`
    LineColor(Color),
    /// `line-width`
    LineWidth(f32),
    /// `circle-color`
    CircleColor(Color),
    /// `circle-opacity`
    CircleOpacity(f32),
}

/// Description of a layer to be added to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    /// Layer identifier.
    pub id: LayerId,
    /// Name of the source the layer draws.
    pub source: String,
    /// Initial paint.
    pub paint: Paint,
    /// If true, the engine reports pointer events over the layer's features.
    pub interactive: bool,
}

impl LayerSpec {
    /// Creates a layer spec drawing the layer's own source.
    pub fn new(id: LayerId, paint: Paint) -> Self {
        Self {
            source: id.source_id(),
            id,
            paint,
            interactive: false,
        }
    }

    /// Marks the layer as interactive.
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }
}

/// Where a new layer is inserted into the layer stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerPosition {
    /// On top of all layers.
    Top,
    /// Directly above the given layer, or on top if the layer does not exist.
    Above(LayerId),
}
