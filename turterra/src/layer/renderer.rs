//! Layer Renderer: adds, updates and removes the managed layers and changes their paint.
//!
//! The renderer is stateless apart from the style. It never decides *what* should be on the map,
//! that is the controller's job; it only knows *how* each kind of layer is registered.

use geojson::FeatureCollection;
use turterra_types::{normalize, RegionSlug};

use crate::config::MapStyle;
use crate::engine::{Cursor, MapEngine, Popup};
use crate::layer::order::ensure_layer_order;
use crate::layer::{
    LayerId, LayerPosition, LayerSpec, PaintProperty, SourceData, OCCURRENCES_SOURCE, RANGE_SOURCE,
};

/// Registers managed layers with a [`MapEngine`] using the paint values of a [`MapStyle`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LayerRenderer {
    style: MapStyle,
}

impl LayerRenderer {
    /// Creates a new renderer.
    pub fn new(style: MapStyle) -> Self {
        Self { style }
    }

    /// Paint values used by the renderer.
    pub fn style(&self) -> &MapStyle {
        &self.style
    }

    /// Adds the fill layer of a region, or replaces the data of its source if the layer was
    /// already added. New layers are added on top with unselected paint; the caller is expected
    /// to restore the draw order once all regions are added.
    pub fn ensure_region_layer<E: MapEngine + ?Sized>(
        &self,
        engine: &mut E,
        slug: &RegionSlug,
        geometry: FeatureCollection,
    ) {
        let id = LayerId::country(slug);
        let source = id.source_id();

        if engine.has_source(&source) {
            engine.set_source_data(&source, SourceData::GeoJson(geometry));
            log::debug!("Updated geometry of region {slug}");
        } else {
            engine.add_source(&source, SourceData::GeoJson(geometry));
        }

        if !engine.has_layer(&id) {
            engine.add_layer(
                LayerSpec::new(id, self.style.region_paint()).interactive(),
                LayerPosition::Top,
            );
            log::debug!("Added layer of region {slug}");
        }
    }

    /// Adds the fill layer of a sub-region above its parent region layer and the sub-regions of
    /// the region added before it. The engine loads the geometry from `geometry_url` by itself.
    /// Does nothing if the layer exists.
    pub fn ensure_sub_region_layer<E: MapEngine + ?Sized>(
        &self,
        engine: &mut E,
        region: &RegionSlug,
        sub_region_name: &str,
        geometry_url: &str,
    ) {
        let id = LayerId::state(region, &normalize(sub_region_name));
        let source = id.source_id();

        if !engine.has_source(&source) {
            engine.add_source(&source, SourceData::Url(geometry_url.to_string()));
        }

        if !engine.has_layer(&id) {
            let anchor = engine
                .layer_ids()
                .into_iter()
                .rev()
                .find(|layer| is_sub_region_of(layer, region))
                .unwrap_or_else(|| LayerId::country(region));

            log::debug!("Adding layer {id} above {anchor}");
            engine.add_layer(
                LayerSpec::new(id, self.style.state_paint()).interactive(),
                LayerPosition::Above(anchor),
            );
        }

        ensure_layer_order(engine);
    }

    /// Removes layers and sources of all sub-regions of a region. Returns the number of removed
    /// layers.
    pub fn remove_sub_region_layers<E: MapEngine + ?Sized>(
        &self,
        engine: &mut E,
        region: &RegionSlug,
    ) -> usize {
        let states: Vec<LayerId> = engine
            .layer_ids()
            .into_iter()
            .filter(|id| is_sub_region_of(id, region))
            .collect();

        for id in &states {
            engine.remove_layer(id);
            engine.remove_source(&id.source_id());
        }

        if !states.is_empty() {
            log::debug!("Removed {} sub-region layers of {region}", states.len());
        }
        states.len()
    }

    /// Sets the species range. The range source feeds both the fill and the outline layers.
    pub fn set_range_data<E: MapEngine + ?Sized>(
        &self,
        engine: &mut E,
        collection: FeatureCollection,
    ) {
        if engine.has_source(RANGE_SOURCE) {
            engine.set_source_data(RANGE_SOURCE, SourceData::GeoJson(collection));
        } else {
            engine.add_source(RANGE_SOURCE, SourceData::GeoJson(collection));
        }

        if !engine.has_layer(&LayerId::RangeFill) {
            engine.add_layer(
                LayerSpec::new(LayerId::RangeFill, self.style.range_fill_paint()),
                LayerPosition::Top,
            );
        }

        if !engine.has_layer(&LayerId::RangeOutline) {
            engine.add_layer(
                LayerSpec::new(LayerId::RangeOutline, self.style.range_outline_paint()),
                LayerPosition::Top,
            );
        }

        ensure_layer_order(engine);
    }

    /// Sets the occurrence points.
    pub fn set_occurrences<E: MapEngine + ?Sized>(
        &self,
        engine: &mut E,
        collection: FeatureCollection,
    ) {
        if engine.has_source(OCCURRENCES_SOURCE) {
            engine.set_source_data(OCCURRENCES_SOURCE, SourceData::GeoJson(collection));
        } else {
            engine.add_source(OCCURRENCES_SOURCE, SourceData::GeoJson(collection));
        }

        if !engine.has_layer(&LayerId::Occurrences) {
            engine.add_layer(
                LayerSpec::new(LayerId::Occurrences, self.style.occurrence_paint()),
                LayerPosition::Top,
            );
        }

        ensure_layer_order(engine);
    }

    /// Applies the unselected paint to a region layer.
    pub fn restore_region<E: MapEngine + ?Sized>(&self, engine: &mut E, slug: &RegionSlug) {
        let id = LayerId::country(slug);
        engine.set_paint(&id, PaintProperty::FillColor(self.style.region_color));
        engine.set_paint(&id, PaintProperty::FillOpacity(self.style.region_opacity));
    }

    /// Applies the selected paint to a region layer.
    pub fn highlight_region<E: MapEngine + ?Sized>(&self, engine: &mut E, slug: &RegionSlug) {
        let id = LayerId::country(slug);
        engine.set_paint(&id, PaintProperty::FillColor(self.style.selected_color));
        engine.set_paint(&id, PaintProperty::FillOpacity(self.style.selected_opacity));
    }

    /// Pointer moved over a region. The opacity of a selected region is kept.
    pub fn hover_region<E: MapEngine + ?Sized>(
        &self,
        engine: &mut E,
        slug: &RegionSlug,
        label: &str,
        lon: f64,
        lat: f64,
        is_selected: bool,
    ) {
        engine.set_cursor(Cursor::Pointer);
        if !is_selected {
            engine.set_paint(
                &LayerId::country(slug),
                PaintProperty::FillOpacity(self.style.region_hover_opacity),
            );
        }

        engine.show_popup(Popup::new(lon, lat, label));
    }

    /// Pointer left a region.
    pub fn leave_region<E: MapEngine + ?Sized>(
        &self,
        engine: &mut E,
        slug: &RegionSlug,
        is_selected: bool,
    ) {
        engine.set_cursor(Cursor::Default);
        if !is_selected {
            engine.set_paint(
                &LayerId::country(slug),
                PaintProperty::FillOpacity(self.style.region_opacity),
            );
        }

        engine.hide_popup();
    }

    /// Pointer moved over a sub-region. The popup reads `"{sub-region}, {region}"`.
    pub fn hover_sub_region<E: MapEngine + ?Sized>(
        &self,
        engine: &mut E,
        id: &LayerId,
        sub_region_name: &str,
        region_name: &str,
        lon: f64,
        lat: f64,
    ) {
        engine.set_cursor(Cursor::Pointer);
        engine.set_paint(
            id,
            PaintProperty::FillOpacity(self.style.state_hover_opacity),
        );
        engine.show_popup(Popup::new(
            lon,
            lat,
            format!("{sub_region_name}, {region_name}"),
        ));
    }

    /// Pointer left a sub-region.
    pub fn leave_sub_region<E: MapEngine + ?Sized>(&self, engine: &mut E, id: &LayerId) {
        engine.set_cursor(Cursor::Default);
        engine.set_paint(id, PaintProperty::FillOpacity(self.style.state_opacity));
        engine.hide_popup();
    }
}

fn is_sub_region_of(id: &LayerId, region: &RegionSlug) -> bool {
    matches!(id, LayerId::State { country, .. } if country == region)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use geojson::{Feature, Geometry, Value};

    use super::*;
    use crate::engine::MemoryEngine;
    use crate::layer::is_ordered;
    use crate::Color;

    fn collection(lon: f64, lat: f64) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: vec![Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![lon, lat]))),
                id: None,
                properties: None,
                foreign_members: None,
            }],
            foreign_members: None,
        }
    }

    fn opacity(engine: &MemoryEngine, id: &LayerId) -> f32 {
        engine
            .paint(id)
            .and_then(|paint| paint.fill_opacity())
            .expect("fill layer")
    }

    #[test]
    fn region_layer_is_updated_in_place() {
        let renderer = LayerRenderer::default();
        let mut engine = MemoryEngine::default();
        let mexico = normalize("Mexico");

        renderer.ensure_region_layer(&mut engine, &mexico, collection(1.0, 1.0));
        renderer.ensure_region_layer(&mut engine, &mexico, collection(2.0, 2.0));

        assert_eq!(engine.layer_ids(), vec![LayerId::country(&mexico)]);
        assert_eq!(engine.source_count(), 1);
        assert_matches!(
            engine.source("country-mexico"),
            Some(SourceData::GeoJson(c)) if c == &collection(2.0, 2.0)
        );

        let paint = engine.paint(&LayerId::country(&mexico)).expect("layer");
        assert_eq!(paint.fill_color(), Some(Color::from_hex("#00C35E")));
        assert!(engine.layers().get(&LayerId::country(&mexico)).expect("layer").interactive);
    }

    #[test]
    fn sub_region_layer_is_above_parent() {
        let renderer = LayerRenderer::default();
        let mut engine = MemoryEngine::default();
        let mexico = normalize("Mexico");
        let belize = normalize("Belize");

        renderer.ensure_region_layer(&mut engine, &mexico, collection(1.0, 1.0));
        renderer.ensure_region_layer(&mut engine, &belize, collection(1.0, 1.0));
        renderer.set_range_data(&mut engine, collection(0.0, 0.0));
        renderer.ensure_sub_region_layer(&mut engine, &mexico, "Baja California", "http://states/bc");
        renderer.ensure_sub_region_layer(&mut engine, &mexico, "Baja California", "http://states/bc");

        let state = LayerId::state(&mexico, &normalize("Baja California"));
        assert_eq!(state.to_string(), "state-mexico-baja_california");
        assert_eq!(
            engine.layer_ids(),
            vec![
                LayerId::country(&mexico),
                LayerId::country(&belize),
                LayerId::RangeFill,
                LayerId::RangeOutline,
                state.clone(),
            ]
        );
        assert_matches!(
            engine.source(&state.to_string()),
            Some(SourceData::Url(url)) if url == "http://states/bc"
        );
    }

    #[test]
    fn sub_regions_keep_insertion_order() {
        let renderer = LayerRenderer::default();
        let mut engine = MemoryEngine::default();
        let mexico = normalize("Mexico");

        renderer.ensure_region_layer(&mut engine, &mexico, collection(1.0, 1.0));
        renderer.ensure_sub_region_layer(&mut engine, &mexico, "Sonora", "http://states/sonora");
        renderer.ensure_sub_region_layer(&mut engine, &mexico, "Jalisco", "http://states/jalisco");
        renderer.ensure_sub_region_layer(&mut engine, &mexico, "Yucatán", "http://states/yucatan");

        assert_eq!(
            engine.layer_ids(),
            vec![
                LayerId::country(&mexico),
                LayerId::state(&mexico, &normalize("Sonora")),
                LayerId::state(&mexico, &normalize("Jalisco")),
                LayerId::state(&mexico, &normalize("Yucatán")),
            ]
        );
    }

    #[test]
    fn removing_sub_regions_of_one_region() {
        let renderer = LayerRenderer::default();
        let mut engine = MemoryEngine::default();
        let mexico = normalize("Mexico");
        let peru = normalize("Peru");

        renderer.ensure_region_layer(&mut engine, &mexico, collection(1.0, 1.0));
        renderer.ensure_sub_region_layer(&mut engine, &mexico, "Sonora", "http://states/sonora");
        renderer.ensure_sub_region_layer(&mut engine, &mexico, "Jalisco", "http://states/jalisco");
        renderer.ensure_sub_region_layer(&mut engine, &peru, "Tumbes", "http://states/tumbes");

        assert_eq!(renderer.remove_sub_region_layers(&mut engine, &mexico), 2);
        assert_eq!(
            engine.layer_ids(),
            vec![
                LayerId::country(&mexico),
                LayerId::state(&peru, &normalize("Tumbes")),
            ]
        );
        assert_eq!(engine.source_count(), 2);

        assert_eq!(renderer.remove_sub_region_layers(&mut engine, &mexico), 0);
        assert_eq!(renderer.remove_sub_region_layers(&mut engine, &peru), 1);
        assert_eq!(engine.source_count(), 1);
    }

    #[test]
    fn range_and_occurrences_share_order() {
        let renderer = LayerRenderer::default();
        let mut engine = MemoryEngine::default();

        renderer.set_occurrences(&mut engine, collection(0.0, 0.0));
        renderer.set_range_data(&mut engine, collection(0.0, 0.0));
        renderer.ensure_region_layer(&mut engine, &normalize("Peru"), collection(0.0, 0.0));
        renderer.set_range_data(&mut engine, collection(1.0, 1.0));

        let ids = engine.layer_ids();
        assert!(is_ordered(&ids), "{ids:?}");
        assert_eq!(ids.last(), Some(&LayerId::Occurrences));
        assert_matches!(
            engine.paint(&LayerId::RangeOutline),
            Some(crate::layer::Paint::Line { width, .. }) if width == 2.0
        );
        assert_eq!(engine.source_count(), 3);
    }

    #[test]
    fn hover_keeps_selected_opacity() {
        let renderer = LayerRenderer::default();
        let mut engine = MemoryEngine::default();
        let mexico = normalize("Mexico");
        let id = LayerId::country(&mexico);
        renderer.ensure_region_layer(&mut engine, &mexico, collection(1.0, 1.0));

        renderer.hover_region(&mut engine, &mexico, "Mexico", -100.0, 20.0, false);
        assert_abs_diff_eq!(opacity(&engine, &id), 0.8);
        assert_eq!(engine.popup().map(|p| p.text.as_str()), Some("Mexico"));
        assert_eq!(engine.cursor(), Cursor::Pointer);

        renderer.leave_region(&mut engine, &mexico, false);
        assert_abs_diff_eq!(opacity(&engine, &id), 0.5);
        assert!(engine.popup().is_none());

        renderer.highlight_region(&mut engine, &mexico);
        renderer.hover_region(&mut engine, &mexico, "Mexico", -100.0, 20.0, true);
        assert_abs_diff_eq!(opacity(&engine, &id), 0.3);
        renderer.leave_region(&mut engine, &mexico, true);
        assert_abs_diff_eq!(opacity(&engine, &id), 0.3);
        assert_eq!(engine.cursor(), Cursor::Default);
    }

    #[test]
    fn sub_region_popup_names_both() {
        let renderer = LayerRenderer::default();
        let mut engine = MemoryEngine::default();
        let mexico = normalize("Mexico");
        renderer.ensure_sub_region_layer(&mut engine, &mexico, "Sonora", "http://states/sonora");
        let id = LayerId::state(&mexico, &normalize("Sonora"));

        renderer.hover_sub_region(&mut engine, &id, "Sonora", "Mexico", -110.0, 29.0);
        assert_eq!(
            engine.popup().map(|p| p.text.as_str()),
            Some("Sonora, Mexico")
        );
        assert_abs_diff_eq!(opacity(&engine, &id), 0.8);

        renderer.leave_sub_region(&mut engine, &id);
        assert_abs_diff_eq!(opacity(&engine, &id), 0.5);
        assert!(engine.popup().is_none());
    }
}
