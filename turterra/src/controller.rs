//! Highlight controller: keeps the map layers, the selection and the details panel in sync.

use std::sync::Arc;

use futures::future::join_all;
use parking_lot::Mutex;
use turterra_types::{Bounds, DistributionPayload, RegionSlug};

use crate::catalog::SpeciesRecord;
use crate::config::MapConfig;
use crate::control::{
    DetailsPanel, EventPropagation, MapEvent, PanelState, RegionDetails, Selection,
    SelectionState,
};
use crate::data_provider::{MapDataProvider, SubRegionMapping};
use crate::engine::MapEngine;
use crate::error::MapError;
use crate::layer::{ensure_layer_order, LayerId, LayerRenderer};
use crate::store::RegionStore;

struct ControllerState<E> {
    engine: E,
    store: RegionStore,
    selection: SelectionState,
    panel: DetailsPanel,
}

/// Drives the distribution map.
///
/// The controller owns the rendering engine, the region records and the interaction state. All
/// methods take `&self`, so overlapping async operations (a selection started while the previous
/// one still waits for data) can run on the same controller. The latest selection always wins:
/// a selection whose data arrives after another selection started is dropped.
pub struct HighlightController<E: MapEngine, P: MapDataProvider> {
    provider: P,
    renderer: LayerRenderer,
    config: MapConfig,
    state: Mutex<ControllerState<E>>,
    sub_region_mapping: Mutex<Option<Arc<SubRegionMapping>>>,
}

impl<E: MapEngine, P: MapDataProvider> HighlightController<E, P> {
    /// Creates a controller with an empty map.
    pub fn new(engine: E, provider: P, config: MapConfig) -> Self {
        Self {
            provider,
            renderer: LayerRenderer::new(*config.style()),
            config,
            state: Mutex::new(ControllerState {
                engine,
                store: RegionStore::new(),
                selection: SelectionState::default(),
                panel: DetailsPanel::default(),
            }),
            sub_region_mapping: Mutex::new(None),
        }
    }

    /// Configuration of the controller.
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Current selection.
    pub fn selection(&self) -> Selection {
        self.state.lock().selection.selection().clone()
    }

    /// State of the details panel.
    pub fn panel_state(&self) -> PanelState {
        self.state.lock().panel.state()
    }

    /// Content of the details panel.
    pub fn details(&self) -> Option<RegionDetails> {
        self.state.lock().panel.details().cloned()
    }

    /// Region names for the region list, sorted alphabetically.
    pub fn country_list(&self) -> Vec<(RegionSlug, String)> {
        self.state.lock().store.sorted_names()
    }

    /// Runs the closure with the rendering engine.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut E) -> R) -> R {
        f(&mut self.state.lock().engine)
    }

    /// Records the regions of a species distribution. Layers are not touched until
    /// [`update_map`](Self::update_map) is called.
    pub fn ingest(&self, species_slug: &str, payload: &DistributionPayload) -> Vec<RegionSlug> {
        self.state.lock().store.ingest(species_slug, payload)
    }

    /// Loads geometry of every known region and adds or updates its layer.
    ///
    /// Regions are loaded concurrently. A region whose geometry cannot be loaded is logged and
    /// left off the map. The draw order is restored once, after all loads have finished.
    pub async fn update_map(&self) {
        let slugs = self.state.lock().store.slugs().to_vec();

        let results = join_all(slugs.iter().map(|slug| async move {
            (slug, self.provider.region_geometry(slug).await)
        }))
        .await;

        let mut guard = self.state.lock();
        let state = &mut *guard;
        let mut loaded = 0;
        for (slug, result) in results {
            match result {
                Ok(geometry) => {
                    self.renderer
                        .ensure_region_layer(&mut state.engine, slug, geometry.clone());
                    state.store.set_geometry(slug.as_str(), geometry);
                    loaded += 1;
                }
                Err(err) => log::error!("Failed to load geometry of region {slug}: {err}"),
            }
        }

        if let Some(selected) = state.selection.selection().slug() {
            self.renderer.highlight_region(&mut state.engine, selected);
        }

        ensure_layer_order(&mut state.engine);
        log::info!("Loaded geometry of {loaded} of {} regions", slugs.len());
    }

    /// Selects a region: highlights it, shows its sub-regions, moves the camera to it and opens
    /// the details panel.
    ///
    /// Selecting the region that is already shown in the open panel does nothing. Unknown regions
    /// are ignored.
    pub async fn select(&self, slug: &RegionSlug) {
        let (ticket, details) = {
            let mut guard = self.state.lock();
            let state = &mut *guard;

            let Some(region) = state.store.get(slug.as_str()) else {
                log::warn!("Cannot select unknown region {slug}");
                return;
            };

            if state.selection.selection().is_selected(slug.as_str()) && state.panel.is_visible() {
                log::debug!("Region {slug} is already selected");
                return;
            }

            let details = RegionDetails::from_region(region);
            let bounds = region.geometry.as_ref().and_then(Bounds::from_first_feature);

            for other in state.store.slugs().iter().filter(|other| *other != slug) {
                self.renderer.restore_region(&mut state.engine, other);
            }
            if let Some(previous) = state.selection.selection().slug() {
                self.renderer
                    .remove_sub_region_layers(&mut state.engine, previous);
            }

            let ticket = state.selection.begin(slug.clone());
            self.renderer.highlight_region(&mut state.engine, slug);
            if let Some(bounds) = bounds {
                state.engine.fit_bounds(
                    bounds,
                    self.config.fit_padding(),
                    self.config.max_fit_zoom(),
                );
            }

            (ticket, details)
        };

        let mapping = match self.load_sub_region_mapping().await {
            Ok(mapping) => Some(mapping),
            Err(err) => {
                log::error!("Failed to load sub-regions of {slug}: {err}");
                None
            }
        };

        let mut guard = self.state.lock();
        let state = &mut *guard;
        if !state.selection.is_current(ticket) {
            log::debug!("Selection of {slug} was superseded");
            return;
        }

        if let Some(mapping) = mapping {
            for name in &details.sub_regions {
                match mapping.find(slug, name) {
                    Some(source) => self.renderer.ensure_sub_region_layer(
                        &mut state.engine,
                        slug,
                        name,
                        &source.geojson_url,
                    ),
                    None => log::debug!("No geometry for sub-region {name} of {slug}"),
                }
            }
        }

        ensure_layer_order(&mut state.engine);
        let transition = state.panel.open(details);
        log::info!("Selected region {slug} ({transition:?})");
    }

    /// Clears the selection and returns the map to the default view.
    pub fn reset(&self) {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        for slug in state.store.slugs() {
            self.renderer.restore_region(&mut state.engine, slug);
        }
        if let Some(selected) = state.selection.selection().slug() {
            self.renderer
                .remove_sub_region_layers(&mut state.engine, selected);
        }

        state.selection.clear();
        let transition = state.panel.close();
        state.engine.fly_to(self.config.default_view());
        ensure_layer_order(&mut state.engine);

        log::info!("Selection cleared ({transition:?})");
    }

    /// Handles an interaction event.
    pub async fn handle_event(&self, event: MapEvent) -> EventPropagation {
        match event {
            MapEvent::PointerMoved {
                layer,
                feature_name,
                lon,
                lat,
            } => self.pointer_moved(&layer, feature_name.as_deref(), lon, lat),
            MapEvent::PointerLeft { layer } => self.pointer_left(&layer),
            MapEvent::Clicked {
                layer: LayerId::Country(slug),
                ..
            } => {
                self.select(&slug).await;
                EventPropagation::Stop
            }
            MapEvent::Clicked {
                layer: LayerId::State { country, state },
                ..
            } => {
                log::debug!("Clicked sub-region {state} of {country}");
                EventPropagation::Stop
            }
            MapEvent::Clicked { .. } => EventPropagation::Propagate,
            MapEvent::RegionListClicked(slug) => {
                self.select(&slug).await;
                EventPropagation::Stop
            }
            MapEvent::CloseClicked => {
                self.reset();
                EventPropagation::Stop
            }
            MapEvent::PanelTransitionEnd => {
                self.state.lock().panel.transition_end();
                EventPropagation::Stop
            }
        }
    }

    fn pointer_moved(
        &self,
        layer: &LayerId,
        feature_name: Option<&str>,
        lon: f64,
        lat: f64,
    ) -> EventPropagation {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        match layer {
            LayerId::Country(slug) => {
                let label = feature_name
                    .map(str::to_string)
                    .or_else(|| state.store.get(slug.as_str()).map(|r| r.name.clone()))
                    .unwrap_or_else(|| slug.to_string());
                let is_selected = state.selection.selection().is_selected(slug.as_str());
                self.renderer
                    .hover_region(&mut state.engine, slug, &label, lon, lat, is_selected);
                EventPropagation::Stop
            }
            LayerId::State { country, state: sub_region } => {
                let region_name = state
                    .store
                    .get(country.as_str())
                    .map(|r| r.name.clone())
                    .unwrap_or_else(|| country.to_string());
                let sub_region_name = feature_name
                    .map(str::to_string)
                    .unwrap_or_else(|| sub_region.to_string());
                self.renderer.hover_sub_region(
                    &mut state.engine,
                    layer,
                    &sub_region_name,
                    &region_name,
                    lon,
                    lat,
                );
                EventPropagation::Stop
            }
            _ => EventPropagation::Propagate,
        }
    }

    fn pointer_left(&self, layer: &LayerId) -> EventPropagation {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        match layer {
            LayerId::Country(slug) => {
                let is_selected = state.selection.selection().is_selected(slug.as_str());
                self.renderer
                    .leave_region(&mut state.engine, slug, is_selected);
                EventPropagation::Stop
            }
            LayerId::State { .. } => {
                self.renderer.leave_sub_region(&mut state.engine, layer);
                EventPropagation::Stop
            }
            _ => EventPropagation::Propagate,
        }
    }

    /// Loads the species range and shows it on the map. Failures are logged.
    pub async fn load_range_data(&self, url: &str) {
        match self.provider.range_data(url).await {
            Ok(collection) => {
                let mut state = self.state.lock();
                self.renderer.set_range_data(&mut state.engine, collection);
                log::info!("Loaded species range from {url}");
            }
            Err(err) => log::error!("Failed to load species range from {url}: {err}"),
        }
    }

    /// Loads observed occurrences of a species and shows them on the map. Failures are logged.
    pub async fn load_occurrences(&self, scientific_name: &str) {
        match self.provider.occurrences(scientific_name).await {
            Ok(collection) => {
                let count = collection.features.len();
                let mut state = self.state.lock();
                self.renderer.set_occurrences(&mut state.engine, collection);
                log::info!("Loaded {count} occurrences of {scientific_name}");
            }
            Err(err) => log::error!("Failed to load occurrences of {scientific_name}: {err}"),
        }
    }

    /// Shows everything known about a species: its distribution regions, its range and its
    /// observed occurrences.
    pub async fn load_species(&self, record: &SpeciesRecord) {
        match &record.distribution {
            Some(distribution) => {
                self.ingest(&record.slug, distribution);
            }
            None => log::warn!("Species {} has no distribution", record.slug),
        }

        self.update_map().await;

        let range = async {
            if let Some(url) = &record.range_data_url {
                self.load_range_data(url).await;
            }
        };
        let occurrences = async {
            if let Some(name) = &record.scientific_name {
                self.load_occurrences(name).await;
            }
        };
        futures::join!(range, occurrences);
    }

    async fn load_sub_region_mapping(&self) -> Result<Arc<SubRegionMapping>, MapError> {
        let cached = self.sub_region_mapping.lock().clone();
        if let Some(mapping) = cached {
            return Ok(mapping);
        }

        let mapping = Arc::new(self.provider.sub_region_mapping().await?);
        log::debug!("Loaded sub-regions of {} regions", mapping.len());
        *self.sub_region_mapping.lock() = Some(mapping.clone());
        Ok(mapping)
    }
}
