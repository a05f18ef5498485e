//! Layer Store: region records known to the map.

use std::collections::HashMap;

use geojson::FeatureCollection;
use turterra_types::{normalize, DistributionPayload, Region, RegionSlug, SpeciesDetail};

/// Regions keyed by slug. Records are created on first encounter in a distribution payload and
/// are never evicted.
#[derive(Debug, Default, Clone)]
pub struct RegionStore {
    regions: HashMap<RegionSlug, Region>,
    /// Slugs in insertion order, so that layers are added in a stable order.
    order: Vec<RegionSlug>,
}

impl RegionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the region with the given slug.
    pub fn get(&self, slug: &str) -> Option<&Region> {
        self.regions.get(slug)
    }

    /// Returns true if the region is known.
    pub fn contains(&self, slug: &str) -> bool {
        self.regions.contains_key(slug)
    }

    /// Records that a species occurs in a region, creating the region if needed.
    ///
    /// The species is appended to the region's species list unless already listed, and its
    /// detail record replaces any previous record for the same species.
    pub fn upsert(
        &mut self,
        slug: RegionSlug,
        name: &str,
        species_slug: &str,
        detail: SpeciesDetail,
    ) -> &mut Region {
        if !self.regions.contains_key(&slug) {
            self.order.push(slug.clone());
        }

        let region = self
            .regions
            .entry(slug.clone())
            .or_insert_with(|| Region::new(slug, name));
        region.record_species(species_slug, detail);
        region
    }

    /// Records every country of a distribution payload for the species. Returns slugs of the
    /// touched regions in payload order. Entries whose name has no usable characters are skipped.
    pub fn ingest(&mut self, species_slug: &str, payload: &DistributionPayload) -> Vec<RegionSlug> {
        let mut touched = Vec::with_capacity(payload.countries.len());
        for entry in &payload.countries {
            let slug = normalize(&entry.name);
            if slug.is_empty() {
                log::warn!("Skipping distribution entry with unusable name {:?}", entry.name);
                continue;
            }

            let region = self.upsert(
                slug.clone(),
                &entry.name,
                species_slug,
                SpeciesDetail::from(entry),
            );
            region.fill_description(entry);
            touched.push(slug);
        }

        log::debug!(
            "Ingested {} regions for species {species_slug}",
            touched.len()
        );
        touched
    }

    /// Stores the geometry of a region. Returns false if the region is not known.
    pub fn set_geometry(&mut self, slug: &str, geometry: FeatureCollection) -> bool {
        match self.regions.get_mut(slug) {
            Some(region) => {
                region.geometry = Some(geometry);
                true
            }
            None => false,
        }
    }

    /// Slugs of all regions in order of first appearance.
    pub fn slugs(&self) -> &[RegionSlug] {
        &self.order
    }

    /// Iterates over regions in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = &Region> + '_ {
        self.order.iter().filter_map(|slug| self.regions.get(slug))
    }

    /// Display names of all regions, sorted alphabetically. This is the list the user picks
    /// regions from.
    pub fn sorted_names(&self) -> Vec<(RegionSlug, String)> {
        let mut names: Vec<_> = self
            .iter()
            .map(|region| (region.slug.clone(), region.name.clone()))
            .collect();
        names.sort_by(|a, b| a.1.cmp(&b.1));
        names
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if the store has no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use turterra_types::{CountryEntry, StateEntry};

    use super::*;

    fn payload(json: &str) -> DistributionPayload {
        DistributionPayload::from_json(json).expect("valid payload")
    }

    #[test]
    fn upsert_is_idempotent_per_species() {
        let mut store = RegionStore::new();
        let slug = normalize("Mexico");
        let detail = SpeciesDetail {
            presence: Some("Extant".into()),
            ..Default::default()
        };

        store.upsert(slug.clone(), "Mexico", "green-sea-turtle", detail.clone());
        store.upsert(slug.clone(), "Mexico", "green-sea-turtle", detail.clone());
        store.upsert(slug.clone(), "Mexico", "loggerhead", SpeciesDetail::default());

        let region = store.get("mexico").expect("region");
        assert_eq!(region.species, vec!["green-sea-turtle", "loggerhead"]);
        assert_eq!(region.details.get("green-sea-turtle"), Some(&detail));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn upsert_replaces_detail() {
        let mut store = RegionStore::new();
        let slug = normalize("Belize");
        let first = SpeciesDetail {
            states: vec![StateEntry::new("Cayo")],
            ..Default::default()
        };
        let second = SpeciesDetail {
            states: vec![StateEntry::new("Toledo")],
            ..Default::default()
        };

        store.upsert(slug.clone(), "Belize", "slider", first);
        store.upsert(slug, "Belize", "slider", second.clone());

        assert_eq!(
            store.get("belize").and_then(|r| r.details.get("slider")),
            Some(&second)
        );
    }

    #[test]
    fn ingest_keeps_first_description() {
        let mut store = RegionStore::new();
        store.ingest(
            "green-sea-turtle",
            &payload(
                r#"{"countries": [
                    {"name": "United States", "presence": "Extant", "description": "First"},
                    {"name": "Côte d'Ivoire"}
                ]}"#,
            ),
        );
        let touched = store.ingest(
            "loggerhead",
            &payload(r#"{"countries": [{"name": "United States", "description": "Second"}]}"#),
        );

        assert_eq!(touched, vec![normalize("United States")]);
        let region = store.get("united_states").expect("region");
        assert_eq!(region.description.as_deref(), Some("First"));
        assert_eq!(region.species.len(), 2);
        assert!(store.contains("cote_divoire"));
    }

    #[test]
    fn unusable_names_are_skipped() {
        let mut store = RegionStore::new();
        let payload = DistributionPayload {
            countries: vec![CountryEntry {
                name: "???".into(),
                ..Default::default()
            }],
        };

        assert!(store.ingest("slider", &payload).is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn sorted_names_and_geometry() {
        let mut store = RegionStore::new();
        store.ingest(
            "slider",
            &payload(r#"{"countries": [{"name": "Peru"}, {"name": "Brazil"}, {"name": "Chile"}]}"#),
        );

        let names: Vec<String> = store.sorted_names().into_iter().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["Brazil", "Chile", "Peru"]);
        assert_eq!(
            store.slugs(),
            &[normalize("Peru"), normalize("Brazil"), normalize("Chile")]
        );

        let empty = FeatureCollection {
            bbox: None,
            features: vec![],
            foreign_members: None,
        };
        assert!(store.set_geometry("peru", empty.clone()));
        assert!(!store.set_geometry("bolivia", empty));
        assert!(store.get("peru").and_then(|r| r.geometry.as_ref()).is_some());
    }
}
