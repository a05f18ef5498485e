//! Cached region records.

use std::collections::HashMap;

use geojson::FeatureCollection;

use crate::distribution::{CountryEntry, StateEntry};
use crate::slug::RegionSlug;

/// A country (or other top level region) known to the map, with per-species detail records.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Normalized identifier.
    pub slug: RegionSlug,
    /// Display name as it first appeared in a distribution payload.
    pub name: String,
    /// Illustration url.
    pub image_url: Option<String>,
    /// Free text description.
    pub description: Option<String>,
    /// Population estimate.
    pub population: Option<String>,
    /// Species occurring in the region, in order of first appearance, without duplicates.
    pub species: Vec<String>,
    /// Detail record for every species in [`Region::species`], keyed by species slug.
    pub details: HashMap<String, SpeciesDetail>,
    /// Region geometry, once loaded.
    pub geometry: Option<FeatureCollection>,
}

impl Region {
    /// Creates an empty region record.
    pub fn new(slug: RegionSlug, name: impl Into<String>) -> Self {
        Self {
            slug,
            name: name.into(),
            image_url: None,
            description: None,
            population: None,
            species: vec![],
            details: HashMap::new(),
            geometry: None,
        }
    }

    /// Records the detail of a species in the region. The species is appended to the species list
    /// if it is not there yet; a previous record for the same species is replaced.
    pub fn record_species(&mut self, species_slug: &str, detail: SpeciesDetail) {
        if !self.species.iter().any(|s| s == species_slug) {
            self.species.push(species_slug.to_string());
        }

        self.details.insert(species_slug.to_string(), detail);
    }

    /// Detail record of the first listed species. This record represents the region when several
    /// species occupy it.
    pub fn representative(&self) -> Option<&SpeciesDetail> {
        self.species
            .first()
            .and_then(|species| self.details.get(species))
    }

    /// Copies descriptive fields from a payload entry, keeping values already known.
    pub fn fill_description(&mut self, entry: &CountryEntry) {
        if self.image_url.is_none() {
            self.image_url = entry.image_url.clone();
        }
        if self.description.is_none() {
            self.description = entry.description.clone();
        }
        if self.population.is_none() {
            self.population = entry.population.clone();
        }
    }
}

/// Occurrence of a species in a region.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SpeciesDetail {
    /// Presence status label.
    pub presence: Option<String>,
    /// Origin status label.
    pub origin: Option<String>,
    /// Seasonality label.
    pub seasonality: Option<String>,
    /// Sub-regions the species occurs in.
    pub states: Vec<StateEntry>,
}

impl From<&CountryEntry> for SpeciesDetail {
    fn from(entry: &CountryEntry) -> Self {
        Self {
            presence: entry.presence.clone(),
            origin: entry.origin.clone(),
            seasonality: entry.seasonality.clone(),
            states: entry.states.clone(),
        }
    }
}

/// Presence status of a species in a region.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Presence {
    /// The species is known to occur.
    Extant,
    /// The species probably occurs.
    PossiblyExtant,
    /// The species has probably disappeared.
    PossiblyExtinct,
    /// The species has disappeared.
    Extinct,
    /// Anything else, including a missing value.
    Uncertain,
}

impl Presence {
    /// Parses a presence label, ignoring case and surrounding whitespace.
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return Self::Uncertain;
        };

        match label.trim().to_lowercase().as_str() {
            "extant" => Self::Extant,
            "possibly extant" => Self::PossiblyExtant,
            "possibly extinct" => Self::PossiblyExtinct,
            "extinct" => Self::Extinct,
            _ => Self::Uncertain,
        }
    }

    /// Design system colour variable of the presence indicator.
    pub fn color_token(&self) -> &'static str {
        match self {
            Self::Extant => "var(--brand-green--green-500)",
            Self::PossiblyExtant => "var(--brand-green--green-200)",
            Self::PossiblyExtinct => "var(--secondary-orange--orange-500)",
            Self::Extinct => "var(--secondary-red--red-600)",
            Self::Uncertain => "var(--neutral-grays--gray-400)",
        }
    }
}
