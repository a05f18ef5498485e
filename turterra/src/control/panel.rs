use turterra_types::{species_display_name, Presence, Region, RegionSlug, StateEntry};

use crate::catalog::optimize_image_url;

const NO_DESCRIPTION: &str = "No description available.";
const UNKNOWN: &str = "Unknown";
const DETAILS_IMAGE_WIDTH: u32 = 600;

/// Animation state of the details panel.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum PanelState {
    /// Panel is hidden; the region list is shown instead.
    #[default]
    Closed,
    /// Panel is sliding in.
    Opening,
    /// Panel is shown.
    Open,
    /// Panel is sliding out.
    Closing,
}

/// What the host application must do with the panel after a state change.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PanelTransition {
    /// Start the slide-in animation.
    SlideIn,
    /// Update the panel content without animation.
    Refresh,
    /// Start the slide-out animation.
    SlideOut,
    /// Nothing to do.
    None,
}

/// Details panel of the selected region.
///
/// Opening and closing are animated: the panel stays in [`PanelState::Opening`] or
/// [`PanelState::Closing`] until the host reports the end of the animation with
/// [`DetailsPanel::transition_end`].
#[derive(Debug, Default, Clone)]
pub struct DetailsPanel {
    state: PanelState,
    details: Option<RegionDetails>,
}

impl DetailsPanel {
    /// Current state.
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Content of the panel.
    pub fn details(&self) -> Option<&RegionDetails> {
        self.details.as_ref()
    }

    /// Returns true if the panel is fully shown.
    pub fn is_visible(&self) -> bool {
        self.state == PanelState::Open
    }

    /// Shows the panel with the given content.
    pub fn open(&mut self, details: RegionDetails) -> PanelTransition {
        self.details = Some(details);
        match self.state {
            PanelState::Closed | PanelState::Closing => {
                self.state = PanelState::Opening;
                PanelTransition::SlideIn
            }
            PanelState::Opening | PanelState::Open => PanelTransition::Refresh,
        }
    }

    /// Hides the panel.
    pub fn close(&mut self) -> PanelTransition {
        match self.state {
            PanelState::Open | PanelState::Opening => {
                self.state = PanelState::Closing;
                PanelTransition::SlideOut
            }
            PanelState::Closing | PanelState::Closed => PanelTransition::None,
        }
    }

    /// Reports the end of a slide animation. Returns false if no animation was running.
    pub fn transition_end(&mut self) -> bool {
        match self.state {
            PanelState::Opening => {
                self.state = PanelState::Open;
                true
            }
            PanelState::Closing => {
                self.state = PanelState::Closed;
                self.details = None;
                true
            }
            PanelState::Open | PanelState::Closed => {
                log::trace!("Ignoring transition end in panel state {:?}", self.state);
                false
            }
        }
    }
}

/// Content of the details panel.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionDetails {
    /// Region slug.
    pub slug: RegionSlug,
    /// Region name.
    pub name: String,
    /// Description text.
    pub description: String,
    /// Distribution illustration, resized for the panel. The image is hidden when `None`.
    pub image_url: Option<String>,
    /// Alternative text of the illustration.
    pub image_alt: String,
    /// Presence of the representative species.
    pub presence: String,
    /// Origin of the representative species.
    pub origin: String,
    /// Seasonality of the representative species.
    pub seasonality: String,
    /// Colour variable of the presence indicator.
    pub presence_color: &'static str,
    /// Sub-regions the representative species occurs in.
    pub sub_regions: Vec<String>,
    /// One section per species occurring in the region.
    pub species: Vec<SpeciesSection>,
}

/// Per-species section of the details panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesSection {
    /// Species slug.
    pub species_slug: String,
    /// Title-cased species name.
    pub display_name: String,
    /// Presence label.
    pub presence: String,
    /// Origin label.
    pub origin: String,
    /// Seasonality label.
    pub seasonality: String,
    /// Population estimate of the region.
    pub population: String,
    /// Sub-regions with their population estimates.
    pub states: Vec<StateEntry>,
}

impl RegionDetails {
    /// Builds panel content of a region. The first listed species represents the region.
    pub fn from_region(region: &Region) -> Self {
        let representative = region.representative();
        let label = |value: Option<&String>| value.cloned().unwrap_or_else(|| UNKNOWN.to_string());

        let species = region
            .species
            .iter()
            .filter_map(|slug| region.details.get(slug).map(|detail| (slug, detail)))
            .map(|(slug, detail)| SpeciesSection {
                species_slug: slug.clone(),
                display_name: species_display_name(slug),
                presence: label(detail.presence.as_ref()),
                origin: label(detail.origin.as_ref()),
                seasonality: label(detail.seasonality.as_ref()),
                population: label(region.population.as_ref()),
                states: detail.states.clone(),
            })
            .collect();

        Self {
            slug: region.slug.clone(),
            name: region.name.clone(),
            description: region
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            image_url: region
                .image_url
                .as_deref()
                .filter(|url| !url.is_empty())
                .map(|url| optimize_image_url(url, DETAILS_IMAGE_WIDTH)),
            image_alt: format!("{} distribution map", region.name),
            presence: label(representative.and_then(|d| d.presence.as_ref())),
            origin: label(representative.and_then(|d| d.origin.as_ref())),
            seasonality: label(representative.and_then(|d| d.seasonality.as_ref())),
            presence_color: Presence::from_label(
                representative.and_then(|d| d.presence.as_deref()),
            )
            .color_token(),
            sub_regions: representative
                .map(|d| d.states.iter().map(|s| s.name.clone()).collect())
                .unwrap_or_default(),
            species,
        }
    }
}
