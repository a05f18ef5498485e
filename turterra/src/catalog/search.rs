//! Species search-as-you-type.

use crate::catalog::CollectionItem;

/// Image shown for species without a profile image.
pub const PLACEHOLDER_IMAGE: &str =
    "https://cdn.prod.website-files.com/plugins/Basic/assets/placeholder.60f9b1840c.svg";

/// Minimal number of characters of a query.
pub const MIN_QUERY_LENGTH: usize = 3;

/// Search entry of a species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesSummary {
    /// CMS item id.
    pub id: String,
    /// Common name.
    pub name: String,
    /// Species slug.
    pub slug: String,
    /// Scientific species name.
    pub species: String,
    /// Subspecies epithet, empty if none.
    pub subspecies: String,
    /// Other common names as free text.
    pub other_names: String,
    /// Profile image url.
    pub profile_image: String,
}

impl SpeciesSummary {
    /// Builds the entry from a species item. Missing fields are empty.
    pub fn from_item(item: &CollectionItem) -> Self {
        let text = |key: &str| item.str_field(key).unwrap_or_default().to_string();
        Self {
            id: item.id.clone(),
            name: text("name"),
            slug: text("slug"),
            species: text("species"),
            subspecies: text("subspecies"),
            other_names: text("other-common-names"),
            profile_image: item
                .nested_str_field("profile-image", "url")
                .unwrap_or(PLACEHOLDER_IMAGE)
                .to_string(),
        }
    }

    /// Path of the species profile page.
    pub fn profile_url(&self) -> String {
        format!("/turtle-profiles/{}", self.slug)
    }

    /// Species and subspecies, separated by a space.
    pub fn display_scientific_name(&self) -> String {
        if self.subspecies.is_empty() {
            self.species.clone()
        } else {
            format!("{} {}", self.species, self.subspecies)
        }
    }

    fn matches(&self, term: &str) -> bool {
        [&self.name, &self.species, &self.subspecies, &self.other_names]
            .into_iter()
            .any(|field| field.to_lowercase().contains(term))
    }
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    /// Nothing was typed; results are hidden.
    Empty,
    /// The query is shorter than [`MIN_QUERY_LENGTH`].
    TooShort,
    /// No species matches.
    NoMatches,
    /// Matching species in index order.
    Matches(Vec<&'a SpeciesSummary>),
}

impl SearchOutcome<'_> {
    /// Message displayed instead of results, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::TooShort => Some("Please use at least three characters."),
            Self::NoMatches => Some("No results match your search. Please try again."),
            Self::Empty | Self::Matches(_) => None,
        }
    }
}

/// Searchable list of all species.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SpeciesIndex {
    species: Vec<SpeciesSummary>,
}

impl SpeciesIndex {
    /// Builds the index from the items of the species collection.
    pub fn from_items(items: &[CollectionItem]) -> Self {
        Self {
            species: items.iter().map(SpeciesSummary::from_item).collect(),
        }
    }

    /// Indexed species.
    pub fn species(&self) -> &[SpeciesSummary] {
        &self.species
    }

    /// Finds species whose names contain the query, ignoring case and surrounding whitespace.
    pub fn search(&self, query: &str) -> SearchOutcome<'_> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return SearchOutcome::Empty;
        }
        if term.chars().count() < MIN_QUERY_LENGTH {
            return SearchOutcome::TooShort;
        }

        let matches: Vec<_> = self.species.iter().filter(|s| s.matches(&term)).collect();
        if matches.is_empty() {
            SearchOutcome::NoMatches
        } else {
            SearchOutcome::Matches(matches)
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn index() -> SpeciesIndex {
        let items: Vec<CollectionItem> = serde_json::from_value(json!([
            {"id": "1", "fieldData": {
                "name": "Green Sea Turtle", "slug": "green-sea-turtle", "species": "Chelonia mydas",
                "profile-image": {"url": "https://img/green.jpg"}
            }},
            {"id": "2", "fieldData": {
                "name": "Red-eared Slider", "slug": "red-eared-slider", "species": "Trachemys scripta",
                "subspecies": "elegans", "other-common-names": "Red-eared terrapin"
            }},
            {"id": "3", "fieldData": {"name": "Loggerhead", "slug": "loggerhead"}}
        ]))
        .expect("valid items");

        SpeciesIndex::from_items(&items)
    }

    #[test]
    fn short_and_empty_queries() {
        let index = index();
        assert_eq!(index.search("   "), SearchOutcome::Empty);
        assert_eq!(index.search(" gr "), SearchOutcome::TooShort);
        assert_eq!(
            index.search("gr").message(),
            Some("Please use at least three characters.")
        );
    }

    #[test]
    fn matches_any_name() {
        let index = index();
        assert_matches!(
            index.search("TERRAPIN"),
            SearchOutcome::Matches(m) if m.len() == 1 && m[0].slug == "red-eared-slider"
        );
        assert_matches!(index.search("elegans"), SearchOutcome::Matches(m) if m.len() == 1);
        assert_matches!(index.search("mydas"), SearchOutcome::Matches(m) if m[0].id == "1");
        assert_matches!(index.search("turtle"), SearchOutcome::Matches(m) if m.len() == 1);
        assert_matches!(index.search("re"), SearchOutcome::TooShort);
    }

    #[test]
    fn no_matches() {
        let index = index();
        let outcome = index.search("tortoise");
        assert_eq!(outcome, SearchOutcome::NoMatches);
        assert_eq!(
            outcome.message(),
            Some("No results match your search. Please try again.")
        );
    }

    #[test]
    fn summary_display() {
        let index = index();
        let slider = &index.species()[1];
        assert_eq!(slider.display_scientific_name(), "Trachemys scripta elegans");
        assert_eq!(slider.profile_url(), "/turtle-profiles/red-eared-slider");
        assert_eq!(slider.profile_image, PLACEHOLDER_IMAGE);
        assert_eq!(index.species()[0].profile_image, "https://img/green.jpg");
        assert_eq!(index.species()[0].display_scientific_name(), "Chelonia mydas");
    }
}
