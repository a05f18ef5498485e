//! Taxonomic classification of a species.
//!
//! The CMS stores one collection per rank. A genus references its family by item id, and a
//! family references its suborder the same way. All species belong to a single order, so the
//! order collection holds one item.

use crate::catalog::CollectionItem;
use crate::error::MapError;

/// A taxon at one rank.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Taxon {
    /// Scientific name.
    pub name: String,
    /// Common name, if the taxon has one.
    pub common_name: Option<String>,
}

impl Taxon {
    fn from_item(item: &CollectionItem) -> Self {
        Self {
            name: item.str_field("name").unwrap_or_default().to_string(),
            common_name: item.str_field("common-name").map(str::to_string),
        }
    }
}

/// Classification of a species from order down to species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    /// Order.
    pub order: Taxon,
    /// Suborder.
    pub suborder: Taxon,
    /// Family.
    pub family: Taxon,
    /// Genus.
    pub genus: Taxon,
    /// The species itself.
    pub species: Taxon,
}

/// Items of the rank collections.
#[derive(Debug, Copy, Clone)]
pub struct TaxonomyCollections<'a> {
    /// Genus items.
    pub genera: &'a [CollectionItem],
    /// Family items.
    pub families: &'a [CollectionItem],
    /// Suborder items.
    pub suborders: &'a [CollectionItem],
    /// Order items.
    pub orders: &'a [CollectionItem],
}

/// Follows the chain genus -> family -> suborder, and takes the only order.
///
/// The genus is the first word of the scientific name, matched against genus slugs.
pub fn resolve_taxonomy(
    scientific_name: &str,
    common_name: Option<&str>,
    collections: TaxonomyCollections<'_>,
) -> Result<Taxonomy, MapError> {
    let genus_slug = scientific_name
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();

    let genus = collections
        .genera
        .iter()
        .find(|item| item.slug() == Some(genus_slug.as_str()))
        .ok_or_else(|| MapError::NotFound(format!("genus {genus_slug}")))?;

    let family = find_referenced(genus, "family", collections.families)?;
    let suborder = find_referenced(family, "suborder", collections.suborders)?;
    let order = collections
        .orders
        .first()
        .ok_or_else(|| MapError::NotFound("order".to_string()))?;

    Ok(Taxonomy {
        order: Taxon::from_item(order),
        suborder: Taxon::from_item(suborder),
        family: Taxon::from_item(family),
        genus: Taxon::from_item(genus),
        species: Taxon {
            name: scientific_name.to_string(),
            common_name: common_name.map(str::to_string),
        },
    })
}

fn find_referenced<'a>(
    item: &CollectionItem,
    field: &str,
    candidates: &'a [CollectionItem],
) -> Result<&'a CollectionItem, MapError> {
    let id = item.str_field(field).unwrap_or_default();
    candidates
        .iter()
        .find(|candidate| candidate.id == id)
        .ok_or_else(|| MapError::NotFound(format!("{field} {id}")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::{json, Value};

    use super::*;

    fn items(value: Value) -> Vec<CollectionItem> {
        serde_json::from_value(value).expect("valid items")
    }

    struct Fixture {
        genera: Vec<CollectionItem>,
        families: Vec<CollectionItem>,
        suborders: Vec<CollectionItem>,
        orders: Vec<CollectionItem>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                genera: items(json!([
                    {"id": "g1", "fieldData": {"slug": "chelonia", "name": "Chelonia", "family": "f1"}},
                    {"id": "g2", "fieldData": {"slug": "trachemys", "name": "Trachemys", "family": "f-missing"}}
                ])),
                families: items(json!([
                    {"id": "f1", "fieldData": {"name": "Cheloniidae", "common-name": "Sea Turtles", "suborder": "s1"}}
                ])),
                suborders: items(json!([
                    {"id": "s1", "fieldData": {"name": "Cryptodira", "common-name": "Hidden-necked Turtles"}}
                ])),
                orders: items(json!([
                    {"id": "o1", "fieldData": {"name": "Testudines", "common-name": "Turtles"}}
                ])),
            }
        }

        fn collections(&self) -> TaxonomyCollections<'_> {
            TaxonomyCollections {
                genera: &self.genera,
                families: &self.families,
                suborders: &self.suborders,
                orders: &self.orders,
            }
        }
    }

    #[test]
    fn resolves_full_chain() {
        let fixture = Fixture::new();
        let taxonomy =
            resolve_taxonomy("Chelonia mydas", Some("Green Sea Turtle"), fixture.collections())
                .expect("resolved");

        assert_eq!(taxonomy.order.name, "Testudines");
        assert_eq!(taxonomy.suborder.common_name.as_deref(), Some("Hidden-necked Turtles"));
        assert_eq!(taxonomy.family.name, "Cheloniidae");
        assert_eq!(taxonomy.genus.name, "Chelonia");
        assert_eq!(taxonomy.genus.common_name, None);
        assert_eq!(taxonomy.species.name, "Chelonia mydas");
        assert_eq!(taxonomy.species.common_name.as_deref(), Some("Green Sea Turtle"));
    }

    #[test]
    fn missing_links_are_not_found() {
        let fixture = Fixture::new();
        assert_matches!(
            resolve_taxonomy("Dermochelys coriacea", None, fixture.collections()),
            Err(MapError::NotFound(msg)) if msg == "genus dermochelys"
        );
        assert_matches!(
            resolve_taxonomy("Trachemys scripta", None, fixture.collections()),
            Err(MapError::NotFound(msg)) if msg == "family f-missing"
        );

        let no_order = TaxonomyCollections {
            orders: &[],
            ..fixture.collections()
        };
        assert_matches!(
            resolve_taxonomy("Chelonia mydas", None, no_order),
            Err(MapError::NotFound(_))
        );
    }
}
