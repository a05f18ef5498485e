//! Physical feature sheet of a species.
//!
//! The feature database holds a list of feature keys (the rows of the sheet, grouped by
//! category, optionally nested under a parent feature) and, per species, a record of values
//! keyed by the snake case name of each feature.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use turterra_types::FeatureCategory;

use crate::config::MapConfig;
use crate::data_provider::{join_segments, HttpLoader};
use crate::error::MapError;

/// Displayed for missing values.
pub const MISSING_VALUE: &str = "N/A";

/// Id of a feature key. The database returns numeric ids, older exports use strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureKeyId {
    /// Numeric id.
    Number(i64),
    /// Textual id.
    Text(String),
}

/// A row definition of the feature sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureKey {
    /// Key id.
    pub id: FeatureKeyId,
    /// Category label, e.g. `Shell Top`.
    pub category: String,
    /// Feature name, e.g. `Carapace Shape`.
    pub physical_feature: String,
    /// Id of the parent feature of a sub-feature.
    #[serde(default)]
    pub parent_feature: Option<FeatureKeyId>,
}

/// Feature values of a species.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalFeatures {
    /// Values of the variant displayed by default.
    #[serde(default)]
    pub default_variant: Map<String, Value>,
    /// Values of every variant of the species.
    #[serde(default)]
    pub all_variants: Vec<Map<String, Value>>,
}

/// Feature sheet grouped by category, in order of first appearance of each category.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FeatureSheet {
    /// Category groups.
    pub groups: Vec<FeatureGroup>,
}

impl FeatureSheet {
    /// Group of the given category.
    pub fn group(&self, category: FeatureCategory) -> Option<&FeatureGroup> {
        self.groups
            .iter()
            .find(|group| group.category == Some(category))
    }
}

/// Features of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureGroup {
    /// Category label as stored in the database.
    pub name: String,
    /// Canonical category, if the label names one.
    pub category: Option<FeatureCategory>,
    /// Top level features.
    pub features: Vec<FeatureRow>,
}

/// A feature with its formatted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRow {
    /// Feature name.
    pub name: String,
    /// Formatted value.
    pub value: String,
    /// Nested features. Always empty for sub-features.
    pub sub_features: Vec<FeatureRow>,
}

/// Builds the feature sheet of a species from the feature keys and the species values.
///
/// Keys with a parent are listed only under their parent.
pub fn build_feature_sheet(keys: &[FeatureKey], values: &Map<String, Value>) -> FeatureSheet {
    let value_of =
        |key: &FeatureKey| format_feature_value(values.get(&snake_key(&key.physical_feature)));

    let mut groups: Vec<FeatureGroup> = vec![];
    for key in keys.iter().filter(|key| key.parent_feature.is_none()) {
        let sub_features = keys
            .iter()
            .filter(|sub| sub.parent_feature.as_ref() == Some(&key.id))
            .map(|sub| FeatureRow {
                name: sub.physical_feature.clone(),
                value: value_of(sub),
                sub_features: vec![],
            })
            .collect();

        let row = FeatureRow {
            name: key.physical_feature.clone(),
            value: value_of(key),
            sub_features,
        };

        match groups.iter_mut().find(|group| group.name == key.category) {
            Some(group) => group.features.push(row),
            None => groups.push(FeatureGroup {
                name: key.category.clone(),
                category: FeatureCategory::from_label(&key.category),
                features: vec![row],
            }),
        }
    }

    FeatureSheet { groups }
}

/// Column name of a feature in the values record: lowercase, `/` and whitespace replaced by `_`.
pub fn snake_key(feature: &str) -> String {
    feature
        .to_lowercase()
        .chars()
        .map(|c| if c == '/' || c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Formats a feature value for display.
///
/// Missing, null, empty, `false` and zero values are shown as [`MISSING_VALUE`]. Arrays are
/// joined with `, `. Every word is capitalized.
pub fn format_feature_value(value: Option<&Value>) -> String {
    let Some(value) = value.filter(|value| is_present(value)) else {
        return MISSING_VALUE.to_string();
    };

    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| capitalize_words(&value_text(item)))
            .collect::<Vec<_>>()
            .join(", "),
        other => capitalize_words(&value_text(other)),
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn capitalize_words(text: &str) -> String {
    if text == MISSING_VALUE {
        return text.to_string();
    }

    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Client of the feature database routes of the proxy.
#[derive(Debug, Clone)]
pub struct FeatureClient {
    loader: HttpLoader,
    base_url: String,
}

impl FeatureClient {
    /// Creates a client for the proxy of the configuration.
    pub fn new(loader: HttpLoader, config: &MapConfig) -> Self {
        Self {
            loader,
            base_url: config.proxy_url().to_string(),
        }
    }

    /// Loads all feature keys.
    pub async fn feature_keys(&self) -> Result<Vec<FeatureKey>, MapError> {
        let url = join_segments(&self.base_url, ["supabase", "feature-keys"])?;
        self.loader.load_json(url.as_str()).await
    }

    /// Loads the feature values of a species.
    pub async fn physical_features(&self, species_id: &str) -> Result<PhysicalFeatures, MapError> {
        let url = join_segments(&self.base_url, ["supabase", "data", species_id])?;
        self.loader.load_json(url.as_str()).await
    }

    /// Loads keys and values and builds the sheet of the default variant.
    pub async fn load_sheet(&self, species_id: &str) -> Result<FeatureSheet, MapError> {
        let (keys, features) =
            futures::try_join!(self.feature_keys(), self.physical_features(species_id))?;
        Ok(build_feature_sheet(&keys, &features.default_variant))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn keys() -> Vec<FeatureKey> {
        serde_json::from_value(json!([
            {"id": 1, "category": "Shell Top", "physical_feature": "Carapace Shape"},
            {"id": 2, "category": "Skin/Limbs", "physical_feature": "Skin Color"},
            {"id": 3, "category": "Shell Top", "physical_feature": "Scute Colors", "parent_feature": 1},
            {"id": 4, "category": "Shell Top", "physical_feature": "Keel/Ridges"},
            {"id": "5", "category": "Tail", "physical_feature": "Tail Length", "parent_feature": null}
        ]))
        .expect("valid keys")
    }

    #[test]
    fn groups_keys_by_category() {
        let values = json!({
            "carapace_shape": "oval, FLAT",
            "scute_colors": ["dark brown", "olive"],
            "keel_ridges": true,
            "skin_color": ""
        });
        let Value::Object(values) = values else {
            unreachable!()
        };

        let sheet = build_feature_sheet(&keys(), &values);
        let names: Vec<_> = sheet.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Shell Top", "Skin/Limbs", "Tail"]);

        let shell = sheet.group(FeatureCategory::ShellTop).expect("shell group");
        assert_eq!(shell.features.len(), 2);
        assert_eq!(shell.features[0].value, "Oval, Flat");
        assert_eq!(shell.features[0].sub_features[0].name, "Scute Colors");
        assert_eq!(shell.features[0].sub_features[0].value, "Dark Brown, Olive");
        assert_eq!(shell.features[1].value, "True");

        let skin = sheet.group(FeatureCategory::SkinAndLimbs).expect("skin group");
        assert_eq!(skin.features[0].value, MISSING_VALUE);

        assert_eq!(sheet.groups[2].category, None);
        assert_eq!(sheet.groups[2].features[0].value, MISSING_VALUE);
    }

    #[test]
    fn snake_keys() {
        assert_eq!(snake_key("Keel/Ridges"), "keel_ridges");
        assert_eq!(snake_key("Plastron Hinge Count"), "plastron_hinge_count");
    }

    #[test]
    fn value_formatting() {
        assert_eq!(format_feature_value(None), "N/A");
        assert_eq!(format_feature_value(Some(&Value::Null)), "N/A");
        assert_eq!(format_feature_value(Some(&json!(0))), "N/A");
        assert_eq!(format_feature_value(Some(&json!(false))), "N/A");
        assert_eq!(format_feature_value(Some(&json!(13))), "13");
        assert_eq!(format_feature_value(Some(&json!("N/A"))), "N/A");
        assert_eq!(format_feature_value(Some(&json!("hIGH domed"))), "High Domed");
        assert_eq!(format_feature_value(Some(&json!([]))), "");
    }

    #[test]
    fn physical_features_payload() {
        let features: PhysicalFeatures = serde_json::from_value(json!({
            "defaultVariant": {"carapace_shape": "oval"},
            "allVariants": [{"carapace_shape": "oval"}, {"carapace_shape": "round"}]
        }))
        .expect("valid payload");

        assert_eq!(features.all_variants.len(), 2);
        assert_eq!(features.default_variant["carapace_shape"], json!("oval"));
    }
}
