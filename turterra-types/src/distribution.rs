//! Species distribution payload as stored in the CMS.
//!
//! The payload is a JSON document kept as a string inside a CMS item field. Only `name` is
//! required for a country or a state; everything else is optional and unknown fields are ignored,
//! so a partially filled payload still produces map regions.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TypesError;

/// Distribution of a single species over countries.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionPayload {
    /// Countries the species occurs in.
    #[serde(default)]
    pub countries: Vec<CountryEntry>,
}

impl DistributionPayload {
    /// Parses a payload from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, TypesError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A country entry of a distribution payload.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryEntry {
    /// Display name of the country.
    pub name: String,
    /// Presence status, e.g. `Extant`.
    #[serde(default)]
    pub presence: Option<String>,
    /// Origin status, e.g. `Native`.
    #[serde(default)]
    pub origin: Option<String>,
    /// Seasonality, e.g. `Resident`.
    #[serde(default)]
    pub seasonality: Option<String>,
    /// States or provinces the species occurs in.
    #[serde(default)]
    pub states: Vec<StateEntry>,
    /// Illustration of the distribution in this country.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Free text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Population estimate as text.
    #[serde(default, deserialize_with = "text_or_number")]
    pub population: Option<String>,
}

/// A state (province) entry of a country.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry {
    /// Display name of the state.
    pub name: String,
    /// Population estimate as text.
    #[serde(default, deserialize_with = "text_or_number")]
    pub population: Option<String>,
}

impl StateEntry {
    /// Creates a state entry without population.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            population: None,
        }
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_minimal_payload() {
        let payload = DistributionPayload::from_json(
            r#"{"countries": [{"name": "Mexico", "presence": "Extant", "origin": "Native", "states": [{"name": "Sonora"}]}]}"#,
        )
        .expect("valid payload");

        assert_eq!(payload.countries.len(), 1);
        let mexico = &payload.countries[0];
        assert_eq!(mexico.name, "Mexico");
        assert_eq!(mexico.presence.as_deref(), Some("Extant"));
        assert_eq!(mexico.seasonality, None);
        assert_eq!(mexico.states, vec![StateEntry::new("Sonora")]);
    }

    #[test]
    fn population_accepts_numbers_and_text() {
        let payload = DistributionPayload::from_json(
            r#"{"countries": [
                {"name": "A", "population": 1200, "imageUrl": "https://x/y.png"},
                {"name": "B", "population": "unknown"},
                {"name": "C", "population": null, "unexpected": true}
            ]}"#,
        )
        .expect("valid payload");

        assert_eq!(payload.countries[0].population.as_deref(), Some("1200"));
        assert_eq!(
            payload.countries[0].image_url.as_deref(),
            Some("https://x/y.png")
        );
        assert_eq!(payload.countries[1].population.as_deref(), Some("unknown"));
        assert_eq!(payload.countries[2].population, None);
    }

    #[test]
    fn missing_countries_is_empty_payload() {
        let payload = DistributionPayload::from_json("{}").expect("valid payload");
        assert!(payload.countries.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert_matches!(
            DistributionPayload::from_json("{countries: "),
            Err(TypesError::Json(_))
        );
        assert_matches!(
            DistributionPayload::from_json(r#"{"countries": [{"presence": "Extant"}]}"#),
            Err(TypesError::Json(_))
        );
    }
}
