//! Region identifiers.
//!
//! Every region (country or state) is addressed by a slug derived from its display name. The
//! same slug names the region's geometry file, its map layers and its entry in the sub-region
//! mapping, so it must be derived in exactly one place: [`normalize`].

use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Normalized identifier of a region.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionSlug(String);

impl RegionSlug {
    /// Wraps an already normalized string without re-normalizing it.
    ///
    /// Use [`normalize`] for display names.
    pub fn from_normalized(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// String form of the slug.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the slug has no characters, which happens for names made of punctuation
    /// only.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for RegionSlug {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RegionSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RegionSlug {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RegionSlug {
    fn from(value: &str) -> Self {
        normalize(value)
    }
}

/// Converts a display name into a region slug.
///
/// * letters are lowercased, Latin diacritics are folded to ASCII (`ô` -> `o`, `ß` -> `ss`);
/// * whitespace, `_` and separator punctuation become a single `_`;
/// * apostrophes are dropped, hyphens are kept;
/// * leading and trailing separators are trimmed.
///
/// ```
/// use turterra_types::normalize;
///
/// assert_eq!(normalize("United States").as_str(), "united_states");
/// assert_eq!(normalize("Côte d'Ivoire").as_str(), "cote_divoire");
/// assert_eq!(normalize("Guinea-Bissau").as_str(), "guinea-bissau");
/// ```
pub fn normalize(name: &str) -> RegionSlug {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if is_apostrophe(c) {
            continue;
        }

        if c == '-' {
            pending_separator = false;
            if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
            continue;
        }

        let folded = if c.is_ascii_alphanumeric() {
            None
        } else if let Some(folded) = fold_latin(c) {
            Some(folded)
        } else if c.is_alphanumeric() {
            None
        } else {
            pending_separator = true;
            continue;
        };

        if pending_separator && !slug.is_empty() && !slug.ends_with('-') {
            slug.push('_');
        }
        pending_separator = false;

        match folded {
            Some(s) => slug.push_str(s),
            None => slug.push(c),
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    RegionSlug(slug)
}

/// Converts a species slug into a title-cased display name: `green-sea-turtle` becomes
/// `Green Sea Turtle`.
pub fn species_display_name(species_slug: &str) -> String {
    species_slug
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}' | '\u{2018}' | '`' | '\u{02BC}')
}

fn fold_latin(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'ĥ' | 'ħ' => "h",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'ĵ' => "j",
        'ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'œ' => "oe",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' | 'ș' => "s",
        'ß' => "ss",
        'ţ' | 'ť' | 'ŧ' | 'ț' => "t",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };

    Some(folded)
}
