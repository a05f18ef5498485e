//! Physical feature categories.
//!
//! Category names appear in three spellings: the display label used by the feature database
//! (`Skin/Limbs`), the tag attached to images in the asset manager (`skin-and-limbs`) and the
//! metadata key used by image category lists (`skin_and_limbs`). The mapping between them is
//! enumerated here rather than derived from free text.

use serde::{Deserialize, Serialize};

/// Canonical physical feature category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureCategory {
    /// Main profile photo.
    CoverPhoto,
    /// Eyes and face.
    EyesAndFace,
    /// Neck.
    Neck,
    /// Skin and limbs.
    SkinAndLimbs,
    /// Carapace.
    ShellTop,
    /// Plastron.
    ShellBottom,
    /// Coloration.
    Coloration,
    /// Male specific traits.
    MaleSpecific,
    /// Female specific traits.
    FemaleSpecific,
    /// Hatchling.
    Hatchling,
}

impl FeatureCategory {
    /// All categories in display order.
    pub const ALL: [FeatureCategory; 10] = [
        Self::CoverPhoto,
        Self::EyesAndFace,
        Self::Neck,
        Self::SkinAndLimbs,
        Self::ShellTop,
        Self::ShellBottom,
        Self::Coloration,
        Self::MaleSpecific,
        Self::FemaleSpecific,
        Self::Hatchling,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CoverPhoto => "Cover Photo",
            Self::EyesAndFace => "Eyes/Face",
            Self::Neck => "Neck",
            Self::SkinAndLimbs => "Skin/Limbs",
            Self::ShellTop => "Shell Top",
            Self::ShellBottom => "Shell Bottom",
            Self::Coloration => "Coloration",
            Self::MaleSpecific => "Male Specific",
            Self::FemaleSpecific => "Female Specific",
            Self::Hatchling => "Hatchling",
        }
    }

    /// Asset manager tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::CoverPhoto => "cover-photo",
            Self::EyesAndFace => "eyes-and-face",
            Self::Neck => "neck",
            Self::SkinAndLimbs => "skin-and-limbs",
            Self::ShellTop => "shell-top",
            Self::ShellBottom => "shell-bottom",
            Self::Coloration => "coloration",
            Self::MaleSpecific => "male-specific",
            Self::FemaleSpecific => "female-specific",
            Self::Hatchling => "hatchling",
        }
    }

    /// Image metadata key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::CoverPhoto => "cover_photo",
            Self::EyesAndFace => "eyes_and_face",
            Self::Neck => "neck",
            Self::SkinAndLimbs => "skin_and_limbs",
            Self::ShellTop => "shell_top",
            Self::ShellBottom => "shell_bottom",
            Self::Coloration => "coloration",
            Self::MaleSpecific => "male_specific",
            Self::FemaleSpecific => "female_specific",
            Self::Hatchling => "hatchling",
        }
    }

    /// Finds a category by its asset tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.tag() == tag)
    }

    /// Finds a category by its metadata key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Finds a category by its display label. Comparison ignores case, and `/` is equivalent to
    /// ` and `, so both `Skin/Limbs` and `skin and limbs` are accepted.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = canonical_label(label);
        Self::ALL
            .into_iter()
            .find(|c| canonical_label(c.label()) == wanted)
    }

    /// Position of the category in [`FeatureCategory::ALL`].
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or_default()
    }

    /// Next category in display order.
    pub fn next(&self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Previous category in display order.
    pub fn previous(&self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

fn canonical_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .replace('/', " and ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spellings_are_bidirectional() {
        for category in FeatureCategory::ALL {
            assert_eq!(FeatureCategory::from_tag(category.tag()), Some(category));
            assert_eq!(FeatureCategory::from_key(category.key()), Some(category));
            assert_eq!(FeatureCategory::from_label(category.label()), Some(category));
        }
    }

    #[test]
    fn labels_accept_alternative_spellings() {
        assert_eq!(
            FeatureCategory::from_label("Skin/Limbs"),
            Some(FeatureCategory::SkinAndLimbs)
        );
        assert_eq!(
            FeatureCategory::from_label("skin and  limbs"),
            Some(FeatureCategory::SkinAndLimbs)
        );
        assert_eq!(
            FeatureCategory::from_label("Eyes / Face"),
            Some(FeatureCategory::EyesAndFace)
        );
        assert_eq!(FeatureCategory::from_label("Tail"), None);
        assert_eq!(FeatureCategory::from_tag("skin_and_limbs"), None);
    }

    #[test]
    fn navigation_follows_display_order() {
        assert_eq!(FeatureCategory::CoverPhoto.previous(), None);
        assert_eq!(
            FeatureCategory::CoverPhoto.next(),
            Some(FeatureCategory::EyesAndFace)
        );
        assert_eq!(FeatureCategory::Hatchling.next(), None);
        assert_eq!(FeatureCategory::Hatchling.index(), 9);
    }
}
