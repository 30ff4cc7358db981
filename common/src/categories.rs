use std::fmt::{Display, Formatter, Result};

use serde::{Serialize, Serializer};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Separator between the top bucket and the sub-label in upstream category text,
/// e.g. `"Geometry - Mesh"`.
pub const CATEGORY_SEPARATOR: &str = " - ";

const OTHER: &str = "Other";

/// The fixed whitelist of top buckets. Declaration order is the canonical
/// display order, and the derived `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Serialize)]
pub enum TopCategory {
    Core,
    Geometry,
    Logic,
    Math,
    Generation,
    Animation,
    Architecture,
    Electronic,
    Integration,
}

impl TopCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Core => "Core",
            Self::Geometry => "Geometry",
            Self::Logic => "Logic",
            Self::Math => "Math",
            Self::Generation => "Generation",
            Self::Animation => "Animation",
            Self::Architecture => "Architecture",
            Self::Electronic => "Electronic",
            Self::Integration => "Integration",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Geometry => "geometry",
            Self::Logic => "logic",
            Self::Math => "math",
            Self::Generation => "generation",
            Self::Animation => "animation",
            Self::Architecture => "architecture",
            Self::Electronic => "electronic",
            Self::Integration => "integration",
        }
    }

    /// Exact, case-sensitive match on the display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|category| category.name() == name)
    }

    /// Slugs are matched after trimming and lowercasing; anything else is rejected.
    pub fn from_slug(slug: &str) -> Option<Self> {
        let normalized = slug.trim().to_lowercase();

        Self::iter().find(|category| category.slug() == normalized)
    }

    pub fn ordered() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

impl Display for TopCategory {
    fn fmt(&self, format: &mut Formatter) -> Result {
        write!(format, "{}", self.name())
    }
}

/// Result bucket of classification. `Other` sorts after every whitelisted bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    Top(TopCategory),
    Other,
}

impl Bucket {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Top(category) => category.name(),
            Self::Other => OTHER,
        }
    }
}

impl Display for Bucket {
    fn fmt(&self, format: &mut Formatter) -> Result {
        write!(format, "{}", self.name())
    }
}

impl Serialize for Bucket {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub top: Bucket,
    pub sub: String,
}

/// Maps free-text upstream category text onto a top bucket and a sub-label.
///
/// - empty text lands in `Other` with sub-label `"Other"`
/// - `"<Top> - <rest>"` with a whitelisted `<Top>` yields that bucket, `<rest>` as
///   the sub-label (or `<Top>` again if `<rest>` is blank)
/// - a prefix outside the whitelist lands in `Other`, keeping the whole text
/// - text without a separator lands in `Core`
pub fn classify(category: &str) -> Classification {
    let trimmed = category.trim();

    if trimmed.is_empty() {
        return Classification {
            top: Bucket::Other,
            sub: OTHER.to_string(),
        };
    }

    let Some((head, rest)) = trimmed.split_once(CATEGORY_SEPARATOR) else {
        return Classification {
            top: Bucket::Top(TopCategory::Core),
            sub: trimmed.to_string(),
        };
    };

    let candidate_top = head.trim();
    let candidate_sub = rest.trim();

    match TopCategory::from_name(candidate_top) {
        Some(top) => {
            let sub = if candidate_sub.is_empty() {
                candidate_top
            } else {
                candidate_sub
            };

            Classification {
                top: Bucket::Top(top),
                sub: sub.to_string(),
            }
        }
        None => Classification {
            top: Bucket::Other,
            sub: trimmed.to_string(),
        },
    }
}
