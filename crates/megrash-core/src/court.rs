//! Canonical court record and the closed sport vocabulary.
//!
//! Sport tags are derived from the free-text Hebrew facility label exactly
//! once, when a [`Court`] is built. Ranking never looks at the label to decide
//! which sports a court supports.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Football,
    Basketball,
    Volleyball,
}

impl Sport {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sport::Football => "football",
            Sport::Basketball => "basketball",
            Sport::Volleyball => "volleyball",
        }
    }

    /// Parses the lowercase tag used on the wire.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "football" => Some(Sport::Football),
            "basketball" => Some(Sport::Basketball),
            "volleyball" => Some(Sport::Volleyball),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered so serialization is stable: football, basketball, volleyball.
pub type SportSet = BTreeSet<Sport>;

/// Facility kind recognised from the source label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourtCategory {
    MultiPurpose,
    Football,
    Basketball,
    Volleyball,
}

struct LabelRule {
    token: &'static str,
    category: CourtCategory,
}

// First match wins. The combined marker must precede the single-sport ones
// since combined labels usually mention a sport as well.
const LABEL_RULES: &[LabelRule] = &[
    LabelRule {
        token: "משולב",
        category: CourtCategory::MultiPurpose,
    },
    LabelRule {
        token: "כדורגל",
        category: CourtCategory::Football,
    },
    LabelRule {
        token: "כדורסל",
        category: CourtCategory::Basketball,
    },
    LabelRule {
        token: "כדורעף",
        category: CourtCategory::Volleyball,
    },
];

impl CourtCategory {
    /// Classifies a raw facility label, or `None` when no rule matches.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        LABEL_RULES
            .iter()
            .find(|rule| label.contains(rule.token))
            .map(|rule| rule.category)
    }

    #[must_use]
    pub fn sports(self) -> SportSet {
        match self {
            CourtCategory::MultiPurpose => [Sport::Football, Sport::Basketball].into(),
            CourtCategory::Football => [Sport::Football].into(),
            CourtCategory::Basketball => [Sport::Basketball].into(),
            CourtCategory::Volleyball => [Sport::Volleyball].into(),
        }
    }

    /// English display label for the facility kind.
    #[must_use]
    pub fn display_label(self) -> &'static str {
        match self {
            CourtCategory::MultiPurpose => "Multi-Purpose Court",
            CourtCategory::Football => "Football Court",
            CourtCategory::Basketball => "Basketball Court",
            CourtCategory::Volleyball => "Volleyball Court",
        }
    }
}

/// A single playable facility in canonical form.
///
/// Coordinates are always present; the normalizer drops rows without them.
#[derive(Debug, Clone, PartialEq)]
pub struct Court {
    pub city: Option<String>,
    court_type_label: Option<String>,
    pub surface_type: Option<String>,
    pub street: Option<String>,
    pub street_number: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub lighting: bool,
    pub availability: Option<String>,
    pub affiliation: Option<String>,
    pub description: Option<String>,
    category: Option<CourtCategory>,
    sports_supported: SportSet,
}

impl Court {
    /// Builds a court at the given coordinates, classifying `label` into its
    /// category and sport tags. Every other attribute starts empty.
    #[must_use]
    pub fn new(label: Option<String>, latitude: f64, longitude: f64) -> Self {
        let category = label.as_deref().and_then(CourtCategory::from_label);
        let sports_supported = category.map(CourtCategory::sports).unwrap_or_default();

        Self {
            city: None,
            court_type_label: label,
            surface_type: None,
            street: None,
            street_number: None,
            latitude,
            longitude,
            lighting: false,
            availability: None,
            affiliation: None,
            description: None,
            category,
            sports_supported,
        }
    }

    /// Raw facility label as it appears in the sheet.
    #[must_use]
    pub fn court_type_label(&self) -> Option<&str> {
        self.court_type_label.as_deref()
    }

    #[must_use]
    pub fn category(&self) -> Option<CourtCategory> {
        self.category
    }

    /// Sport tags derived from the label at construction.
    #[must_use]
    pub fn sports_supported(&self) -> &SportSet {
        &self.sports_supported
    }

    /// English display type, falling back to the raw label for facilities
    /// outside the sport vocabulary.
    #[must_use]
    pub fn display_type(&self) -> Option<String> {
        match self.category {
            Some(category) => Some(category.display_label().to_string()),
            None => self.court_type_label.clone(),
        }
    }

    /// Composes `"{street} {number}, {city}"` from whichever parts exist.
    ///
    /// A house number without a street is meaningless and is left out.
    #[must_use]
    pub fn address(&self) -> Option<String> {
        let street_line = self.street.as_deref().map(|street| {
            match self.street_number.as_deref() {
                Some(number) => format!("{street} {number}"),
                None => street.to_string(),
            }
        });

        match (street_line, self.city.as_deref()) {
            (Some(line), Some(city)) => Some(format!("{line}, {city}")),
            (Some(line), None) => Some(line),
            (None, Some(city)) => Some(city.to_string()),
            (None, None) => None,
        }
    }
}
