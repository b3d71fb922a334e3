//! Response shapes for ranked location groups.
//!
//! Field names follow the public JSON contract consumed by the map frontend,
//! hence the PascalCase renames.

use serde::Serialize;

use crate::court::SportSet;
use crate::ranking::{LocationGroup, RankedCourt};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourtEntry {
    /// Raw facility label from the source sheet.
    #[serde(rename = "CourtType")]
    pub court_type: Option<String>,
    /// English display label.
    pub court_type_en: Option<String>,
    #[serde(rename = "SurfaceType")]
    pub surface_type: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "Street")]
    pub street: Option<String>,
    #[serde(rename = "StreetNumber")]
    pub street_number: Option<String>,
    /// Kilometres from the query point.
    #[serde(rename = "Distance")]
    pub distance: f64,
    #[serde(rename = "Lighting")]
    pub lighting: bool,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "Availability")]
    pub availability: Option<String>,
    #[serde(rename = "Affiliation")]
    pub affiliation: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    pub sports_supported: SportSet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationResult {
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Courts")]
    pub courts: Vec<CourtEntry>,
}

impl From<&RankedCourt<'_>> for CourtEntry {
    fn from(ranked: &RankedCourt<'_>) -> Self {
        let court = ranked.court;
        Self {
            court_type: court.court_type_label().map(str::to_string),
            court_type_en: court.display_type(),
            surface_type: court.surface_type.clone(),
            city: court.city.clone(),
            street: court.street.clone(),
            street_number: court.street_number.clone(),
            distance: ranked.distance_km,
            lighting: court.lighting,
            address: court.address(),
            availability: court.availability.clone(),
            affiliation: court.affiliation.clone(),
            description: court.description.clone(),
            sports_supported: court.sports_supported().clone(),
        }
    }
}

impl From<&LocationGroup<'_>> for LocationResult {
    fn from(group: &LocationGroup<'_>) -> Self {
        Self {
            latitude: group.latitude,
            longitude: group.longitude,
            courts: group.courts.iter().map(CourtEntry::from).collect(),
        }
    }
}

/// Converts ranked groups into owned response values, preserving order.
#[must_use]
pub fn render_groups(groups: &[LocationGroup<'_>]) -> Vec<LocationResult> {
    groups.iter().map(LocationResult::from).collect()
}
