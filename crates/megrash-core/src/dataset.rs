//! Normalization from the municipal courts sheet (CSV export) to [`Court`].
//!
//! Source columns keep the sheet's column names. Rows without usable
//! coordinates are dropped; anything else missing becomes `None`.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::court::{Court, Sport};
use crate::ranking::location_key;
use crate::DatasetError;

/// Affirmative marker used by the sheet's lighting column.
const LIGHTING_YES: &str = "כן";

/// Columns a courts export cannot be read without.
const REQUIRED_COLUMNS: [&str; 2] = ["lat_from_address", "lon_from_address"];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCourtRow {
    #[serde(rename = "facility_name_he")]
    court_type: Option<String>,
    #[serde(rename = "surface_type_he")]
    surface_type: Option<String>,
    #[serde(rename = "street_he")]
    street: Option<String>,
    #[serde(rename = "house_number")]
    street_number: Option<String>,
    #[serde(rename = "lat_from_address")]
    latitude: Option<String>,
    #[serde(rename = "lon_from_address")]
    longitude: Option<String>,
    #[serde(rename = "has_lights_he")]
    lighting: Option<String>,
    #[serde(rename = "availability_he")]
    availability: Option<String>,
    #[serde(rename = "school_name_he")]
    affiliation: Option<String>,
    #[serde(rename = "facility_description_he")]
    description: Option<String>,
    #[serde(rename = "city_he")]
    city: Option<String>,
}

/// Load the canonical court set from a CSV file.
///
/// # Errors
///
/// Returns [`DatasetError::Io`] if the file cannot be opened,
/// [`DatasetError::MissingColumn`] if a coordinate column is absent, and
/// [`DatasetError::Csv`] if a record is structurally malformed.
pub fn load_courts(path: &Path) -> Result<Vec<Court>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let courts = load_courts_from_reader(file)?;
    tracing::info!(path = %path.display(), courts = courts.len(), "courts dataset loaded");
    Ok(courts)
}

/// Load the canonical court set from any CSV source with a header row.
///
/// Source order is preserved.
///
/// # Errors
///
/// Returns [`DatasetError::MissingColumn`] if the header lacks a coordinate
/// column and [`DatasetError::Csv`] if a record is structurally malformed.
pub fn load_courts_from_reader<R: Read>(reader: R) -> Result<Vec<Court>, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers()?;
    if let Some(missing) = REQUIRED_COLUMNS
        .into_iter()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(DatasetError::MissingColumn(missing));
    }

    let mut courts = Vec::new();
    let mut dropped = 0_usize;

    for (idx, record) in rdr.deserialize::<RawCourtRow>().enumerate() {
        let row = record?;
        if let Some(court) = normalize_row(row) {
            courts.push(court);
        } else {
            dropped += 1;
            tracing::debug!(row = idx + 1, "dropping court row without usable coordinates");
        }
    }

    if dropped > 0 {
        tracing::warn!(dropped, kept = courts.len(), "court rows dropped during normalization");
    }

    Ok(courts)
}

fn normalize_row(row: RawCourtRow) -> Option<Court> {
    let latitude = parse_coordinate(row.latitude.as_deref(), 90.0)?;
    let longitude = parse_coordinate(row.longitude.as_deref(), 180.0)?;

    let mut court = Court::new(clean(row.court_type), latitude, longitude);
    court.city = clean(row.city);
    court.surface_type = clean(row.surface_type);
    court.street = clean(row.street);
    court.street_number = clean(row.street_number).map(|n| normalize_house_number(&n));
    court.lighting = row
        .lighting
        .as_deref()
        .is_some_and(|v| v.trim() == LIGHTING_YES);
    court.availability = clean(row.availability);
    court.affiliation = clean(row.affiliation);
    court.description = clean(row.description);

    Some(court)
}

/// Treat blank cells as absent.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_coordinate(raw: Option<&str>, bound: f64) -> Option<f64> {
    let value = raw?.trim().parse::<f64>().ok()?;
    (value.is_finite() && value.abs() <= bound).then_some(value)
}

/// Spreadsheet exports turn `12` into `12.0`; undo that for whole numbers.
fn normalize_house_number(raw: &str) -> String {
    match raw.parse::<f64>() {
        #[allow(clippy::cast_possible_truncation)]
        Ok(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e9 => (n as i64).to_string(),
        _ => raw.to_string(),
    }
}

/// Aggregate counts over a loaded court set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub total: usize,
    pub lit: usize,
    pub locations: usize,
    pub multi_purpose: usize,
    pub unclassified: usize,
    pub football: usize,
    pub basketball: usize,
    pub volleyball: usize,
}

#[must_use]
pub fn summarize(courts: &[Court]) -> DatasetSummary {
    let count_sport = |sport: Sport| {
        courts
            .iter()
            .filter(|c| c.sports_supported().contains(&sport))
            .count()
    };

    let locations = courts
        .iter()
        .map(|c| location_key(c.latitude, c.longitude))
        .collect::<HashSet<_>>()
        .len();

    DatasetSummary {
        total: courts.len(),
        lit: courts.iter().filter(|c| c.lighting).count(),
        locations,
        multi_purpose: courts.iter().filter(|c| c.sports_supported().len() > 1).count(),
        unclassified: courts.iter().filter(|c| c.sports_supported().is_empty()).count(),
        football: count_sport(Sport::Football),
        basketball: count_sport(Sport::Basketball),
        volleyball: count_sport(Sport::Volleyball),
    }
}

#[cfg(test)]
#[path = "dataset_test.rs"]
mod tests;
