//! Validated query inputs and the court predicate.

use crate::court::{Court, Sport};
use crate::QueryError;

/// Query point in decimal degrees, validated finite and in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Origin {
    pub lat: f64,
    pub lon: f64,
}

impl Origin {
    /// # Errors
    ///
    /// Returns [`QueryError::MissingCoordinates`] if either value is absent and
    /// [`QueryError::InvalidCoordinate`] if one is non-finite or out of range.
    pub fn new(lat: Option<f64>, lon: Option<f64>) -> Result<Self, QueryError> {
        let (Some(lat), Some(lon)) = (lat, lon) else {
            return Err(QueryError::MissingCoordinates);
        };

        check_coordinate("lat", lat, 90.0)?;
        check_coordinate("lon", lon, 180.0)?;

        Ok(Self { lat, lon })
    }
}

fn check_coordinate(field: &'static str, value: f64, bound: f64) -> Result<(), QueryError> {
    if !value.is_finite() {
        return Err(QueryError::InvalidCoordinate {
            field,
            reason: "must be a finite number".to_string(),
        });
    }
    if value.abs() > bound {
        return Err(QueryError::InvalidCoordinate {
            field,
            reason: format!("{value} is outside [-{bound}, {bound}]"),
        });
    }
    Ok(())
}

/// The `type` filter of a query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SportFilter {
    #[default]
    All,
    Sport(Sport),
    /// Courts that support more than one sport on their own.
    MultiPurpose,
    /// Case-insensitive substring of the raw facility label.
    Label(String),
}

impl SportFilter {
    /// Interprets the wire value. Blank means `all`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let value = raw.trim().to_lowercase();
        match value.as_str() {
            "" | "all" => SportFilter::All,
            "multi-purpose" => SportFilter::MultiPurpose,
            other => match Sport::from_tag(other) {
                Some(sport) => SportFilter::Sport(sport),
                None => SportFilter::Label(value),
            },
        }
    }

    fn matches(&self, court: &Court) -> bool {
        match self {
            SportFilter::All => true,
            SportFilter::Sport(sport) => court.sports_supported().contains(sport),
            SportFilter::MultiPurpose => court.sports_supported().len() > 1,
            SportFilter::Label(needle) => court
                .court_type_label()
                .is_some_and(|label| label.to_lowercase().contains(needle.as_str())),
        }
    }
}

/// Conjunction of the active filters for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourtFilter {
    pub sport: SportFilter,
    /// Lowercased surface needle; blank input is stored as `None`.
    surface: Option<String>,
    pub lighting_required: bool,
}

impl CourtFilter {
    #[must_use]
    pub fn new(sport: SportFilter, surface: Option<&str>, lighting_required: bool) -> Self {
        let surface = surface
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        Self {
            sport,
            surface,
            lighting_required,
        }
    }

    #[must_use]
    pub fn surface(&self) -> Option<&str> {
        self.surface.as_deref()
    }

    #[must_use]
    pub fn matches(&self, court: &Court) -> bool {
        if self.lighting_required && !court.lighting {
            return false;
        }

        if let Some(needle) = &self.surface {
            let hit = court
                .surface_type
                .as_deref()
                .is_some_and(|surface| surface.to_lowercase().contains(needle.as_str()));
            if !hit {
                return false;
            }
        }

        self.sport.matches(court)
    }
}

/// A fully validated nearest-courts query.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestQuery {
    pub origin: Origin,
    pub filter: CourtFilter,
    /// Drop locations whose courts together support more than one sport.
    pub exclude_mixed: bool,
    /// Requested number of individual court entries.
    pub count: usize,
}

impl NearestQuery {
    /// # Errors
    ///
    /// Returns [`QueryError`] for missing or invalid coordinates and for a
    /// negative count.
    pub fn new(lat: Option<f64>, lon: Option<f64>, count: i64) -> Result<Self, QueryError> {
        let origin = Origin::new(lat, lon)?;
        let count = usize::try_from(count).map_err(|_| QueryError::NegativeCount(count))?;

        Ok(Self {
            origin,
            filter: CourtFilter::default(),
            exclude_mixed: false,
            count,
        })
    }

    #[must_use]
    pub fn with_filter(mut self, filter: CourtFilter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn excluding_mixed(mut self, exclude_mixed: bool) -> Self {
        self.exclude_mixed = exclude_mixed;
        self
    }

    /// Caps the requested count at `max`.
    #[must_use]
    pub fn with_max_count(mut self, max: usize) -> Self {
        self.count = self.count.min(max);
        self
    }
}
