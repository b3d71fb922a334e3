use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use megrash_core::{rank_and_group, render_groups, CourtFilter, LocationResult, NearestQuery, SportFilter};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

/// Body of `POST /api/closest`. Every field is optional at the wire level so
/// missing coordinates surface as a descriptive 400 instead of a serde error.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ClosestRequest {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub count: Option<i64>,
    #[serde(rename = "type")]
    pub court_type: Option<String>,
    pub surface: Option<String>,
    pub lighting: Option<bool>,
    pub exclude_mixed_locations: Option<bool>,
}

impl ClosestRequest {
    fn into_query(self, default_count: usize, max_count: usize) -> Result<NearestQuery, ApiError> {
        let count = self
            .count
            .unwrap_or_else(|| i64::try_from(default_count).unwrap_or(i64::MAX));

        let filter = CourtFilter::new(
            SportFilter::parse(self.court_type.as_deref().unwrap_or("all")),
            self.surface.as_deref(),
            self.lighting.unwrap_or(false),
        );

        Ok(NearestQuery::new(self.lat, self.lon, count)?
            .with_filter(filter)
            .excluding_mixed(self.exclude_mixed_locations.unwrap_or(false))
            .with_max_count(max_count))
    }
}

pub(super) async fn closest_courts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<ClosestRequest>, JsonRejection>,
) -> Result<Json<Vec<LocationResult>>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(request_id = %req_id.0, error = %rejection, "rejected closest-courts body");
        ApiError::bad_request(rejection.body_text())
    })?;

    let query = request
        .into_query(state.config.default_count, state.config.max_count)
        .inspect_err(|e| {
            tracing::debug!(request_id = %req_id.0, error = %e.error, "invalid closest-courts query");
        })?;

    let groups = rank_and_group(&query, &state.courts);
    let data = render_groups(&groups);

    tracing::info!(
        request_id = %req_id.0,
        lat = query.origin.lat,
        lon = query.origin.lon,
        sport = ?query.filter.sport,
        surface = ?query.filter.surface(),
        lighting = query.filter.lighting_required,
        exclude_mixed = query.exclude_mixed,
        count = query.count,
        locations = data.len(),
        "closest courts served"
    );

    Ok(Json(data))
}
