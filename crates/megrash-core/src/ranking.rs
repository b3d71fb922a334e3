//! Filter, rank, and group courts around a query point.
//!
//! The pipeline is deterministic: filtering keeps source order, the distance
//! sort is stable, and groups are emitted in the order their first member was
//! seen. Identical inputs therefore always produce identical output.

use std::collections::HashMap;

use geo::{GeodesicDistance, Point};

use crate::court::{Court, SportSet};
use crate::query::{NearestQuery, Origin};

/// A court paired with its distance from the query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedCourt<'a> {
    pub court: &'a Court,
    pub distance_km: f64,
}

/// Courts sharing one exact coordinate pair, in distance order.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationGroup<'a> {
    pub latitude: f64,
    pub longitude: f64,
    pub courts: Vec<RankedCourt<'a>>,
}

impl LocationGroup<'_> {
    /// Distance of the nearest member. Members are pushed in sorted order, so
    /// this is the first one.
    #[must_use]
    pub fn min_distance_km(&self) -> f64 {
        self.courts.first().map_or(0.0, |c| c.distance_km)
    }

    /// Union of every member's sport tags.
    #[must_use]
    pub fn sports(&self) -> SportSet {
        self.courts
            .iter()
            .flat_map(|c| c.court.sports_supported().iter().copied())
            .collect()
    }

    /// A location is mixed when its courts together cover more than one sport.
    #[must_use]
    pub fn is_mixed(&self) -> bool {
        self.sports().len() > 1
    }
}

/// Great-circle distance on the WGS-84 ellipsoid, in kilometres.
#[must_use]
pub fn geodesic_km(origin: Origin, latitude: f64, longitude: f64) -> f64 {
    let from = Point::new(origin.lon, origin.lat);
    let to = Point::new(longitude, latitude);
    from.geodesic_distance(&to) / 1000.0
}

/// Rank `courts` for `query` and package the nearest ones into location groups.
///
/// Whole groups are emitted until the running number of court entries reaches
/// `query.count`. The group that reaches it is kept intact, so the result may
/// hold up to that group's size minus one more entries than requested. A count
/// of zero, or a filter nothing satisfies, yields an empty result.
#[must_use]
pub fn rank_and_group<'a>(query: &NearestQuery, courts: &'a [Court]) -> Vec<LocationGroup<'a>> {
    if query.count == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<RankedCourt<'a>> = courts
        .iter()
        .filter(|court| query.filter.matches(court))
        .map(|court| RankedCourt {
            court,
            distance_km: geodesic_km(query.origin, court.latitude, court.longitude),
        })
        .collect();

    if ranked.is_empty() {
        tracing::debug!("no courts matched the query filters");
        return Vec::new();
    }

    // `sort_by` is stable: equal distances keep their source order.
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    let mut groups = group_by_location(ranked);
    if query.exclude_mixed {
        groups.retain(|group| !group.is_mixed());
    }

    take_whole_groups(groups, query.count)
}

pub(crate) fn location_key(latitude: f64, longitude: f64) -> (u64, u64) {
    // Adding 0.0 folds -0.0 into 0.0 so both spellings share a key.
    ((latitude + 0.0).to_bits(), (longitude + 0.0).to_bits())
}

fn group_by_location(ranked: Vec<RankedCourt<'_>>) -> Vec<LocationGroup<'_>> {
    let mut index: HashMap<(u64, u64), usize> = HashMap::new();
    let mut groups: Vec<LocationGroup<'_>> = Vec::new();

    for entry in ranked {
        let (latitude, longitude) = (entry.court.latitude, entry.court.longitude);
        let slot = *index
            .entry(location_key(latitude, longitude))
            .or_insert_with(|| {
                groups.push(LocationGroup {
                    latitude,
                    longitude,
                    courts: Vec::new(),
                });
                groups.len() - 1
            });
        groups[slot].courts.push(entry);
    }

    groups
}

fn take_whole_groups(groups: Vec<LocationGroup<'_>>, count: usize) -> Vec<LocationGroup<'_>> {
    let mut total = 0;
    let mut kept = Vec::new();

    for group in groups {
        if total >= count {
            break;
        }
        total += group.courts.len();
        kept.push(group);
    }

    kept
}

#[cfg(test)]
#[path = "ranking_test.rs"]
mod tests;
