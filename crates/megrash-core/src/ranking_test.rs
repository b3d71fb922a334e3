use std::path::Path;

use super::*;
use crate::court::Sport;
use crate::dataset::load_courts;
use crate::query::{CourtFilter, SportFilter};

fn court(label: &str, latitude: f64, longitude: f64) -> Court {
    Court::new(Some(label.to_string()), latitude, longitude)
}

/// Two courts sharing a venue (football + basketball) and a volleyball court
/// about 5 km away.
fn venue_dataset() -> Vec<Court> {
    vec![
        court("מגרש כדורגל", 32.05, 34.78),
        court("מגרש כדורסל", 32.05, 34.78),
        court("מגרש כדורעף", 32.10, 34.80),
    ]
}

fn query(lat: f64, lon: f64, count: i64) -> NearestQuery {
    NearestQuery::new(Some(lat), Some(lon), count).expect("valid query")
}

fn fixture() -> Vec<Court> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/courts.csv");
    load_courts(&path).expect("bundled dataset loads")
}

fn entry_count(groups: &[LocationGroup<'_>]) -> usize {
    groups.iter().map(|g| g.courts.len()).sum()
}

#[test]
fn shared_venue_is_returned_whole_even_when_count_is_one() {
    let courts = venue_dataset();
    let groups = rank_and_group(&query(32.05, 34.78, 1), &courts);

    assert_eq!(groups.len(), 1);
    let venue = &groups[0];
    assert!((venue.latitude - 32.05).abs() < f64::EPSILON);
    assert!((venue.longitude - 34.78).abs() < f64::EPSILON);
    assert_eq!(venue.courts.len(), 2);
    assert!(venue.min_distance_km().abs() < 1e-9);
}

#[test]
fn exclude_mixed_keeps_only_single_sport_locations() {
    let courts = venue_dataset();
    let groups = rank_and_group(&query(32.05, 34.78, 5).excluding_mixed(true), &courts);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].courts.len(), 1);
    assert_eq!(
        groups[0].sports(),
        SportSet::from([Sport::Volleyball])
    );
    let km = groups[0].min_distance_km();
    assert!(km > 5.0 && km < 6.5, "volleyball court is ~5.9 km away, got {km}");
}

#[test]
fn single_multi_purpose_court_counts_as_mixed() {
    let courts = [
        court("מגרש משולב", 32.05, 34.78),
        court("מגרש כדורסל", 32.06, 34.78),
    ];
    let groups = rank_and_group(&query(32.05, 34.78, 5).excluding_mixed(true), &courts);
    assert_eq!(groups.len(), 1);
    assert!((groups[0].latitude - 32.06).abs() < f64::EPSILON);
}

#[test]
fn location_with_unclassified_court_and_one_sport_is_not_mixed() {
    let courts = [
        court("מגרש כדורסל", 32.05, 34.78),
        court("מגרש טניס", 32.05, 34.78),
    ];
    let groups = rank_and_group(&query(32.05, 34.78, 5).excluding_mixed(true), &courts);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].courts.len(), 2);
}

#[test]
fn zero_count_yields_empty_result() {
    let courts = venue_dataset();
    assert!(rank_and_group(&query(32.05, 34.78, 0), &courts).is_empty());
}

#[test]
fn filter_matching_nothing_yields_empty_result() {
    let courts = venue_dataset();
    let filter = CourtFilter::new(SportFilter::All, Some("clay"), false);
    let groups = rank_and_group(&query(32.05, 34.78, 5).with_filter(filter), &courts);
    assert!(groups.is_empty());
}

#[test]
fn empty_dataset_yields_empty_result() {
    assert!(rank_and_group(&query(32.05, 34.78, 5), &[]).is_empty());
}

#[test]
fn sport_filter_applies_before_grouping() {
    let courts = venue_dataset();
    let filter = CourtFilter::new(SportFilter::Sport(Sport::Basketball), None, false);
    let groups = rank_and_group(&query(32.05, 34.78, 5).with_filter(filter), &courts);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].courts.len(), 1);
    assert_eq!(
        groups[0].courts[0].court.court_type_label(),
        Some("מגרש כדורסל")
    );
}

#[test]
fn coordinates_differing_slightly_are_never_merged() {
    let courts = [
        court("מגרש כדורגל", 32.05, 34.78),
        court("מגרש כדורגל", 32.050_000_001, 34.78),
        court("מגרש כדורגל", 32.05, 34.780_000_001),
    ];
    let groups = rank_and_group(&query(32.0, 34.7, 10), &courts);
    assert_eq!(groups.len(), 3);
    assert!(groups.iter().all(|g| g.courts.len() == 1));
}

#[test]
fn negative_zero_shares_a_location_with_zero() {
    let courts = [court("מגרש כדורגל", 0.0, 10.0), court("מגרש כדורסל", -0.0, 10.0)];
    let groups = rank_and_group(&query(1.0, 10.0, 10), &courts);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].courts.len(), 2);
}

#[test]
fn grouping_merges_non_contiguous_members_in_first_seen_order() {
    let courts = [
        court("מגרש כדורגל", 32.05, 34.78),
        court("מגרש כדורסל", 32.06, 34.78),
        court("מגרש כדורעף", 32.05, 34.78),
    ];
    // Equal distances at two different venues interleave after a stable sort.
    let ranked = vec![
        RankedCourt {
            court: &courts[0],
            distance_km: 1.0,
        },
        RankedCourt {
            court: &courts[1],
            distance_km: 1.0,
        },
        RankedCourt {
            court: &courts[2],
            distance_km: 1.0,
        },
    ];

    let groups = group_by_location(ranked);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].courts.len(), 2);
    let labels: Vec<Vec<_>> = groups
        .iter()
        .map(|g| g.courts.iter().map(|c| c.court.court_type_label()).collect())
        .collect();
    assert_eq!(
        labels,
        [
            vec![Some("מגרש כדורגל"), Some("מגרש כדורעף")],
            vec![Some("מגרש כדורסל")],
        ]
    );
}

#[test]
fn equal_distances_keep_source_order() {
    // Same venue listed three times: distances tie exactly.
    let courts = [
        court("מגרש כדורעף", 32.05, 34.78),
        court("מגרש כדורגל", 32.05, 34.78),
        court("מגרש כדורסל", 32.05, 34.78),
    ];
    let groups = rank_and_group(&query(32.0, 34.7, 10), &courts);
    let labels: Vec<_> = groups[0]
        .courts
        .iter()
        .map(|c| c.court.court_type_label())
        .collect();
    assert_eq!(
        labels,
        [Some("מגרש כדורעף"), Some("מגרש כדורגל"), Some("מגרש כדורסל")]
    );
}

#[test]
fn take_whole_groups_stops_once_count_is_reached() {
    let courts = [
        court("a", 1.0, 1.0),
        court("b", 2.0, 2.0),
        court("c", 2.0, 2.0),
        court("d", 3.0, 3.0),
    ];
    let layout: [&[usize]; 3] = [&[0], &[1, 2], &[3]];
    let groups: Vec<_> = layout
        .into_iter()
        .map(|members| LocationGroup {
            latitude: courts[members[0]].latitude,
            longitude: courts[members[0]].longitude,
            courts: members
                .iter()
                .map(|&i| RankedCourt {
                    court: &courts[i],
                    distance_km: 0.0,
                })
                .collect(),
        })
        .collect();

    assert_eq!(take_whole_groups(groups.clone(), 1).len(), 1);
    // The second group crosses the count and is kept whole.
    assert_eq!(entry_count(&take_whole_groups(groups.clone(), 2)), 3);
    assert_eq!(entry_count(&take_whole_groups(groups.clone(), 3)), 3);
    assert_eq!(entry_count(&take_whole_groups(groups.clone(), 4)), 4);
    assert_eq!(entry_count(&take_whole_groups(groups, 50)), 4);
}

#[test]
fn group_minimum_distances_are_non_decreasing() {
    let courts = fixture();
    let origins = [(32.0795, 34.7740), (32.05, 34.75), (32.12, 34.81), (31.0, 35.0)];

    for (lat, lon) in origins {
        let groups = rank_and_group(&query(lat, lon, 100), &courts);
        assert!(!groups.is_empty());
        for pair in groups.windows(2) {
            assert!(
                pair[0].min_distance_km() <= pair[1].min_distance_km(),
                "groups out of order for origin ({lat}, {lon})"
            );
        }
        for group in &groups {
            assert!(group.courts.iter().all(|c| {
                c.court.latitude.to_bits() == group.latitude.to_bits()
                    && c.court.longitude.to_bits() == group.longitude.to_bits()
            }));
            for pair in group.courts.windows(2) {
                assert!(pair[0].distance_km <= pair[1].distance_km);
            }
        }
    }
}

#[test]
fn count_is_met_without_splitting_groups() {
    let courts = fixture();
    let available = courts.len();

    for count in 1..=available + 2 {
        let groups = rank_and_group(&query(32.08, 34.78, i64::try_from(count).expect("count fits i64")), &courts);
        let total = entry_count(&groups);
        assert!(total >= count.min(available), "count {count}: got {total}");

        let last = groups.last().expect("non-empty dataset").courts.len();
        assert!(total - last < count, "count {count}: an extra group was emitted");
    }
}

#[test]
fn every_fixture_court_lands_in_exactly_one_group() {
    let courts = fixture();
    let groups = rank_and_group(&query(32.08, 34.78, 1_000), &courts);
    assert_eq!(entry_count(&groups), courts.len());
}

#[test]
fn ranking_is_idempotent() {
    let courts = fixture();
    let q = query(32.07, 34.78, 6)
        .with_filter(CourtFilter::new(SportFilter::All, None, true))
        .excluding_mixed(true);
    assert_eq!(rank_and_group(&q, &courts), rank_and_group(&q, &courts));
}

#[test]
fn geodesic_km_matches_known_distance() {
    // Tel Aviv (Dizengoff Sq.) to Jerusalem (Jaffa Gate) is about 54 km.
    let origin = Origin {
        lat: 32.0775,
        lon: 34.7740,
    };
    let km = geodesic_km(origin, 31.7767, 35.2275);
    assert!((km - 54.0).abs() < 2.0, "got {km}");
    assert!(geodesic_km(origin, origin.lat, origin.lon).abs() < 1e-9);
}
