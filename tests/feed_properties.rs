pub mod test_utils;

use location_feed::{CoordinateSource, LocationFeed};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

#[test]
fn invariants_hold_for_seeded_draws() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..10_000 {
        let feed = LocationFeed::generate(&mut rng);
        test_utils::assert_feed_invariants(&feed);
    }
}

#[test]
fn invariants_hold_for_thread_rng() {
    let mut rng = rand::rng();
    for _ in 0..1_000 {
        test_utils::assert_feed_invariants(&LocationFeed::generate(&mut rng));
    }
}

#[test]
fn every_length_is_observed() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut lengths: BTreeMap<usize, u32> = BTreeMap::new();
    for _ in 0..10_000 {
        let feed = LocationFeed::generate(&mut rng);
        *lengths.entry(feed.locations.len()).or_default() += 1;
    }

    assert_eq!(
        lengths.keys().copied().collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5, 6]
    );
    // a uniform draw puts roughly 1667 feeds in each bucket
    for (len, count) in &lengths {
        assert!(*count > 1_000, "length {len} observed only {count} times");
    }
}

#[test]
fn coordinate_extremes_are_reachable() {
    let mut rng = StdRng::seed_from_u64(99);
    let (mut min_lat, mut max_lat, mut min_lng, mut max_lng) = (0, 0, 0, 0);
    for _ in 0..10_000 {
        for record in LocationFeed::generate(&mut rng).locations {
            min_lat = min_lat.min(record.latitude);
            max_lat = max_lat.max(record.latitude);
            min_lng = min_lng.min(record.longitude);
            max_lng = max_lng.max(record.longitude);
        }
    }
    assert_eq!((min_lat, max_lat), (-45, 45));
    assert_eq!((min_lng, max_lng), (-90, 90));
}

// records every range it is asked for
struct RecordingSource {
    ranges: Vec<(i32, i32)>,
}

impl CoordinateSource for RecordingSource {
    fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        self.ranges.push((low, high));
        if self.ranges.len() == 1 {
            high
        } else {
            0
        }
    }
}

#[test]
fn draws_count_then_latitude_longitude_pairs() {
    let mut source = RecordingSource { ranges: Vec::new() };
    let feed = LocationFeed::generate(&mut source);

    assert_eq!(feed.locations.len(), 6);
    let mut expected = vec![(1, 6)];
    for _ in 0..6 {
        expected.push((-45, 45));
        expected.push((-90, 90));
    }
    assert_eq!(source.ranges, expected);
}
