use location_feed::location_feed::{
    API_VERSION, LATITUDE_BOUND, LONGITUDE_BOUND, MAX_LOCATIONS, MIN_LOCATIONS,
};
use location_feed::LocationFeed;

pub fn assert_feed_invariants(feed: &LocationFeed) {
    assert_eq!(feed.api_version, API_VERSION);

    let len = feed.locations.len() as i32;
    assert!(
        (MIN_LOCATIONS..=MAX_LOCATIONS).contains(&len),
        "unexpected number of locations: {len}"
    );

    for (index, record) in feed.locations.iter().enumerate() {
        assert_eq!(record.id as usize, index);
        assert!(
            (-LATITUDE_BOUND..=LATITUDE_BOUND).contains(&record.latitude),
            "latitude out of range: {record:?}"
        );
        assert!(
            (-LONGITUDE_BOUND..=LONGITUDE_BOUND).contains(&record.longitude),
            "longitude out of range: {record:?}"
        );
    }
}

#[allow(dead_code)]
pub fn parse_feed(body: &[u8]) -> LocationFeed {
    serde_json::from_slice(body).expect("body is not a location feed")
}
