use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Static version tag sent with every feed, used by clients for compatibility checks.
pub const API_VERSION: &str = "1";

pub const MIN_LOCATIONS: i32 = 1;
pub const MAX_LOCATIONS: i32 = 6;

// coordinates are drawn from [-BOUND, BOUND], inclusive
pub const LATITUDE_BOUND: i32 = 45;
pub const LONGITUDE_BOUND: i32 = 90;

/// The only capability the feed needs from a random number generator:
/// an integer in the closed range `[low, high]`.
pub trait CoordinateSource {
    /// # Panics
    ///
    /// Implementations may panic when `low > high`; both provided ones do.
    fn next_in_range(&mut self, low: i32, high: i32) -> i32;
}

// a source answering out of range must not break the feed invariants
fn draw<S: CoordinateSource + ?Sized>(source: &mut S, low: i32, high: i32) -> i32 {
    source.next_in_range(low, high).clamp(low, high)
}

impl<R: Rng> CoordinateSource for R {
    fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        self.random_range(low..=high)
    }
}

/// Replays a fixed sequence of draws, so a feed can be reproduced exactly.
/// Values outside the requested range are clamped into it and an exhausted
/// script keeps answering `low`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    values: VecDeque<i32>,
}

impl ScriptedSource {
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl CoordinateSource for ScriptedSource {
    fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        match self.values.pop_front() {
            Some(value) => value.clamp(low, high),
            None => low,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationRecord {
    pub id: u32,
    pub latitude: i32,
    pub longitude: i32,
}

impl LocationRecord {
    // latitude is always drawn before longitude
    fn generate<S: CoordinateSource + ?Sized>(id: u32, source: &mut S) -> Self {
        let latitude = draw(source, -LATITUDE_BOUND, LATITUDE_BOUND);
        let longitude = draw(source, -LONGITUDE_BOUND, LONGITUDE_BOUND);
        Self {
            id,
            latitude,
            longitude,
        }
    }
}

/// The response envelope: a version tag and 1 to 6 synthetic locations whose
/// ids are `0..len` in order. Built fresh for every request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LocationFeed {
    pub api_version: String,
    pub locations: Vec<LocationRecord>,
}

impl LocationFeed {
    pub fn generate<S: CoordinateSource + ?Sized>(source: &mut S) -> Self {
        let count = draw(source, MIN_LOCATIONS, MAX_LOCATIONS);
        let mut locations = Vec::with_capacity(count as usize);
        for id in 0..count as u32 {
            locations.push(LocationRecord::generate(id, source));
        }
        Self {
            api_version: API_VERSION.to_string(),
            locations,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
