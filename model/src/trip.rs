use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{TripID, TripPoint};

/// All points sharing one trip ID, in the order they appeared in the input. The input is assumed
/// to be chronological already; nothing is re-sorted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripID,
    pub points: Vec<TripPoint>,
}

/// Summarizes every point in a trip, regardless of any filters. Metrics with no valid samples are
/// 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripStatistics {
    pub max_speed: f64,
    pub avg_speed: f64,
    pub min_temp: f64,
    pub max_temp: f64,
    pub min_elevation: f64,
    pub max_elevation: f64,
    /// Last timestamp minus first. Not clamped, so out-of-order input yields a negative value.
    pub duration_ms: i64,
}

impl TripStatistics {
    /// Rounded half-up
    pub fn duration_minutes(&self) -> i64 {
        (self.duration_ms as f64 / 60_000.0 + 0.5).floor() as i64
    }
}

pub fn group_by_trip(points: Vec<TripPoint>) -> BTreeMap<TripID, Trip> {
    let mut trips: BTreeMap<TripID, Trip> = BTreeMap::new();
    for pt in points {
        trips
            .entry(pt.trip.clone())
            .or_insert_with(|| Trip {
                id: pt.trip.clone(),
                points: Vec::new(),
            })
            .push(pt);
    }
    trips
}

impl Trip {
    fn push(&mut self, pt: TripPoint) {
        self.points.push(pt);
    }

    pub fn first(&self) -> Option<&TripPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TripPoint> {
        self.points.last()
    }

    pub fn statistics(&self) -> TripStatistics {
        let speed = Summary::new(self.points.iter().filter_map(|pt| pt.speed_kmh));
        let temp = Summary::new(self.points.iter().filter_map(|pt| pt.temperature_c));
        let elevation = Summary::new(self.points.iter().filter_map(|pt| pt.elevation_m));

        TripStatistics {
            max_speed: speed.max,
            avg_speed: speed.mean(),
            min_temp: temp.min,
            max_temp: temp.max,
            min_elevation: elevation.min,
            max_elevation: elevation.max,
            duration_ms: self.duration_ms(),
        }
    }

    fn duration_ms(&self) -> i64 {
        if self.points.len() < 2 {
            return 0;
        }
        match (
            self.first().and_then(|pt| pt.timestamp),
            self.last().and_then(|pt| pt.timestamp),
        ) {
            (Some(t1), Some(t2)) => (t2 - t1).num_milliseconds(),
            _ => 0,
        }
    }
}

struct Summary {
    min: f64,
    max: f64,
    sum: f64,
    count: usize,
}

impl Summary {
    fn new<I: Iterator<Item = f64>>(values: I) -> Self {
        let mut summary = Self {
            min: 0.0,
            max: 0.0,
            sum: 0.0,
            count: 0,
        };
        for x in values {
            if summary.count == 0 {
                summary.min = x;
                summary.max = x;
            } else {
                summary.min = summary.min.min(x);
                summary.max = summary.max.max(x);
            }
            summary.sum += x;
            summary.count += 1;
        }
        summary
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}
