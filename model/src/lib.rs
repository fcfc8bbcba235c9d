#[macro_use]
extern crate log;

pub mod describe;
mod filters;
mod ids;
mod points;
pub mod render;
pub mod style;
mod trip;

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use self::filters::{FilterState, WeatherFilter, DEFAULT_SPEED_MAX, DEFAULT_SPEED_MIN};
pub use self::ids::TripID;
pub use self::points::{parse_number, parse_timestamp, TripPoint};
pub use self::render::MapLayers;
pub use self::trip::{group_by_trip, Trip, TripStatistics};

/// Every way loading a dataset can fail. The messages are shown to the user as-is.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The detail is only logged
    #[error("Failed to parse CSV data. Please check the file format.")]
    ParseFailure(String),
    #[error("No valid trip data found. Please check the CSV file format.")]
    EmptyDataset,
    #[error("Failed to load CSV file: {0}")]
    FetchFailure(String),
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::ParseFailure(err.to_string())
    }
}

/// All of the trips from one load. Immutable once built; changing the sampling rate means loading
/// again.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Model {
    pub trips: BTreeMap<TripID, Trip>,
    pub gps_bounds: GPSBounds,
    /// Distinct non-empty labels, in the order first seen
    pub weather_conditions: Vec<String>,
    pub sampling_rate: NonZeroUsize,
}

impl Model {
    pub fn load<R: std::io::Read>(
        reader: R,
        sampling_rate: NonZeroUsize,
    ) -> Result<Self, LoadError> {
        let points = points::load(reader, sampling_rate)?;

        let mut gps_bounds = GPSBounds::new();
        let mut weather_conditions: Vec<String> = Vec::new();
        for pt in &points {
            gps_bounds.update(pt.longitude, pt.latitude);
            if let Some(ref weather) = pt.weather_condition {
                if !weather_conditions.contains(weather) {
                    weather_conditions.push(weather.clone());
                }
            }
        }

        let trips = group_by_trip(points);
        info!(
            "Loaded {} trips covering {:?}",
            trips.len(),
            gps_bounds
        );
        Ok(Self {
            trips,
            gps_bounds,
            weather_conditions,
            sampling_rate,
        })
    }

    pub fn load_str(text: &str, sampling_rate: NonZeroUsize) -> Result<Self, LoadError> {
        Self::load(text.as_bytes(), sampling_rate)
    }

    pub fn num_points(&self) -> usize {
        self.trips.values().map(|t| t.points.len()).sum()
    }

    /// Every point, trip by trip, each trip in its original order
    pub fn all_points(&self) -> impl Iterator<Item = &TripPoint> {
        self.trips.values().flat_map(|t| t.points.iter())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GPSBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl GPSBounds {
    pub fn new() -> Self {
        Self {
            min_lon: f64::MAX,
            min_lat: f64::MAX,
            max_lon: f64::MIN,
            max_lat: f64::MIN,
        }
    }

    pub fn update(&mut self, lon: f64, lat: f64) {
        self.min_lon = self.min_lon.min(lon);
        self.min_lat = self.min_lat.min(lat);
        self.max_lon = self.max_lon.max(lon);
        self.max_lat = self.max_lat.max(lat);
    }

    pub fn is_empty(&self) -> bool {
        self.min_lon > self.max_lon
    }

    /// [lat, lon]
    pub fn center(&self) -> [f64; 2] {
        if self.is_empty() {
            return [0.0, 0.0];
        }
        [
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        ]
    }
}
