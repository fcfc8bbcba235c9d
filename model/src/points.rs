use std::io::Read;
use std::num::NonZeroUsize;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{LoadError, TripID};

/// One validated sample. Coordinates are always finite; everything else is optional and absent
/// if the input didn't parse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripPoint {
    pub trip: TripID,
    pub timestamp: Option<NaiveDateTime>,
    pub longitude: f64,
    pub latitude: f64,
    pub speed_kmh: Option<f64>,
    pub temperature_c: Option<f64>,
    pub weather_condition: Option<String>,
    pub elevation_m: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub pressure_hpa: Option<f64>,
}

impl TripPoint {
    /// In the order the map library expects
    pub fn lat_lon(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}

/// Every input needs these headers. Rows may still leave them blank.
pub const REQUIRED_COLUMNS: [&str; 4] = ["trip", "timestamp", "longitude", "latitude"];

/// Reads every data row, keeping one in `sampling_rate` of them, and drops rows without usable
/// coordinates. Rows may be shorter or longer than the header; they're judged on what they have.
/// Only a broken header or bad encoding fails the whole load.
pub fn load<R: Read>(reader: R, sampling_rate: NonZeroUsize) -> Result<Vec<TripPoint>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    if !headers.is_empty() {
        for col in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == col) {
                return Err(LoadError::ParseFailure(format!("missing the {col} column")));
            }
        }
    }

    let mut points = Vec::new();
    let mut rows = 0;
    let mut dropped = 0;
    for (idx, rec) in rdr.records().enumerate() {
        let rec = rec?;
        rows += 1;
        if idx % sampling_rate.get() != 0 {
            continue;
        }
        let pt = match rec.deserialize::<Record>(Some(&headers)) {
            Ok(rec) => rec.validate(),
            Err(err) => {
                debug!("Row {} is malformed: {}", idx + 1, err);
                None
            }
        };
        match pt {
            Some(pt) => points.push(pt),
            None => {
                dropped += 1;
                debug!("Dropping row {} without a trip and valid coordinates", idx + 1);
            }
        }
    }
    info!(
        "Read {} rows, sampled 1 in {}, kept {} valid points ({} dropped)",
        rows,
        sampling_rate,
        points.len(),
        dropped
    );

    if points.is_empty() {
        return Err(LoadError::EmptyDataset);
    }
    Ok(points)
}

/// Every column is optional here, since short rows just end early.
#[derive(Deserialize)]
struct Record {
    trip: Option<String>,
    timestamp: Option<String>,
    longitude: Option<String>,
    latitude: Option<String>,
    speed_kmh: Option<String>,
    temperature_c: Option<String>,
    weather_condition: Option<String>,
    elevation_m: Option<String>,
    humidity_percent: Option<String>,
    pressure_hpa: Option<String>,
}

impl Record {
    fn validate(self) -> Option<TripPoint> {
        let longitude = self.longitude.as_deref().and_then(parse_number)?;
        let latitude = self.latitude.as_deref().and_then(parse_number)?;
        Some(TripPoint {
            trip: TripID::new(self.trip?),
            timestamp: self.timestamp.as_deref().and_then(parse_timestamp),
            longitude,
            latitude,
            speed_kmh: self.speed_kmh.as_deref().and_then(parse_number),
            temperature_c: self.temperature_c.as_deref().and_then(parse_number),
            weather_condition: self.weather_condition.filter(|x| !x.is_empty()),
            elevation_m: self.elevation_m.as_deref().and_then(parse_number),
            humidity_percent: self.humidity_percent.as_deref().and_then(parse_number),
            pressure_hpa: self.pressure_hpa.as_deref().and_then(parse_number),
        })
    }
}

/// Empty, garbage, NaN, and infinite values are all absent
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|x| x.is_finite())
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(x) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(x);
        }
    }
    if let Ok(x) = DateTime::parse_from_rfc3339(raw) {
        return Some(x.naive_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
