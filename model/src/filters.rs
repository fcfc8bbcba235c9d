use serde::{Deserialize, Serialize};

use crate::TripPoint;

pub const DEFAULT_SPEED_MIN: f64 = 0.0;
pub const DEFAULT_SPEED_MAX: f64 = 200.0;

/// Decides which points are drawn. Filtering never changes what a trip's statistics are computed
/// from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Inclusive
    pub speed_min: f64,
    /// Inclusive
    pub speed_max: f64,
    pub weather: WeatherFilter,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherFilter {
    All,
    Exactly(String),
}

impl WeatherFilter {
    /// "all" is the wildcard, anything else is an exact label
    pub fn parse(raw: &str) -> Self {
        if raw == "all" {
            WeatherFilter::All
        } else {
            WeatherFilter::Exactly(raw.to_string())
        }
    }

    pub fn matches(&self, weather: Option<&str>) -> bool {
        match self {
            WeatherFilter::All => true,
            WeatherFilter::Exactly(x) => weather == Some(x.as_str()),
        }
    }

    pub fn describe(&self) -> &str {
        match self {
            WeatherFilter::All => "all",
            WeatherFilter::Exactly(x) => x,
        }
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            speed_min: DEFAULT_SPEED_MIN,
            speed_max: DEFAULT_SPEED_MAX,
            weather: WeatherFilter::All,
        }
    }
}

impl FilterState {
    /// Points without a speed never pass.
    pub fn matches(&self, pt: &TripPoint) -> bool {
        let speed_ok = pt
            .speed_kmh
            .map(|speed| speed >= self.speed_min && speed <= self.speed_max)
            .unwrap_or(false);
        speed_ok && self.weather.matches(pt.weather_condition.as_deref())
    }

    pub fn apply<'a, I: IntoIterator<Item = &'a TripPoint>>(&self, points: I) -> Vec<&'a TripPoint> {
        points.into_iter().filter(|pt| self.matches(pt)).collect()
    }
}
