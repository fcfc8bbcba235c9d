use serde::{Deserialize, Serialize};

use crate::TripID;

pub const TRIP_PALETTE: [&str; 10] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
    "#BB8FCE", "#85C1E9",
];

/// What the map library draws paths with when it isn't told otherwise
pub const DEFAULT_PATH_COLOR: &str = "#3388ff";

/// Trips are colored by the integer their ID starts with
pub fn trip_color(id: &TripID) -> &'static str {
    match id.leading_integer() {
        Some(n) => TRIP_PALETTE[n.rem_euclid(TRIP_PALETTE.len() as i64) as usize],
        None => DEFAULT_PATH_COLOR,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedSeverity {
    Unknown,
    Low,
    Medium,
    High,
}

impl SpeedSeverity {
    pub fn classify(speed_kmh: Option<f64>) -> Self {
        match speed_kmh {
            None => SpeedSeverity::Unknown,
            Some(x) if x < 20.0 => SpeedSeverity::Low,
            Some(x) if x < 60.0 => SpeedSeverity::Medium,
            Some(_) => SpeedSeverity::High,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            SpeedSeverity::Unknown => "#ccc",
            SpeedSeverity::Low => "#4CAF50",
            SpeedSeverity::Medium => "#FF9800",
            SpeedSeverity::High => "#F44336",
        }
    }
}
