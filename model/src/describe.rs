use chrono::NaiveDateTime;

use crate::{TripPoint, TripStatistics};

const MISSING: &str = "N/A";

pub fn timestamp(x: Option<NaiveDateTime>) -> String {
    match x {
        Some(t) => t.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        None => MISSING.to_string(),
    }
}

pub fn speed(x: Option<f64>) -> String {
    with_unit(x, 1, " km/h")
}

pub fn temperature(x: Option<f64>) -> String {
    with_unit(x, 1, "°C")
}

pub fn elevation(x: Option<f64>) -> String {
    with_unit(x, 0, "m")
}

pub fn humidity(x: Option<f64>) -> String {
    with_unit(x, 1, "%")
}

pub fn pressure(x: Option<f64>) -> String {
    with_unit(x, 1, " hPa")
}

pub fn weather(x: Option<&str>) -> String {
    x.unwrap_or(MISSING).to_string()
}

fn with_unit(x: Option<f64>, decimals: usize, unit: &str) -> String {
    match x {
        Some(x) => format!("{:.*}{}", decimals, x, unit),
        None => MISSING.to_string(),
    }
}

/// (label, value) pairs shown for start and end markers
pub fn conditions(pt: &TripPoint) -> Vec<(&'static str, String)> {
    vec![
        ("Time", timestamp(pt.timestamp)),
        ("Speed", speed(pt.speed_kmh)),
        ("Temperature", temperature(pt.temperature_c)),
        ("Weather", weather(pt.weather_condition.as_deref())),
        ("Elevation", elevation(pt.elevation_m)),
    ]
}

/// Individual point markers also show the optional atmospheric columns
pub fn point(pt: &TripPoint) -> Vec<(&'static str, String)> {
    let mut fields = conditions(pt);
    fields.push(("Humidity", humidity(pt.humidity_percent)));
    fields.push(("Pressure", pressure(pt.pressure_hpa)));
    fields
}

pub fn statistics(stats: &TripStatistics) -> Vec<String> {
    vec![
        format!("Max Speed: {:.1} km/h", stats.max_speed),
        format!("Avg Speed: {:.1} km/h", stats.avg_speed),
        format!(
            "Temp Range: {:.1}°C - {:.1}°C",
            stats.min_temp, stats.max_temp
        ),
        format!(
            "Elevation Range: {:.0}m - {:.0}m",
            stats.min_elevation, stats.max_elevation
        ),
        format!("Duration: {} minutes", stats.duration_minutes()),
    ]
}
