use serde::Serialize;

use crate::viewer::{LoadStatus, Viewer};

pub const TITLE: &str = "Trip Visualizer";

/// The contents of the control panel drawn over the map. The page decides how it looks.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Panel {
    pub title: String,
    pub status: PanelStatus,
    pub lines: Vec<String>,
    pub statistics_button: String,
    /// Only when statistics are shown
    pub controls: Option<Controls>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum PanelStatus {
    Idle,
    Loading(String),
    Ready,
    Error(String),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Controls {
    pub speed_min: f64,
    pub speed_max: f64,
    pub sampling_rate: usize,
    pub weather: String,
    /// (value, label). The first is always the wildcard.
    pub weather_choices: Vec<(String, String)>,
}

impl Panel {
    pub fn new(viewer: &Viewer) -> Self {
        let status = match viewer.status() {
            LoadStatus::Idle => PanelStatus::Idle,
            LoadStatus::Loading => PanelStatus::Loading("Loading trip data...".to_string()),
            LoadStatus::Ready => PanelStatus::Ready,
            LoadStatus::Error(msg) => PanelStatus::Error(msg.clone()),
        };

        let num_trips = viewer.model().map(|m| m.trips.len()).unwrap_or(0);
        let mut lines = vec![
            format!("{} trips loaded", num_trips),
            format!("Sampling: 1 in {} data points", viewer.sampling_rate()),
        ];
        if viewer.model().is_some() {
            lines.push(format!("Data: {}", viewer.source()));
        }
        lines.push("Click on markers to see trip details".to_string());

        let statistics_button = format!(
            "{} Statistics",
            if viewer.show_statistics { "Hide" } else { "Show" }
        );

        let controls = if viewer.show_statistics {
            let mut weather_choices = vec![("all".to_string(), "All Weather".to_string())];
            if let Some(model) = viewer.model() {
                for weather in &model.weather_conditions {
                    weather_choices.push((weather.clone(), weather.clone()));
                }
            }
            Some(Controls {
                speed_min: viewer.filters.speed_min,
                speed_max: viewer.filters.speed_max,
                sampling_rate: viewer.sampling_rate().get(),
                weather: viewer.filters.weather.describe().to_string(),
                weather_choices,
            })
        } else {
            None
        };

        Self {
            title: TITLE.to_string(),
            status,
            lines,
            statistics_button,
            controls,
        }
    }
}
