use std::num::NonZeroUsize;

use model::render::MapLayers;
use model::style::SpeedSeverity;
use model::{FilterState, Model, WeatherFilter};

const MIXED: &str = include_str!("data/mixed_trips.csv");

fn load() -> Model {
    Model::load_str(MIXED, NonZeroUsize::new(1).unwrap()).unwrap()
}

#[test]
fn default_filters_draw_every_trip_with_a_speed() {
    let layers = MapLayers::new(&load(), &FilterState::default(), false);
    assert_eq!(layers.trips_loaded, 3);
    assert_eq!(layers.zoom, 10);
    let ids: Vec<&str> = layers.trips.iter().map(|t| t.trip.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "10"]);

    let trip_2 = &layers.trips[1];
    assert_eq!(trip_2.color, "#45B7D1");
    // The path ignores filters, but the point without a speed gets no marker
    assert_eq!(trip_2.path.len(), 3);
    assert_eq!(trip_2.path[0], [34.05, -118.30]);
    assert_eq!(trip_2.markers.len(), 2);
    assert_eq!(trip_2.markers[0].severity, SpeedSeverity::Low);
    assert_eq!(trip_2.markers[1].severity, SpeedSeverity::Medium);
    assert_eq!(trip_2.markers[1].color, "#FF9800");
    assert_eq!(trip_2.markers[1].popup.title, "Trip 2 - Point 2");

    assert_eq!(trip_2.start.position, [34.05, -118.30]);
    assert_eq!(trip_2.start.color, "#45B7D1");
    assert_eq!(trip_2.start.popup.title, "Trip 2 - Start");
    assert!(trip_2.start.popup.statistics.is_none());
    let end = trip_2.end.as_ref().unwrap();
    assert_eq!(end.position, [34.07, -118.32]);
    assert_eq!(end.popup.title, "Trip 2 - End");
}

#[test]
fn trips_with_nothing_left_are_skipped_but_counted() {
    let filters = FilterState {
        speed_min: 20.0,
        speed_max: 60.0,
        weather: WeatherFilter::All,
    };
    let layers = MapLayers::new(&load(), &filters, false);
    assert_eq!(layers.trips_loaded, 3);
    let ids: Vec<&str> = layers.trips.iter().map(|t| t.trip.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);

    // Only one point passed, so there's a start marker and no end
    let trip_1 = &layers.trips[0];
    assert_eq!(trip_1.markers.len(), 1);
    assert_eq!(trip_1.start.position, [34.11, -118.41]);
    assert!(trip_1.end.is_none());
    assert_eq!(layers.num_markers(), 2);
}

#[test]
fn weather_filter() {
    let filters = FilterState {
        weather: WeatherFilter::Exactly("Sunny".to_string()),
        ..Default::default()
    };
    let layers = MapLayers::new(&load(), &filters, false);
    let ids: Vec<&str> = layers.trips.iter().map(|t| t.trip.as_str()).collect();
    assert_eq!(ids, vec!["2", "10"]);
    assert_eq!(layers.trips[1].markers[0].severity, SpeedSeverity::High);
}

#[test]
fn popups() {
    let layers = MapLayers::new(&load(), &FilterState::default(), false);
    let popup = &layers.trips[1].markers[0].popup;
    let fields: Vec<(&str, &str)> = popup
        .fields
        .iter()
        .map(|f| (f.label.as_str(), f.value.as_str()))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("Time", "7/27/2025, 8:00:00 AM"),
            ("Speed", "10.0 km/h"),
            ("Temperature", "20.5°C"),
            ("Weather", "Sunny"),
            ("Elevation", "100m"),
            ("Humidity", "40.0%"),
            ("Pressure", "1013.2 hPa"),
        ]
    );

    // Endpoints don't show humidity or pressure
    assert_eq!(layers.trips[1].start.popup.fields.len(), 5);

    let missing = &layers.trips[2].markers[0].popup;
    assert_eq!(missing.fields[5].value, "N/A");
    assert_eq!(missing.fields[6].value, "N/A");
}

#[test]
fn statistics_attach_to_the_start_marker() {
    let layers = MapLayers::new(&load(), &FilterState::default(), true);
    let stats = layers.trips[1].start.popup.statistics.as_ref().unwrap();
    assert_eq!(stats.values.avg_speed, 20.0);
    assert_eq!(
        stats.lines,
        vec![
            "Max Speed: 30.0 km/h".to_string(),
            "Avg Speed: 20.0 km/h".to_string(),
            "Temp Range: 20.5°C - 22.5°C".to_string(),
            "Elevation Range: 95m - 110m".to_string(),
            "Duration: 20 minutes".to_string(),
        ]
    );
    assert!(layers.trips[1].end.as_ref().unwrap().popup.statistics.is_none());
    assert!(layers.trips[1].markers[0].popup.statistics.is_none());
}

#[test]
fn geojson_export() {
    let filters = FilterState {
        speed_min: 20.0,
        speed_max: 60.0,
        weather: WeatherFilter::All,
    };
    let layers = MapLayers::new(&load(), &filters, true);
    let gj = match layers.to_geojson() {
        geojson::GeoJson::FeatureCollection(fc) => fc,
        _ => panic!("expected a FeatureCollection"),
    };
    // Per trip: a path, one point marker, a start marker
    assert_eq!(gj.features.len(), 6);

    let path = &gj.features[0];
    assert_eq!(path.property("type").unwrap(), "path");
    assert_eq!(path.property("trip").unwrap(), "1");
    match &path.geometry.as_ref().unwrap().value {
        geojson::Value::LineString(pts) => {
            assert_eq!(pts.len(), 3);
            assert_eq!(pts[0], vec![-118.40, 34.10]);
        }
        _ => panic!("path should be a LineString"),
    }

    let start = &gj.features[2];
    assert_eq!(start.property("type").unwrap(), "start");
    assert!(start.property("statistics").is_some());

    let text = layers.to_geojson_string().unwrap();
    assert!(text.contains("FeatureCollection"));
}
