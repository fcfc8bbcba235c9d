use std::num::NonZeroUsize;

use model::{LoadError, Model, TripID};

const MIXED: &str = include_str!("data/mixed_trips.csv");

fn every_row() -> NonZeroUsize {
    NonZeroUsize::new(1).unwrap()
}

#[test]
fn load_mixed_trips() {
    let model = Model::load_str(MIXED, every_row()).unwrap();

    // One of the 8 rows has no longitude
    assert_eq!(model.num_points(), 7);
    let ids: Vec<&str> = model.trips.keys().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "10"]);
    assert!(!model.trips.contains_key(&TripID::new("3")));
    assert_eq!(
        model.weather_conditions,
        vec!["Sunny".to_string(), "Cloudy".to_string(), "Rain".to_string()]
    );

    let center = model.gps_bounds.center();
    assert!((center[0] - 34.175).abs() < 1e-9);
    assert!((center[1] - -118.40).abs() < 1e-9);
}

#[test]
fn optional_columns_are_coerced_once() {
    let model = Model::load_str(MIXED, every_row()).unwrap();
    let trip = &model.trips[&TripID::new("2")];

    let first = &trip.points[0];
    assert_eq!(first.speed_kmh, Some(10.0));
    assert_eq!(first.humidity_percent, Some(40.0));
    assert_eq!(first.pressure_hpa, Some(1013.2));
    assert!(first.timestamp.is_some());

    // An empty speed is absent, but the point is still part of the trip
    assert_eq!(trip.points[1].speed_kmh, None);
    assert_eq!(trip.points.len(), 3);

    let no_humidity = &model.trips[&TripID::new("1")].points[0];
    assert_eq!(no_humidity.humidity_percent, None);
    assert_eq!(no_humidity.pressure_hpa, None);
}

#[test]
fn atmospheric_columns_are_optional() {
    let csv = "trip,timestamp,longitude,latitude,speed_kmh,temperature_c,weather_condition,elevation_m\n\
               0,2025-07-27 09:22:26,-118.5,34.1,,27.4,Partly Cloudy,264.0\n";
    let model = Model::load_str(csv, every_row()).unwrap();
    let pt = model.all_points().next().unwrap();
    assert_eq!(pt.humidity_percent, None);
    assert_eq!(pt.speed_kmh, None);
    assert_eq!(pt.weather_condition.as_deref(), Some("Partly Cloudy"));
}

#[test]
fn blank_lines_are_skipped() {
    let csv = "trip,timestamp,longitude,latitude\n\n0,2025-07-27 09:22:26,-118.5,34.1\n\n";
    let model = Model::load_str(csv, every_row()).unwrap();
    assert_eq!(model.num_points(), 1);
}

#[test]
fn header_only_is_empty() {
    let csv = "trip,timestamp,longitude,latitude,speed_kmh,temperature_c,weather_condition,elevation_m\n";
    let err = Model::load_str(csv, every_row()).unwrap_err();
    assert!(matches!(err, LoadError::EmptyDataset));
    assert_eq!(
        err.to_string(),
        "No valid trip data found. Please check the CSV file format."
    );
}

#[test]
fn no_valid_coordinates_is_empty() {
    let csv = "trip,timestamp,longitude,latitude\n0,2025-07-27 09:22:26,,34.1\n1,2025-07-27 09:22:27,west,north\n";
    let err = Model::load_str(csv, every_row()).unwrap_err();
    assert!(matches!(err, LoadError::EmptyDataset));
}

#[test]
fn ragged_rows_are_dropped_alone() {
    let csv = "trip,timestamp,longitude,latitude,speed_kmh\n\
               0,2025-07-27 09:22:26,-118.5,34.1,12\n\
               0,2025-07-27 09:22:27,-118.6,34.2,14\n\
               1,2025-07-27 09:00\n";
    let model = Model::load_str(csv, every_row()).unwrap();
    assert_eq!(model.num_points(), 2);
    assert_eq!(model.trips.len(), 1);
    assert!(!model.trips.contains_key(&TripID::new("1")));
}

#[test]
fn short_and_long_rows_keep_what_they_have() {
    let csv = "trip,timestamp,longitude,latitude,speed_kmh,temperature_c\n\
               4,2025-07-27 09:00:00,-118.5,34.1\n\
               4,2025-07-27 09:01:00,-118.6,34.2,30,21.5,extra,cells\n";
    let model = Model::load_str(csv, every_row()).unwrap();
    let trip = &model.trips[&TripID::new("4")];
    assert_eq!(trip.points.len(), 2);
    assert_eq!(trip.points[0].speed_kmh, None);
    assert_eq!(trip.points[0].temperature_c, None);
    assert_eq!(trip.points[1].speed_kmh, Some(30.0));
    assert_eq!(trip.points[1].temperature_c, Some(21.5));
}

#[test]
fn rows_without_a_trip_are_dropped() {
    let csv = "trip,timestamp,longitude,latitude\n\
               ,2025-07-27 09:00:00,-118.5,34.1\n\
               5,2025-07-27 09:00:00,-118.5,34.1\n";
    let model = Model::load_str(csv, every_row()).unwrap();
    assert_eq!(model.num_points(), 1);
    assert!(model.trips.contains_key(&TripID::new("5")));
}

#[test]
fn only_ragged_rows_is_empty() {
    let csv = "trip,timestamp,longitude,latitude\n1,2,3\n";
    let err = Model::load_str(csv, every_row()).unwrap_err();
    assert!(matches!(err, LoadError::EmptyDataset));
}

#[test]
fn missing_coordinate_columns_fail_to_parse() {
    let csv = "vehicle,time,x,y\nA,09:00,1,2\n";
    let err = Model::load_str(csv, every_row()).unwrap_err();
    assert!(matches!(err, LoadError::ParseFailure(_)));
    assert_eq!(
        err.to_string(),
        "Failed to parse CSV data. Please check the file format."
    );

    // Even one missing required header is enough
    let csv = "trip,longitude,latitude\n1,-118.5,34.1\n";
    let err = Model::load_str(csv, every_row()).unwrap_err();
    assert!(matches!(err, LoadError::ParseFailure(_)));
}

#[test]
fn invalid_utf8_fails_to_parse() {
    let mut bytes = b"trip,timestamp,longitude,latitude\n".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe, b',', b'x', b',', b'1', b',', b'2', b'\n']);
    let err = Model::load(bytes.as_slice(), every_row()).unwrap_err();
    assert!(matches!(err, LoadError::ParseFailure(_)));
}

#[test]
fn sampling_keeps_every_nth_row() {
    let model = Model::load_str(MIXED, NonZeroUsize::new(2).unwrap()).unwrap();
    // Rows 0, 2, 4, 6 are kept; row 4 has no longitude
    assert_eq!(model.num_points(), 3);
    assert_eq!(model.sampling_rate.get(), 2);
    let trip_2 = &model.trips[&TripID::new("2")];
    assert_eq!(trip_2.points.len(), 2);
    assert_eq!(trip_2.points[1].speed_kmh, None);

    // A rate larger than the dataset keeps only the first row
    let model = Model::load_str(MIXED, NonZeroUsize::new(100).unwrap()).unwrap();
    assert_eq!(model.num_points(), 1);
}
