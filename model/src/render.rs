//! Everything the map library needs to draw, prepared up front. Nothing here touches the map
//! itself.

use anyhow::Result;
use geojson::{Feature, FeatureCollection, GeoJson};
use serde::{Deserialize, Serialize};

use crate::style::{trip_color, SpeedSeverity};
use crate::{describe, FilterState, Model, Trip, TripID, TripPoint, TripStatistics};

pub const INITIAL_ZOOM: u8 = 10;
pub const PATH_WEIGHT: f64 = 3.0;
pub const PATH_OPACITY: f64 = 0.7;
pub const POINT_RADIUS: f64 = 3.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapLayers {
    /// [lat, lon]
    pub center: [f64; 2],
    pub zoom: u8,
    /// Includes trips with nothing left to draw after filtering
    pub trips_loaded: usize,
    pub trips: Vec<TripLayer>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripLayer {
    pub trip: TripID,
    pub color: String,
    /// Every point in the trip, ignoring filters, as [lat, lon]
    pub path: Vec<[f64; 2]>,
    pub markers: Vec<PointMarker>,
    pub start: EndpointMarker,
    /// Only present when more than one point passed the filters
    pub end: Option<EndpointMarker>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointMarker {
    pub position: [f64; 2],
    pub severity: SpeedSeverity,
    pub color: String,
    pub popup: Popup,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EndpointMarker {
    pub position: [f64; 2],
    pub color: String,
    pub popup: Popup,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    pub title: String,
    pub fields: Vec<PopupField>,
    /// Only on the start marker, and only when statistics are shown
    pub statistics: Option<PopupStatistics>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopupField {
    pub label: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopupStatistics {
    pub values: TripStatistics,
    pub lines: Vec<String>,
}

impl MapLayers {
    pub fn new(model: &Model, filters: &FilterState, show_statistics: bool) -> Self {
        let trips = model
            .trips
            .values()
            .filter_map(|trip| TripLayer::new(trip, filters, show_statistics))
            .collect::<Vec<_>>();
        debug!(
            "Prepared {} of {} trips for drawing",
            trips.len(),
            model.trips.len()
        );
        Self {
            center: model.gps_bounds.center(),
            zoom: INITIAL_ZOOM,
            trips_loaded: model.trips.len(),
            trips,
        }
    }

    pub fn num_markers(&self) -> usize {
        self.trips.iter().map(|t| t.markers.len()).sum()
    }

    pub fn to_geojson(&self) -> GeoJson {
        let mut features = Vec::new();
        for layer in &self.trips {
            let mut feature = Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::LineString(
                    layer.path.iter().map(|[lat, lon]| vec![*lon, *lat]).collect(),
                ))),
                id: None,
                properties: None,
                foreign_members: None,
            };
            feature.set_property("type", "path");
            feature.set_property("trip", layer.trip.as_str());
            feature.set_property("color", layer.color.clone());
            feature.set_property("weight", PATH_WEIGHT);
            feature.set_property("opacity", PATH_OPACITY);
            features.push(feature);

            for marker in &layer.markers {
                let mut feature = point_feature(marker.position, &marker.popup);
                feature.set_property("type", "point");
                feature.set_property("trip", layer.trip.as_str());
                feature.set_property("color", marker.color.clone());
                feature.set_property("radius", POINT_RADIUS);
                features.push(feature);
            }

            let endpoints = std::iter::once(("start", &layer.start))
                .chain(layer.end.as_ref().map(|end| ("end", end)));
            for (kind, marker) in endpoints {
                let mut feature = point_feature(marker.position, &marker.popup);
                feature.set_property("type", kind);
                feature.set_property("trip", layer.trip.as_str());
                feature.set_property("color", marker.color.clone());
                features.push(feature);
            }
        }

        GeoJson::FeatureCollection(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_geojson())?)
    }
}

fn point_feature(position: [f64; 2], popup: &Popup) -> Feature {
    let mut feature = Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
            position[1],
            position[0],
        ]))),
        id: None,
        properties: None,
        foreign_members: None,
    };
    feature.set_property("title", popup.title.clone());
    for field in &popup.fields {
        feature.set_property(field.label.to_lowercase(), field.value.clone());
    }
    if let Some(ref stats) = popup.statistics {
        feature.set_property("statistics", stats.lines.clone());
    }
    feature
}

impl TripLayer {
    /// None if nothing in the trip passes the filters
    pub fn new(trip: &Trip, filters: &FilterState, show_statistics: bool) -> Option<Self> {
        let filtered = filters.apply(&trip.points);
        let first = *filtered.first()?;
        let color = trip_color(&trip.id).to_string();

        let markers = filtered
            .iter()
            .enumerate()
            .map(|(idx, pt)| {
                let severity = SpeedSeverity::classify(pt.speed_kmh);
                PointMarker {
                    position: pt.lat_lon(),
                    severity,
                    color: severity.color().to_string(),
                    popup: Popup {
                        title: format!("Trip {} - Point {}", trip.id, idx + 1),
                        fields: fields(describe::point(pt)),
                        statistics: None,
                    },
                }
            })
            .collect();

        let statistics = if show_statistics {
            let values = trip.statistics();
            Some(PopupStatistics {
                lines: describe::statistics(&values),
                values,
            })
        } else {
            None
        };
        let start = endpoint(&trip.id, "Start", first, &color, statistics);
        let end = if filtered.len() > 1 {
            filtered
                .last()
                .map(|pt| endpoint(&trip.id, "End", pt, &color, None))
        } else {
            None
        };

        Some(Self {
            trip: trip.id.clone(),
            path: trip.points.iter().map(|pt| pt.lat_lon()).collect(),
            markers,
            start,
            end,
            color,
        })
    }
}

fn endpoint(
    id: &TripID,
    label: &str,
    pt: &TripPoint,
    color: &str,
    statistics: Option<PopupStatistics>,
) -> EndpointMarker {
    EndpointMarker {
        position: pt.lat_lon(),
        color: color.to_string(),
        popup: Popup {
            title: format!("Trip {} - {}", id, label),
            fields: fields(describe::conditions(pt)),
            statistics,
        },
    }
}

fn fields(pairs: Vec<(&'static str, String)>) -> Vec<PopupField> {
    pairs
        .into_iter()
        .map(|(label, value)| PopupField {
            label: label.to_string(),
            value,
        })
        .collect()
}
