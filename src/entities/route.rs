use serde::{Deserialize, Serialize};

use crate::entities::LatLng;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    /// Local time formatted as `YYYY-MM-DD HH:MM`.
    pub datetime: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Costs {
    pub time_hours: f64,
    pub distance_km: f64,
    pub fuel_lkr: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub message: String,
    pub path: Vec<String>,
    pub costs: Costs,
    #[serde(default)]
    pub coordinates: Option<Vec<Option<LatLng>>>,
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
}

impl RouteResponse {
    /// Coordinates with the holes dropped.
    pub fn lat_lngs(&self) -> Vec<LatLng> {
        self.coordinates
            .iter()
            .flatten()
            .filter_map(|c| *c)
            .collect()
    }

    pub fn warnings(&self) -> &[String] {
        self.warnings.as_deref().unwrap_or_default()
    }
}

#[test]
fn response_without_optional_fields() {
    let response: RouteResponse = serde_json::from_str(
        r#"{
            "message": "No festival event detected.",
            "path": ["colombo", "kandy"],
            "costs": {"time_hours": 1.5, "distance_km": 115.0, "fuel_lkr": 3593.75}
        }"#,
    )
    .unwrap();

    assert!(response.lat_lngs().is_empty());
    assert!(response.warnings().is_empty());
}

#[test]
fn coordinate_holes_are_filtered() {
    let response: RouteResponse = serde_json::from_str(
        r#"{
            "message": "",
            "path": ["colombo", "nowhere", "kandy"],
            "costs": {"time_hours": 0, "distance_km": 0, "fuel_lkr": 0},
            "coordinates": [[6.9271, 79.8612], null, [7.2906, 80.6337]],
            "warnings": ["Warning: road closed"]
        }"#,
    )
    .unwrap();

    assert_eq!(
        response.lat_lngs(),
        vec![LatLng::new(6.9271, 79.8612), LatLng::new(7.2906, 80.6337)]
    );
    assert_eq!(response.warnings(), ["Warning: road closed".to_string()]);
}
