use geo_types::{Coord, LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry};

use crate::entities::{LatLng, LatLngBounds};

pub const INITIAL_CENTER: LatLng = LatLng {
    lat: 7.8731,
    lng: 80.7718,
};
pub const INITIAL_ZOOM: u8 = 8;
pub const BOUNDS_PADDING: f64 = 0.1;

pub const TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[derive(Clone, Debug, PartialEq)]
pub enum Viewport {
    Center { center: LatLng, zoom: u8 },
    Bounds(LatLngBounds),
}

impl Default for Viewport {
    fn default() -> Self {
        Self::Center {
            center: INITIAL_CENTER,
            zoom: INITIAL_ZOOM,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TileLayer {
    pub url_template: &'static str,
    pub attribution: &'static str,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: TILE_URL_TEMPLATE,
            attribution: TILE_ATTRIBUTION,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PolylineStyle {
    pub color: &'static str,
    pub weight: u32,
}

pub const ROUTE_LINE: PolylineStyle = PolylineStyle {
    color: "#FFD700",
    weight: 5,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub points: Vec<LatLng>,
    pub style: PolylineStyle,
}

impl Polyline {
    pub fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(self.points.iter().copied())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerRole {
    Start,
    Goal,
    Intermediate,
}

impl MarkerRole {
    pub fn for_index(index: usize, len: usize) -> Self {
        if index == 0 {
            Self::Start
        } else if index + 1 == len {
            Self::Goal
        } else {
            Self::Intermediate
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Goal => "goal",
            Self::Intermediate => "intermediate",
        }
    }

    pub fn style(&self) -> CircleMarkerStyle {
        let (fill_color, radius) = match self {
            Self::Start => ("#28a745", 8),
            Self::Goal => ("#dc3545", 8),
            Self::Intermediate => ("#007bff", 6),
        };

        CircleMarkerStyle {
            radius,
            fill_color,
            fill_opacity: 0.9,
            stroke: true,
            color: "#ffffff",
            weight: 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CircleMarkerStyle {
    pub radius: u32,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub stroke: bool,
    pub color: &'static str,
    pub weight: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CircleMarker {
    pub position: LatLng,
    pub role: MarkerRole,
    pub style: CircleMarkerStyle,
    pub popup: String,
}

/// Drawing surface for the displayed route.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayLayer {
    polylines: Vec<Polyline>,
    markers: Vec<CircleMarker>,
}

impl OverlayLayer {
    pub fn add_polyline(&mut self, polyline: Polyline) {
        self.polylines.push(polyline);
    }

    pub fn add_marker(&mut self, marker: CircleMarker) {
        self.markers.push(marker);
    }

    pub fn clear(&mut self) {
        self.polylines.clear();
        self.markers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty() && self.markers.is_empty()
    }

    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    pub fn markers(&self) -> &[CircleMarker] {
        &self.markers
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapView {
    pub viewport: Viewport,
    pub tiles: TileLayer,
    pub overlay: OverlayLayer,
}

impl MapView {
    pub fn fit_bounds(&mut self, bounds: LatLngBounds) {
        self.viewport = Viewport::Bounds(bounds);
    }

    pub fn to_geojson(&self) -> FeatureCollection {
        let mut features = Vec::new();

        for polyline in self.overlay.polylines() {
            let line: LineString<f64> = polyline
                .points
                .iter()
                .map(|p| Coord::from(*p))
                .collect::<Vec<_>>()
                .into();

            let mut f = Feature::from(Geometry::from(&line));
            f.set_property("kind", "route");
            f.set_property("color", polyline.style.color);
            f.set_property("weight", polyline.style.weight);
            features.push(f);
        }

        for marker in self.overlay.markers() {
            let point = Point::from(Coord::from(marker.position));

            let mut f = Feature::from(Geometry::from(&point));
            f.set_property("kind", "marker");
            f.set_property("role", marker.role.name());
            f.set_property("radius", marker.style.radius);
            f.set_property("fillColor", marker.style.fill_color);
            f.set_property("fillOpacity", marker.style.fill_opacity);
            f.set_property("stroke", marker.style.stroke);
            f.set_property("color", marker.style.color);
            f.set_property("weight", marker.style.weight);
            f.set_property("popup", marker.popup.as_str());
            features.push(f);
        }

        let bbox = match &self.viewport {
            Viewport::Bounds(bounds) => Some(bounds.to_bbox()),
            Viewport::Center { .. } => None,
        };

        FeatureCollection {
            bbox,
            features,
            foreign_members: None,
        }
    }
}

#[cfg(test)]
fn sample_overlay() -> MapView {
    let points = vec![LatLng::new(6.9271, 79.8612), LatLng::new(7.2906, 80.6337)];
    let mut map = MapView::default();

    map.overlay.add_polyline(Polyline {
        points: points.clone(),
        style: ROUTE_LINE,
    });
    for (i, p) in points.iter().enumerate() {
        let role = MarkerRole::for_index(i, points.len());
        map.overlay.add_marker(CircleMarker {
            position: *p,
            role,
            style: role.style(),
            popup: format!("{}. City", i + 1),
        });
    }
    map
}

#[test]
fn starts_centered_on_initial_view() {
    let map = MapView::default();

    assert_eq!(
        map.viewport,
        Viewport::Center {
            center: LatLng::new(7.8731, 80.7718),
            zoom: 8
        }
    );
    assert!(map.overlay.is_empty());
}

#[test]
fn marker_roles_by_position() {
    assert_eq!(MarkerRole::for_index(0, 3), MarkerRole::Start);
    assert_eq!(MarkerRole::for_index(1, 3), MarkerRole::Intermediate);
    assert_eq!(MarkerRole::for_index(2, 3), MarkerRole::Goal);

    assert_eq!(MarkerRole::Intermediate.style().radius, 6);
    assert_ne!(
        MarkerRole::Start.style().fill_color,
        MarkerRole::Goal.style().fill_color
    );
}

#[test]
fn clear_removes_everything() {
    let mut map = sample_overlay();
    assert!(!map.overlay.is_empty());

    map.overlay.clear();

    assert!(map.overlay.is_empty());
}

#[test]
fn geojson_uses_lng_lat_order() {
    let mut map = sample_overlay();
    map.fit_bounds(
        LatLngBounds::new(LatLng::new(6.0, 79.0), LatLng::new(8.0, 81.0)),
    );

    let collection = map.to_geojson();

    assert_eq!(collection.features.len(), 3);
    assert_eq!(collection.bbox, Some(vec![79.0, 6.0, 81.0, 8.0]));

    let line = collection.features[0].geometry.as_ref().unwrap();
    assert_eq!(
        line.value,
        geojson::Value::LineString(vec![vec![79.8612, 6.9271], vec![80.6337, 7.2906]])
    );

    let start = &collection.features[1];
    assert_eq!(
        start.property("fillColor"),
        Some(&serde_json::json!("#28a745"))
    );
    assert_eq!(start.property("popup"), Some(&serde_json::json!("1. City")));
}
