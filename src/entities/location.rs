use geo_types::{coord, Coord, Rect};
use serde::{Deserialize, Serialize};

/// Latitude/longitude pair. On the wire it is a `[lat, lng]` array.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(point: LatLng) -> Self {
        [point.lat, point.lng]
    }
}

impl From<LatLng> for Coord<f64> {
    fn from(point: LatLng) -> Self {
        coord! { x: point.lng, y: point.lat }
    }
}

impl From<Coord<f64>> for LatLng {
    fn from(c: Coord<f64>) -> Self {
        Self { lat: c.y, lng: c.x }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLngBounds(Rect<f64>);

impl LatLngBounds {
    pub fn new(a: LatLng, b: LatLng) -> Self {
        Self(Rect::new(Coord::from(a), Coord::from(b)))
    }

    /// Smallest bounds holding every point, `None` for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = LatLng>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;

        Some(points.fold(Self::new(first, first), |bounds, p| bounds.extend(p)))
    }

    pub fn extend(self, point: LatLng) -> Self {
        let sw = self.south_west();
        let ne = self.north_east();

        Self::new(
            LatLng::new(sw.lat.min(point.lat), sw.lng.min(point.lng)),
            LatLng::new(ne.lat.max(point.lat), ne.lng.max(point.lng)),
        )
    }

    /// Grows every side by `ratio` times the span along that axis.
    pub fn pad(self, ratio: f64) -> Self {
        let lat_buffer = self.0.height() * ratio;
        let lng_buffer = self.0.width() * ratio;
        let sw = self.south_west();
        let ne = self.north_east();

        Self::new(
            LatLng::new(sw.lat - lat_buffer, sw.lng - lng_buffer),
            LatLng::new(ne.lat + lat_buffer, ne.lng + lng_buffer),
        )
    }

    pub fn south_west(&self) -> LatLng {
        self.0.min().into()
    }

    pub fn north_east(&self) -> LatLng {
        self.0.max().into()
    }

    /// GeoJSON bbox order: west, south, east, north.
    pub fn to_bbox(&self) -> Vec<f64> {
        let sw = self.south_west();
        let ne = self.north_east();

        vec![sw.lng, sw.lat, ne.lng, ne.lat]
    }
}

#[test]
fn lat_lng_reads_pairs() {
    let point: LatLng = serde_json::from_str("[6.9271, 79.8612]").unwrap();

    assert_eq!(point, LatLng::new(6.9271, 79.8612));
}

#[test]
fn bounds_cover_all_points() {
    let bounds = LatLngBounds::from_points(vec![
        LatLng::new(7.0, 80.0),
        LatLng::new(6.0, 81.0),
        LatLng::new(8.0, 79.5),
    ])
    .unwrap();

    assert_eq!(bounds.south_west(), LatLng::new(6.0, 79.5));
    assert_eq!(bounds.north_east(), LatLng::new(8.0, 81.0));
}

#[test]
fn padding_grows_each_side_by_ratio_of_span() {
    let bounds = LatLngBounds::new(LatLng::new(6.0, 80.0), LatLng::new(8.0, 81.0)).pad(0.1);

    let sw = bounds.south_west();
    let ne = bounds.north_east();
    assert!((sw.lat - 5.8).abs() < 1e-9);
    assert!((sw.lng - 79.9).abs() < 1e-9);
    assert!((ne.lat - 8.2).abs() < 1e-9);
    assert!((ne.lng - 81.1).abs() < 1e-9);
}

#[test]
fn empty_point_list_has_no_bounds() {
    assert!(LatLngBounds::from_points(Vec::new()).is_none());
}
