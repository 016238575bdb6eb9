use super::map::{CircleMarker, MarkerRole, Polyline, BOUNDS_PADDING, ROUTE_LINE};
use super::Page;

use crate::entities::RouteResponse;
use crate::format::{capitalize, format_distance, format_fuel, format_path, format_time};

impl Page {
    #[tracing::instrument(skip_all, fields(stops = response.path.len()))]
    pub fn display_route(&mut self, response: &RouteResponse) {
        self.view.message = response.message.clone();

        let results = &mut self.view.results;
        results.hidden = false;
        results.time = format_time(response.costs.time_hours);
        results.distance = format_distance(response.costs.distance_km);
        results.fuel = format_fuel(response.costs.fuel_lkr);
        results.path = format_path(&response.path);

        let warnings = &mut self.view.warnings;
        warnings.items = response.warnings().to_vec();
        warnings.hidden = warnings.items.is_empty();

        self.draw_route(response);
    }

    fn draw_route(&mut self, response: &RouteResponse) {
        let lat_lngs = response.lat_lngs();
        if lat_lngs.len() < 2 {
            return;
        }

        let polyline = Polyline {
            points: lat_lngs.clone(),
            style: ROUTE_LINE,
        };
        if let Some(bounds) = polyline.bounds() {
            self.map.fit_bounds(bounds.pad(BOUNDS_PADDING));
        }
        self.map.overlay.add_polyline(polyline);

        for (i, position) in lat_lngs.iter().enumerate() {
            let role = MarkerRole::for_index(i, lat_lngs.len());
            let popup = match response.path.get(i) {
                Some(city) => format!("{}. {}", i + 1, capitalize(city)),
                None => format!("{}.", i + 1),
            };

            self.map.overlay.add_marker(CircleMarker {
                position: *position,
                role,
                style: role.style(),
                popup,
            });
        }
    }
}

#[cfg(test)]
fn blank_page() -> Page {
    Page::new(super::fake::FakeAPI::default().into_dyn())
}

#[test]
fn text_outputs_are_formatted() {
    use super::fake::colombo_to_kandy;

    let mut page = blank_page();
    page.display_route(&colombo_to_kandy());

    let results = &page.view().results;
    assert!(!results.hidden);
    assert_eq!(results.time, "1h 30m");
    assert_eq!(results.distance, "115 km");
    assert_eq!(results.fuel, "LKR 3593.75");
    assert_eq!(results.path, "Colombo → Kegalle → Kandy");
    assert_eq!(page.view().message, "No festival event detected.");
}

#[test]
fn empty_warnings_hide_the_panel() {
    use super::fake::colombo_to_kandy;

    let mut page = blank_page();
    let mut response = colombo_to_kandy();

    response.warnings = Some(vec!["Warning: stale".into()]);
    page.display_route(&response);
    assert!(!page.view().warnings.hidden);

    response.warnings = Some(Vec::new());
    page.display_route(&response);
    assert!(page.view().warnings.hidden);
    assert!(page.view().warnings.items.is_empty());

    response.warnings = None;
    page.display_route(&response);
    assert!(page.view().warnings.hidden);
}

#[test]
fn single_warning_is_shown_verbatim() {
    use super::fake::colombo_to_kandy;

    let mut page = blank_page();
    let mut response = colombo_to_kandy();
    response.warnings =
        Some(vec!["Warning: Road closures expected in Kandy for the Esala Perahera.".into()]);

    page.display_route(&response);

    assert!(!page.view().warnings.hidden);
    assert_eq!(
        page.view().warnings.items,
        vec!["Warning: Road closures expected in Kandy for the Esala Perahera.".to_string()]
    );
}

#[test]
fn two_points_draw_one_line_and_two_markers() {
    use super::fake::colombo_to_kandy;
    use crate::entities::LatLng;

    let mut page = blank_page();
    let mut response = colombo_to_kandy();
    response.path = vec!["colombo".into(), "kandy".into()];
    response.coordinates = Some(vec![
        Some(LatLng::new(6.9271, 79.8612)),
        Some(LatLng::new(7.2906, 80.6337)),
    ]);

    page.display_route(&response);

    let overlay = &page.map().overlay;
    assert_eq!(overlay.polylines().len(), 1);
    assert_eq!(overlay.markers().len(), 2);

    let first = &overlay.markers()[0];
    let last = &overlay.markers()[1];
    assert_eq!(first.role, MarkerRole::Start);
    assert_eq!(last.role, MarkerRole::Goal);
    assert_ne!(first.style.fill_color, last.style.fill_color);
    assert_eq!(first.popup, "1. Colombo");
    assert_eq!(last.popup, "2. Kandy");
}

#[test]
fn intermediate_stops_get_smaller_markers_and_viewport_is_padded() {
    use super::fake::colombo_to_kandy;
    use super::map::Viewport;

    let mut page = blank_page();
    page.display_route(&colombo_to_kandy());

    let markers = page.map().overlay.markers();
    assert_eq!(markers.len(), 3);
    assert_eq!(markers[1].role, MarkerRole::Intermediate);
    assert_eq!(markers[1].style.radius, 6);
    assert_eq!(markers[1].popup, "2. Kegalle");

    match &page.map().viewport {
        Viewport::Bounds(bounds) => {
            let sw = bounds.south_west();
            let ne = bounds.north_east();
            let lat_span = 7.2906 - 6.9271;
            let lng_span = 80.6337 - 79.8612;
            assert!((sw.lat - (6.9271 - lat_span * 0.1)).abs() < 1e-9);
            assert!((sw.lng - (79.8612 - lng_span * 0.1)).abs() < 1e-9);
            assert!((ne.lat - (7.2906 + lat_span * 0.1)).abs() < 1e-9);
            assert!((ne.lng - (80.6337 + lng_span * 0.1)).abs() < 1e-9);
        }
        other => panic!("viewport not fitted: {:?}", other),
    }
}

#[test]
fn fewer_than_two_points_draw_nothing() {
    use super::fake::colombo_to_kandy;
    use crate::entities::LatLng;

    let mut page = blank_page();
    let mut response = colombo_to_kandy();
    response.coordinates = Some(vec![Some(LatLng::new(6.9271, 79.8612)), None]);

    page.display_route(&response);

    assert!(page.map().overlay.is_empty());
    assert!(!page.view().results.hidden);
}
