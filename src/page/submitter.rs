use super::view::{SUBMITTING_LABEL, SUBMIT_LABEL};
use super::{Page, PageState};

use crate::entities::{RouteRequest, RouteResponse};
use crate::error::Error;
use crate::format::payload_datetime;

pub const ROUTE_FALLBACK: &str = "Failed to find a route.";

impl Page {
    /// Sends the form to the routing service and renders the outcome. The
    /// submit control is re-enabled whatever the result.
    #[tracing::instrument(skip(self))]
    pub async fn submit(&mut self) -> Result<(), Error> {
        self.begin_submit();

        let outcome = self.request_route().await;
        let result = match outcome {
            Ok(response) => {
                self.display_route(&response);
                Ok(())
            }
            Err(err) => {
                tracing::error!("routing error: {}", err);
                self.view.message = format!("Error: {}", err.display_message(ROUTE_FALLBACK));
                Err(err)
            }
        };

        self.end_submit();
        result
    }

    pub fn build_request(&self) -> Result<RouteRequest, Error> {
        Ok(RouteRequest {
            start: self.view.start.value().to_string(),
            goal: self.view.goal.value().to_string(),
            datetime: payload_datetime(&self.view.datetime)?,
        })
    }

    fn begin_submit(&mut self) {
        self.state = PageState::Submitting;
        self.view.submit.disabled = true;
        self.view.submit.label = SUBMITTING_LABEL.into();
        self.view.reset_results();
        self.map.overlay.clear();
    }

    async fn request_route(&self) -> Result<RouteResponse, Error> {
        let request = self.build_request()?;
        tracing::info!(start = %request.start, goal = %request.goal, datetime = %request.datetime, "requesting route");

        self.api.find_route(request).await
    }

    fn end_submit(&mut self) {
        self.view.submit.disabled = false;
        self.view.submit.label = SUBMIT_LABEL.into();
        self.state = PageState::Idle;
    }
}

#[cfg(test)]
fn loaded_page(api: super::fake::FakeAPI) -> Page {
    use crate::entities::City;
    use tokio_test::block_on;

    let api = FakeAPI {
        cities: Ok(vec![
            City::new("colombo"),
            City::new("kegalle"),
            City::new("kandy"),
        ]),
        ..api
    };
    let mut page = Page::new(api.into_dyn());
    block_on(page.populate_cities()).unwrap();
    page
}

#[cfg(test)]
use super::fake::FakeAPI;

#[test]
fn submit_sends_selected_cities_and_formatted_datetime() {
    use super::fake::colombo_to_kandy;
    use tokio_test::block_on;

    let api = FakeAPI::default().with_route(Ok(colombo_to_kandy()));
    let requests = api.requests.clone();
    let mut page = loaded_page(api);

    page.select_start("colombo").unwrap();
    page.select_goal("kandy").unwrap();
    page.set_datetime("2025-04-14T09:05");
    block_on(page.submit()).unwrap();

    assert_eq!(
        requests.lock().unwrap().clone(),
        vec![RouteRequest {
            start: "colombo".into(),
            goal: "kandy".into(),
            datetime: "2025-04-14 09:05".into(),
        }]
    );
    assert_eq!(page.view().message, "No festival event detected.");
    assert!(!page.view().submit.disabled);
    assert_eq!(page.state(), PageState::Idle);
}

#[test]
fn server_error_text_is_shown_and_control_re_enabled() {
    use crate::error::rejected_error;
    use tokio_test::block_on;

    let api = FakeAPI::default().with_route(Err(rejected_error("no route")));
    let mut page = loaded_page(api);
    page.set_datetime("2025-04-14T09:05");

    assert!(block_on(page.submit()).is_err());

    assert_eq!(page.view().message, "Error: no route");
    assert!(!page.view().submit.disabled);
    assert_eq!(page.view().submit.label, "Find Fastest Route");
    assert_eq!(page.state(), PageState::Idle);
}

#[test]
fn transport_failures_show_generic_fallback() {
    use crate::error::upstream_error;
    use tokio_test::block_on;

    let api = FakeAPI::default().with_route(Err(upstream_error(502)));
    let mut page = loaded_page(api);
    page.set_datetime("2025-04-14T09:05");

    assert!(block_on(page.submit()).is_err());

    assert_eq!(page.view().message, "Error: Failed to find a route.");
    assert!(!page.view().submit.disabled);
}

#[test]
fn invalid_datetime_is_reported_without_a_request() {
    use tokio_test::block_on;

    let api = FakeAPI::default();
    let requests = api.requests.clone();
    let mut page = loaded_page(api);
    page.set_datetime("");

    assert!(block_on(page.submit()).is_err());

    assert!(requests.lock().unwrap().is_empty());
    assert_eq!(page.view().message, "Error: Invalid date/time: ");
    assert!(!page.view().submit.disabled);
}

#[test]
fn begin_submit_disables_control_and_clears_previous_result() {
    use super::fake::colombo_to_kandy;

    let mut page = loaded_page(FakeAPI::default());
    page.display_route(&colombo_to_kandy());
    assert!(!page.map().overlay.is_empty());

    page.begin_submit();

    assert_eq!(page.state(), PageState::Submitting);
    assert!(page.view().submit.disabled);
    assert_eq!(page.view().submit.label, "Calculating...");
    assert_eq!(page.view().message, "Plan your journey");
    assert!(page.view().results.hidden);
    assert!(page.map().overlay.is_empty());
}

#[test]
fn empty_server_error_falls_back_to_generic_text() {
    use crate::error::rejected_error;
    use tokio_test::block_on;

    let api = FakeAPI::default().with_route(Err(rejected_error("")));
    let mut page = loaded_page(api);
    page.set_datetime("2025-04-14T09:05");

    assert!(block_on(page.submit()).is_err());

    assert_eq!(page.view().message, "Error: Failed to find a route.");
    assert!(!page.view().submit.disabled);
}
