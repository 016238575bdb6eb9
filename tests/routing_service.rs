use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use route_planner::api::{CityAPI, DynAPI, RouteAPI};
use route_planner::config::Config;
use route_planner::entities::{LatLng, RouteRequest};
use route_planner::external::routing_service::RoutingService;
use route_planner::page::{Page, PageState};

type Received = Arc<Mutex<Vec<Value>>>;

fn spawn_backend(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap();
    });

    format!("http://{}", addr)
}

fn service(api_base: &str) -> RoutingService {
    let config = Config::default().with_api_base(api_base).unwrap();
    RoutingService::new(&config)
}

async fn cities() -> Json<Value> {
    Json(json!(["colombo", "kandy", "galle"]))
}

async fn route_found(
    Extension(received): Extension<Received>,
    Json(body): Json<Value>,
) -> Json<Value> {
    received.lock().unwrap().push(body);

    Json(json!({
        "message": "Event detected: Esala Perahera",
        "path": ["colombo", "kandy"],
        "costs": {"time_hours": 2.25, "distance_km": 115.0, "fuel_lkr": 3593.75},
        "coordinates": [[6.9271, 79.8612], [7.2906, 80.6337]],
        "warnings": ["Warning: Road closures expected in Kandy for the Esala Perahera."]
    }))
}

async fn route_not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({"error": "no route"})))
}

async fn route_broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>")
}

fn backend(received: Received) -> Router {
    Router::new()
        .route("/api/cities", get(cities))
        .route("/api/route", post(route_found))
        .layer(Extension(received))
}

#[tokio::test]
async fn lists_cities() {
    let base = spawn_backend(backend(Received::default()));

    let cities = service(&base).list_cities().await.unwrap();

    let ids: Vec<&str> = cities.iter().map(|c| c.id()).collect();
    assert_eq!(ids, vec!["colombo", "kandy", "galle"]);
}

#[tokio::test]
async fn city_list_status_error() {
    let app = Router::new().route(
        "/api/cities",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
    );
    let base = spawn_backend(app);

    let err = service(&base).list_cities().await.unwrap_err();

    assert!(!err.is_user_facing());
}

#[tokio::test]
async fn posts_route_request_as_json() {
    let received = Received::default();
    let base = spawn_backend(backend(received.clone()));

    let response = service(&base)
        .find_route(RouteRequest {
            start: "colombo".into(),
            goal: "kandy".into(),
            datetime: "2025-08-09 18:30".into(),
        })
        .await
        .unwrap();

    assert_eq!(
        received.lock().unwrap().clone(),
        vec![json!({"start": "colombo", "goal": "kandy", "datetime": "2025-08-09 18:30"})]
    );
    assert_eq!(response.path, vec!["colombo", "kandy"]);
    assert_eq!(
        response.lat_lngs(),
        vec![LatLng::new(6.9271, 79.8612), LatLng::new(7.2906, 80.6337)]
    );
}

#[tokio::test]
async fn full_page_cycle() {
    let received = Received::default();
    let base = spawn_backend(backend(received.clone()));
    let api = Arc::new(service(&base)) as DynAPI;
    let mut page = Page::new(api);

    page.populate_cities().await.unwrap();
    page.select_start("colombo").unwrap();
    page.select_goal("kandy").unwrap();
    page.set_datetime("2025-08-09T18:30");
    page.submit().await.unwrap();

    let view = page.view();
    assert_eq!(view.message, "Event detected: Esala Perahera");
    assert_eq!(view.results.time, "2h 15m");
    assert_eq!(view.results.path, "Colombo → Kandy");
    assert!(!view.warnings.hidden);
    assert_eq!(view.warnings.items.len(), 1);
    assert!(!view.submit.disabled);
    assert_eq!(page.state(), PageState::Idle);

    let overlay = &page.map().overlay;
    assert_eq!(overlay.polylines().len(), 1);
    assert_eq!(overlay.markers().len(), 2);

    assert_eq!(
        received.lock().unwrap()[0]["datetime"],
        json!("2025-08-09 18:30")
    );
}

#[tokio::test]
async fn server_error_message_reaches_the_page() {
    let app = Router::new()
        .route("/api/cities", get(cities))
        .route("/api/route", post(route_not_found));
    let base = spawn_backend(app);
    let mut page = Page::new(Arc::new(service(&base)) as DynAPI);

    page.populate_cities().await.unwrap();
    page.set_datetime("2025-08-09T18:30");
    assert!(page.submit().await.is_err());

    assert_eq!(page.view().message, "Error: no route");
    assert!(!page.view().submit.disabled);
    assert!(page.view().results.hidden);
    assert!(page.map().overlay.is_empty());
}

#[tokio::test]
async fn non_json_error_body_uses_fallback() {
    let app = Router::new()
        .route("/api/cities", get(cities))
        .route("/api/route", post(route_broken));
    let base = spawn_backend(app);
    let mut page = Page::new(Arc::new(service(&base)) as DynAPI);

    page.populate_cities().await.unwrap();
    page.set_datetime("2025-08-09T18:30");
    assert!(page.submit().await.is_err());

    assert_eq!(page.view().message, "Error: Failed to find a route.");
    assert!(!page.view().submit.disabled);
}

#[tokio::test]
async fn unreachable_service() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let mut page = Page::new(Arc::new(service(&base)) as DynAPI);

    assert!(page.populate_cities().await.is_err());
    assert_eq!(
        page.view().message,
        "Error: Could not load city data from server."
    );
    assert!(page.view().start.is_empty());

    page.set_datetime("2025-08-09T18:30");
    assert!(page.submit().await.is_err());
    assert_eq!(page.view().message, "Error: Failed to find a route.");
    assert!(!page.view().submit.disabled);
}

async fn submit_against(error_body: Value) -> Page {
    let app = Router::new()
        .route("/api/cities", get(cities))
        .route(
            "/api/route",
            post(move || async move { (StatusCode::BAD_REQUEST, Json(error_body)) }),
        );
    let base = spawn_backend(app);
    let mut page = Page::new(Arc::new(service(&base)) as DynAPI);

    page.populate_cities().await.unwrap();
    page.set_datetime("2025-08-09T18:30");
    assert!(page.submit().await.is_err());
    page
}

#[tokio::test]
async fn empty_error_text_uses_fallback() {
    let page = submit_against(json!({"error": ""})).await;

    assert_eq!(page.view().message, "Error: Failed to find a route.");
    assert!(!page.view().submit.disabled);
}

#[tokio::test]
async fn non_string_error_is_shown_as_text() {
    let page = submit_against(json!({"error": 42})).await;

    assert_eq!(page.view().message, "Error: 42");
}
