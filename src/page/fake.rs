use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{CityAPI, DynAPI, RouteAPI, API};
use crate::entities::{City, Costs, RouteRequest, RouteResponse};
use crate::error::{rejected_error, Error};

/// In-memory stand-in for the routing service.
pub struct FakeAPI {
    pub cities: Result<Vec<City>, Error>,
    pub route: Result<RouteResponse, Error>,
    pub requests: Arc<Mutex<Vec<RouteRequest>>>,
}

impl Default for FakeAPI {
    fn default() -> Self {
        Self {
            cities: Ok(Vec::new()),
            route: Err(rejected_error("No route could be found.")),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeAPI {
    pub fn with_cities(cities: Vec<City>) -> Self {
        Self {
            cities: Ok(cities),
            ..Self::default()
        }
    }

    pub fn failing_cities(err: Error) -> Self {
        Self {
            cities: Err(err),
            ..Self::default()
        }
    }

    pub fn with_route(mut self, route: Result<RouteResponse, Error>) -> Self {
        self.route = route;
        self
    }

    pub fn into_dyn(self) -> DynAPI {
        Arc::new(self)
    }
}

#[async_trait]
impl CityAPI for FakeAPI {
    async fn list_cities(&self) -> Result<Vec<City>, Error> {
        self.cities.clone()
    }
}

#[async_trait]
impl RouteAPI for FakeAPI {
    async fn find_route(&self, request: RouteRequest) -> Result<RouteResponse, Error> {
        self.requests.lock().unwrap().push(request);
        self.route.clone()
    }
}

impl API for FakeAPI {}

pub fn colombo_to_kandy() -> RouteResponse {
    RouteResponse {
        message: "No festival event detected.".into(),
        path: vec!["colombo".into(), "kegalle".into(), "kandy".into()],
        costs: Costs {
            time_hours: 1.5,
            distance_km: 115.0,
            fuel_lkr: 3593.75,
        },
        coordinates: Some(vec![
            Some([6.9271, 79.8612].into()),
            Some([7.2513, 80.3464].into()),
            Some([7.2906, 80.6337].into()),
        ]),
        warnings: Some(Vec::new()),
    }
}
