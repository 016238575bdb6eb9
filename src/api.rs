use std::sync::Arc;

use async_trait::async_trait;

use crate::entities::{City, RouteRequest, RouteResponse};
use crate::error::Error;

#[async_trait]
pub trait CityAPI {
    async fn list_cities(&self) -> Result<Vec<City>, Error>;
}

#[async_trait]
pub trait RouteAPI {
    async fn find_route(&self, request: RouteRequest) -> Result<RouteResponse, Error>;
}

pub trait API: CityAPI + RouteAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
