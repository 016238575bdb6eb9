mod city;
mod location;
mod route;

pub use city::City;
pub use location::{LatLng, LatLngBounds};
pub use route::{Costs, RouteRequest, RouteResponse};
