pub mod routing_service;
