//! Template editing surface: block palette, validation and the registry routes.

pub mod model;
pub mod routes;
