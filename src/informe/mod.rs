//! Report assembly endpoints.

pub mod model;
pub mod routes;
