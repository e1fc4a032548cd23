//! HTTP surface of the catalog service.
//!
//! The binaries (`biblioteca-api`, `biblioteca-admin`) and the integration
//! tests all build on these modules; [`router::build_app_router`] assembles
//! the middleware stack in one place.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
