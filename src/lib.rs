pub mod config;
pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;
pub mod utils;
