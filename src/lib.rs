//! SOAP Middleware Library

pub mod config;
pub mod delivery;
pub mod envelope;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod resilience;

pub use config::schema::MiddlewareConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
