//! Streaming object gateway library.

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod storage;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
