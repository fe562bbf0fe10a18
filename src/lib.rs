//! Veneto venue lookup service library.
//!
//! Serves district → city → venue lookups over two preloaded tables and
//! generates a downloadable text description of a selected venue.

pub mod config;
pub mod dataset;
pub mod http;
pub mod lifecycle;
pub mod lookup;
pub mod observability;

pub use config::AppConfig;
pub use dataset::Datasets;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
