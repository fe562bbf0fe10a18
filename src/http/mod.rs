//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, middleware stack)
//!     → request.rs (x-request-id set and echoed)
//!     → handlers.rs (lookup over the preloaded tables)
//!     → JSON body, or download.rs (write <venue>.txt, stream bytes back)
//! ```
//!
//! Form endpoints take `application/x-www-form-urlencoded` bodies; missing
//! fields are rejected by the extractor with a client-error status.

pub mod download;
pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
