//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and loaders produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (request counters and latency histograms)
//!
//! Consumers:
//!     → stdout (pretty or compact lines)
//!     → Metrics endpoint (Prometheus scrape, when enabled)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the trace span of every request
//! - Metric labels use the route template, not the raw path

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
