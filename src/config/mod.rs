//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → CLI overrides applied in main, then shared with the server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the datasets it points at are too
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AppConfig;
pub use schema::DatasetConfig;
pub use schema::DownloadConfig;
pub use schema::ListenerConfig;
pub use schema::LogFormat;
pub use validation::ValidationError;
