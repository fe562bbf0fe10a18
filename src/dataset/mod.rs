//! Source tables.
//!
//! # Data Flow
//! ```text
//! startup:
//!     DatasetConfig (paths, delimiter)
//!     → loader.rs (read, keep every cell as text)
//!     → Datasets { venues, cinemas } (immutable)
//!     → shared via Arc with every handler
//! ```
//!
//! There is no write path. A missing or malformed file stops startup.

pub mod loader;
pub mod table;

use crate::config::DatasetConfig;
use crate::lookup::{CITY_COLUMN, DISTRICT_COLUMN, NAME_COLUMN};

pub use loader::{load_table, DatasetError};
pub use table::{Row, Table};

/// Both tables the service answers from.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    /// District/city/venue table.
    pub venues: Table,
    /// Cinema table.
    pub cinemas: Table,
}

impl Datasets {
    /// Load both tables and check they carry the lookup columns.
    pub fn load(config: &DatasetConfig) -> Result<Self, DatasetError> {
        let delimiter = config.delimiter_byte();
        let required = [DISTRICT_COLUMN, CITY_COLUMN, NAME_COLUMN];

        let venues = load_table(&config.venues_path, delimiter)?;
        loader::require_columns(&venues, &config.venues_path, &required)?;
        tracing::info!(path = %config.venues_path, rows = venues.len(), "Venue table loaded");

        let cinemas = load_table(&config.cinemas_path, delimiter)?;
        loader::require_columns(&cinemas, &config.cinemas_path, &required)?;
        tracing::info!(path = %config.cinemas_path, rows = cinemas.len(), "Cinema table loaded");

        Ok(Self { venues, cinemas })
    }
}
