//! Lookup functions over the preloaded tables.
//!
//! # Contract
//! Every lookup has exactly two outcomes: it matched some rows, or it matched
//! none and returns an empty collection. A name that does not occur in the
//! table is not an error and is not reported differently from "zero rows".
//!
//! Matching is exact, case-sensitive string equality. Results keep source
//! row order; uniqueness queries keep the first occurrence of each value.

pub mod select;

use serde::Serialize;

use crate::dataset::{Row, Table};

pub use select::{
    cinemas_in_city, cities_in_district, option_pairs, province_names, theaters, unique_values,
    OptionPair,
};

/// District column (`Provincia`).
pub const DISTRICT_COLUMN: &str = "Provincia";
/// City column (`Città`).
pub const CITY_COLUMN: &str = "Città";
/// Venue name column (`Nome`).
pub const NAME_COLUMN: &str = "Nome";

/// Rows of one district.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictInfo {
    pub district_name: String,
    pub district_info: Vec<Row>,
}

/// Rows of one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityInfo {
    pub city_name: String,
    pub city_info: Vec<Row>,
}

/// Cinema rows of one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CinemaInfo {
    pub city_name: String,
    pub cinema_info: Vec<Row>,
}

/// Every row whose district equals `name`.
pub fn district(name: &str, table: &Table) -> DistrictInfo {
    DistrictInfo {
        district_name: name.to_string(),
        district_info: matching_rows(table, DISTRICT_COLUMN, name),
    }
}

/// Every row whose city equals `name`.
pub fn city(name: &str, table: &Table) -> CityInfo {
    CityInfo {
        city_name: name.to_string(),
        city_info: matching_rows(table, CITY_COLUMN, name),
    }
}

/// Every cinema row whose city equals `name`.
pub fn cinema(name: &str, table: &Table) -> CinemaInfo {
    CinemaInfo {
        city_name: name.to_string(),
        cinema_info: matching_rows(table, CITY_COLUMN, name),
    }
}

/// Rows of a venue within a city, used to describe a download.
pub fn venue_rows(venue: &str, city: &str, table: &Table) -> Vec<Row> {
    table
        .rows_where(CITY_COLUMN, city)
        .filter(|row| row.get(NAME_COLUMN) == Some(venue))
        .cloned()
        .collect()
}

fn matching_rows(table: &Table, column: &str, value: &str) -> Vec<Row> {
    table.rows_where(column, value).cloned().collect()
}
