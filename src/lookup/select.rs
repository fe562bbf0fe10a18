//! Unique-value queries backing the client's option lists.

use std::collections::HashSet;

use crate::dataset::Table;
use crate::lookup::{CITY_COLUMN, DISTRICT_COLUMN, NAME_COLUMN};

/// `(value, label)` pair; serialized as a two-element JSON array. Both sides
/// carry the same text.
pub type OptionPair = (String, String);

/// Distinct values of `column`, first occurrence order.
pub fn unique_values(table: &Table, column: &str) -> Vec<String> {
    let Some(index) = table.column_index(column) else {
        return Vec::new();
    };
    dedup(table.rows().iter().filter_map(|row| row.value(index)))
}

/// Distinct cities of a district.
pub fn cities_in_district(district: &str, table: &Table) -> Vec<String> {
    unique_where(table, DISTRICT_COLUMN, district, CITY_COLUMN)
}

/// Distinct venue names of a city.
pub fn theaters(city: &str, table: &Table) -> Vec<String> {
    unique_where(table, CITY_COLUMN, city, NAME_COLUMN)
}

/// Distinct cinema names of a city.
pub fn cinemas_in_city(city: &str, table: &Table) -> Vec<String> {
    unique_where(table, CITY_COLUMN, city, NAME_COLUMN)
}

/// Distinct districts joined with ", ".
pub fn province_names(table: &Table) -> String {
    unique_values(table, DISTRICT_COLUMN).join(", ")
}

/// Pair every value with itself.
pub fn option_pairs(values: Vec<String>) -> Vec<OptionPair> {
    values.into_iter().map(|v| (v.clone(), v)).collect()
}

fn unique_where(table: &Table, filter_column: &str, filter_value: &str, column: &str) -> Vec<String> {
    let Some(index) = table.column_index(column) else {
        return Vec::new();
    };
    dedup(
        table
            .rows_where(filter_column, filter_value)
            .filter_map(|row| row.value(index)),
    )
}

fn dedup<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
