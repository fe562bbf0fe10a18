//! In-memory table types.
//!
//! A [`Table`] is immutable once built. Every [`Row`] shares the table's
//! header, so cloning a row out of a lookup only copies its values.

use std::collections::HashSet;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One record: column name to text value, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<String>,
}

impl Row {
    /// Value of the named column, if the table has it.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.value(i))
    }

    /// Value at a column position.
    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// `(column, value)` pairs in header order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.fields() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// A header plus its rows, in source order.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Arc<[String]>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table from a header and raw records.
    ///
    /// Repeated header names are renamed `Nome`, `Nome.1`, `Nome.2`, ... so
    /// every column keeps a distinct key.
    ///
    /// Records shorter than the header are padded with empty strings and
    /// longer ones are truncated; the loader rejects ragged input before
    /// this point.
    pub fn new(columns: Vec<String>, records: Vec<Vec<String>>) -> Self {
        let columns: Arc<[String]> = dedup_columns(columns).into();
        let width = columns.len();
        let rows = records
            .into_iter()
            .map(|mut values| {
                values.resize(width, String::new());
                Row {
                    columns: Arc::clone(&columns),
                    values,
                }
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the named column.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Rows whose `column` equals `value` exactly, in source order.
    ///
    /// A missing column matches nothing.
    pub fn rows_where<'a>(&'a self, column: &str, value: &'a str) -> impl Iterator<Item = &'a Row> + 'a {
        let index = self.column_index(column);
        self.rows
            .iter()
            .filter(move |row| index.is_some_and(|i| row.value(i) == Some(value)))
    }
}

fn dedup_columns(columns: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(columns.len());
    let mut out = Vec::with_capacity(columns.len());
    for column in columns {
        let mut name = column.clone();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", column, n);
            n += 1;
        }
        seen.insert(name.clone());
        out.push(name);
    }
    out
}

impl Default for Table {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}
