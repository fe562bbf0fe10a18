//! Delimited-file loading.
//!
//! Every cell is kept as text exactly as it appears in the file; numbers,
//! dates and empty cells are not interpreted.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use crate::dataset::table::Table;

/// Failure to load a table. All of these are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: &'static str },
}

/// Read a headed, delimited file into a [`Table`].
///
/// Ragged rows (a record with a different field count than the header) are
/// rejected rather than silently realigned.
pub fn load_table(path: impl AsRef<Path>, delimiter: u8) -> Result<Table, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let csv_err = |source: csv::Error| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(file);

    let columns: Vec<String> = rdr
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(csv_err)?;
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::new(columns, records))
}

/// Fail unless the table carries every named column.
pub fn require_columns(
    table: &Table,
    path: impl AsRef<Path>,
    columns: &[&'static str],
) -> Result<(), DatasetError> {
    for column in columns {
        if table.column_index(column).is_none() {
            return Err(DatasetError::MissingColumn {
                path: path.as_ref().to_path_buf(),
                column,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_cells_stay_text() {
        let file = write_tmp("Provincia;CAP;Posti\nVerona;037069;\n");
        let table = load_table(file.path(), b';').unwrap();

        assert_eq!(table.columns(), ["Provincia", "CAP", "Posti"]);
        let row = &table.rows()[0];
        assert_eq!(row.get("CAP"), Some("037069"));
        assert_eq!(row.get("Posti"), Some(""));
    }

    #[test]
    fn test_repeated_header_keeps_every_value() {
        let file = write_tmp("Provincia;Nome;Nome\nVerona;Teatro Nuovo;Sala A\n");
        let table = load_table(file.path(), b';').unwrap();

        assert_eq!(table.columns(), ["Provincia", "Nome", "Nome.1"]);
        let row = &table.rows()[0];
        assert_eq!(row.get("Nome"), Some("Teatro Nuovo"));
        assert_eq!(row.get("Nome.1"), Some("Sala A"));
    }

    #[test]
    fn test_quoted_delimiter_is_kept() {
        let file = write_tmp("Nome;Indirizzo\n\"Teatro; Nuovo\";Piazza 1\n");
        let table = load_table(file.path(), b';').unwrap();
        assert_eq!(table.rows()[0].get("Nome"), Some("Teatro; Nuovo"));
    }

    #[test]
    fn test_ragged_row_is_rejected() {
        let file = write_tmp("Provincia;Città\nVerona;Verona;extra\n");
        let err = load_table(file.path(), b';').unwrap_err();
        assert!(matches!(err, DatasetError::Csv { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_table("/no/such/table.csv", b';').unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn test_require_columns() {
        let file = write_tmp("Provincia\nVerona\n");
        let table = load_table(file.path(), b';').unwrap();

        assert!(require_columns(&table, file.path(), &["Provincia"]).is_ok());
        let err = require_columns(&table, file.path(), &["Provincia", "Città"]).unwrap_err();
        assert!(err.to_string().contains("'Città'"));
    }
}
