//! Download file generation.
//!
//! A download writes `<venue>.txt` into the configured output directory and
//! returns the file's bytes as `application/octet-stream`. The file is left
//! on disk; a second download of the same venue overwrites it (last writer
//! wins, no locking).

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::dataset::Row;

/// Form fields of `POST /download`.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadRequest {
    pub selected_option: String,
    pub district: String,
    pub city: String,
}

/// A written download file.
#[derive(Debug)]
pub struct GeneratedFile {
    pub file_name: String,
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

/// `<venue>.txt`, with path separators replaced so the file stays inside
/// the output directory.
pub fn file_name(selected_option: &str) -> String {
    format!("{}.txt", selected_option.replace(['/', '\\'], "_"))
}

/// Human-readable description of the selection.
pub fn render(request: &DownloadRequest, details: &[Row]) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Venue: {}", request.selected_option);
    let _ = writeln!(text, "District: {}", request.district);
    let _ = writeln!(text, "City: {}", request.city);
    text.push('\n');
    text.push_str("Details\n-------\n");

    if details.is_empty() {
        text.push_str("No further details available.\n");
        return text;
    }

    for (i, row) in details.iter().enumerate() {
        if i > 0 {
            text.push('\n');
        }
        for (column, value) in row.fields() {
            let _ = writeln!(text, "{}: {}", column, value);
        }
    }
    text
}

/// Write the file and return the rendered bytes.
///
/// The response carries what this request rendered, not what is on disk
/// afterwards: a concurrent download of the same venue may overwrite the
/// file at any point.
pub async fn write_file(
    output_dir: &Path,
    request: &DownloadRequest,
    details: &[Row],
) -> std::io::Result<GeneratedFile> {
    let file_name = file_name(&request.selected_option);
    let path = output_dir.join(&file_name);

    let contents = render(request, details).into_bytes();

    tokio::fs::create_dir_all(output_dir).await?;
    tokio::fs::write(&path, &contents).await?;

    Ok(GeneratedFile {
        file_name,
        path,
        contents,
    })
}

impl IntoResponse for GeneratedFile {
    fn into_response(self) -> Response {
        let disposition = HeaderValue::from_str(&format!(
            "attachment; filename=\"{}\"",
            self.file_name.replace('"', "'")
        ))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

        (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/octet-stream"),
                ),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            Body::from(self.contents),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Table;

    fn request() -> DownloadRequest {
        DownloadRequest {
            selected_option: "Auditorium Comunale".into(),
            district: "Verona".into(),
            city: "Villafranca di Verona".into(),
        }
    }

    #[test]
    fn test_file_name_strips_separators() {
        assert_eq!(file_name("Auditorium Comunale"), "Auditorium Comunale.txt");
        assert_eq!(file_name("../etc/passwd"), ".._etc_passwd.txt");
        assert_eq!(file_name("a\\b"), "a_b.txt");
    }

    #[test]
    fn test_render_without_details() {
        let text = render(&request(), &[]);
        assert!(text.starts_with(
            "Venue: Auditorium Comunale\nDistrict: Verona\nCity: Villafranca di Verona\n"
        ));
        assert!(text.ends_with("No further details available.\n"));
    }

    #[test]
    fn test_render_lists_detail_fields() {
        let table = Table::new(
            vec!["Nome".into(), "Posti".into()],
            vec![vec!["Auditorium Comunale".into(), "350".into()]],
        );
        let text = render(&request(), table.rows());
        assert!(text.contains("Nome: Auditorium Comunale\nPosti: 350\n"));
    }

    #[tokio::test]
    async fn test_write_file_leaves_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(dir.path(), &request(), &[]).await.unwrap();

        assert_eq!(file.path, dir.path().join("Auditorium Comunale.txt"));
        let on_disk = std::fs::read(&file.path).unwrap();
        assert_eq!(on_disk, file.contents);
        assert!(!file.contents.is_empty());
    }

    #[tokio::test]
    async fn test_write_file_overwrites_previous() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request();
        write_file(dir.path(), &req, &[]).await.unwrap();

        req.city = "Verona".into();
        let file = write_file(dir.path(), &req, &[]).await.unwrap();
        let text = std::fs::read_to_string(&file.path).unwrap();
        assert!(text.contains("City: Verona\n"));
        assert!(!text.contains("Villafranca"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes_never_return_empty_bytes() {
        let dir = std::sync::Arc::new(tempfile::tempdir().unwrap());

        let tasks: Vec<_> = (0..64)
            .map(|i| {
                let dir = dir.clone();
                tokio::spawn(async move {
                    let mut req = request();
                    if i % 2 == 0 {
                        req.city = "Verona".into();
                    }
                    let file = write_file(dir.path(), &req, &[]).await.unwrap();
                    (req, file)
                })
            })
            .collect();

        for task in tasks {
            let (req, file) = task.await.unwrap();
            assert_eq!(file.contents, render(&req, &[]).into_bytes());
        }

        let on_disk = std::fs::read_to_string(dir.path().join("Auditorium Comunale.txt")).unwrap();
        assert!(on_disk.starts_with("Venue: Auditorium Comunale\n"));
    }
}
