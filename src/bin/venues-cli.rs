use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "venues-cli")]
#[command(about = "Command-line client for the Veneto venue lookup service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every district
    Districts,
    /// List the cities of a district
    Cities {
        #[arg(long)]
        district: String,
    },
    /// List the venues of a city
    Theaters {
        #[arg(long)]
        city: String,
    },
    /// Show every row of a district
    District { name: String },
    /// Show every row of a city
    City { name: String },
    /// Download the description file of a venue
    Download {
        #[arg(long)]
        venue: String,
        #[arg(long)]
        district: String,
        #[arg(long)]
        city: String,
        /// Where to save the file; defaults to `<venue>.txt`
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show the server's current time
    Date,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Districts => {
            let res = client.post(format!("{}/select_districts", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Cities { district } => {
            let res = client
                .post(format!("{}/select_cities", base))
                .form(&[("district", district)])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Theaters { city } => {
            let res = client
                .post(format!("{}/select_theater", base))
                .form(&[("city", city)])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::District { name } => {
            let url = path_url(base, "district", &name)?;
            print_response(client.get(url).send().await?).await?;
        }
        Commands::City { name } => {
            let url = path_url(base, "city", &name)?;
            print_response(client.get(url).send().await?).await?;
        }
        Commands::Download {
            venue,
            district,
            city,
            out,
        } => {
            let out = out.unwrap_or_else(|| PathBuf::from(format!("{}.txt", venue)));
            let res = client
                .post(format!("{}/download", base))
                .form(&[
                    ("selected_option", venue),
                    ("district", district),
                    ("city", city),
                ])
                .send()
                .await?;
            let res = check_status(res).await?;
            let bytes = res.bytes().await?;
            tokio::fs::write(&out, &bytes).await?;
            println!("Saved {} bytes to {}", bytes.len(), out.display());
        }
        Commands::Date => {
            let res = client.get(format!("{}/get-date", base)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

/// `<base>/<segment>/<name>` with `name` percent-encoded as one path segment.
fn path_url(base: &str, segment: &str, name: &str) -> Result<reqwest::Url, Box<dyn std::error::Error>> {
    let mut url = reqwest::Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| "base URL cannot carry a path")?
        .pop_if_empty()
        .push(segment)
        .push(name);
    Ok(url)
}

/// Pass a successful response through; turn anything else into an error
/// carrying the status and body, so the process exits non-zero.
async fn check_status(res: reqwest::Response) -> Result<reqwest::Response, Box<dyn std::error::Error>> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let text = res.text().await.unwrap_or_default();
    Err(format!("API returned status {}: {}", status, text).into())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let res = check_status(res).await?;
    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            axum::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_error_status_is_an_error() {
        let err = check_status(response(422, "missing field `city`"))
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("422"));
        assert!(message.contains("missing field `city`"));
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let res = check_status(response(200, "[]")).await.unwrap();
        assert_eq!(res.text().await.unwrap(), "[]");
    }
}
